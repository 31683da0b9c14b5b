use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::delivery::{self, DeliveryStatus};
use crate::entities::package::{self, PackageStatus};
use crate::entities::payment::{self, PaymentMethod};
use crate::entities::request::{self, PaymentStatus, RequestStatus};
use crate::entities::user::{self, UserRole};
use crate::entities::{center, city, delivery_type, driver, tariff};
use crate::error::{AppError, AppResult};
use crate::handlers::customer::deletion_blocked;
use crate::utils::codes::generate_code;
use crate::utils::jwt::Claims;
use crate::AppState;

// ============ Request Administration ============

#[derive(Debug, Deserialize)]
pub struct ListRequestsQuery {
    pub status: Option<RequestStatus>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Serialize)]
pub struct RequestSummary {
    pub id: Uuid,
    pub code: String,
    pub customer_name: String,
    pub customer_email: String,
    pub sender_city: String,
    pub recipient_city: String,
    pub delivery_type: String,
    pub weight: f64,
    pub amount: f64,
    pub status: RequestStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// List all requests, optionally filtered by status and payment status
pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<ListRequestsQuery>,
) -> AppResult<Json<Vec<RequestSummary>>> {
    let mut finder = request::Entity::find();

    if let Some(status) = query.status {
        finder = finder.filter(request::Column::Status.eq(status));
    }
    if let Some(payment_status) = query.payment_status {
        finder = finder.filter(request::Column::PaymentStatus.eq(payment_status));
    }

    let requests = finder
        .order_by_desc(request::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let users = user::Entity::find().all(&state.db).await?;
    let cities = city::Entity::find().all(&state.db).await?;
    let delivery_types = delivery_type::Entity::find().all(&state.db).await?;

    let mut responses = Vec::new();
    for r in requests {
        let package = package::Entity::find()
            .filter(package::Column::RequestId.eq(r.id))
            .one(&state.db)
            .await?;

        let customer = users.iter().find(|u| u.id == r.user_id);
        let city_name = |id: i32| {
            cities
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_default()
        };

        responses.push(RequestSummary {
            id: r.id,
            code: r.code,
            customer_name: customer.map(|u| u.name.clone()).unwrap_or_default(),
            customer_email: customer.map(|u| u.email.clone()).unwrap_or_default(),
            sender_city: city_name(r.sender_city_id),
            recipient_city: package
                .map(|p| city_name(p.recipient_city_id))
                .unwrap_or_default(),
            delivery_type: delivery_types
                .iter()
                .find(|dt| dt.id == r.delivery_type_id)
                .map(|dt| dt.name.clone())
                .unwrap_or_default(),
            weight: r.weight,
            amount: r.amount,
            status: r.status,
            payment_status: r.payment_status,
            created_at: r.created_at.with_timezone(&Utc),
        });
    }

    Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusPayload {
    pub status: RequestStatus,
}

/// Change a request's status.
///
/// Accepting stamps the validating user and time; every other transition
/// clears them. Unrecognized status tokens are rejected at deserialization.
pub async fn change_request_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<ChangeStatusPayload>,
) -> AppResult<Json<request::Model>> {
    let request = request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

    let mut active: request::ActiveModel = request.into();
    active.status = Set(payload.status);

    if payload.status == RequestStatus::Accepted {
        active.validated_by = Set(Some(claims.sub));
        active.validated_at = Set(Some(Utc::now().into()));
    } else {
        active.validated_by = Set(None);
        active.validated_at = Set(None);
    }

    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct ChangePaymentStatusPayload {
    pub payment_status: PaymentStatus,
}

/// Change a request's payment status
pub async fn change_payment_status(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<ChangePaymentStatusPayload>,
) -> AppResult<Json<request::Model>> {
    let request = request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

    let mut active: request::ActiveModel = request.into();
    active.payment_status = Set(payload.payment_status);
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

/// Delete any request, subject to the same processing guard as customers
pub async fn delete_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let request = request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

    let package = package::Entity::find()
        .filter(package::Column::RequestId.eq(request.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Package missing for request".to_string()))?;

    if deletion_blocked(request.status, package.status) {
        return Err(AppError::Conflict(
            "Cannot delete a validated request whose package is already being processed"
                .to_string(),
        ));
    }

    request::Entity::delete_by_id(request_id)
        .exec(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "message": "Request deleted" })))
}

// ============ Payments ============

#[derive(Debug, Deserialize)]
pub struct RecordPaymentPayload {
    pub method: PaymentMethod,
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

/// Record a payment against a request and mark it paid, atomically
pub async fn record_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<RecordPaymentPayload>,
) -> AppResult<(StatusCode, Json<payment::Model>)> {
    let request = request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

    if request.payment_status == PaymentStatus::Paid {
        return Err(AppError::Conflict("Request is already paid".to_string()));
    }

    let amount = payload.amount.unwrap_or(request.amount);
    if amount <= 0.0 {
        return Err(AppError::BadRequest("Amount must be positive".to_string()));
    }

    let txn = state.db.begin().await?;

    let new_payment = payment::ActiveModel {
        id: Set(Uuid::new_v4()),
        request_id: Set(request.id),
        user_id: Set(claims.sub),
        code: Set(generate_code("PAY")),
        method: Set(payload.method),
        amount: Set(amount),
        currency: Set(payload.currency.unwrap_or_else(|| "MAD".to_string())),
        ..Default::default()
    };

    let payment = new_payment.insert(&txn).await?;

    let mut active: request::ActiveModel = request.into();
    active.payment_status = Set(PaymentStatus::Paid);
    active.updated_at = Set(Utc::now().into());
    active.update(&txn).await?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

/// List payments recorded against a request
pub async fn list_payments(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> AppResult<Json<Vec<payment::Model>>> {
    request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

    let payments = payment::Entity::find()
        .filter(payment::Column::RequestId.eq(request_id))
        .order_by_desc(payment::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(payments))
}

// ============ Rate Card Administration ============

/// List all tariff rows, active and inactive
pub async fn list_tariffs(State(state): State<AppState>) -> AppResult<Json<Vec<tariff::Model>>> {
    let tariffs = tariff::Entity::find()
        .order_by_asc(tariff::Column::CityId)
        .all(&state.db)
        .await?;

    Ok(Json(tariffs))
}

#[derive(Debug, Deserialize)]
pub struct CreateTariffPayload {
    pub city_id: i32,
    pub delivery_type_id: i32,
    pub base_price: f64,
    pub price_per_km: f64,
    pub price_per_kg: f64,
}

/// Create a tariff row for a (city, delivery type) pair.
///
/// Any previously active row for the pair is deactivated in the same
/// transaction, keeping the one-active-row-per-pair lookup assumption true.
pub async fn create_tariff(
    State(state): State<AppState>,
    Json(payload): Json<CreateTariffPayload>,
) -> AppResult<(StatusCode, Json<tariff::Model>)> {
    if payload.base_price < 0.0 || payload.price_per_km < 0.0 || payload.price_per_kg < 0.0 {
        return Err(AppError::BadRequest(
            "Prices must be non-negative".to_string(),
        ));
    }

    city::Entity::find_by_id(payload.city_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid city".to_string()))?;

    delivery_type::Entity::find_by_id(payload.delivery_type_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid delivery type".to_string()))?;

    let txn = state.db.begin().await?;

    let previous = tariff::Entity::find()
        .filter(tariff::Column::CityId.eq(payload.city_id))
        .filter(tariff::Column::DeliveryTypeId.eq(payload.delivery_type_id))
        .filter(tariff::Column::IsActive.eq(true))
        .all(&txn)
        .await?;

    for row in previous {
        let mut active: tariff::ActiveModel = row.into();
        active.is_active = Set(false);
        active.update(&txn).await?;
    }

    let new_tariff = tariff::ActiveModel {
        city_id: Set(payload.city_id),
        delivery_type_id: Set(payload.delivery_type_id),
        base_price: Set(payload.base_price),
        price_per_km: Set(payload.price_per_km),
        price_per_kg: Set(payload.price_per_kg),
        is_active: Set(true),
        ..Default::default()
    };

    let created = new_tariff.insert(&txn).await?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTariffPayload {
    pub base_price: Option<f64>,
    pub price_per_km: Option<f64>,
    pub price_per_kg: Option<f64>,
    pub is_active: Option<bool>,
}

/// Update a tariff row. Already-priced requests keep their snapshot amount.
pub async fn update_tariff(
    State(state): State<AppState>,
    Path(tariff_id): Path<i32>,
    Json(payload): Json<UpdateTariffPayload>,
) -> AppResult<Json<tariff::Model>> {
    let row = tariff::Entity::find_by_id(tariff_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tariff not found".to_string()))?;

    for price in [payload.base_price, payload.price_per_km, payload.price_per_kg]
        .into_iter()
        .flatten()
    {
        if price < 0.0 {
            return Err(AppError::BadRequest(
                "Prices must be non-negative".to_string(),
            ));
        }
    }

    let mut active: tariff::ActiveModel = row.into();

    if let Some(base_price) = payload.base_price {
        active.base_price = Set(base_price);
    }
    if let Some(price_per_km) = payload.price_per_km {
        active.price_per_km = Set(price_per_km);
    }
    if let Some(price_per_kg) = payload.price_per_kg {
        active.price_per_kg = Set(price_per_kg);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

// ============ Driver Roster ============

#[derive(Debug, Deserialize)]
pub struct CreateDriverPayload {
    pub user_id: Uuid,
    pub center_id: Option<i32>,
    pub vehicle_type: Option<String>,
}

/// Promote a user to driver and create their courier profile
pub async fn create_driver(
    State(state): State<AppState>,
    Json(payload): Json<CreateDriverPayload>,
) -> AppResult<(StatusCode, Json<driver::Model>)> {
    let user = user::Entity::find_by_id(payload.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let existing = driver::Entity::find()
        .filter(driver::Column::UserId.eq(payload.user_id))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict("User is already a driver".to_string()));
    }

    if let Some(center_id) = payload.center_id {
        center::Entity::find_by_id(center_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid center".to_string()))?;
    }

    let txn = state.db.begin().await?;

    if user.role != UserRole::Driver {
        let mut active: user::ActiveModel = user.into();
        active.role = Set(UserRole::Driver);
        active.update(&txn).await?;
    }

    let new_driver = driver::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(payload.user_id),
        code: Set(generate_code("DRV")),
        center_id: Set(payload.center_id),
        vehicle_type: Set(payload.vehicle_type.clone()),
        last_latitude: Set(None),
        last_longitude: Set(None),
        last_position_update: Set(None),
        is_online: Set(false),
        ..Default::default()
    };

    let created = new_driver.insert(&txn).await?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub email: String,
    pub vehicle_type: Option<String>,
    pub center: Option<String>,
    pub is_online: bool,
    pub last_latitude: Option<f64>,
    pub last_longitude: Option<f64>,
    pub last_position_update: Option<DateTime<Utc>>,
}

/// List the driver roster
pub async fn list_drivers(State(state): State<AppState>) -> AppResult<Json<Vec<DriverResponse>>> {
    let drivers = driver::Entity::find().all(&state.db).await?;
    let users = user::Entity::find().all(&state.db).await?;
    let centers = center::Entity::find().all(&state.db).await?;

    let responses: Vec<DriverResponse> = drivers
        .into_iter()
        .map(|d| {
            let user = users.iter().find(|u| u.id == d.user_id);
            let center = d
                .center_id
                .and_then(|id| centers.iter().find(|c| c.id == id));

            DriverResponse {
                id: d.id,
                code: d.code,
                name: user.map(|u| u.name.clone()).unwrap_or_default(),
                email: user.map(|u| u.email.clone()).unwrap_or_default(),
                vehicle_type: d.vehicle_type,
                center: center.map(|c| c.name.clone()),
                is_online: d.is_online,
                last_latitude: d.last_latitude,
                last_longitude: d.last_longitude,
                last_position_update: d.last_position_update.map(|t| t.with_timezone(&Utc)),
            }
        })
        .collect();

    Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct AssignDriverPayload {
    pub driver_id: Uuid,
}

/// Assign a driver to an accepted request, moving its package into processing
pub async fn assign_driver(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<AssignDriverPayload>,
) -> AppResult<(StatusCode, Json<delivery::Model>)> {
    let request = request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

    if request.status != RequestStatus::Accepted {
        return Err(AppError::BadRequest(
            "Request must be accepted before assigning a driver".to_string(),
        ));
    }

    driver::Entity::find_by_id(payload.driver_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;

    let existing = delivery::Entity::find()
        .filter(delivery::Column::RequestId.eq(request.id))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "Request already has a driver assigned".to_string(),
        ));
    }

    let package = package::Entity::find()
        .filter(package::Column::RequestId.eq(request.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Package missing for request".to_string()))?;

    let txn = state.db.begin().await?;

    let new_delivery = delivery::ActiveModel {
        id: Set(Uuid::new_v4()),
        request_id: Set(request.id),
        driver_id: Set(payload.driver_id),
        status: Set(DeliveryStatus::Assigned),
        started_at: Set(None),
        completed_at: Set(None),
        ..Default::default()
    };

    let created = new_delivery.insert(&txn).await?;

    let mut package_active: package::ActiveModel = package.into();
    package_active.status = Set(PackageStatus::InProgress);
    package_active.updated_at = Set(Utc::now().into());
    package_active.update(&txn).await?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(created)))
}
