use axum::{
    extract::{Path, State},
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
use crate::entities::payment::PaymentMethod;
use crate::entities::{city, driver, request, tracking_point};
use crate::error::{AppError, AppResult};
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DeliveryTaskResponse {
    pub id: Uuid,
    pub status: DeliveryStatus,
    pub request_code: String,
    pub package_code: String,
    pub pickup_address: String,
    pub pickup_city: String,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub recipient_address: String,
    pub recipient_city: String,
    pub weight: f64,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub assigned_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

async fn find_driver_profile(state: &AppState, claims: &Claims) -> AppResult<driver::Model> {
    driver::Entity::find()
        .filter(driver::Column::UserId.eq(claims.sub))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Driver profile not found".to_string()))
}

/// List deliveries assigned to the logged-in driver
pub async fn my_deliveries(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<DeliveryTaskResponse>>> {
    let profile = find_driver_profile(&state, &claims).await?;

    let deliveries = delivery::Entity::find()
        .filter(delivery::Column::DriverId.eq(profile.id))
        .order_by_desc(delivery::Column::AssignedAt)
        .all(&state.db)
        .await?;

    let cities = city::Entity::find().all(&state.db).await?;

    let mut responses = Vec::new();
    for d in deliveries {
        let request = request::Entity::find_by_id(d.request_id)
            .one(&state.db)
            .await?;
        let package = package::Entity::find()
            .filter(package::Column::RequestId.eq(d.request_id))
            .one(&state.db)
            .await?;

        let (Some(request), Some(package)) = (request, package) else {
            continue;
        };

        let city_name = |id: i32| {
            cities
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_default()
        };

        responses.push(DeliveryTaskResponse {
            id: d.id,
            status: d.status,
            request_code: request.code,
            package_code: package.code,
            pickup_address: request.sender_address,
            pickup_city: city_name(request.sender_city_id),
            recipient_name: package.recipient_name,
            recipient_phone: package.recipient_phone,
            recipient_address: package.recipient_address,
            recipient_city: city_name(package.recipient_city_id),
            weight: package.weight,
            amount: request.amount,
            payment_method: package.payment_method,
            assigned_at: d.assigned_at.with_timezone(&Utc),
            started_at: d.started_at.map(|t| t.with_timezone(&Utc)),
            completed_at: d.completed_at.map(|t| t.with_timezone(&Utc)),
        });
    }

    Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct UpdateDeliveryStatusPayload {
    pub status: DeliveryStatus,
}

/// Progress a delivery through pickup, transit and completion
pub async fn update_delivery_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(delivery_id): Path<Uuid>,
    Json(payload): Json<UpdateDeliveryStatusPayload>,
) -> AppResult<Json<delivery::Model>> {
    let profile = find_driver_profile(&state, &claims).await?;

    let delivery = delivery::Entity::find_by_id(delivery_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Delivery not found".to_string()))?;

    if delivery.driver_id != profile.id {
        return Err(AppError::Forbidden(
            "You are not assigned to this delivery".to_string(),
        ));
    }

    if payload.status == DeliveryStatus::Assigned {
        return Err(AppError::BadRequest(
            "A delivery cannot be moved back to assigned".to_string(),
        ));
    }

    if delivery.completed_at.is_some() {
        return Err(AppError::Conflict(
            "Delivery is already completed".to_string(),
        ));
    }

    let request_id = delivery.request_id;
    let started_at = delivery.started_at;

    let txn = state.db.begin().await?;

    let now = Utc::now();
    let mut active: delivery::ActiveModel = delivery.into();
    active.status = Set(payload.status);

    match payload.status {
        DeliveryStatus::PickedUp | DeliveryStatus::InTransit => {
            if started_at.is_none() {
                active.started_at = Set(Some(now.into()));
            }
        }
        DeliveryStatus::Delivered | DeliveryStatus::Failed => {
            active.completed_at = Set(Some(now.into()));
        }
        DeliveryStatus::Assigned => unreachable!(),
    }

    let updated = active.update(&txn).await?;

    if payload.status == DeliveryStatus::Delivered {
        let package = package::Entity::find()
            .filter(package::Column::RequestId.eq(request_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::Internal("Package missing for request".to_string()))?;

        let mut package_active: package::ActiveModel = package.into();
        package_active.status = Set(PackageStatus::Delivered);
        package_active.updated_at = Set(now.into());
        package_active.update(&txn).await?;
    }

    txn.commit().await?;

    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePositionPayload {
    pub latitude: f64,
    pub longitude: f64,
}

/// Report the driver's current position.
///
/// Updates the profile's last known position and, when a delivery is
/// underway, appends a tracking point to its breadcrumb trail.
pub async fn update_position(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdatePositionPayload>,
) -> AppResult<Json<serde_json::Value>> {
    if !(-90.0..=90.0).contains(&payload.latitude)
        || !(-180.0..=180.0).contains(&payload.longitude)
    {
        return Err(AppError::BadRequest("Invalid coordinates".to_string()));
    }

    let profile = find_driver_profile(&state, &claims).await?;
    let profile_id = profile.id;

    let txn = state.db.begin().await?;

    let mut active: driver::ActiveModel = profile.into();
    active.last_latitude = Set(Some(payload.latitude));
    active.last_longitude = Set(Some(payload.longitude));
    active.last_position_update = Set(Some(Utc::now().into()));
    active.is_online = Set(true);
    active.update(&txn).await?;

    let current_delivery = delivery::Entity::find()
        .filter(delivery::Column::DriverId.eq(profile_id))
        .filter(delivery::Column::Status.is_in([
            DeliveryStatus::Assigned,
            DeliveryStatus::PickedUp,
            DeliveryStatus::InTransit,
        ]))
        .order_by_desc(delivery::Column::AssignedAt)
        .one(&txn)
        .await?;

    if let Some(current) = current_delivery {
        let point = tracking_point::ActiveModel {
            delivery_id: Set(current.id),
            driver_id: Set(profile_id),
            latitude: Set(payload.latitude),
            longitude: Set(payload.longitude),
            ..Default::default()
        };
        point.insert(&txn).await?;
    }

    txn.commit().await?;

    Ok(Json(serde_json::json!({ "message": "Position updated" })))
}
