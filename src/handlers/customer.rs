use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::package::{self, ContentType, PackageStatus};
use crate::entities::payment::PaymentMethod;
use crate::entities::request::{self, PaymentStatus, RequestSource, RequestStatus};
use crate::entities::{center, city, delivery, delivery_type, tariff, tracking_point};
use crate::entities::delivery::DeliveryStatus;
use crate::error::{AppError, AppResult};
use crate::pricing;
use crate::utils::codes::generate_code;
use crate::utils::geo::distance_km;
use crate::utils::jwt::Claims;
use crate::AppState;

// ============ Reference Data ============

#[derive(Debug, Serialize)]
pub struct CityInfo {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct CenterInfo {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct TariffInfo {
    pub city_id: i32,
    pub city: String,
    pub base_price: f64,
    pub price_per_km: f64,
    pub price_per_kg: f64,
}

#[derive(Debug, Serialize)]
pub struct DeliveryTypeInfo {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub tariffs: Vec<TariffInfo>,
}

/// List active cities
pub async fn list_cities(State(state): State<AppState>) -> AppResult<Json<Vec<CityInfo>>> {
    let cities = city::Entity::find()
        .filter(city::Column::IsActive.eq(true))
        .all(&state.db)
        .await?;

    let responses: Vec<CityInfo> = cities
        .into_iter()
        .map(|c| CityInfo {
            id: c.id,
            name: c.name,
            latitude: c.latitude,
            longitude: c.longitude,
        })
        .collect();

    Ok(Json(responses))
}

/// List active drop-off centers
pub async fn list_centers(State(state): State<AppState>) -> AppResult<Json<Vec<CenterInfo>>> {
    let centers = center::Entity::find()
        .filter(center::Column::IsActive.eq(true))
        .all(&state.db)
        .await?;
    let cities = city::Entity::find().all(&state.db).await?;

    let responses: Vec<CenterInfo> = centers
        .into_iter()
        .map(|c| {
            let city = cities.iter().find(|ct| ct.id == c.city_id);
            CenterInfo {
                id: c.id,
                name: c.name,
                address: c.address,
                phone: c.phone,
                city: city.map(|ct| ct.name.clone()).unwrap_or_default(),
            }
        })
        .collect();

    Ok(Json(responses))
}

/// List active delivery types with their rate cards
pub async fn list_delivery_types(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DeliveryTypeInfo>>> {
    let delivery_types = delivery_type::Entity::find()
        .filter(delivery_type::Column::IsActive.eq(true))
        .all(&state.db)
        .await?;
    let tariffs = tariff::Entity::find()
        .filter(tariff::Column::IsActive.eq(true))
        .all(&state.db)
        .await?;
    let cities = city::Entity::find().all(&state.db).await?;

    let responses: Vec<DeliveryTypeInfo> = delivery_types
        .into_iter()
        .map(|dt| {
            let rates: Vec<TariffInfo> = tariffs
                .iter()
                .filter(|t| t.delivery_type_id == dt.id)
                .map(|t| TariffInfo {
                    city_id: t.city_id,
                    city: cities
                        .iter()
                        .find(|c| c.id == t.city_id)
                        .map(|c| c.name.clone())
                        .unwrap_or_default(),
                    base_price: t.base_price,
                    price_per_km: t.price_per_km,
                    price_per_kg: t.price_per_kg,
                })
                .collect();

            DeliveryTypeInfo {
                id: dt.id,
                name: dt.name,
                description: dt.description,
                tariffs: rates,
            }
        })
        .collect();

    Ok(Json(responses))
}

// ============ Request Management ============

#[derive(Debug, Deserialize)]
pub struct CreateRequestPayload {
    pub center_id: i32,
    pub delivery_type_id: i32,
    pub sender_full_name: String,
    pub sender_phone: String,
    pub sender_address: String,
    pub sender_city_id: i32,
    pub sender_latitude: Option<f64>,
    pub sender_longitude: Option<f64>,
    pub recipient_full_name: String,
    pub recipient_phone: String,
    pub recipient_address: String,
    pub recipient_city_id: i32,
    pub recipient_latitude: Option<f64>,
    pub recipient_longitude: Option<f64>,
    pub weight: f64,
    pub content_type: ContentType,
    pub description: Option<String>,
    pub declared_value: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    pub source: Option<RequestSource>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PartyInfo {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PackageInfo {
    pub code: String,
    pub weight: f64,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub content_type: ContentType,
    pub description: Option<String>,
    pub declared_value: Option<f64>,
    pub distance: f64,
    pub payment_method: PaymentMethod,
    pub status: PackageStatus,
}

#[derive(Debug, Serialize)]
pub struct RequestDetailResponse {
    pub id: Uuid,
    pub code: String,
    pub status: RequestStatus,
    pub payment_status: PaymentStatus,
    pub amount: f64,
    pub delivery_type: String,
    pub center: String,
    pub sender: PartyInfo,
    pub recipient: PartyInfo,
    pub package: PackageInfo,
    pub notes: Option<String>,
    pub source: RequestSource,
    pub created_at: DateTime<Utc>,
}

fn build_detail(
    request: request::Model,
    package: package::Model,
    cities: &[city::Model],
    centers: &[center::Model],
    delivery_types: &[delivery_type::Model],
) -> RequestDetailResponse {
    let city_name = |id: i32| {
        cities
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_default()
    };

    RequestDetailResponse {
        id: request.id,
        code: request.code,
        status: request.status,
        payment_status: request.payment_status,
        amount: request.amount,
        delivery_type: delivery_types
            .iter()
            .find(|dt| dt.id == request.delivery_type_id)
            .map(|dt| dt.name.clone())
            .unwrap_or_default(),
        center: centers
            .iter()
            .find(|c| c.id == request.center_id)
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        sender: PartyInfo {
            full_name: request.sender_full_name,
            phone: request.sender_phone,
            address: request.sender_address,
            city: city_name(request.sender_city_id),
            latitude: request.sender_latitude,
            longitude: request.sender_longitude,
        },
        recipient: PartyInfo {
            full_name: package.recipient_name,
            phone: package.recipient_phone,
            address: package.recipient_address,
            city: city_name(package.recipient_city_id),
            latitude: package.recipient_latitude,
            longitude: package.recipient_longitude,
        },
        package: PackageInfo {
            code: package.code,
            weight: package.weight,
            length: package.length,
            width: package.width,
            height: package.height,
            content_type: package.content_type,
            description: package.description,
            declared_value: package.declared_value,
            distance: package.distance,
            payment_method: package.payment_method,
            status: package.status,
        },
        notes: request.notes,
        source: request.source,
        created_at: request.created_at.with_timezone(&Utc),
    }
}

/// Create a delivery request with its package, priced atomically
pub async fn create_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateRequestPayload>,
) -> AppResult<(StatusCode, Json<RequestDetailResponse>)> {
    if !(0.1..=1000.0).contains(&payload.weight) {
        return Err(AppError::Validation(
            "weight",
            "Weight must be between 0.1 and 1000 kg".to_string(),
        ));
    }

    // Validate references
    let center = center::Entity::find_by_id(payload.center_id)
        .one(&state.db)
        .await?
        .filter(|c| c.is_active)
        .ok_or_else(|| AppError::BadRequest("Invalid center".to_string()))?;

    let sender_city = city::Entity::find_by_id(payload.sender_city_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid sender city".to_string()))?;

    let recipient_city = city::Entity::find_by_id(payload.recipient_city_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid recipient city".to_string()))?;

    let delivery_type = delivery_type::Entity::find_by_id(payload.delivery_type_id)
        .one(&state.db)
        .await?
        .filter(|dt| dt.is_active)
        .ok_or_else(|| AppError::BadRequest("Invalid delivery type".to_string()))?;

    // Price and persist atomically; any failure below rolls everything back
    let txn = state.db.begin().await?;

    let distance = distance_km(
        payload.sender_latitude,
        payload.sender_longitude,
        payload.recipient_latitude,
        payload.recipient_longitude,
    );

    let sender_tariff =
        pricing::resolve_tariff(&txn, payload.sender_city_id, payload.delivery_type_id).await?;
    let recipient_tariff =
        pricing::resolve_tariff(&txn, payload.recipient_city_id, payload.delivery_type_id).await?;

    let amount = pricing::calculate_amount(payload.weight, distance, &sender_tariff, &recipient_tariff);

    let request_id = Uuid::new_v4();
    let new_request = request::ActiveModel {
        id: Set(request_id),
        code: Set(generate_code("REQ")),
        user_id: Set(claims.sub),
        center_id: Set(payload.center_id),
        delivery_type_id: Set(payload.delivery_type_id),
        sender_full_name: Set(payload.sender_full_name.clone()),
        sender_phone: Set(payload.sender_phone.clone()),
        sender_address: Set(payload.sender_address.clone()),
        sender_city_id: Set(payload.sender_city_id),
        sender_latitude: Set(payload.sender_latitude),
        sender_longitude: Set(payload.sender_longitude),
        weight: Set(payload.weight),
        amount: Set(amount),
        status: Set(RequestStatus::Pending),
        payment_status: Set(PaymentStatus::Unpaid),
        validated_by: Set(None),
        validated_at: Set(None),
        notes: Set(payload.notes.clone()),
        source: Set(payload.source.unwrap_or(RequestSource::Web)),
        ..Default::default()
    };

    let request = new_request.insert(&txn).await?;

    let new_package = package::ActiveModel {
        id: Set(Uuid::new_v4()),
        request_id: Set(request_id),
        code: Set(generate_code("PKG")),
        weight: Set(payload.weight),
        length: Set(payload.length),
        width: Set(payload.width),
        height: Set(payload.height),
        content_type: Set(payload.content_type),
        description: Set(payload.description.clone()),
        declared_value: Set(payload.declared_value),
        recipient_name: Set(payload.recipient_full_name.clone()),
        recipient_phone: Set(payload.recipient_phone.clone()),
        recipient_address: Set(payload.recipient_address.clone()),
        recipient_city_id: Set(payload.recipient_city_id),
        recipient_latitude: Set(payload.recipient_latitude),
        recipient_longitude: Set(payload.recipient_longitude),
        distance: Set(distance),
        payment_method: Set(payload.payment_method.unwrap_or(PaymentMethod::Cash)),
        status: Set(PackageStatus::Pending),
        ..Default::default()
    };

    let package = new_package.insert(&txn).await?;

    txn.commit().await?;

    let detail = build_detail(
        request,
        package,
        &[sender_city, recipient_city],
        &[center],
        &[delivery_type],
    );

    Ok((StatusCode::CREATED, Json(detail)))
}

/// List the logged-in customer's requests
pub async fn my_requests(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<RequestDetailResponse>>> {
    let requests = request::Entity::find()
        .filter(request::Column::UserId.eq(claims.sub))
        .order_by_desc(request::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let cities = city::Entity::find().all(&state.db).await?;
    let centers = center::Entity::find().all(&state.db).await?;
    let delivery_types = delivery_type::Entity::find().all(&state.db).await?;

    let mut responses = Vec::new();
    for r in requests {
        let package = package::Entity::find()
            .filter(package::Column::RequestId.eq(r.id))
            .one(&state.db)
            .await?;

        let Some(package) = package else {
            continue;
        };

        responses.push(build_detail(r, package, &cities, &centers, &delivery_types));
    }

    Ok(Json(responses))
}

/// Get one of the customer's requests with its package
pub async fn get_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(request_id): Path<Uuid>,
) -> AppResult<Json<RequestDetailResponse>> {
    let request = request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

    if request.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only view your own requests".to_string(),
        ));
    }

    let package = package::Entity::find()
        .filter(package::Column::RequestId.eq(request.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Package missing for request".to_string()))?;

    let cities = city::Entity::find().all(&state.db).await?;
    let centers = center::Entity::find().all(&state.db).await?;
    let delivery_types = delivery_type::Entity::find().all(&state.db).await?;

    Ok(Json(build_detail(
        request,
        package,
        &cities,
        &centers,
        &delivery_types,
    )))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequestPayload {
    pub center_id: Option<i32>,
    pub delivery_type_id: Option<i32>,
    pub sender_full_name: Option<String>,
    pub sender_phone: Option<String>,
    pub sender_address: Option<String>,
    pub sender_city_id: Option<i32>,
    pub sender_latitude: Option<f64>,
    pub sender_longitude: Option<f64>,
    pub recipient_full_name: Option<String>,
    pub recipient_phone: Option<String>,
    pub recipient_address: Option<String>,
    pub recipient_city_id: Option<i32>,
    pub recipient_latitude: Option<f64>,
    pub recipient_longitude: Option<f64>,
    pub weight: Option<f64>,
    pub content_type: Option<ContentType>,
    pub description: Option<String>,
    pub declared_value: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

/// Partially update a request and its package.
///
/// The amount is only recomputed when the payload touches the weight or the
/// delivery type; otherwise the price stays at its creation-time snapshot.
pub async fn update_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<UpdateRequestPayload>,
) -> AppResult<Json<RequestDetailResponse>> {
    let request = request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

    if request.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only update your own requests".to_string(),
        ));
    }

    let package = package::Entity::find()
        .filter(package::Column::RequestId.eq(request.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Package missing for request".to_string()))?;

    if let Some(weight) = payload.weight {
        if !(0.1..=1000.0).contains(&weight) {
            return Err(AppError::Validation(
                "weight",
                "Weight must be between 0.1 and 1000 kg".to_string(),
            ));
        }
    }

    if let Some(center_id) = payload.center_id {
        center::Entity::find_by_id(center_id)
            .one(&state.db)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| AppError::BadRequest("Invalid center".to_string()))?;
    }

    if let Some(city_id) = payload.sender_city_id {
        city::Entity::find_by_id(city_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid sender city".to_string()))?;
    }

    if let Some(city_id) = payload.recipient_city_id {
        city::Entity::find_by_id(city_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid recipient city".to_string()))?;
    }

    if let Some(delivery_type_id) = payload.delivery_type_id {
        delivery_type::Entity::find_by_id(delivery_type_id)
            .one(&state.db)
            .await?
            .filter(|dt| dt.is_active)
            .ok_or_else(|| AppError::BadRequest("Invalid delivery type".to_string()))?;
    }

    let reprice = pricing::should_reprice(payload.delivery_type_id, payload.weight);

    // Merged view of the request after this update, for repricing
    let merged_delivery_type = payload.delivery_type_id.unwrap_or(request.delivery_type_id);
    let merged_weight = payload.weight.unwrap_or(request.weight);
    let merged_sender_city = payload.sender_city_id.unwrap_or(request.sender_city_id);
    let merged_recipient_city = payload.recipient_city_id.unwrap_or(package.recipient_city_id);
    let merged_sender_lat = payload.sender_latitude.or(request.sender_latitude);
    let merged_sender_lon = payload.sender_longitude.or(request.sender_longitude);
    let merged_recipient_lat = payload.recipient_latitude.or(package.recipient_latitude);
    let merged_recipient_lon = payload.recipient_longitude.or(package.recipient_longitude);

    let txn = state.db.begin().await?;

    let mut request_active: request::ActiveModel = request.into();
    let mut package_active: package::ActiveModel = package.into();

    if let Some(center_id) = payload.center_id {
        request_active.center_id = Set(center_id);
    }
    if let Some(delivery_type_id) = payload.delivery_type_id {
        request_active.delivery_type_id = Set(delivery_type_id);
    }
    if let Some(name) = payload.sender_full_name {
        request_active.sender_full_name = Set(name);
    }
    if let Some(phone) = payload.sender_phone {
        request_active.sender_phone = Set(phone);
    }
    if let Some(address) = payload.sender_address {
        request_active.sender_address = Set(address);
    }
    if let Some(city_id) = payload.sender_city_id {
        request_active.sender_city_id = Set(city_id);
    }
    if let Some(lat) = payload.sender_latitude {
        request_active.sender_latitude = Set(Some(lat));
    }
    if let Some(lon) = payload.sender_longitude {
        request_active.sender_longitude = Set(Some(lon));
    }
    if let Some(weight) = payload.weight {
        request_active.weight = Set(weight);
        package_active.weight = Set(weight);
    }
    if let Some(notes) = payload.notes {
        request_active.notes = Set(Some(notes));
    }

    if let Some(name) = payload.recipient_full_name {
        package_active.recipient_name = Set(name);
    }
    if let Some(phone) = payload.recipient_phone {
        package_active.recipient_phone = Set(phone);
    }
    if let Some(address) = payload.recipient_address {
        package_active.recipient_address = Set(address);
    }
    if let Some(city_id) = payload.recipient_city_id {
        package_active.recipient_city_id = Set(city_id);
    }
    if let Some(lat) = payload.recipient_latitude {
        package_active.recipient_latitude = Set(Some(lat));
    }
    if let Some(lon) = payload.recipient_longitude {
        package_active.recipient_longitude = Set(Some(lon));
    }
    if let Some(content_type) = payload.content_type {
        package_active.content_type = Set(content_type);
    }
    if let Some(description) = payload.description {
        package_active.description = Set(Some(description));
    }
    if let Some(declared_value) = payload.declared_value {
        package_active.declared_value = Set(Some(declared_value));
    }
    if let Some(length) = payload.length {
        package_active.length = Set(Some(length));
    }
    if let Some(width) = payload.width {
        package_active.width = Set(Some(width));
    }
    if let Some(height) = payload.height {
        package_active.height = Set(Some(height));
    }
    if let Some(method) = payload.payment_method {
        package_active.payment_method = Set(method);
    }

    if reprice {
        let distance = distance_km(
            merged_sender_lat,
            merged_sender_lon,
            merged_recipient_lat,
            merged_recipient_lon,
        );

        let sender_tariff =
            pricing::resolve_tariff(&txn, merged_sender_city, merged_delivery_type).await?;
        let recipient_tariff =
            pricing::resolve_tariff(&txn, merged_recipient_city, merged_delivery_type).await?;

        let amount =
            pricing::calculate_amount(merged_weight, distance, &sender_tariff, &recipient_tariff);

        request_active.amount = Set(amount);
        package_active.distance = Set(distance);
    }

    let now = Utc::now();
    request_active.updated_at = Set(now.into());
    package_active.updated_at = Set(now.into());

    let request = request_active.update(&txn).await?;
    let package = package_active.update(&txn).await?;

    txn.commit().await?;

    let cities = city::Entity::find().all(&state.db).await?;
    let centers = center::Entity::find().all(&state.db).await?;
    let delivery_types = delivery_type::Entity::find().all(&state.db).await?;

    Ok(Json(build_detail(
        request,
        package,
        &cities,
        &centers,
        &delivery_types,
    )))
}

/// A validated request whose package has left the pending state is already
/// being processed physically and can no longer be deleted.
pub fn deletion_blocked(status: RequestStatus, package_status: PackageStatus) -> bool {
    status == RequestStatus::Accepted && package_status != PackageStatus::Pending
}

/// Delete a request and its package
pub async fn delete_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(request_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let request = request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

    if request.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only delete your own requests".to_string(),
        ));
    }

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

// ============ Public Tracking ============

#[derive(Debug, Serialize)]
pub struct PositionInfo {
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub request_code: String,
    pub package_code: String,
    pub status: RequestStatus,
    pub payment_status: PaymentStatus,
    pub package_status: PackageStatus,
    pub delivery_status: Option<DeliveryStatus>,
    pub last_position: Option<PositionInfo>,
}

/// Track a package by its code
pub async fn track_package(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<TrackingResponse>> {
    let package = package::Entity::find()
        .filter(package::Column::Code.eq(&code))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

    let request = request::Entity::find_by_id(package.request_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Request missing for package".to_string()))?;

    let delivery = delivery::Entity::find()
        .filter(delivery::Column::RequestId.eq(request.id))
        .one(&state.db)
        .await?;

    let last_position = match &delivery {
        Some(d) => tracking_point::Entity::find()
            .filter(tracking_point::Column::DeliveryId.eq(d.id))
            .order_by_desc(tracking_point::Column::RecordedAt)
            .one(&state.db)
            .await?,
        None => None,
    };

    Ok(Json(TrackingResponse {
        request_code: request.code,
        package_code: package.code,
        status: request.status,
        payment_status: request.payment_status,
        package_status: package.status,
        delivery_status: delivery.map(|d| d.status),
        last_position: last_position.map(|p| PositionInfo {
            latitude: p.latitude,
            longitude: p.longitude,
            recorded_at: p.recorded_at.with_timezone(&Utc),
        }),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletion_blocked_once_package_is_processed() {
        assert!(deletion_blocked(
            RequestStatus::Accepted,
            PackageStatus::InProgress
        ));
        assert!(deletion_blocked(
            RequestStatus::Accepted,
            PackageStatus::Delivered
        ));
    }

    #[test]
    fn test_deletion_allowed_while_pending() {
        assert!(!deletion_blocked(
            RequestStatus::Accepted,
            PackageStatus::Pending
        ));
        assert!(!deletion_blocked(
            RequestStatus::Pending,
            PackageStatus::Pending
        ));
        // Only validated requests lock; a cancelled one is deletable even if
        // its package had started processing before cancellation.
        assert!(!deletion_blocked(
            RequestStatus::Cancelled,
            PackageStatus::InProgress
        ));
    }
}
