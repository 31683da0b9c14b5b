use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "request_status")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "request_source")]
#[serde(rename_all = "snake_case")]
pub enum RequestSource {
    #[sea_orm(string_value = "web")]
    Web,
    #[sea_orm(string_value = "mobile")]
    Mobile,
    #[sea_orm(string_value = "api")]
    Api,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// A customer's delivery booking. `amount` is the price computed at creation
/// time and is only recomputed when weight or delivery type change; later
/// tariff edits never touch it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub user_id: Uuid,
    pub center_id: i32,
    pub delivery_type_id: i32,
    pub sender_full_name: String,
    pub sender_phone: String,
    pub sender_address: String,
    pub sender_city_id: i32,
    pub sender_latitude: Option<f64>,
    pub sender_longitude: Option<f64>,
    pub weight: f64,
    pub amount: f64,
    pub status: RequestStatus,
    pub payment_status: PaymentStatus,
    pub validated_by: Option<Uuid>,
    pub validated_at: Option<DateTimeWithTimeZone>,
    pub notes: Option<String>,
    pub source: RequestSource,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::center::Entity",
        from = "Column::CenterId",
        to = "super::center::Column::Id"
    )]
    Center,
    #[sea_orm(
        belongs_to = "super::delivery_type::Entity",
        from = "Column::DeliveryTypeId",
        to = "super::delivery_type::Column::Id"
    )]
    DeliveryType,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::SenderCityId",
        to = "super::city::Column::Id"
    )]
    SenderCity,
    #[sea_orm(has_one = "super::package::Entity")]
    Package,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
    #[sea_orm(has_one = "super::delivery::Entity")]
    Delivery,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Center.def()
    }
}

impl Related<super::delivery_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryType.def()
    }
}

impl Related<super::package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Package.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::delivery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Delivery.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
