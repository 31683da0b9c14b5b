use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "package_status")]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "delivered")]
    Delivered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "content_type")]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[sea_orm(string_value = "documents")]
    Documents,
    #[sea_orm(string_value = "electronics")]
    Electronics,
    #[sea_orm(string_value = "clothing")]
    Clothing,
    #[sea_orm(string_value = "food")]
    Food,
    #[sea_orm(string_value = "fragile")]
    Fragile,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Physical parcel attributes, 1:1 with its request. `distance` is the
/// great-circle distance computed when the request was priced.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "package")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub request_id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub weight: f64,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub content_type: ContentType,
    pub description: Option<String>,
    pub declared_value: Option<f64>,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub recipient_address: String,
    pub recipient_city_id: i32,
    pub recipient_latitude: Option<f64>,
    pub recipient_longitude: Option<f64>,
    pub distance: f64,
    pub payment_method: super::payment::PaymentMethod,
    pub status: PackageStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::request::Entity",
        from = "Column::RequestId",
        to = "super::request::Column::Id"
    )]
    Request,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::RecipientCityId",
        to = "super::city::Column::Id"
    )]
    RecipientCity,
}

impl Related<super::request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipientCity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
