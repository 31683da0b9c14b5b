use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rate card row for one (city, delivery type) pair. At most one active row
/// per pair is assumed by the pricing lookup.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tariff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub city_id: i32,
    pub delivery_type_id: i32,
    pub base_price: f64,
    pub price_per_km: f64,
    pub price_per_kg: f64,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
    #[sea_orm(
        belongs_to = "super::delivery_type::Entity",
        from = "Column::DeliveryTypeId",
        to = "super::delivery_type::Column::Id"
    )]
    DeliveryType,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::delivery_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
