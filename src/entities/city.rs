use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "city")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::center::Entity")]
    Centers,
    #[sea_orm(has_many = "super::tariff::Entity")]
    Tariffs,
}

impl Related<super::center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Centers.def()
    }
}

impl Related<super::tariff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tariffs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
