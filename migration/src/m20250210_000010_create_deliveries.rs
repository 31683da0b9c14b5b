use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250210_000006_create_requests::Request;
use super::m20250210_000009_create_drivers::Driver;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(DeliveryStatus::Enum)
                    .values([
                        DeliveryStatus::Assigned,
                        DeliveryStatus::PickedUp,
                        DeliveryStatus::InTransit,
                        DeliveryStatus::Delivered,
                        DeliveryStatus::Failed,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Delivery::Table)
                    .if_not_exists()
                    .col(uuid(Delivery::Id).primary_key())
                    .col(uuid(Delivery::RequestId).not_null().unique_key())
                    .col(uuid(Delivery::DriverId).not_null())
                    .col(
                        ColumnDef::new(Delivery::Status)
                            .custom(DeliveryStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Delivery::AssignedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Delivery::StartedAt))
                    .col(timestamp_with_time_zone_null(Delivery::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_delivery_request")
                            .from(Delivery::Table, Delivery::RequestId)
                            .to(Request::Table, Request::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_delivery_driver")
                            .from(Delivery::Table, Delivery::DriverId)
                            .to(Driver::Table, Driver::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Delivery::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(DeliveryStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Delivery {
    Table,
    Id,
    RequestId,
    DriverId,
    Status,
    AssignedAt,
    StartedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
pub enum DeliveryStatus {
    #[sea_orm(iden = "delivery_status")]
    Enum,
    #[sea_orm(iden = "assigned")]
    Assigned,
    #[sea_orm(iden = "picked_up")]
    PickedUp,
    #[sea_orm(iden = "in_transit")]
    InTransit,
    #[sea_orm(iden = "delivered")]
    Delivered,
    #[sea_orm(iden = "failed")]
    Failed,
}
