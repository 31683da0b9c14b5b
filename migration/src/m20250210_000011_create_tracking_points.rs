use sea_orm_migration::{prelude::*, schema::*};

use super::m20250210_000009_create_drivers::Driver;
use super::m20250210_000010_create_deliveries::Delivery;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrackingPoint::Table)
                    .if_not_exists()
                    .col(pk_auto(TrackingPoint::Id))
                    .col(uuid(TrackingPoint::DeliveryId).not_null())
                    .col(uuid(TrackingPoint::DriverId).not_null())
                    .col(double(TrackingPoint::Latitude).not_null())
                    .col(double(TrackingPoint::Longitude).not_null())
                    .col(
                        timestamp_with_time_zone(TrackingPoint::RecordedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tracking_point_delivery")
                            .from(TrackingPoint::Table, TrackingPoint::DeliveryId)
                            .to(Delivery::Table, Delivery::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tracking_point_driver")
                            .from(TrackingPoint::Table, TrackingPoint::DriverId)
                            .to(Driver::Table, Driver::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tracking_point_delivery")
                    .table(TrackingPoint::Table)
                    .col(TrackingPoint::DeliveryId)
                    .col(TrackingPoint::RecordedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrackingPoint::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TrackingPoint {
    Table,
    Id,
    DeliveryId,
    DriverId,
    Latitude,
    Longitude,
    RecordedAt,
}
