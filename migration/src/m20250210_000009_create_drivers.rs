use sea_orm_migration::{prelude::*, schema::*};

use super::m20250210_000002_create_centers::Center;
use super::m20250210_000005_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Driver::Table)
                    .if_not_exists()
                    .col(uuid(Driver::Id).primary_key())
                    .col(uuid(Driver::UserId).not_null().unique_key())
                    .col(string_len(Driver::Code, 20).not_null().unique_key())
                    .col(integer_null(Driver::CenterId))
                    .col(string_len_null(Driver::VehicleType, 50))
                    .col(double_null(Driver::LastLatitude))
                    .col(double_null(Driver::LastLongitude))
                    .col(timestamp_with_time_zone_null(Driver::LastPositionUpdate))
                    .col(boolean(Driver::IsOnline).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(Driver::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_driver_user")
                            .from(Driver::Table, Driver::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_driver_center")
                            .from(Driver::Table, Driver::CenterId)
                            .to(Center::Table, Center::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Driver::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Driver {
    Table,
    Id,
    UserId,
    Code,
    CenterId,
    VehicleType,
    LastLatitude,
    LastLongitude,
    LastPositionUpdate,
    IsOnline,
    CreatedAt,
}
