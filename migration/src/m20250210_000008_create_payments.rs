use sea_orm_migration::{prelude::*, schema::*};

use super::m20250210_000005_create_users::User;
use super::m20250210_000006_create_requests::Request;
use super::m20250210_000007_create_packages::PaymentMethod;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(uuid(Payment::Id).primary_key())
                    .col(uuid(Payment::RequestId).not_null())
                    .col(uuid(Payment::UserId).not_null())
                    .col(string_len(Payment::Code, 20).not_null().unique_key())
                    .col(
                        ColumnDef::new(Payment::Method)
                            .custom(PaymentMethod::Enum)
                            .not_null(),
                    )
                    .col(double(Payment::Amount).not_null())
                    .col(string_len(Payment::Currency, 3).not_null())
                    .col(
                        timestamp_with_time_zone(Payment::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_request")
                            .from(Payment::Table, Payment::RequestId)
                            .to(Request::Table, Request::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_user")
                            .from(Payment::Table, Payment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    RequestId,
    UserId,
    Code,
    Method,
    Amount,
    Currency,
    CreatedAt,
}
