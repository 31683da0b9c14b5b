use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250210_000001_create_cities::City;
use super::m20250210_000002_create_centers::Center;
use super::m20250210_000003_create_delivery_types::DeliveryType;
use super::m20250210_000005_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(RequestStatus::Enum)
                    .values([
                        RequestStatus::Pending,
                        RequestStatus::Accepted,
                        RequestStatus::Rejected,
                        RequestStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(PaymentStatus::Enum)
                    .values([
                        PaymentStatus::Unpaid,
                        PaymentStatus::Paid,
                        PaymentStatus::Refunded,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(RequestSource::Enum)
                    .values([
                        RequestSource::Web,
                        RequestSource::Mobile,
                        RequestSource::Api,
                        RequestSource::Admin,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Request::Table)
                    .if_not_exists()
                    .col(uuid(Request::Id).primary_key())
                    .col(string_len(Request::Code, 20).not_null().unique_key())
                    .col(uuid(Request::UserId).not_null())
                    .col(integer(Request::CenterId).not_null())
                    .col(integer(Request::DeliveryTypeId).not_null())
                    .col(string_len(Request::SenderFullName, 255).not_null())
                    .col(string_len(Request::SenderPhone, 20).not_null())
                    .col(string_len(Request::SenderAddress, 500).not_null())
                    .col(integer(Request::SenderCityId).not_null())
                    .col(double_null(Request::SenderLatitude))
                    .col(double_null(Request::SenderLongitude))
                    .col(double(Request::Weight).not_null())
                    .col(double(Request::Amount).not_null())
                    .col(
                        ColumnDef::new(Request::Status)
                            .custom(RequestStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Request::PaymentStatus)
                            .custom(PaymentStatus::Enum)
                            .not_null(),
                    )
                    .col(uuid_null(Request::ValidatedBy))
                    .col(timestamp_with_time_zone_null(Request::ValidatedAt))
                    .col(string_len_null(Request::Notes, 1000))
                    .col(
                        ColumnDef::new(Request::Source)
                            .custom(RequestSource::Enum)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Request::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Request::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_user")
                            .from(Request::Table, Request::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_center")
                            .from(Request::Table, Request::CenterId)
                            .to(Center::Table, Center::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_delivery_type")
                            .from(Request::Table, Request::DeliveryTypeId)
                            .to(DeliveryType::Table, DeliveryType::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_sender_city")
                            .from(Request::Table, Request::SenderCityId)
                            .to(City::Table, City::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Request::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RequestSource::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PaymentStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RequestStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Request {
    Table,
    Id,
    Code,
    UserId,
    CenterId,
    DeliveryTypeId,
    SenderFullName,
    SenderPhone,
    SenderAddress,
    SenderCityId,
    SenderLatitude,
    SenderLongitude,
    Weight,
    Amount,
    Status,
    PaymentStatus,
    ValidatedBy,
    ValidatedAt,
    Notes,
    Source,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum RequestStatus {
    #[sea_orm(iden = "request_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "accepted")]
    Accepted,
    #[sea_orm(iden = "rejected")]
    Rejected,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}

#[derive(DeriveIden)]
pub enum PaymentStatus {
    #[sea_orm(iden = "payment_status")]
    Enum,
    #[sea_orm(iden = "unpaid")]
    Unpaid,
    #[sea_orm(iden = "paid")]
    Paid,
    #[sea_orm(iden = "refunded")]
    Refunded,
}

#[derive(DeriveIden)]
pub enum RequestSource {
    #[sea_orm(iden = "request_source")]
    Enum,
    #[sea_orm(iden = "web")]
    Web,
    #[sea_orm(iden = "mobile")]
    Mobile,
    #[sea_orm(iden = "api")]
    Api,
    #[sea_orm(iden = "admin")]
    Admin,
}
