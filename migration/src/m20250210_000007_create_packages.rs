use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250210_000001_create_cities::City;
use super::m20250210_000006_create_requests::Request;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(PackageStatus::Enum)
                    .values([
                        PackageStatus::Pending,
                        PackageStatus::InProgress,
                        PackageStatus::Delivered,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(ContentType::Enum)
                    .values([
                        ContentType::Documents,
                        ContentType::Electronics,
                        ContentType::Clothing,
                        ContentType::Food,
                        ContentType::Fragile,
                        ContentType::Other,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(PaymentMethod::Enum)
                    .values([
                        PaymentMethod::Cash,
                        PaymentMethod::Card,
                        PaymentMethod::Online,
                        PaymentMethod::Cod,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Package::Table)
                    .if_not_exists()
                    .col(uuid(Package::Id).primary_key())
                    .col(uuid(Package::RequestId).not_null().unique_key())
                    .col(string_len(Package::Code, 20).not_null().unique_key())
                    .col(double(Package::Weight).not_null())
                    .col(double_null(Package::Length))
                    .col(double_null(Package::Width))
                    .col(double_null(Package::Height))
                    .col(
                        ColumnDef::new(Package::ContentType)
                            .custom(ContentType::Enum)
                            .not_null(),
                    )
                    .col(string_len_null(Package::Description, 1000))
                    .col(double_null(Package::DeclaredValue))
                    .col(string_len(Package::RecipientName, 255).not_null())
                    .col(string_len(Package::RecipientPhone, 20).not_null())
                    .col(string_len(Package::RecipientAddress, 500).not_null())
                    .col(integer(Package::RecipientCityId).not_null())
                    .col(double_null(Package::RecipientLatitude))
                    .col(double_null(Package::RecipientLongitude))
                    .col(double(Package::Distance).not_null())
                    .col(
                        ColumnDef::new(Package::PaymentMethod)
                            .custom(PaymentMethod::Enum)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Package::Status)
                            .custom(PackageStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Package::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Package::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_package_request")
                            .from(Package::Table, Package::RequestId)
                            .to(Request::Table, Request::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_package_recipient_city")
                            .from(Package::Table, Package::RecipientCityId)
                            .to(City::Table, City::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Package::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PaymentMethod::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ContentType::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PackageStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Package {
    Table,
    Id,
    RequestId,
    Code,
    Weight,
    Length,
    Width,
    Height,
    ContentType,
    Description,
    DeclaredValue,
    RecipientName,
    RecipientPhone,
    RecipientAddress,
    RecipientCityId,
    RecipientLatitude,
    RecipientLongitude,
    Distance,
    PaymentMethod,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum PackageStatus {
    #[sea_orm(iden = "package_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "in_progress")]
    InProgress,
    #[sea_orm(iden = "delivered")]
    Delivered,
}

#[derive(DeriveIden)]
pub enum ContentType {
    #[sea_orm(iden = "content_type")]
    Enum,
    #[sea_orm(iden = "documents")]
    Documents,
    #[sea_orm(iden = "electronics")]
    Electronics,
    #[sea_orm(iden = "clothing")]
    Clothing,
    #[sea_orm(iden = "food")]
    Food,
    #[sea_orm(iden = "fragile")]
    Fragile,
    #[sea_orm(iden = "other")]
    Other,
}

#[derive(DeriveIden)]
pub enum PaymentMethod {
    #[sea_orm(iden = "payment_method")]
    Enum,
    #[sea_orm(iden = "cash")]
    Cash,
    #[sea_orm(iden = "card")]
    Card,
    #[sea_orm(iden = "online")]
    Online,
    #[sea_orm(iden = "cod")]
    Cod,
}
