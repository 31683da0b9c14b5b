use sea_orm_migration::{prelude::*, schema::*};

use super::m20250210_000001_create_cities::City;
use super::m20250210_000003_create_delivery_types::DeliveryType;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tariff::Table)
                    .if_not_exists()
                    .col(pk_auto(Tariff::Id))
                    .col(integer(Tariff::CityId).not_null())
                    .col(integer(Tariff::DeliveryTypeId).not_null())
                    .col(double(Tariff::BasePrice).not_null())
                    .col(double(Tariff::PricePerKm).not_null())
                    .col(double(Tariff::PricePerKg).not_null())
                    .col(boolean(Tariff::IsActive).not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tariff_city")
                            .from(Tariff::Table, Tariff::CityId)
                            .to(City::Table, City::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tariff_delivery_type")
                            .from(Tariff::Table, Tariff::DeliveryTypeId)
                            .to(DeliveryType::Table, DeliveryType::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tariff_city_type")
                    .table(Tariff::Table)
                    .col(Tariff::CityId)
                    .col(Tariff::DeliveryTypeId)
                    .to_owned(),
            )
            .await?;

        // Rate card per (city, delivery type): base price, price/km, price/kg.
        // City ids and delivery type ids follow the seeding order of the
        // earlier migrations (Standard = 1, Express = 2).
        let rows: [(i32, f64, f64, f64, f64, f64, f64); 10] = [
            // (city, std base, std /km, std /kg, exp base, exp /km, exp /kg)
            (1, 15.0, 2.0, 3.0, 25.0, 3.5, 5.0),  // Casablanca
            (2, 20.0, 2.5, 4.0, 30.0, 4.0, 6.0),  // Rabat
            (3, 25.0, 3.0, 5.0, 40.0, 5.0, 8.0),  // Fès
            (4, 25.0, 3.0, 5.0, 40.0, 5.0, 8.0),  // Marrakech
            (5, 30.0, 3.5, 6.0, 45.0, 5.5, 9.0),  // Tangier
            (6, 30.0, 3.5, 6.0, 45.0, 5.5, 9.0),  // Agadir
            (7, 20.0, 2.5, 4.0, 30.0, 4.0, 6.0),  // Meknès
            (8, 35.0, 4.0, 7.0, 50.0, 6.0, 10.0), // Oujda
            (9, 20.0, 2.5, 4.0, 30.0, 4.0, 6.0),  // Kenitra
            (10, 10.0, 1.5, 2.0, 15.0, 2.5, 3.0), // Mohammedia
        ];

        let mut insert = Query::insert()
            .into_table(Tariff::Table)
            .columns([
                Tariff::CityId,
                Tariff::DeliveryTypeId,
                Tariff::BasePrice,
                Tariff::PricePerKm,
                Tariff::PricePerKg,
            ])
            .to_owned();

        for (city, sb, skm, skg, eb, ekm, ekg) in rows {
            insert.values_panic([city.into(), 1.into(), sb.into(), skm.into(), skg.into()]);
            insert.values_panic([city.into(), 2.into(), eb.into(), ekm.into(), ekg.into()]);
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tariff::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tariff {
    Table,
    Id,
    CityId,
    DeliveryTypeId,
    BasePrice,
    PricePerKm,
    PricePerKg,
    IsActive,
}
