use sea_orm_migration::{prelude::*, schema::*};

use super::m20250210_000001_create_cities::City;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Center::Table)
                    .if_not_exists()
                    .col(pk_auto(Center::Id))
                    .col(integer(Center::CityId).not_null())
                    .col(string_len(Center::Name, 100).not_null())
                    .col(string_len(Center::Address, 255).not_null())
                    .col(string_len_null(Center::Phone, 20))
                    .col(boolean(Center::IsActive).not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_center_city")
                            .from(Center::Table, Center::CityId)
                            .to(City::Table, City::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed one depot per major city (city ids follow the seeding order)
        let insert = Query::insert()
            .into_table(Center::Table)
            .columns([Center::CityId, Center::Name, Center::Address, Center::Phone])
            .values_panic([1.into(), "Casablanca Hub".into(), "12 Bd Zerktouni, Casablanca".into(), "+212522000001".into()])
            .values_panic([2.into(), "Rabat Agdal".into(), "4 Av. de France, Rabat".into(), "+212537000002".into()])
            .values_panic([3.into(), "Fès Ville Nouvelle".into(), "7 Av. Hassan II, Fès".into(), "+212535000003".into()])
            .values_panic([4.into(), "Marrakech Guéliz".into(), "21 Av. Mohammed V, Marrakech".into(), "+212524000004".into()])
            .values_panic([5.into(), "Tangier Port".into(), "3 Rue de la Plage, Tangier".into(), "+212539000005".into()])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Center::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Center {
    Table,
    Id,
    CityId,
    Name,
    Address,
    Phone,
    IsActive,
}
