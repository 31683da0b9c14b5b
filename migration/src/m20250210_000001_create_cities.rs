use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(City::Table)
                    .if_not_exists()
                    .col(pk_auto(City::Id))
                    .col(string_len(City::Name, 50).not_null().unique_key())
                    .col(double(City::Latitude).not_null())
                    .col(double(City::Longitude).not_null())
                    .col(boolean(City::IsActive).not_null().default(true))
                    .to_owned(),
            )
            .await?;

        // Seed cities with their reference coordinates
        let insert = Query::insert()
            .into_table(City::Table)
            .columns([City::Name, City::Latitude, City::Longitude])
            .values_panic(["Casablanca".into(), (33.5731).into(), (-7.5898).into()])
            .values_panic(["Rabat".into(), (34.0209).into(), (-6.8416).into()])
            .values_panic(["Fès".into(), (34.0181).into(), (-5.0078).into()])
            .values_panic(["Marrakech".into(), (31.6295).into(), (-7.9811).into()])
            .values_panic(["Tangier".into(), (35.7595).into(), (-5.8340).into()])
            .values_panic(["Agadir".into(), (30.4278).into(), (-9.5981).into()])
            .values_panic(["Meknès".into(), (33.8935).into(), (-5.5473).into()])
            .values_panic(["Oujda".into(), (34.6814).into(), (-1.9086).into()])
            .values_panic(["Kenitra".into(), (34.2610).into(), (-6.5802).into()])
            .values_panic(["Mohammedia".into(), (33.6866).into(), (-7.3830).into()])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(City::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum City {
    Table,
    Id,
    Name,
    Latitude,
    Longitude,
    IsActive,
}
