use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeliveryType::Table)
                    .if_not_exists()
                    .col(pk_auto(DeliveryType::Id))
                    .col(string_len(DeliveryType::Name, 50).not_null().unique_key())
                    .col(string_len_null(DeliveryType::Description, 255))
                    .col(boolean(DeliveryType::IsActive).not_null().default(true))
                    .to_owned(),
            )
            .await?;

        let insert = Query::insert()
            .into_table(DeliveryType::Table)
            .columns([DeliveryType::Name, DeliveryType::Description])
            .values_panic(["Standard".into(), "Delivery within 2-4 business days".into()])
            .values_panic(["Express".into(), "Next business day delivery".into()])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeliveryType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DeliveryType {
    Table,
    Id,
    Name,
    Description,
    IsActive,
}
