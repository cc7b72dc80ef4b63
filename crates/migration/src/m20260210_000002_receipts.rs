use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum Receipts {
    Table,
    Id,
    Store,
    Address,
    Date,
    Time,
    ReceiptNumber,
    TotalValue,
    PaymentMethod,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Receipts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Receipts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Receipts::Store).string().not_null())
                    .col(ColumnDef::new(Receipts::Address).string())
                    .col(ColumnDef::new(Receipts::Date).date().not_null())
                    .col(ColumnDef::new(Receipts::Time).string())
                    .col(ColumnDef::new(Receipts::ReceiptNumber).string())
                    .col(ColumnDef::new(Receipts::TotalValue).double().not_null())
                    .col(ColumnDef::new(Receipts::PaymentMethod).string())
                    .col(ColumnDef::new(Receipts::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Receipts::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Dashboard queries filter and sort on the purchase date.
        manager
            .create_index(
                Index::create()
                    .name("idx-receipts-date")
                    .table(Receipts::Table)
                    .col(Receipts::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Receipts::Table).to_owned())
            .await
    }
}
