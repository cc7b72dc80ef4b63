use sea_orm_migration::prelude::*;

use crate::m20260210_000001_categories::Categories;
use crate::m20260210_000002_receipts::Receipts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum ReceiptItems {
    Table,
    Id,
    Name,
    Quantity,
    Unit,
    PricePerUnit,
    TotalPrice,
    CategoryId,
    ReceiptId,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReceiptItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReceiptItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReceiptItems::Name).string().not_null())
                    .col(ColumnDef::new(ReceiptItems::Quantity).double().not_null())
                    .col(ColumnDef::new(ReceiptItems::Unit).string().not_null())
                    .col(
                        ColumnDef::new(ReceiptItems::PricePerUnit)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReceiptItems::TotalPrice)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReceiptItems::CategoryId).string().not_null())
                    .col(ColumnDef::new(ReceiptItems::ReceiptId).string().not_null())
                    .col(
                        ColumnDef::new(ReceiptItems::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReceiptItems::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-receipt_items-category_id")
                            .from(ReceiptItems::Table, ReceiptItems::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-receipt_items-receipt_id")
                            .from(ReceiptItems::Table, ReceiptItems::ReceiptId)
                            .to(Receipts::Table, Receipts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-receipt_items-receipt_id")
                    .table(ReceiptItems::Table)
                    .col(ReceiptItems::ReceiptId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-receipt_items-category_id")
                    .table(ReceiptItems::Table)
                    .col(ReceiptItems::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReceiptItems::Table).to_owned())
            .await
    }
}
