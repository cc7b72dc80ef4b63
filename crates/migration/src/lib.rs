pub use sea_orm_migration::prelude::*;

mod m20260210_000001_categories;
mod m20260210_000002_receipts;
mod m20260210_000003_receipt_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260210_000001_categories::Migration),
            Box::new(m20260210_000002_receipts::Migration),
            Box::new(m20260210_000003_receipt_items::Migration),
        ]
    }
}
