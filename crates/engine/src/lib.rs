use std::collections::HashMap;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveValue, DatabaseConnection, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

pub use categories::Category;
pub use error::EngineError;
pub use receipt_items::ReceiptItem;
pub use receipts::{ItemSubmission, Receipt, ReceiptSubmission};
pub use stats::ReceiptStats;

mod categories;
mod error;
pub mod parse;
mod receipt_items;
mod receipts;
pub mod stats;

type ResultEngine<T> = Result<T, EngineError>;

/// Upper bound for the ingestion transaction. When it elapses the
/// transaction is dropped and rolled back; nothing is persisted.
const TRANSACTION_TIMEOUT: Duration = Duration::from_secs(10);

/// The receipt store.
///
/// Holds the database connection and exposes the two operations of the
/// system: ingesting a raw receipt and fetching receipts for a date range.
/// Handlers share it behind an `Arc`; it keeps no per-request state.
#[derive(Clone, Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// Validates, normalizes and persists a raw receipt upload.
    ///
    /// Required fields are `store`, `total_value` and a non-empty `items`
    /// list; anything else is accepted as-is. The receipt row, its item
    /// rows and any newly created categories are written in one
    /// transaction bounded by a 10 second timeout, so a failure on any
    /// step leaves no partial state behind. Returns the persisted receipt
    /// fully hydrated with items and categories.
    pub async fn ingest_receipt(&self, submission: ReceiptSubmission) -> ResultEngine<Receipt> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Err(EngineError::Validation(missing.join(", ")));
        }

        let date = match submission.date.as_deref() {
            Some(raw) => parse::parse_receipt_date(raw)?,
            None => return Err(EngineError::Parse("missing date".to_string())),
        };

        match tokio::time::timeout(TRANSACTION_TIMEOUT, self.persist_receipt(submission, date))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(EngineError::Timeout(TRANSACTION_TIMEOUT.as_secs())),
        }
    }

    async fn persist_receipt(
        &self,
        submission: ReceiptSubmission,
        date: NaiveDate,
    ) -> ResultEngine<Receipt> {
        let db_tx = self.database.begin().await?;
        let now = Utc::now();

        // Resolve every item's category before the receipt write. The
        // resolutions are independent of each other; repeated names within
        // one receipt land on the same row via the name upsert.
        let mut resolved = Vec::with_capacity(submission.items.len());
        for item in &submission.items {
            resolved.push(categories::resolve(&db_tx, &item.category, now).await?);
        }

        let receipt_id = Uuid::new_v4();
        // Checked by the caller; defaults are unreachable.
        let store = submission.store.unwrap_or_default();
        let total_value = submission.total_value.unwrap_or_default();

        receipts::ActiveModel {
            id: ActiveValue::Set(receipt_id.to_string()),
            store: ActiveValue::Set(store.clone()),
            address: ActiveValue::Set(submission.address.clone()),
            date: ActiveValue::Set(date),
            time: ActiveValue::Set(submission.time.clone()),
            receipt_number: ActiveValue::Set(submission.receipt_number.clone()),
            total_value: ActiveValue::Set(total_value),
            payment_method: ActiveValue::Set(submission.payment_method.clone()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&db_tx)
        .await?;

        let mut items = Vec::with_capacity(submission.items.len());
        for (item, category) in submission.items.iter().zip(resolved) {
            let (quantity, unit) = parse::parse_quantity(&item.quantity);
            let item_id = Uuid::new_v4();

            receipt_items::ActiveModel {
                id: ActiveValue::Set(item_id.to_string()),
                name: ActiveValue::Set(item.name.clone()),
                quantity: ActiveValue::Set(quantity),
                unit: ActiveValue::Set(unit.clone()),
                price_per_unit: ActiveValue::Set(item.price_per_unit),
                total_price: ActiveValue::Set(item.total_price),
                category_id: ActiveValue::Set(category.id.to_string()),
                receipt_id: ActiveValue::Set(receipt_id.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            items.push(ReceiptItem {
                id: item_id,
                name: item.name.clone(),
                quantity,
                unit,
                price_per_unit: item.price_per_unit,
                total_price: item.total_price,
                category,
                receipt_id,
                created_at: now,
                updated_at: now,
            });
        }

        db_tx.commit().await?;

        Ok(Receipt {
            id: receipt_id,
            store,
            address: submission.address,
            date,
            time: submission.time,
            receipt_number: submission.receipt_number,
            total_value,
            payment_method: submission.payment_method,
            items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetches all receipts with `start <= date <= end`, newest first,
    /// with items and categories attached. No pagination.
    pub async fn receipts_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResultEngine<Vec<Receipt>> {
        let rows = receipts::Entity::find()
            .filter(receipts::Column::Date.gte(start))
            .filter(receipts::Column::Date.lte(end))
            .order_by_desc(receipts::Column::Date)
            .find_with_related(receipt_items::Entity)
            .all(&self.database)
            .await?;

        let categories_by_id = self.load_categories(&rows).await?;

        let mut out = Vec::with_capacity(rows.len());
        for (receipt_model, item_models) in rows {
            let mut items = Vec::with_capacity(item_models.len());
            for item_model in item_models {
                let category = categories_by_id
                    .get(&item_model.category_id)
                    .cloned()
                    .ok_or_else(|| EngineError::KeyNotFound(item_model.category_id.clone()))?;
                items.push(ReceiptItem::from_model(item_model, category)?);
            }
            out.push(Receipt::from_model(receipt_model, items)?);
        }

        Ok(out)
    }

    async fn load_categories(
        &self,
        rows: &[(receipts::Model, Vec<receipt_items::Model>)],
    ) -> ResultEngine<HashMap<String, Category>> {
        let mut category_ids: Vec<String> = rows
            .iter()
            .flat_map(|(_, items)| items.iter().map(|item| item.category_id.clone()))
            .collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let mut by_id = HashMap::with_capacity(category_ids.len());
        if category_ids.is_empty() {
            return Ok(by_id);
        }

        for model in categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(&self.database)
            .await?
        {
            let id = model.id.clone();
            by_id.insert(id, Category::try_from(model)?);
        }

        Ok(by_id)
    }
}
