//! Receipt primitives.
//!
//! A `Receipt` is one purchase event with its line items attached. Items
//! are owned by the receipt and only ever created together with it.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::{EngineError, ReceiptItem};

/// A persisted purchase event, fully hydrated with items and categories.
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    pub id: Uuid,
    pub store: String,
    pub address: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub receipt_number: Option<String>,
    /// Taken verbatim from input; never reconciled with the item totals.
    pub total_value: f64,
    pub payment_method: Option<String>,
    pub items: Vec<ReceiptItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Receipt {
    pub(crate) fn from_model(model: Model, items: Vec<ReceiptItem>) -> Result<Self, EngineError> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("receipt not exists".to_string()))?,
            store: model.store,
            address: model.address,
            date: model.date,
            time: model.time,
            receipt_number: model.receipt_number,
            total_value: model.total_value,
            payment_method: model.payment_method,
            items,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// A raw receipt upload, before validation.
///
/// Top-level fields are optional on purpose: presence is checked by
/// [`missing_fields`](ReceiptSubmission::missing_fields) so that an
/// incomplete upload is reported as a validation failure instead of a
/// deserialization error. Anything beyond presence is accepted as-is.
#[derive(Clone, Debug, Default)]
pub struct ReceiptSubmission {
    pub store: Option<String>,
    pub address: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub receipt_number: Option<String>,
    pub total_value: Option<f64>,
    pub payment_method: Option<String>,
    pub items: Vec<ItemSubmission>,
}

/// One raw line item within a submission.
#[derive(Clone, Debug)]
pub struct ItemSubmission {
    pub category: String,
    pub name: String,
    /// Free text, e.g. `"2.5 KG"`; parsed leniently during ingestion.
    pub quantity: String,
    pub price_per_unit: f64,
    pub total_price: f64,
}

impl ReceiptSubmission {
    /// Names of the required top-level fields that are absent.
    ///
    /// An empty store string and an empty item list both count as missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.store.as_deref().is_none_or(|s| s.trim().is_empty()) {
            missing.push("store");
        }
        if self.total_value.is_none() {
            missing.push("total_value");
        }
        if self.items.is_empty() {
            missing.push("items");
        }
        missing
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "receipts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub store: String,
    pub address: Option<String>,
    pub date: Date,
    pub time: Option<String>,
    pub receipt_number: Option<String>,
    pub total_value: f64,
    pub payment_method: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::receipt_items::Entity")]
    ReceiptItems,
}

impl Related<super::receipt_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceiptItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ReceiptSubmission {
        ReceiptSubmission {
            store: Some("Mercado Central".to_string()),
            total_value: Some(42.0),
            items: vec![ItemSubmission {
                category: "Food".to_string(),
                name: "Rice".to_string(),
                quantity: "1 UN".to_string(),
                price_per_unit: 42.0,
                total_price: 42.0,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn complete_submission_has_no_missing_fields() {
        assert!(submission().missing_fields().is_empty());
    }

    #[test]
    fn absent_fields_are_reported() {
        let missing = ReceiptSubmission::default().missing_fields();
        assert_eq!(missing, vec!["store", "total_value", "items"]);
    }

    #[test]
    fn blank_store_counts_as_missing() {
        let mut sub = submission();
        sub.store = Some("  ".to_string());
        assert_eq!(sub.missing_fields(), vec!["store"]);
    }

    #[test]
    fn empty_items_count_as_missing() {
        let mut sub = submission();
        sub.items.clear();
        assert_eq!(sub.missing_fields(), vec!["items"]);
    }

    #[test]
    fn zero_total_is_accepted() {
        let mut sub = submission();
        sub.total_value = Some(0.0);
        assert!(sub.missing_fields().is_empty());
    }
}
