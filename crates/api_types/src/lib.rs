use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub mod receipt {
    use super::*;

    /// Raw receipt upload, as produced by the scanner.
    ///
    /// All top-level fields are optional at the wire level; the server
    /// reports absent required fields (`store`, `total_value`, `items`)
    /// as a validation failure rather than a deserialization error.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RawReceipt {
        pub store: Option<String>,
        pub address: Option<String>,
        /// `DD/MM/YYYY`.
        pub date: Option<String>,
        pub time: Option<String>,
        pub receipt_number: Option<String>,
        pub total_value: Option<f64>,
        pub payment_method: Option<String>,
        #[serde(default)]
        pub items: Vec<RawReceiptItem>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RawReceiptItem {
        pub category: String,
        pub name: String,
        /// Free text, e.g. `"2.5 KG"`. Unparseable values default to
        /// quantity 1, unit `"UN"`.
        pub quantity: String,
        pub price_per_unit: f64,
        pub total_price: f64,
    }

    /// Query string of `GET /api/receipts`. Both bounds are required;
    /// the handler rejects the request when either is absent.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReceiptRange {
        /// ISO date (`YYYY-MM-DD`), inclusive.
        pub start_date: Option<String>,
        /// ISO date (`YYYY-MM-DD`), inclusive.
        pub end_date: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReceiptItemView {
        pub id: Uuid,
        pub name: String,
        pub quantity: f64,
        pub unit: String,
        pub price_per_unit: f64,
        pub total_price: f64,
        pub category: CategoryView,
        pub receipt_id: Uuid,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReceiptView {
        pub id: Uuid,
        pub store: String,
        pub address: Option<String>,
        pub date: NaiveDate,
        pub time: Option<String>,
        pub receipt_number: Option<String>,
        pub total_value: f64,
        pub payment_method: Option<String>,
        pub items: Vec<ReceiptItemView>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Body of a successful `POST /api/receipts`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReceiptUploaded {
        pub success: bool,
        pub data: ReceiptView,
    }

    /// Body of a successful `GET /api/receipts`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReceiptList {
        pub success: bool,
        pub receipts: Vec<ReceiptView>,
        pub stats: super::stats::ReceiptStats,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReceiptStats {
        pub total_spent: f64,
        pub receipt_count: u64,
        /// Keyed by category name.
        pub category_totals: HashMap<String, f64>,
    }
}
