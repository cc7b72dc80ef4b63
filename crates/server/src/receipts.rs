//! Receipts API endpoints.

use api_types::receipt::{
    CategoryView, RawReceipt, ReceiptItemView, ReceiptList, ReceiptRange, ReceiptUploaded,
    ReceiptView,
};
use api_types::stats::ReceiptStats;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;

use crate::{ServerError, server::ServerState};
use engine::{EngineError, ItemSubmission, ReceiptSubmission, stats};

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

fn map_item(item: engine::ReceiptItem) -> ReceiptItemView {
    ReceiptItemView {
        id: item.id,
        name: item.name,
        quantity: item.quantity,
        unit: item.unit,
        price_per_unit: item.price_per_unit,
        total_price: item.total_price,
        category: map_category(item.category),
        receipt_id: item.receipt_id,
        created_at: item.created_at,
        updated_at: item.updated_at,
    }
}

fn map_receipt(receipt: engine::Receipt) -> ReceiptView {
    ReceiptView {
        id: receipt.id,
        store: receipt.store,
        address: receipt.address,
        date: receipt.date,
        time: receipt.time,
        receipt_number: receipt.receipt_number,
        total_value: receipt.total_value,
        payment_method: receipt.payment_method,
        items: receipt.items.into_iter().map(map_item).collect(),
        created_at: receipt.created_at,
        updated_at: receipt.updated_at,
    }
}

fn map_stats(stats: stats::ReceiptStats) -> ReceiptStats {
    ReceiptStats {
        total_spent: stats.total_spent,
        receipt_count: stats.receipt_count,
        category_totals: stats.category_totals,
    }
}

fn map_submission(raw: RawReceipt) -> ReceiptSubmission {
    ReceiptSubmission {
        store: raw.store,
        address: raw.address,
        date: raw.date,
        time: raw.time,
        receipt_number: raw.receipt_number,
        total_value: raw.total_value,
        payment_method: raw.payment_method,
        items: raw
            .items
            .into_iter()
            .map(|item| ItemSubmission {
                category: item.category,
                name: item.name,
                quantity: item.quantity,
                price_per_unit: item.price_per_unit,
                total_price: item.total_price,
            })
            .collect(),
    }
}

/// `POST /api/receipts`: ingest one raw receipt upload.
pub async fn upload(
    State(state): State<ServerState>,
    Json(payload): Json<RawReceipt>,
) -> Result<Json<ReceiptUploaded>, ServerError> {
    let receipt = state.engine.ingest_receipt(map_submission(payload)).await?;

    Ok(Json(ReceiptUploaded {
        success: true,
        data: map_receipt(receipt),
    }))
}

fn parse_iso_date(raw: &str) -> Result<NaiveDate, ServerError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ServerError::Engine(EngineError::Parse(format!("invalid date \"{raw}\""))))
}

/// `GET /api/receipts?startDate=..&endDate=..`: receipts in range plus
/// the computed spending statistics.
pub async fn list(
    State(state): State<ServerState>,
    Query(range): Query<ReceiptRange>,
) -> Result<Json<ReceiptList>, ServerError> {
    let (Some(start), Some(end)) = (range.start_date, range.end_date) else {
        return Err(ServerError::Generic(
            "Missing date range parameters".to_string(),
        ));
    };

    let start = parse_iso_date(&start)?;
    let end = parse_iso_date(&end)?;

    let receipts = state.engine.receipts_between(start, end).await?;
    let stats = stats::compute(&receipts);

    Ok(Json(ReceiptList {
        success: true,
        receipts: receipts.into_iter().map(map_receipt).collect(),
        stats: map_stats(stats),
    }))
}
