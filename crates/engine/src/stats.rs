//! Spending statistics over a fetched set of receipts.

use std::collections::HashMap;

use crate::Receipt;

/// Summary numbers for the dashboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReceiptStats {
    pub total_spent: f64,
    pub receipt_count: u64,
    /// Sum of item `total_price` keyed by category *name*. Names are
    /// unique system-wide, so this is equivalent to grouping by id.
    pub category_totals: HashMap<String, f64>,
}

/// Computes totals, receipt count and per-category sums.
///
/// `total_spent` sums the receipts' own `total_value` fields, while
/// `category_totals` sums the item prices; the two are independent and
/// may legitimately diverge (unitemized discounts or taxes).
pub fn compute(receipts: &[Receipt]) -> ReceiptStats {
    let mut stats = ReceiptStats {
        receipt_count: receipts.len() as u64,
        ..Default::default()
    };

    for receipt in receipts {
        stats.total_spent += receipt.total_value;
        for item in &receipt.items {
            *stats
                .category_totals
                .entry(item.category.name.clone())
                .or_insert(0.0) += item.total_price;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::{Category, ReceiptItem};

    fn category(name: &str) -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn receipt(total_value: f64, items: Vec<(&str, f64)>) -> Receipt {
        let now = Utc::now();
        let receipt_id = Uuid::new_v4();
        let items = items
            .into_iter()
            .map(|(category_name, total_price)| ReceiptItem {
                id: Uuid::new_v4(),
                name: "item".to_string(),
                quantity: 1.0,
                unit: "UN".to_string(),
                price_per_unit: total_price,
                total_price,
                category: category(category_name),
                receipt_id,
                created_at: now,
                updated_at: now,
            })
            .collect();

        Receipt {
            id: receipt_id,
            store: "Store".to_string(),
            address: None,
            date: NaiveDate::from_ymd_opt(2023, 12, 25).unwrap(),
            time: None,
            receipt_number: None,
            total_value,
            payment_method: None,
            items,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let stats = compute(&[]);
        assert_eq!(stats.total_spent, 0.0);
        assert_eq!(stats.receipt_count, 0);
        assert!(stats.category_totals.is_empty());
    }

    #[test]
    fn totals_and_count() {
        let receipts = vec![receipt(10.0, vec![]), receipt(25.5, vec![])];
        let stats = compute(&receipts);
        assert_eq!(stats.total_spent, 35.5);
        assert_eq!(stats.receipt_count, 2);
    }

    #[test]
    fn category_totals_accumulate_across_receipts() {
        let receipts = vec![
            receipt(10.0, vec![("Food", 5.0), ("Cleaning", 2.0)]),
            receipt(25.5, vec![("Food", 3.0)]),
        ];
        let stats = compute(&receipts);
        assert_eq!(stats.category_totals["Food"], 8.0);
        assert_eq!(stats.category_totals["Cleaning"], 2.0);
    }

    #[test]
    fn receipt_total_is_not_recomputed_from_items() {
        // 100.0 total against a single 5.0 item: both are reported as-is.
        let stats = compute(&[receipt(100.0, vec![("Food", 5.0)])]);
        assert_eq!(stats.total_spent, 100.0);
        assert_eq!(stats.category_totals["Food"], 5.0);
    }
}
