use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, ItemSubmission, ReceiptSubmission};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::new(db.clone());
    (engine, db)
}

async fn count_rows(db: &DatabaseConnection, table: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS count FROM {table};"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "count").unwrap()
}

fn item(category: &str, name: &str, quantity: &str, total_price: f64) -> ItemSubmission {
    ItemSubmission {
        category: category.to_string(),
        name: name.to_string(),
        quantity: quantity.to_string(),
        price_per_unit: total_price,
        total_price,
    }
}

fn grocery_submission() -> ReceiptSubmission {
    ReceiptSubmission {
        store: Some("Mercado Central".to_string()),
        address: Some("Rua A, 123".to_string()),
        date: Some("25/12/2023".to_string()),
        time: Some("18:42".to_string()),
        receipt_number: Some("000123".to_string()),
        total_value: Some(35.5),
        payment_method: Some("card".to_string()),
        items: vec![
            item("Food", "Rice", "2 UN", 10.0),
            item("Food", "Apples", "1.5 KG", 7.5),
            item("Cleaning", "Soap", "3", 18.0),
        ],
    }
}

#[tokio::test]
async fn ingest_creates_one_receipt_and_n_items() {
    let (engine, db) = engine_with_db().await;

    let receipt = engine.ingest_receipt(grocery_submission()).await.unwrap();

    assert_eq!(receipt.store, "Mercado Central");
    assert_eq!(receipt.total_value, 35.5);
    assert_eq!(receipt.date.to_string(), "2023-12-25");
    assert_eq!(receipt.items.len(), 3);

    assert_eq!(count_rows(&db, "receipts").await, 1);
    assert_eq!(count_rows(&db, "receipt_items").await, 3);
    // Two distinct category names among three items.
    assert_eq!(count_rows(&db, "categories").await, 2);
}

#[tokio::test]
async fn returned_receipt_is_fully_hydrated() {
    let (engine, _db) = engine_with_db().await;

    let receipt = engine.ingest_receipt(grocery_submission()).await.unwrap();

    let apples = &receipt.items[1];
    assert_eq!(apples.name, "Apples");
    assert_eq!(apples.quantity, 1.5);
    assert_eq!(apples.unit, "KG");
    assert_eq!(apples.category.name, "Food");
    assert_eq!(apples.receipt_id, receipt.id);

    // "3" has no unit token: silent default, not an error.
    let soap = &receipt.items[2];
    assert_eq!(soap.quantity, 1.0);
    assert_eq!(soap.unit, "UN");
}

#[tokio::test]
async fn repeated_category_names_share_one_row() {
    let (engine, db) = engine_with_db().await;

    let receipt = engine.ingest_receipt(grocery_submission()).await.unwrap();
    assert_eq!(receipt.items[0].category.id, receipt.items[1].category.id);
    assert_ne!(receipt.items[0].category.id, receipt.items[2].category.id);

    // A second upload reuses the existing rows instead of creating new ones.
    let mut second = grocery_submission();
    second.items.push(item("Bakery", "Bread", "1 UN", 2.0));
    let second = engine.ingest_receipt(second).await.unwrap();

    assert_eq!(second.items[0].category.id, receipt.items[0].category.id);
    assert_eq!(count_rows(&db, "categories").await, 3);
}

#[tokio::test]
async fn missing_fields_rejected_and_nothing_persisted() {
    let (engine, db) = engine_with_db().await;

    let submission = ReceiptSubmission {
        store: Some("X".to_string()),
        ..Default::default()
    };
    let err = engine.ingest_receipt(submission).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("total_value, items".to_string())
    );

    assert_eq!(count_rows(&db, "receipts").await, 0);
    assert_eq!(count_rows(&db, "receipt_items").await, 0);
    assert_eq!(count_rows(&db, "categories").await, 0);
}

#[tokio::test]
async fn invalid_date_rejected_before_any_write() {
    let (engine, db) = engine_with_db().await;

    let mut submission = grocery_submission();
    submission.date = Some("32/13/2023".to_string());
    let err = engine.ingest_receipt(submission).await.unwrap_err();
    assert!(matches!(err, EngineError::Parse(_)));

    let mut submission = grocery_submission();
    submission.date = None;
    let err = engine.ingest_receipt(submission).await.unwrap_err();
    assert!(matches!(err, EngineError::Parse(_)));

    assert_eq!(count_rows(&db, "receipts").await, 0);
    assert_eq!(count_rows(&db, "categories").await, 0);
}

#[tokio::test]
async fn mid_transaction_failure_rolls_back_everything() {
    let (engine, db) = engine_with_db().await;
    let backend = db.get_database_backend();

    // Make the item insert fail after categories and the receipt row have
    // already been written inside the transaction.
    db.execute(Statement::from_string(
        backend,
        "DROP TABLE receipt_items;".to_string(),
    ))
    .await
    .unwrap();

    let err = engine.ingest_receipt(grocery_submission()).await.unwrap_err();
    assert!(matches!(err, EngineError::Database(_)));

    // No receipt and no newly resolved categories survive the rollback.
    assert_eq!(count_rows(&db, "receipts").await, 0);
    assert_eq!(count_rows(&db, "categories").await, 0);
}
