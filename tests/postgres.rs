//! Store contract against a live PostgreSQL. Run with
//! `DATABASE_URL=postgres://... cargo test --test postgres -- --ignored`.

use inventory_api::model::{CategoryDraft, ProductDraft, SupplierDraft};
use inventory_api::{ensure_tables, AppError, ConflictKind, InventoryStore, NameCase, PgStore};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use uuid::Uuid;

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

async fn store() -> PgStore {
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url())
        .await
        .expect("connect");
    ensure_tables(&pool, NameCase::Sensitive).await.expect("ensure tables");
    PgStore::new(pool)
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

fn conflict_of(err: AppError) -> (ConflictKind, Option<&'static str>) {
    match err {
        AppError::Conflict { kind, field } => (kind, field),
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn unique_violations_name_their_field() {
    let store = store().await;
    let name = unique("cat");
    store.insert_category(&CategoryDraft { name: name.clone() }).await.unwrap();
    let err = store.insert_category(&CategoryDraft { name }).await.unwrap_err();
    assert_eq!(conflict_of(err), (ConflictKind::Duplicate, Some("name")));

    let email = format!("{}@example.test", Uuid::new_v4());
    let first = SupplierDraft {
        name: unique("sup"),
        email: Some(email.clone()),
        phone: None,
    };
    store.insert_supplier(&first).await.unwrap();
    let second = SupplierDraft {
        name: unique("sup"),
        email: Some(email),
        phone: None,
    };
    let err = store.insert_supplier(&second).await.unwrap_err();
    assert_eq!(conflict_of(err), (ConflictKind::Duplicate, Some("email")));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn foreign_keys_are_enforced() {
    let store = store().await;
    let category = store
        .insert_category(&CategoryDraft { name: unique("cat") })
        .await
        .unwrap();
    let supplier = store
        .insert_supplier(&SupplierDraft {
            name: unique("sup"),
            email: None,
            phone: None,
        })
        .await
        .unwrap();

    let mut draft = ProductDraft {
        name: "Widget".into(),
        category_id: Uuid::new_v4(),
        supplier_id: supplier.id,
        price: 2.5,
        quantity: 10,
        image_url: None,
    };
    let err = store.insert_product(&draft).await.unwrap_err();
    assert_eq!(conflict_of(err), (ConflictKind::UnknownReference, Some("category_id")));

    draft.category_id = category.id;
    let product = store.insert_product(&draft).await.unwrap();
    let detail = store.get_product_detail(product.id).await.unwrap().unwrap();
    assert_eq!(detail.category, category);
    assert_eq!(detail.supplier, supplier);

    let err = store.delete_category(category.id).await.unwrap_err();
    assert_eq!(conflict_of(err), (ConflictKind::InUse, None));

    assert!(store.delete_product(product.id).await.unwrap());
    assert!(!store.delete_product(product.id).await.unwrap());
    assert!(store.delete_category(category.id).await.unwrap());
    assert!(store.delete_supplier(supplier.id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn updates_on_missing_rows_return_none() {
    let store = store().await;
    let missing = Uuid::new_v4();
    let updated = store
        .update_category(missing, &CategoryDraft { name: unique("cat") })
        .await
        .unwrap();
    assert!(updated.is_none());
    assert!(store.get_supplier(missing).await.unwrap().is_none());
    store.ping().await.unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn name_case_rule_switches_unique_indexes() {
    let url = database_url();
    let schema = format!("inventory_case_{}", Uuid::new_v4().simple());
    let admin = PgPoolOptions::new().max_connections(1).connect(&url).await.expect("connect");
    sqlx::query(&format!("CREATE SCHEMA {schema}")).execute(&admin).await.unwrap();

    let options = PgConnectOptions::from_str(&url)
        .unwrap()
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
        .expect("connect to scratch schema");
    let store = PgStore::new(pool.clone());

    ensure_tables(&pool, NameCase::Sensitive).await.unwrap();
    store.insert_category(&CategoryDraft { name: "Electronics".into() }).await.unwrap();
    let acme = SupplierDraft {
        name: "Acme".into(),
        email: None,
        phone: None,
    };
    store.insert_supplier(&acme).await.unwrap();

    ensure_tables(&pool, NameCase::Insensitive).await.unwrap();
    let err = store
        .insert_category(&CategoryDraft { name: "electronics".into() })
        .await
        .unwrap_err();
    assert_eq!(conflict_of(err), (ConflictKind::Duplicate, Some("name")));
    let shouting = SupplierDraft {
        name: "ACME".into(),
        ..acme
    };
    let err = store.insert_supplier(&shouting).await.unwrap_err();
    assert_eq!(conflict_of(err), (ConflictKind::Duplicate, Some("name")));

    ensure_tables(&pool, NameCase::Sensitive).await.unwrap();
    store.insert_category(&CategoryDraft { name: "electronics".into() }).await.unwrap();
    let err = store
        .insert_category(&CategoryDraft { name: "Electronics".into() })
        .await
        .unwrap_err();
    assert_eq!(conflict_of(err), (ConflictKind::Duplicate, Some("name")));

    pool.close().await;
    sqlx::query(&format!("DROP SCHEMA {schema} CASCADE")).execute(&admin).await.unwrap();
}
