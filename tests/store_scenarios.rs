use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use stockbot::chatbot::Chatbot;
use stockbot::error::{Result, StockbotError};
use stockbot::store::{
    FileInventoryStore, InventoryEditor, InventoryStore, NewSale, ProductRecord, SupplierRecord,
    TopSeller,
};

fn seed(store: &dyn InventoryEditor) -> Result<()> {
    store.add_supplier(SupplierRecord {
        contact_email: Some("sales@brightco.example".to_string()),
        ..SupplierRecord::new("SUP01", "BrightCo")
    })?;
    store.add_product(
        ProductRecord::new("PROD001", "Desk Lamp", "Lighting", 2, 5)
            .with_price(29.99)
            .with_supplier("SUP01"),
    )?;
    store.add_product(
        ProductRecord::new("PROD002", "Office Chair", "Furniture", 15, 5).with_price(149.0),
    )?;
    store.add_product(ProductRecord::new("PROD003", "Stapler", "Office", 1, 4).with_price(7.5))?;
    Ok(())
}

fn open_seeded(dir: &TempDir) -> Result<FileInventoryStore> {
    let store = FileInventoryStore::open(dir.path().join("inventory.json"))?;
    seed(&store)?;
    Ok(store)
}

fn open_catalog_text(dir: &TempDir, json: &str) -> Result<FileInventoryStore> {
    let path = dir.path().join("inventory.json");
    std::fs::write(&path, json)?;
    FileInventoryStore::open(path)
}

#[test]
fn catalog_breaking_store_rules_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let cases = [
        (
            r#"{"products": [
                {"id": "P1", "name": "Desk Lamp", "category": "Lighting", "stock": 2, "reorder_threshold": 5},
                {"id": "P1", "name": "Stapler", "category": "Office", "stock": 9, "reorder_threshold": 2}
            ]}"#,
            "Store error: product id already exists: P1",
        ),
        (
            r#"{"products": [
                {"id": "P1", "name": "Desk Lamp", "category": "Lighting", "stock": 2, "reorder_threshold": 5},
                {"id": "P2", "name": "desk lamp", "category": "Lighting", "stock": 1, "reorder_threshold": 1}
            ]}"#,
            "Store error: product name already exists: desk lamp",
        ),
        (
            r#"{"products": [
                {"id": "P1", "name": "Desk Lamp", "category": "Lighting", "stock": 2, "reorder_threshold": 5, "unit_price": -3.0}
            ]}"#,
            "Store error: invalid price: price must be a non-negative number, got -3",
        ),
        (
            r#"{"products": [
                {"id": "P1", "name": "Desk Lamp", "category": "Lighting", "stock": 2, "reorder_threshold": 5, "supplier_id": "SUP09"}
            ]}"#,
            "Store error: supplier not found: SUP09",
        ),
        (
            r#"{"suppliers": [{"id": "SUP01", "name": "BrightCo"}, {"id": "SUP01", "name": "Other"}]}"#,
            "Store error: supplier id already exists: SUP01",
        ),
    ];

    for (json, expected) in cases {
        let err = open_catalog_text(&dir, json).unwrap_err();
        assert!(matches!(err, StockbotError::Store(_)), "{json}");
        assert_eq!(err.to_string(), expected);
    }

    let store = open_catalog_text(
        &dir,
        r#"{"products": [
            {"id": "P1", "name": "Desk Lamp", "category": "Lighting", "stock": 2, "reorder_threshold": 5, "unit_price": 3.0}
        ]}"#,
    )?;
    assert_eq!(store.list_product_names()?, vec!["Desk Lamp"]);
    Ok(())
}

#[test]
fn demo_catalog_opens_and_answers() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/inventory.json");
    let store = Arc::new(FileInventoryStore::open(path)?);

    assert_eq!(
        store.list_product_names()?,
        vec!["Desk Lamp", "Office Chair", "Stapler", "Printer Paper"]
    );
    let reorder: Vec<(String, u32)> = store
        .reorder_list()?
        .into_iter()
        .map(|item| (item.product_id, item.restock_quantity))
        .collect();
    assert_eq!(
        reorder,
        vec![("PROD001".to_string(), 8), ("PROD004".to_string(), 32)]
    );

    let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(
        store.top_sellers(5, since)?,
        vec![
            TopSeller { name: "Printer Paper".to_string(), units_sold: 12 },
            TopSeller { name: "Office Chair".to_string(), units_sold: 2 },
        ]
    );

    let chatbot = Chatbot::with_defaults(store)?;
    assert_eq!(
        chatbot.respond("what needs restocking")?,
        "Here are the items that are currently low on stock: Desk Lamp, Printer Paper"
    );
    Ok(())
}

#[test]
fn catalog_survives_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("inventory.json");
    {
        let store = open_seeded(&dir)?;
        store.record_sale(NewSale {
            customer_name: Some("Ana".to_string()),
            payment_method: Some("card".to_string()),
            ..NewSale::new("PROD002", 3)
        })?;
        store.set_price("PROD003", 8.25)?;
    }

    let reopened = FileInventoryStore::open(&path)?;
    assert_eq!(
        reopened.list_product_names()?,
        vec!["Desk Lamp", "Office Chair", "Stapler"]
    );
    let chair = reopened.find_product("Office Chair")?.unwrap();
    assert_eq!(chair.stock, 12);
    let stapler = reopened.find_product("Stapler")?.unwrap();
    assert_eq!(stapler.unit_price, 8.25);
    assert!(stapler.updated_at.is_some());

    let snapshot = reopened.snapshot();
    assert_eq!(snapshot.sales.len(), 1);
    assert_eq!(snapshot.sales[0].customer_name.as_deref(), Some("Ana"));
    assert_eq!(snapshot.suppliers.len(), 1);
    Ok(())
}

#[test]
fn delete_cascades_to_sales() -> Result<()> {
    let dir = TempDir::new()?;
    let store = open_seeded(&dir)?;
    store.record_sale(NewSale::new("PROD002", 1))?;
    store.record_sale(NewSale::new("PROD003", 1))?;

    assert!(store.delete_product("PROD002")?);
    assert!(!store.delete_product("PROD002")?);

    let snapshot = store.snapshot();
    assert!(snapshot.sales.iter().all(|s| s.product_id != "PROD002"));
    assert_eq!(snapshot.sales.len(), 1);
    assert_eq!(store.count_products()?, 2);
    Ok(())
}

#[test]
fn restock_is_all_or_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let store = open_seeded(&dir)?;

    let err = store
        .restock(&[("PROD001".to_string(), 10), ("NOPE".to_string(), 1)])
        .unwrap_err();
    assert!(matches!(err, StockbotError::Store(_)));
    assert_eq!(store.find_product("Desk Lamp")?.unwrap().stock, 2);

    let restocked = store.restock(&[("PROD001".to_string(), 10), ("PROD003".to_string(), 4)])?;
    assert_eq!(restocked.len(), 2);

    let lamp = store.find_product("Desk Lamp")?.unwrap();
    assert_eq!(lamp.stock, 12);
    assert_eq!(lamp.last_restock_quantity, 10);
    assert_eq!(lamp.total_restocks, 1);
    assert!(lamp.last_restocked_at.is_some());
    Ok(())
}

#[test]
fn duplicates_and_bad_values_are_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let store = open_seeded(&dir)?;

    assert!(
        store
            .add_product(ProductRecord::new("PROD001", "Pen", "Office", 1, 1))
            .is_err()
    );
    assert!(
        store
            .add_product(ProductRecord::new("PROD009", "DESK LAMP", "Lighting", 1, 1))
            .is_err()
    );
    assert!(store.set_price("PROD001", -2.0).is_err());
    assert!(store.add_supplier(SupplierRecord::new("SUP01", "Other")).is_err());
    assert_eq!(store.count_products()?, 3);
    Ok(())
}

#[test]
fn selling_more_than_in_stock_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let store = open_seeded(&dir)?;

    let err = store.record_sale(NewSale::new("PROD001", 3)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Store error: not enough stock of PROD001: requested 3, available 2"
    );
    assert!(store.record_sale(NewSale::new("PROD001", 0)).is_err());

    let sale = store.record_sale(NewSale::new("PROD001", 2))?;
    assert!((sale.total_amount - 59.98).abs() < 1e-9);
    assert_eq!(store.find_product("Desk Lamp")?.unwrap().stock, 0);
    Ok(())
}

#[test]
fn top_sellers_count_recent_sales_only() -> Result<()> {
    let dir = TempDir::new()?;
    let store = open_seeded(&dir)?;
    store.restock(&[("PROD003".to_string(), 20)])?;

    let now = Utc::now();
    store.record_sale(NewSale::new("PROD002", 10).at(now - Duration::days(60)))?;
    store.record_sale(NewSale::new("PROD002", 2).at(now - Duration::days(2)))?;
    store.record_sale(NewSale::new("PROD003", 5).at(now - Duration::days(1)))?;
    store.record_sale(NewSale::new("PROD001", 2))?;

    let top = store.top_sellers(10, now - Duration::days(30))?;
    assert_eq!(
        top,
        vec![
            TopSeller { name: "Stapler".to_string(), units_sold: 5 },
            TopSeller { name: "Desk Lamp".to_string(), units_sold: 2 },
            TopSeller { name: "Office Chair".to_string(), units_sold: 2 },
        ]
    );
    assert_eq!(store.top_sellers(1, now - Duration::days(30))?.len(), 1);
    Ok(())
}

#[test]
fn reorder_list_suggests_quantities() -> Result<()> {
    let dir = TempDir::new()?;
    let store = open_seeded(&dir)?;

    let items = store.reorder_list()?;
    assert_eq!(items.len(), 2);

    let lamp = &items[0];
    assert_eq!(lamp.product_id, "PROD001");
    assert_eq!(lamp.restock_quantity, 8);
    assert_eq!(lamp.supplier_name.as_deref(), Some("BrightCo"));
    assert_eq!(lamp.contact_email.as_deref(), Some("sales@brightco.example"));

    let stapler = &items[1];
    assert_eq!(stapler.restock_quantity, 7);
    assert_eq!(stapler.supplier_name, None);
    Ok(())
}

#[test]
fn chatbot_sees_store_changes() -> Result<()> {
    let dir = TempDir::new()?;
    let store = Arc::new(open_seeded(&dir)?);
    let chatbot = Chatbot::with_defaults(store.clone())?;

    assert_eq!(
        chatbot.respond("what needs restocking")?,
        "Here are the items that are currently low on stock: Desk Lamp, Stapler"
    );

    store.restock(&[("PROD001".to_string(), 10), ("PROD003".to_string(), 10)])?;
    assert_eq!(
        chatbot.respond("what needs restocking")?,
        "Great news! No items are currently low on stock."
    );

    store.add_product(ProductRecord::new("PROD004", "Mug", "Kitchen", 6, 2))?;
    assert_eq!(
        chatbot.respond("list all products")?,
        "There are 4 products in stock."
    );
    Ok(())
}
