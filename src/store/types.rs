//! Records held by the inventory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Unique product id (e.g. "PROD001").
    pub id: String,
    /// Unique display name, canonical casing.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Units on hand.
    pub stock: u32,
    /// Stock level at which the product should be reordered.
    pub reorder_threshold: u32,
    /// Price per unit.
    #[serde(default)]
    pub unit_price: f64,
    /// Supplier of the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    /// Units added by the most recent restock.
    #[serde(default)]
    pub last_restock_quantity: u32,
    /// When the product was last restocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_restocked_at: Option<DateTime<Utc>>,
    /// Number of restocks so far.
    #[serde(default)]
    pub total_restocks: u32,
    /// Last change of stock or price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductRecord {
    /// Create a product with zero price, no supplier and no restock history.
    pub fn new<S: Into<String>>(
        id: S,
        name: S,
        category: S,
        stock: u32,
        reorder_threshold: u32,
    ) -> Self {
        ProductRecord {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            stock,
            reorder_threshold,
            unit_price: 0.0,
            supplier_id: None,
            last_restock_quantity: 0,
            last_restocked_at: None,
            total_restocks: 0,
            updated_at: None,
        }
    }

    /// Set the unit price.
    pub fn with_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// Set the supplier.
    pub fn with_supplier<S: Into<String>>(mut self, supplier_id: S) -> Self {
        self.supplier_id = Some(supplier_id.into());
        self
    }

    /// Value of the stock on hand.
    pub fn total_value(&self) -> f64 {
        self.unit_price * self.stock as f64
    }

    /// Below the reorder threshold: listed by low-stock queries.
    pub fn is_below_threshold(&self) -> bool {
        self.stock < self.reorder_threshold
    }

    /// At or below the reorder threshold: flagged in product details.
    pub fn is_at_or_below_threshold(&self) -> bool {
        self.stock <= self.reorder_threshold
    }
}

/// One sale of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Sequential sale id.
    pub id: u64,
    /// Product sold.
    pub product_id: String,
    /// Units sold.
    pub quantity: u32,
    /// Price per unit at the time of sale.
    pub unit_price: f64,
    /// `quantity * unit_price`.
    pub total_amount: f64,
    /// When the sale happened.
    pub sold_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// A sale to be recorded; the store assigns id, price and total.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewSale {
    pub product_id: String,
    pub quantity: u32,
    /// Defaults to now.
    pub sold_at: Option<DateTime<Utc>>,
    pub customer_name: Option<String>,
    pub payment_method: Option<String>,
}

impl NewSale {
    /// A sale of `quantity` units of `product_id`, happening now.
    pub fn new<S: Into<String>>(product_id: S, quantity: u32) -> Self {
        NewSale {
            product_id: product_id.into(),
            quantity,
            ..NewSale::default()
        }
    }

    /// Record the sale at a specific time.
    pub fn at(mut self, sold_at: DateTime<Utc>) -> Self {
        self.sold_at = Some(sold_at);
        self
    }
}

/// A supplier of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl SupplierRecord {
    /// Create a supplier without contact details.
    pub fn new<S: Into<String>>(id: S, name: S) -> Self {
        SupplierRecord {
            id: id.into(),
            name: name.into(),
            contact_email: None,
            phone: None,
        }
    }
}

/// Row of the low-stock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockItem {
    pub name: String,
    pub stock: u32,
    pub reorder_threshold: u32,
}

/// Row of the top-sellers report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSeller {
    pub name: String,
    pub units_sold: u64,
}

/// Row of the reorder list: a low-stock product and whom to order it from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderItem {
    pub product_id: String,
    pub name: String,
    pub stock: u32,
    pub reorder_threshold: u32,
    pub supplier_name: Option<String>,
    pub contact_email: Option<String>,
    /// Units needed to reach twice the reorder threshold.
    pub restock_quantity: u32,
}
