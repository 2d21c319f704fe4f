//! Inventory store traits and store-specific errors.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::{Result, StockbotError};
use crate::store::types::{
    LowStockItem, NewSale, ProductRecord, ReorderItem, SaleRecord, SupplierRecord, TopSeller,
};

/// Read side of the inventory store.
///
/// Every query is synchronous and consistent as of the moment it is called.
/// Product order is the store's iteration order (insertion order for the
/// bundled stores).
pub trait InventoryStore: Send + Sync + std::fmt::Debug {
    /// Display names of all products, in store order.
    fn list_product_names(&self) -> Result<Vec<String>>;

    /// Number of products.
    fn count_products(&self) -> Result<usize>;

    /// Products whose stock is strictly below their reorder threshold.
    fn find_low_stock(&self) -> Result<Vec<LowStockItem>>;

    /// Full record of the product with exactly this display name.
    fn find_product(&self, name: &str) -> Result<Option<ProductRecord>>;

    /// All product records, in store order.
    fn list_products(&self) -> Result<Vec<ProductRecord>>;

    /// Best-selling products by units sold since `since`, most first.
    fn top_sellers(&self, limit: usize, since: DateTime<Utc>) -> Result<Vec<TopSeller>>;

    /// Low-stock products with their supplier and a suggested restock quantity.
    fn reorder_list(&self) -> Result<Vec<ReorderItem>>;
}

/// Write side of the inventory store.
///
/// Each call is all-or-nothing: a rejected call leaves the store unchanged.
pub trait InventoryEditor: InventoryStore {
    /// Insert a new product.
    fn add_product(&self, product: ProductRecord) -> Result<()>;

    /// Delete a product and its sales. Returns whether a product was removed.
    fn delete_product(&self, product_id: &str) -> Result<bool>;

    /// Add stock to several products at once.
    fn restock(&self, items: &[(String, u32)]) -> Result<Vec<ProductRecord>>;

    /// Change the unit price of a product.
    fn set_price(&self, product_id: &str, unit_price: f64) -> Result<ProductRecord>;

    /// Record a sale and take the units out of stock.
    fn record_sale(&self, sale: NewSale) -> Result<SaleRecord>;

    /// Insert a new supplier.
    fn add_supplier(&self, supplier: SupplierRecord) -> Result<()>;
}

/// Error types specific to store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("product id already exists: {0}")]
    DuplicateProductId(String),

    #[error("product name already exists: {0}")]
    DuplicateProductName(String),

    #[error("supplier id already exists: {0}")]
    DuplicateSupplier(String),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("supplier not found: {0}")]
    SupplierNotFound(String),

    #[error("not enough stock of {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: u32,
        available: u32,
    },

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for StockbotError {
    fn from(err: StoreError) -> Self {
        StockbotError::store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::ProductNotFound("P9".to_string());
        assert_eq!(err.to_string(), "product not found: P9");

        let err = StoreError::InsufficientStock {
            product_id: "P1".to_string(),
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "not enough stock of P1: requested 5, available 2"
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let err: StockbotError = StoreError::Unavailable("locked".to_string()).into();
        assert_eq!(err.to_string(), "Store error: store unavailable: locked");
    }
}
