//! The whole inventory as one value.
//!
//! Both bundled stores keep an [`InventorySnapshot`] behind a lock; the file
//! store also serializes it as its on-disk format. Queries and mutations live
//! here so the stores only deal with locking and persistence.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::traits::StoreError;
use crate::store::types::{
    LowStockItem, NewSale, ProductRecord, ReorderItem, SaleRecord, SupplierRecord, TopSeller,
};

type StoreResult<T> = std::result::Result<T, StoreError>;

/// Products, sales and suppliers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySnapshot {
    pub products: Vec<ProductRecord>,
    pub sales: Vec<SaleRecord>,
    pub suppliers: Vec<SupplierRecord>,
}

impl InventorySnapshot {
    /// An empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product_names(&self) -> Vec<String> {
        self.products.iter().map(|p| p.name.clone()).collect()
    }

    pub fn product_by_name(&self, name: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn product_by_id(&self, product_id: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == product_id)
    }

    fn product_by_id_mut(&mut self, product_id: &str) -> StoreResult<&mut ProductRecord> {
        self.products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| StoreError::ProductNotFound(product_id.to_string()))
    }

    pub fn supplier_by_id(&self, supplier_id: &str) -> Option<&SupplierRecord> {
        self.suppliers.iter().find(|s| s.id == supplier_id)
    }

    pub fn low_stock(&self) -> Vec<LowStockItem> {
        self.products
            .iter()
            .filter(|p| p.is_below_threshold())
            .map(|p| LowStockItem {
                name: p.name.clone(),
                stock: p.stock,
                reorder_threshold: p.reorder_threshold,
            })
            .collect()
    }

    /// Units sold per product since `since`; ties are ordered by name.
    pub fn top_sellers(&self, limit: usize, since: DateTime<Utc>) -> Vec<TopSeller> {
        let mut totals: HashMap<&str, u64> = HashMap::new();
        for sale in self.sales.iter().filter(|s| s.sold_at >= since) {
            *totals.entry(sale.product_id.as_str()).or_insert(0) += u64::from(sale.quantity);
        }

        let mut sellers: Vec<TopSeller> = totals
            .into_iter()
            .filter_map(|(product_id, units_sold)| {
                self.product_by_id(product_id).map(|p| TopSeller {
                    name: p.name.clone(),
                    units_sold,
                })
            })
            .collect();

        sellers.sort_by(|a, b| b.units_sold.cmp(&a.units_sold).then_with(|| a.name.cmp(&b.name)));
        sellers.truncate(limit);
        sellers
    }

    pub fn reorder_list(&self) -> Vec<ReorderItem> {
        self.products
            .iter()
            .filter(|p| p.is_below_threshold())
            .map(|p| {
                let supplier = p.supplier_id.as_deref().and_then(|id| self.supplier_by_id(id));
                ReorderItem {
                    product_id: p.id.clone(),
                    name: p.name.clone(),
                    stock: p.stock,
                    reorder_threshold: p.reorder_threshold,
                    supplier_name: supplier.map(|s| s.name.clone()),
                    contact_email: supplier.and_then(|s| s.contact_email.clone()),
                    restock_quantity: p.reorder_threshold.saturating_mul(2) - p.stock,
                }
            })
            .collect()
    }

    pub fn add_product(&mut self, product: ProductRecord) -> StoreResult<()> {
        if product.id.trim().is_empty() {
            return Err(StoreError::InvalidRecord("product id is empty".to_string()));
        }
        if product.name.trim().is_empty() {
            return Err(StoreError::InvalidRecord("product name is empty".to_string()));
        }
        validate_price(product.unit_price)?;
        if self.product_by_id(&product.id).is_some() {
            return Err(StoreError::DuplicateProductId(product.id));
        }
        let lowered = product.name.to_lowercase();
        if self.products.iter().any(|p| p.name.to_lowercase() == lowered) {
            return Err(StoreError::DuplicateProductName(product.name));
        }
        if let Some(supplier_id) = &product.supplier_id {
            if self.supplier_by_id(supplier_id).is_none() {
                return Err(StoreError::SupplierNotFound(supplier_id.clone()));
            }
        }

        self.products.push(product);
        Ok(())
    }

    /// Remove a product and every sale of it.
    pub fn delete_product(&mut self, product_id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != product_id);
        let removed = self.products.len() != before;
        if removed {
            self.sales.retain(|s| s.product_id != product_id);
        }
        removed
    }

    pub fn restock(
        &mut self,
        items: &[(String, u32)],
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<ProductRecord>> {
        let mut restocked = Vec::with_capacity(items.len());
        for (product_id, quantity) in items {
            if *quantity == 0 {
                return Err(StoreError::InvalidQuantity(format!(
                    "restock quantity for {product_id} must be positive"
                )));
            }
            let product = self.product_by_id_mut(product_id)?;
            product.stock = product.stock.checked_add(*quantity).ok_or_else(|| {
                StoreError::InvalidQuantity(format!("stock of {product_id} would overflow"))
            })?;
            product.last_restock_quantity = *quantity;
            product.last_restocked_at = Some(now);
            product.total_restocks += 1;
            product.updated_at = Some(now);
            restocked.push(product.clone());
        }
        Ok(restocked)
    }

    pub fn set_price(
        &mut self,
        product_id: &str,
        unit_price: f64,
        now: DateTime<Utc>,
    ) -> StoreResult<ProductRecord> {
        validate_price(unit_price)?;
        let product = self.product_by_id_mut(product_id)?;
        product.unit_price = unit_price;
        product.updated_at = Some(now);
        Ok(product.clone())
    }

    pub fn record_sale(&mut self, sale: NewSale, now: DateTime<Utc>) -> StoreResult<SaleRecord> {
        if sale.quantity == 0 {
            return Err(StoreError::InvalidQuantity(
                "sale quantity must be positive".to_string(),
            ));
        }
        let id = self.sales.iter().map(|s| s.id).max().unwrap_or(0) + 1;

        let product = self.product_by_id_mut(&sale.product_id)?;
        if sale.quantity > product.stock {
            return Err(StoreError::InsufficientStock {
                product_id: sale.product_id,
                requested: sale.quantity,
                available: product.stock,
            });
        }
        product.stock -= sale.quantity;
        product.updated_at = Some(now);
        let unit_price = product.unit_price;

        let record = SaleRecord {
            id,
            product_id: sale.product_id,
            quantity: sale.quantity,
            unit_price,
            total_amount: unit_price * f64::from(sale.quantity),
            sold_at: sale.sold_at.unwrap_or(now),
            customer_name: sale.customer_name,
            payment_method: sale.payment_method,
        };
        self.sales.push(record.clone());
        Ok(record)
    }

    pub fn add_supplier(&mut self, supplier: SupplierRecord) -> StoreResult<()> {
        if supplier.id.trim().is_empty() {
            return Err(StoreError::InvalidRecord("supplier id is empty".to_string()));
        }
        if self.supplier_by_id(&supplier.id).is_some() {
            return Err(StoreError::DuplicateSupplier(supplier.id));
        }
        self.suppliers.push(supplier);
        Ok(())
    }

    /// Check a loaded snapshot against the rules `add_supplier` and
    /// `add_product` enforce, replaying its records in order.
    pub fn validate(&self) -> StoreResult<()> {
        let mut replay = InventorySnapshot::new();
        for supplier in &self.suppliers {
            replay.add_supplier(supplier.clone())?;
        }
        for product in &self.products {
            replay.add_product(product.clone())?;
        }
        Ok(())
    }
}

fn validate_price(unit_price: f64) -> StoreResult<()> {
    if unit_price.is_finite() && unit_price >= 0.0 {
        Ok(())
    } else {
        Err(StoreError::InvalidPrice(format!(
            "price must be a non-negative number, got {unit_price}"
        )))
    }
}
