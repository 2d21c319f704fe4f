//! In-memory inventory store.

use chrono::{DateTime, Utc};
use log::{info, warn};
use parking_lot::RwLock;

use crate::error::Result;
use crate::store::snapshot::InventorySnapshot;
use crate::store::traits::{InventoryEditor, InventoryStore, StoreError};
use crate::store::types::{
    LowStockItem, NewSale, ProductRecord, ReorderItem, SaleRecord, SupplierRecord, TopSeller,
};

/// An inventory store that lives only in memory.
#[derive(Debug, Default)]
pub struct MemoryInventoryStore {
    inner: RwLock<InventorySnapshot>,
}

impl MemoryInventoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `snapshot`, which must pass
    /// [`InventorySnapshot::validate`].
    pub fn from_snapshot(snapshot: InventorySnapshot) -> Result<Self> {
        snapshot.validate()?;
        Ok(MemoryInventoryStore {
            inner: RwLock::new(snapshot),
        })
    }

    /// A copy of the current contents.
    pub fn snapshot(&self) -> InventorySnapshot {
        self.inner.read().clone()
    }

    /// Run `op` on a copy of the contents, hand the result to `persist`, and
    /// only then publish it. Nothing changes if either step fails.
    pub(crate) fn apply<T>(
        &self,
        op: impl FnOnce(&mut InventorySnapshot) -> std::result::Result<T, StoreError>,
        persist: impl FnOnce(&InventorySnapshot) -> Result<()>,
    ) -> Result<T> {
        let mut guard = self.inner.write();
        let mut draft = guard.clone();
        let value = op(&mut draft).inspect_err(|e| warn!("Rejected store update: {e}"))?;
        persist(&draft)?;
        *guard = draft;
        Ok(value)
    }

    fn read<T>(&self, f: impl FnOnce(&InventorySnapshot) -> T) -> T {
        f(&self.inner.read())
    }

    pub(crate) fn add_product_with(
        &self,
        product: ProductRecord,
        persist: impl FnOnce(&InventorySnapshot) -> Result<()>,
    ) -> Result<()> {
        let id = product.id.clone();
        self.apply(|s| s.add_product(product), persist)?;
        info!("Added product {id}");
        Ok(())
    }

    pub(crate) fn delete_product_with(
        &self,
        product_id: &str,
        persist: impl FnOnce(&InventorySnapshot) -> Result<()>,
    ) -> Result<bool> {
        let removed = self.apply(|s| Ok(s.delete_product(product_id)), persist)?;
        if removed {
            info!("Deleted product {product_id}");
        }
        Ok(removed)
    }

    pub(crate) fn restock_with(
        &self,
        items: &[(String, u32)],
        now: DateTime<Utc>,
        persist: impl FnOnce(&InventorySnapshot) -> Result<()>,
    ) -> Result<Vec<ProductRecord>> {
        let restocked = self.apply(|s| s.restock(items, now), persist)?;
        info!("Restocked {} product(s)", restocked.len());
        Ok(restocked)
    }

    pub(crate) fn set_price_with(
        &self,
        product_id: &str,
        unit_price: f64,
        now: DateTime<Utc>,
        persist: impl FnOnce(&InventorySnapshot) -> Result<()>,
    ) -> Result<ProductRecord> {
        let product = self.apply(|s| s.set_price(product_id, unit_price, now), persist)?;
        info!("Set price of {product_id} to {unit_price:.2}");
        Ok(product)
    }

    pub(crate) fn record_sale_with(
        &self,
        sale: NewSale,
        now: DateTime<Utc>,
        persist: impl FnOnce(&InventorySnapshot) -> Result<()>,
    ) -> Result<SaleRecord> {
        let record = self.apply(|s| s.record_sale(sale, now), persist)?;
        info!(
            "Recorded sale {} of {} x {}",
            record.id, record.quantity, record.product_id
        );
        Ok(record)
    }

    pub(crate) fn add_supplier_with(
        &self,
        supplier: SupplierRecord,
        persist: impl FnOnce(&InventorySnapshot) -> Result<()>,
    ) -> Result<()> {
        let id = supplier.id.clone();
        self.apply(|s| s.add_supplier(supplier), persist)?;
        info!("Added supplier {id}");
        Ok(())
    }
}

fn no_persist(_: &InventorySnapshot) -> Result<()> {
    Ok(())
}

impl InventoryStore for MemoryInventoryStore {
    fn list_product_names(&self) -> Result<Vec<String>> {
        Ok(self.read(|s| s.product_names()))
    }

    fn count_products(&self) -> Result<usize> {
        Ok(self.read(|s| s.products.len()))
    }

    fn find_low_stock(&self) -> Result<Vec<LowStockItem>> {
        Ok(self.read(|s| s.low_stock()))
    }

    fn find_product(&self, name: &str) -> Result<Option<ProductRecord>> {
        Ok(self.read(|s| s.product_by_name(name).cloned()))
    }

    fn list_products(&self) -> Result<Vec<ProductRecord>> {
        Ok(self.read(|s| s.products.clone()))
    }

    fn top_sellers(&self, limit: usize, since: DateTime<Utc>) -> Result<Vec<TopSeller>> {
        Ok(self.read(|s| s.top_sellers(limit, since)))
    }

    fn reorder_list(&self) -> Result<Vec<ReorderItem>> {
        Ok(self.read(|s| s.reorder_list()))
    }
}

impl InventoryEditor for MemoryInventoryStore {
    fn add_product(&self, product: ProductRecord) -> Result<()> {
        self.add_product_with(product, no_persist)
    }

    fn delete_product(&self, product_id: &str) -> Result<bool> {
        self.delete_product_with(product_id, no_persist)
    }

    fn restock(&self, items: &[(String, u32)]) -> Result<Vec<ProductRecord>> {
        self.restock_with(items, Utc::now(), no_persist)
    }

    fn set_price(&self, product_id: &str, unit_price: f64) -> Result<ProductRecord> {
        self.set_price_with(product_id, unit_price, Utc::now(), no_persist)
    }

    fn record_sale(&self, sale: NewSale) -> Result<SaleRecord> {
        self.record_sale_with(sale, Utc::now(), no_persist)
    }

    fn add_supplier(&self, supplier: SupplierRecord) -> Result<()> {
        self.add_supplier_with(supplier, no_persist)
    }
}
