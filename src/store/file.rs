//! JSON file-backed inventory store.
//!
//! The whole inventory is kept in memory and written back after every
//! successful change. A write goes to `<path>.tmp` first and is then renamed
//! over the catalog, so readers never see a half-written file.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::error::Result;
use crate::store::memory::MemoryInventoryStore;
use crate::store::snapshot::InventorySnapshot;
use crate::store::traits::{InventoryEditor, InventoryStore, StoreError};
use crate::store::types::{
    LowStockItem, NewSale, ProductRecord, ReorderItem, SaleRecord, SupplierRecord, TopSeller,
};

/// An inventory store persisted as a JSON catalog file.
#[derive(Debug)]
pub struct FileInventoryStore {
    path: PathBuf,
    memory: MemoryInventoryStore,
}

impl FileInventoryStore {
    /// Open the catalog at `path`. A missing file is an empty inventory; the
    /// file is created on the first change. A catalog whose records break the
    /// store's rules (duplicate ids or names, bad prices, unknown suppliers)
    /// is rejected.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let snapshot = if path.exists() {
            let file = File::open(&path).map_err(|e| {
                StoreError::Unavailable(format!("cannot open {}: {e}", path.display()))
            })?;
            let snapshot: InventorySnapshot = serde_json::from_reader(BufReader::new(file))
                .map_err(|e| {
                    StoreError::InvalidRecord(format!("cannot parse {}: {e}", path.display()))
                })?;
            info!(
                "Loaded {} product(s) from {}",
                snapshot.products.len(),
                path.display()
            );
            snapshot
        } else {
            debug!("Catalog {} does not exist yet", path.display());
            InventorySnapshot::new()
        };

        let memory = MemoryInventoryStore::from_snapshot(snapshot)
            .inspect_err(|e| warn!("Rejected catalog {}: {e}", path.display()))?;
        Ok(FileInventoryStore { path, memory })
    }

    /// Create a catalog file at `path` holding `snapshot`.
    pub fn create<P: AsRef<Path>>(path: P, snapshot: InventorySnapshot) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let memory = MemoryInventoryStore::from_snapshot(snapshot)?;
        write_snapshot(&path, &memory.snapshot())?;
        Ok(FileInventoryStore { path, memory })
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A copy of the current contents.
    pub fn snapshot(&self) -> InventorySnapshot {
        self.memory.snapshot()
    }

    fn persist(&self) -> impl FnOnce(&InventorySnapshot) -> Result<()> + '_ {
        move |snapshot| write_snapshot(&self.path, snapshot)
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

fn write_snapshot(path: &Path, snapshot: &InventorySnapshot) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let write = || -> Result<()> {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    };

    write().map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        StoreError::Unavailable(format!("cannot write {}: {e}", path.display()))
    })?;
    debug!("Wrote catalog {}", path.display());
    Ok(())
}

impl InventoryStore for FileInventoryStore {
    fn list_product_names(&self) -> Result<Vec<String>> {
        self.memory.list_product_names()
    }

    fn count_products(&self) -> Result<usize> {
        self.memory.count_products()
    }

    fn find_low_stock(&self) -> Result<Vec<LowStockItem>> {
        self.memory.find_low_stock()
    }

    fn find_product(&self, name: &str) -> Result<Option<ProductRecord>> {
        self.memory.find_product(name)
    }

    fn list_products(&self) -> Result<Vec<ProductRecord>> {
        self.memory.list_products()
    }

    fn top_sellers(&self, limit: usize, since: DateTime<Utc>) -> Result<Vec<TopSeller>> {
        self.memory.top_sellers(limit, since)
    }

    fn reorder_list(&self) -> Result<Vec<ReorderItem>> {
        self.memory.reorder_list()
    }
}

impl InventoryEditor for FileInventoryStore {
    fn add_product(&self, product: ProductRecord) -> Result<()> {
        self.memory.add_product_with(product, self.persist())
    }

    fn delete_product(&self, product_id: &str) -> Result<bool> {
        self.memory.delete_product_with(product_id, self.persist())
    }

    fn restock(&self, items: &[(String, u32)]) -> Result<Vec<ProductRecord>> {
        self.memory.restock_with(items, Self::now(), self.persist())
    }

    fn set_price(&self, product_id: &str, unit_price: f64) -> Result<ProductRecord> {
        self.memory
            .set_price_with(product_id, unit_price, Self::now(), self.persist())
    }

    fn record_sale(&self, sale: NewSale) -> Result<SaleRecord> {
        self.memory.record_sale_with(sale, Self::now(), self.persist())
    }

    fn add_supplier(&self, supplier: SupplierRecord) -> Result<()> {
        self.memory.add_supplier_with(supplier, self.persist())
    }
}
