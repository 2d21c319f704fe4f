//! Inventory store.
//!
//! [`InventoryStore`] is the read-only view the chatbot answers from;
//! [`InventoryEditor`] adds the catalog maintenance operations used by the
//! command line. Two implementations are bundled: [`MemoryInventoryStore`]
//! and the JSON catalog file backed [`FileInventoryStore`].

mod file;
mod memory;
mod snapshot;
mod traits;
mod types;

pub use file::FileInventoryStore;
pub use memory::MemoryInventoryStore;
pub use snapshot::InventorySnapshot;
pub use traits::{InventoryEditor, InventoryStore, StoreError};
pub use types::{
    LowStockItem, NewSale, ProductRecord, ReorderItem, SaleRecord, SupplierRecord, TopSeller,
};
