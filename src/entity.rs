//! Product name extraction.
//!
//! A product is mentioned when its name, lower-cased, occurs anywhere in the
//! lower-cased utterance. When several names match, the first one in store
//! order wins, so "desk lamp" can shadow a later "lamp" or the other way round
//! depending on the catalog.

use crate::error::Result;
use crate::store::InventoryStore;

/// Find the first of `names` mentioned in `utterance`, returning it with its
/// canonical casing. Empty names never match.
pub fn extract_product_name<S: AsRef<str>>(utterance: &str, names: &[S]) -> Option<String> {
    let utterance = utterance.to_lowercase();
    names
        .iter()
        .map(AsRef::as_ref)
        .find(|name| !name.is_empty() && utterance.contains(&name.to_lowercase()))
        .map(str::to_string)
}

/// Extracts product names using the store's current product list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductNameExtractor;

impl ProductNameExtractor {
    pub fn new() -> Self {
        ProductNameExtractor
    }

    /// Read the product names once and search `utterance` for them.
    pub fn extract(&self, store: &dyn InventoryStore, utterance: &str) -> Result<Option<String>> {
        let names = store.list_product_names()?;
        Ok(extract_product_name(utterance, &names))
    }
}
