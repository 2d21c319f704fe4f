//! Reply rendering.
//!
//! [`ResponseComposer`] turns a classified intent, and the product it
//! mentions if any, into the reply text. Intents with a template in the
//! knowledge base use it; the rest of the wording is fixed here.

use std::sync::Arc;

use crate::error::Result;
use crate::intent::{Intent, KnowledgeBase};
use crate::store::{InventoryStore, ProductRecord};

/// Reply to anything the classifier could not place.
pub const UNKNOWN_RESPONSE: &str = "I'm sorry, I didn't understand that. You can ask me to \
     'show all inventory', 'check low stock items', or ask about a specific product like \
     'how many desk lamp do we have?'";

/// Reply to a low-stock question when nothing is low.
pub const ALL_GOOD_RESPONSE: &str = "Great news! No items are currently low on stock.";

/// Reply to a product question that names no known product.
pub const WHICH_PRODUCT_RESPONSE: &str =
    "I can help with that, but which product are you asking about?";

const DEFAULT_GREETING: &str = "Hello! How can I help you with your inventory today?";
const DEFAULT_FAREWELL: &str = "Goodbye! Have a great day.";
const DEFAULT_LOW_STOCK_HEADER: &str = "Here are the items that are currently low on stock:";

/// Renders replies from templates and store queries.
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    store: Arc<dyn InventoryStore>,
    greeting: String,
    farewell: String,
    low_stock_header: String,
}

impl ResponseComposer {
    /// Create a composer taking its templates from `knowledge_base`.
    pub fn new(store: Arc<dyn InventoryStore>, knowledge_base: &KnowledgeBase) -> Self {
        let template = |intent: Intent, fallback: &str| {
            knowledge_base
                .template(intent)
                .unwrap_or(fallback)
                .to_string()
        };

        ResponseComposer {
            greeting: template(Intent::Greet, DEFAULT_GREETING),
            farewell: template(Intent::Goodbye, DEFAULT_FAREWELL),
            low_stock_header: template(Intent::LowStock, DEFAULT_LOW_STOCK_HEADER),
            store,
        }
    }

    /// Render the reply for `intent`. `product` is the extracted product
    /// name and only matters for product details.
    pub fn compose(&self, intent: Intent, product: Option<&str>) -> Result<String> {
        match intent {
            Intent::Greet => Ok(self.greeting.clone()),
            Intent::Goodbye => Ok(self.farewell.clone()),
            Intent::Unknown => Ok(UNKNOWN_RESPONSE.to_string()),
            Intent::InventoryStatus => {
                let count = self.store.count_products()?;
                Ok(format!("There are {count} products in stock."))
            }
            Intent::LowStock => {
                let low = self.store.find_low_stock()?;
                if low.is_empty() {
                    return Ok(ALL_GOOD_RESPONSE.to_string());
                }
                let names: Vec<&str> = low.iter().map(|item| item.name.as_str()).collect();
                Ok(format!("{} {}", self.low_stock_header, names.join(", ")))
            }
            Intent::ProductDetails => match product {
                None => Ok(WHICH_PRODUCT_RESPONSE.to_string()),
                Some(name) => match self.store.find_product(name)? {
                    Some(record) => Ok(product_details(&record)),
                    None => Ok(format!("Sorry, I couldn't find any details for '{name}'.")),
                },
            },
        }
    }
}

fn product_details(product: &ProductRecord) -> String {
    let mut lines = vec![
        format!("Here are the details for {}:", product.name),
        format!("- Stock Level: {} units", product.stock),
        format!("- Price: ${:.2}", product.unit_price),
        format!("- Category: {}", product.category),
        format!("- Reorder Level: {} units", product.reorder_threshold),
    ];
    if product.is_at_or_below_threshold() {
        lines.push("- Status: This item is low on stock.".to_string());
    }
    lines.join("\n")
}
