//! # Stockbot
//!
//! An inventory assistant that answers plain-language questions about stock.
//!
//! ## Features
//!
//! - TF-IDF intent matching against example phrases, with an `unknown`
//!   fallback below a confidence threshold
//! - Keyword-rule classifier as an alternative interpreter
//! - Product name extraction from the current catalog
//! - Pluggable inventory stores (in memory, JSON catalog file)
//! - Command line front end for questions and catalog maintenance
//!
//! ```
//! use std::sync::Arc;
//!
//! use stockbot::prelude::*;
//!
//! let store = MemoryInventoryStore::new();
//! store
//!     .add_product(ProductRecord::new("P1", "Desk Lamp", "Lighting", 2, 5))
//!     .unwrap();
//!
//! let chatbot = Chatbot::with_defaults(Arc::new(store)).unwrap();
//! let reply = chatbot.respond("what needs restocking").unwrap();
//! assert!(reply.ends_with("Desk Lamp"));
//! ```
//!
//! A sample catalog ships in `demos/inventory.json`:
//!
//! ```text
//! stockbot --catalog demos/inventory.json ask "what needs restocking"
//! ```

pub mod analysis;
pub mod chatbot;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod intent;
pub mod response;
pub mod store;

pub mod prelude {
    pub use crate::chatbot::Chatbot;
    pub use crate::config::{ChatbotConfig, ClassifierKind};
    pub use crate::error::{Result, StockbotError};
    pub use crate::intent::{
        Classification, Intent, IntentClassifier, IntentMatcher, KnowledgeBase, MatcherConfig,
    };
    pub use crate::store::{
        FileInventoryStore, InventoryEditor, InventoryStore, MemoryInventoryStore, ProductRecord,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
