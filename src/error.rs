//! Error types for the stockbot library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`StockbotError`] enum. Classification itself never fails: an utterance
//! nobody recognizes is the `unknown` intent, not an error. What can fail is
//! building the model (bad configuration, bad knowledge base) and talking to
//! the inventory store.
//!
//! # Examples
//!
//! ```
//! use stockbot::error::{Result, StockbotError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(StockbotError::invalid_argument("quantity must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for stockbot operations.
#[derive(Error, Debug)]
pub enum StockbotError {
    /// I/O errors (catalog files, configuration files, stdin)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenizer construction, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid intent definitions
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inventory store failures
    #[error("Store error: {0}")]
    Store(String),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid argument supplied by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failures carrying a context chain, shown in full
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with StockbotError.
pub type Result<T> = std::result::Result<T, StockbotError>;

impl StockbotError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        StockbotError::Analysis(msg.into())
    }

    /// Create a new knowledge base error.
    pub fn knowledge_base<S: Into<String>>(msg: S) -> Self {
        StockbotError::KnowledgeBase(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        StockbotError::Config(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        StockbotError::Store(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        StockbotError::NotFound(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        StockbotError::InvalidArgument(msg.into())
    }
}
