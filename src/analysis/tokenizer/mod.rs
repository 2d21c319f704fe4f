//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the pipeline: they split raw text into
//! tokens. Construction may fail (a bad pattern); tokenizing never does.
//!
//! # Examples
//!
//! ```
//! use stockbot::analysis::tokenizer::Tokenizer;
//! use stockbot::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::new().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("Desk Lamp").collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can sit inside the shared,
/// read-only matcher model.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;

pub use self::regex::RegexTokenizer;
