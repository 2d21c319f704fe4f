//! Lowercase filter implementation.
//!
//! # Examples
//!
//! ```
//! use stockbot::analysis::token_filter::Filter;
//! use stockbot::analysis::token_filter::lowercase::LowercaseFilter;
//! use stockbot::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Desk", 0), Token::new("LAMP", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(filtered[0].text, "desk");
//! assert_eq!(filtered[1].text, "lamp");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// A filter that converts tokens to lowercase.
///
/// Positions and offsets are preserved. ASCII-only tokens take the cheap
/// path; everything else goes through Unicode-aware lowercasing.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        Box::new(tokens.map(|token| {
            if token.text.is_ascii() {
                let lowered = token.text.to_ascii_lowercase();
                token.with_text(lowered)
            } else {
                let lowered = token.text.to_lowercase();
                token.with_text(lowered)
            }
        }))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
