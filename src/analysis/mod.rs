//! Text analysis for utterances and example phrases.
//!
//! Raw text goes through a tokenizer and then a chain of token filters. The
//! matcher, the keyword classifier and the vectorizer all see text only
//! through an [`Analyzer`], so every component agrees on what a "word" is.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
