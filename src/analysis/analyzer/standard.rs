//! Standard analyzer used for utterances and example phrases.
//!
//! # Pipeline
//!
//! 1. RegexTokenizer (`\b\w\w+\b` by default)
//! 2. LowercaseFilter
//!
//! No stop words are removed: "how many", "what is" and friends carry most
//! of the signal in short commands.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::LowercaseFilter;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::Result;

/// A standard analyzer: regex tokenization followed by lowercasing.
#[derive(Clone, Debug)]
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with the default token pattern.
    pub fn new() -> Result<Self> {
        Self::with_tokenizer(RegexTokenizer::new()?)
    }

    /// Create a standard analyzer that extracts tokens with a custom pattern.
    pub fn with_token_pattern(pattern: &str) -> Result<Self> {
        Self::with_tokenizer(RegexTokenizer::with_pattern(pattern)?)
    }

    fn with_tokenizer(tokenizer: RegexTokenizer) -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(Arc::new(tokenizer))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("standard");

        Ok(StandardAnalyzer { inner: analyzer })
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> TokenStream {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}
