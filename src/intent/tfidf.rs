//! TF-IDF vectorizer for text feature extraction.
//!
//! Weights are raw term counts times a smoothed inverse document frequency,
//! `ln((1 + n) / (1 + df)) + 1`, and every vector is L2-normalised. Terms
//! that were not seen while fitting contribute nothing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;

/// TF-IDF vectorizer with a vocabulary fixed at construction.
///
/// There is no way to refit or extend a vectorizer: the vocabulary is built
/// once, by [`TfIdfVectorizer::fit`].
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping, indices assigned in first-seen order.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each term.
    idf: Vec<f64>,
    /// Number of documents seen while fitting.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Build the vocabulary and IDF weights from `documents`.
    pub fn fit(analyzer: Arc<dyn Analyzer>, documents: &[String]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let mut seen_in_doc = HashSet::new();
            for term in analyzer.terms(doc) {
                let next_index = vocabulary.len();
                let idx = *vocabulary.entry(term).or_insert(next_index);
                if idx == document_frequency.len() {
                    document_frequency.push(0);
                }
                if seen_in_doc.insert(idx) {
                    document_frequency[idx] += 1;
                }
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        TfIdfVectorizer {
            vocabulary,
            idf,
            n_documents: documents.len(),
            analyzer,
        }
    }

    /// Transform a document into an L2-normalised TF-IDF vector.
    ///
    /// A document without any known term maps to the zero vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut features = vec![0.0; self.vocabulary.len()];

        for term in self.analyzer.terms(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                features[idx] += 1.0;
            }
        }

        for (idx, value) in features.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let norm = features.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        features
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Whether `term` (already analyzed) is part of the vocabulary.
    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// IDF weight of `term`, if it is part of the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }
}

/// Calculate cosine similarity between two vectors.
///
/// Mismatched lengths and zero vectors give 0.0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        0.0
    } else {
        dot_product / (magnitude_a * magnitude_b)
    }
}
