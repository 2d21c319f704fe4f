//! Intent classifier trait definition.

use rayon::prelude::*;

use crate::intent::types::Classification;

/// Intent classifier trait.
///
/// Implementations map one utterance to one intent. Classification is a pure
/// function of the classifier's fixed model and the input; an utterance
/// nothing matches is `Intent::Unknown`, never an error.
pub trait IntentClassifier: Send + Sync + std::fmt::Debug {
    /// Classify a single utterance.
    fn classify(&self, utterance: &str) -> Classification;

    /// Classify many utterances in parallel. Results come back in input order.
    fn classify_batch(&self, utterances: &[String]) -> Vec<Classification> {
        utterances
            .par_iter()
            .map(|utterance| self.classify(utterance))
            .collect()
    }

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
