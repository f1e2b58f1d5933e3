pub mod relevance;
pub mod tfidf;

pub use relevance::RelevanceEngine;
pub use tfidf::TfIdfOracle;

/// Batch text similarity (TF-IDF cosine, embeddings, ...)
///
/// Term weights depend on the whole corpus, so implementations score every
/// text in one call instead of pair by pair.
pub trait SimilarityOracle: Send + Sync {
    /// Similarity of each text to `texts[reference]`, one value per text (0.0 - 1.0)
    fn similarities(&self, texts: &[&str], reference: usize) -> Vec<f64>;

    /// Get oracle name for logging
    fn name(&self) -> &str;
}

/// Per-candidate breakdown of the four relevance signals
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RelevanceSignals {
    /// Description similarity to the main entity (0.0 - 1.0)
    pub lexical: f64,
    /// Share of the main entity's seeAlso links the candidate also has (0.0 - 1.0)
    pub structural: f64,
    /// 1.0 when the candidate's comment mentions the main entity
    pub main_in_candidate: f64,
    /// 1.0 when the main entity's comment mentions the candidate
    pub candidate_in_main: f64,
}

impl RelevanceSignals {
    /// Number of signals; fixed normalizer regardless of how many fired
    pub const COUNT: f64 = 4.0;

    pub fn raw(&self) -> f64 {
        self.lexical + self.structural + self.main_in_candidate + self.candidate_in_main
    }

    /// Normalized relevance (0.0 - 1.0)
    pub fn relevance(&self) -> f64 {
        self.raw() / Self::COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_normalizer() {
        let signals = RelevanceSignals {
            lexical: 0.0,
            structural: 0.0,
            main_in_candidate: 0.0,
            candidate_in_main: 1.0,
        };
        assert_eq!(signals.raw(), 1.0);
        assert_eq!(signals.relevance(), 0.25);

        let all = RelevanceSignals {
            lexical: 1.0,
            structural: 1.0,
            main_in_candidate: 1.0,
            candidate_in_main: 1.0,
        };
        assert_eq!(all.relevance(), 1.0);
    }
}
