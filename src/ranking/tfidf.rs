use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::ranking::SimilarityOracle;

/// Words of two or more characters, same as the usual TF-IDF vectorizer default
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Sparse term weight vector, ordered so float sums are reproducible
pub type TermVector = BTreeMap<String, f64>;

/// Lowercase and split text into terms
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Cosine similarity between two sparse vectors, 0.0 when either is zero
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let dot: f64 = small
        .iter()
        .filter_map(|(term, weight)| large.get(term).map(|other| weight * other))
        .sum();

    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    let denom = norm_a * norm_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}

/// TF-IDF vectorizer with cosine similarity
///
/// Raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, L2-normalized rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfOracle;

impl TfIdfOracle {
    pub fn new() -> Self {
        Self
    }

    /// Vectorize a corpus; `None` when it is too small to say anything
    pub fn vectorize(&self, texts: &[&str]) -> Option<Vec<TermVector>> {
        if texts.len() < 2 {
            return None;
        }

        let documents: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for document in &documents {
            let unique: BTreeSet<&str> = document.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.len() < 2 {
            return None;
        }

        let n = documents.len() as f64;
        let idf: BTreeMap<&str, f64> = document_frequency
            .iter()
            .map(|(term, df)| (*term, ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0))
            .collect();

        let vectors = documents
            .iter()
            .map(|document| {
                let mut vector = TermVector::new();
                for term in document {
                    *vector.entry(term.clone()).or_insert(0.0) += 1.0;
                }
                for (term, weight) in vector.iter_mut() {
                    *weight *= idf[term.as_str()];
                }

                let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    vector.values_mut().for_each(|w| *w /= norm);
                }
                vector
            })
            .collect();

        Some(vectors)
    }
}

impl SimilarityOracle for TfIdfOracle {
    fn similarities(&self, texts: &[&str], reference: usize) -> Vec<f64> {
        if reference >= texts.len() {
            return vec![0.0; texts.len()];
        }

        match self.vectorize(texts) {
            Some(vectors) => vectors
                .iter()
                .map(|vector| cosine_similarity(&vectors[reference], vector))
                .collect(),
            None => {
                tracing::debug!("Degenerate corpus of {} documents, lexical similarity is 0", texts.len());
                vec![0.0; texts.len()]
            }
        }
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}
