use std::collections::HashSet;
use std::sync::Arc;

use crate::core::{EntityRecord, RankedEntity};
use crate::error::{ExplorerError, Result};
use crate::ranking::{RelevanceSignals, SimilarityOracle, TfIdfOracle};

/// Scores related entities against a main entity and orders them for layout
///
/// Stateless: every call builds its corpus from the records it is given.
#[derive(Clone)]
pub struct RelevanceEngine {
    oracle: Arc<dyn SimilarityOracle>,
}

impl Default for RelevanceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceEngine {
    /// Engine backed by TF-IDF cosine similarity
    pub fn new() -> Self {
        Self::with_oracle(Arc::new(TfIdfOracle::new()))
    }

    pub fn with_oracle(oracle: Arc<dyn SimilarityOracle>) -> Self {
        Self { oracle }
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    /// Rank the main entity and its candidates, most relevant first
    ///
    /// The main entity always scores 1.0. Ties keep input order, main entity first.
    pub fn rank(&self, main: EntityRecord, candidates: Vec<EntityRecord>) -> Result<Vec<RankedEntity>> {
        let signals = self.signals(&main, &candidates)?;

        let mut ranked: Vec<RankedEntity> = std::iter::once(RankedEntity::main(main))
            .chain(
                candidates
                    .into_iter()
                    .zip(signals)
                    .map(|(candidate, s)| RankedEntity::new(candidate, s.relevance())),
            )
            .collect();

        // Vec::sort_by is stable
        ranked.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

        tracing::debug!(
            "Ranked {} entities with {}, top: {}",
            ranked.len(),
            self.oracle.name(),
            ranked.first().map(RankedEntity::display).unwrap_or_default()
        );

        Ok(ranked)
    }

    /// Signal breakdown for each candidate, in candidate order
    pub fn signals(&self, main: &EntityRecord, candidates: &[EntityRecord]) -> Result<Vec<RelevanceSignals>> {
        main.validate()?;
        for (index, candidate) in candidates.iter().enumerate() {
            candidate.validate().map_err(|_| {
                ExplorerError::invalid_input(format!("candidate #{} has no identifier", index))
            })?;
        }

        let lexical = self.lexical_similarities(main, candidates);
        let main_links: HashSet<&str> = main.see_also().iter().map(String::as_str).collect();
        let main_name = main.identifier.to_lowercase();
        let main_comment = main.comment().map(str::to_lowercase);

        Ok(candidates
            .iter()
            .zip(lexical)
            .map(|(candidate, lexical)| RelevanceSignals {
                lexical,
                structural: structural_overlap(&main_links, candidate),
                main_in_candidate: mentions(
                    candidate.comment().map(str::to_lowercase).as_deref(),
                    &main_name,
                ),
                candidate_in_main: mentions(
                    main_comment.as_deref(),
                    &candidate.identifier.to_lowercase(),
                ),
            })
            .collect())
    }

    /// One similarity per candidate; candidates without a comment get 0.0
    fn lexical_similarities(&self, main: &EntityRecord, candidates: &[EntityRecord]) -> Vec<f64> {
        let corpus: Vec<&str> = std::iter::once(main.comment().unwrap_or_default())
            .chain(candidates.iter().filter_map(EntityRecord::comment))
            .collect();

        // Index 0 is the main entity's self-similarity
        let mut commented = self.oracle.similarities(&corpus, 0).into_iter().skip(1);

        candidates
            .iter()
            .map(|candidate| match candidate.comment() {
                Some(_) => sanitize(commented.next().unwrap_or(0.0)),
                None => 0.0,
            })
            .collect()
    }
}

/// Fraction of the main entity's links shared by the candidate
fn structural_overlap(main_links: &HashSet<&str>, candidate: &EntityRecord) -> f64 {
    if main_links.is_empty() {
        return 0.0;
    }

    let shared = candidate
        .see_also()
        .iter()
        .map(String::as_str)
        .collect::<HashSet<&str>>()
        .intersection(main_links)
        .count();

    (shared as f64 / main_links.len() as f64).min(1.0)
}

/// 1.0 if the (lowercased) text contains the (lowercased) name
fn mentions(text: Option<&str>, name: &str) -> f64 {
    match text {
        Some(text) if text.contains(name) => 1.0,
        _ => 0.0,
    }
}

fn sanitize(similarity: f64) -> f64 {
    if similarity.is_finite() {
        similarity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
