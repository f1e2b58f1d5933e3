use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::core::{EntityRecord, RankedEntity};
use crate::error::Result;
use crate::providers::{resource_name, DbpediaResolver, EntityResolver};
use crate::ranking::RelevanceEngine;

/// Resolves an entity, fans out to its related entities and ranks them
pub struct Explorer {
    resolver: Arc<dyn EntityResolver>,
    engine: RelevanceEngine,
    max_concurrent_fetches: usize,
}

impl Explorer {
    pub fn new(resolver: Arc<dyn EntityResolver>) -> Self {
        Self {
            resolver,
            engine: RelevanceEngine::new(),
            max_concurrent_fetches: Settings::default().max_concurrent_fetches,
        }
    }

    /// Explorer backed by the configured DBpedia endpoint
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let resolver = Arc::new(DbpediaResolver::from_settings(settings)?);
        Ok(Self::new(resolver).with_max_concurrent_fetches(settings.max_concurrent_fetches))
    }

    pub fn with_engine(mut self, engine: RelevanceEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    pub fn resolver_name(&self) -> &str {
        self.resolver.name()
    }

    pub async fn is_available(&self) -> bool {
        self.resolver.is_available().await
    }

    /// Resolve a single entity
    pub async fn entity(&self, identifier: &str) -> Result<EntityRecord> {
        self.resolver.resolve(identifier).await
    }

    /// Resolve every seeAlso link of `main` and rank the results around it
    ///
    /// A link that fails to resolve becomes an empty record instead of failing the batch.
    pub async fn related(&self, main: EntityRecord) -> Result<Vec<RankedEntity>> {
        main.validate()?;
        let start = Instant::now();

        let names: Vec<String> = main.see_also().iter().filter_map(|uri| link_identifier(uri)).collect();

        let candidates: Vec<EntityRecord> = stream::iter(names)
            .map(|name| async move {
                match self.resolver.resolve(&name).await {
                    Ok(entity) => entity,
                    Err(e) => {
                        tracing::warn!("Resolver {} failed for '{}': {}", self.resolver.name(), name, e);
                        EntityRecord::new(name)
                    }
                }
            })
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await;

        let fetched = candidates.len();
        let ranked = self.engine.rank(main, candidates)?;

        tracing::info!(
            "Ranked {} related entities in {:.2}ms",
            fetched,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(ranked)
    }

    /// Resolve an entity and rank its related entities
    pub async fn explore(&self, identifier: &str) -> Result<Vec<RankedEntity>> {
        let main = self.entity(identifier).await?;
        self.related(main).await
    }
}

/// Identifier to resolve for a seeAlso link; the raw link when its name is blank
fn link_identifier(uri: &str) -> Option<String> {
    let name = resource_name(uri);
    if !name.trim().is_empty() {
        return Some(name);
    }

    let raw = uri.trim();
    if raw.is_empty() {
        tracing::warn!("Skipping blank seeAlso link");
        None
    } else {
        Some(raw.to_string())
    }
}
