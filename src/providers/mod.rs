pub mod dbpedia;
pub mod memory;

use async_trait::async_trait;
use crate::core::EntityRecord;
use crate::error::Result;

pub use dbpedia::DbpediaResolver;
pub use memory::InMemoryResolver;

/// Trait for entity data sources (DBpedia SPARQL, fixtures, ...)
#[async_trait]
pub trait EntityResolver: Send + Sync {
    /// Look up comment, seeAlso links and thumbnail for an entity
    async fn resolve(&self, identifier: &str) -> Result<EntityRecord>;

    /// Get resolver name
    fn name(&self) -> &str;

    /// Check if resolver is available
    async fn is_available(&self) -> bool;
}

/// Entity name from a resource URI (`http://dbpedia.org/resource/Lyon` -> `Lyon`)
pub fn resource_name(uri: &str) -> String {
    let segment = uri.trim_end_matches('/').rsplit('/').next().unwrap_or(uri);
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
