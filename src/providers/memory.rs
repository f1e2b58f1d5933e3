use async_trait::async_trait;
use std::collections::HashMap;

use crate::core::EntityRecord;
use crate::error::{ExplorerError, Result};
use crate::providers::EntityResolver;

/// Resolver over a fixed set of records (fixtures, offline exploration)
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    entities: HashMap<String, EntityRecord>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: EntityRecord) {
        self.entities.insert(entity.identifier.clone(), entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<EntityRecord> for InMemoryResolver {
    fn from_iter<I: IntoIterator<Item = EntityRecord>>(iter: I) -> Self {
        let mut resolver = Self::new();
        for entity in iter {
            resolver.insert(entity);
        }
        resolver
    }
}

#[async_trait]
impl EntityResolver for InMemoryResolver {
    async fn resolve(&self, identifier: &str) -> Result<EntityRecord> {
        if identifier.trim().is_empty() {
            return Err(ExplorerError::invalid_input("entity identifier is missing"));
        }

        self.entities
            .get(identifier)
            .cloned()
            .ok_or_else(|| ExplorerError::NotFound(identifier.to_string()))
    }

    fn name(&self) -> &str {
        "memory"
    }

    async fn is_available(&self) -> bool {
        true
    }
}
