use serde::{Deserialize, Serialize};

use crate::core::EntityRecord;

/// Smallest card rendered by the explorer
pub const MIN_CARD_SIZE: f64 = 50.0;
/// Card size of the main entity
pub const MAX_CARD_SIZE: f64 = 100.0;
/// Distance of an entity with zero relevance
pub const MAX_DISTANCE: f64 = 100.0;

/// Card size for a relevance score (50-100 range)
pub fn card_size(relevance: f64) -> f64 {
    MIN_CARD_SIZE + relevance * (MAX_CARD_SIZE - MIN_CARD_SIZE)
}

/// Distance from center for a relevance score (0-100 range, 0 being closest)
pub fn distance(relevance: f64) -> f64 {
    MAX_DISTANCE - relevance * MAX_DISTANCE
}

/// Entity annotated with its relevance and layout hints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEntity {
    #[serde(flatten)]
    pub entity: EntityRecord,

    /// Composite relevance (0.0 - 1.0)
    pub relevance: f64,

    /// Relative card size (50.0 - 100.0)
    pub card_size: f64,

    /// Distance from the center of the layout (0.0 - 100.0)
    pub distance: f64,
}

impl RankedEntity {
    /// Attach layout hints derived from `relevance`
    pub fn new(entity: EntityRecord, relevance: f64) -> Self {
        Self {
            entity,
            relevance,
            card_size: card_size(relevance),
            distance: distance(relevance),
        }
    }

    /// The entity the layout is centered on
    pub fn main(entity: EntityRecord) -> Self {
        Self {
            entity,
            relevance: 1.0,
            card_size: MAX_CARD_SIZE,
            distance: 0.0,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.entity.identifier
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "{} - relevance {:.3} (size {:.1}, distance {:.1})",
            self.entity.identifier, self.relevance, self.card_size, self.distance
        )
    }
}

/// Response body of the related-entities endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntities {
    pub entities: Vec<RankedEntity>,
}

impl From<Vec<RankedEntity>> for RankedEntities {
    fn from(entities: Vec<RankedEntity>) -> Self {
        Self { entities }
    }
}
