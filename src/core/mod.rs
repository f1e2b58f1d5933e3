pub mod entity;
pub mod ranked_entity;

pub use entity::{EntityData, EntityRecord};
pub use ranked_entity::{RankedEntities, RankedEntity};
