//! # DBpedia Explorer
//!
//! Backend of a visual knowledge-graph explorer:
//! - Entity lookup against a DBpedia SPARQL endpoint
//! - Concurrent fan-out over an entity's `seeAlso` links
//! - Relevance ranking (TF-IDF similarity, shared links, co-mentions)
//! - Layout hints (card size, distance from center) for the frontend
//! - Interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dbpedia_explorer::{Explorer, Settings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let explorer = Explorer::from_settings(&Settings::default())?;
//!
//!     for entity in explorer.explore("Paris").await? {
//!         println!("{} - {:.2}", entity.identifier(), entity.relevance);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod explorer;
pub mod providers;
pub mod ranking;

#[cfg(feature = "server")]
pub mod api;

// Re-export primary types
pub use config::Settings;
pub use core::{EntityData, EntityRecord, RankedEntities, RankedEntity};
pub use error::{ExplorerError, Result};
pub use explorer::Explorer;
pub use ranking::{RelevanceEngine, RelevanceSignals, SimilarityOracle, TfIdfOracle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
