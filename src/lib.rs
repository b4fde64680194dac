// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod analysis;
pub mod api;
pub mod batch;
pub mod config;
pub mod enrich;
pub mod form;
pub mod h2h;
pub mod home_advantage;
pub mod metrics;
pub mod model;
pub mod scorer;
pub mod source;
pub mod team_stats;

// ---- Re-exports for stable public API ----
pub use crate::analysis::{MatchAnalysis, Probabilities, Recommendation};
pub use crate::api::{create_router, AppState};
pub use crate::enrich::{enrich, enrich_from_source, EnrichOutcome, EnrichedFixture};
pub use crate::home_advantage::HomeAdvantageTable;
pub use crate::model::{Fixture, Match};
