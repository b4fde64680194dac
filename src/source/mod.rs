// src/source/mod.rs
//! Match data sources. Fetching from the remote provider lives outside this
//! crate; here we only have the trait and an in-memory snapshot.

pub mod snapshot;
pub mod types;

pub use snapshot::{H2hEntry, SnapshotData, StaticMatchSource};
pub use types::{MatchSource, DEFAULT_LAST_N};
