// src/source/types.rs
use anyhow::Result;

use crate::model::{Match, TeamId};

/// How many recent matches each call asks for.
pub const DEFAULT_LAST_N: usize = 10;

/// External collaborator that supplies raw match lists for a fixture.
/// Implementations return matches most recent first.
#[async_trait::async_trait]
pub trait MatchSource: Send + Sync {
    /// Last `last` matches played by `team`.
    async fn team_form(&self, team: TeamId, last: usize) -> Result<Vec<Match>>;
    /// Last `last` meetings between the two teams, regardless of venue.
    async fn head_to_head(&self, home: TeamId, away: TeamId, last: usize) -> Result<Vec<Match>>;
    fn name(&self) -> &'static str;
}
