// src/source/snapshot.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{Match, TeamId};
use crate::source::types::MatchSource;

/// Head-to-head history for one pair of teams.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct H2hEntry {
    pub home_id: TeamId,
    pub away_id: TeamId,
    #[serde(default)]
    pub matches: Vec<Match>,
}

/// Provider data captured ahead of time: team forms keyed by team id plus
/// head-to-head lists per pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData {
    #[serde(default)]
    pub forms: HashMap<TeamId, Vec<Match>>,
    #[serde(default)]
    pub h2h: Vec<H2hEntry>,
}

/// In-memory source over a [`SnapshotData`]. Unknown teams or pairs yield
/// empty lists, never errors.
#[derive(Debug, Clone, Default)]
pub struct StaticMatchSource {
    data: SnapshotData,
}

impl StaticMatchSource {
    pub fn new(data: SnapshotData) -> Self {
        Self { data }
    }

    /// Parse a JSON snapshot (same shape as [`SnapshotData`]).
    pub fn from_fixture(content: &str) -> Result<Self> {
        let data: SnapshotData =
            serde_json::from_str(content).context("parsing match snapshot json")?;
        Ok(Self::new(data))
    }

    pub fn with_form(mut self, team: TeamId, matches: Vec<Match>) -> Self {
        self.data.forms.insert(team, matches);
        self
    }

    pub fn with_h2h(mut self, home: TeamId, away: TeamId, matches: Vec<Match>) -> Self {
        self.data.h2h.push(H2hEntry {
            home_id: home,
            away_id: away,
            matches,
        });
        self
    }
}

#[async_trait]
impl MatchSource for StaticMatchSource {
    async fn team_form(&self, team: TeamId, last: usize) -> Result<Vec<Match>> {
        Ok(self
            .data
            .forms
            .get(&team)
            .map(|v| v.iter().take(last).cloned().collect())
            .unwrap_or_default())
    }

    async fn head_to_head(&self, home: TeamId, away: TeamId, last: usize) -> Result<Vec<Match>> {
        // Pairs are unordered: a meeting is the same whoever hosted it.
        let entry = self.data.h2h.iter().find(|e| {
            (e.home_id == home && e.away_id == away) || (e.home_id == away && e.away_id == home)
        });
        Ok(entry
            .map(|e| e.matches.iter().take(last).cloned().collect())
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "Snapshot"
    }
}
