//! # Home Advantage
//!
//! League id → home-advantage constant used by the scorer.
//!
//! - Loads from JSON or TOML (picked by file extension, JSON otherwise).
//! - Built-in `default_seed()` covers the top-5 European leagues.
//! - Unlisted leagues fall back to `default_advantage` (0.12).
//!
//! Loaded once at startup and shared read-only afterwards.
//!
//! JSON shape:
//! ```json
//! { "default_advantage": 0.12, "leagues": { "39": 0.15, "140": 0.18 } }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};
use tracing::{info, warn};

use crate::model::LeagueId;

pub const DEFAULT_HOME_ADVANTAGE: f64 = 0.12;
pub const ENV_HOME_ADVANTAGE_PATH: &str = "HOME_ADVANTAGE_PATH";

#[derive(Debug, Clone, Deserialize)]
struct RawTable {
    #[serde(default = "default_advantage")]
    default_advantage: f64,
    /// Keys are league ids as strings (TOML/JSON object keys).
    #[serde(default)]
    leagues: HashMap<String, f64>,
}

fn default_advantage() -> f64 {
    DEFAULT_HOME_ADVANTAGE
}

/// Immutable lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeAdvantageTable {
    default_advantage: f64,
    leagues: HashMap<LeagueId, f64>,
}

impl Default for HomeAdvantageTable {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl HomeAdvantageTable {
    pub fn new(default_advantage: f64, leagues: impl IntoIterator<Item = (LeagueId, f64)>) -> Self {
        Self {
            default_advantage: clamp01(default_advantage),
            leagues: leagues
                .into_iter()
                .map(|(id, v)| (id, clamp01(v)))
                .collect(),
        }
    }

    /// Parse a table from a string; `hint_ext` is `"toml"` or anything else for JSON.
    pub fn parse(content: &str, hint_ext: &str) -> Result<Self> {
        let raw: RawTable = if hint_ext.eq_ignore_ascii_case("toml") {
            toml::from_str(content).context("parsing home advantage toml")?
        } else {
            serde_json::from_str(content).context("parsing home advantage json")?
        };

        let mut leagues = Vec::with_capacity(raw.leagues.len());
        for (k, v) in raw.leagues {
            match k.trim().parse::<LeagueId>() {
                Ok(id) => leagues.push((id, v)),
                Err(_) => warn!(key = %k, "home advantage: skipping non-numeric league id"),
            }
        }
        Ok(Self::new(raw.default_advantage, leagues))
    }

    /// Load from an explicit path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading home advantage table from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        Self::parse(&content, ext)
    }

    /// Load from `$HOME_ADVANTAGE_PATH`, else `path`; falls back to the seed
    /// when neither can be read.
    pub fn load_or_seed<P: AsRef<Path>>(path: P) -> Self {
        let path = std::env::var(ENV_HOME_ADVANTAGE_PATH)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|_| path.as_ref().to_path_buf());

        match Self::load_from_file(&path) {
            Ok(t) => {
                info!(path = %path.display(), leagues = t.leagues.len(), "home advantage table loaded");
                t
            }
            Err(e) => {
                warn!(error = ?e, "home advantage table unavailable, using built-in seed");
                Self::default_seed()
            }
        }
    }

    /// Constant for `league`, or the default for unlisted leagues.
    pub fn for_league(&self, league: LeagueId) -> f64 {
        self.leagues
            .get(&league)
            .copied()
            .unwrap_or(self.default_advantage)
    }

    pub fn default_advantage(&self) -> f64 {
        self.default_advantage
    }

    pub fn len(&self) -> usize {
        self.leagues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leagues.is_empty()
    }

    /// Top-5 European leagues (API-Football ids).
    pub fn default_seed() -> Self {
        Self::new(
            DEFAULT_HOME_ADVANTAGE,
            [
                (39, 0.15),  // Premier League
                (140, 0.18), // La Liga
                (135, 0.16), // Serie A
                (78, 0.14),  // Bundesliga
                (61, 0.10),  // Ligue 1
            ],
        )
    }
}

/// Clamp to [0.0, 1.0]; NaN becomes 0.
fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
