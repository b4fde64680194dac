// src/config/app.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

use crate::model::LeagueId;

pub const ENV_CONFIG_PATH: &str = "FIXTURE_CONFIG_PATH";
const ENV_MAX_FIXTURES: &str = "FIXTURE_MAX_FIXTURES";
const ENV_LEAGUES: &str = "FIXTURE_LEAGUES";
const ENV_BIND_ADDR: &str = "BIND_ADDR";

const DEFAULT_CONFIG_PATH: &str = "config/app.toml";

fn default_max_fixtures() -> usize {
    15
}
fn default_home_advantage_path() -> String {
    "config/home_advantage.json".to_string()
}
fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Only the first N fixtures of a batch are enriched.
    #[serde(default = "default_max_fixtures")]
    pub max_fixtures: usize,
    /// League ids to keep; empty keeps all.
    #[serde(default)]
    pub leagues: Vec<LeagueId>,
    #[serde(default = "default_home_advantage_path")]
    pub home_advantage_path: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_fixtures: default_max_fixtures(),
            leagues: Vec::new(),
            home_advantage_path: default_home_advantage_path(),
            bind_addr: default_bind_addr(),
        }
    }
}

impl AppConfig {
    pub fn parse(s: &str) -> Result<Self> {
        let mut cfg: AppConfig = toml::from_str(s).context("parsing app config toml")?;
        cfg.sanitize();
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading app config from {}", path.display()))?;
        Self::parse(&content)
    }

    /// Load using env var + fallbacks, then apply env overrides:
    /// 1) $FIXTURE_CONFIG_PATH (must exist)
    /// 2) config/app.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if p.exists() {
                Self::load_from(&p)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env()?;
        Ok(cfg)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(v) = env::var(ENV_MAX_FIXTURES) {
            self.max_fixtures = v
                .trim()
                .parse()
                .with_context(|| format!("{ENV_MAX_FIXTURES} must be a number, got {v:?}"))?;
        }
        if let Ok(v) = env::var(ENV_LEAGUES) {
            self.leagues = parse_league_list(&v)?;
        }
        if let Ok(v) = env::var(ENV_BIND_ADDR) {
            if !v.trim().is_empty() {
                self.bind_addr = v.trim().to_string();
            }
        }
        self.sanitize();
        Ok(())
    }

    fn sanitize(&mut self) {
        if self.max_fixtures == 0 {
            self.max_fixtures = default_max_fixtures();
        }
        self.leagues.sort_unstable();
        self.leagues.dedup();
    }
}

/// Comma separated ids, blanks ignored: `"39, 140,,61"`.
fn parse_league_list(s: &str) -> Result<Vec<LeagueId>> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<LeagueId>()
                .with_context(|| format!("invalid league id {t:?}"))
        })
        .collect()
}
