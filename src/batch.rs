//! # Batch
//! Enriches a day's fixtures concurrently: one Tokio task per fixture, no
//! shared mutable state, results put back in input order once every task
//! has finished.
//!
//! Pre-filter: league filter first, then only the first `max_fixtures` are
//! started.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::info;

use crate::config::AppConfig;
use crate::enrich::{enrich_from_source, EnrichError, EnrichOutcome};
use crate::home_advantage::HomeAdvantageTable;
use crate::model::{Fixture, LeagueId};
use crate::source::MatchSource;

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("enrich_fixtures_total", "Fixtures passed to the enricher.");
        describe_counter!(
            "enrich_degraded_total",
            "Fixtures that fell back to the DATA UNAVAILABLE record."
        );
        describe_counter!("enrich_batches_total", "Batches processed.");
        describe_histogram!("enrich_batch_ms", "Batch wall time in milliseconds.");
        describe_gauge!("enrich_last_run_ts", "Unix ts when a batch last completed.");
    });
}

/// Batch limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub max_fixtures: usize,
    /// Empty keeps every league.
    pub leagues: Vec<LeagueId>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_fixtures: 15,
            leagues: Vec::new(),
        }
    }
}

impl BatchOptions {
    pub fn league_allowed(&self, league: LeagueId) -> bool {
        self.leagues.is_empty() || self.leagues.contains(&league)
    }
}

impl From<&AppConfig> for BatchOptions {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            max_fixtures: cfg.max_fixtures,
            leagues: cfg.leagues.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub count: usize,
    pub fixtures: Vec<EnrichOutcome>,
}

impl BatchReport {
    pub fn degraded(&self) -> usize {
        self.fixtures.iter().filter(|f| f.is_degraded()).count()
    }
}

/// Apply the league filter and the cap. Fixtures past the cap are dropped
/// before any work starts.
pub fn select_fixtures(fixtures: Vec<Fixture>, opts: &BatchOptions) -> Vec<Fixture> {
    fixtures
        .into_iter()
        .filter(|f| opts.league_allowed(f.league.id))
        .take(opts.max_fixtures)
        .collect()
}

/// Enrich every selected fixture concurrently.
pub async fn enrich_batch(
    fixtures: Vec<Fixture>,
    source: Arc<dyn MatchSource>,
    table: Arc<HomeAdvantageTable>,
    opts: &BatchOptions,
) -> BatchReport {
    ensure_metrics_described();
    let t0 = Instant::now();

    let selected = select_fixtures(fixtures, opts);
    let mut slots: Vec<Option<EnrichOutcome>> = vec![None; selected.len()];

    let mut set = JoinSet::new();
    for (idx, fixture) in selected.iter().cloned().enumerate() {
        let source = Arc::clone(&source);
        let table = Arc::clone(&table);
        set.spawn(async move {
            let out = enrich_from_source(&fixture, source.as_ref(), &table).await;
            (idx, out)
        });
    }

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, out)) => slots[idx] = Some(out),
            // A panicked task loses its index; the empty slot is filled below.
            Err(e) => tracing::error!(target: "batch", error = %e, "enrichment task failed"),
        }
    }

    let fixtures: Vec<EnrichOutcome> = slots
        .into_iter()
        .zip(selected.iter())
        .map(|(slot, fixture)| {
            slot.unwrap_or_else(|| {
                let err = EnrichError::Aborted {
                    fixture_id: fixture.fixture.id,
                    reason: "task did not complete".to_string(),
                };
                EnrichOutcome::degraded(fixture, &err)
            })
        })
        .collect();

    let report = BatchReport {
        count: fixtures.len(),
        fixtures,
    };

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    counter!("enrich_batches_total").increment(1);
    histogram!("enrich_batch_ms").record(ms);
    gauge!("enrich_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);

    info!(
        target: "batch",
        count = report.count,
        degraded = report.degraded(),
        source = source.name(),
        elapsed_ms = ms,
        "batch enriched"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures(n: u64, league: LeagueId) -> Vec<Fixture> {
        (0..n).map(|i| Fixture::new(i, league, i * 2 + 1, i * 2 + 2)).collect()
    }

    #[test]
    fn cap_is_applied_after_league_filter() {
        let mut all = fixtures(3, 1);
        all.extend(fixtures(20, 39).into_iter().map(|mut f| {
            f.fixture.id += 100;
            f
        }));
        let opts = BatchOptions {
            max_fixtures: 15,
            leagues: vec![39],
        };
        let sel = select_fixtures(all, &opts);
        assert_eq!(sel.len(), 15);
        assert!(sel.iter().all(|f| f.league.id == 39));
        assert_eq!(sel[0].fixture.id, 100);
    }

    #[test]
    fn empty_league_list_keeps_everything() {
        let sel = select_fixtures(fixtures(4, 7), &BatchOptions::default());
        assert_eq!(sel.len(), 4);
    }
}
