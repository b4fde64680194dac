// tests/batch_fallback.rs
//
// Batch enrichment with a mock source: one team's form fetch fails, and only
// the fixture involving that team degrades.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use fixture_insights::batch::{enrich_batch, BatchOptions};
use fixture_insights::enrich::enrich_from_source;
use fixture_insights::model::{Fixture, Match, TeamId};
use fixture_insights::source::{MatchSource, StaticMatchSource};
use fixture_insights::{EnrichOutcome, HomeAdvantageTable, Recommendation};

const BROKEN_TEAM: TeamId = 666;

struct FlakySource {
    calls: AtomicUsize,
}

#[async_trait]
impl MatchSource for FlakySource {
    async fn team_form(&self, team: TeamId, _last: usize) -> Result<Vec<Match>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if team == BROKEN_TEAM {
            bail!("upstream returned 500 for team {team}");
        }
        // Later fixtures answer faster, so completion order differs from input order.
        tokio::time::sleep(Duration::from_millis(team % 7 * 5)).await;
        Ok(vec![Match::new(team, 9_999, 2, 0), Match::new(9_998, team, 1, 1)])
    }

    async fn head_to_head(&self, home: TeamId, away: TeamId, _last: usize) -> Result<Vec<Match>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Match::new(home, away, 1, 0)])
    }

    fn name(&self) -> &'static str {
        "Flaky"
    }
}

fn flaky() -> Arc<FlakySource> {
    Arc::new(FlakySource {
        calls: AtomicUsize::new(0),
    })
}

fn table() -> Arc<HomeAdvantageTable> {
    Arc::new(HomeAdvantageTable::default_seed())
}

#[tokio::test]
async fn failing_team_degrades_only_its_fixture() {
    let fixtures = vec![
        Fixture::new(1, 39, 10, 11),
        Fixture::new(2, 39, 12, BROKEN_TEAM),
        Fixture::new(3, 140, 13, 14),
    ];

    let report = enrich_batch(fixtures, flaky(), table(), &BatchOptions::default()).await;

    assert_eq!(report.count, 3);
    assert_eq!(report.degraded(), 1);
    let ids: Vec<u64> = report.fixtures.iter().map(EnrichOutcome::fixture_id).collect();
    assert_eq!(ids, vec![1, 2, 3], "results must keep input order");

    let broken = report.fixtures[1].analysis();
    assert_eq!(broken.recommendation, Recommendation::DataUnavailable);
    assert_eq!(broken.confidence, 0);

    for i in [0, 2] {
        assert!(!report.fixtures[i].is_degraded());
        assert_ne!(
            report.fixtures[i].analysis().recommendation,
            Recommendation::DataUnavailable
        );
    }
}

#[tokio::test]
async fn fixtures_past_the_cap_are_never_started() {
    let source = flaky();
    let fixtures: Vec<Fixture> = (0..20).map(|i| Fixture::new(i, 39, 100 + i * 2, 101 + i * 2)).collect();
    let opts = BatchOptions {
        max_fixtures: 15,
        leagues: vec![],
    };

    let report = enrich_batch(fixtures, source.clone(), table(), &opts).await;

    assert_eq!(report.count, 15);
    assert_eq!(report.fixtures.last().map(EnrichOutcome::fixture_id), Some(14));
    // Three source calls per started fixture.
    assert_eq!(source.calls.load(Ordering::SeqCst), 15 * 3);
}

#[tokio::test]
async fn league_filter_applies_before_cap() {
    let fixtures = vec![
        Fixture::new(1, 39, 1, 2),
        Fixture::new(2, 2, 3, 4),
        Fixture::new(3, 39, 5, 6),
    ];
    let opts = BatchOptions {
        max_fixtures: 15,
        leagues: vec![39],
    };
    let report = enrich_batch(fixtures, flaky(), table(), &opts).await;
    let ids: Vec<u64> = report.fixtures.iter().map(EnrichOutcome::fixture_id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn empty_source_still_enriches() {
    let source = StaticMatchSource::default();
    let out = enrich_from_source(&Fixture::new(9, 78, 1, 2), &source, &HomeAdvantageTable::default()).await;
    let EnrichOutcome::Enriched(e) = out else {
        panic!("empty upstream data is not an error");
    };
    assert_eq!(e.stats.home.form_matches, 0);
    assert_eq!(e.h2h.tally.home_wins + e.h2h.tally.away_wins + e.h2h.tally.draws, 0);
}

#[tokio::test]
async fn fixture_without_team_ids_skips_the_source() {
    let source = flaky();
    let mut f = Fixture::new(5, 39, 1, 2);
    f.teams.home.id = None;
    let out = enrich_from_source(&f, source.as_ref(), &HomeAdvantageTable::default()).await;
    assert!(out.is_degraded());
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}
