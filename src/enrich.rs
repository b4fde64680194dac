//! # Fixture Enricher
//! Runs the reducers and the scorer for one fixture and assembles the output
//! record. Failures never escape: they become a [`DegradedFixture`] carrying
//! the fixed `DATA UNAVAILABLE` analysis.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::MatchAnalysis;
use crate::form::{extract_form, form_string, FormSequence};
use crate::h2h::{tally, H2hTally};
use crate::home_advantage::HomeAdvantageTable;
use crate::model::{Fixture, FixtureInfo, Goals, League, Match, Odds, TeamId, Teams};
use crate::scorer;
use crate::source::{MatchSource, DEFAULT_LAST_N};
use crate::team_stats::{aggregate, TeamStats};

/// Number of head-to-head meetings listed in the output.
pub const RECENT_H2H: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("fixture {fixture_id}: missing {side} team id")]
    MissingTeamId { fixture_id: u64, side: &'static str },
    #[error("fixture {fixture_id}: home and away are the same team ({team})")]
    SameTeam { fixture_id: u64, team: TeamId },
    #[error("fixture {fixture_id}: {what} unavailable from {source_name}: {cause:#}")]
    Source {
        fixture_id: u64,
        what: &'static str,
        source_name: &'static str,
        cause: anyhow::Error,
    },
    #[error("fixture {fixture_id}: enrichment task aborted: {reason}")]
    Aborted { fixture_id: u64, reason: String },
}

/// Home/away pair of anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sides<T> {
    pub home: T,
    pub away: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct H2hSummary {
    #[serde(flatten)]
    pub tally: H2hTally,
    /// Most recent meetings, newest first.
    pub recent: Vec<Match>,
}

/// Fully analysed fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedFixture {
    pub fixture: FixtureInfo,
    pub league: League,
    pub teams: Teams,
    pub goals: Goals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odds: Option<Odds>,
    pub analysis: MatchAnalysis,
    pub stats: Sides<TeamStats>,
    pub h2h: H2hSummary,
    pub form: Sides<FormSequence>,
}

/// Minimal record used when a fixture could not be analysed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradedFixture {
    pub fixture: FixtureInfo,
    pub league: League,
    pub teams: Teams,
    pub goals: Goals,
    pub analysis: MatchAnalysis,
}

impl DegradedFixture {
    pub fn from_fixture(f: &Fixture) -> Self {
        Self {
            fixture: f.fixture.clone(),
            league: f.league.clone(),
            teams: f.teams.clone(),
            goals: f.goals.clone(),
            analysis: MatchAnalysis::unavailable(),
        }
    }
}

/// Result of enriching one fixture. Serialized as the bare record either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnrichOutcome {
    Enriched(Box<EnrichedFixture>),
    Degraded(DegradedFixture),
}

impl EnrichOutcome {
    pub fn analysis(&self) -> &MatchAnalysis {
        match self {
            EnrichOutcome::Enriched(e) => &e.analysis,
            EnrichOutcome::Degraded(d) => &d.analysis,
        }
    }

    pub fn fixture_id(&self) -> u64 {
        match self {
            EnrichOutcome::Enriched(e) => e.fixture.id,
            EnrichOutcome::Degraded(d) => d.fixture.id,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, EnrichOutcome::Degraded(_))
    }

    /// Log the failure and fall back to the minimal record.
    pub fn degraded(fixture: &Fixture, err: &EnrichError) -> Self {
        warn!(
            target: "enrich",
            fixture_id = fixture.fixture.id,
            league_id = fixture.league.id,
            error = %err,
            "fixture enrichment failed, returning degraded record"
        );
        metrics::counter!("enrich_degraded_total").increment(1);
        EnrichOutcome::Degraded(DegradedFixture::from_fixture(fixture))
    }
}

/// Both team ids, validated.
fn team_ids(fixture: &Fixture) -> Result<(TeamId, TeamId), EnrichError> {
    let fixture_id = fixture.fixture.id;
    let home = fixture.home_id().ok_or(EnrichError::MissingTeamId {
        fixture_id,
        side: "home",
    })?;
    let away = fixture.away_id().ok_or(EnrichError::MissingTeamId {
        fixture_id,
        side: "away",
    })?;
    if home == away {
        return Err(EnrichError::SameTeam {
            fixture_id,
            team: home,
        });
    }
    Ok((home, away))
}

/// Build the full record; fails only on unusable fixture metadata.
pub fn try_enrich(
    fixture: &Fixture,
    home_matches: &[Match],
    away_matches: &[Match],
    h2h_matches: &[Match],
    table: &HomeAdvantageTable,
) -> Result<EnrichedFixture, EnrichError> {
    let (home_id, away_id) = team_ids(fixture)?;

    let home_stats = aggregate(home_matches, home_id);
    let away_stats = aggregate(away_matches, away_id);
    let h2h = tally(h2h_matches, home_id);
    let analysis = scorer::score(&home_stats, &away_stats, &h2h, fixture.league.id, table);
    let home_form = extract_form(home_matches, home_id);
    let away_form = extract_form(away_matches, away_id);

    debug!(
        target: "enrich",
        fixture_id = fixture.fixture.id,
        recommendation = %analysis.recommendation,
        confidence = analysis.confidence,
        home_matches = home_stats.form_matches,
        away_matches = away_stats.form_matches,
        h2h_matches = h2h.total(),
        home_form = %form_string(&home_form),
        away_form = %form_string(&away_form),
        "fixture scored"
    );

    Ok(EnrichedFixture {
        fixture: fixture.fixture.clone(),
        league: fixture.league.clone(),
        teams: fixture.teams.clone(),
        goals: fixture.goals.clone(),
        odds: fixture.odds.clone(),
        analysis,
        stats: Sides {
            home: home_stats,
            away: away_stats,
        },
        h2h: H2hSummary {
            tally: h2h,
            recent: h2h_matches.iter().take(RECENT_H2H).cloned().collect(),
        },
        form: Sides {
            home: home_form,
            away: away_form,
        },
    })
}

/// Enrich one fixture from already-fetched match lists. Never fails.
pub fn enrich(
    fixture: &Fixture,
    home_matches: &[Match],
    away_matches: &[Match],
    h2h_matches: &[Match],
    table: &HomeAdvantageTable,
) -> EnrichOutcome {
    metrics::counter!("enrich_fixtures_total").increment(1);
    match try_enrich(fixture, home_matches, away_matches, h2h_matches, table) {
        Ok(e) => EnrichOutcome::Enriched(Box::new(e)),
        Err(err) => EnrichOutcome::degraded(fixture, &err),
    }
}

/// Fetch the three match lists concurrently, then enrich. Any fetch error
/// degrades this fixture only.
pub async fn enrich_from_source(
    fixture: &Fixture,
    source: &dyn MatchSource,
    table: &HomeAdvantageTable,
) -> EnrichOutcome {
    let (home_id, away_id) = match team_ids(fixture) {
        Ok(ids) => ids,
        Err(err) => {
            metrics::counter!("enrich_fixtures_total").increment(1);
            return EnrichOutcome::degraded(fixture, &err);
        }
    };

    let (h2h, home, away) = tokio::join!(
        source.head_to_head(home_id, away_id, DEFAULT_LAST_N),
        source.team_form(home_id, DEFAULT_LAST_N),
        source.team_form(away_id, DEFAULT_LAST_N),
    );

    let fixture_id = fixture.fixture.id;
    let source_name = source.name();
    let fail = |what: &'static str, cause: anyhow::Error| EnrichError::Source {
        fixture_id,
        what,
        source_name,
        cause,
    };
    let fetched = match (h2h, home, away) {
        (Ok(h2h), Ok(home), Ok(away)) => Ok((h2h, home, away)),
        (Err(e), _, _) => Err(fail("head-to-head", e)),
        (_, Err(e), _) => Err(fail("home form", e)),
        (_, _, Err(e)) => Err(fail("away form", e)),
    };

    match fetched {
        Ok((h2h, home, away)) => enrich(fixture, &home, &away, &h2h, table),
        Err(err) => {
            metrics::counter!("enrich_fixtures_total").increment(1);
            EnrichOutcome::degraded(fixture, &err)
        }
    }
}
