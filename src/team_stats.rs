//! # Team Stats
//! Reduces a team's recent matches to rate statistics consumed by the scorer.
//!
//! Rates are integer percentages, each rounded on its own, so W/D/L may add up
//! to 99 or 101. Matches the team did not play in (or whose ids are missing)
//! are skipped entirely.

use serde::{Deserialize, Serialize};

use crate::model::{Match, Outcome, TeamId};

/// Aggregate form of one team over its recent matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    /// Mean goals scored per match, one decimal.
    pub goals_scored: f64,
    /// Mean goals conceded per match, one decimal.
    pub goals_conceded: f64,
    pub win_rate: u32,
    pub draw_rate: u32,
    pub loss_rate: u32,
    pub clean_sheet_rate: u32,
    /// Both teams scored.
    pub btts_rate: u32,
    pub avg_corners: u32,
    /// Yellow + red per match, one decimal.
    pub avg_cards: f64,
    /// Number of matches the aggregate was computed over.
    pub form_matches: u32,
}

/// Sums are `u64` so any number of `u32` wire values fit.
#[derive(Debug, Default)]
struct Totals {
    matches: u32,
    goals_for: u64,
    goals_against: u64,
    wins: u32,
    draws: u32,
    losses: u32,
    clean_sheets: u32,
    btts: u32,
    corners: u64,
    cards: u64,
}

/// Aggregate `matches` from the point of view of `team`.
pub fn aggregate(matches: &[Match], team: TeamId) -> TeamStats {
    let mut t = Totals::default();

    for m in matches {
        let Some((gf, ga)) = m.goals_for_against(team) else {
            continue;
        };
        let Some(outcome) = m.outcome_for(team) else {
            continue;
        };

        t.matches += 1;
        t.goals_for += u64::from(gf);
        t.goals_against += u64::from(ga);
        match outcome {
            Outcome::Win => t.wins += 1,
            Outcome::Draw => t.draws += 1,
            Outcome::Loss => t.losses += 1,
        }
        if ga == 0 {
            t.clean_sheets += 1;
        }
        if gf > 0 && ga > 0 {
            t.btts += 1;
        }
        let stats = m.statistics();
        t.corners += u64::from(stats.corners());
        t.cards += u64::from(stats.cards());
    }

    if t.matches == 0 {
        return TeamStats::default();
    }

    let n = f64::from(t.matches);
    TeamStats {
        goals_scored: round1(t.goals_for as f64 / n),
        goals_conceded: round1(t.goals_against as f64 / n),
        win_rate: pct(t.wins, t.matches),
        draw_rate: pct(t.draws, t.matches),
        loss_rate: pct(t.losses, t.matches),
        clean_sheet_rate: pct(t.clean_sheets, t.matches),
        btts_rate: pct(t.btts, t.matches),
        avg_corners: (t.corners as f64 / n).round() as u32,
        avg_cards: round1(t.cards as f64 / n),
        form_matches: t.matches,
    }
}

/// `round(count / total * 100)`; caller guarantees `total > 0`.
fn pct(count: u32, total: u32) -> u32 {
    (f64::from(count) / f64::from(total) * 100.0).round() as u32
}

/// Round to one decimal place.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
