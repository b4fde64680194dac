//! # Match Scorer
//! Pure, testable logic that maps `(home stats, away stats, h2h, league)` →
//! `MatchAnalysis`. No I/O.
//!
//! Weighted linear heuristic: recent form carries half of each side's
//! strength, head-to-head share 30%, and the home side alone gets a
//! league-specific home-advantage term worth 20%. Strengths are normalised
//! into win probabilities; the draw is whatever is left.

use crate::analysis::{MatchAnalysis, Probabilities, Recommendation};
use crate::h2h::H2hTally;
use crate::home_advantage::HomeAdvantageTable;
use crate::model::LeagueId;
use crate::team_stats::TeamStats;

const W_FORM: f64 = 0.5;
const W_H2H: f64 = 0.3;
const W_HOME_ADV: f64 = 0.2;

/// Lead (in percentage points) needed for a decisive call.
const DECISIVE_MARGIN: f64 = 15.0;
/// Minimum probability for a decisive call.
const DECISIVE_FLOOR: f64 = 45.0;
const DECISIVE_CAP: f64 = 95.0;

const DRAW_FLOOR: f64 = 35.0;
const DRAW_MAX_GAP: f64 = 10.0;
const DRAW_CAP: f64 = 90.0;

/// Both strengths zero: home and away get the same share, the draw the rest
/// (30/40/30).
const NEUTRAL_WIN: f64 = 30.0;

const HEAVY_SCORING_GOALS: f64 = 2.0;
const LEAKY_DEFENCE_GOALS: f64 = 1.5;

/// Intermediate, unrounded values. Exposed for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strengths {
    pub home: f64,
    pub away: f64,
    pub home_win: f64,
    pub away_win: f64,
    pub draw: f64,
}

/// `winRate*0.3 + (100 - lossRate)*0.2`.
pub fn form_score(stats: &TeamStats) -> f64 {
    f64::from(stats.win_rate) * 0.3 + (100.0 - f64::from(stats.loss_rate)) * 0.2
}

/// Strengths and unrounded probabilities for a fixture.
pub fn strengths(home: &TeamStats, away: &TeamStats, h2h: &H2hTally, home_advantage: f64) -> Strengths {
    let total = f64::from(h2h.total().max(1));
    let home_share = f64::from(h2h.home_wins) / total;
    let away_share = f64::from(h2h.away_wins) / total;

    let home_strength =
        form_score(home) * W_FORM + home_share * 100.0 * W_H2H + home_advantage * 100.0 * W_HOME_ADV;
    let away_strength = form_score(away) * W_FORM + away_share * 100.0 * W_H2H;

    let denom = home_strength + away_strength;
    let (home_win, away_win) = if denom > 0.0 {
        (home_strength / denom * 100.0, away_strength / denom * 100.0)
    } else {
        (NEUTRAL_WIN, NEUTRAL_WIN)
    };

    Strengths {
        home: home_strength,
        away: away_strength,
        home_win,
        away_win,
        draw: 100.0 - home_win - away_win,
    }
}

/// Score a fixture. `table` supplies the league's home advantage.
pub fn score(
    home: &TeamStats,
    away: &TeamStats,
    h2h: &H2hTally,
    league: LeagueId,
    table: &HomeAdvantageTable,
) -> MatchAnalysis {
    let s = strengths(home, away, h2h, table.for_league(league));
    let (hw, aw, dr) = (s.home_win, s.away_win, s.draw);

    let (recommendation, confidence, advice) =
        if hw > aw + DECISIVE_MARGIN && hw > DECISIVE_FLOOR {
            (
                Recommendation::HomeWin,
                hw.min(DECISIVE_CAP),
                "Home side in clearly better form and backed by home advantage.",
            )
        } else if aw > hw + DECISIVE_MARGIN && aw > DECISIVE_FLOOR {
            (
                Recommendation::AwayWin,
                aw.min(DECISIVE_CAP),
                "Away side's form is strong enough to overcome playing on the road.",
            )
        } else if dr > DRAW_FLOOR && (hw - aw).abs() < DRAW_MAX_GAP {
            (
                Recommendation::Draw,
                dr.min(DRAW_CAP),
                "Evenly matched sides with balanced form; a draw is the likeliest result.",
            )
        } else if hw >= aw {
            (
                Recommendation::HomeWin,
                hw,
                "Home side holds a slight edge, but this one could go either way.",
            )
        } else {
            (
                Recommendation::AwayWin,
                aw,
                "Away side holds a slight edge, but this one could go either way.",
            )
        };

    // Draw is derived from the rounded sides so the three always sum to 100.
    let (home_pct, away_pct) = (hw.round() as i32, aw.round() as i32);
    let mut analysis = MatchAnalysis::new(recommendation, to_pct(confidence))
        .with_advice(advice)
        .with_probabilities(Probabilities {
            home: home_pct,
            draw: 100 - home_pct - away_pct,
            away: away_pct,
        });

    if home.goals_scored > HEAVY_SCORING_GOALS {
        analysis = analysis.with_note(&format!(
            "Home side scores heavily ({:.1} goals per game).",
            home.goals_scored
        ));
    }
    if away.goals_conceded > LEAKY_DEFENCE_GOALS {
        analysis = analysis.with_note(&format!(
            "Away defence is leaky ({:.1} conceded per game).",
            away.goals_conceded
        ));
    }
    if h2h.home_wins > 2 * h2h.away_wins {
        analysis = analysis.with_note(&format!(
            "Home side dominates the head-to-head record ({}-{}-{}).",
            h2h.home_wins, h2h.draws, h2h.away_wins
        ));
    }

    analysis
}

/// Round to an integer percentage in 0..=100.
fn to_pct(x: f64) -> u32 {
    x.round().clamp(0.0, 100.0) as u32
}
