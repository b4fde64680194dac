//! Wire-level input types: matches and fixture metadata as a provider
//! (API-Football style) hands them over.
//!
//! Every numeric field is optional on the wire. Accessors resolve missing
//! goals/statistics to zero; missing team ids stay `None` so callers can
//! tell an unorientable match apart from a real one.

use serde::{Deserialize, Serialize};

pub type TeamId = u64;
pub type LeagueId = u64;

/// Per-match box-score extras. Absent values count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corners: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yellow_cards: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_cards: Option<u32>,
}

impl MatchStatistics {
    pub fn corners(&self) -> u32 {
        self.corners.unwrap_or(0)
    }

    /// Yellow + red, saturating on absurd provider values.
    pub fn cards(&self) -> u32 {
        self.yellow_cards
            .unwrap_or(0)
            .saturating_add(self.red_cards.unwrap_or(0))
    }
}

/// One played match, seen from no particular side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub home_team_id: Option<TeamId>,
    #[serde(default)]
    pub away_team_id: Option<TeamId>,
    #[serde(default)]
    pub home_goals: Option<u32>,
    #[serde(default)]
    pub away_goals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<MatchStatistics>,
}

/// Which side of a match a given team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Single-match result from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

/// Who won a match, independent of any fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Team(TeamId),
    Draw,
    /// Decisive result, but the winning side has no id.
    Unknown,
}

impl Match {
    /// Convenience constructor for a fully populated match without extras.
    pub fn new(home: TeamId, away: TeamId, home_goals: u32, away_goals: u32) -> Self {
        Self {
            home_team_id: Some(home),
            away_team_id: Some(away),
            home_goals: Some(home_goals),
            away_goals: Some(away_goals),
            ..Self::default()
        }
    }

    pub fn with_statistics(mut self, corners: u32, yellow: u32, red: u32) -> Self {
        self.statistics = Some(MatchStatistics {
            corners: Some(corners),
            yellow_cards: Some(yellow),
            red_cards: Some(red),
        });
        self
    }

    pub fn home_goals(&self) -> u32 {
        self.home_goals.unwrap_or(0)
    }

    pub fn away_goals(&self) -> u32 {
        self.away_goals.unwrap_or(0)
    }

    /// `None` when `team` is on neither side (including missing ids).
    pub fn side_of(&self, team: TeamId) -> Option<Side> {
        if self.home_team_id == Some(team) {
            Some(Side::Home)
        } else if self.away_team_id == Some(team) {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// `(goals_for, goals_against)` for `team`, if it played in this match.
    pub fn goals_for_against(&self, team: TeamId) -> Option<(u32, u32)> {
        self.side_of(team).map(|side| match side {
            Side::Home => (self.home_goals(), self.away_goals()),
            Side::Away => (self.away_goals(), self.home_goals()),
        })
    }

    pub fn outcome_for(&self, team: TeamId) -> Option<Outcome> {
        self.goals_for_against(team).map(|(gf, ga)| match gf.cmp(&ga) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        })
    }

    pub fn winner(&self) -> Winner {
        let id = match self.home_goals().cmp(&self.away_goals()) {
            std::cmp::Ordering::Equal => return Winner::Draw,
            std::cmp::Ordering::Greater => self.home_team_id,
            std::cmp::Ordering::Less => self.away_team_id,
        };
        id.map_or(Winner::Unknown, Winner::Team)
    }

    pub fn statistics(&self) -> MatchStatistics {
        self.statistics.clone().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Fixture metadata (passed through to the output untouched)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureInfo {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FixtureStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Missing ids make the fixture impossible to analyse.
    #[serde(default)]
    pub id: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teams {
    pub home: Team,
    pub away: Team,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default)]
    pub home: Option<u32>,
    #[serde(default)]
    pub away: Option<u32>,
}

/// Decimal 1X2 odds, when the provider has them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away: Option<f64>,
}

/// A scheduled fixture with its league and team metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub fixture: FixtureInfo,
    pub league: League,
    pub teams: Teams,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odds: Option<Odds>,
}

impl Fixture {
    /// Minimal fixture, mostly for tests and demos.
    pub fn new(id: u64, league_id: LeagueId, home: TeamId, away: TeamId) -> Self {
        Self {
            fixture: FixtureInfo {
                id,
                ..FixtureInfo::default()
            },
            league: League {
                id: league_id,
                ..League::default()
            },
            teams: Teams {
                home: Team {
                    id: Some(home),
                    ..Team::default()
                },
                away: Team {
                    id: Some(away),
                    ..Team::default()
                },
            },
            goals: Goals::default(),
            odds: None,
        }
    }

    pub fn home_id(&self) -> Option<TeamId> {
        self.teams.home.id
    }

    pub fn away_id(&self) -> Option<TeamId> {
        self.teams.away.id
    }
}
