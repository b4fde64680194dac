//! Head-to-head tally relative to the fixture being analysed.
//!
//! A historical win counts as a "home win" when the winner is the home team of
//! *this* fixture, whichever side it played on back then.

use serde::{Deserialize, Serialize};

use crate::model::{Match, TeamId, Winner};

/// Only the most recent meetings are considered.
pub const H2H_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct H2hTally {
    pub home_wins: u32,
    pub away_wins: u32,
    pub draws: u32,
}

impl H2hTally {
    pub fn total(&self) -> u32 {
        self.home_wins + self.away_wins + self.draws
    }
}

/// Tally up to the first [`H2H_WINDOW`] matches for the fixture whose home
/// team is `home_team`. Decisive matches with an unidentifiable winner are
/// ignored.
pub fn tally(matches: &[Match], home_team: TeamId) -> H2hTally {
    let mut t = H2hTally::default();
    for m in matches.iter().take(H2H_WINDOW) {
        match m.winner() {
            Winner::Draw => t.draws += 1,
            Winner::Team(id) if id == home_team => t.home_wins += 1,
            Winner::Team(_) => t.away_wins += 1,
            Winner::Unknown => {}
        }
    }
    t
}
