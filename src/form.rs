//! Recent-form strip: last five results, most recent first.

use serde::{Deserialize, Serialize};

use crate::model::{Match, Outcome, TeamId};

pub const FORM_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "-")]
    Missing,
}

impl From<Outcome> for FormResult {
    fn from(o: Outcome) -> Self {
        match o {
            Outcome::Win => FormResult::Win,
            Outcome::Draw => FormResult::Draw,
            Outcome::Loss => FormResult::Loss,
        }
    }
}

impl std::fmt::Display for FormResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            FormResult::Win => "W",
            FormResult::Draw => "D",
            FormResult::Loss => "L",
            FormResult::Missing => "-",
        };
        f.write_str(c)
    }
}

pub type FormSequence = [FormResult; FORM_LEN];

/// Map the first five orientable matches to W/D/L, padding with `-`.
/// The caller passes matches most recent first.
pub fn extract_form(matches: &[Match], team: TeamId) -> FormSequence {
    let mut out = [FormResult::Missing; FORM_LEN];
    let results = matches.iter().filter_map(|m| m.outcome_for(team));
    for (slot, outcome) in out.iter_mut().zip(results) {
        *slot = outcome.into();
    }
    out
}

/// Compact string like `"WWDL-"`.
pub fn form_string(seq: &FormSequence) -> String {
    seq.iter().map(ToString::to_string).collect()
}
