//! Output shape of the scorer: recommendation + confidence +
//! probabilities + human-readable advice.

use serde::{Deserialize, Serialize};

/// Recommended outcome for a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "HOME WIN")]
    HomeWin,
    #[serde(rename = "DRAW")]
    Draw,
    #[serde(rename = "AWAY WIN")]
    AwayWin,
    #[serde(rename = "DATA UNAVAILABLE")]
    DataUnavailable,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::HomeWin => "HOME WIN",
            Recommendation::Draw => "DRAW",
            Recommendation::AwayWin => "AWAY WIN",
            Recommendation::DataUnavailable => "DATA UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Integer percentages. `draw` is derived as `100 - home - away` before
/// rounding, so it can be negative for degenerate inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probabilities {
    pub home: i32,
    pub draw: i32,
    pub away: i32,
}

/// Complete analysis for one fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub recommendation: Recommendation,
    /// 0–100, heuristic, not a calibrated probability.
    pub confidence: u32,
    pub advice: String,
    pub probabilities: Probabilities,
}

pub const UNAVAILABLE_ADVICE: &str = "Insufficient data to analyse this fixture.";

impl MatchAnalysis {
    pub fn new(recommendation: Recommendation, confidence: u32) -> Self {
        Self {
            recommendation,
            confidence: confidence.min(100),
            advice: String::new(),
            probabilities: Probabilities::default(),
        }
    }

    /// Fixed analysis attached to degraded fixtures.
    pub fn unavailable() -> Self {
        Self::new(Recommendation::DataUnavailable, 0).with_advice(UNAVAILABLE_ADVICE)
    }

    pub fn with_advice(mut self, advice: impl Into<String>) -> Self {
        self.advice = advice.into();
        self
    }

    /// Append one more sentence to the advice (builder style).
    pub fn with_note(mut self, note: &str) -> Self {
        if !self.advice.is_empty() {
            self.advice.push(' ');
        }
        self.advice.push_str(note);
        self
    }

    pub fn with_probabilities(mut self, p: Probabilities) -> Self {
        self.probabilities = p;
        self
    }
}
