use serde::{Deserialize, Serialize};

use crate::models::{Outcome, Result, ScorerError};

/// Per-event magnitude the 0-100 scale is anchored to for trainings.
pub const TRAINING_ANCHOR: f64 = 1.0;
/// Per-event magnitude the 0-100 scale is anchored to for matches.
pub const MATCH_ANCHOR: f64 = 2.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub training_on_time: f64,
    pub training_late: f64,
    pub training_absent: f64,
    pub training_no_response: f64,
    pub match_on_time: f64,
    pub match_late: f64,
    pub match_absent: f64,
    pub match_no_response: f64,
    /// Added once when at least one MVP award was received.
    pub mvp_bonus_once: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            training_on_time: TRAINING_ANCHOR,
            training_late: 0.5,
            training_absent: -TRAINING_ANCHOR,
            training_no_response: -1.5,
            match_on_time: MATCH_ANCHOR,
            match_late: 1.5,
            match_absent: -MATCH_ANCHOR,
            match_no_response: -3.0,
            mvp_bonus_once: 3.0,
        }
    }
}

impl ScoringWeights {
    pub fn weight_for(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::TrainingOnTime => self.training_on_time,
            Outcome::TrainingLate => self.training_late,
            Outcome::TrainingAbsent => self.training_absent,
            Outcome::TrainingNoResponse => self.training_no_response,
            Outcome::MatchOnTime => self.match_on_time,
            Outcome::MatchLate => self.match_late,
            Outcome::MatchAbsent => self.match_absent,
            Outcome::MatchNoResponse => self.match_no_response,
        }
    }

    fn named(&self) -> [(&'static str, f64); 9] {
        [
            ("training_on_time", self.training_on_time),
            ("training_late", self.training_late),
            ("training_absent", self.training_absent),
            ("training_no_response", self.training_no_response),
            ("match_on_time", self.match_on_time),
            ("match_late", self.match_late),
            ("match_absent", self.match_absent),
            ("match_no_response", self.match_no_response),
            ("mvp_bonus_once", self.mvp_bonus_once),
        ]
    }

    /// Rejects NaN and infinite weights. Signs are not enforced: an
    /// administrator may deliberately reward lateness or zero out a penalty.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.named() {
            if !value.is_finite() {
                return Err(ScorerError::InvalidWeight {
                    name: name.to_string(),
                    reason: format!("must be a finite number, got {}", value),
                });
            }
        }
        Ok(())
    }

    pub fn with_overrides(&self, overrides: &WeightOverrides) -> Self {
        overrides.apply_to(self)
    }
}

/// Partial weight configuration. Unset fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightOverrides {
    pub training_on_time: Option<f64>,
    pub training_late: Option<f64>,
    pub training_absent: Option<f64>,
    pub training_no_response: Option<f64>,
    pub match_on_time: Option<f64>,
    pub match_late: Option<f64>,
    pub match_absent: Option<f64>,
    pub match_no_response: Option<f64>,
    pub mvp_bonus_once: Option<f64>,
}

impl WeightOverrides {
    pub fn is_empty(&self) -> bool {
        *self == WeightOverrides::default()
    }

    pub fn apply_to(&self, base: &ScoringWeights) -> ScoringWeights {
        ScoringWeights {
            training_on_time: self.training_on_time.unwrap_or(base.training_on_time),
            training_late: self.training_late.unwrap_or(base.training_late),
            training_absent: self.training_absent.unwrap_or(base.training_absent),
            training_no_response: self.training_no_response.unwrap_or(base.training_no_response),
            match_on_time: self.match_on_time.unwrap_or(base.match_on_time),
            match_late: self.match_late.unwrap_or(base.match_late),
            match_absent: self.match_absent.unwrap_or(base.match_absent),
            match_no_response: self.match_no_response.unwrap_or(base.match_no_response),
            mvp_bonus_once: self.mvp_bonus_once.unwrap_or(base.mvp_bonus_once),
        }
    }
}
