use serde::{Deserialize, Serialize};

use super::AttendanceCounters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    TrainingOnTime,
    TrainingLate,
    TrainingAbsent,
    TrainingNoResponse,
    MatchOnTime,
    MatchLate,
    MatchAbsent,
    MatchNoResponse,
}

impl Outcome {
    pub const ALL: [Outcome; 8] = [
        Outcome::TrainingOnTime,
        Outcome::TrainingLate,
        Outcome::TrainingAbsent,
        Outcome::TrainingNoResponse,
        Outcome::MatchOnTime,
        Outcome::MatchLate,
        Outcome::MatchAbsent,
        Outcome::MatchNoResponse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::TrainingOnTime => "training on time",
            Outcome::TrainingLate => "training late",
            Outcome::TrainingAbsent => "training absent",
            Outcome::TrainingNoResponse => "training no response",
            Outcome::MatchOnTime => "match on time",
            Outcome::MatchLate => "match late",
            Outcome::MatchAbsent => "match absent",
            Outcome::MatchNoResponse => "match no response",
        }
    }

    /// How many times the outcome occurred. On-time counts are derived from
    /// presences minus late arrivals.
    pub fn count(&self, counters: &AttendanceCounters) -> u64 {
        match self {
            Outcome::TrainingOnTime => counters.training_on_time(),
            Outcome::TrainingLate => u64::from(counters.training_late),
            Outcome::TrainingAbsent => u64::from(counters.training_absent),
            Outcome::TrainingNoResponse => u64::from(counters.training_no_response),
            Outcome::MatchOnTime => counters.match_on_time(),
            Outcome::MatchLate => u64::from(counters.match_late),
            Outcome::MatchAbsent => u64::from(counters.match_absent),
            Outcome::MatchNoResponse => u64::from(counters.match_no_response),
        }
    }
}

/// Points one outcome added to (or took from) the raw total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeContribution {
    pub outcome: Outcome,
    pub count: u64,
    pub weight: f64,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub contributions: Vec<OutcomeContribution>,
    /// Bonus actually added; zero when no MVP award was received.
    pub mvp_bonus: f64,
    /// Normalization anchors for this individual's opportunity mix.
    pub max_points: f64,
    pub min_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub counters: AttendanceCounters,
    pub raw_points: f64,
    pub opportunities: u64,
    pub normalized_score: f64,
    pub no_response_rate: f64,
    pub match_presence_rate: f64,
    pub match_late_rate: f64,
    /// Eligibility threshold the score was computed under. Not used in the
    /// computation itself.
    pub min_events: u32,
    pub breakdown: ScoreBreakdown,
}

impl ScoreResult {
    pub fn meets_minimum(&self) -> bool {
        self.opportunities >= u64::from(self.min_events)
    }
}
