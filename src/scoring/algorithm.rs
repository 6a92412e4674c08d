use crate::{
    models::{AttendanceCounters, Outcome, OutcomeContribution, ScoreBreakdown, ScoreResult},
    scoring::weights::{ScoringWeights, MATCH_ANCHOR, TRAINING_ANCHOR},
};

/// Opportunities an individual needs before they count for the leaderboard.
pub const DEFAULT_MIN_EVENTS: u32 = 10;

pub const MAX_SCORE: f64 = 100.0;

pub struct ScoringAlgorithm {
    weights: ScoringWeights,
    min_events: u32,
}

impl Default for ScoringAlgorithm {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl ScoringAlgorithm {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            min_events: DEFAULT_MIN_EVENTS,
        }
    }

    pub fn with_min_events(mut self, min_events: u32) -> Self {
        self.min_events = min_events;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn min_events(&self) -> u32 {
        self.min_events
    }

    pub fn calculate_score(&self, counters: &AttendanceCounters) -> ScoreResult {
        let opportunities = counters.opportunities();
        let breakdown = self.calculate_breakdown(counters);
        let raw_points = self.sum_breakdown(&breakdown);
        let normalized_score = if opportunities == 0 {
            0.0
        } else {
            normalize(raw_points, breakdown.min_points, breakdown.max_points)
        };

        ScoreResult {
            counters: *counters,
            raw_points,
            opportunities,
            normalized_score,
            no_response_rate: ratio(counters.no_responses(), opportunities.max(1)),
            match_presence_rate: ratio(
                u64::from(counters.match_present),
                counters.match_total().max(1),
            ),
            match_late_rate: if counters.match_present > 0 {
                ratio(u64::from(counters.match_late), u64::from(counters.match_present))
            } else {
                0.0
            },
            min_events: self.min_events,
            breakdown,
        }
    }

    fn calculate_breakdown(&self, counters: &AttendanceCounters) -> ScoreBreakdown {
        let contributions = Outcome::ALL
            .iter()
            .map(|&outcome| {
                let count = outcome.count(counters);
                let weight = self.weights.weight_for(outcome);
                OutcomeContribution {
                    outcome,
                    count,
                    weight,
                    points: weight * count as f64,
                }
            })
            .collect();

        // Once, however many awards
        let mvp_bonus = if counters.mvp_awards > 0 {
            self.weights.mvp_bonus_once
        } else {
            0.0
        };

        // Anchored to the canonical scale, not the active weights, so that
        // retuning weights does not move what 0 and 100 mean.
        let max_points = TRAINING_ANCHOR * counters.training_total() as f64
            + MATCH_ANCHOR * counters.match_total() as f64;

        ScoreBreakdown {
            contributions,
            mvp_bonus,
            max_points,
            min_points: -max_points,
        }
    }

    fn sum_breakdown(&self, breakdown: &ScoreBreakdown) -> f64 {
        let outcome_points: f64 = breakdown.contributions.iter().map(|c| c.points).sum();
        outcome_points + breakdown.mvp_bonus
    }
}

/// Scores one individual. `None` selects the built-in weights and the default
/// eligibility threshold; the threshold is only echoed in the result.
pub fn compute_score(
    counters: &AttendanceCounters,
    weights: Option<&ScoringWeights>,
    min_events: Option<u32>,
) -> ScoreResult {
    let weights = weights.cloned().unwrap_or_default();
    ScoringAlgorithm::new(weights)
        .with_min_events(min_events.unwrap_or(DEFAULT_MIN_EVENTS))
        .calculate_score(counters)
}

/// Rescales `raw` from `[min, max]` onto `[0, 100]`, clamped and rounded to
/// one decimal. Degenerate ranges and non-finite results map to 0.
fn normalize(raw: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range == 0.0 {
        return 0.0;
    }

    let scaled = MAX_SCORE * (raw - min) / range;
    if !scaled.is_finite() {
        return 0.0;
    }

    round_one_decimal(scaled.clamp(0.0, MAX_SCORE))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    numerator as f64 / denominator as f64
}
