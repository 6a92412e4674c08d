pub mod algorithm;
pub mod weights;

pub use algorithm::{compute_score, ScoringAlgorithm, DEFAULT_MIN_EVENTS, MAX_SCORE};
pub use weights::{ScoringWeights, WeightOverrides, MATCH_ANCHOR, TRAINING_ANCHOR};
