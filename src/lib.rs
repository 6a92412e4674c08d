pub mod models;
pub mod config;
pub mod scoring;
pub mod ranking;
pub mod roster;

pub use models::{AttendanceCounters, PlayerIdentity, RankedEntry, RosterEntry, ScoreResult, ScorerError, Result};
pub use config::Settings;
pub use scoring::{compute_score, ScoringAlgorithm, ScoringWeights, WeightOverrides};
pub use ranking::{compare_entries, rank_players, sort_entries, Leaderboard, LeaderboardRanker};
