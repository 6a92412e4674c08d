pub mod comparator;
pub mod ranker;

pub use comparator::{compare_entries, decisive_rule, TieBreak};
pub use ranker::{rank_players, sort_entries, Leaderboard, LeaderboardRanker};
