use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::RankedEntry;

/// Leaderboard tie-break levels, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Higher normalized score first.
    Score,
    /// Fewer no-responses first.
    NoResponseRate,
    /// More match presence first.
    MatchPresenceRate,
    /// Fewer late match arrivals first.
    MatchLateRate,
    /// `"<last> <first>"` lower-cased, ascending.
    Name,
}

impl TieBreak {
    pub const ORDER: [TieBreak; 5] = [
        TieBreak::Score,
        TieBreak::NoResponseRate,
        TieBreak::MatchPresenceRate,
        TieBreak::MatchLateRate,
        TieBreak::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::Score => "score",
            TieBreak::NoResponseRate => "no-response rate",
            TieBreak::MatchPresenceRate => "match presence rate",
            TieBreak::MatchLateRate => "match late rate",
            TieBreak::Name => "name",
        }
    }

    /// Compares two entries on this level alone.
    pub fn compare(&self, a: &RankedEntry, b: &RankedEntry) -> Ordering {
        match self {
            TieBreak::Score => descending(a.score.normalized_score, b.score.normalized_score),
            TieBreak::NoResponseRate => {
                ascending(a.score.no_response_rate, b.score.no_response_rate)
            }
            TieBreak::MatchPresenceRate => {
                descending(a.score.match_presence_rate, b.score.match_presence_rate)
            }
            TieBreak::MatchLateRate => ascending(a.score.match_late_rate, b.score.match_late_rate),
            TieBreak::Name => a.identity.sort_key().cmp(&b.identity.sort_key()),
        }
    }
}

/// Leaderboard order: `Less` means `a` ranks above `b`.
pub fn compare_entries(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    TieBreak::ORDER
        .iter()
        .map(|rule| rule.compare(a, b))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// The first level that separates `a` from `b`, or `None` when they tie on
/// every level.
pub fn decisive_rule(a: &RankedEntry, b: &RankedEntry) -> Option<TieBreak> {
    TieBreak::ORDER
        .iter()
        .copied()
        .find(|rule| rule.compare(a, b) != Ordering::Equal)
}

// Scores and rates are always finite, so partial_cmp never falls through.
fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceCounters, PlayerIdentity};
    use crate::scoring::compute_score;

    fn entry(first: &str, last: &str, counters: AttendanceCounters) -> RankedEntry {
        RankedEntry {
            identity: PlayerIdentity::new(format!("{}-{}", first, last)).with_name(first, last),
            score: compute_score(&counters, None, None),
            eligible: true,
        }
    }

    fn with_rates(
        score: f64,
        no_response: f64,
        presence: f64,
        late: f64,
        last: &str,
    ) -> RankedEntry {
        let mut e = entry("x", last, AttendanceCounters::default());
        e.score.normalized_score = score;
        e.score.no_response_rate = no_response;
        e.score.match_presence_rate = presence;
        e.score.match_late_rate = late;
        e
    }

    #[test]
    fn test_higher_score_ranks_first() {
        let a = with_rates(80.0, 0.5, 0.0, 1.0, "zed");
        let b = with_rates(70.0, 0.0, 1.0, 0.0, "abe");

        assert_eq!(compare_entries(&a, &b), Ordering::Less);
        assert_eq!(compare_entries(&b, &a), Ordering::Greater);
        assert_eq!(decisive_rule(&a, &b), Some(TieBreak::Score));
    }

    #[test]
    fn test_no_response_rate_breaks_score_tie() {
        let a = with_rates(50.0, 0.1, 0.0, 1.0, "zed");
        let b = with_rates(50.0, 0.2, 1.0, 0.0, "abe");

        assert_eq!(compare_entries(&a, &b), Ordering::Less);
        assert_eq!(decisive_rule(&a, &b), Some(TieBreak::NoResponseRate));
    }

    #[test]
    fn test_match_presence_breaks_tie() {
        let a = with_rates(50.0, 0.1, 0.9, 1.0, "zed");
        let b = with_rates(50.0, 0.1, 0.8, 0.0, "abe");

        assert_eq!(compare_entries(&a, &b), Ordering::Less);
        assert_eq!(decisive_rule(&a, &b), Some(TieBreak::MatchPresenceRate));
    }

    #[test]
    fn test_match_late_rate_breaks_tie() {
        let a = with_rates(50.0, 0.1, 0.9, 0.2, "zed");
        let b = with_rates(50.0, 0.1, 0.9, 0.3, "abe");

        assert_eq!(compare_entries(&a, &b), Ordering::Less);
        assert_eq!(decisive_rule(&a, &b), Some(TieBreak::MatchLateRate));
    }

    #[test]
    fn test_name_is_final_fallback() {
        let a = with_rates(50.0, 0.1, 0.9, 0.2, "Adams");
        let b = with_rates(50.0, 0.1, 0.9, 0.2, "baker");

        assert_eq!(compare_entries(&a, &b), Ordering::Less);
        assert_eq!(decisive_rule(&a, &b), Some(TieBreak::Name));
    }

    #[test]
    fn test_name_compares_last_then_first_ignoring_case() {
        let counters = AttendanceCounters {
            training_present: 10,
            ..Default::default()
        };
        let a = entry("Zoe", "Smith", counters);
        let b = entry("adam", "SMITH", counters);
        let c = entry("Aaron", "Taylor", counters);

        assert_eq!(compare_entries(&b, &a), Ordering::Less);
        assert_eq!(compare_entries(&a, &c), Ordering::Less);
    }

    #[test]
    fn test_identical_names_compare_equal() {
        let counters = AttendanceCounters {
            match_present: 3,
            ..Default::default()
        };
        let a = entry("Sam", "Lee", counters);
        let mut b = entry("sam", "lee", counters);
        b.identity.id = "other".to_string();

        assert_eq!(compare_entries(&a, &b), Ordering::Equal);
        assert_eq!(decisive_rule(&a, &b), None);
    }
}
