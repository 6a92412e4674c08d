use crate::{
    config::Settings,
    models::{LeaderboardRow, RankedEntry, RosterEntry},
    ranking::comparator::compare_entries,
    scoring::{ScoringAlgorithm, ScoringWeights, DEFAULT_MIN_EVENTS},
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

pub struct LeaderboardRanker {
    algorithm: ScoringAlgorithm,
}

impl LeaderboardRanker {
    pub fn new(weights: ScoringWeights, min_events: u32) -> Self {
        Self {
            algorithm: ScoringAlgorithm::new(weights).with_min_events(min_events),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.scoring.weights.clone(),
            settings.scoring.min_events,
        )
    }

    pub fn min_events(&self) -> u32 {
        self.algorithm.min_events()
    }

    pub fn rank_entry(&self, entry: &RosterEntry) -> RankedEntry {
        let score = self.algorithm.calculate_score(&entry.counters);
        let eligible = score.meets_minimum();

        debug!(
            "Scored {}: {} ({} opportunities, eligible: {})",
            entry.identity.id, score.normalized_score, score.opportunities, eligible
        );

        RankedEntry {
            identity: entry.identity.clone(),
            score,
            eligible,
        }
    }

    /// Scores every entry and flags eligibility. Input order is kept and
    /// ineligible entries are returned too.
    pub fn rank(&self, entries: &[RosterEntry]) -> Vec<RankedEntry> {
        info!("Ranking {} roster entries", entries.len());

        #[cfg(feature = "parallel")]
        let ranked: Vec<RankedEntry> = entries.par_iter().map(|e| self.rank_entry(e)).collect();
        #[cfg(not(feature = "parallel"))]
        let ranked: Vec<RankedEntry> = entries.iter().map(|e| self.rank_entry(e)).collect();

        let eligible = ranked.iter().filter(|e| e.eligible).count();
        info!(
            "{} of {} entries meet the minimum of {} events",
            eligible,
            ranked.len(),
            self.min_events()
        );

        ranked
    }

    pub fn leaderboard(&self, entries: &[RosterEntry], eligible_only: bool) -> Leaderboard {
        Leaderboard::build(self.rank(entries), eligible_only)
    }
}

/// Scores a roster without ordering it. `None` selects the built-in weights
/// and a minimum of 10 events.
pub fn rank_players(
    entries: &[RosterEntry],
    weights: Option<&ScoringWeights>,
    min_events: Option<u32>,
) -> Vec<RankedEntry> {
    LeaderboardRanker::new(
        weights.cloned().unwrap_or_default(),
        min_events.unwrap_or(DEFAULT_MIN_EVENTS),
    )
    .rank(entries)
}

/// Stable sort into leaderboard order.
pub fn sort_entries(entries: &mut [RankedEntry]) {
    entries.sort_by(compare_entries);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    pub rows: Vec<LeaderboardRow>,
    /// Entries dropped because they were below the event minimum.
    pub excluded: usize,
}

impl Leaderboard {
    pub fn build(mut entries: Vec<RankedEntry>, eligible_only: bool) -> Self {
        let before = entries.len();
        if eligible_only {
            entries.retain(|e| e.eligible);
        }
        let excluded = before - entries.len();

        sort_entries(&mut entries);

        let rows = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| LeaderboardRow {
                position: i + 1,
                entry,
            })
            .collect();

        Self { rows, excluded }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn top(&self) -> Option<&LeaderboardRow> {
        self.rows.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceCounters, PlayerIdentity};

    fn roster_entry(id: &str, present: u32, no_response: u32) -> RosterEntry {
        RosterEntry {
            identity: PlayerIdentity::new(id).with_name(id, "Player"),
            counters: AttendanceCounters {
                training_present: present,
                training_no_response: no_response,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_empty_roster() {
        assert!(rank_players(&[], None, None).is_empty());
        let board = Leaderboard::build(Vec::new(), true);
        assert!(board.is_empty());
        assert!(board.top().is_none());
        assert_eq!(board.excluded, 0);
    }

    #[test]
    fn test_ineligible_entries_are_kept() {
        let roster = vec![roster_entry("a", 12, 0), roster_entry("b", 3, 0)];
        let ranked = rank_players(&roster, None, None);

        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].eligible);
        assert!(!ranked[1].eligible);
        // Ineligible entries are still scored
        assert_eq!(ranked[1].score.normalized_score, 100.0);
    }

    #[test]
    fn test_eligibility_threshold_is_inclusive() {
        let roster = vec![roster_entry("a", 5, 0)];

        assert!(rank_players(&roster, None, Some(5))[0].eligible);
        assert!(!rank_players(&roster, None, Some(6))[0].eligible);
        assert!(rank_players(&roster, None, Some(0))[0].eligible);
    }

    #[test]
    fn test_rank_keeps_input_order() {
        let roster = vec![
            roster_entry("low", 2, 8),
            roster_entry("high", 10, 0),
        ];
        let ranked = rank_players(&roster, None, None);

        assert_eq!(ranked[0].identity.id, "low");
        assert_eq!(ranked[1].identity.id, "high");
    }

    #[test]
    fn test_leaderboard_positions() {
        let ranker = LeaderboardRanker::new(ScoringWeights::default(), 10);
        let roster = vec![
            roster_entry("mid", 7, 3),
            roster_entry("short", 4, 0),
            roster_entry("top", 10, 0),
            roster_entry("low", 2, 8),
        ];

        let board = ranker.leaderboard(&roster, true);
        let ids: Vec<&str> = board.rows.iter().map(|r| r.entry.identity.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "mid", "low"]);
        assert_eq!(board.excluded, 1);
        assert_eq!(board.top().map(|r| r.position), Some(1));
        assert_eq!(board.rows[2].position, 3);

        let all = ranker.leaderboard(&roster, false);
        assert_eq!(all.len(), 4);
        assert_eq!(all.excluded, 0);
        // Perfect but short record still sorts by score when shown
        assert_eq!(all.rows[0].entry.identity.id, "short");
    }

    #[test]
    fn test_custom_weights_flow_through() {
        let weights = ScoringWeights {
            training_no_response: 0.0,
            ..Default::default()
        };
        let roster = vec![roster_entry("a", 5, 5)];
        let ranked = rank_players(&roster, Some(&weights), None);

        assert_eq!(ranked[0].score.raw_points, 5.0);
        assert_eq!(ranked[0].score.normalized_score, 75.0);
    }
}
