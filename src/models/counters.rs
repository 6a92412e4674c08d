use serde::{Deserialize, Serialize};

/// Per-individual outcome counts for one scoring window.
///
/// Presence counters include late arrivals: `training_late` is the subset of
/// `training_present` that arrived late, never an extra event. The same holds
/// for the match counters. Fields missing from serialized input read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceCounters {
    // Training outcomes
    pub training_present: u32,
    pub training_late: u32,
    pub training_absent: u32,
    pub training_no_response: u32,

    // Match outcomes
    pub match_present: u32,
    pub match_late: u32,
    pub match_absent: u32,
    pub match_no_response: u32,

    /// Most-valuable recognitions received in the window.
    pub mvp_awards: u32,
}

impl AttendanceCounters {
    pub fn training_on_time(&self) -> u64 {
        u64::from(self.training_present.saturating_sub(self.training_late))
    }

    pub fn match_on_time(&self) -> u64 {
        u64::from(self.match_present.saturating_sub(self.match_late))
    }

    pub fn training_total(&self) -> u64 {
        u64::from(self.training_present)
            + u64::from(self.training_absent)
            + u64::from(self.training_no_response)
    }

    pub fn match_total(&self) -> u64 {
        u64::from(self.match_present)
            + u64::from(self.match_absent)
            + u64::from(self.match_no_response)
    }

    /// Countable events across both categories.
    pub fn opportunities(&self) -> u64 {
        self.training_total() + self.match_total()
    }

    pub fn no_responses(&self) -> u64 {
        u64::from(self.training_no_response) + u64::from(self.match_no_response)
    }

    pub fn is_empty(&self) -> bool {
        self.opportunities() == 0
    }

    /// Adds another window's counts into this one.
    pub fn merge(&mut self, other: &AttendanceCounters) {
        self.training_present = self.training_present.saturating_add(other.training_present);
        self.training_late = self.training_late.saturating_add(other.training_late);
        self.training_absent = self.training_absent.saturating_add(other.training_absent);
        self.training_no_response = self
            .training_no_response
            .saturating_add(other.training_no_response);

        self.match_present = self.match_present.saturating_add(other.match_present);
        self.match_late = self.match_late.saturating_add(other.match_late);
        self.match_absent = self.match_absent.saturating_add(other.match_absent);
        self.match_no_response = self.match_no_response.saturating_add(other.match_no_response);

        self.mvp_awards = self.mvp_awards.saturating_add(other.mvp_awards);
    }
}
