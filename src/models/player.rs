use serde::{Deserialize, Serialize};

use super::{AttendanceCounters, ScoreResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl PlayerIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    /// "Last First", or the id when no name is known.
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (None, None) => self.id.clone(),
            (first, last) => format!("{} {}", last.unwrap_or(""), first.unwrap_or(""))
                .trim()
                .to_string(),
        }
    }

    /// Final leaderboard tie-break key: `"<last> <first>"` lower-cased.
    /// Missing name parts are empty strings.
    pub fn sort_key(&self) -> String {
        format!(
            "{} {}",
            self.last_name.as_deref().unwrap_or(""),
            self.first_name.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}

/// One roster row handed to the ranker by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub identity: PlayerIdentity,
    #[serde(default)]
    pub counters: AttendanceCounters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub identity: PlayerIdentity,
    pub score: ScoreResult,
    pub eligible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// 1-based place in the sorted leaderboard.
    pub position: usize,
    #[serde(flatten)]
    pub entry: RankedEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_is_last_then_first_lowercased() {
        let identity = PlayerIdentity::new("p1").with_name("Ada", "Lovelace");
        assert_eq!(identity.sort_key(), "lovelace ada");
        assert_eq!(identity.display_name(), "Lovelace Ada");
    }

    #[test]
    fn test_sort_key_without_names() {
        let identity = PlayerIdentity::new("p2");
        assert_eq!(identity.sort_key(), " ");
        assert_eq!(identity.display_name(), "p2");
    }

    #[test]
    fn test_roster_entry_parses_without_counters() {
        let entry: RosterEntry =
            serde_json::from_str(r#"{"identity": {"id": "p3", "last_name": "Hopper"}}"#).unwrap();

        assert_eq!(entry.identity.last_name.as_deref(), Some("Hopper"));
        assert!(entry.identity.first_name.is_none());
        assert!(entry.counters.is_empty());
        assert_eq!(entry.identity.display_name(), "Hopper");
    }
}
