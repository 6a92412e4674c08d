//! Roster input for the command-line front-end.
//!
//! A roster is a JSON array of `{ "identity": {...}, "counters": {...} }`
//! rows. Rows that share an id are merged into one entry.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::models::{Result, RosterEntry, ScorerError};

pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<RosterEntry>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ScorerError::RosterIo {
        path: path.display().to_string(),
        source,
    })?;

    let entries = parse_roster(&contents)?;
    debug!("Loaded {} roster entries from {}", entries.len(), path.display());
    Ok(entries)
}

pub fn parse_roster(json: &str) -> Result<Vec<RosterEntry>> {
    let rows: Vec<RosterEntry> = serde_json::from_str(json)?;
    Ok(merge_duplicates(rows))
}

/// Collapses rows with the same id, summing their counters. The first row's
/// names win and first-seen order is kept.
pub fn merge_duplicates(rows: Vec<RosterEntry>) -> Vec<RosterEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<RosterEntry> = Vec::with_capacity(rows.len());

    for row in rows {
        match index.get(&row.identity.id) {
            Some(&i) => {
                warn!("Duplicate roster id {}; merging counters", row.identity.id);
                merged[i].counters.merge(&row.counters);
            }
            None => {
                index.insert(row.identity.id.clone(), merged.len());
                merged.push(row);
            }
        }
    }

    merged
}
