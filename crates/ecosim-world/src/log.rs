//! Per-turn event log read by presentation layers.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Append-only list of human-readable events, cleared at the start of each turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<String>,
}

impl EventLog {
    pub fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!(target: "ecosim::events", "{}", entry);
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_clear() {
        let mut log = EventLog::default();
        log.push("Wolf#1 killed Sheep#2!");
        log.push(String::from("Sheep#3 spread"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0], "Wolf#1 killed Sheep#2!");

        log.clear();
        assert!(log.is_empty());
    }
}
