//! Navigation journal entry structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the navigation journal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier for this entry
    pub id: String,

    /// Timestamp when this entry was created
    pub timestamp: DateTime<Utc>,

    /// Type of entry
    pub entry_type: EntryType,
}

/// Type of journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryType {
    /// Navigation pipeline started
    NavigationStarted { path: String, replace: bool },

    /// A before-hook vetoed the navigation
    NavigationCancelled { path: String, hook_index: usize },

    /// Navigation dropped because another one was in flight
    NavigationDropped { path: String, in_flight: Option<String> },

    /// Navigation finished and after-hooks ran
    NavigationCompleted { path: String, duration_ms: u64 },

    /// A view rendered successfully
    ViewRendered { path: String, duration_ms: u64 },

    /// A view failed, panicked or timed out
    ViewFailed { path: String, error: String },

    /// Unknown route sent to the default route
    Redirected { from: String, to: String },

    /// Browser back/forward re-rendered a route
    PopState { path: String },

    /// Transient UI swept before a render
    TransientsSwept { count: usize },
}

impl JournalEntry {
    /// Create a new journal entry
    pub fn new(entry_type: EntryType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            entry_type,
        }
    }

    /// The path this entry is about, if any
    pub fn path(&self) -> Option<&str> {
        match &self.entry_type {
            EntryType::NavigationStarted { path, .. }
            | EntryType::NavigationCancelled { path, .. }
            | EntryType::NavigationDropped { path, .. }
            | EntryType::NavigationCompleted { path, .. }
            | EntryType::ViewRendered { path, .. }
            | EntryType::ViewFailed { path, .. }
            | EntryType::PopState { path } => Some(path),
            EntryType::Redirected { to, .. } => Some(to),
            EntryType::TransientsSwept { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_with_type_tag() {
        let entry = JournalEntry::new(EntryType::Redirected {
            from: "/nope".to_string(),
            to: "/dashboard".to_string(),
        });
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["entry_type"]["type"], "redirected");
        assert_eq!(json["entry_type"]["to"], "/dashboard");
        assert_eq!(entry.path(), Some("/dashboard"));
    }
}
