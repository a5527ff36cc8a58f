//! Navigation journal recorder implementation

use crate::error::{JournalError, Result};
use crate::journal::{EntryType, JournalEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// Records navigation events for debugging and analysis
pub struct NavigationJournal {
    entries: RwLock<Vec<JournalEntry>>,
    file_path: Option<PathBuf>,
    auto_save: bool,
}

/// Complete journal data as written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    /// Metadata about the journal
    pub metadata: JournalMetadata,

    /// All journal entries
    pub entries: Vec<JournalEntry>,
}

/// Metadata for a journal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalMetadata {
    /// Unique identifier for this journal
    pub id: String,

    /// When the first entry was recorded
    pub started_at: DateTime<Utc>,

    /// When the last entry was recorded
    pub completed_at: Option<DateTime<Utc>>,

    /// Version of the journal format
    pub version: String,

    /// Number of completed navigations
    pub navigations: usize,

    /// Number of views that failed
    pub failures: usize,

    /// Total number of entries
    pub total_entries: usize,
}

impl NavigationJournal {
    /// Create a journal kept in memory only
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            file_path: None,
            auto_save: false,
        }
    }

    /// Create a journal that saves to a file after every entry
    pub fn with_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            file_path: Some(path.as_ref().to_path_buf()),
            auto_save: true,
        }
    }

    /// Record a journal entry
    pub async fn record(&self, entry_type: EntryType) -> Result<()> {
        {
            let mut entries = self.entries.write().await;
            entries.push(JournalEntry::new(entry_type));
        }

        if self.auto_save {
            self.save().await?;
        }

        Ok(())
    }

    /// Get all recorded entries
    pub async fn entries(&self) -> Vec<JournalEntry> {
        self.entries.read().await.clone()
    }

    /// Get the recorded entry types, oldest first
    pub async fn entry_types(&self) -> Vec<EntryType> {
        self.entries
            .read()
            .await
            .iter()
            .map(|e| e.entry_type.clone())
            .collect()
    }

    /// Get the number of recorded entries
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Save the journal to its file, if it has one
    pub async fn save(&self) -> Result<()> {
        if let Some(path) = &self.file_path {
            let journal = self.build_journal().await;
            let json = serde_json::to_string_pretty(&journal).map_err(|e| {
                JournalError::RecordingFailed {
                    message: format!("Failed to serialize journal: {}", e),
                }
            })?;

            // Ensure parent directory exists
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::write(path, json).await?;
        }

        Ok(())
    }

    /// Load a journal from file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Journal> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(JournalError::LoadFailed {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).await?;
        let journal: Journal =
            serde_json::from_str(&content).map_err(|_| JournalError::InvalidFormat)?;

        Ok(journal)
    }

    async fn build_journal(&self) -> Journal {
        let entries = self.entries.read().await.clone();

        let started_at = entries
            .first()
            .map(|e| e.timestamp)
            .unwrap_or_else(Utc::now);
        let completed_at = entries.last().map(|e| e.timestamp);

        let mut navigations = 0;
        let mut failures = 0;
        for entry in &entries {
            match &entry.entry_type {
                EntryType::NavigationCompleted { .. } => navigations += 1,
                EntryType::ViewFailed { .. } => failures += 1,
                _ => {}
            }
        }

        let metadata = JournalMetadata {
            id: uuid::Uuid::new_v4().to_string(),
            started_at,
            completed_at,
            version: "1.0".to_string(),
            navigations,
            failures,
            total_entries: entries.len(),
        };

        Journal { metadata, entries }
    }

    /// Clear all recorded entries
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Get the file path if set
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

impl Default for NavigationJournal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_journal_save_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("journal.json");

        let journal = NavigationJournal::with_file(&path);
        journal
            .record(EntryType::NavigationStarted {
                path: "/calendar".to_string(),
                replace: false,
            })
            .await
            .unwrap();
        journal
            .record(EntryType::ViewFailed {
                path: "/calendar".to_string(),
                error: "boom".to_string(),
            })
            .await
            .unwrap();
        journal
            .record(EntryType::NavigationCompleted {
                path: "/calendar".to_string(),
                duration_ms: 3,
            })
            .await
            .unwrap();

        let loaded = NavigationJournal::load(&path).await.unwrap();
        assert_eq!(loaded.entries.len(), 3);
        assert_eq!(loaded.metadata.navigations, 1);
        assert_eq!(loaded.metadata.failures, 1);
        assert_eq!(loaded.metadata.total_entries, 3);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        let result = NavigationJournal::load(temp_dir.path().join("missing.json")).await;
        assert!(matches!(
            result,
            Err(crate::error::Error::Journal(JournalError::LoadFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_in_memory_journal_does_not_touch_disk() {
        let journal = NavigationJournal::new();
        journal
            .record(EntryType::PopState {
                path: "/a".to_string(),
            })
            .await
            .unwrap();
        journal.save().await.unwrap();

        assert!(journal.file_path().is_none());
        assert_eq!(journal.entry_count().await, 1);

        journal.clear().await;
        assert_eq!(journal.entry_count().await, 0);
    }
}
