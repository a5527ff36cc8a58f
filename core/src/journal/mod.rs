//! Navigation journal recording and replay

pub mod entry;
pub mod recorder;

pub use entry::{EntryType, JournalEntry};
pub use recorder::{Journal, JournalMetadata, NavigationJournal};
