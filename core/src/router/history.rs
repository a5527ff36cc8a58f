//! Browser history integration
//!
//! The router only ever pushes or replaces entries keyed by path. Moving
//! back and forward is the browser's business; the host reports it to the
//! router through [`Router::handle_pop_state`](super::Router::handle_pop_state).

use super::route::RoutePath;
use crate::error::Result;
use std::sync::{Mutex, MutexGuard};

/// Session history as seen by the router
pub trait History: Send + Sync {
    /// Path of the active history entry
    fn current_path(&self) -> RoutePath;

    /// Append an entry and make it active, like `pushState`
    fn push(&self, path: &RoutePath) -> Result<()>;

    /// Overwrite the active entry, like `replaceState`
    fn replace(&self, path: &RoutePath) -> Result<()>;
}

#[derive(Debug)]
struct Stack {
    entries: Vec<RoutePath>,
    index: usize,
}

/// In-memory session history with back/forward support
#[derive(Debug)]
pub struct MemoryHistory {
    stack: Mutex<Stack>,
}

impl MemoryHistory {
    /// Create a history whose only entry is `initial`
    pub fn new(initial: impl Into<RoutePath>) -> Self {
        Self {
            stack: Mutex::new(Stack {
                entries: vec![initial.into()],
                index: 0,
            }),
        }
    }

    /// Step back one entry, returning the new active path
    pub fn back(&self) -> Option<RoutePath> {
        let mut stack = self.lock();
        if stack.index == 0 {
            return None;
        }
        stack.index -= 1;
        Some(stack.entries[stack.index].clone())
    }

    /// Step forward one entry, returning the new active path
    pub fn forward(&self) -> Option<RoutePath> {
        let mut stack = self.lock();
        if stack.index + 1 >= stack.entries.len() {
            return None;
        }
        stack.index += 1;
        Some(stack.entries[stack.index].clone())
    }

    pub fn can_go_back(&self) -> bool {
        self.lock().index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let stack = self.lock();
        stack.index + 1 < stack.entries.len()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> Vec<RoutePath> {
        self.lock().entries.clone()
    }

    /// Index of the active entry
    pub fn index(&self) -> usize {
        self.lock().index
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Stack> {
        self.stack
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> RoutePath {
        let stack = self.lock();
        stack.entries[stack.index].clone()
    }

    fn push(&self, path: &RoutePath) -> Result<()> {
        let mut stack = self.lock();
        // Pushing discards any forward entries
        let keep = stack.index + 1;
        stack.entries.truncate(keep);
        stack.entries.push(path.clone());
        stack.index = stack.entries.len() - 1;
        Ok(())
    }

    fn replace(&self, path: &RoutePath) -> Result<()> {
        let mut stack = self.lock();
        let index = stack.index;
        stack.entries[index] = path.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_replace() {
        let history = MemoryHistory::new("/");
        history.push(&"/dashboard".into()).unwrap();
        history.push(&"/calendar".into()).unwrap();
        history.replace(&"/analytics".into()).unwrap();

        assert_eq!(history.current_path(), "/analytics");
        assert_eq!(history.entries(), vec![
            RoutePath::from("/"),
            RoutePath::from("/dashboard"),
            RoutePath::from("/analytics"),
        ]);
    }

    #[test]
    fn test_back_forward() {
        let history = MemoryHistory::new("/login");
        assert!(history.back().is_none());

        history.push(&"/dashboard".into()).unwrap();
        assert!(history.can_go_back());
        assert_eq!(history.back(), Some(RoutePath::from("/login")));
        assert_eq!(history.current_path(), "/login");

        assert!(history.can_go_forward());
        assert_eq!(history.forward(), Some(RoutePath::from("/dashboard")));
        assert!(history.forward().is_none());
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let history = MemoryHistory::new("/a");
        history.push(&"/b".into()).unwrap();
        history.push(&"/c".into()).unwrap();
        history.back();
        history.back();

        history.push(&"/d".into()).unwrap();
        assert_eq!(history.entries(), vec![RoutePath::from("/a"), RoutePath::from("/d")]);
        assert!(!history.can_go_forward());
    }
}
