//! Registry of transient UI owned by the current view
//!
//! Views never unmount on their own, so anything they put on top of the
//! page (modals, popups, overlay panels) is tracked here together with the
//! closure that removes it. The router sweeps the registry before every
//! render.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

type Disposer = Box<dyn FnOnce() + Send>;

/// Identifier of a tracked transient element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransientId(u64);

struct Transient {
    id: TransientId,
    label: String,
    dispose: Disposer,
}

/// Shared handle to the transient registry
#[derive(Clone, Default)]
pub struct TransientRegistry {
    entries: Arc<Mutex<Vec<Transient>>>,
    next_id: Arc<AtomicU64>,
}

impl TransientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an element; `dispose` runs when the element is swept
    pub fn track<F>(&self, label: impl Into<String>, dispose: F) -> TransientId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = TransientId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push(Transient {
            id,
            label: label.into(),
            dispose: Box::new(dispose),
        });
        id
    }

    /// Dispose a single element early, e.g. when the user closes a modal
    pub fn dispose(&self, id: TransientId) -> bool {
        let entry = {
            let mut entries = self.lock();
            entries
                .iter()
                .position(|t| t.id == id)
                .map(|index| entries.remove(index))
        };

        match entry {
            Some(transient) => {
                (transient.dispose)();
                true
            }
            None => false,
        }
    }

    /// Stop tracking an element without running its disposer
    pub fn forget(&self, id: TransientId) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|t| t.id != id);
        entries.len() != before
    }

    /// Dispose every tracked element, newest first
    pub fn sweep(&self) -> usize {
        // Take the entries out first so disposers may track new elements
        let drained: Vec<Transient> = std::mem::take(&mut *self.lock());
        let count = drained.len();

        for transient in drained.into_iter().rev() {
            debug!("Disposing transient '{}'", transient.label);
            (transient.dispose)();
        }

        count
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Labels of the tracked elements, oldest first
    pub fn labels(&self) -> Vec<String> {
        self.lock().iter().map(|t| t.label.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Transient>> {
        // A panicking disposer must not take the whole registry down with it
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for TransientRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransientRegistry")
            .field("labels", &self.labels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_sweep_disposes_everything_newest_first() {
        let registry = TransientRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["task-modal", "day-popup", "share-panel"] {
            let order = order.clone();
            registry.track(label, move || order.lock().unwrap().push(label));
        }

        assert_eq!(registry.sweep(), 3);
        assert!(registry.is_empty());
        assert_eq!(
            *order.lock().unwrap(),
            vec!["share-panel", "day-popup", "task-modal"]
        );
    }

    #[test]
    fn test_sweep_on_empty_registry() {
        let registry = TransientRegistry::new();
        assert_eq!(registry.sweep(), 0);
    }

    #[test]
    fn test_sweep_many() {
        let registry = TransientRegistry::new();
        let disposed = Arc::new(AtomicUsize::new(0));

        for i in 0..64 {
            let disposed = disposed.clone();
            registry.track(format!("overlay-{}", i), move || {
                disposed.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(registry.sweep(), 64);
        assert_eq!(disposed.load(Ordering::SeqCst), 64);
    }

    #[test]
    fn test_dispose_and_forget() {
        let registry = TransientRegistry::new();
        let disposed = Arc::new(AtomicUsize::new(0));

        let counter = disposed.clone();
        let modal = registry.track("modal", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = disposed.clone();
        let popup = registry.track("popup", move || {
            counter.fetch_add(10, Ordering::SeqCst);
        });

        assert!(registry.dispose(modal));
        assert!(!registry.dispose(modal));
        assert_eq!(disposed.load(Ordering::SeqCst), 1);

        assert!(registry.forget(popup));
        assert_eq!(registry.sweep(), 0);
        assert_eq!(disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_disposer_may_track_new_elements() {
        let registry = TransientRegistry::new();
        let inner = registry.clone();
        registry.track("modal", move || {
            inner.track("toast", || {});
        });

        assert_eq!(registry.sweep(), 1);
        assert_eq!(registry.labels(), vec!["toast"]);
    }
}
