//! Ordered navigation hook lists

use super::route::RoutePath;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Hook run before a navigation; returning `false` cancels it
pub type BeforeHook = Arc<dyn Fn(RoutePath) -> BoxFuture<'static, bool> + Send + Sync>;

/// Hook run after a navigation has rendered
pub type AfterHook = Arc<dyn Fn(RoutePath) -> BoxFuture<'static, ()> + Send + Sync>;

struct Entries<H> {
    next_id: AtomicU64,
    hooks: Mutex<Vec<(u64, H)>>,
}

impl<H> Entries<H> {
    fn lock(&self) -> MutexGuard<'_, Vec<(u64, H)>> {
        self.hooks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

trait Detach: Send + Sync {
    fn detach(&self, id: u64) -> bool;
}

impl<H: Send> Detach for Entries<H> {
    fn detach(&self, id: u64) -> bool {
        let mut hooks = self.lock();
        let before = hooks.len();
        hooks.retain(|(hook_id, _)| *hook_id != id);
        hooks.len() != before
    }
}

/// Listener list that runs in registration order
pub struct HookList<H> {
    entries: Arc<Entries<H>>,
}

impl<H: Clone + Send + 'static> HookList<H> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Entries {
                next_id: AtomicU64::new(0),
                hooks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Append a hook and hand back the handle that removes it
    pub fn push(&self, hook: H) -> Subscription {
        let id = self.entries.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().push((id, hook));

        let weak: Weak<Entries<H>> = Arc::downgrade(&self.entries);
        Subscription {
            id,
            list: weak as Weak<dyn Detach>,
        }
    }

    /// Copy of the current hooks, so running hooks may (un)register others
    pub fn snapshot(&self) -> Vec<H> {
        self.entries
            .lock()
            .iter()
            .map(|(_, hook)| hook.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<H: Clone + Send + 'static> Default for HookList<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by hook registration
///
/// Dropping the handle leaves the hook registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[must_use = "dropping a Subscription keeps the hook registered forever"]
pub struct Subscription {
    id: u64,
    list: Weak<dyn Detach>,
}

impl Subscription {
    /// Remove the hook; returns false if it was already gone
    pub fn unsubscribe(self) -> bool {
        match self.list.upgrade() {
            Some(list) => list.detach(self.id),
            None => false,
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_keeps_registration_order() {
        let list: HookList<&'static str> = HookList::new();
        let _a = list.push("navbar");
        let _b = list.push("loading");
        let _c = list.push("analytics");

        assert_eq!(list.snapshot(), vec!["navbar", "loading", "analytics"]);
    }

    #[test]
    fn test_unsubscribe_removes_only_its_hook() {
        let list: HookList<&'static str> = HookList::new();
        let first = list.push("first");
        let _second = list.push("second");

        assert!(first.unsubscribe());
        assert_eq!(list.snapshot(), vec!["second"]);
    }

    #[test]
    fn test_unsubscribe_after_list_dropped() {
        let list: HookList<u32> = HookList::new();
        let sub = list.push(1);
        drop(list);
        assert!(!sub.unsubscribe());
    }
}
