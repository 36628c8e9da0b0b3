//! Stack-based back-stack storage.
//!
//! [`Router`] keeps the ordered stack of [`BackStackEntry`] values for one
//! navigation host. The top of the stack is the current destination.
//!
//! # Responsibilities
//!
//! - Maintain the LIFO stack of entries with a monotonic version.
//! - Expose push/pop helpers; the top entry is the current destination.
//! - Host entry-scoped state and release it when its entry is popped.

use std::{
    any::{Any, TypeId},
    sync::Arc,
};

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::route::{BackStackEntry, EntryId};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct EntryStateKey {
    entry_id: EntryId,
    key: String,
    type_id: TypeId,
}

type ErasedEntryState = Arc<dyn Any + Send + Sync>;

/// Back-stack of one navigation host.
#[derive(Default)]
pub struct Router {
    stack: Vec<BackStackEntry>,
    version: u64,
    entry_states: DashMap<EntryStateKey, ErasedEntryState>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router seeded with a root entry.
    pub fn with_root(root: BackStackEntry) -> Self {
        let mut router = Self::new();
        router.push(root);
        router
    }

    /// Monotonic routing version, bumped on every stack change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Push an entry onto the stack.
    pub fn push(&mut self, entry: BackStackEntry) {
        debug!(route = entry.route(), depth = self.stack.len() + 1, "push");
        self.stack.push(entry);
        self.bump_version();
    }

    /// Pop the top entry, releasing its scoped state.
    ///
    /// Returns `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<BackStackEntry> {
        let removed = self.stack.pop()?;
        debug!(route = removed.route(), depth = self.stack.len(), "pop");
        self.prune_entry_states(removed.id());
        self.bump_version();
        Some(removed)
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Top entry.
    pub fn last(&self) -> Option<&BackStackEntry> {
        self.stack.last()
    }

    /// Entries from the root to the top.
    pub fn entries(
        &self,
    ) -> impl DoubleEndedIterator<Item = &BackStackEntry> + ExactSizeIterator {
        self.stack.iter()
    }

    /// Get or initialise state scoped to the top entry and provide it to `f`.
    ///
    /// The state lives as long as the entry stays on the stack. Returns
    /// `None` when the stack is empty.
    pub fn with_entry_state<T, F, R>(&self, key: &str, f: F) -> Option<R>
    where
        T: Default + Send + Sync + 'static,
        F: FnOnce(&mut T) -> R,
    {
        let entry_id = self.stack.last()?.id();
        let slot = self
            .entry_states
            .entry(EntryStateKey {
                entry_id,
                key: key.to_owned(),
                type_id: TypeId::of::<T>(),
            })
            .or_insert_with(|| Arc::new(RwLock::new(T::default())) as ErasedEntryState)
            .clone();
        let lock = slot.downcast::<RwLock<T>>().ok()?;
        let mut guard = lock.write();
        Some(f(&mut guard))
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn prune_entry_states(&self, entry_id: EntryId) {
        self.entry_states.retain(|key, _| key.entry_id != entry_id);
    }
}
