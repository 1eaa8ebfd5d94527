//! Live-session registry.
//!
//! Membership lives in an [`ArcSwap`]'d immutable map: readers grab a cheap
//! snapshot handle and iterate it without ever being invalidated, while
//! writers clone-and-swap the map through a compare-and-swap retry loop.

use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;

use epicenter_core::SessionId;

use crate::session::Session;

type SessionMap = IndexMap<SessionId, Arc<Session>>;

pub struct SessionRegistry {
    snap: ArcSwap<SessionMap>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            snap: ArcSwap::from_pointee(SessionMap::new()),
        }
    }

    /// Handle to the current membership map. A fan-out iterating this
    /// snapshot sees the registry as of this call, whatever creates or
    /// removals race with it.
    pub fn snapshot(&self) -> Arc<SessionMap> {
        self.snap.load_full()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.snap.load().get(id).cloned()
    }

    /// Return the session registered under `id`, inserting the one produced
    /// by `make` when absent. `make` runs at most once; when a racing create
    /// for the same id wins the swap, the winner's session is returned and
    /// the freshly built one is dropped.
    pub fn get_or_insert_with(
        &self,
        id: &str,
        make: impl FnOnce() -> Arc<Session>,
    ) -> Arc<Session> {
        if let Some(existing) = self.get(id) {
            return existing;
        }
        let session = make();
        loop {
            let cur = self.snap.load_full();
            if let Some(existing) = cur.get(id) {
                return existing.clone();
            }
            let mut next = (*cur).clone();
            next.insert(id.to_string(), session.clone());
            let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
            if Arc::ptr_eq(&prev, &cur) {
                return session;
            }
        }
    }

    /// Remove and return the session registered under `id`; no-op when
    /// absent.
    pub fn remove(&self, id: &str) -> Option<Arc<Session>> {
        loop {
            let cur = self.snap.load_full();
            if !cur.contains_key(id) {
                return None;
            }
            let mut next = (*cur).clone();
            let removed = next.shift_remove(id);
            let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
            if Arc::ptr_eq(&prev, &cur) {
                return removed;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.snap.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snap.load().is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
