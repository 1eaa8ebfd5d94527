//! Per-session copy-on-write overlay.
//!
//! A [`SessionOverlay`] pairs a private snapshot of global values with the
//! session's local drafts. Reads resolve drafts over the snapshot through
//! [`merge`]; writes only ever touch the draft layer until committed.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use epicenter_core::EntityId;

use crate::merge::merge;
use crate::traits::{CacheEntity, Committer};

struct OverlayState<T> {
    local_edits: IndexMap<EntityId, T>,
    snapshot: IndexMap<EntityId, T>,
}

/// One entity category's view for one session: local drafts over a private
/// snapshot, plus the committer that publishes drafts to the global store.
pub struct SessionOverlay<T: CacheEntity> {
    inner: RwLock<OverlayState<T>>,
    committer: Arc<dyn Committer<T>>,
}

impl<T: CacheEntity> SessionOverlay<T> {
    /// Build an overlay seeded with a snapshot of the current global values.
    pub fn new(snapshot: IndexMap<EntityId, T>, committer: Arc<dyn Committer<T>>) -> Self {
        Self {
            inner: RwLock::new(OverlayState {
                local_edits: IndexMap::new(),
                snapshot,
            }),
            committer,
        }
    }

    /// True when either layer holds the id.
    pub fn has(&self, id: EntityId) -> bool {
        let state = self.inner.read();
        state.local_edits.contains_key(&id) || state.snapshot.contains_key(&id)
    }

    /// Copy out one value, draft layer first.
    pub fn get(&self, id: EntityId) -> Option<T> {
        let state = self.inner.read();
        state
            .local_edits
            .get(&id)
            .or_else(|| state.snapshot.get(&id))
            .cloned()
    }

    /// Copy out the merged view: snapshot order with drafts resolved in
    /// place, net-new drafts appended in first-edit order.
    pub fn get_all(&self) -> Vec<T> {
        let (local, global) = {
            let state = self.inner.read();
            let local: Vec<T> = state.local_edits.values().cloned().collect();
            let global: Vec<T> = state.snapshot.values().cloned().collect();
            (local, global)
        };
        merge(&local, &global)
    }

    /// Stage one draft. The snapshot layer is left untouched.
    pub fn set(&self, item: T) {
        self.inner.write().local_edits.insert(item.entity_id(), item);
    }

    /// Stage a batch of drafts.
    pub fn set_all(&self, items: Vec<T>) {
        let mut state = self.inner.write();
        for item in items {
            state.local_edits.insert(item.entity_id(), item);
        }
    }

    /// Discard the draft for this item's id, if any. The snapshot value, when
    /// present, becomes visible again.
    pub fn remove(&self, item: &T) {
        self.inner.write().local_edits.shift_remove(&item.entity_id());
    }

    /// Discard a batch of drafts by the items' ids.
    pub fn remove_all(&self, items: &[T]) {
        let mut state = self.inner.write();
        for item in items {
            state.local_edits.shift_remove(&item.entity_id());
        }
    }

    /// Commit every draft through the committer, then clear them.
    pub fn commit_all(&self) {
        let ids: Vec<EntityId> = self.inner.read().local_edits.keys().copied().collect();
        self.commit_with_ids(&ids);
    }

    /// Commit the drafts matching `ids` through the committer, then clear
    /// them. Ids with no draft are skipped. The committer is invoked with
    /// whatever was collected, an empty batch included.
    ///
    /// The overlay lock is released before the committer runs: a store-backed
    /// committer fans the values back out to every session, this one
    /// included, and must be able to re-enter the overlay. The removal
    /// afterwards is idempotent when the fan-out already cleared the drafts.
    pub fn commit_with_ids(&self, ids: &[EntityId]) {
        let items: Vec<T> = {
            let state = self.inner.read();
            ids.iter()
                .filter_map(|id| state.local_edits.get(id).cloned())
                .collect()
        };
        self.committer.commit(items);
        let mut state = self.inner.write();
        for id in ids {
            state.local_edits.shift_remove(id);
        }
    }

    /// Refresh the snapshot layer with values from the global store.
    ///
    /// With `overwrite` set, drafts for the incoming ids are discarded so the
    /// committed values win; this is the post-commit fan-out path. Without
    /// it, drafts survive and keep shadowing the refreshed snapshot; this is
    /// the load-seed path.
    pub fn update_from_global_cache(&self, items: Vec<T>, overwrite: bool) {
        let mut state = self.inner.write();
        for item in items {
            let id = item.entity_id();
            if overwrite {
                state.local_edits.shift_remove(&id);
            }
            state.snapshot.insert(id, item);
        }
    }

    /// Number of uncommitted drafts.
    pub fn draft_count(&self) -> usize {
        self.inner.read().local_edits.len()
    }
}
