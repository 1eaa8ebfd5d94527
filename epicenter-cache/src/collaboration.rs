//! Shared collaboration state.
//!
//! Tracks which analysts are currently engaged with which event so clients
//! can show who else is working the same data.

use indexmap::IndexMap;
use parking_lot::RwLock;

use epicenter_core::{EventId, EventToUsers, WorkspaceState};

pub struct CollaborationState {
    inner: RwLock<IndexMap<EventId, Vec<String>>>,
}

impl CollaborationState {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(IndexMap::new()),
        }
    }

    /// Record that the analyst is working this event. Idempotent: adding an
    /// already-listed analyst changes nothing.
    pub fn add_user_to_event(&self, event_id: EventId, user_name: &str) {
        let mut map = self.inner.write();
        let users = map.entry(event_id).or_default();
        if !users.iter().any(|u| u == user_name) {
            users.push(user_name.to_string());
        }
    }

    /// Drop the analyst from this event's list; no-op when the event or the
    /// analyst is absent. The event entry itself survives, possibly empty.
    pub fn remove_user_from_event(&self, event_id: EventId, user_name: &str) {
        let mut map = self.inner.write();
        if let Some(users) = map.get_mut(&event_id) {
            users.retain(|u| u != user_name);
        }
    }

    pub fn users_for_event(&self, event_id: EventId) -> Vec<String> {
        self.inner
            .read()
            .get(&event_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Copy out the whole mapping for publication to clients.
    pub fn workspace_state(&self) -> WorkspaceState {
        let map = self.inner.read();
        WorkspaceState {
            event_to_users: map
                .iter()
                .map(|(event_id, user_names)| EventToUsers {
                    event_id: *event_id,
                    user_names: user_names.clone(),
                })
                .collect(),
        }
    }
}

impl Default for CollaborationState {
    fn default() -> Self {
        Self::new()
    }
}
