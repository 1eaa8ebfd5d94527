//! One analyst's working context.
//!
//! A [`Session`] owns a draft overlay per interactive entity category plus
//! the visible time range the analyst is working in. Sessions are shared as
//! `Arc<Session>` handles; all interior state is lock-protected.

use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::RwLock;

use epicenter_core::{EntityId, Event, SessionId, SignalDetection, TimeRange, Timestamp};

use crate::overlay::SessionOverlay;
use crate::store::GlobalStore;
use crate::traits::CacheEntity;

pub struct Session {
    id: SessionId,
    created_at: Timestamp,
    time_range: RwLock<TimeRange>,
    events: SessionOverlay<Event>,
    signal_detections: SessionOverlay<SignalDetection>,
}

impl Session {
    pub fn new(
        id: SessionId,
        time_range: TimeRange,
        events: SessionOverlay<Event>,
        signal_detections: SessionOverlay<SignalDetection>,
    ) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            time_range: RwLock::new(time_range),
            events,
            signal_detections,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn time_range(&self) -> TimeRange {
        *self.time_range.read()
    }

    pub fn set_time_range(&self, range: TimeRange) {
        *self.time_range.write() = range;
    }

    /// The event draft overlay.
    pub fn events(&self) -> &SessionOverlay<Event> {
        &self.events
    }

    /// The signal detection draft overlay.
    pub fn signal_detections(&self) -> &SessionOverlay<SignalDetection> {
        &self.signal_detections
    }
}

/// Routing glue for entity categories that carry per-session drafts.
///
/// Commit and fan-out code is generic over the category; this trait maps a
/// category to its overlay within a session and to its partition of the
/// global store.
pub trait SessionEntity: CacheEntity {
    /// Lower-case noun for log lines.
    fn kind() -> &'static str;
    fn overlay(session: &Session) -> &SessionOverlay<Self>;
    fn store_list_by_ids(store: &GlobalStore, ids: &[EntityId]) -> Vec<Self>;
    fn store_write_all(store: &GlobalStore, items: Vec<Self>);
    fn store_snapshot(store: &GlobalStore) -> IndexMap<EntityId, Self>;
}

impl SessionEntity for Event {
    fn kind() -> &'static str {
        "event"
    }

    fn overlay(session: &Session) -> &SessionOverlay<Self> {
        &session.events
    }

    fn store_list_by_ids(store: &GlobalStore, ids: &[EntityId]) -> Vec<Self> {
        store.event_list_by_ids(ids)
    }

    fn store_write_all(store: &GlobalStore, items: Vec<Self>) {
        store.event_set_all(items);
    }

    fn store_snapshot(store: &GlobalStore) -> IndexMap<EntityId, Self> {
        store.event_snapshot()
    }
}

impl SessionEntity for SignalDetection {
    fn kind() -> &'static str {
        "signal detection"
    }

    fn overlay(session: &Session) -> &SessionOverlay<Self> {
        &session.signal_detections
    }

    fn store_list_by_ids(store: &GlobalStore, ids: &[EntityId]) -> Vec<Self> {
        store.signal_detection_list_by_ids(ids)
    }

    fn store_write_all(store: &GlobalStore, items: Vec<Self>) {
        store.signal_detection_set_all(items);
    }

    fn store_snapshot(store: &GlobalStore) -> IndexMap<EntityId, Self> {
        store.signal_detection_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Committer;
    use epicenter_test_utils::fixtures;
    use std::sync::Arc;
    use uuid::Uuid;

    struct NullCommitter;

    impl<T: CacheEntity> Committer<T> for NullCommitter {
        fn commit(&self, _items: Vec<T>) {}
    }

    fn session(id: &str) -> Session {
        Session::new(
            id.to_string(),
            TimeRange::new(0.0, 7200.0),
            SessionOverlay::new(IndexMap::new(), Arc::new(NullCommitter)),
            SessionOverlay::new(IndexMap::new(), Arc::new(NullCommitter)),
        )
    }

    #[test]
    fn test_time_range_roundtrip() {
        let session = session("analyst-1");
        assert_eq!(session.time_range(), TimeRange::new(0.0, 7200.0));

        session.set_time_range(TimeRange::new(3600.0, 10800.0));
        assert_eq!(session.time_range(), TimeRange::new(3600.0, 10800.0));
    }

    #[test]
    fn test_session_entity_routes_to_matching_overlay() {
        let session = session("analyst-1");
        Event::overlay(&session).set(fixtures::event_with(Uuid::from_u128(1), "IDC"));
        SignalDetection::overlay(&session)
            .set(fixtures::detection_with(Uuid::from_u128(2), "ASAR"));

        assert_eq!(session.events().draft_count(), 1);
        assert_eq!(session.signal_detections().draft_count(), 1);
        assert!(session.events().has(Uuid::from_u128(1)));
        assert!(!session.events().has(Uuid::from_u128(2)));
    }

    #[test]
    fn test_session_entity_routes_to_matching_store_partition() {
        let store = GlobalStore::new();
        Event::store_write_all(&store, vec![fixtures::event_with(Uuid::from_u128(1), "IDC")]);

        assert_eq!(store.event_count(), 1);
        assert_eq!(store.signal_detection_count(), 0);
        let found = Event::store_list_by_ids(&store, &[Uuid::from_u128(1), Uuid::from_u128(9)]);
        assert_eq!(found.len(), 1);
    }
}
