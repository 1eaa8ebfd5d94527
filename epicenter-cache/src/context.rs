//! Cache orchestration.
//!
//! [`CacheContext`] is the single owning handle for the process. It wires
//! the global store, the session registry, and the collaboration state
//! together and funnels every commit and load-seed through the fan-out that
//! keeps all live sessions consistent.

use std::marker::PhantomData;
use std::sync::{Arc, Weak};

use epicenter_core::{
    epoch_seconds_now, CacheSettings, ChannelSegment, EntityId, EpicenterResult, Event, EventId,
    ProcessingActivityInterval, ProcessingStationData, QcMask, ReferenceStationData,
    SignalDetection, TimeRange, WaveformFilterDefinition, WorkflowData, WorkspaceState,
};

use crate::collaboration::CollaborationState;
use crate::overlay::SessionOverlay;
use crate::registry::SessionRegistry;
use crate::session::{Session, SessionEntity};
use crate::store::GlobalStore;
use crate::traits::Committer;

// ============================================================================
// Commit plumbing
// ============================================================================

/// Publishes a session's committed drafts into the global store, then fans
/// the committed ids back out to every live session, the committing one
/// included.
///
/// The registry is held weakly: sessions own their committer through the
/// overlay and the registry owns the sessions, so a strong handle here would
/// close a reference cycle.
struct StoreCommitter<T: SessionEntity> {
    store: Arc<GlobalStore>,
    registry: Weak<SessionRegistry>,
    _entity: PhantomData<T>,
}

impl<T: SessionEntity> StoreCommitter<T> {
    fn new(store: Arc<GlobalStore>, registry: Weak<SessionRegistry>) -> Self {
        Self {
            store,
            registry,
            _entity: PhantomData,
        }
    }
}

impl<T: SessionEntity> Committer<T> for StoreCommitter<T> {
    fn commit(&self, items: Vec<T>) {
        let ids: Vec<EntityId> = items.iter().map(|item| item.entity_id()).collect();
        T::store_write_all(&self.store, items);
        if let Some(registry) = self.registry.upgrade() {
            fan_out::<T>(&self.store, &registry, &ids, true);
        }
        tracing::debug!(
            kind = T::kind(),
            count = ids.len(),
            "Committed drafts to the global store"
        );
    }
}

/// Push the current global values for `ids` into every live session's
/// matching overlay.
///
/// Iterates a registry snapshot, so racing session creates and removals
/// never invalidate the walk. The store is read fresh for each session and
/// every session receives its own copies.
fn fan_out<T: SessionEntity>(
    store: &GlobalStore,
    registry: &SessionRegistry,
    ids: &[EntityId],
    overwrite: bool,
) {
    let sessions = registry.snapshot();
    for session in sessions.values() {
        let values = T::store_list_by_ids(store, ids);
        T::overlay(session).update_from_global_cache(values, overwrite);
    }
    tracing::debug!(
        kind = T::kind(),
        sessions = sessions.len(),
        ids = ids.len(),
        overwrite,
        "Fanned out global values to live sessions"
    );
}

// ============================================================================
// Cache context
// ============================================================================

pub struct CacheContext {
    store: Arc<GlobalStore>,
    registry: Arc<SessionRegistry>,
    collaboration: CollaborationState,
    settings: CacheSettings,
}

impl CacheContext {
    /// Build a context with validated settings and empty state.
    pub fn new(settings: CacheSettings) -> EpicenterResult<Self> {
        settings.validate()?;
        Ok(Self {
            store: Arc::new(GlobalStore::new()),
            registry: Arc::new(SessionRegistry::new()),
            collaboration: CollaborationState::new(),
            settings,
        })
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// The viewport a session created right now would start with: the
    /// configured lookback window ending at the current time, normalized to
    /// interval boundaries.
    pub fn initial_time_range(&self) -> TimeRange {
        self.settings.initial_time_range(epoch_seconds_now())
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// Return the session for `session_id`, creating it on first use.
    ///
    /// A new session receives private copies of the current global events
    /// and signal detections plus the configured initial time range. An
    /// empty id is logged and tolerated rather than rejected: the request
    /// proceeds under the empty-string key.
    pub fn get_or_create_session(&self, session_id: &str) -> Arc<Session> {
        if session_id.is_empty() {
            tracing::error!("Undefined session id; proceeding under the empty key");
        }
        self.registry.get_or_insert_with(session_id, || {
            let time_range = self.initial_time_range();
            tracing::info!(
                session_id,
                events = self.store.event_count(),
                signal_detections = self.store.signal_detection_count(),
                "Created analyst session"
            );
            Arc::new(Session::new(
                session_id.to_string(),
                time_range,
                self.overlay_for::<Event>(),
                self.overlay_for::<SignalDetection>(),
            ))
        })
    }

    fn overlay_for<T: SessionEntity>(&self) -> SessionOverlay<T> {
        SessionOverlay::new(
            T::store_snapshot(&self.store),
            Arc::new(StoreCommitter::<T>::new(
                self.store.clone(),
                Arc::downgrade(&self.registry),
            )),
        )
    }

    /// Tear down a session; no-op when absent.
    pub fn delete_session(&self, session_id: &str) {
        if self.registry.remove(session_id).is_some() {
            tracing::info!(session_id, "Deleted analyst session");
        }
    }

    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    // ------------------------------------------------------------------
    // Load seeding
    // ------------------------------------------------------------------

    /// Publish freshly loaded events and refresh every live session's
    /// snapshot for them. Existing drafts survive.
    pub fn add_loaded_events(&self, events: Vec<Event>) {
        self.seed_from_load(events);
    }

    /// Publish freshly loaded signal detections and refresh every live
    /// session's snapshot for them. Existing drafts survive.
    pub fn add_loaded_signal_detections(&self, detections: Vec<SignalDetection>) {
        self.seed_from_load(detections);
    }

    fn seed_from_load<T: SessionEntity>(&self, items: Vec<T>) {
        let ids: Vec<EntityId> = items.iter().map(|item| item.entity_id()).collect();
        T::store_write_all(&self.store, items);
        fan_out::<T>(&self.store, &self.registry, &ids, false);
        tracing::debug!(
            kind = T::kind(),
            count = ids.len(),
            "Seeded loaded values into live sessions"
        );
    }

    // ------------------------------------------------------------------
    // Reference-data pass-throughs
    // ------------------------------------------------------------------

    pub fn configuration_get(&self) -> serde_json::Value {
        self.store.configuration_get()
    }

    pub fn configuration_set(&self, configuration: serde_json::Value) {
        self.store.configuration_set(configuration);
    }

    pub fn reference_station_has(&self, network_name: &str) -> bool {
        self.store.reference_station_has(network_name)
    }

    pub fn reference_station_get(&self, network_name: &str) -> Option<ReferenceStationData> {
        self.store.reference_station_get(network_name)
    }

    pub fn reference_station_list(&self) -> Vec<ReferenceStationData> {
        self.store.reference_station_list()
    }

    pub fn reference_station_set(&self, data: ReferenceStationData) {
        self.store.reference_station_set(data);
    }

    pub fn processing_station_get(&self) -> ProcessingStationData {
        self.store.processing_station_get()
    }

    pub fn processing_station_set(&self, data: ProcessingStationData) {
        self.store.processing_station_set(data);
    }

    pub fn workflow_get(&self) -> WorkflowData {
        self.store.workflow_get()
    }

    pub fn workflow_set(&self, workflow: WorkflowData) {
        self.store.workflow_set(workflow);
    }

    pub fn current_open_activity_get(&self) -> Option<ProcessingActivityInterval> {
        self.store.current_open_activity_get()
    }

    pub fn current_open_activity_set(&self, activity: Option<ProcessingActivityInterval>) {
        self.store.current_open_activity_set(activity);
    }

    pub fn waveform_filters_get(&self) -> Vec<WaveformFilterDefinition> {
        self.store.waveform_filters_get()
    }

    pub fn waveform_filters_set(&self, filters: Vec<WaveformFilterDefinition>) {
        self.store.waveform_filters_set(filters);
    }

    pub fn channel_segment_has(&self, id: EntityId) -> bool {
        self.store.channel_segment_has(id)
    }

    pub fn channel_segment_get(&self, id: EntityId) -> Option<ChannelSegment> {
        self.store.channel_segment_get(id)
    }

    pub fn channel_segment_list(&self) -> Vec<ChannelSegment> {
        self.store.channel_segment_list()
    }

    pub fn channel_segment_set(&self, segment: ChannelSegment) {
        self.store.channel_segment_set(segment);
    }

    pub fn channel_segment_set_all(&self, segments: Vec<ChannelSegment>) {
        self.store.channel_segment_set_all(segments);
    }

    pub fn qc_mask_has(&self, id: EntityId) -> bool {
        self.store.qc_mask_has(id)
    }

    pub fn qc_mask_get(&self, id: EntityId) -> Option<QcMask> {
        self.store.qc_mask_get(id)
    }

    pub fn qc_mask_list(&self) -> Vec<QcMask> {
        self.store.qc_mask_list()
    }

    pub fn qc_mask_set(&self, mask: QcMask) {
        self.store.qc_mask_set(mask);
    }

    pub fn qc_mask_set_all(&self, masks: Vec<QcMask>) {
        self.store.qc_mask_set_all(masks);
    }

    // ------------------------------------------------------------------
    // Collaboration state
    // ------------------------------------------------------------------

    pub fn add_user_to_event(&self, event_id: EventId, user_name: &str) {
        self.collaboration.add_user_to_event(event_id, user_name);
    }

    pub fn remove_user_from_event(&self, event_id: EventId, user_name: &str) {
        self.collaboration.remove_user_from_event(event_id, user_name);
    }

    pub fn users_for_event(&self, event_id: EventId) -> Vec<String> {
        self.collaboration.users_for_event(event_id)
    }

    pub fn workspace_state(&self) -> WorkspaceState {
        self.collaboration.workspace_state()
    }
}
