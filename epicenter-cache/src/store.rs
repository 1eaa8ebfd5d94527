//! Process-wide committed state.
//!
//! The [`GlobalStore`] holds the authoritative copy of every entity category.
//! Writes are last-write-wins at id granularity and every read hands out an
//! owned copy, so callers can never alias store-internal state.

use indexmap::IndexMap;
use parking_lot::RwLock;

use epicenter_core::{
    ChannelSegment, EntityId, Event, EventId, ProcessingActivityInterval, ProcessingStationData,
    QcMask, ReferenceStationData, SignalDetection, WaveformFilterDefinition, WorkflowData,
};

use crate::traits::CacheEntity;

// ============================================================================
// Id-keyed partition
// ============================================================================

struct EntityMap<T: CacheEntity> {
    inner: RwLock<IndexMap<EntityId, T>>,
}

impl<T: CacheEntity> EntityMap<T> {
    fn new() -> Self {
        Self {
            inner: RwLock::new(IndexMap::new()),
        }
    }

    fn has(&self, id: EntityId) -> bool {
        self.inner.read().contains_key(&id)
    }

    fn get(&self, id: EntityId) -> Option<T> {
        self.inner.read().get(&id).cloned()
    }

    fn list(&self) -> Vec<T> {
        self.inner.read().values().cloned().collect()
    }

    fn list_by_ids(&self, ids: &[EntityId]) -> Vec<T> {
        let map = self.inner.read();
        ids.iter().filter_map(|id| map.get(id).cloned()).collect()
    }

    fn snapshot(&self) -> IndexMap<EntityId, T> {
        self.inner.read().clone()
    }

    fn put(&self, item: T) {
        self.inner.write().insert(item.entity_id(), item);
    }

    fn put_all(&self, items: Vec<T>) {
        for item in items {
            self.put(item);
        }
    }

    fn count(&self) -> usize {
        self.inner.read().len()
    }
}

// ============================================================================
// Global store
// ============================================================================

/// The committed, process-wide cache state.
///
/// Events and signal detections also flow through per-session overlays; the
/// remaining categories are reference data with no draft layer and are read
/// and written here directly.
pub struct GlobalStore {
    events: EntityMap<Event>,
    signal_detections: EntityMap<SignalDetection>,
    qc_masks: EntityMap<QcMask>,
    channel_segments: EntityMap<ChannelSegment>,
    reference_stations: RwLock<IndexMap<String, ReferenceStationData>>,
    processing_stations: RwLock<ProcessingStationData>,
    workflow: RwLock<WorkflowData>,
    current_open_activity: RwLock<Option<ProcessingActivityInterval>>,
    waveform_filters: RwLock<Vec<WaveformFilterDefinition>>,
    configuration: RwLock<serde_json::Value>,
}

impl GlobalStore {
    pub fn new() -> Self {
        Self {
            events: EntityMap::new(),
            signal_detections: EntityMap::new(),
            qc_masks: EntityMap::new(),
            channel_segments: EntityMap::new(),
            reference_stations: RwLock::new(IndexMap::new()),
            processing_stations: RwLock::new(ProcessingStationData::default()),
            workflow: RwLock::new(WorkflowData::default()),
            current_open_activity: RwLock::new(None),
            waveform_filters: RwLock::new(Vec::new()),
            configuration: RwLock::new(serde_json::Value::Null),
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn event_has(&self, id: EventId) -> bool {
        self.events.has(id)
    }

    pub fn event_get(&self, id: EventId) -> Option<Event> {
        self.events.get(id)
    }

    pub fn event_list(&self) -> Vec<Event> {
        self.events.list()
    }

    /// Read the current values for `ids`; absent ids are skipped.
    pub fn event_list_by_ids(&self, ids: &[EventId]) -> Vec<Event> {
        self.events.list_by_ids(ids)
    }

    pub fn event_set(&self, event: Event) {
        self.events.put(event);
    }

    pub fn event_set_all(&self, events: Vec<Event>) {
        self.events.put_all(events);
    }

    pub(crate) fn event_snapshot(&self) -> IndexMap<EntityId, Event> {
        self.events.snapshot()
    }

    pub fn event_count(&self) -> usize {
        self.events.count()
    }

    // ------------------------------------------------------------------
    // Signal detections
    // ------------------------------------------------------------------

    pub fn signal_detection_has(&self, id: EntityId) -> bool {
        self.signal_detections.has(id)
    }

    pub fn signal_detection_get(&self, id: EntityId) -> Option<SignalDetection> {
        self.signal_detections.get(id)
    }

    pub fn signal_detection_list(&self) -> Vec<SignalDetection> {
        self.signal_detections.list()
    }

    /// Read the current values for `ids`; absent ids are skipped.
    pub fn signal_detection_list_by_ids(&self, ids: &[EntityId]) -> Vec<SignalDetection> {
        self.signal_detections.list_by_ids(ids)
    }

    pub fn signal_detection_set(&self, detection: SignalDetection) {
        self.signal_detections.put(detection);
    }

    pub fn signal_detection_set_all(&self, detections: Vec<SignalDetection>) {
        self.signal_detections.put_all(detections);
    }

    pub(crate) fn signal_detection_snapshot(&self) -> IndexMap<EntityId, SignalDetection> {
        self.signal_detections.snapshot()
    }

    pub fn signal_detection_count(&self) -> usize {
        self.signal_detections.count()
    }

    // ------------------------------------------------------------------
    // QC masks
    // ------------------------------------------------------------------

    pub fn qc_mask_has(&self, id: EntityId) -> bool {
        self.qc_masks.has(id)
    }

    pub fn qc_mask_get(&self, id: EntityId) -> Option<QcMask> {
        self.qc_masks.get(id)
    }

    pub fn qc_mask_list(&self) -> Vec<QcMask> {
        self.qc_masks.list()
    }

    pub fn qc_mask_set(&self, mask: QcMask) {
        self.qc_masks.put(mask);
    }

    pub fn qc_mask_set_all(&self, masks: Vec<QcMask>) {
        self.qc_masks.put_all(masks);
    }

    pub fn qc_mask_count(&self) -> usize {
        self.qc_masks.count()
    }

    // ------------------------------------------------------------------
    // Channel segments
    // ------------------------------------------------------------------

    pub fn channel_segment_has(&self, id: EntityId) -> bool {
        self.channel_segments.has(id)
    }

    pub fn channel_segment_get(&self, id: EntityId) -> Option<ChannelSegment> {
        self.channel_segments.get(id)
    }

    pub fn channel_segment_list(&self) -> Vec<ChannelSegment> {
        self.channel_segments.list()
    }

    pub fn channel_segment_set(&self, segment: ChannelSegment) {
        self.channel_segments.put(segment);
    }

    pub fn channel_segment_set_all(&self, segments: Vec<ChannelSegment>) {
        self.channel_segments.put_all(segments);
    }

    pub fn channel_segment_count(&self) -> usize {
        self.channel_segments.count()
    }

    // ------------------------------------------------------------------
    // Reference station data, keyed by network name
    // ------------------------------------------------------------------

    pub fn reference_station_has(&self, network_name: &str) -> bool {
        self.reference_stations.read().contains_key(network_name)
    }

    pub fn reference_station_get(&self, network_name: &str) -> Option<ReferenceStationData> {
        self.reference_stations.read().get(network_name).cloned()
    }

    pub fn reference_station_list(&self) -> Vec<ReferenceStationData> {
        self.reference_stations.read().values().cloned().collect()
    }

    /// Store station data under its network's name.
    pub fn reference_station_set(&self, data: ReferenceStationData) {
        self.reference_stations
            .write()
            .insert(data.network.name.clone(), data);
    }

    // ------------------------------------------------------------------
    // Whole-value reference categories
    // ------------------------------------------------------------------

    pub fn processing_station_get(&self) -> ProcessingStationData {
        self.processing_stations.read().clone()
    }

    pub fn processing_station_set(&self, data: ProcessingStationData) {
        *self.processing_stations.write() = data;
    }

    pub fn workflow_get(&self) -> WorkflowData {
        self.workflow.read().clone()
    }

    pub fn workflow_set(&self, workflow: WorkflowData) {
        *self.workflow.write() = workflow;
    }

    pub fn current_open_activity_get(&self) -> Option<ProcessingActivityInterval> {
        self.current_open_activity.read().clone()
    }

    pub fn current_open_activity_set(&self, activity: Option<ProcessingActivityInterval>) {
        *self.current_open_activity.write() = activity;
    }

    pub fn waveform_filters_get(&self) -> Vec<WaveformFilterDefinition> {
        self.waveform_filters.read().clone()
    }

    /// Replace the whole filter definition list.
    pub fn waveform_filters_set(&self, filters: Vec<WaveformFilterDefinition>) {
        *self.waveform_filters.write() = filters;
    }

    /// The system configuration document. `Null` until one is set.
    pub fn configuration_get(&self) -> serde_json::Value {
        self.configuration.read().clone()
    }

    pub fn configuration_set(&self, configuration: serde_json::Value) {
        *self.configuration.write() = configuration;
    }
}

impl Default for GlobalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epicenter_test_utils::fixtures;
    use serde_json::json;
    use uuid::Uuid;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_event_roundtrip_returns_copies() {
        let store = GlobalStore::new();
        store.event_set(fixtures::event_with(id(1), "IDC"));
        assert!(store.event_has(id(1)));

        let mut copy = store.event_get(id(1)).expect("event present");
        copy.monitoring_organization = "MUTATED".to_string();

        let fresh = store.event_get(id(1)).expect("event present");
        assert_eq!(fresh.monitoring_organization, "IDC");
    }

    #[test]
    fn test_event_set_all_is_last_write_wins_per_id() {
        let store = GlobalStore::new();
        store.event_set_all(vec![
            fixtures::event_with(id(1), "FIRST"),
            fixtures::event_with(id(1), "SECOND"),
        ]);
        assert_eq!(store.event_count(), 1);
        assert_eq!(
            store.event_get(id(1)).map(|e| e.monitoring_organization),
            Some("SECOND".to_string())
        );
    }

    #[test]
    fn test_event_list_preserves_insertion_order_across_updates() {
        let store = GlobalStore::new();
        store.event_set(fixtures::event_with(id(1), "A"));
        store.event_set(fixtures::event_with(id(2), "B"));
        store.event_set(fixtures::event_with(id(3), "C"));
        store.event_set(fixtures::event_with(id(2), "B2"));

        assert_eq!(
            store.event_list().iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![id(1), id(2), id(3)]
        );
    }

    #[test]
    fn test_list_by_ids_skips_absent_ids() {
        let store = GlobalStore::new();
        store.signal_detection_set(fixtures::detection_with(id(1), "ASAR"));

        let found = store.signal_detection_list_by_ids(&[id(9), id(1)]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].station_name, "ASAR");
    }

    #[test]
    fn test_reference_station_data_keyed_by_network_name() {
        let store = GlobalStore::new();
        store.reference_station_set(fixtures::reference_station_data("IMS_PRIMARY"));

        assert!(store.reference_station_has("IMS_PRIMARY"));
        assert!(!store.reference_station_has("IMS_AUX"));
        let data = store
            .reference_station_get("IMS_PRIMARY")
            .expect("network present");
        assert_eq!(data.network.name, "IMS_PRIMARY");
        assert_eq!(store.reference_station_list().len(), 1);
    }

    #[test]
    fn test_waveform_filters_replace_whole_list() {
        let store = GlobalStore::new();
        store.waveform_filters_set(vec![
            fixtures::waveform_filter("HAM FIR BP 0.70-2.00 Hz"),
            fixtures::waveform_filter("HAM FIR BP 1.00-3.00 Hz"),
        ]);
        store.waveform_filters_set(vec![fixtures::waveform_filter("HAM FIR BP 4.00-8.00 Hz")]);

        let filters = store.waveform_filters_get();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].name, "HAM FIR BP 4.00-8.00 Hz");
    }

    #[test]
    fn test_configuration_defaults_to_null_and_roundtrips() {
        let store = GlobalStore::new();
        assert!(store.configuration_get().is_null());

        store.configuration_set(json!({ "defaultNetwork": "demo", "leadBufferDuration": 900 }));
        assert_eq!(
            store.configuration_get()["defaultNetwork"],
            json!("demo")
        );
    }

    #[test]
    fn test_current_open_activity_roundtrip() {
        let store = GlobalStore::new();
        assert!(store.current_open_activity_get().is_none());

        let interval = fixtures::activity_interval(
            id(1),
            id(2),
            epicenter_core::IntervalStatus::InProgress,
        );
        store.current_open_activity_set(Some(interval.clone()));
        assert_eq!(store.current_open_activity_get(), Some(interval));

        store.current_open_activity_set(None);
        assert!(store.current_open_activity_get().is_none());
    }

    #[test]
    fn test_whole_value_categories_roundtrip_copies() {
        let store = GlobalStore::new();

        let stations = fixtures::processing_station_data();
        store.processing_station_set(stations.clone());
        assert_eq!(store.processing_station_get(), stations);

        let workflow = fixtures::workflow_data();
        store.workflow_set(workflow.clone());
        let mut copy = store.workflow_get();
        copy.stages.clear();
        assert_eq!(store.workflow_get(), workflow);
    }
}
