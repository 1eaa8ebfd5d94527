//! Entity types for the EPICENTER analysis cache.
//!
//! Pure data structures. Every entity is acyclic plain data, so a structural
//! deep copy is `Clone` and nothing more.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{
    ChannelDataType, ChannelSegmentType, EventStatus, FilterPassBandType, FilterType, IntervalStatus,
    QcMaskCategory, QcMaskType, StationType, TimeSeriesType,
};
use crate::identity::{DetectionId, EpochSeconds, EventId, IntervalId, MaskId, SegmentId};

// ============================================================================
// TIME
// ============================================================================

/// Inclusive time range in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_time: EpochSeconds,
    pub end_time: EpochSeconds,
}

impl TimeRange {
    pub fn new(start_time: EpochSeconds, end_time: EpochSeconds) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Length of the range in seconds.
    pub fn duration(&self) -> EpochSeconds {
        self.end_time - self.start_time
    }

    /// Whether `time` falls within the range (inclusive on both ends).
    pub fn contains(&self, time: EpochSeconds) -> bool {
        self.start_time <= time && time <= self.end_time
    }

    /// Whether two ranges overlap at any point.
    pub fn intersects(&self, other: &TimeRange) -> bool {
        self.start_time <= other.end_time && other.start_time <= self.end_time
    }

    /// Snap `start_time` down and `end_time` up to `interval_secs` boundaries,
    /// so a viewport always covers whole processing intervals. A degenerate
    /// input (end at or before start) widens to a single interval.
    pub fn normalized(
        start_time: EpochSeconds,
        end_time: EpochSeconds,
        interval_secs: EpochSeconds,
    ) -> Self {
        let start = (start_time / interval_secs).floor() * interval_secs;
        let mut end = (end_time / interval_secs).ceil() * interval_secs;
        if end <= start {
            end = start + interval_secs;
        }
        Self {
            start_time: start,
            end_time: end,
        }
    }
}

/// Geographic location of an event origin or a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub depth_km: f64,
    pub elevation_km: f64,
}

// ============================================================================
// EVENTS AND SIGNAL DETECTIONS
// ============================================================================

/// A seismic event under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub monitoring_organization: String,
    pub status: EventStatus,
    /// Origin time of the preferred hypothesis.
    pub time: EpochSeconds,
    pub location: Location,
    pub preferred_hypothesis_id: Uuid,
    /// Detections currently associated with the event.
    pub signal_detection_ids: Vec<DetectionId>,
}

/// A signal detection recorded at one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDetection {
    pub id: DetectionId,
    pub monitoring_organization: String,
    pub station_name: String,
    /// Phase label of the current hypothesis (P, S, Lg, ...).
    pub phase: String,
    pub arrival_time: EpochSeconds,
    pub current_hypothesis_id: Uuid,
}

// ============================================================================
// QC MASKS
// ============================================================================

/// One immutable revision of a QC mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcMaskVersion {
    pub version: u32,
    pub category: QcMaskCategory,
    pub mask_type: QcMaskType,
    pub start_time: EpochSeconds,
    pub end_time: EpochSeconds,
    pub channel_segment_ids: Vec<SegmentId>,
    pub parent_mask_ids: Vec<MaskId>,
    pub rationale: String,
}

/// Quality-control mask over a channel, carrying its full version history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcMask {
    pub id: MaskId,
    pub channel_name: String,
    pub versions: Vec<QcMaskVersion>,
}

impl QcMask {
    /// The latest version, if any exist.
    pub fn current_version(&self) -> Option<&QcMaskVersion> {
        self.versions.last()
    }
}

// ============================================================================
// CHANNEL SEGMENTS
// ============================================================================

/// Sampled waveform data within a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    pub start_time: EpochSeconds,
    pub sample_rate_hz: f64,
    pub sample_count: u64,
    pub values: Vec<f64>,
}

/// A contiguous run of time-series data from one channel (raw or derived).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSegment {
    pub id: SegmentId,
    pub name: String,
    pub channel_name: String,
    pub segment_type: ChannelSegmentType,
    pub timeseries_type: TimeSeriesType,
    pub start_time: EpochSeconds,
    pub end_time: EpochSeconds,
    pub timeseries: Vec<Waveform>,
}

// ============================================================================
// WAVEFORM FILTERS
// ============================================================================

/// A filter an analyst can apply to waveform displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformFilterDefinition {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub filter_type: FilterType,
    pub pass_band_type: FilterPassBandType,
    pub low_frequency_hz: f64,
    pub high_frequency_hz: f64,
    pub order: u32,
    pub zero_phase: bool,
    pub causal: bool,
    pub sample_rate_hz: f64,
}

// ============================================================================
// REFERENCE STATION DATA
// ============================================================================

/// A monitoring network as defined in the reference data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceNetwork {
    pub name: String,
    pub monitoring_organization: String,
    pub description: String,
}

/// A station as defined in the reference data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceStation {
    pub name: String,
    pub station_type: StationType,
    pub location: Location,
    pub description: String,
}

/// Reference data for one network, keyed in the store by `network.name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceStationData {
    pub network: ReferenceNetwork,
    pub stations: Vec<ReferenceStation>,
}

// ============================================================================
// PROCESSING STATION DATA
// ============================================================================

/// Named group of processing stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStationGroup {
    pub name: String,
    pub description: String,
    pub station_names: Vec<String>,
}

/// A station in the processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStation {
    pub name: String,
    pub station_type: StationType,
    pub description: String,
    pub location: Location,
    pub channel_group_names: Vec<String>,
}

/// Named group of channels belonging to one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingChannelGroup {
    pub name: String,
    pub description: String,
    pub channel_names: Vec<String>,
}

/// A channel in the processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingChannel {
    pub name: String,
    pub canonical_name: String,
    pub station_name: String,
    pub data_type: ChannelDataType,
    pub sample_rate_hz: f64,
}

/// The full processing-station configuration, held as one aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStationData {
    pub station_groups: HashMap<String, ProcessingStationGroup>,
    pub stations: HashMap<String, ProcessingStation>,
    pub channel_groups: HashMap<String, ProcessingChannelGroup>,
    pub channels: HashMap<String, ProcessingChannel>,
    /// Station-group membership used by state-of-health displays.
    pub soh_station_group_names: HashMap<String, Vec<String>>,
}

// ============================================================================
// WORKFLOW DATA
// ============================================================================

/// A processing stage in the analysis workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStage {
    pub id: IntervalId,
    pub name: String,
}

/// An activity performed within a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingActivity {
    pub id: IntervalId,
    pub name: String,
    pub stage_id: IntervalId,
}

/// A wall-clock interval the workflow is partitioned into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingInterval {
    pub id: IntervalId,
    pub start_time: EpochSeconds,
    pub end_time: EpochSeconds,
}

/// One stage's slice of a processing interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStageInterval {
    pub id: IntervalId,
    pub stage_id: IntervalId,
    pub interval_id: IntervalId,
    pub start_time: EpochSeconds,
    pub end_time: EpochSeconds,
    pub status: IntervalStatus,
    pub completed_by_user_names: Vec<String>,
}

/// One activity's slice of a stage interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingActivityInterval {
    pub id: IntervalId,
    pub activity_id: IntervalId,
    pub stage_interval_id: IntervalId,
    pub status: IntervalStatus,
    pub active_analyst_user_names: Vec<String>,
    pub completed_by_user_name: Option<String>,
    pub time_started: Option<EpochSeconds>,
}

/// An analyst known to the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analyst {
    pub user_name: String,
}

/// The full workflow state, held as one aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowData {
    pub stages: Vec<ProcessingStage>,
    pub activities: Vec<ProcessingActivity>,
    pub intervals: Vec<ProcessingInterval>,
    pub stage_intervals: Vec<ProcessingStageInterval>,
    pub activity_intervals: Vec<ProcessingActivityInterval>,
    pub analysts: Vec<Analyst>,
}

// ============================================================================
// COLLABORATION VIEWS
// ============================================================================

/// The analysts currently engaged with one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventToUsers {
    pub event_id: EventId,
    pub user_names: Vec<String>,
}

/// Snapshot of who is working what, shared across all sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceState {
    pub event_to_users: Vec<EventToUsers>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::new_entity_id;

    #[test]
    fn test_time_range_duration_and_contains() {
        let range = TimeRange::new(100.0, 400.0);
        assert_eq!(range.duration(), 300.0);
        assert!(range.contains(100.0));
        assert!(range.contains(250.0));
        assert!(range.contains(400.0));
        assert!(!range.contains(400.5));
    }

    #[test]
    fn test_time_range_intersects() {
        let a = TimeRange::new(0.0, 100.0);
        let b = TimeRange::new(100.0, 200.0);
        let c = TimeRange::new(200.5, 300.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_time_range_normalized_snaps_to_interval_boundaries() {
        let range = TimeRange::normalized(7250.0, 14500.0, 7200.0);
        assert_eq!(range.start_time, 7200.0);
        assert_eq!(range.end_time, 21600.0);
    }

    #[test]
    fn test_time_range_normalized_widens_degenerate_input() {
        let range = TimeRange::normalized(7200.0, 7200.0, 7200.0);
        assert_eq!(range.start_time, 7200.0);
        assert_eq!(range.end_time, 14400.0);
    }

    #[test]
    fn test_qc_mask_current_version_is_latest() {
        let version = |n: u32| QcMaskVersion {
            version: n,
            category: QcMaskCategory::AnalystDefined,
            mask_type: QcMaskType::Spike,
            start_time: 0.0,
            end_time: 1.0,
            channel_segment_ids: vec![],
            parent_mask_ids: vec![],
            rationale: "spike in raw data".to_string(),
        };
        let mask = QcMask {
            id: new_entity_id(),
            channel_name: "ASAR.AS01.SHZ".to_string(),
            versions: vec![version(0), version(1)],
        };
        let current = mask.current_version().expect("mask has versions");
        assert_eq!(current.version, 1);

        let empty = QcMask {
            id: new_entity_id(),
            channel_name: "ASAR.AS01.SHZ".to_string(),
            versions: vec![],
        };
        assert!(empty.current_version().is_none());
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_interval_secs() -> impl Strategy<Value = f64> {
        prop_oneof![Just(60.0), Just(300.0), Just(3600.0), Just(7200.0)]
    }

    // Times are drawn on a half-second grid so every intermediate value is
    // exactly representable and the assertions hold exactly.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// A normalized range covers the requested one: the start never moves
        /// later and the end never moves earlier.
        #[test]
        fn prop_normalized_covers_input(
            start_halves in -2_000_000..2_000_000i64,
            width_halves in 0..2_000_000i64,
            interval in arb_interval_secs(),
        ) {
            let start = start_halves as f64 * 0.5;
            let end = start + width_halves as f64 * 0.5;
            let range = TimeRange::normalized(start, end, interval);
            prop_assert!(range.start_time <= start);
            prop_assert!(range.end_time >= end);
        }

        /// Both endpoints land on interval boundaries.
        #[test]
        fn prop_normalized_endpoints_land_on_boundaries(
            start_halves in -2_000_000..2_000_000i64,
            width_halves in 0..2_000_000i64,
            interval in arb_interval_secs(),
        ) {
            let start = start_halves as f64 * 0.5;
            let end = start + width_halves as f64 * 0.5;
            let range = TimeRange::normalized(start, end, interval);
            prop_assert_eq!((range.start_time / interval).fract(), 0.0);
            prop_assert_eq!((range.end_time / interval).fract(), 0.0);
        }

        /// A degenerate request always widens to exactly one interval.
        #[test]
        fn prop_normalized_degenerate_spans_one_interval(
            start_halves in -2_000_000..2_000_000i64,
            interval in arb_interval_secs(),
        ) {
            let start = start_halves as f64 * 0.5;
            let range = TimeRange::normalized(start, start, interval);
            prop_assert_eq!(range.duration(), interval);
            prop_assert!(range.contains(start));
        }
    }
}
