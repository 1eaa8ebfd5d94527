//! EPICENTER Core - Entity Types
//!
//! Pure data structures for the seismic analysis cache. All other crates in
//! the workspace depend on this one; it contains only data types, settings,
//! and errors - no cache behavior.

pub mod config;
pub mod entities;
pub mod enums;
pub mod error;
pub mod identity;

pub use config::CacheSettings;
pub use entities::{
    Analyst, ChannelSegment, Event, EventToUsers, Location, ProcessingActivity,
    ProcessingActivityInterval, ProcessingChannel, ProcessingChannelGroup, ProcessingInterval,
    ProcessingStage, ProcessingStageInterval, ProcessingStation, ProcessingStationData,
    ProcessingStationGroup, QcMask, QcMaskVersion, ReferenceNetwork, ReferenceStation,
    ReferenceStationData, SignalDetection, TimeRange, Waveform, WaveformFilterDefinition,
    WorkflowData, WorkspaceState,
};
pub use enums::{
    ChannelDataType, ChannelSegmentType, EventStatus, FilterPassBandType, FilterType,
    IntervalStatus, QcMaskCategory, QcMaskType, StationType, TimeSeriesType,
};
pub use error::{ConfigError, EpicenterError, EpicenterResult};
pub use identity::{
    epoch_seconds_now, new_entity_id, DetectionId, EntityId, EpochSeconds, EventId, IntervalId,
    MaskId, SegmentId, SessionId, Timestamp,
};
