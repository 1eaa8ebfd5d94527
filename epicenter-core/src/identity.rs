//! Identity types for EPICENTER entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generic entity identifier used by the cache plumbing.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type EntityId = Uuid;

/// Identifier of a seismic event.
pub type EventId = Uuid;

/// Identifier of a signal detection.
pub type DetectionId = Uuid;

/// Identifier of a QC mask.
pub type MaskId = Uuid;

/// Identifier of a channel segment.
pub type SegmentId = Uuid;

/// Identifier of a workflow interval (stage, activity, or time interval).
pub type IntervalId = Uuid;

/// Analyst session key as issued by the HTTP session layer.
/// May be empty when a request arrives without an established session.
pub type SessionId = String;

/// Seconds since the Unix epoch. Seismic time values (arrival times,
/// interval boundaries) are carried in this representation end to end.
pub type EpochSeconds = f64;

/// Timestamp type using UTC timezone, for wall-clock bookkeeping.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 EntityId (timestamp-sortable).
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}

/// Current wall-clock time as epoch seconds.
pub fn epoch_seconds_now() -> EpochSeconds {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
