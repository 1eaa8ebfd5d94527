//! Entity and committer seams for the cache layer.
//!
//! This module defines the traits the cache plumbing is generic over: which
//! types it manages by id, and where a session overlay sends its committed
//! drafts.

use epicenter_core::{ChannelSegment, EntityId, Event, QcMask, SignalDetection};

/// Marker trait for plain-data entities the cache manages by id.
///
/// # Implementation Requirements
///
/// - `entity_id()` must return the stable unique identifier for this instance
/// - Implementations must be `Clone` - a clone is a full structural copy,
///   which is what crosses every global/session boundary
/// - Implementations must be `Send + Sync + 'static` so entities can move
///   freely between request-handling threads
pub trait CacheEntity: Clone + Send + Sync + 'static {
    /// Get the unique identifier for this entity.
    fn entity_id(&self) -> EntityId;
}

/// Sink for a session overlay's committed drafts.
///
/// Implemented on the orchestrator side and injected into each overlay at
/// construction. The overlay hands every committed batch to its committer and
/// knows nothing else about what happens to it; the committer writes the
/// values into the global store and propagates the change to live sessions.
pub trait Committer<T>: Send + Sync {
    /// Accept a batch of committed draft values.
    fn commit(&self, items: Vec<T>);
}

// ============================================================================
// IMPLEMENTATIONS FOR EPICENTER ENTITIES
// ============================================================================

impl CacheEntity for Event {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

impl CacheEntity for SignalDetection {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

impl CacheEntity for QcMask {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

impl CacheEntity for ChannelSegment {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epicenter_test_utils::fixtures;

    #[test]
    fn test_entity_id_matches_id_field() {
        let event = fixtures::event();
        assert_eq!(event.entity_id(), event.id);

        let detection = fixtures::detection();
        assert_eq!(detection.entity_id(), detection.id);

        let mask = fixtures::qc_mask("ASAR.AS01.SHZ");
        assert_eq!(mask.entity_id(), mask.id);

        let segment = fixtures::channel_segment("ASAR.AS01.SHZ");
        assert_eq!(segment.entity_id(), segment.id);
    }
}
