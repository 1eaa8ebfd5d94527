//! EPICENTER Test Utilities
//!
//! Centralized test infrastructure for the EPICENTER workspace:
//! - Pre-built entity fixtures for common scenarios
//! - Proptest generators for entity types

// Re-export core types for convenience
pub use epicenter_core::{
    epoch_seconds_now, new_entity_id, Analyst, CacheSettings, ChannelDataType, ChannelSegment,
    ChannelSegmentType, DetectionId, EntityId, EpochSeconds, Event, EventId, EventStatus,
    FilterPassBandType, FilterType, IntervalStatus, Location, MaskId, ProcessingActivity,
    ProcessingActivityInterval, ProcessingChannel, ProcessingInterval, ProcessingStage,
    ProcessingStageInterval, ProcessingStation, ProcessingStationData, QcMask, QcMaskCategory,
    QcMaskType, QcMaskVersion, ReferenceNetwork, ReferenceStation, ReferenceStationData,
    SegmentId, SignalDetection, StationType, TimeRange, TimeSeriesType, Waveform,
    WaveformFilterDefinition, WorkflowData,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;
    use uuid::Uuid;

    /// Valid cache settings with short windows, convenient for assertions.
    pub fn settings() -> CacheSettings {
        CacheSettings::new()
            .with_interval_duration_secs(7200.0)
            .with_initial_lookback_secs(43200.0)
    }

    /// An event with a fresh id.
    pub fn event() -> Event {
        event_with(new_entity_id(), "CTBTO")
    }

    /// An event with the given id and monitoring organization. Tests use the
    /// organization as the payload that distinguishes one revision from
    /// another.
    pub fn event_with(id: EventId, monitoring_organization: &str) -> Event {
        Event {
            id,
            monitoring_organization: monitoring_organization.to_string(),
            status: EventStatus::ReadyForRefinement,
            time: 1_274_392_801.0,
            location: Location {
                latitude_deg: 45.271,
                longitude_deg: 130.023,
                depth_km: 10.0,
                elevation_km: 0.0,
            },
            preferred_hypothesis_id: new_entity_id(),
            signal_detection_ids: vec![],
        }
    }

    /// A signal detection with a fresh id.
    pub fn detection() -> SignalDetection {
        detection_with(new_entity_id(), "ASAR")
    }

    /// A signal detection with the given id and station name. Tests use the
    /// station name as the distinguishing payload.
    pub fn detection_with(id: DetectionId, station_name: &str) -> SignalDetection {
        SignalDetection {
            id,
            monitoring_organization: "CTBTO".to_string(),
            station_name: station_name.to_string(),
            phase: "P".to_string(),
            arrival_time: 1_274_392_950.5,
            current_hypothesis_id: new_entity_id(),
        }
    }

    /// A single-version QC mask over the given channel.
    pub fn qc_mask(channel_name: &str) -> QcMask {
        QcMask {
            id: new_entity_id(),
            channel_name: channel_name.to_string(),
            versions: vec![QcMaskVersion {
                version: 0,
                category: QcMaskCategory::WaveformQuality,
                mask_type: QcMaskType::Spike,
                start_time: 1_274_392_800.0,
                end_time: 1_274_392_860.0,
                channel_segment_ids: vec![new_entity_id()],
                parent_mask_ids: vec![],
                rationale: "single sample spike".to_string(),
            }],
        }
    }

    /// A raw channel segment with one short waveform.
    pub fn channel_segment(channel_name: &str) -> ChannelSegment {
        ChannelSegment {
            id: new_entity_id(),
            name: format!("{channel_name} raw"),
            channel_name: channel_name.to_string(),
            segment_type: ChannelSegmentType::Raw,
            timeseries_type: TimeSeriesType::Waveform,
            start_time: 1_274_392_800.0,
            end_time: 1_274_392_810.0,
            timeseries: vec![Waveform {
                start_time: 1_274_392_800.0,
                sample_rate_hz: 40.0,
                sample_count: 400,
                values: vec![0.0; 400],
            }],
        }
    }

    /// A band-pass waveform filter definition.
    pub fn waveform_filter(name: &str) -> WaveformFilterDefinition {
        WaveformFilterDefinition {
            id: new_entity_id(),
            name: name.to_string(),
            description: format!("{name} band-pass"),
            filter_type: FilterType::Fir,
            pass_band_type: FilterPassBandType::BandPass,
            low_frequency_hz: 0.7,
            high_frequency_hz: 2.0,
            order: 48,
            zero_phase: true,
            causal: false,
            sample_rate_hz: 40.0,
        }
    }

    /// Reference data for one network with a single array station.
    pub fn reference_station_data(network_name: &str) -> ReferenceStationData {
        ReferenceStationData {
            network: ReferenceNetwork {
                name: network_name.to_string(),
                monitoring_organization: "CTBTO".to_string(),
                description: format!("{network_name} primary network"),
            },
            stations: vec![ReferenceStation {
                name: "ASAR".to_string(),
                station_type: StationType::SeismicArray,
                location: Location {
                    latitude_deg: -23.665,
                    longitude_deg: 133.905,
                    depth_km: 0.0,
                    elevation_km: 0.624,
                },
                description: "Alice Springs array".to_string(),
            }],
        }
    }

    /// Processing-station data with one station and one channel.
    pub fn processing_station_data() -> ProcessingStationData {
        let mut data = ProcessingStationData::default();
        data.stations.insert(
            "ASAR".to_string(),
            ProcessingStation {
                name: "ASAR".to_string(),
                station_type: StationType::SeismicArray,
                description: "Alice Springs array".to_string(),
                location: Location {
                    latitude_deg: -23.665,
                    longitude_deg: 133.905,
                    depth_km: 0.0,
                    elevation_km: 0.624,
                },
                channel_group_names: vec!["AS01".to_string()],
            },
        );
        data.channels.insert(
            "ASAR.AS01.SHZ".to_string(),
            ProcessingChannel {
                name: "ASAR.AS01.SHZ".to_string(),
                canonical_name: "ASAR.AS01.SHZ".to_string(),
                station_name: "ASAR".to_string(),
                data_type: ChannelDataType::Seismic,
                sample_rate_hz: 40.0,
            },
        );
        data
    }

    /// Workflow data with one stage, one activity, and one interval of each
    /// kind, all linked together.
    pub fn workflow_data() -> WorkflowData {
        let stage_id = new_entity_id();
        let activity_id = new_entity_id();
        let interval_id = new_entity_id();
        let stage_interval_id = new_entity_id();
        WorkflowData {
            stages: vec![ProcessingStage {
                id: stage_id,
                name: "Auto Network".to_string(),
            }],
            activities: vec![ProcessingActivity {
                id: activity_id,
                name: "Event Review".to_string(),
                stage_id,
            }],
            intervals: vec![ProcessingInterval {
                id: interval_id,
                start_time: 1_274_392_800.0,
                end_time: 1_274_400_000.0,
            }],
            stage_intervals: vec![ProcessingStageInterval {
                id: stage_interval_id,
                stage_id,
                interval_id,
                start_time: 1_274_392_800.0,
                end_time: 1_274_400_000.0,
                status: IntervalStatus::NotStarted,
                completed_by_user_names: vec![],
            }],
            activity_intervals: vec![activity_interval(
                activity_id,
                stage_interval_id,
                IntervalStatus::NotStarted,
            )],
            analysts: vec![Analyst {
                user_name: "default".to_string(),
            }],
        }
    }

    /// An activity interval in the given status.
    pub fn activity_interval(
        activity_id: Uuid,
        stage_interval_id: Uuid,
        status: IntervalStatus,
    ) -> ProcessingActivityInterval {
        ProcessingActivityInterval {
            id: new_entity_id(),
            activity_id,
            stage_interval_id,
            status,
            active_analyst_user_names: vec![],
            completed_by_user_name: None,
            time_started: None,
        }
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating EPICENTER entity types.

    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Generate a random UUID.
    pub fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    /// Generate a UUID from a small deterministic pool, so independently
    /// generated entities collide on id often enough to exercise override
    /// and duplicate handling.
    pub fn arb_pooled_id(pool_size: u128) -> impl Strategy<Value = Uuid> {
        (1..=pool_size).prop_map(Uuid::from_u128)
    }

    /// Generate an epoch-seconds value in a plausible acquisition window.
    pub fn arb_epoch_seconds() -> impl Strategy<Value = EpochSeconds> {
        (1_262_304_000i64..1_893_456_000i64).prop_map(|secs| secs as EpochSeconds)
    }

    /// Generate an EventStatus variant.
    pub fn arb_event_status() -> impl Strategy<Value = EventStatus> {
        prop_oneof![
            Just(EventStatus::ReadyForRefinement),
            Just(EventStatus::OpenForRefinement),
            Just(EventStatus::AwaitingReview),
            Just(EventStatus::Complete),
        ]
    }

    /// Generate an Event with the given id strategy.
    pub fn arb_event_with_id(
        id: impl Strategy<Value = Uuid>,
    ) -> impl Strategy<Value = Event> {
        (
            id,
            "[A-Z]{3,8}",
            arb_event_status(),
            arb_epoch_seconds(),
            -90.0f64..90.0,
            -180.0f64..180.0,
        )
            .prop_map(|(id, org, status, time, lat, lon)| Event {
                id,
                monitoring_organization: org,
                status,
                time,
                location: Location {
                    latitude_deg: lat,
                    longitude_deg: lon,
                    depth_km: 0.0,
                    elevation_km: 0.0,
                },
                preferred_hypothesis_id: Uuid::from_u128(0xfeed),
                signal_detection_ids: vec![],
            })
    }

    /// Generate an Event with a random id.
    pub fn arb_event() -> impl Strategy<Value = Event> {
        arb_event_with_id(arb_uuid())
    }

    /// Generate an Event whose id comes from a small pool.
    pub fn arb_pooled_event(pool_size: u128) -> impl Strategy<Value = Event> {
        arb_event_with_id(arb_pooled_id(pool_size))
    }

    /// Generate a SignalDetection with the given id strategy.
    pub fn arb_detection_with_id(
        id: impl Strategy<Value = Uuid>,
    ) -> impl Strategy<Value = SignalDetection> {
        (id, "[A-Z]{3,6}", "P|S|Lg|Pn", arb_epoch_seconds()).prop_map(
            |(id, station_name, phase, arrival_time)| SignalDetection {
                id,
                monitoring_organization: "CTBTO".to_string(),
                station_name,
                phase,
                arrival_time,
                current_hypothesis_id: Uuid::from_u128(0xbeef),
            },
        )
    }

    /// Generate a SignalDetection with a random id.
    pub fn arb_detection() -> impl Strategy<Value = SignalDetection> {
        arb_detection_with_id(arb_uuid())
    }

    /// Generate a list of events with unique ids.
    pub fn arb_unique_events(max_len: usize) -> impl Strategy<Value = Vec<Event>> {
        prop::collection::vec(arb_event(), 0..=max_len).prop_map(|mut events| {
            let mut seen = std::collections::HashSet::new();
            events.retain(|e| seen.insert(e.id));
            events
        })
    }

    /// Generate a list of events drawn from a small id pool (duplicates and
    /// cross-list collisions are likely).
    pub fn arb_pooled_events(pool_size: u128, max_len: usize) -> impl Strategy<Value = Vec<Event>> {
        prop::collection::vec(arb_pooled_event(pool_size), 0..=max_len)
    }
}
