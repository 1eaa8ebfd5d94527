//! Domain enums shared across the EPICENTER crates.
//!
//! Wire names follow the upstream JSON conventions: the station, status, and
//! interval vocabularies serialize as PascalCase, the channel, segment, and
//! mask vocabularies as SCREAMING_SNAKE_CASE.

use serde::{Deserialize, Serialize};

/// Review status of a seismic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    ReadyForRefinement,
    OpenForRefinement,
    AwaitingReview,
    Complete,
}

/// Status of a workflow stage or activity interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalStatus {
    /// No analyst has opened the interval yet.
    NotStarted,
    /// At least one analyst is working the interval.
    InProgress,
    /// Reviewed and explicitly marked incomplete.
    NotComplete,
    Complete,
}

/// Kind of monitoring station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationType {
    Seismic3Component,
    Seismic1Component,
    SeismicArray,
    Hydroacoustic,
    HydroacousticArray,
    Infrasound,
    InfrasoundArray,
    Weather,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Kind of data a processing channel produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelDataType {
    Seismic,
    Hydroacoustic,
    Infrasound,
    Weather,
    DiagnosticSoh,
    DiagnosticWeather,
}

/// Provenance of a channel segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelSegmentType {
    Acquired,
    Raw,
    DetectionBeam,
    FkBeam,
    Filter,
}

/// Kind of time series carried by a channel segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSeriesType {
    Waveform,
    FkSpectra,
}

/// Why a QC mask exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QcMaskCategory {
    AnalystDefined,
    ChannelProcessing,
    DataAuthentication,
    Rejected,
    StationSoh,
    WaveformQuality,
}

/// What a QC mask marks in the underlying data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QcMaskType {
    SensorProblem,
    StationProblem,
    Calibration,
    Timing,
    RepairableGap,
    RepeatedAdjacentAmplitudeValue,
    LongGap,
    Spike,
}

/// Digital filter family of a waveform filter definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterType {
    Fir,
    Iir,
}

/// Pass band shape of a waveform filter definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterPassBandType {
    LowPass,
    HighPass,
    BandPass,
    BandReject,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(value: &impl serde::Serialize) -> String {
        serde_json::to_string(value).expect("enum serializes")
    }

    #[test]
    fn test_station_and_status_wire_names_are_pascal_case() {
        assert_eq!(wire(&EventStatus::OpenForRefinement), "\"OpenForRefinement\"");
        assert_eq!(wire(&EventStatus::AwaitingReview), "\"AwaitingReview\"");
        assert_eq!(wire(&IntervalStatus::NotStarted), "\"NotStarted\"");
        assert_eq!(wire(&StationType::Seismic3Component), "\"Seismic3Component\"");
        assert_eq!(
            wire(&StationType::HydroacousticArray),
            "\"HydroacousticArray\""
        );
        assert_eq!(wire(&StationType::Unknown), "\"UNKNOWN\"");
    }

    #[test]
    fn test_channel_and_mask_wire_names_are_screaming_snake_case() {
        assert_eq!(wire(&ChannelDataType::Seismic), "\"SEISMIC\"");
        assert_eq!(wire(&ChannelDataType::DiagnosticSoh), "\"DIAGNOSTIC_SOH\"");
        assert_eq!(
            wire(&ChannelSegmentType::DetectionBeam),
            "\"DETECTION_BEAM\""
        );
        assert_eq!(wire(&TimeSeriesType::FkSpectra), "\"FK_SPECTRA\"");
        assert_eq!(wire(&QcMaskCategory::StationSoh), "\"STATION_SOH\"");
        assert_eq!(
            wire(&QcMaskType::RepeatedAdjacentAmplitudeValue),
            "\"REPEATED_ADJACENT_AMPLITUDE_VALUE\""
        );
        assert_eq!(wire(&FilterType::Iir), "\"IIR\"");
        assert_eq!(wire(&FilterPassBandType::BandReject), "\"BAND_REJECT\"");
    }

    #[test]
    fn test_wire_names_deserialize_back() {
        let status: EventStatus =
            serde_json::from_str("\"OpenForRefinement\"").expect("status parses");
        assert_eq!(status, EventStatus::OpenForRefinement);

        let station: StationType = serde_json::from_str("\"UNKNOWN\"").expect("station parses");
        assert_eq!(station, StationType::Unknown);

        let mask_type: QcMaskType = serde_json::from_str("\"REPEATED_ADJACENT_AMPLITUDE_VALUE\"")
            .expect("mask type parses");
        assert_eq!(mask_type, QcMaskType::RepeatedAdjacentAmplitudeValue);
    }
}
