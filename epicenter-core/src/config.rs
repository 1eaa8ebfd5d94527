//! Settings for the analysis cache.

use serde::{Deserialize, Serialize};

use crate::entities::TimeRange;
use crate::error::{ConfigError, EpicenterResult};
use crate::identity::EpochSeconds;

/// Tunable settings for the cache context, loaded from the embedding
/// service's configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Width of one processing interval in seconds. Session viewports are
    /// normalized to boundaries of this width.
    pub interval_duration_secs: f64,
    /// How far back from "now" a freshly created session looks.
    pub initial_lookback_secs: f64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            interval_duration_secs: 7200.0,
            initial_lookback_secs: 43200.0,
        }
    }
}

impl CacheSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval_duration_secs(mut self, secs: f64) -> Self {
        self.interval_duration_secs = secs;
        self
    }

    pub fn with_initial_lookback_secs(mut self, secs: f64) -> Self {
        self.initial_lookback_secs = secs;
        self
    }

    /// Parse settings from a JSON document and validate them.
    pub fn from_json_str(json: &str) -> EpicenterResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings.
    ///
    /// Both durations must be finite and positive, and the lookback must
    /// cover at least one interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.interval_duration_secs.is_finite() || self.interval_duration_secs <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_duration_secs".to_string(),
                value: self.interval_duration_secs.to_string(),
                reason: "interval duration must be finite and positive".to_string(),
            });
        }
        if !self.initial_lookback_secs.is_finite() || self.initial_lookback_secs <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_lookback_secs".to_string(),
                value: self.initial_lookback_secs.to_string(),
                reason: "initial lookback must be finite and positive".to_string(),
            });
        }
        if self.initial_lookback_secs < self.interval_duration_secs {
            return Err(ConfigError::InvalidValue {
                field: "initial_lookback_secs".to_string(),
                value: self.initial_lookback_secs.to_string(),
                reason: "initial lookback must cover at least one interval".to_string(),
            });
        }
        Ok(())
    }

    /// The viewport a freshly created session starts with: the lookback
    /// window ending at `now`, normalized to interval boundaries.
    pub fn initial_time_range(&self, now: EpochSeconds) -> TimeRange {
        TimeRange::normalized(
            now - self.initial_lookback_secs,
            now,
            self.interval_duration_secs,
        )
    }
}
