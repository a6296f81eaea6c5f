// ABOUTME: Desaturation detection configuration with validation and environment overrides
// ABOUTME: Promotes all detection tunables to configuration instead of hard-coded constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::error::ConfigError;
use crate::physiological_constants::desaturation;
use serde::{Deserialize, Serialize};
use std::env;

/// Desaturation detection configuration
///
/// All thresholds the segmentation algorithm consults. Durations are
/// expressed in samples; the caller converts using its own sampling rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesaturationConfig {
    /// Minimum drop from the running maximum to open a candidate episode (percentage points)
    pub min_drop_percent: f64,
    /// Drop beyond which the excursion is treated as a motion artifact (percentage points)
    pub max_artifact_drop_percent: f64,
    /// Episodes shorter than this are discarded as noise (samples)
    pub min_event_duration_samples: usize,
    /// Episodes longer than this are split at the first recovery point (samples)
    pub max_event_duration_samples: usize,
}

impl Default for DesaturationConfig {
    fn default() -> Self {
        Self {
            min_drop_percent: desaturation::MIN_DROP_PERCENT,
            max_artifact_drop_percent: desaturation::MAX_ARTIFACT_DROP_PERCENT,
            min_event_duration_samples: desaturation::MIN_EVENT_DURATION_SAMPLES,
            max_event_duration_samples: desaturation::MAX_EVENT_DURATION_SAMPLES,
        }
    }
}

impl DesaturationConfig {
    /// Load detection configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            min_drop_percent: env::var("OXIMETRY_MIN_DROP_PERCENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(desaturation::MIN_DROP_PERCENT),
            max_artifact_drop_percent: env::var("OXIMETRY_MAX_ARTIFACT_DROP_PERCENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(desaturation::MAX_ARTIFACT_DROP_PERCENT),
            min_event_duration_samples: env::var("OXIMETRY_MIN_EVENT_DURATION_SAMPLES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(desaturation::MIN_EVENT_DURATION_SAMPLES),
            max_event_duration_samples: env::var("OXIMETRY_MAX_EVENT_DURATION_SAMPLES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(desaturation::MAX_EVENT_DURATION_SAMPLES),
        }
    }

    /// Validate the configuration before a scan starts
    ///
    /// # Errors
    /// Returns `ConfigError` if any threshold is non-positive, non-finite,
    /// or the thresholds are mutually inconsistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_drop_percent.is_finite() || self.min_drop_percent <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_drop_percent must be a positive finite number",
            ));
        }
        if !self.max_artifact_drop_percent.is_finite()
            || self.max_artifact_drop_percent <= self.min_drop_percent
        {
            return Err(ConfigError::InvalidRange(
                "max_artifact_drop_percent must exceed min_drop_percent",
            ));
        }
        if self.min_event_duration_samples == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_event_duration_samples must be at least 1",
            ));
        }
        if self.min_event_duration_samples > self.max_event_duration_samples {
            return Err(ConfigError::InvalidRange(
                "min_event_duration_samples cannot exceed max_event_duration_samples",
            ));
        }
        Ok(())
    }
}
