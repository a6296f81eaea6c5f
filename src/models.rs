// ABOUTME: Core data models for oximetry analysis - recordings, events, severity grades
// ABOUTME: Defines SpO2Recording, DesaturationEvent and EventSeverity structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Core data structures for pulse oximetry analysis: an input recording
//! (sample buffer plus acquisition metadata) and the output event records
//! produced by the desaturation segmenter.

#![allow(clippy::cast_precision_loss)] // Safe: sample counts are far below f64 mantissa range

use crate::physiological_constants::severity;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer for flexible optional date parsing
/// Accepts both full ISO 8601 datetime ("2025-11-26T00:00:00Z") and simple date ("2025-11-26")
fn deserialize_flexible_datetime_opt<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(s) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    // Try full ISO 8601 datetime first
    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    // Try ISO 8601 without timezone (assume UTC)
    if let Ok(dt) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(Utc.from_utc_datetime(&dt)));
    }

    // Try simple date format (YYYY-MM-DD), convert to midnight UTC
    if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        let datetime = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| serde::de::Error::custom("Invalid date"))?;
        return Ok(Some(Utc.from_utc_datetime(&datetime)));
    }

    Err(serde::de::Error::custom(format!(
        "Invalid date format: '{s}'. Expected 'YYYY-MM-DD' or 'YYYY-MM-DDTHH:MM:SSZ'"
    )))
}

/// A continuous SpO2 recording from a pulse oximeter
///
/// Samples are ordered and equally spaced; durations throughout the crate are
/// expressed in sample counts and converted to wall time via `sample_rate_hz`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpO2Recording {
    /// Recording identifier (provider session id, file name, etc.)
    pub id: String,

    /// Acquisition start time, if known
    /// Accepts both "YYYY-MM-DD" and full ISO 8601 "YYYY-MM-DDTHH:MM:SSZ" formats
    #[serde(default, deserialize_with = "deserialize_flexible_datetime_opt")]
    pub start_time: Option<DateTime<Utc>>,

    /// Sampling rate in Hz (typical overnight oximetry: 1 Hz)
    pub sample_rate_hz: f64,

    /// SpO2 percentage samples in acquisition order
    pub samples: Vec<f64>,
}

impl SpO2Recording {
    /// Create a recording without a known start time
    #[must_use]
    pub fn new(id: impl Into<String>, sample_rate_hz: f64, samples: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            start_time: None,
            sample_rate_hz,
            samples,
        }
    }

    /// Recording length in hours at the declared sampling rate
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz / 3600.0
    }
}

/// A confirmed desaturation event
///
/// `onset_index` is the index of the running maximum that preceded the
/// episode; `duration_samples` spans onset to the recovery point that closed
/// the episode. Indices are always in the coordinate space of the full input
/// series, including events found by re-scanning a split episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesaturationEvent {
    /// Sample index of the pre-episode maximum
    pub onset_index: usize,

    /// Event span in samples
    pub duration_samples: usize,

    /// Depth of the event: running max minus running min at confirmation (percentage points)
    pub magnitude_percent: f64,
}

impl DesaturationEvent {
    /// Index of the sample that closed the event
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.onset_index + self.duration_samples
    }

    /// Grade the event by desaturation depth
    #[must_use]
    pub fn severity(&self) -> EventSeverity {
        if self.magnitude_percent >= severity::SEVERE_EVENT_DROP_PERCENT {
            EventSeverity::Severe
        } else if self.magnitude_percent >= severity::MODERATE_EVENT_DROP_PERCENT {
            EventSeverity::Moderate
        } else {
            EventSeverity::Mild
        }
    }
}

/// Per-event severity grade by desaturation depth
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventSeverity {
    /// Drop below the moderate threshold (3-6%)
    Mild,
    /// Drop of at least 6%
    Moderate,
    /// Drop of at least 10%
    Severe,
}
