// ABOUTME: Recording-level oximetry analysis - summary statistics, ODI grading, insights
// ABOUTME: Batch analysis across independent recordings parallelized with rayon
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::cast_precision_loss)] // Safe: event counts and sample counts are small integers

//! Oximetry Analysis Module
//!
//! Sits above the raw desaturation segmenter and turns an event list into a
//! clinical-style report: the Oxygen Desaturation Index (events per hour of
//! recording), depth and duration statistics, an ODI severity grade and
//! human-readable insight strings.
//!
//! # Scientific References
//!
//! - Chung, F., et al. (2012). Oxygen desaturation index from nocturnal oximetry:
//!   a sensitive and specific tool to detect sleep-disordered breathing in surgical
//!   patients. *Anesthesia & Analgesia*, 114(5), 993-1000.
//!   <https://doi.org/10.1213/ANE.0b013e318248f4f5>
//!
//! - Berry, R.B., et al. (2012). Rules for scoring respiratory events in sleep.
//!   *Journal of Clinical Sleep Medicine*, 8(5), 597-619.

use crate::algorithms::DesaturationDetector;
use crate::config::DesaturationConfig;
use crate::errors::AnalysisError;
use crate::models::{DesaturationEvent, SpO2Recording};
use crate::physiological_constants::{odi, severity};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Complete analysis of one recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OximetryAnalysis {
    /// Identifier of the analyzed recording
    pub recording_id: String,

    /// Confirmed desaturation events, sorted by onset
    pub events: Vec<DesaturationEvent>,

    /// Aggregate statistics over the event list
    pub summary: OximetrySummary,

    /// Human-readable findings
    pub insights: Vec<String>,
}

/// Aggregate statistics over a recording's desaturation events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OximetrySummary {
    /// Number of confirmed events
    pub total_events: usize,

    /// Oxygen Desaturation Index: events per hour of recording
    /// `None` when the recording is too short for a stable hourly index
    pub odi_events_per_hour: Option<f64>,

    /// ODI severity grade; `None` whenever the ODI itself is unavailable
    pub odi_severity: Option<OdiSeverity>,

    /// Mean event depth in percentage points (0 when no events)
    pub mean_magnitude_percent: f64,

    /// Deepest event in percentage points (0 when no events)
    pub max_magnitude_percent: f64,

    /// Mean event span in samples (0 when no events)
    pub mean_duration_samples: f64,

    /// Longest event span in samples (0 when no events)
    pub longest_event_samples: usize,

    /// Share of the recording spent inside desaturation events (percent)
    pub time_in_desaturation_percent: f64,
}

/// ODI severity grade, banded like the conventional AHI classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OdiSeverity {
    /// Fewer than 5 events per hour
    Normal,
    /// 5 to 15 events per hour
    Mild,
    /// 15 to 30 events per hour
    Moderate,
    /// 30 or more events per hour
    Severe,
}

impl OdiSeverity {
    /// Grade an hourly event rate
    #[must_use]
    pub fn from_events_per_hour(odi: f64) -> Self {
        if odi >= odi::SEVERE_ODI_THRESHOLD {
            Self::Severe
        } else if odi >= odi::MODERATE_ODI_THRESHOLD {
            Self::Moderate
        } else if odi >= odi::MILD_ODI_THRESHOLD {
            Self::Mild
        } else {
            Self::Normal
        }
    }
}

/// Analyzer for whole oximetry recordings
pub struct OximetryAnalyzer;

impl OximetryAnalyzer {
    /// Analyze one recording: detect events, summarize, generate insights
    ///
    /// # Errors
    /// Returns `AnalysisError` if the sampling rate is not positive and
    /// finite, the configuration is invalid, or the signal contains
    /// non-finite samples
    pub fn analyze(
        recording: &SpO2Recording,
        config: &DesaturationConfig,
    ) -> Result<OximetryAnalysis, AnalysisError> {
        if !recording.sample_rate_hz.is_finite() || recording.sample_rate_hz <= 0.0 {
            return Err(AnalysisError::invalid_input(format!(
                "Sample rate must be positive and finite, got {}",
                recording.sample_rate_hz
            )));
        }

        let events = DesaturationDetector::detect(&recording.samples, config)?;
        let summary = Self::summarize(&events, recording);
        let insights = Self::generate_insights(&summary, recording);

        debug!(
            recording_id = %recording.id,
            events = events.len(),
            odi = ?summary.odi_events_per_hour,
            "oximetry analysis complete"
        );

        Ok(OximetryAnalysis {
            recording_id: recording.id.clone(),
            events,
            summary,
            insights,
        })
    }

    /// Analyze independent recordings in parallel
    ///
    /// Recordings are independent computations, so the batch fans out across
    /// the rayon thread pool; results keep the input order.
    ///
    /// # Errors
    /// Returns the first `AnalysisError` any recording produced
    pub fn analyze_batch(
        recordings: &[SpO2Recording],
        config: &DesaturationConfig,
    ) -> Result<Vec<OximetryAnalysis>, AnalysisError> {
        recordings
            .par_iter()
            .map(|recording| Self::analyze(recording, config))
            .collect()
    }

    /// Aggregate event statistics for one recording
    fn summarize(events: &[DesaturationEvent], recording: &SpO2Recording) -> OximetrySummary {
        let total_events = events.len();
        let duration_hours = recording.duration_hours();

        let odi_events_per_hour = (duration_hours >= odi::MIN_RECORDING_HOURS_FOR_ODI)
            .then(|| total_events as f64 / duration_hours);
        let odi_severity = odi_events_per_hour.map(OdiSeverity::from_events_per_hour);

        let total_event_samples: usize = events.iter().map(|e| e.duration_samples).sum();
        let (mean_magnitude_percent, mean_duration_samples) = if total_events == 0 {
            (0.0, 0.0)
        } else {
            let magnitude_sum: f64 = events.iter().map(|e| e.magnitude_percent).sum();
            (
                magnitude_sum / total_events as f64,
                total_event_samples as f64 / total_events as f64,
            )
        };

        let time_in_desaturation_percent = if recording.samples.is_empty() {
            0.0
        } else {
            total_event_samples as f64 / recording.samples.len() as f64 * 100.0
        };

        OximetrySummary {
            total_events,
            odi_events_per_hour,
            odi_severity,
            mean_magnitude_percent,
            max_magnitude_percent: events
                .iter()
                .map(|e| e.magnitude_percent)
                .fold(0.0, f64::max),
            mean_duration_samples,
            longest_event_samples: events.iter().map(|e| e.duration_samples).max().unwrap_or(0),
            time_in_desaturation_percent,
        }
    }

    /// Generate human-readable findings from the summary
    fn generate_insights(summary: &OximetrySummary, recording: &SpO2Recording) -> Vec<String> {
        let mut insights = Vec::new();
        let hours = recording.duration_hours();

        if summary.total_events == 0 {
            insights.push("No clinically significant desaturations detected".to_owned());
            return insights;
        }

        insights.push(format!(
            "Detected {} desaturation events across {hours:.1}h of recording",
            summary.total_events
        ));

        if let (Some(odi_value), Some(grade)) = (summary.odi_events_per_hour, summary.odi_severity)
        {
            match grade {
                OdiSeverity::Normal => insights.push(format!(
                    "ODI {odi_value:.1}/h is within the normal range"
                )),
                OdiSeverity::Mild => insights.push(format!(
                    "ODI {odi_value:.1}/h suggests mild sleep-disordered breathing"
                )),
                OdiSeverity::Moderate => insights.push(format!(
                    "ODI {odi_value:.1}/h suggests moderate sleep-disordered breathing"
                )),
                OdiSeverity::Severe => insights.push(format!(
                    "ODI {odi_value:.1}/h suggests severe sleep-disordered breathing - clinical review recommended"
                )),
            }
        }

        if summary.max_magnitude_percent >= severity::SEVERE_EVENT_DROP_PERCENT {
            insights.push(format!(
                "Deep desaturations present (largest drop {:.1}%)",
                summary.max_magnitude_percent
            ));
        }

        insights
    }
}
