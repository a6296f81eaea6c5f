// ABOUTME: Streaming SpO2 desaturation event segmenter with artifact rejection
// ABOUTME: Single forward scan with local backtracking and recursive splitting of over-long episodes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Desaturation Event Segmentation
//!
//! Consumes an ordered series of SpO2 samples and emits discrete desaturation
//! events (onset index, duration, magnitude). The scan tracks a running
//! maximum since the last confirmed or discarded event and a running minimum
//! within the open episode:
//!
//! - A drop of at least `min_drop_percent` below the running maximum opens a
//!   candidate episode anchored at the maximum's index.
//! - A drop beyond `max_artifact_drop_percent` is a suspected probe artifact:
//!   the scan withholds judgement until the excursion subsides, then either
//!   confirms the episode at its last recovery point or discards everything.
//! - While an episode is open, each rising sample above the episode minimum is
//!   recorded as a candidate recovery point. When the rise stalls, the episode
//!   is evaluated against the duration bounds: discarded as noise below
//!   `min_event_duration_samples`, confirmed within bounds, or truncated at
//!   the first recovery point and the tail re-scanned when it exceeds
//!   `max_event_duration_samples`.
//!
//! Events are reported in the index space of the original series and sorted
//! by onset before returning, so callers see a time-ordered record even when
//! an over-long episode was split.

use crate::config::DesaturationConfig;
use crate::errors::AnalysisError;
use crate::models::DesaturationEvent;
use tracing::trace;

/// Shortest series the lookback window can evaluate
const LOOKBACK_WINDOW: usize = 3;

/// Scan state for one forward pass
///
/// Reset whenever an event is confirmed, discarded as an artifact or as
/// noise, or an over-long episode is split.
struct ScanState {
    /// Highest value seen since the last reset
    max_value: f64,
    /// Index of the running maximum; the onset anchor while an episode is open
    max_index: usize,
    /// Lowest value inside the open episode, `None` until the first candidate sample
    min_value: Option<f64>,
    /// Whether a candidate episode is open
    in_episode: bool,
    /// Whether the current excursion is a suspected probe artifact
    suspected_artifact: bool,
    /// Indices where the signal rose back toward the maximum (candidate ends)
    recovery_points: Vec<usize>,
}

impl ScanState {
    fn new(first_value: f64) -> Self {
        Self {
            max_value: first_value,
            max_index: 0,
            min_value: None,
            in_episode: false,
            suspected_artifact: false,
            recovery_points: Vec::new(),
        }
    }

    /// Restart the maximum search at the given sample
    fn reset_at(&mut self, value: f64, index: usize) {
        self.max_value = value;
        self.max_index = index;
        self.min_value = None;
        self.in_episode = false;
        self.suspected_artifact = false;
        self.recovery_points.clear();
    }

    /// Open (or extend) the candidate episode with a sample inside the drop band
    fn open_candidate(&mut self, value: f64) {
        self.in_episode = true;
        self.min_value = Some(self.min_value.map_or(value, |min| min.min(value)));
    }

    /// Event depth at confirmation time
    fn magnitude(&self) -> f64 {
        self.min_value.map_or(0.0, |min| self.max_value - min)
    }

    fn event(&self, offset: usize, end: usize) -> DesaturationEvent {
        DesaturationEvent {
            onset_index: offset + self.max_index,
            duration_samples: end - self.max_index,
            magnitude_percent: self.magnitude(),
        }
    }
}

/// Desaturation event detector
///
/// Pure function over its input: no persistence and no cross-call state.
pub struct DesaturationDetector;

impl DesaturationDetector {
    /// Detect desaturation events in an SpO2 series
    ///
    /// Returns events sorted by onset index. A series shorter than the
    /// three-sample lookback window has no events by definition and yields
    /// an empty list.
    ///
    /// # Errors
    /// Returns `AnalysisError::Config` if the configuration fails validation
    /// and `AnalysisError::InvalidInput` if the series contains a non-finite
    /// sample (NaN or infinity)
    pub fn detect(
        series: &[f64],
        config: &DesaturationConfig,
    ) -> Result<Vec<DesaturationEvent>, AnalysisError> {
        config.validate()?;
        if let Some(index) = series.iter().position(|value| !value.is_finite()) {
            return Err(AnalysisError::invalid_input(format!(
                "Non-finite SpO2 sample at index {index}"
            )));
        }

        let mut events = Vec::new();
        Self::detect_into(series, config, 0, &mut events);
        events.sort_unstable_by_key(|event| event.onset_index);
        Ok(events)
    }

    /// One forward pass over `series`, appending confirmed events
    ///
    /// `offset` maps slice-local indices back to the original series so that
    /// events found while re-scanning a split episode carry absolute indices.
    fn detect_into(
        series: &[f64],
        config: &DesaturationConfig,
        offset: usize,
        events: &mut Vec<DesaturationEvent>,
    ) {
        if series.len() < LOOKBACK_WINDOW {
            return;
        }

        let mut state = ScanState::new(series[0]);
        for (i, &value) in series.iter().enumerate() {
            let drop = state.max_value - value;

            // A suspected artifact has subsided: judge the episode it interrupted,
            // then restart the search at the current sample.
            if state.suspected_artifact && drop < config.max_artifact_drop_percent {
                Self::settle_artifact(&mut state, value, i, offset, events);
                continue;
            }

            if drop >= config.min_drop_percent {
                if drop > config.max_artifact_drop_percent {
                    state.suspected_artifact = true;
                } else {
                    state.open_candidate(value);
                }
            }

            if value >= state.max_value && !state.in_episode {
                state.max_value = value;
                state.max_index = i;
            }

            if state.in_episode && state.min_value.is_some_and(|min| value > min) {
                Self::advance_recovery(series, i, config, offset, &mut state, events);
            }
        }
    }

    /// Track the recovering edge of an open episode
    ///
    /// Rising samples become candidate recovery points; the episode is
    /// evaluated as soon as the rise stalls or turns back down.
    fn advance_recovery(
        series: &[f64],
        i: usize,
        config: &DesaturationConfig,
        offset: usize,
        state: &mut ScanState,
        events: &mut Vec<DesaturationEvent>,
    ) {
        if i >= 1 && series[i] > series[i - 1] {
            state.recovery_points.push(i);
            return;
        }

        let turned_down = i >= 2 && series[i] <= series[i - 1] && series[i - 1] > series[i - 2];
        if !turned_down {
            return;
        }
        let Some(&last_recovery) = state.recovery_points.last() else {
            return;
        };
        Self::close_episode(series, i, last_recovery, config, offset, state, events);
    }

    /// Evaluate a closed candidate episode against the duration bounds
    fn close_episode(
        series: &[f64],
        i: usize,
        last_recovery: usize,
        config: &DesaturationConfig,
        offset: usize,
        state: &mut ScanState,
        events: &mut Vec<DesaturationEvent>,
    ) {
        let episode_len = last_recovery - state.max_index;
        if episode_len < config.min_event_duration_samples {
            // Too short: noise, fold back into the maximum search.
        } else if episode_len <= config.max_event_duration_samples {
            events.push(state.event(offset, last_recovery));
        } else {
            // Truncate at the first recovery point and re-scan the tail for
            // the events hidden behind the partial recovery.
            let split_at = state.recovery_points[0];
            events.push(state.event(offset, split_at));
            trace!(
                onset = offset + state.max_index,
                split_at = offset + split_at,
                end = offset + i,
                "splitting over-long desaturation episode"
            );
            Self::detect_into(&series[split_at..=i], config, offset + split_at, events);
        }
        state.reset_at(series[i - 2], i - 2);
    }

    /// Resolve a subsided artifact excursion
    ///
    /// An episode that was open with at least one recovery point recorded is
    /// confirmed at its last recovery point; anything else is discarded.
    fn settle_artifact(
        state: &mut ScanState,
        value: f64,
        i: usize,
        offset: usize,
        events: &mut Vec<DesaturationEvent>,
    ) {
        if state.in_episode {
            if let Some(&end) = state.recovery_points.last() {
                events.push(state.event(offset, end));
            }
        }
        state.reset_at(value, i);
    }
}
