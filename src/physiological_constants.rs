// ABOUTME: Physiological constants for pulse oximetry analysis based on clinical sleep medicine
// ABOUTME: Desaturation scoring thresholds and ODI severity cutoffs with literature references
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physiological constants based on clinical sleep medicine research
//!
//! This module contains scientifically-established constants used throughout
//! the oximetry analysis system. These values are based on peer-reviewed
//! research and scoring guidelines from sleep medicine organizations.

/// Desaturation event scoring thresholds
///
/// References:
/// - Berry, R.B., et al. (2012). Rules for scoring respiratory events in sleep:
///   update of the 2007 AASM Manual for the Scoring of Sleep and Associated Events.
///   *Journal of Clinical Sleep Medicine*, 8(5), 597-619.
///   <https://doi.org/10.5664/jcsm.2172>
pub mod desaturation {
    /// Minimum SpO2 drop from the preceding local maximum to qualify as a
    /// desaturation candidate (percentage points)
    /// Reference: AASM recommended hypopnea criterion requires >= 3% desaturation
    pub const MIN_DROP_PERCENT: f64 = 3.0;

    /// Drop beyond which the excursion is classified as a motion artifact
    /// rather than a physiological desaturation (percentage points)
    /// Pulse oximeters under probe displacement produce sharp excursions far
    /// outside the physiologically plausible rate of change
    pub const MAX_ARTIFACT_DROP_PERCENT: f64 = 50.0;

    /// Minimum samples a candidate episode must span; shorter dips are noise
    pub const MIN_EVENT_DURATION_SAMPLES: usize = 5;

    /// Maximum samples a single event may span before it is split at the
    /// first recovery point
    pub const MAX_EVENT_DURATION_SAMPLES: usize = 120;
}

/// Per-event severity thresholds by desaturation depth
///
/// References:
/// - Azarbarzin, A., et al. (2019). The hypoxic burden of sleep apnoea predicts
///   cardiovascular disease-related mortality. *European Heart Journal*, 40(14), 1149-1157.
///   <https://doi.org/10.1093/eurheartj/ehy624>
pub mod severity {
    /// Drops of at least this depth are graded moderate (percentage points)
    pub const MODERATE_EVENT_DROP_PERCENT: f64 = 6.0;

    /// Drops of at least this depth are graded severe (percentage points)
    pub const SEVERE_EVENT_DROP_PERCENT: f64 = 10.0;
}

/// Oxygen Desaturation Index (ODI) severity cutoffs
///
/// ODI severity bands mirror the conventional AHI classification used in
/// the International Classification of Sleep Disorders.
///
/// References:
/// - Chung, F., et al. (2012). Oxygen desaturation index from nocturnal oximetry:
///   a sensitive and specific tool to detect sleep-disordered breathing in surgical
///   patients. *Anesthesia & Analgesia*, 114(5), 993-1000.
///   <https://doi.org/10.1213/ANE.0b013e318248f4f5>
pub mod odi {
    /// Events per hour at or above which oximetry is graded mildly abnormal
    pub const MILD_ODI_THRESHOLD: f64 = 5.0;

    /// Events per hour at or above which oximetry is graded moderately abnormal
    pub const MODERATE_ODI_THRESHOLD: f64 = 15.0;

    /// Events per hour at or above which oximetry is graded severely abnormal
    pub const SEVERE_ODI_THRESHOLD: f64 = 30.0;

    /// Minimum recording length for a stable hourly index (one minute);
    /// shorter recordings produce no ODI rather than a wildly extrapolated one
    pub const MIN_RECORDING_HOURS_FOR_ODI: f64 = 1.0 / 60.0;
}
