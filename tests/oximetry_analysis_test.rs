// ABOUTME: Integration tests for recording-level analysis, ODI grading and batch processing
// ABOUTME: Covers summary statistics, severity mapping, insights and rayon batch ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use oximetry_intelligence::{
    DesaturationConfig, DesaturationEvent, EventSeverity, OdiSeverity, OximetryAnalyzer,
    SpO2Recording,
};

/// One plateau-dip-recovery motif producing exactly one event of magnitude 8
/// and duration 9 when scanned with the default configuration
fn event_motif() -> Vec<f64> {
    let mut motif = vec![98.0; 3];
    motif.extend(vec![90.0; 8]);
    motif.extend(vec![98.0; 3]);
    motif
}

/// A one-hour 1 Hz recording containing `events` desaturation events
fn hour_recording(id: &str, events: usize) -> SpO2Recording {
    let mut samples = Vec::with_capacity(3600);
    for _ in 0..events {
        samples.extend(event_motif());
    }
    samples.resize(3600, 98.0);
    SpO2Recording::new(id, 1.0, samples)
}

#[test]
fn test_hourly_recording_summary() {
    let recording = hour_recording("night-1", 6);
    let analysis = OximetryAnalyzer::analyze(&recording, &DesaturationConfig::default()).unwrap();

    assert_eq!(analysis.recording_id, "night-1");
    assert_eq!(analysis.summary.total_events, 6);
    assert_eq!(analysis.events.len(), 6);

    let odi = analysis.summary.odi_events_per_hour.unwrap();
    assert!((odi - 6.0).abs() < 1e-9);
    assert_eq!(analysis.summary.odi_severity, Some(OdiSeverity::Mild));

    assert!((analysis.summary.mean_magnitude_percent - 8.0).abs() < 1e-9);
    assert!((analysis.summary.max_magnitude_percent - 8.0).abs() < 1e-9);
    assert!((analysis.summary.mean_duration_samples - 9.0).abs() < 1e-9);
    assert_eq!(analysis.summary.longest_event_samples, 9);
    // 6 events x 9 samples = 54 of 3600 samples inside events.
    assert!((analysis.summary.time_in_desaturation_percent - 1.5).abs() < 1e-9);

    assert!(analysis
        .insights
        .iter()
        .any(|insight| insight.contains("6 desaturation events")));
}

#[test]
fn test_clean_recording_reports_no_findings() {
    let recording = SpO2Recording::new("clean", 1.0, vec![97.0; 600]);
    let analysis = OximetryAnalyzer::analyze(&recording, &DesaturationConfig::default()).unwrap();

    assert_eq!(analysis.summary.total_events, 0);
    assert_eq!(analysis.summary.odi_severity, Some(OdiSeverity::Normal));
    assert!((analysis.summary.max_magnitude_percent).abs() < f64::EPSILON);
    assert_eq!(analysis.summary.longest_event_samples, 0);
    assert_eq!(
        analysis.insights,
        vec!["No clinically significant desaturations detected".to_owned()]
    );
}

#[test]
fn test_short_recording_has_no_odi() {
    // 30 seconds at 1 Hz is below the one-minute floor for an hourly index.
    let recording = SpO2Recording::new("strip", 1.0, vec![97.0; 30]);
    let analysis = OximetryAnalyzer::analyze(&recording, &DesaturationConfig::default()).unwrap();

    assert!(analysis.summary.odi_events_per_hour.is_none());
    assert!(analysis.summary.odi_severity.is_none());
}

#[test]
fn test_invalid_sample_rate_is_rejected() {
    let recording = SpO2Recording::new("bad-rate", 0.0, vec![97.0; 100]);
    assert!(OximetryAnalyzer::analyze(&recording, &DesaturationConfig::default()).is_err());

    let recording = SpO2Recording::new("nan-rate", f64::NAN, vec![97.0; 100]);
    assert!(OximetryAnalyzer::analyze(&recording, &DesaturationConfig::default()).is_err());
}

#[test]
fn test_batch_analysis_preserves_input_order() {
    let recordings = vec![
        hour_recording("a", 2),
        hour_recording("b", 0),
        hour_recording("c", 6),
    ];
    let config = DesaturationConfig::default();

    let batch = OximetryAnalyzer::analyze_batch(&recordings, &config).unwrap();
    assert_eq!(batch.len(), 3);
    assert_eq!(batch[0].recording_id, "a");
    assert_eq!(batch[1].recording_id, "b");
    assert_eq!(batch[2].recording_id, "c");

    // Batch results match individual analysis.
    for (recording, analysis) in recordings.iter().zip(&batch) {
        let single = OximetryAnalyzer::analyze(recording, &config).unwrap();
        assert_eq!(single.events, analysis.events);
        assert_eq!(single.summary.total_events, analysis.summary.total_events);
    }
}

#[test]
fn test_batch_analysis_propagates_errors() {
    let recordings = vec![
        hour_recording("good", 1),
        SpO2Recording::new("bad", 0.0, vec![97.0; 100]),
    ];
    let result = OximetryAnalyzer::analyze_batch(&recordings, &DesaturationConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_event_severity_grading() {
    let event = |magnitude: f64| DesaturationEvent {
        onset_index: 0,
        duration_samples: 10,
        magnitude_percent: magnitude,
    };
    assert_eq!(event(3.5).severity(), EventSeverity::Mild);
    assert_eq!(event(6.0).severity(), EventSeverity::Moderate);
    assert_eq!(event(12.0).severity(), EventSeverity::Severe);
}

#[test]
fn test_odi_severity_bands() {
    assert_eq!(OdiSeverity::from_events_per_hour(0.0), OdiSeverity::Normal);
    assert_eq!(OdiSeverity::from_events_per_hour(4.9), OdiSeverity::Normal);
    assert_eq!(OdiSeverity::from_events_per_hour(5.0), OdiSeverity::Mild);
    assert_eq!(
        OdiSeverity::from_events_per_hour(15.0),
        OdiSeverity::Moderate
    );
    assert_eq!(OdiSeverity::from_events_per_hour(31.0), OdiSeverity::Severe);
}

#[test]
fn test_recording_deserializes_flexible_start_time() {
    let with_date: SpO2Recording = serde_json::from_str(
        r#"{"id": "r1", "start_time": "2025-11-26", "sample_rate_hz": 1.0, "samples": [97.0, 97.0]}"#,
    )
    .unwrap();
    assert!(with_date.start_time.is_some());

    let without: SpO2Recording =
        serde_json::from_str(r#"{"id": "r2", "sample_rate_hz": 1.0, "samples": []}"#).unwrap();
    assert!(without.start_time.is_none());

    // Severity grades serialize lowercase.
    assert_eq!(
        serde_json::to_string(&OdiSeverity::Moderate).unwrap(),
        "\"moderate\""
    );
}
