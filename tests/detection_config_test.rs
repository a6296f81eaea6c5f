// ABOUTME: Unit tests for detection configuration defaults, validation and env overrides
// ABOUTME: Validates threshold consistency checks and environment variable fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use oximetry_intelligence::physiological_constants::desaturation;
use oximetry_intelligence::{ConfigError, DesaturationConfig};
use serial_test::serial;
use std::env;

#[test]
fn test_defaults_match_clinical_constants() {
    let config = DesaturationConfig::default();
    assert!((config.min_drop_percent - desaturation::MIN_DROP_PERCENT).abs() < f64::EPSILON);
    assert!(
        (config.max_artifact_drop_percent - desaturation::MAX_ARTIFACT_DROP_PERCENT).abs()
            < f64::EPSILON
    );
    assert_eq!(
        config.min_event_duration_samples,
        desaturation::MIN_EVENT_DURATION_SAMPLES
    );
    assert_eq!(
        config.max_event_duration_samples,
        desaturation::MAX_EVENT_DURATION_SAMPLES
    );
}

#[test]
fn test_default_configuration_validates() {
    assert!(DesaturationConfig::default().validate().is_ok());
}

#[test]
fn test_non_positive_min_drop_is_rejected() {
    let config = DesaturationConfig {
        min_drop_percent: 0.0,
        ..DesaturationConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    let config = DesaturationConfig {
        min_drop_percent: f64::NAN,
        ..DesaturationConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_artifact_threshold_must_exceed_candidate_threshold() {
    let config = DesaturationConfig {
        min_drop_percent: 3.0,
        max_artifact_drop_percent: 3.0,
        ..DesaturationConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRange(_))
    ));
}

#[test]
fn test_zero_minimum_duration_is_rejected() {
    let config = DesaturationConfig {
        min_event_duration_samples: 0,
        ..DesaturationConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));
}

#[test]
fn test_inverted_duration_bounds_are_rejected() {
    let config = DesaturationConfig {
        min_event_duration_samples: 20,
        max_event_duration_samples: 10,
        ..DesaturationConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRange(_))
    ));
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    env::set_var("OXIMETRY_MIN_DROP_PERCENT", "4.0");
    env::set_var("OXIMETRY_MAX_ARTIFACT_DROP_PERCENT", "40.0");
    env::set_var("OXIMETRY_MIN_EVENT_DURATION_SAMPLES", "10");
    env::set_var("OXIMETRY_MAX_EVENT_DURATION_SAMPLES", "90");

    let config = DesaturationConfig::from_env();
    assert!((config.min_drop_percent - 4.0).abs() < f64::EPSILON);
    assert!((config.max_artifact_drop_percent - 40.0).abs() < f64::EPSILON);
    assert_eq!(config.min_event_duration_samples, 10);
    assert_eq!(config.max_event_duration_samples, 90);

    env::remove_var("OXIMETRY_MIN_DROP_PERCENT");
    env::remove_var("OXIMETRY_MAX_ARTIFACT_DROP_PERCENT");
    env::remove_var("OXIMETRY_MIN_EVENT_DURATION_SAMPLES");
    env::remove_var("OXIMETRY_MAX_EVENT_DURATION_SAMPLES");
}

#[test]
#[serial]
fn test_from_env_falls_back_on_missing_or_invalid_values() {
    env::remove_var("OXIMETRY_MIN_DROP_PERCENT");
    env::set_var("OXIMETRY_MAX_ARTIFACT_DROP_PERCENT", "not-a-number");

    let config = DesaturationConfig::from_env();
    assert!((config.min_drop_percent - desaturation::MIN_DROP_PERCENT).abs() < f64::EPSILON);
    assert!(
        (config.max_artifact_drop_percent - desaturation::MAX_ARTIFACT_DROP_PERCENT).abs()
            < f64::EPSILON
    );

    env::remove_var("OXIMETRY_MAX_ARTIFACT_DROP_PERCENT");
}
