// ABOUTME: Configuration module for the oximetry-intelligence crate
// ABOUTME: Re-exports detection configuration and error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Desaturation detection tunables (thresholds, durations)
pub mod detection;
/// Configuration error types
pub mod error;

pub use detection::DesaturationConfig;
pub use error::ConfigError;
