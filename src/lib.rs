// ABOUTME: Library entry point for the oximetry intelligence engine
// ABOUTME: SpO2 desaturation event detection, ODI scoring and recording-level analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Oximetry Intelligence
//!
//! Detection and scoring of oxygen desaturation events in pulse-oximetry
//! (SpO2) recordings. The core is a streaming segmentation algorithm that
//! walks a recording once, rejects motion artifacts, discards sub-clinical
//! dips and splits over-long episodes at their first recovery point; above it
//! sits an analyzer producing clinical-style summaries (ODI, severity grades,
//! insight strings) for single recordings or batches.
//!
//! ## Architecture
//!
//! - **Algorithms**: the desaturation event segmenter (pure, deterministic)
//! - **Models**: recordings and event records shared across the crate
//! - **Config**: detection thresholds with environment overrides and validation
//! - **Analyzer**: recording-level summaries, ODI grading and insights
//!
//! ## Example Usage
//!
//! ```rust
//! use oximetry_intelligence::{DesaturationConfig, DesaturationDetector};
//!
//! let spo2 = vec![98.0, 98.0, 98.0, 90.0, 90.0, 90.0, 90.0, 90.0, 90.0, 90.0, 90.0, 98.0, 98.0, 98.0];
//! let events = DesaturationDetector::detect(&spo2, &DesaturationConfig::default())?;
//! assert_eq!(events.len(), 1);
//! # Ok::<(), oximetry_intelligence::AnalysisError>(())
//! ```

/// Signal segmentation algorithms
pub mod algorithms;
/// Detection configuration and validation
pub mod config;
/// Unified error handling
pub mod errors;
/// Core data models
pub mod models;
/// Recording-level analysis and scoring
pub mod oximetry_analyzer;
/// Clinical constants with literature references
pub mod physiological_constants;

pub use algorithms::DesaturationDetector;
pub use config::{ConfigError, DesaturationConfig};
pub use errors::AnalysisError;
pub use models::{DesaturationEvent, EventSeverity, SpO2Recording};
pub use oximetry_analyzer::{OdiSeverity, OximetryAnalysis, OximetryAnalyzer, OximetrySummary};
