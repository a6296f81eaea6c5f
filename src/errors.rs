// ABOUTME: Unified error types for oximetry analysis with fail-fast configuration policy
// ABOUTME: Invalid configuration errors out before a scan; degenerate input degrades gracefully
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Error taxonomy for a pure analysis library: malformed configuration fails
//! fast before any scan starts, malformed signal data is rejected with an
//! invalid-input error, and degenerate-but-valid input (a signal too short to
//! evaluate) degrades gracefully to an empty result instead of erroring.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors produced by oximetry analysis entry points
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input signal or recording failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Detection configuration failed validation before the scan started
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
