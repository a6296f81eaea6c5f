// ABOUTME: Algorithm module for oximetry signal segmentation
// ABOUTME: Hosts the desaturation event detector and its scan state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Signal Segmentation Algorithms
//!
//! Streaming segmentation of pulse-oximetry signals into discrete clinical
//! events. The detector is a pure function of its input series and
//! configuration: no I/O, no shared state, safe to call concurrently on
//! different recordings.

pub mod desaturation;

pub use desaturation::DesaturationDetector;
