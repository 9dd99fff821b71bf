// SPDX-License-Identifier: MIT

//! Simulated live tracking of riders carrying a campaign
//!
//! This module provides:
//! - `LiveTracker` - spawns a cancellable interval task per campaign
//! - `TrackerRegistry` - keeps one tracker per campaign for the server
//! - `random_offset` - the jitter used for one location step

mod jitter;
mod registry;
mod tracker;

pub use jitter::{random_offset, DEFAULT_JITTER};
pub use registry::TrackerRegistry;
pub use tracker::{LiveTracker, LocationSnapshot, TrackerConfig, TrackerExit, TrackingHandle};
