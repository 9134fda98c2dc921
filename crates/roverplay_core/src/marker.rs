// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timestamped point annotations attached to an action program.

use crate::geom::Pose2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub Uuid);

impl MarkerId {
    /// Create a new random marker ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::new()
    }
}

/// A resolved marker: where and when an instantaneous action fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStamp {
    /// Marker ID, carried over from the program leaf
    pub id: MarkerId,
    /// Absolute timeline time in seconds
    pub time: f64,
    /// Human-readable label
    pub label: String,
    /// Pose the robot holds when the marker fires
    pub pose: Pose2,
}

/// Player-owned passed/unpassed tracking for one marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerState {
    /// The resolved marker
    pub stamp: MarkerStamp,
    passed: bool,
}

impl MarkerState {
    /// Wrap a stamp in its initial unpassed state
    pub fn new(stamp: MarkerStamp) -> Self {
        Self {
            stamp,
            passed: false,
        }
    }

    /// Whether the playback clock has crossed this marker
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Mark as crossed
    pub fn pass(&mut self) {
        self.passed = true;
    }

    /// Re-arm for the next playback cycle
    pub fn reset(&mut self) {
        self.passed = false;
    }
}
