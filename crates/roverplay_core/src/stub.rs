// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drivable action stubs.
//!
//! A stub wraps an externally-generated, time-indexed pose function and its
//! total duration. The profile math behind the function (velocity limits,
//! spline fitting) lives in whatever produced the sampler; this crate only
//! consumes the `f(t) -> Pose2` contract.

use crate::geom::{angle_wrap, Pose2, Rot2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque time-indexed pose function supplied by a trajectory generator
pub type PoseSampler = Arc<dyn Fn(f64) -> Pose2 + Send + Sync>;

/// Unique identifier for a drivable stub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StubId(pub Uuid);

impl StubId {
    /// Create a new random stub ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StubId {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything with a well-defined duration and a pose for every local time
pub trait DrivableStub {
    /// Total duration in seconds
    fn duration(&self) -> f64;

    /// Pose at a local time offset, clamped into `[0, duration]`
    fn pose_at(&self, t: f64) -> Pose2;
}

fn clamp_local_time(t: f64, duration: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    t.clamp(0.0, duration)
}

/// A translational path segment
#[derive(Clone)]
pub struct TrajectoryStub {
    /// Unique stub ID
    pub id: StubId,
    duration: f64,
    sampler: PoseSampler,
}

impl TrajectoryStub {
    /// Wrap an externally-generated path sampler
    pub fn new(duration: f64, sampler: PoseSampler) -> Self {
        Self {
            id: StubId::new(),
            duration: duration.max(0.0),
            sampler,
        }
    }

    /// Constant-velocity straight segment, for demos and tests
    pub fn line(begin: Pose2, end: Pose2, duration: f64) -> Self {
        let duration = duration.max(0.0);
        let begin_heading = begin.heading_rad();
        let heading_delta = angle_wrap(end.heading_rad() - begin_heading);
        Self::new(
            duration,
            Arc::new(move |t| {
                let s = if duration > 0.0 { t / duration } else { 1.0 };
                Pose2::from_parts(
                    begin.position.lerp(end.position, s),
                    Rot2::exp(begin_heading + heading_delta * s),
                )
            }),
        )
    }
}

impl DrivableStub for TrajectoryStub {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn pose_at(&self, t: f64) -> Pose2 {
        (self.sampler)(clamp_local_time(t, self.duration))
    }
}

impl fmt::Debug for TrajectoryStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrajectoryStub")
            .field("id", &self.id)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

/// An in-place turn
#[derive(Clone)]
pub struct TurnStub {
    /// Unique stub ID
    pub id: StubId,
    /// Pose at the start of the turn
    pub begin_pose: Pose2,
    /// Signed turn angle in radians
    pub angle: f64,
    duration: f64,
    sampler: PoseSampler,
}

impl TurnStub {
    /// Wrap an externally-generated turn sampler
    pub fn new(begin_pose: Pose2, angle: f64, duration: f64, sampler: PoseSampler) -> Self {
        Self {
            id: StubId::new(),
            begin_pose,
            angle,
            duration: duration.max(0.0),
            sampler,
        }
    }

    /// Constant-rate turn, for demos and tests
    pub fn constant_rate(begin_pose: Pose2, angle: f64, duration: f64) -> Self {
        let duration = duration.max(0.0);
        Self::new(
            begin_pose,
            angle,
            duration,
            Arc::new(move |t| {
                let s = if duration > 0.0 { t / duration } else { 1.0 };
                Pose2::from_parts(
                    begin_pose.position,
                    begin_pose.heading * Rot2::exp(angle * s),
                )
            }),
        )
    }
}

impl DrivableStub for TurnStub {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn pose_at(&self, t: f64) -> Pose2 {
        (self.sampler)(clamp_local_time(t, self.duration))
    }
}

impl fmt::Debug for TurnStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnStub")
            .field("id", &self.id)
            .field("begin_pose", &self.begin_pose)
            .field("angle", &self.angle)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}
