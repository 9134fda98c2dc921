// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types for RoverPlay.
//!
//! This crate provides the value types shared by the simulator:
//! - 2D rigid-transform algebra (poses, rotations, twists)
//! - Composite action programs
//! - Drivable stubs wrapping opaque time-indexed pose functions
//! - Program markers
//!
//! Nothing here performs I/O; trajectory and turn profiles are supplied
//! from outside through the stub samplers.

pub mod action;
pub mod geom;
pub mod marker;
pub mod stub;

pub use action::{Action, InstantAction};
pub use geom::{angle_wrap, Pose2, Rot2, Twist2, Vec2};
pub use marker::{MarkerId, MarkerStamp, MarkerState};
pub use stub::{DrivableStub, PoseSampler, StubId, TrajectoryStub, TurnStub};
