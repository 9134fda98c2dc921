// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline flattening and playback for RoverPlay.
//!
//! This crate turns a composite action program into a flat, queryable
//! timeline and plays it back:
//! - `flatten` renders the tree into time-ordered segments plus markers
//! - `Timeline` answers "which segment, which pose, at time t"
//! - `TimelinePlayer` owns the virtual clock: start, pause, seek, loop
//! - `KinematicEstimator` derives velocity/acceleration/jerk telemetry
//!
//! ## Architecture
//!
//! The player is a cooperative state machine: a caller-owned loop calls
//! `advance(dt)` once per tick, and UI-style collaborators interact only
//! through `seek`/`pause`/`resume`/`start` and the progress sink.

pub mod flatten;
pub mod kinematics;
pub mod player;
pub mod timeline;

pub use flatten::flatten;
pub use kinematics::{KinematicEstimator, PoseRates};
pub use player::{PlaybackState, ProgressSink, SharedProgressSink, TimelinePlayer};
pub use timeline::{SegmentStub, Timeline, TimelineEvent};
