// SPDX-License-Identifier: MIT OR Apache-2.0
//! Composite action programs.
//!
//! An action program is a tree: sequential and parallel groups over
//! drivable leaves (trajectories, turns), sleeps, and instantaneous
//! custom actions. The tree is the authoring format; playback consumes
//! the flattened timeline derived from it.

use crate::marker::MarkerId;
use crate::stub::{TrajectoryStub, TurnStub};

/// A composable unit of robot behavior
#[derive(Debug, Clone)]
pub enum Action {
    /// Children run back to back, each starting when the previous completes
    Sequential(Vec<Action>),
    /// Children all start together; the group ends when the last child ends
    Parallel(Vec<Action>),
    /// Consumes a fixed duration in seconds and produces no motion
    Sleep(f64),
    /// Drives a time-parameterized path segment
    Trajectory(TrajectoryStub),
    /// Turns in place
    Turn(TurnStub),
    /// Completes instantly; becomes a timeline marker
    Instant(InstantAction),
}

/// An instantaneous custom action, visible only as a program marker
#[derive(Debug, Clone)]
pub struct InstantAction {
    /// Marker identity carried into the flattened timeline
    pub id: MarkerId,
    /// Human-readable label
    pub label: String,
}

impl Action {
    /// Sequential group
    pub fn seq(children: impl IntoIterator<Item = Action>) -> Action {
        Action::Sequential(children.into_iter().collect())
    }

    /// Parallel group
    pub fn par(children: impl IntoIterator<Item = Action>) -> Action {
        Action::Parallel(children.into_iter().collect())
    }

    /// Delay for a fixed number of seconds
    pub fn sleep(seconds: f64) -> Action {
        Action::Sleep(seconds.max(0.0))
    }

    /// Instantaneous labeled action
    pub fn instant(label: impl Into<String>) -> Action {
        Action::Instant(InstantAction {
            id: MarkerId::new(),
            label: label.into(),
        })
    }
}

impl From<TrajectoryStub> for Action {
    fn from(stub: TrajectoryStub) -> Action {
        Action::Trajectory(stub)
    }
}

impl From<TurnStub> for Action {
    fn from(stub: TurnStub) -> Action {
        Action::Turn(stub)
    }
}
