// SPDX-License-Identifier: MIT OR Apache-2.0
//! The flattened, time-ordered form of an action program.

use roverplay_core::{DrivableStub, MarkerStamp, Pose2, StubId, TrajectoryStub, TurnStub};

/// A drivable segment scheduled on the timeline
#[derive(Debug, Clone)]
pub enum SegmentStub {
    /// Translational path segment
    Trajectory(TrajectoryStub),
    /// In-place turn
    Turn(TurnStub),
}

impl SegmentStub {
    /// Identity of the wrapped stub
    pub fn id(&self) -> StubId {
        match self {
            SegmentStub::Trajectory(stub) => stub.id,
            SegmentStub::Turn(stub) => stub.id,
        }
    }

    /// Whether this segment is a translational path
    pub fn is_trajectory(&self) -> bool {
        matches!(self, SegmentStub::Trajectory(_))
    }
}

impl DrivableStub for SegmentStub {
    fn duration(&self) -> f64 {
        match self {
            SegmentStub::Trajectory(stub) => stub.duration(),
            SegmentStub::Turn(stub) => stub.duration(),
        }
    }

    fn pose_at(&self, t: f64) -> Pose2 {
        match self {
            SegmentStub::Trajectory(stub) => stub.pose_at(t),
            SegmentStub::Turn(stub) => stub.pose_at(t),
        }
    }
}

/// One scheduled segment: where on the clock it begins and what drives it
#[derive(Debug, Clone)]
pub struct TimelineEvent {
    /// Absolute start time in seconds, non-negative
    pub start_time: f64,
    /// The segment that runs from `start_time`
    pub stub: SegmentStub,
}

/// An action program rendered flat: total duration plus segments in
/// non-decreasing start-time order.
///
/// A timeline is immutable once produced. Consumers hold `Arc<Timeline>`
/// snapshots, so replacing a program is a single reference swap and a
/// reader never observes a half-built timeline.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub(crate) duration: f64,
    pub(crate) events: Vec<TimelineEvent>,
    pub(crate) markers: Vec<MarkerStamp>,
}

impl Timeline {
    /// Total duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Scheduled segments in start-time order
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Resolved program markers in time order
    pub fn markers(&self) -> &[MarkerStamp] {
        &self.markers
    }

    /// Whether the timeline schedules any segment
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Resolve the active segment and its local time offset at `t`.
    ///
    /// The active segment is the latest-starting segment that began at or
    /// before `t` and has not yet run out. Inside a gap the upcoming
    /// segment is returned at local offset 0, so playback holds the next
    /// starting pose instead of freezing on a stale one. Past the final
    /// segment there is nothing to resolve.
    pub fn segment_at(&self, t: f64) -> Option<(&TimelineEvent, f64)> {
        let next_idx = self
            .events
            .iter()
            .position(|event| event.start_time > t)
            .unwrap_or(self.events.len());

        for event in self.events[..next_idx].iter().rev() {
            let offset = t - event.start_time;
            if offset <= event.stub.duration() {
                return Some((event, offset));
            }
        }

        self.events.get(next_idx).map(|event| (event, 0.0))
    }

    /// Resolve the pose at `t`, if any segment covers or follows it
    pub fn pose_at(&self, t: f64) -> Option<Pose2> {
        self.segment_at(t)
            .map(|(event, offset)| event.stub.pose_at(offset))
    }
}
