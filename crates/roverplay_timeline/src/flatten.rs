// SPDX-License-Identifier: MIT OR Apache-2.0
//! Flattening an action tree into a timeline.

use crate::timeline::{SegmentStub, Timeline, TimelineEvent};
use roverplay_core::{Action, DrivableStub, MarkerId, MarkerStamp};

/// Flatten a composite action tree into a time-ordered timeline.
///
/// A depth-first fold threads a running clock through the tree: sequential
/// children advance it one after another, parallel children each start at
/// the same instant and the group ends at the latest child, sleeps consume
/// time silently, and drivable leaves record an event. Instantaneous
/// actions record a marker and consume no time. The fold is pure, so the
/// same tree always yields the same timeline.
pub fn flatten(action: &Action) -> Timeline {
    let mut events = Vec::new();
    let mut stamps = Vec::new();

    let duration = place(0.0, action, &mut events, &mut stamps);

    // Stable sort: parallel branches interleave in declaration order.
    events.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    stamps.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut timeline = Timeline {
        duration,
        events,
        markers: Vec::new(),
    };
    let markers: Vec<MarkerStamp> = stamps
        .into_iter()
        .map(|(time, id, label)| MarkerStamp {
            id,
            time,
            label,
            pose: timeline.pose_at(time).unwrap_or_default(),
        })
        .collect();
    timeline.markers = markers;
    timeline
}

/// Schedule `action` starting at `t`; returns the time at which it completes.
fn place(
    t: f64,
    action: &Action,
    events: &mut Vec<TimelineEvent>,
    stamps: &mut Vec<(f64, MarkerId, String)>,
) -> f64 {
    match action {
        Action::Sequential(children) => children
            .iter()
            .fold(t, |clock, child| place(clock, child, events, stamps)),
        Action::Parallel(children) => children
            .iter()
            .map(|child| place(t, child, events, stamps))
            .fold(t, f64::max),
        Action::Sleep(dt) => t + dt.max(0.0),
        Action::Trajectory(stub) => {
            let end = t + stub.duration();
            events.push(TimelineEvent {
                start_time: t,
                stub: SegmentStub::Trajectory(stub.clone()),
            });
            end
        }
        Action::Turn(stub) => {
            let end = t + stub.duration();
            events.push(TimelineEvent {
                start_time: t,
                stub: SegmentStub::Turn(stub.clone()),
            });
            end
        }
        Action::Instant(instant) => {
            stamps.push((t, instant.id, instant.label.clone()));
            t
        }
    }
}
