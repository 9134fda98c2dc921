// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback state machine over a flattened timeline.
//!
//! The player is driven synchronously by a caller-owned loop: one
//! `advance(dt)` per simulation tick, plus `seek` for scrubbing. It owns
//! the virtual clock, the marker passed/unpassed flags, and the single
//! registered progress sink. Nothing here blocks.

use crate::flatten::flatten;
use crate::timeline::{Timeline, TimelineEvent};
use parking_lot::Mutex;
use roverplay_core::{Action, MarkerState, Pose2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Virtual playback clock state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Elapsed virtual time in seconds
    pub elapsed_time: f64,
    /// Whether playback has been started and not yet completed
    pub running: bool,
    /// Whether the clock is frozen
    pub paused: bool,
    /// Whether playback wraps around at the end
    pub looping: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            elapsed_time: 0.0,
            running: false,
            paused: false,
            looping: true,
        }
    }
}

/// Receiver for per-tick progress and completion reports
pub trait ProgressSink {
    /// Elapsed time pushed after an advance, tagged with the player's slot
    fn report_progress(&mut self, slot: usize, elapsed: f64);

    /// A playback cycle finished (loop wrap or terminal completion)
    fn report_done(&mut self, slot: usize);
}

/// Shared handle to a progress sink
pub type SharedProgressSink = Arc<Mutex<dyn ProgressSink + Send>>;

/// Stateful playback of one action program
#[derive(Default)]
pub struct TimelinePlayer {
    timeline: Option<Arc<Timeline>>,
    state: PlaybackState,
    pose: Pose2,
    markers: Vec<MarkerState>,
    sink: Option<(SharedProgressSink, usize)>,
}

impl TimelinePlayer {
    /// Create an idle player with no program assigned
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a program and make it the current timeline.
    ///
    /// The swap is a single `Arc` replacement, so a renderer holding the
    /// previous snapshot keeps a consistent view. Marker flags rebuild
    /// from the new program; playback flags are left untouched.
    pub fn set_program(&mut self, action: &Action) -> Arc<Timeline> {
        let timeline = Arc::new(flatten(action));
        self.set_timeline(Arc::clone(&timeline));
        timeline
    }

    /// Adopt an already-flattened timeline snapshot
    pub fn set_timeline(&mut self, timeline: Arc<Timeline>) {
        self.markers = timeline
            .markers()
            .iter()
            .cloned()
            .map(MarkerState::new)
            .collect();
        self.state.elapsed_time = 0.0;
        self.pose = timeline.pose_at(0.0).unwrap_or_default();
        self.timeline = Some(timeline);
    }

    /// Current timeline snapshot, if a program has been assigned
    pub fn timeline(&self) -> Option<&Arc<Timeline>> {
        self.timeline.as_ref()
    }

    /// Total duration of the current timeline, 0 without one
    pub fn duration(&self) -> f64 {
        self.timeline.as_ref().map_or(0.0, |t| t.duration())
    }

    /// Start (or restart) playback from the beginning
    pub fn start(&mut self) {
        self.state.running = true;
        self.state.elapsed_time = 0.0;
        self.reset_markers();
        if let Some(timeline) = &self.timeline {
            if let Some(pose) = timeline.pose_at(0.0) {
                self.pose = pose;
            }
        }
        tracing::debug!("playback started");
    }

    /// Freeze the clock; a no-op if already paused
    pub fn pause(&mut self) {
        self.state.paused = true;
    }

    /// Unfreeze the clock; a no-op if not paused
    pub fn resume(&mut self) {
        self.state.paused = false;
    }

    /// Set whether playback wraps around at the end
    pub fn set_looping(&mut self, looping: bool) {
        self.state.looping = looping;
    }

    /// Jump the clock to an absolute time, clamped into `[0, duration]`.
    ///
    /// Works in any state, running or not; non-finite input clamps to 0.
    pub fn seek(&mut self, t: f64) {
        let Some(timeline) = &self.timeline else {
            return;
        };
        // f64::clamp propagates NaN; infinities clamp to the range ends.
        let clamped = if t.is_nan() {
            0.0
        } else {
            t.clamp(0.0, timeline.duration())
        };
        self.state.elapsed_time = clamped;
        if let Some(pose) = timeline.pose_at(clamped) {
            self.pose = pose;
        }
    }

    /// Advance the virtual clock and resolve the current pose.
    ///
    /// No-op without a timeline, when not running, or while paused. On
    /// overrun, reports done exactly once per cycle and either wraps
    /// (looping) or stops (non-looping).
    pub fn advance(&mut self, dt: f64) {
        let Some(timeline) = self.timeline.clone() else {
            return;
        };
        if !self.state.running || self.state.paused {
            return;
        }
        if dt.is_finite() && dt > 0.0 {
            self.state.elapsed_time += dt;
        }

        let elapsed = self.state.elapsed_time;
        if elapsed <= timeline.duration() {
            if let Some(pose) = timeline.pose_at(elapsed) {
                self.pose = pose;
            }
            for marker in &mut self.markers {
                if !marker.passed() && elapsed >= marker.stamp.time {
                    marker.pass();
                    tracing::debug!(label = %marker.stamp.label, time = marker.stamp.time, "marker passed");
                }
            }
            if let Some((sink, slot)) = &self.sink {
                sink.lock().report_progress(*slot, elapsed);
            }
        } else if self.state.looping {
            self.reset_markers();
            self.state.elapsed_time = 0.0;
            tracing::debug!("playback wrapped");
            if let Some((sink, slot)) = &self.sink {
                sink.lock().report_done(*slot);
            }
        } else {
            self.state.elapsed_time = 0.0;
            self.state.running = false;
            tracing::debug!("playback completed");
            if let Some((sink, slot)) = &self.sink {
                sink.lock().report_done(*slot);
            }
        }
    }

    /// Register the progress sink, replacing any previous registration
    pub fn set_progress_sink(&mut self, sink: SharedProgressSink, slot: usize) {
        self.sink = Some((sink, slot));
    }

    /// Current resolved pose; identity until a program resolves one
    pub fn pose(&self) -> Pose2 {
        self.pose
    }

    /// Elapsed virtual time in seconds
    pub fn elapsed_time(&self) -> f64 {
        self.state.elapsed_time
    }

    /// Whether playback has been started and not yet completed
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Whether the clock is frozen
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Whether playback wraps around at the end
    pub fn is_looping(&self) -> bool {
        self.state.looping
    }

    /// Snapshot of the playback flags and clock
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Marker states in time order
    pub fn markers(&self) -> &[MarkerState] {
        &self.markers
    }

    /// Active segment and local offset at the current clock, if any
    pub fn current_segment(&self) -> Option<(&TimelineEvent, f64)> {
        self.timeline
            .as_ref()
            .and_then(|t| t.segment_at(self.state.elapsed_time))
    }

    fn reset_markers(&mut self) {
        for marker in &mut self.markers {
            marker.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roverplay_core::TrajectoryStub;

    struct Recorder {
        progress: Vec<(usize, f64)>,
        done: Vec<usize>,
    }

    impl ProgressSink for Recorder {
        fn report_progress(&mut self, slot: usize, elapsed: f64) {
            self.progress.push((slot, elapsed));
        }

        fn report_done(&mut self, slot: usize) {
            self.done.push(slot);
        }
    }

    fn shared_recorder() -> Arc<Mutex<Recorder>> {
        Arc::new(Mutex::new(Recorder {
            progress: Vec::new(),
            done: Vec::new(),
        }))
    }

    fn five_second_program() -> Action {
        Action::seq([
            TrajectoryStub::line(Pose2::IDENTITY, Pose2::new(10.0, 0.0, 0.0), 2.0).into(),
            TrajectoryStub::line(Pose2::new(10.0, 0.0, 0.0), Pose2::new(10.0, 30.0, 0.0), 3.0)
                .into(),
        ])
    }

    #[test]
    fn test_advance_without_timeline_is_noop() {
        let mut player = TimelinePlayer::new();
        player.start();
        player.advance(1.0);
        assert_eq!(player.elapsed_time(), 0.0);
        assert_eq!(player.pose(), Pose2::IDENTITY);
    }

    #[test]
    fn test_advance_before_start_is_noop() {
        let mut player = TimelinePlayer::new();
        player.set_program(&five_second_program());
        player.advance(1.0);
        assert_eq!(player.elapsed_time(), 0.0);
    }

    #[test]
    fn test_advance_tracks_pose() {
        let mut player = TimelinePlayer::new();
        player.set_program(&five_second_program());
        player.start();
        player.advance(1.0);
        assert_eq!(player.elapsed_time(), 1.0);
        assert!((player.pose().position.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut player = TimelinePlayer::new();
        player.set_program(&five_second_program());
        player.start();
        player.advance(1.0);
        player.pause();
        player.advance(1.0);
        player.advance(1.0);
        assert_eq!(player.elapsed_time(), 1.0);
        player.resume();
        player.advance(1.0);
        assert_eq!(player.elapsed_time(), 2.0);
    }

    #[test]
    fn test_loop_wraparound_reports_one_done() {
        let recorder = shared_recorder();
        let mut player = TimelinePlayer::new();
        player.set_program(&five_second_program());
        player.set_progress_sink(recorder.clone(), 7);
        player.set_looping(true);
        player.start();

        for _ in 0..12 {
            player.advance(0.5);
        }

        let state = recorder.lock();
        assert_eq!(state.done, vec![7]);
        assert!(player.is_running());
        assert!(player.elapsed_time() >= 0.0 && player.elapsed_time() < 5.0);
    }

    #[test]
    fn test_loop_wraparound_rearms_markers() {
        let recorder = shared_recorder();
        let mut player = TimelinePlayer::new();
        player.set_program(&Action::seq([
            TrajectoryStub::line(Pose2::IDENTITY, Pose2::new(10.0, 0.0, 0.0), 2.0).into(),
            Action::instant("score"),
        ]));
        player.set_progress_sink(recorder.clone(), 0);
        player.set_looping(true);
        player.start();

        player.advance(2.0);
        assert!(player.markers()[0].passed());
        player.advance(0.5); // overrun -> wrap
        assert!(!player.markers()[0].passed());
        assert_eq!(player.elapsed_time(), 0.0);
        assert_eq!(recorder.lock().done.len(), 1);
    }

    #[test]
    fn test_non_looping_terminates() {
        let recorder = shared_recorder();
        let mut player = TimelinePlayer::new();
        player.set_program(&five_second_program());
        player.set_progress_sink(recorder.clone(), 3);
        player.set_looping(false);
        player.start();

        for _ in 0..12 {
            player.advance(0.5);
        }

        assert!(!player.is_running());
        assert_eq!(player.elapsed_time(), 0.0);
        assert_eq!(recorder.lock().done, vec![3]);

        // Further advances stay no-ops.
        player.advance(1.0);
        assert_eq!(player.elapsed_time(), 0.0);
        assert_eq!(recorder.lock().done, vec![3]);
    }

    #[test]
    fn test_seek_clamps() {
        let mut player = TimelinePlayer::new();
        player.set_program(&five_second_program());

        player.seek(-10.0);
        assert_eq!(player.elapsed_time(), 0.0);
        player.seek(105.0);
        assert_eq!(player.elapsed_time(), 5.0);
        player.seek(f64::NAN);
        assert_eq!(player.elapsed_time(), 0.0);
        player.seek(f64::INFINITY);
        assert_eq!(player.elapsed_time(), 5.0);
        player.seek(f64::NEG_INFINITY);
        assert_eq!(player.elapsed_time(), 0.0);
    }

    #[test]
    fn test_seek_scrubs_pose_while_stopped() {
        let mut player = TimelinePlayer::new();
        player.set_program(&five_second_program());
        assert!(!player.is_running());

        player.seek(1.0);
        assert!((player.pose().position.x - 5.0).abs() < 1e-9);
        player.seek(3.5);
        assert!((player.pose().position.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_reported_each_tick() {
        let recorder = shared_recorder();
        let mut player = TimelinePlayer::new();
        player.set_program(&five_second_program());
        player.set_progress_sink(recorder.clone(), 1);
        player.start();

        player.advance(0.5);
        player.advance(0.5);
        assert_eq!(recorder.lock().progress, vec![(1, 0.5), (1, 1.0)]);
    }

    #[test]
    fn test_restart_rearms_markers() {
        let mut player = TimelinePlayer::new();
        player.set_program(&Action::seq([
            Action::instant("launch"),
            TrajectoryStub::line(Pose2::IDENTITY, Pose2::new(10.0, 0.0, 0.0), 2.0).into(),
        ]));
        player.set_looping(false);
        player.start();
        player.advance(0.5);
        assert!(player.markers()[0].passed());

        player.start();
        assert!(!player.markers()[0].passed());
        assert_eq!(player.elapsed_time(), 0.0);
        assert!(player.is_running());
    }

    #[test]
    fn test_negative_and_nan_deltas_are_ignored() {
        let mut player = TimelinePlayer::new();
        player.set_program(&five_second_program());
        player.start();
        player.advance(1.0);
        player.advance(-0.5);
        player.advance(f64::NAN);
        assert_eq!(player.elapsed_time(), 1.0);
    }
}
