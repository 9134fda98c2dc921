// SPDX-License-Identifier: MIT OR Apache-2.0
//! The simulated bot.

use crate::builder::{Constraints, DriveTrainType};
use crate::scene::EntityId;
use roverplay_core::{Action, Pose2};
use roverplay_timeline::{
    KinematicEstimator, PoseRates, SharedProgressSink, Timeline, TimelinePlayer,
};
use std::sync::Arc;

/// A bot driving an action program.
///
/// Owns its player and derivative estimator; the scene ticks it and
/// everything else goes through the playback operations.
pub struct BotEntity {
    id: EntityId,
    name: String,
    width: f64,
    height: f64,
    start_pose: Pose2,
    constraints: Constraints,
    drive_train: DriveTrainType,
    player: TimelinePlayer,
    estimator: KinematicEstimator,
    pose: Pose2,
}

#[allow(dead_code)] // Intentionally kept for API completeness
impl BotEntity {
    pub(crate) fn new(
        name: String,
        width: f64,
        height: f64,
        start_pose: Pose2,
        constraints: Constraints,
        drive_train: DriveTrainType,
    ) -> Self {
        Self {
            id: EntityId::new(),
            name,
            width,
            height,
            start_pose,
            constraints,
            drive_train,
            player: TimelinePlayer::new(),
            estimator: KinematicEstimator::new(),
            pose: start_pose,
        }
    }

    /// Stable identity within a scene
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Footprint in inches
    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Configured drive limits
    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    /// Drive train kind
    pub fn drive_train(&self) -> DriveTrainType {
        self.drive_train
    }

    /// Latest resolved pose
    pub fn pose(&self) -> Pose2 {
        self.pose
    }

    /// Configured starting pose
    pub fn start_pose(&self) -> Pose2 {
        self.start_pose
    }

    /// Flatten a program and make it current; returns the timeline snapshot
    pub fn run_program(&mut self, program: &Action) -> Arc<Timeline> {
        let timeline = self.player.set_program(program);
        self.estimator.reset();
        self.pose = self.player.pose();
        tracing::info!(
            bot = %self.name,
            duration = timeline.duration(),
            segments = timeline.events().len(),
            markers = timeline.markers().len(),
            "program loaded"
        );
        timeline
    }

    /// Restart playback from the beginning
    pub fn start(&mut self) {
        self.player.start();
        self.estimator.reset();
    }

    /// Freeze the playback clock
    pub fn pause(&mut self) {
        self.player.pause();
    }

    /// Unfreeze the playback clock
    pub fn resume(&mut self) {
        self.player.resume();
    }

    /// Scrub to an absolute playback time
    pub fn seek(&mut self, t: f64) {
        self.player.seek(t);
        if self.player.timeline().is_some() {
            self.pose = self.player.pose();
        }
    }

    /// Set whether playback wraps around at the end
    pub fn set_looping(&mut self, looping: bool) {
        self.player.set_looping(looping);
    }

    /// Read access to the playback state machine
    pub fn player(&self) -> &TimelinePlayer {
        &self.player
    }

    pub(crate) fn attach_progress_sink(&mut self, sink: SharedProgressSink, slot: usize) {
        self.player.set_progress_sink(sink, slot);
    }

    /// Advance one simulation tick
    pub fn update(&mut self, dt: f64) {
        self.player.advance(dt);
        // Without a program the bot sits at its start pose.
        if self.player.timeline().is_some() {
            self.pose = self.player.pose();
        }
        self.estimator.update(self.pose, self.player.elapsed_time());
    }

    /// Latest velocity estimate
    pub fn velocity(&self) -> PoseRates {
        self.estimator.velocity()
    }

    /// Latest acceleration estimate
    pub fn acceleration(&self) -> PoseRates {
        self.estimator.acceleration()
    }

    /// Latest jerk estimate
    pub fn jerk(&self) -> PoseRates {
        self.estimator.jerk()
    }
}
