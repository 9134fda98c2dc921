// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bot construction.

use crate::bot::BotEntity;
use roverplay_core::Pose2;
use serde::{Deserialize, Serialize};

/// Drive kinematic limits, carried as bot metadata.
///
/// The limits parameterize whatever external generator produces the
/// trajectory samplers; the simulator itself only records them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Maximum translational velocity, in/s
    pub max_vel: f64,
    /// Maximum translational acceleration, in/s^2
    pub max_accel: f64,
    /// Maximum angular velocity, rad/s
    pub max_ang_vel: f64,
    /// Maximum angular acceleration, rad/s^2
    pub max_ang_accel: f64,
    /// Track width in inches
    pub track_width: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_vel: 30.0,
            max_accel: 30.0,
            max_ang_vel: 60f64.to_radians(),
            max_ang_accel: 60f64.to_radians(),
            track_width: 15.0,
        }
    }
}

/// Drive train kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DriveTrainType {
    /// Holonomic mecanum drive
    #[default]
    Mecanum,
    /// Differential tank drive
    Tank,
}

/// Fluent builder for a [`BotEntity`]
#[derive(Debug, Clone)]
pub struct BotBuilder {
    constraints: Constraints,
    width: f64,
    height: f64,
    start_pose: Pose2,
    drive_train: DriveTrainType,
    name: String,
}

#[allow(dead_code)] // Intentionally kept for API completeness
impl BotBuilder {
    /// Start from the stock 18x18 bot at the field origin
    pub fn new() -> Self {
        Self {
            constraints: Constraints::default(),
            width: 18.0,
            height: 18.0,
            start_pose: Pose2::IDENTITY,
            drive_train: DriveTrainType::default(),
            name: "rover".to_string(),
        }
    }

    /// Set the bot footprint in inches
    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the starting pose
    pub fn with_start_pose(mut self, pose: Pose2) -> Self {
        self.start_pose = pose;
        self
    }

    /// Set the drive constraints
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Set the drive train kind
    pub fn with_drive_train(mut self, drive_train: DriveTrainType) -> Self {
        self.drive_train = drive_train;
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Build the bot
    pub fn build(self) -> BotEntity {
        BotEntity::new(
            self.name,
            self.width,
            self.height,
            self.start_pose,
            self.constraints,
            self.drive_train,
        )
    }
}

impl Default for BotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
