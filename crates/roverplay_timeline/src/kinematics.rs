// SPDX-License-Identifier: MIT OR Apache-2.0
//! Finite-difference kinematics over resolved poses.
//!
//! Observational only: the estimator watches the pose stream a player
//! produces and derives velocity, acceleration, and jerk per axis. It
//! never feeds back into pose resolution.

use roverplay_core::{angle_wrap, Pose2};
use serde::{Deserialize, Serialize};

/// Per-axis rate of change of a pose
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseRates {
    /// Rate along x
    pub dx: f64,
    /// Rate along y
    pub dy: f64,
    /// Rate of the heading angle in radians
    pub dheading: f64,
}

/// Backward finite-difference estimator for velocity, acceleration, jerk.
///
/// Differences are taken against the virtual playback clock, not wall
/// time. A zero, negative, or non-finite clock delta (first sample,
/// paused playback, loop wraparound) holds the previous estimates instead
/// of dividing by it.
#[derive(Debug, Clone, Default)]
pub struct KinematicEstimator {
    previous: Option<(Pose2, f64)>,
    velocity: PoseRates,
    acceleration: PoseRates,
    jerk: PoseRates,
}

impl KinematicEstimator {
    /// Create an estimator with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all history and zero the estimates
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed the pose resolved at `elapsed` seconds of playback
    pub fn update(&mut self, pose: Pose2, elapsed: f64) {
        let Some((prev_pose, prev_elapsed)) = self.previous else {
            self.previous = Some((pose, elapsed));
            return;
        };

        let dt = elapsed - prev_elapsed;
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let velocity = PoseRates {
            dx: (pose.position.x - prev_pose.position.x) / dt,
            dy: (pose.position.y - prev_pose.position.y) / dt,
            dheading: angle_wrap(pose.heading_rad() - prev_pose.heading_rad()) / dt,
        };
        let acceleration = PoseRates {
            dx: (velocity.dx - self.velocity.dx) / dt,
            dy: (velocity.dy - self.velocity.dy) / dt,
            dheading: (velocity.dheading - self.velocity.dheading) / dt,
        };
        self.jerk = PoseRates {
            dx: (acceleration.dx - self.acceleration.dx) / dt,
            dy: (acceleration.dy - self.acceleration.dy) / dt,
            dheading: (acceleration.dheading - self.acceleration.dheading) / dt,
        };
        self.velocity = velocity;
        self.acceleration = acceleration;
        self.previous = Some((pose, elapsed));
    }

    /// Latest velocity estimate
    pub fn velocity(&self) -> PoseRates {
        self.velocity
    }

    /// Latest acceleration estimate
    pub fn acceleration(&self) -> PoseRates {
        self.acceleration
    }

    /// Latest jerk estimate
    pub fn jerk(&self) -> PoseRates {
        self.jerk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_produces_no_estimate() {
        let mut est = KinematicEstimator::new();
        est.update(Pose2::new(5.0, 0.0, 0.0), 0.0);
        assert_eq!(est.velocity(), PoseRates::default());
    }

    #[test]
    fn test_constant_velocity() {
        let mut est = KinematicEstimator::new();
        for i in 0..5 {
            let t = i as f64 * 0.1;
            est.update(Pose2::new(3.0 * t, -1.0 * t, 0.0), t);
        }
        assert!((est.velocity().dx - 3.0).abs() < 1e-9);
        assert!((est.velocity().dy + 1.0).abs() < 1e-9);
        // Differences of a constant velocity vanish.
        assert!(est.acceleration().dx.abs() < 1e-6);
    }

    #[test]
    fn test_heading_rate() {
        let mut est = KinematicEstimator::new();
        est.update(Pose2::new(0.0, 0.0, 0.0), 0.0);
        est.update(Pose2::new(0.0, 0.0, 0.2), 0.1);
        assert!((est.velocity().dheading - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_dt_holds_previous_estimate() {
        let mut est = KinematicEstimator::new();
        est.update(Pose2::new(0.0, 0.0, 0.0), 0.0);
        est.update(Pose2::new(1.0, 0.0, 0.0), 0.5);
        let velocity = est.velocity();
        assert!((velocity.dx - 2.0).abs() < 1e-9);

        // Paused playback: same clock, possibly same pose. No division.
        est.update(Pose2::new(1.0, 0.0, 0.0), 0.5);
        assert_eq!(est.velocity(), velocity);
    }

    #[test]
    fn test_backwards_clock_holds_previous_estimate() {
        let mut est = KinematicEstimator::new();
        est.update(Pose2::new(0.0, 0.0, 0.0), 4.5);
        est.update(Pose2::new(2.0, 0.0, 0.0), 5.0);
        let velocity = est.velocity();

        // Loop wraparound rewinds the virtual clock.
        est.update(Pose2::new(0.0, 0.0, 0.0), 0.0);
        assert_eq!(est.velocity(), velocity);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut est = KinematicEstimator::new();
        est.update(Pose2::new(0.0, 0.0, 0.0), 0.0);
        est.update(Pose2::new(1.0, 0.0, 0.0), 1.0);
        est.reset();
        assert_eq!(est.velocity(), PoseRates::default());
        est.update(Pose2::new(9.0, 0.0, 0.0), 2.0);
        assert_eq!(est.velocity(), PoseRates::default());
    }
}
