// SPDX-License-Identifier: MIT OR Apache-2.0
//! 2D rigid-transform algebra for field-relative robot poses.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Series cutoff below which trig ratios switch to their Taylor forms.
const SMALL_ANGLE: f64 = 1e-9;

/// Normalize an angle into `(-pi, pi]`.
pub fn angle_wrap(theta: f64) -> f64 {
    let mut wrapped = theta.rem_euclid(std::f64::consts::TAU);
    if wrapped > std::f64::consts::PI {
        wrapped -= std::f64::consts::TAU;
    }
    wrapped
}

/// 2D vector in field units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a vector from components
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Direction angle in radians
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Componentwise linear interpolation
    pub fn lerp(self, other: Vec2, t: f64) -> Vec2 {
        Vec2::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Heading stored as a unit complex number
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rot2 {
    /// Real part (cosine of the heading angle)
    pub cos: f64,
    /// Imaginary part (sine of the heading angle)
    pub sin: f64,
}

impl Rot2 {
    /// The zero rotation
    pub const IDENTITY: Rot2 = Rot2 { cos: 1.0, sin: 0.0 };

    /// Rotation from an angle in radians
    pub fn exp(theta: f64) -> Self {
        Self {
            cos: theta.cos(),
            sin: theta.sin(),
        }
    }

    /// Angle in radians, in `(-pi, pi]`
    pub fn log(self) -> f64 {
        self.sin.atan2(self.cos)
    }

    /// Inverse rotation
    pub fn inverse(self) -> Rot2 {
        Rot2 {
            cos: self.cos,
            sin: -self.sin,
        }
    }
}

impl Default for Rot2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Rot2> for Rot2 {
    type Output = Rot2;
    fn mul(self, rhs: Rot2) -> Rot2 {
        Rot2 {
            cos: self.cos * rhs.cos - self.sin * rhs.sin,
            sin: self.sin * rhs.cos + self.cos * rhs.sin,
        }
    }
}

impl Mul<Vec2> for Rot2 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(
            self.cos * rhs.x - self.sin * rhs.y,
            self.sin * rhs.x + self.cos * rhs.y,
        )
    }
}

/// 2D rigid transform: position plus heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose2 {
    /// Translation component
    pub position: Vec2,
    /// Rotation component
    pub heading: Rot2,
}

impl Pose2 {
    /// The identity transform at the field origin
    pub const IDENTITY: Pose2 = Pose2 {
        position: Vec2::ZERO,
        heading: Rot2::IDENTITY,
    };

    /// Create a pose from coordinates and a heading angle in radians
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            heading: Rot2::exp(heading),
        }
    }

    /// Create a pose from already-built parts
    pub fn from_parts(position: Vec2, heading: Rot2) -> Self {
        Self { position, heading }
    }

    /// Heading angle in radians, in `(-pi, pi]`
    pub fn heading_rad(self) -> f64 {
        self.heading.log()
    }

    /// Inverse transform
    pub fn inverse(self) -> Pose2 {
        let heading = self.heading.inverse();
        Pose2 {
            position: heading * -self.position,
            heading,
        }
    }

    /// Exponential map from a twist increment to a pose
    pub fn exp(twist: Twist2) -> Pose2 {
        let theta = twist.angle;
        let (sin_ratio, cos_ratio) = if theta.abs() < SMALL_ANGLE {
            (1.0 - theta * theta / 6.0, theta / 2.0)
        } else {
            (theta.sin() / theta, (1.0 - theta.cos()) / theta)
        };
        Pose2 {
            position: Vec2::new(
                sin_ratio * twist.line.x - cos_ratio * twist.line.y,
                cos_ratio * twist.line.x + sin_ratio * twist.line.y,
            ),
            heading: Rot2::exp(theta),
        }
    }

    /// Logarithmic map from a pose to its twist increment
    pub fn log(self) -> Twist2 {
        let theta = self.heading.log();
        let half = 0.5 * theta;
        // half / tan(half), continued through zero
        let v = if theta.abs() < SMALL_ANGLE {
            1.0 - theta * theta / 12.0
        } else {
            half * self.heading.sin / (1.0 - self.heading.cos)
        };
        Twist2 {
            line: Vec2::new(
                v * self.position.x + half * self.position.y,
                -half * self.position.x + v * self.position.y,
            ),
            angle: theta,
        }
    }
}

impl Default for Pose2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Pose2> for Pose2 {
    type Output = Pose2;
    fn mul(self, rhs: Pose2) -> Pose2 {
        Pose2 {
            position: self.heading * rhs.position + self.position,
            heading: self.heading * rhs.heading,
        }
    }
}

impl Mul<Vec2> for Pose2 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.heading * rhs + self.position
    }
}

/// Velocity-space increment of a pose
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Twist2 {
    /// Linear component
    pub line: Vec2,
    /// Angular component in radians
    pub angle: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_angle_wrap() {
        assert_close(angle_wrap(0.0), 0.0);
        assert_close(angle_wrap(3.0 * PI), PI);
        assert_close(angle_wrap(-FRAC_PI_2), -FRAC_PI_2);
        assert_close(angle_wrap(2.0 * PI + 0.25), 0.25);
    }

    #[test]
    fn test_rot2_round_trip() {
        for theta in [-2.5, -FRAC_PI_2, 0.0, 0.3, 1.0, 3.0] {
            assert_close(Rot2::exp(theta).log(), angle_wrap(theta));
        }
    }

    #[test]
    fn test_rot2_compose_inverse() {
        let r = Rot2::exp(0.7) * Rot2::exp(-0.2);
        assert_close(r.log(), 0.5);
        assert_close((r * r.inverse()).log(), 0.0);
    }

    #[test]
    fn test_pose_compose_inverse() {
        let a = Pose2::new(3.0, -1.0, 0.4);
        let b = Pose2::new(-2.0, 5.0, 1.1);
        let c = a * b;
        let back = a.inverse() * c;
        assert_close(back.position.x, b.position.x);
        assert_close(back.position.y, b.position.y);
        assert_close(back.heading_rad(), b.heading_rad());
    }

    #[test]
    fn test_pose_exp_log_round_trip() {
        let twist = Twist2 {
            line: Vec2::new(4.0, -2.0),
            angle: 0.9,
        };
        let round = Pose2::exp(twist).log();
        assert_close(round.line.x, twist.line.x);
        assert_close(round.line.y, twist.line.y);
        assert_close(round.angle, twist.angle);
    }

    #[test]
    fn test_pose_exp_zero_angle_is_translation() {
        let pose = Pose2::exp(Twist2 {
            line: Vec2::new(2.0, 3.0),
            angle: 0.0,
        });
        assert_close(pose.position.x, 2.0);
        assert_close(pose.position.y, 3.0);
        assert_close(pose.heading_rad(), 0.0);
    }

    #[test]
    fn test_pose_transforms_point() {
        let pose = Pose2::new(1.0, 0.0, FRAC_PI_2);
        let mapped = pose * Vec2::new(1.0, 0.0);
        assert_close(mapped.x, 1.0);
        assert_close(mapped.y, 1.0);
    }

    #[test]
    fn test_serialization() {
        let pose = Pose2::new(12.0, -7.5, 0.25);
        let ron_str = ron::to_string(&pose).unwrap();
        let loaded: Pose2 = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded, pose);
    }
}
