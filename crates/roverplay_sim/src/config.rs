// SPDX-License-Identifier: MIT OR Apache-2.0
//! Simulation configuration.
//!
//! Field dimensions and loop rates are plain data passed to whoever needs
//! them; there are no process-wide globals.

use roverplay_core::Vec2;
use serde::{Deserialize, Serialize};

/// Errors from loading or saving a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// RON serialization failed
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    /// RON parsing failed
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Field width in inches, centered on the origin
    pub field_width: f64,
    /// Field height in inches, centered on the origin
    pub field_height: f64,
    /// Fixed-timestep rate in ticks per second
    pub tick_hz: f64,
    /// Cap on catch-up steps per frame
    pub max_steps_per_frame: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: 144.0,
            field_height: 144.0,
            tick_hz: 60.0,
            max_steps_per_frame: 8,
        }
    }
}

#[allow(dead_code)] // Intentionally kept for API completeness
impl SimConfig {
    /// Fixed timestep in seconds
    pub fn fixed_timestep(&self) -> f64 {
        1.0 / self.tick_hz
    }

    /// Whether a field-relative position lies inside the field
    pub fn contains(&self, position: Vec2) -> bool {
        position.x.abs() <= self.field_width / 2.0 && position.y.abs() <= self.field_height / 2.0
    }

    /// Serialize to a pretty RON string
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Parse from a RON string
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timestep() {
        let config = SimConfig::default();
        assert!((config.fixed_timestep() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_field_bounds() {
        let config = SimConfig::default();
        assert!(config.contains(Vec2::new(70.0, -70.0)));
        assert!(!config.contains(Vec2::new(73.0, 0.0)));
    }

    #[test]
    fn test_ron_round_trip() {
        let config = SimConfig {
            field_width: 100.0,
            field_height: 120.0,
            tick_hz: 30.0,
            max_steps_per_frame: 4,
        };
        let text = config.to_ron().unwrap();
        let loaded = SimConfig::from_ron(&text).unwrap();
        assert_eq!(loaded, config);
    }
}
