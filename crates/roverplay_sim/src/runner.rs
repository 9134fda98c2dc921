// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed-timestep scene driver.

use crate::config::SimConfig;
use crate::scene::Scene;

/// Accumulator-based fixed-timestep loop.
///
/// Wall-clock frame deltas feed the accumulator; whole fixed steps drain
/// it. A cap on catch-up steps per frame keeps one slow frame from
/// snowballing into ever-longer ones.
#[derive(Debug, Clone)]
pub struct SimLoop {
    fixed_timestep: f64,
    max_steps_per_frame: u32,
    accumulated: f64,
    elapsed: f64,
    ticks: u64,
}

#[allow(dead_code)] // Intentionally kept for API completeness
impl SimLoop {
    /// Create a loop from the configured tick rate
    pub fn new(config: &SimConfig) -> Self {
        Self {
            fixed_timestep: config.fixed_timestep(),
            max_steps_per_frame: config.max_steps_per_frame,
            accumulated: 0.0,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    /// Fixed timestep in seconds
    pub fn fixed_timestep(&self) -> f64 {
        self.fixed_timestep
    }

    /// Total simulated time in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Total ticks run
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feed one wall-clock frame; returns the fixed steps run
    pub fn frame(&mut self, scene: &mut Scene, frame_dt: f64) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulated += frame_dt;
        }

        let mut steps = 0;
        while self.accumulated >= self.fixed_timestep {
            self.accumulated -= self.fixed_timestep;
            self.step(scene);
            steps += 1;
            if steps >= self.max_steps_per_frame {
                self.accumulated = 0.0;
                break;
            }
        }
        steps
    }

    /// Run approximately `seconds` of simulated time in whole ticks
    pub fn run_for(&mut self, scene: &mut Scene, seconds: f64) -> u64 {
        if !seconds.is_finite() || seconds <= 0.0 {
            return 0;
        }
        let n = (seconds / self.fixed_timestep).round() as u64;
        for _ in 0..n {
            self.step(scene);
        }
        n
    }

    fn step(&mut self, scene: &mut Scene) {
        scene.tick(self.fixed_timestep);
        self.elapsed += self.fixed_timestep;
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BotBuilder;

    fn scene_with_bot() -> Scene {
        let mut scene = Scene::new(SimConfig::default());
        scene.add_bot(BotBuilder::new().build());
        scene
    }

    #[test]
    fn test_frame_drains_whole_steps() {
        let config = SimConfig::default();
        let mut scene = scene_with_bot();
        let mut sim = SimLoop::new(&config);

        // 0.04s is ~2.4 timesteps: two steps now, the rest stays accumulated.
        let steps = sim.frame(&mut scene, 0.04);
        assert_eq!(steps, 2);
        // The ~0.007s remainder plus 0.02s covers one more step.
        let steps = sim.frame(&mut scene, 0.02);
        assert_eq!(steps, 1);
    }

    #[test]
    fn test_frame_caps_catchup() {
        let config = SimConfig::default();
        let mut scene = scene_with_bot();
        let mut sim = SimLoop::new(&config);

        let steps = sim.frame(&mut scene, 10.0);
        assert_eq!(steps, config.max_steps_per_frame);
        // The backlog was dropped, not deferred.
        assert_eq!(sim.frame(&mut scene, 0.0), 0);
    }

    #[test]
    fn test_run_for_counts_ticks() {
        let config = SimConfig::default();
        let mut scene = scene_with_bot();
        let mut sim = SimLoop::new(&config);

        let n = sim.run_for(&mut scene, 1.0);
        assert_eq!(n, 60);
        assert_eq!(sim.ticks(), 60);
        assert!((sim.elapsed() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs_are_ignored() {
        let config = SimConfig::default();
        let mut scene = scene_with_bot();
        let mut sim = SimLoop::new(&config);

        assert_eq!(sim.frame(&mut scene, f64::NAN), 0);
        assert_eq!(sim.frame(&mut scene, -1.0), 0);
        assert_eq!(sim.run_for(&mut scene, f64::INFINITY), 0);
    }
}
