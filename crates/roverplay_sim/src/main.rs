// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless RoverPlay demo.
//!
//! Builds a small autonomous-style action program, plays it to completion
//! at a fixed tick rate, and prints the sampled pose trace as JSON.

mod bot;
mod builder;
mod config;
mod progress;
mod runner;
mod scene;

use builder::BotBuilder;
use config::SimConfig;
use roverplay_core::{Action, Pose2, TrajectoryStub, TurnStub};
use runner::SimLoop;
use scene::Scene;
use serde::Serialize;
use std::f64::consts::FRAC_PI_2;

#[derive(Debug, Serialize)]
struct TraceSample {
    t: f64,
    x: f64,
    y: f64,
    heading_deg: f64,
    vx: f64,
    vy: f64,
}

fn demo_program() -> Action {
    let start = Pose2::new(12.0, -60.0, FRAC_PI_2);
    let at_junction = Pose2::new(12.0, -36.0, FRAC_PI_2);
    let faced_right = Pose2::new(12.0, -36.0, 0.0);
    let at_stack = Pose2::new(36.0, -36.0, 0.0);

    Action::seq([
        TrajectoryStub::line(start, at_junction, 2.0).into(),
        Action::instant("raise lift"),
        TurnStub::constant_rate(at_junction, -FRAC_PI_2, 1.2).into(),
        Action::par([
            TrajectoryStub::line(faced_right, at_stack, 2.5).into(),
            Action::seq([Action::sleep(0.5), Action::instant("start intake")]),
        ]),
        Action::sleep(0.8),
        TrajectoryStub::line(at_stack, start, 3.0).into(),
        Action::instant("park"),
    ])
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = SimConfig::default();
    tracing::info!(
        field_width = config.field_width,
        field_height = config.field_height,
        tick_hz = config.tick_hz,
        "starting headless sim"
    );

    let mut scene = Scene::new(config.clone());
    let id = scene.add_bot(
        BotBuilder::new()
            .with_name("demo")
            .with_start_pose(Pose2::new(12.0, -60.0, FRAC_PI_2))
            .build(),
    );

    if let Some(bot) = scene.bot_mut(id) {
        bot.run_program(&demo_program());
        bot.set_looping(false);
    }
    scene.start_all();

    let mut sim = SimLoop::new(&config);
    let mut trace = Vec::new();
    for _ in 0..200 {
        if !scene.bot(id).is_some_and(|b| b.player().is_running()) {
            break;
        }
        sim.run_for(&mut scene, 0.25);
        if let Some(bot) = scene.bot(id) {
            let pose = bot.pose();
            trace.push(TraceSample {
                t: bot.player().elapsed_time(),
                x: pose.position.x,
                y: pose.position.y,
                heading_deg: pose.heading_rad().to_degrees(),
                vx: bot.velocity().dx,
                vy: bot.velocity().dy,
            });
        }
    }

    let cycles = scene.hub().lock().completions(0);
    tracing::info!(ticks = sim.ticks(), cycles, "sim finished");

    match serde_json::to_string_pretty(&trace) {
        Ok(json) => println!("{json}"),
        Err(err) => tracing::error!(%err, "failed to serialize trace"),
    }
}
