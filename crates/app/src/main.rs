//! Headless demo driver: runs the engine on its fixed tick, scripts a short
//! mission (drive, speed change, re-route, preset switch), and logs the
//! throttled telemetry as JSON lines — standing in for the web rendering
//! layer, which consumes exactly the same resources and events.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::camera::{CameraMode, SetCameraMode};
use simulation::navigation::{RequestTarget, SelectPreset, SetCommandedSpeed};
use simulation::telemetry::Telemetry;
use simulation::terrain_generation::BiomePreset;
use simulation::{SimulationPlugin, TickCounter};

fn main() {
    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
            LogPlugin::default(),
            SimulationPlugin,
        ))
        .add_systems(FixedUpdate, drive_demo)
        .add_systems(Update, log_telemetry)
        .run();
}

/// Scripted mission keyed off the tick counter.
fn drive_demo(
    tick: Res<TickCounter>,
    mut presets: EventWriter<SelectPreset>,
    mut targets: EventWriter<RequestTarget>,
    mut speeds: EventWriter<SetCommandedSpeed>,
    mut camera: EventWriter<SetCameraMode>,
    mut exit: EventWriter<AppExit>,
) {
    match tick.0 {
        15 => {
            targets.send(RequestTarget { x: 6.0, z: 4.0 });
        }
        240 => {
            // Re-route mid-traversal at a higher commanded speed.
            speeds.send(SetCommandedSpeed(4.0));
            targets.send(RequestTarget { x: -7.0, z: -5.0 });
        }
        600 => {
            camera.send(SetCameraMode(CameraMode::Top));
            presets.send(SelectPreset(BiomePreset::Rocky));
        }
        630 => {
            // Down the gravel corridor.
            targets.send(RequestTarget { x: 0.0, z: 8.0 });
        }
        1400 => {
            exit.send(AppExit::Success);
        }
        _ => {}
    }
}

fn log_telemetry(telemetry: Res<Telemetry>) {
    if !telemetry.is_changed() {
        return;
    }
    match serde_json::to_string(&*telemetry) {
        Ok(json) => info!("telemetry {json}"),
        Err(err) => warn!("telemetry serialization failed: {err}"),
    }
}
