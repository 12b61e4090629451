//! Terrain simulation and navigation engine for the rover demo.
//!
//! A procedurally generated cost-weighted grid, an A* pathfinder over it, and
//! a tick-driven navigation controller that moves the rover smoothly along a
//! re-routable path while publishing telemetry. Rendering, HUD, and the
//! segmentation backend are external collaborators: they feed events in and
//! read resources out, nothing more.

use bevy::prelude::*;

pub mod camera;
pub mod config;
pub mod grid;
pub mod navigation;
pub mod pathfinding_sys;
pub mod telemetry;
pub mod terrain_class;
pub mod terrain_generation;
pub mod world_init;

use camera::{CameraMode, OrbitState, SetCameraMode, SetOrbit};
use config::TICK_HZ;
use grid::TerrainGrid;
use navigation::{NavState, RequestTarget, SelectPreset, SetCommandedSpeed};
use telemetry::{Telemetry, TelemetryTimer};

/// Global tick counter incremented each FixedUpdate.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickCounter>()
            .init_resource::<TerrainGrid>()
            .init_resource::<NavState>()
            .init_resource::<Telemetry>()
            .init_resource::<TelemetryTimer>()
            .init_resource::<CameraMode>()
            .init_resource::<OrbitState>();

        app.add_event::<SelectPreset>()
            .add_event::<RequestTarget>()
            .add_event::<SetCommandedSpeed>()
            .add_event::<SetCameraMode>()
            .add_event::<SetOrbit>();

        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ));
        app.add_systems(Startup, world_init::init_world);

        // One tick: inputs are applied before movement, so the movement system
        // only ever observes a fully consistent grid/route pair, and telemetry
        // snapshots the post-movement state.
        app.add_systems(
            FixedUpdate,
            (
                tick_counter,
                navigation::apply_preset_switches,
                navigation::apply_speed_commands,
                navigation::apply_target_requests,
                camera::apply_camera_input,
                navigation::advance_navigation,
                telemetry::publish_telemetry,
            )
                .chain(),
        );
    }
}
