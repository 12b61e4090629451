//! Throttled, human-readable telemetry for the HUD/rendering layer.
//!
//! The snapshot is rebuilt every `TELEMETRY_INTERVAL` ticks rather than every
//! tick, so consumers read a small pre-formatted struct at a bounded cost
//! instead of formatting simulation state themselves each frame.

use bevy::prelude::*;
use serde::Serialize;

use crate::config::TELEMETRY_INTERVAL;
use crate::grid::TerrainGrid;
use crate::navigation::NavState;

/// Pre-formatted state summary. Strings are rendered once per refresh.
#[derive(Resource, Debug, Clone, Default, Serialize)]
pub struct Telemetry {
    /// World X, one decimal.
    pub x: String,
    /// World Z, one decimal.
    pub z: String,
    /// Heading in whole degrees.
    pub heading_deg: String,
    /// Current speed, one decimal.
    pub speed: String,
    /// Semantic name of the terrain class under the rover.
    pub terrain_class_name: String,
    /// "waypoint/path-length" cursor readout.
    pub waypoint_progress: String,
}

/// Tick counter gating the snapshot refresh cadence.
#[derive(Resource, Default)]
pub struct TelemetryTimer {
    counter: u32,
}

impl TelemetryTimer {
    pub fn tick(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }

    pub fn should_run(&self) -> bool {
        self.counter.is_multiple_of(TELEMETRY_INTERVAL)
    }
}

pub fn publish_telemetry(
    mut timer: ResMut<TelemetryTimer>,
    grid: Res<TerrainGrid>,
    nav: Res<NavState>,
    mut telemetry: ResMut<Telemetry>,
) {
    timer.tick();
    if !timer.should_run() {
        return;
    }
    // Small negative headings round to -0.0; adding 0.0 drops the sign so the
    // readout never shows "-0".
    let heading_deg = nav.heading.to_degrees().round() + 0.0;
    *telemetry = Telemetry {
        x: format!("{:.1}", nav.position.x),
        z: format!("{:.1}", nav.position.z),
        heading_deg: format!("{:.0}", heading_deg),
        speed: format!("{:.1}", nav.current_speed),
        terrain_class_name: grid.get(nav.grid_cell).class.name().to_string(),
        waypoint_progress: format!("{}/{}", nav.waypoint, nav.path.len()),
    };
}
