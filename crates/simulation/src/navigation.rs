//! Navigation controller: owns the live rover state and advances it each tick.
//!
//! Two controller states, implicit in the data: **Following** while the
//! waypoint cursor is inside a non-trivial path, **Idle** otherwise. A target
//! request at any time replaces the path atomically between ticks; the rover's
//! position and heading are never touched by retargeting, so motion resumes
//! smoothly from wherever it currently is.

use bevy::prelude::*;

use crate::config::{
    ARRIVAL_FRACTION, DEFAULT_SEED, IDLE_DECEL, SPEED_DEFAULT, SPEED_MAX, SPEED_MIN, TICK_DT,
    TURN_RATE,
};
use crate::grid::{GridPos, TerrainGrid};
use crate::pathfinding_sys::find_path;
use crate::terrain_generation::{generate, BiomePreset};

// ---------------------------------------------------------------------------
// Events from the UI/rendering layer
// ---------------------------------------------------------------------------

/// Replace the grid with a freshly generated preset; clears target and path.
#[derive(Event, Debug, Clone, Copy)]
pub struct SelectPreset(pub BiomePreset);

/// Drive to the cell nearest this world-space point.
#[derive(Event, Debug, Clone, Copy)]
pub struct RequestTarget {
    pub x: f32,
    pub z: f32,
}

/// Commanded speed in world units/second; clamped to [SPEED_MIN, SPEED_MAX]
/// at this boundary, not inside the tick.
#[derive(Event, Debug, Clone, Copy)]
pub struct SetCommandedSpeed(pub f32);

// ---------------------------------------------------------------------------
// Controller state
// ---------------------------------------------------------------------------

/// The rover's live simulation state. Created once; `path`/`waypoint`/`target`
/// reset on retargeting or grid replacement, while `position`/`heading`
/// persist continuously (no teleporting).
#[derive(Resource, Debug, Clone)]
pub struct NavState {
    pub position: Vec3,
    /// Radians, wrapped to (-PI, PI]. 0 faces +Z, increasing toward +X.
    pub heading: f32,
    pub grid_cell: GridPos,
    pub path: Vec<GridPos>,
    /// Monotonically non-decreasing within one path; never exceeds path.len().
    pub waypoint: usize,
    pub target: Option<GridPos>,
    pub commanded_speed: f32,
    pub current_speed: f32,
}

impl NavState {
    pub fn spawned_at(position: Vec3, grid_cell: GridPos) -> Self {
        Self {
            position,
            heading: 0.0,
            grid_cell,
            path: Vec::new(),
            waypoint: 0,
            target: None,
            commanded_speed: SPEED_DEFAULT,
            current_speed: 0.0,
        }
    }

    pub fn is_following(&self) -> bool {
        self.waypoint < self.path.len()
    }

    fn clear_route(&mut self) {
        self.path.clear();
        self.waypoint = 0;
        self.target = None;
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::spawned_at(Vec3::ZERO, GridPos(0, 0))
    }
}

// ---------------------------------------------------------------------------
// Angle helpers
// ---------------------------------------------------------------------------

/// Wrap an angle to (-PI, PI].
pub fn wrap_angle(a: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut r = (a + PI) % TAU;
    if r <= 0.0 {
        r += TAU;
    }
    r - PI
}

/// Rotate `current` toward `target` along the shorter arc, by at most
/// `max_step` radians. Never snaps past the target.
pub fn rotate_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = wrap_angle(target - current);
    if delta.abs() <= max_step {
        wrap_angle(target)
    } else {
        wrap_angle(current + max_step.copysign(delta))
    }
}

// ---------------------------------------------------------------------------
// Systems (FixedUpdate, chained in SimulationPlugin)
// ---------------------------------------------------------------------------

/// Drain preset selections: regenerate the grid and reset dependent route
/// state together, before any tick reads them. The rover keeps its (x, z) and
/// snaps to the new surface, since the new height field may differ
/// arbitrarily from the old one at the same point.
pub fn apply_preset_switches(
    mut events: EventReader<SelectPreset>,
    mut grid: ResMut<TerrainGrid>,
    mut nav: ResMut<NavState>,
) {
    let Some(&SelectPreset(preset)) = events.read().last() else {
        return;
    };
    *grid = generate(preset, DEFAULT_SEED);
    nav.clear_route();
    nav.grid_cell = grid.world_to_grid(nav.position.x, nav.position.z);
    nav.position.y = grid.get(nav.grid_cell).height;
    info!("preset switched to {}, route cleared", preset.name());
}

pub fn apply_speed_commands(
    mut events: EventReader<SetCommandedSpeed>,
    mut nav: ResMut<NavState>,
) {
    if let Some(&SetCommandedSpeed(speed)) = events.read().last() {
        nav.commanded_speed = speed.clamp(SPEED_MIN, SPEED_MAX);
    }
}

/// Drain target requests: the last request wins and replaces any active route
/// wholesale. The fresh path starts from the rover's current interpolated
/// cell, never from where an earlier route began.
pub fn apply_target_requests(
    mut events: EventReader<RequestTarget>,
    grid: Res<TerrainGrid>,
    mut nav: ResMut<NavState>,
) {
    let Some(&RequestTarget { x, z }) = events.read().last() else {
        return;
    };
    let start = grid.world_to_grid(nav.position.x, nav.position.z);
    let goal = grid.world_to_grid(x, z);
    nav.grid_cell = start;
    nav.path = find_path(&grid, start, goal);
    nav.waypoint = 0;
    nav.target = Some(goal);
    debug!(
        "route {:?} -> {:?}: {} waypoints",
        start,
        goal,
        nav.path.len()
    );
}

/// One Following-state tick: advance the waypoint cursor on arrival, otherwise
/// move toward the current waypoint, glued to the surface, turning at a fixed
/// angular rate.
pub fn advance_navigation(grid: Res<TerrainGrid>, mut nav: ResMut<NavState>) {
    if !nav.is_following() {
        // Idle: bleed off speed, hold position and heading.
        nav.current_speed = (nav.current_speed - IDLE_DECEL * TICK_DT).max(0.0);
        return;
    }

    let waypoint = nav.path[nav.waypoint];
    let wp_world = grid.grid_to_world(waypoint);
    let dx = wp_world.x - nav.position.x;
    let dz = wp_world.z - nav.position.z;
    let planar_dist = (dx * dx + dz * dz).sqrt();

    if planar_dist < ARRIVAL_FRACTION * grid.cell_size {
        nav.grid_cell = waypoint;
        nav.waypoint += 1;
        if !nav.is_following() {
            nav.target = None;
        }
        return;
    }

    nav.current_speed = nav.commanded_speed;
    let step = (nav.current_speed * TICK_DT).min(planar_dist);
    let (nx, nz) = (dx / planar_dist, dz / planar_dist);
    nav.position.x += nx * step;
    nav.position.z += nz * step;
    nav.position.y = grid.height_at(nav.position.x, nav.position.z);
    nav.heading = rotate_toward(nav.heading, nx.atan2(nz), TURN_RATE * TICK_DT);
}
