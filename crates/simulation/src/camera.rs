//! Camera collaborator state consumed by the rendering layer.
//!
//! The engine does no camera math beyond holding this state: the renderer
//! derives its view from the published rover position/heading plus the mode
//! and orbit below. Orbit state is an owned resource, written whole by input
//! handlers, so a tick reads either the old or the fully-updated triple and
//! never a partial write.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

const MIN_PITCH: f32 = 5.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 80.0 * std::f32::consts::PI / 180.0;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 40.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Chase view behind the rover.
    #[default]
    Follow,
    /// Orthographic-style overhead view.
    Top,
    /// Free orbit around the rover, driven by pointer/wheel input.
    Pivot,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SetCameraMode(pub CameraMode);

/// Orbit parameters for Pivot mode.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Horizontal rotation in radians.
    pub yaw: f32,
    /// Elevation angle in radians, clamped between MIN_PITCH and MAX_PITCH.
    pub pitch: f32,
    /// Distance from the rover.
    pub distance: f32,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 45.0_f32.to_radians(),
            distance: 14.0,
        }
    }
}

impl OrbitState {
    /// Replace all three fields in one assignment, clamping to sane ranges.
    pub fn set(&mut self, yaw: f32, pitch: f32, distance: f32) {
        *self = Self {
            yaw,
            pitch: pitch.clamp(MIN_PITCH, MAX_PITCH),
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
        };
    }
}

/// Orbit update from pointer/wheel handlers; applied as one struct write.
#[derive(Event, Debug, Clone, Copy)]
pub struct SetOrbit {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

pub fn apply_camera_input(
    mut mode_events: EventReader<SetCameraMode>,
    mut orbit_events: EventReader<SetOrbit>,
    mut mode: ResMut<CameraMode>,
    mut orbit: ResMut<OrbitState>,
) {
    if let Some(&SetCameraMode(new_mode)) = mode_events.read().last() {
        *mode = new_mode;
    }
    if let Some(&SetOrbit {
        yaw,
        pitch,
        distance,
    }) = orbit_events.read().last()
    {
        orbit.set(yaw, pitch, distance);
    }
}
