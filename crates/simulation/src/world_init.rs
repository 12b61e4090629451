use bevy::prelude::*;

use crate::config::{DEFAULT_SEED, GRID_SIZE};
use crate::grid::GridPos;
use crate::navigation::NavState;
use crate::terrain_generation::{generate, BiomePreset};

/// Build the initial world: default preset terrain with the rover parked on
/// the surface at the grid center.
pub fn init_world(mut commands: Commands) {
    let grid = generate(BiomePreset::default(), DEFAULT_SEED);
    let center = GridPos(GRID_SIZE / 2, GRID_SIZE / 2);
    let position = grid.grid_to_world(center);
    commands.insert_resource(NavState::spawned_at(position, center));
    commands.insert_resource(grid);
}
