use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{GRID_SIZE, WORLD_EXTENT};
use crate::terrain_class::TerrainClass;

/// Discrete grid indices `(i, j)`, always kept within `[0, GRID_SIZE - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos(pub usize, pub usize);

/// One terrain cell. Cost/traversable are copied out of the class table at
/// generation time; cells never change after the grid is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cell {
    pub class: TerrainClass,
    pub height: f32,
    pub cost: f32,
    pub traversable: bool,
}

impl Cell {
    pub fn of_class(class: TerrainClass, height: f32) -> Self {
        Self {
            class,
            height,
            cost: class.base_cost(),
            traversable: class.traversable(),
        }
    }
}

/// The active terrain: a square grid of immutable cells plus the world-space
/// mapping it was generated with.
///
/// Exactly one grid exists at a time, owned by the ECS as a resource. Preset
/// switches replace it wholesale; nothing mutates cells in place. Systems that
/// need terrain data (pathfinding, height sampling) borrow it via
/// `Res<TerrainGrid>` rather than reaching for shared globals.
#[derive(Resource, Clone, Serialize, Deserialize)]
pub struct TerrainGrid {
    /// Row-major: index = j * size + i.
    pub cells: Vec<Cell>,
    pub size: usize,
    pub extent: f32,
    pub cell_size: f32,
}

impl TerrainGrid {
    pub fn new(size: usize, extent: f32, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self {
            cells,
            size,
            extent,
            cell_size: extent / (size as f32 - 1.0),
        }
    }

    #[inline]
    pub fn index(&self, pos: GridPos) -> usize {
        pos.1 * self.size + pos.0
    }

    #[inline]
    pub fn get(&self, pos: GridPos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    #[inline]
    pub fn in_bounds(&self, i: i32, j: i32) -> bool {
        i >= 0 && j >= 0 && (i as usize) < self.size && (j as usize) < self.size
    }

    /// Cell center in world space; `y` is the cell's stored surface height.
    pub fn grid_to_world(&self, pos: GridPos) -> Vec3 {
        let half = self.extent / 2.0;
        Vec3::new(
            -half + pos.0 as f32 * self.cell_size,
            self.get(pos).height,
            -half + pos.1 as f32 * self.cell_size,
        )
    }

    /// Nearest cell to a world-space point. Total: out-of-range input clamps
    /// to the grid edge instead of erroring.
    pub fn world_to_grid(&self, x: f32, z: f32) -> GridPos {
        let half = self.extent / 2.0;
        let max = (self.size - 1) as f32;
        let i = ((x + half) / self.cell_size).round().clamp(0.0, max);
        let j = ((z + half) / self.cell_size).round().clamp(0.0, max);
        GridPos(i as usize, j as usize)
    }

    /// Surface height at a world-space point, from the nearest cell.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.get(self.world_to_grid(x, z)).height
    }
}

impl Default for TerrainGrid {
    fn default() -> Self {
        let cells = vec![Cell::of_class(TerrainClass::Landscape, 0.0); GRID_SIZE * GRID_SIZE];
        Self::new(GRID_SIZE, WORLD_EXTENT, cells)
    }
}
