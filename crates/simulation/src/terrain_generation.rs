//! Procedural terrain generation: biome presets over banded sine/hash fields.
//!
//! Each preset combines a low-frequency "density wave" (three sine octaves
//! with seeded phase offsets) and a per-cell hash field, then classifies cells
//! by thresholding both into bands. Band order matters: later bands overwrite
//! earlier ones, which is what carves corridors and scatters obstacles.
//!
//! Every draw is a deterministic function of `(preset, seed)`: the hash field
//! depends only on `(i, j, seed)`, the wave phases come from a `ChaCha8Rng`
//! seeded by `seed`, and the height micro-variation is an OpenSimplex2 field
//! with the same seed. Same preset and seed always reproduce the same grid.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{GRID_SIZE, WORLD_EXTENT};
use crate::grid::{Cell, TerrainGrid};
use crate::terrain_class::TerrainClass;

/// Named terrain-generation configurations, each producing a characteristic
/// zone layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BiomePreset {
    /// Open sand with rock clusters, scattered bush/log, rare obstacles.
    Desert,
    /// Dense rock with a gravel/sand corridor carved down the middle.
    Rocky,
    /// Quadrant zones: vegetation, rocks, a circular water pool, log median.
    #[default]
    Mixed,
}

impl BiomePreset {
    pub fn name(self) -> &'static str {
        match self {
            BiomePreset::Desert => "desert",
            BiomePreset::Rocky => "rocky",
            BiomePreset::Mixed => "mixed",
        }
    }
}

// ---------------------------------------------------------------------------
// Noise primitives
// ---------------------------------------------------------------------------

/// Deterministic pseudo-random value in [0, 1) from grid coordinates.
fn hash_noise(a: f64, b: f64, seed: u64) -> f32 {
    let s = seed as f64;
    let r = (a * (127.1 + s * 0.07) + b * (311.7 + s * 0.13)).sin() * 43758.5453;
    (r - r.floor()) as f32
}

/// Sum of sine octaves with seeded phase offsets: the continuous "density
/// wave" each preset thresholds into class bands.
struct DensityWave {
    octaves: [(f32, f32, f32); 3],
    phases: [(f32, f32); 3],
}

impl DensityWave {
    fn new(octaves: [(f32, f32, f32); 3], rng: &mut ChaCha8Rng) -> Self {
        let mut phases = [(0.0, 0.0); 3];
        for phase in &mut phases {
            *phase = (
                rng.gen_range(0.0..std::f32::consts::TAU),
                rng.gen_range(0.0..std::f32::consts::TAU),
            );
        }
        Self { octaves, phases }
    }

    fn sample(&self, nx: f32, nz: f32) -> f32 {
        let mut acc = 0.0;
        for ((fx, fz, amp), (px, pz)) in self.octaves.iter().zip(self.phases.iter()) {
            acc += amp
                * (nx * std::f32::consts::PI * fx + px).sin()
                * (nz * std::f32::consts::PI * fz + pz).cos();
        }
        acc
    }
}

// ---------------------------------------------------------------------------
// Per-preset classification
// ---------------------------------------------------------------------------

fn classify_desert(wave: f32, r: f32) -> TerrainClass {
    let mut class = TerrainClass::Sand;
    if wave > 0.45 {
        class = TerrainClass::Rock;
    }
    if wave > 0.30 && r > 0.78 {
        class = TerrainClass::Bush;
    }
    if wave > 0.22 && r > 0.90 {
        class = TerrainClass::Log;
    }
    if wave < 0.0 {
        class = TerrainClass::Landscape;
    }
    if r > 0.96 {
        class = TerrainClass::Obstacle;
    }
    class
}

fn classify_rocky(nx: f32, wave: f32, r: f32) -> TerrainClass {
    let dist = (nx - 0.5).abs();
    let mut class = TerrainClass::Rock;
    if wave > 0.38 {
        class = TerrainClass::Obstacle;
    }
    if wave < -0.2 {
        class = TerrainClass::Vegetation;
    }
    if dist < 0.12 {
        class = TerrainClass::Gravel;
    }
    if dist < 0.07 && r < 0.55 {
        class = TerrainClass::Sand;
    }
    if dist < 0.12 && r > 0.86 {
        class = TerrainClass::Log;
    }
    if dist > 0.35 && r > 0.88 {
        class = TerrainClass::Bush;
    }
    class
}

fn classify_mixed(nx: f32, nz: f32, wave: f32, r: f32) -> TerrainClass {
    let mut class = TerrainClass::Landscape;

    // Water pool with a gravel shore, lower-right.
    let dist_water = (nx - 0.82).hypot(nz - 0.82);
    if dist_water < 0.18 {
        class = TerrainClass::Water;
    } else if dist_water < 0.27 {
        class = TerrainClass::Gravel;
    }

    // Rock zone, upper-right quadrant.
    if nx > 0.65 && nz < 0.35 && wave > 0.20 {
        class = TerrainClass::Rock;
    }
    if nx > 0.65 && nz < 0.35 && wave > 0.35 {
        class = TerrainClass::Obstacle;
    }

    // Vegetation/bush zone, upper-left quadrant.
    if nx < 0.35 && nz < 0.35 {
        class = TerrainClass::Vegetation;
        if r > 0.70 {
            class = TerrainClass::Bush;
        }
    }

    // Logs scattered along the diagonal.
    if (nx - nz).abs() < 0.04 && r > 0.80 {
        class = TerrainClass::Log;
    }

    // Clear patches near the center.
    if (nx - 0.5).abs() < 0.1 && (nz - 0.5).abs() < 0.1 && r > 0.65 {
        class = TerrainClass::Sky;
    }

    // Obstacle speckle.
    if r > 0.97 {
        class = TerrainClass::Obstacle;
    }

    // Gravel cross paths and sand strips, only over open landscape.
    if ((nx - 0.5).abs() < 0.06 || (nz - 0.5).abs() < 0.06) && class == TerrainClass::Landscape {
        class = TerrainClass::Gravel;
    }
    if wave > 0.15 && class == TerrainClass::Landscape && r > 0.6 {
        class = TerrainClass::Sand;
    }

    class
}

// ---------------------------------------------------------------------------
// Generation entry point
// ---------------------------------------------------------------------------

/// Generate a fresh grid for `preset`. Pure and total: always succeeds.
pub fn generate(preset: BiomePreset, seed: u64) -> TerrainGrid {
    let size = GRID_SIZE;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let octaves = match preset {
        BiomePreset::Desert => [(3.0, 2.5, 0.4), (9.0, 7.0, 0.2), (16.0, 12.0, 0.08)],
        BiomePreset::Rocky => [(5.0, 4.0, 0.55), (10.0, 8.0, 0.25), (20.0, 15.0, 0.1)],
        BiomePreset::Mixed => [(4.0, 3.0, 0.35), (10.0, 8.0, 0.15), (18.0, 14.0, 0.06)],
    };
    let wave = DensityWave::new(octaves, &mut rng);

    let mut height_noise = FastNoiseLite::with_seed(seed as i32);
    height_noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    height_noise.set_frequency(Some(0.09));

    let mut cells = Vec::with_capacity(size * size);
    let norm = (size - 1) as f32;
    for j in 0..size {
        for i in 0..size {
            let nx = i as f32 / norm;
            let nz = j as f32 / norm;
            let w = wave.sample(nx, nz);
            let s = seed as f64;
            let (fi, fj) = (i as f64, j as f64);

            let class = match preset {
                BiomePreset::Desert => {
                    classify_desert(w, hash_noise(fi + s, fj + 2.0 * s, seed))
                }
                BiomePreset::Rocky => {
                    classify_rocky(nx, w, hash_noise(2.0 * fi + s, 3.0 * fj + s, seed))
                }
                BiomePreset::Mixed => {
                    classify_mixed(nx, nz, w, hash_noise(fi + 3.0 * s, fj + s, seed))
                }
            };

            // Height micro-variation: OpenSimplex2 in [-1, 1] mapped to [0, 1].
            let n01 = (height_noise.get_noise_2d(i as f32, j as f32) + 1.0) * 0.5;
            let height = class.base_height() + n01 * class.height_variance();
            cells.push(Cell::of_class(class, height));
        }
    }

    info!(
        "generated {} terrain: {}x{} cells, seed {}",
        preset.name(),
        size,
        size,
        seed
    );
    TerrainGrid::new(size, WORLD_EXTENT, cells)
}
