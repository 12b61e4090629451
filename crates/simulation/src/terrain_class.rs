use serde::{Deserialize, Serialize};

/// The ten semantic terrain categories the perception stack can emit.
///
/// Costs are additive traversal penalties in [0, 1]; `traversable` gates
/// whether the pathfinder may enter the cell at all. Heights describe the
/// class's base surface elevation and how much per-cell noise modulates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TerrainClass {
    Rock = 0,
    Bush = 1,
    Log = 2,
    Sand = 3,
    Landscape = 4,
    Sky = 5,
    Gravel = 6,
    Water = 7,
    Vegetation = 8,
    Obstacle = 9,
}

pub const NUM_CLASSES: usize = 10;

/// All classes in id order.
pub const ALL_CLASSES: [TerrainClass; NUM_CLASSES] = [
    TerrainClass::Rock,
    TerrainClass::Bush,
    TerrainClass::Log,
    TerrainClass::Sand,
    TerrainClass::Landscape,
    TerrainClass::Sky,
    TerrainClass::Gravel,
    TerrainClass::Water,
    TerrainClass::Vegetation,
    TerrainClass::Obstacle,
];

impl TerrainClass {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            TerrainClass::Rock => "Rock",
            TerrainClass::Bush => "Bush",
            TerrainClass::Log => "Log",
            TerrainClass::Sand => "Sand",
            TerrainClass::Landscape => "Landscape",
            TerrainClass::Sky => "Sky",
            TerrainClass::Gravel => "Gravel",
            TerrainClass::Water => "Water",
            TerrainClass::Vegetation => "Vegetation",
            TerrainClass::Obstacle => "Obstacle",
        }
    }

    /// Hex color used by rendering layers for this class.
    pub fn color(self) -> &'static str {
        match self {
            TerrainClass::Rock => "#8B7355",
            TerrainClass::Bush => "#4A7023",
            TerrainClass::Log => "#8B4513",
            TerrainClass::Sand => "#DEB887",
            TerrainClass::Landscape => "#C4A862",
            TerrainClass::Sky => "#87CEEB",
            TerrainClass::Gravel => "#A9A9A9",
            TerrainClass::Water => "#4169E1",
            TerrainClass::Vegetation => "#228B22",
            TerrainClass::Obstacle => "#DC143C",
        }
    }

    /// Additive traversal penalty in [0, 1].
    pub fn base_cost(self) -> f32 {
        match self {
            TerrainClass::Rock => 0.9,
            TerrainClass::Bush => 0.75,
            TerrainClass::Log => 0.85,
            TerrainClass::Sand => 0.2,
            TerrainClass::Landscape => 0.15,
            TerrainClass::Sky => 0.0,
            TerrainClass::Gravel => 0.35,
            TerrainClass::Water => 0.95,
            TerrainClass::Vegetation => 0.5,
            TerrainClass::Obstacle => 1.0,
        }
    }

    /// Whether the pathfinder may enter cells of this class.
    pub fn traversable(self) -> bool {
        matches!(
            self,
            TerrainClass::Sand
                | TerrainClass::Landscape
                | TerrainClass::Gravel
                | TerrainClass::Vegetation
        )
    }

    pub fn base_height(self) -> f32 {
        match self {
            TerrainClass::Rock => 0.55,
            TerrainClass::Bush => 0.35,
            TerrainClass::Log => 0.22,
            TerrainClass::Sand => 0.08,
            TerrainClass::Landscape => 0.18,
            TerrainClass::Sky => 0.02,
            TerrainClass::Gravel => 0.12,
            TerrainClass::Water => -0.25,
            TerrainClass::Vegetation => 0.28,
            TerrainClass::Obstacle => 0.8,
        }
    }

    pub fn height_variance(self) -> f32 {
        match self {
            TerrainClass::Rock => 0.5,
            TerrainClass::Bush => 0.2,
            TerrainClass::Log => 0.12,
            TerrainClass::Sand => 0.08,
            TerrainClass::Landscape => 0.15,
            TerrainClass::Sky => 0.04,
            TerrainClass::Gravel => 0.06,
            TerrainClass::Water => 0.05,
            TerrainClass::Vegetation => 0.12,
            TerrainClass::Obstacle => 0.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense_and_ordered() {
        for (i, class) in ALL_CLASSES.iter().enumerate() {
            assert_eq!(class.id() as usize, i);
        }
    }

    #[test]
    fn test_costs_within_unit_range() {
        for class in ALL_CLASSES {
            let cost = class.base_cost();
            assert!((0.0..=1.0).contains(&cost), "{} cost {}", class.name(), cost);
        }
    }

    #[test]
    fn test_traversable_classes_are_cheap() {
        // Every traversable class costs at most 0.5; every blocker costs more,
        // except Sky which is a perception artifact that never blocks by cost.
        for class in ALL_CLASSES {
            if class.traversable() {
                assert!(class.base_cost() <= 0.5, "{}", class.name());
            }
        }
        assert!(!TerrainClass::Sky.traversable());
        assert!(!TerrainClass::Water.traversable());
        assert!(!TerrainClass::Obstacle.traversable());
    }

    #[test]
    fn test_colors_are_hex() {
        for class in ALL_CLASSES {
            let c = class.color();
            assert!(c.starts_with('#') && c.len() == 7, "{}", c);
        }
    }
}
