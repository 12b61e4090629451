/// Grid resolution: the terrain is a GRID_SIZE x GRID_SIZE square of cells.
pub const GRID_SIZE: usize = 48;

/// World-space extent of the terrain along each horizontal axis. The grid is
/// centered on the origin, spanning [-WORLD_EXTENT/2, WORLD_EXTENT/2].
pub const WORLD_EXTENT: f32 = 20.0;

/// World-space distance between adjacent cell centers. The first and last
/// cell centers sit exactly on the terrain edges.
pub const CELL_SIZE: f32 = WORLD_EXTENT / (GRID_SIZE as f32 - 1.0);

/// Default seed for terrain generation when none is supplied.
pub const DEFAULT_SEED: u64 = 42;

/// Additive floor on per-step traversal cost so that zero-cost cells still
/// carry a nonzero move cost in the pathfinder.
pub const COST_EPSILON: f32 = 0.05;

/// A waypoint counts as reached when the planar distance to it drops below
/// this fraction of one cell width.
pub const ARRIVAL_FRACTION: f32 = 0.25;

/// Rover speed command bounds, world units per second. UI sliders are clamped
/// to this range at the boundary, not inside the tick.
pub const SPEED_MIN: f32 = 0.5;
pub const SPEED_MAX: f32 = 8.0;
pub const SPEED_DEFAULT: f32 = 2.0;

/// Fixed angular rate for shortest-arc heading interpolation, radians/second.
pub const TURN_RATE: f32 = 4.0;

/// Deceleration applied once the path is exhausted, world units per second^2.
pub const IDLE_DECEL: f32 = 6.0;

/// Simulation tick rate in Hz (FixedUpdate schedule).
pub const TICK_HZ: f64 = 30.0;

/// Duration of one tick in seconds. Systems integrate against this constant
/// rather than wall-clock deltas, so a manually driven schedule (tests, the
/// headless demo) behaves identically to a live one.
pub const TICK_DT: f32 = 1.0 / TICK_HZ as f32;

/// Telemetry snapshot refresh interval, in ticks. The snapshot is rebuilt at
/// this coarser cadence so the rendering layer reads a cheap, stable struct.
pub const TELEMETRY_INTERVAL: u32 = 6;
