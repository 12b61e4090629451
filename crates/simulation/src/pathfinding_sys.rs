//! Cost-weighted A* over the terrain grid.
//!
//! 8-connected search where entering a cell costs
//! `(sqrt(2) | 1) * (COST_EPSILON + cell.cost)`. The open set is selected by
//! linear scan (the grid is bounded at 48x48 by configuration; a binary heap
//! buys nothing at this size), with ties broken by insertion order.
//!
//! Two deliberate quirks, kept from the observed rover behavior:
//! - If the goal is unreachable the search returns the degenerate path
//!   `[goal]`. Callers treat that as "drive straight at the goal", not as a
//!   failure.
//! - Diagonal steps do not check the two orthogonal cells sharing the corner,
//!   so a route can clip a blocked corner.

use std::f32::consts::SQRT_2;

use crate::config::COST_EPSILON;
use crate::grid::{GridPos, TerrainGrid};

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

struct Node {
    pos: GridPos,
    g: f32,
    f: f32,
    parent: Option<usize>,
}

/// Cost-optimal route from `start` to `goal`, both inclusive. `start` and
/// `goal` are assumed in-bounds (callers clamp through the mapper).
pub fn find_path(grid: &TerrainGrid, start: GridPos, goal: GridPos) -> Vec<GridPos> {
    if start == goal {
        return vec![start];
    }

    let n = grid.size;
    let heuristic = |pos: GridPos| -> f32 {
        let dx = pos.0 as f32 - goal.0 as f32;
        let dz = pos.1 as f32 - goal.1 as f32;
        // Scaled by the cost floor so the estimate never exceeds real cost.
        (dx * dx + dz * dz).sqrt() * COST_EPSILON
    };

    let mut nodes = vec![Node {
        pos: start,
        g: 0.0,
        f: heuristic(start),
        parent: None,
    }];
    let mut open: Vec<usize> = vec![0];
    let mut best_g = vec![f32::INFINITY; n * n];
    let mut closed = vec![false; n * n];
    best_g[grid.index(start)] = 0.0;

    while !open.is_empty() {
        // Lowest f wins; strict < keeps the earliest-inserted node on ties.
        let mut best = 0;
        for k in 1..open.len() {
            if nodes[open[k]].f < nodes[open[best]].f {
                best = k;
            }
        }
        let current = open.remove(best);
        let current_pos = nodes[current].pos;
        let current_g = nodes[current].g;

        if current_pos == goal {
            return reconstruct(&nodes, current);
        }

        let current_idx = grid.index(current_pos);
        if closed[current_idx] {
            continue;
        }
        closed[current_idx] = true;

        for (di, dj) in NEIGHBOR_OFFSETS {
            let ni = current_pos.0 as i32 + di;
            let nj = current_pos.1 as i32 + dj;
            if !grid.in_bounds(ni, nj) {
                continue;
            }
            let next = GridPos(ni as usize, nj as usize);
            let next_idx = grid.index(next);
            let cell = grid.get(next);
            if !cell.traversable || closed[next_idx] {
                continue;
            }

            let step = if di != 0 && dj != 0 { SQRT_2 } else { 1.0 };
            let g = current_g + step * (COST_EPSILON + cell.cost);
            if g < best_g[next_idx] {
                best_g[next_idx] = g;
                nodes.push(Node {
                    pos: next,
                    g,
                    f: g + heuristic(next),
                    parent: Some(current),
                });
                open.push(nodes.len() - 1);
            }
        }
    }

    // Open set exhausted: goal blocked or unreachable. Degrade to a direct
    // single-waypoint path at the goal rather than failing.
    vec![goal]
}

fn reconstruct(nodes: &[Node], mut current: usize) -> Vec<GridPos> {
    let mut path = vec![nodes[current].pos];
    while let Some(parent) = nodes[current].parent {
        current = parent;
        path.push(nodes[current].pos);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WORLD_EXTENT;
    use crate::grid::Cell;
    use crate::terrain_class::TerrainClass;

    /// Total weighted cost of a path as the search accounts it.
    fn path_cost(grid: &TerrainGrid, path: &[GridPos]) -> f32 {
        path.windows(2)
            .map(|w| {
                let di = w[1].0 as i32 - w[0].0 as i32;
                let dj = w[1].1 as i32 - w[0].1 as i32;
                let step = if di != 0 && dj != 0 { SQRT_2 } else { 1.0 };
                step * (COST_EPSILON + grid.get(w[1]).cost)
            })
            .sum()
    }

    /// Small all-traversable grid with per-cell costs given row-major.
    fn costed_grid(size: usize, costs: &[f32]) -> TerrainGrid {
        let cells = costs
            .iter()
            .map(|&cost| Cell {
                class: TerrainClass::Sand,
                height: 0.0,
                cost,
                traversable: true,
            })
            .collect();
        TerrainGrid::new(size, WORLD_EXTENT, cells)
    }

    fn uniform_grid(size: usize, cost: f32) -> TerrainGrid {
        costed_grid(size, &vec![cost; size * size])
    }

    fn block(grid: &mut TerrainGrid, i: usize, j: usize) {
        let idx = grid.index(GridPos(i, j));
        grid.cells[idx] = Cell::of_class(TerrainClass::Obstacle, 0.0);
    }

    /// Reference optimum from the `pathfinding` crate, with costs scaled to
    /// integers for its Ord requirement.
    fn oracle_cost(grid: &TerrainGrid, start: GridPos, goal: GridPos) -> f32 {
        let scale = 1_000_000.0;
        let result = pathfinding::prelude::astar(
            &start,
            |&pos| {
                let mut succ = Vec::new();
                for (di, dj) in NEIGHBOR_OFFSETS {
                    let ni = pos.0 as i32 + di;
                    let nj = pos.1 as i32 + dj;
                    if !grid.in_bounds(ni, nj) {
                        continue;
                    }
                    let next = GridPos(ni as usize, nj as usize);
                    if !grid.get(next).traversable {
                        continue;
                    }
                    let step = if di != 0 && dj != 0 { SQRT_2 } else { 1.0 };
                    let cost = step * (COST_EPSILON + grid.get(next).cost);
                    succ.push((next, (cost * scale).round() as u64));
                }
                succ
            },
            |_| 0,
            |&pos| pos == goal,
        );
        result.expect("oracle found no path").1 as f32 / scale
    }

    #[test]
    fn test_scenario_uniform_diagonal() {
        let cost = 0.2;
        let grid = uniform_grid(5, cost);
        let path = find_path(&grid, GridPos(0, 0), GridPos(4, 4));
        assert_eq!(path.len(), 5, "pure diagonal run: {path:?}");
        for (k, pos) in path.iter().enumerate() {
            assert_eq!(*pos, GridPos(k, k));
        }
        let expected = 4.0 * SQRT_2 * (COST_EPSILON + cost);
        assert!((path_cost(&grid, &path) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_optimal_against_oracle() {
        // Deterministic pseudo-random cost field on a 5x5 grid.
        let costs: Vec<f32> = (0..25)
            .map(|k| ((k * 37 + 11) % 97) as f32 / 97.0)
            .collect();
        let grid = costed_grid(5, &costs);
        for (start, goal) in [
            (GridPos(0, 0), GridPos(4, 4)),
            (GridPos(4, 0), GridPos(0, 4)),
            (GridPos(0, 2), GridPos(4, 2)),
            (GridPos(2, 4), GridPos(2, 0)),
        ] {
            let path = find_path(&grid, start, goal);
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
            let expected = oracle_cost(&grid, start, goal);
            assert!(
                (path_cost(&grid, &path) - expected).abs() < 1e-3,
                "suboptimal path {start:?} -> {goal:?}: {} vs {}",
                path_cost(&grid, &path),
                expected
            );
        }
    }

    #[test]
    fn test_routes_around_wall() {
        let mut grid = uniform_grid(7, 0.1);
        // Vertical wall with one gap at j = 6.
        for j in 0..6 {
            block(&mut grid, 3, j);
        }
        let path = find_path(&grid, GridPos(0, 0), GridPos(6, 0));
        assert!(path.len() > 7, "must detour through the gap: {path:?}");
        assert!(path.iter().all(|&p| grid.get(p).traversable));
    }

    #[test]
    fn test_unreachable_goal_falls_back_to_goal_only() {
        let mut grid = uniform_grid(7, 0.1);
        let goal = GridPos(5, 5);
        for (di, dj) in NEIGHBOR_OFFSETS {
            block(
                &mut grid,
                (goal.0 as i32 + di) as usize,
                (goal.1 as i32 + dj) as usize,
            );
        }
        assert_eq!(find_path(&grid, GridPos(0, 0), goal), vec![goal]);
    }

    #[test]
    fn test_blocked_goal_cell_falls_back() {
        let mut grid = uniform_grid(5, 0.1);
        block(&mut grid, 2, 2);
        assert_eq!(
            find_path(&grid, GridPos(0, 0), GridPos(2, 2)),
            vec![GridPos(2, 2)]
        );
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = uniform_grid(5, 0.1);
        assert_eq!(
            find_path(&grid, GridPos(3, 3), GridPos(3, 3)),
            vec![GridPos(3, 3)]
        );
    }

    #[test]
    fn test_diagonal_corner_cutting_is_permitted() {
        // Known quirk: both orthogonal cells flanking the corner are blocked,
        // yet the diagonal step through it is still legal.
        let mut grid = uniform_grid(3, 0.1);
        block(&mut grid, 1, 0);
        block(&mut grid, 0, 1);
        let path = find_path(&grid, GridPos(0, 0), GridPos(2, 2));
        assert_eq!(path[1], GridPos(1, 1), "expected the corner cut: {path:?}");
    }

    #[test]
    fn test_cheap_corridor_beats_short_expensive_route() {
        // Row j=0 is expensive; row j=2 is nearly free. The optimal route
        // dips through the cheap corridor even though it is longer.
        let mut costs = vec![0.9; 25];
        for i in 0..5 {
            costs[2 * 5 + i] = 0.0;
        }
        let grid = costed_grid(5, &costs);
        let path = find_path(&grid, GridPos(0, 0), GridPos(4, 0));
        assert!(
            path.iter().any(|&p| p.1 == 2),
            "expected detour through cheap row: {path:?}"
        );
        let expected = oracle_cost(&grid, GridPos(0, 0), GridPos(4, 0));
        assert!((path_cost(&grid, &path) - expected).abs() < 1e-3);
    }
}
