//! # Grid Navigation
//!
//! Breadth-first reachability and shortest paths over Floor cells, built on
//! the `pathfinding` crate. Movement is 4-connected, matching how the player
//! and hounds move.

use crate::{Grid, Position};
use pathfinding::prelude::{bfs, bfs_reach};
use std::collections::HashSet;

/// Floor neighbours of `pos` in N, E, S, W order.
pub fn floor_neighbors(grid: &Grid, pos: Position) -> Vec<Position> {
    pos.cardinal_adjacent_positions()
        .into_iter()
        .filter(|&next| grid.is_floor(next))
        .collect()
}

/// Every Floor cell reachable from `start`, including `start` itself.
///
/// Empty when `start` is not a floor cell.
pub fn reachable_floor(grid: &Grid, start: Position) -> HashSet<Position> {
    if !grid.is_floor(start) {
        return HashSet::new();
    }
    bfs_reach(start, |&pos| floor_neighbors(grid, pos)).collect()
}

/// Whether all Floor cells form a single connected region.
///
/// # Examples
///
/// ```
/// use liminal::{all_floor_connected, Grid};
///
/// let joined = Grid::from_ascii(&["#...#"]).unwrap();
/// let split = Grid::from_ascii(&["#.#.#"]).unwrap();
/// assert!(all_floor_connected(&joined));
/// assert!(!all_floor_connected(&split));
/// ```
pub fn all_floor_connected(grid: &Grid) -> bool {
    match grid.floor_positions().first() {
        Some(&start) => reachable_floor(grid, start).len() == grid.floor_count(),
        None => true,
    }
}

/// Shortest Floor path from `from` to `to`, both ends included.
pub fn shortest_path(grid: &Grid, from: Position, to: Position) -> Option<Vec<Position>> {
    if !grid.is_floor(from) || !grid.is_floor(to) {
        return None;
    }
    bfs(&from, |&pos| floor_neighbors(grid, pos), |&pos| pos == to)
}

/// Shortest Floor path from `from` to the nearest cell matching `target`.
pub fn path_to_nearest<F>(grid: &Grid, from: Position, target: F) -> Option<Vec<Position>>
where
    F: Fn(Position) -> bool,
{
    if !grid.is_floor(from) {
        return None;
    }
    bfs(&from, |&pos| floor_neighbors(grid, pos), |&pos| target(pos))
}
