//! # Maze Generation
//!
//! Builds the wall/floor topology and the static light field.
//!
//! The generator works in three passes over one stream:
//! 1. A randomized depth-first backtracker on the odd-coordinate lattice,
//!    carving single-width corridors. The result is a spanning tree, so every
//!    carved cell is reachable from the start.
//! 2. Rectangular rooms stamped on top. Each room overlaps at least one
//!    lattice cell, so rooms only ever add connectivity.
//! 3. Point light sources on random floor cells with linear falloff.
//!
//! [`advance_lighting`] is the per-turn flicker pass used by the session.

use crate::{
    generation::utils, Direction, GameResult, GenerationConfig, Generator, Grid, MazeRng,
    Position, Terrain, TurnRules,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// A rectangular room carved into the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Top-left corner of the room
    pub top_left: Position,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(top_left: Position, width: i32, height: i32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width
            && pos.y < self.top_left.y + self.height
    }

    /// All positions covered by the room.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for y in self.top_left.y..self.top_left.y + self.height {
            for x in self.top_left.x..self.top_left.x + self.width {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }
}

/// Maze-and-rooms generator.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    /// Whether to stamp rooms over the maze
    pub with_rooms: bool,
    /// Whether to compute the light field
    pub with_lights: bool,
}

impl MazeGenerator {
    /// Creates the full generator used by sessions.
    pub fn new() -> Self {
        Self {
            with_rooms: true,
            with_lights: true,
        }
    }

    /// Creates a generator that only carves the bare maze.
    pub fn maze_only() -> Self {
        Self {
            with_rooms: false,
            with_lights: false,
        }
    }

    /// Lattice cell closest to the grid center.
    fn start_cell(grid: &Grid) -> Position {
        let snap = |extent: i32| {
            let center = extent / 2;
            if center % 2 == 0 {
                center - 1
            } else {
                center
            }
        };
        Position::new(snap(grid.width()), snap(grid.height()))
    }

    /// Lattice cells live strictly inside the border.
    fn is_lattice_interior(grid: &Grid, pos: Position) -> bool {
        pos.x >= 1 && pos.x <= grid.width() - 2 && pos.y >= 1 && pos.y <= grid.height() - 2
    }

    /// Randomized depth-first backtracker.
    ///
    /// Each visit shuffles the four directions (three draws) and advances
    /// into the first lattice neighbour two steps away that is still wall,
    /// carving it and the cell in between.
    pub fn carve_maze(&self, grid: &mut Grid, rng: &mut MazeRng) {
        let start = Self::start_cell(grid);
        grid.set_terrain(start, Terrain::Floor);

        let mut frontier = vec![start];
        while let Some(&current) = frontier.last() {
            let mut directions = Direction::all();
            rng.shuffle(&mut directions);

            let next = directions.iter().find_map(|direction| {
                let delta = direction.to_delta();
                let dest = Position::new(current.x + delta.x * 2, current.y + delta.y * 2);
                if Self::is_lattice_interior(grid, dest) && !grid.is_floor(dest) {
                    Some((current + delta, dest))
                } else {
                    None
                }
            });

            match next {
                Some((between, dest)) => {
                    grid.set_terrain(between, Terrain::Floor);
                    grid.set_terrain(dest, Terrain::Floor);
                    frontier.push(dest);
                }
                None => {
                    frontier.pop();
                }
            }
        }
    }

    /// Stamps rectangular rooms. Draw order per room: width, height, x, y.
    pub fn carve_rooms(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut MazeRng,
    ) -> Vec<Room> {
        let mut rooms = Vec::new();

        for _ in 0..config.room_count() {
            let width = rng.int_in_range(config.min_room_width, config.max_room_width);
            let height = rng.int_in_range(config.min_room_height, config.max_room_height);

            let max_x = grid.width() - width - 1;
            let max_y = grid.height() - height - 1;
            if max_x < 1 || max_y < 1 {
                continue;
            }

            let x = rng.int_in_range(1, max_x);
            let y = rng.int_in_range(1, max_y);
            let room = Room::new(Position::new(x, y), width, height);

            for pos in room.positions() {
                grid.set_terrain(pos, Terrain::Floor);
            }
            rooms.push(room);
        }

        rooms
    }

    /// Places light sources on random floor cells (with replacement).
    pub fn place_lights(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut MazeRng,
    ) -> Vec<Position> {
        let floors = grid.floor_positions();
        let mut sources = Vec::new();

        for _ in 0..config.light_count() {
            let Some(&source) = rng.choose(&floors) else {
                break;
            };
            illuminate(grid, source, config.light_radius);
            sources.push(source);
        }

        sources
    }
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<Grid> for MazeGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut MazeRng) -> GameResult<Grid> {
        let mut grid = Grid::new(config.width, config.height)?;

        self.carve_maze(&mut grid, rng);

        let rooms = if self.with_rooms {
            self.carve_rooms(&mut grid, config, rng)
        } else {
            Vec::new()
        };

        let lights = if self.with_lights {
            self.place_lights(&mut grid, config, rng)
        } else {
            Vec::new()
        };

        debug!(
            "{}: {}x{} seed {}, {} floor cells, {} rooms, {} lights",
            self.generator_type(),
            grid.width(),
            grid.height(),
            config.seed,
            grid.floor_count(),
            rooms.len(),
            lights.len()
        );

        Ok(grid)
    }

    fn validate(&self, grid: &Grid, _config: &GenerationConfig) -> GameResult<()> {
        utils::validate_grid(grid)
    }

    fn generator_type(&self) -> &'static str {
        "MazeGenerator"
    }
}

/// Brightens floor cells within `radius` of `source`.
///
/// Light falls off linearly to zero at the radius. Sources only brighten:
/// overlapping sources keep the maximum.
pub fn illuminate(grid: &mut Grid, source: Position, radius: f64) {
    let reach = radius.ceil() as i32;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let pos = Position::new(source.x + dx, source.y + dy);
            let distance = source.euclidean_distance(pos);
            if distance > radius {
                continue;
            }

            let level = if radius > 0.0 {
                (1.0 - distance / radius).clamp(0.0, 1.0)
            } else {
                1.0
            };

            if let Some(cell) = grid.get_mut(pos).filter(|cell| cell.is_floor()) {
                cell.light = cell.light.max(level);
            }
        }
    }
}

/// Flicker pass: returns a copy of `grid` with every lit cell nudged.
///
/// Each cell with light above zero takes one draw, in row-major order, and
/// moves by up to `flicker_amplitude` either way, clamped to
/// `[flicker_floor, 1]`. Unlit cells stay dark and take no draw.
pub fn advance_lighting(grid: &Grid, rng: &mut MazeRng, rules: &TurnRules) -> Grid {
    let mut next = grid.clone();

    for cell in next.cells_mut() {
        if cell.light > 0.0 {
            let delta = (rng.next_f64() - 0.5) * 2.0 * rules.flicker_amplitude;
            cell.light = (cell.light + delta).clamp(rules.flicker_floor, 1.0);
        }
    }

    next
}
