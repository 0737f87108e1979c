//! # World Module
//!
//! The tile grid a session is played on.
//!
//! A [`Grid`] is a fixed-size W×H array of [`Cell`]s. Its shape never changes
//! after generation; only cell attributes (light, seen, item) are mutated by
//! the turn engine.

use crate::{GameError, GameResult, Position};
use serde::{Deserialize, Serialize};

/// Terrain classification of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Wall,
    Floor,
}

impl Terrain {
    /// Whether entities can stand on this terrain.
    pub fn is_passable(self) -> bool {
        matches!(self, Terrain::Floor)
    }
}

/// Collectible items that can lie on a floor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    /// Restores sanity when drunk.
    AlmondWater,
}

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,
    /// Light level in `[0, 1]`
    pub light: f64,
    /// Whether the player has stepped here
    pub seen: bool,
    pub item: Option<Item>,
    pub is_goal: bool,
}

impl Cell {
    /// An unlit, unseen wall.
    pub fn wall() -> Self {
        Self {
            terrain: Terrain::Wall,
            light: 0.0,
            seen: false,
            item: None,
            is_goal: false,
        }
    }

    /// An unlit, unseen, empty floor cell.
    pub fn floor() -> Self {
        Self {
            terrain: Terrain::Floor,
            ..Self::wall()
        }
    }

    pub fn is_floor(&self) -> bool {
        self.terrain.is_passable()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::wall()
    }
}

/// The world grid, stored row-major as `tiles[y][x]`.
///
/// # Examples
///
/// ```
/// use liminal::{Grid, Position, Terrain};
///
/// let mut grid = Grid::new(5, 5).unwrap();
/// grid.set_terrain(Position::new(2, 2), Terrain::Floor);
/// assert!(grid.is_floor(Position::new(2, 2)));
/// assert!(!grid.is_floor(Position::new(9, 9)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Vec<Cell>>,
}

impl Grid {
    /// Creates a grid filled with walls.
    pub fn new(width: i32, height: i32) -> GameResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "Grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        Ok(Self {
            width,
            height,
            tiles: vec![vec![Cell::wall(); width as usize]; height as usize],
        })
    }

    /// Builds a grid from rows of text: `#` is wall, anything else floor.
    ///
    /// Handy for hand-made layouts in tests and tooling.
    pub fn from_ascii(rows: &[&str]) -> GameResult<Self> {
        let height = rows.len() as i32;
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0) as i32;
        let mut grid = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as i32 != width {
                return Err(GameError::InvalidConfig(format!(
                    "Row {} has length {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                if ch != '#' {
                    grid.set_terrain(Position::new(x as i32, y as i32), Terrain::Floor);
                }
            }
        }

        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Checks if a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Clamps a position onto the grid.
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            pos.x.clamp(0, self.width - 1),
            pos.y.clamp(0, self.height - 1),
        )
    }

    /// Gets the cell at a position.
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if self.in_bounds(pos) {
            Some(&self.tiles[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// Gets the cell at a position mutably.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if self.in_bounds(pos) {
            Some(&mut self.tiles[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// Sets terrain at a position. Out-of-bounds writes are ignored.
    pub fn set_terrain(&mut self, pos: Position, terrain: Terrain) {
        if let Some(cell) = self.get_mut(pos) {
            cell.terrain = terrain;
        }
    }

    /// In bounds and Floor.
    pub fn is_floor(&self, pos: Position) -> bool {
        self.get(pos).map(Cell::is_floor).unwrap_or(false)
    }

    /// Light level at a position, 0 outside the grid.
    pub fn light_at(&self, pos: Position) -> f64 {
        self.get(pos).map(|cell| cell.light).unwrap_or(0.0)
    }

    /// All Floor positions in row-major order.
    ///
    /// Generation samples from this list, so the order is part of what makes
    /// a seed reproducible.
    pub fn floor_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.is_floor(pos))
            .collect()
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Iterates over all cells mutably.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.tiles.iter_mut().flat_map(|row| row.iter_mut())
    }

    /// Iterates over all cells.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.tiles.iter().flat_map(|row| row.iter())
    }

    /// Position of the goal cell, if one has been marked.
    pub fn goal_position(&self) -> Option<Position> {
        self.positions()
            .find(|&pos| self.get(pos).map(|cell| cell.is_goal).unwrap_or(false))
    }

    /// Number of Floor cells.
    pub fn floor_count(&self) -> usize {
        self.cells().filter(|cell| cell.is_floor()).count()
    }

    /// Positions that currently hold an item.
    pub fn item_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.get(pos).map(|cell| cell.item.is_some()).unwrap_or(false))
            .collect()
    }
}
