//! # Generation Module
//!
//! Procedural world generation: maze layout, rooms, static lighting and
//! entity placement.
//!
//! Every generator draws from one [`MazeRng`] passed in by the caller. Never
//! create a fresh stream partway through; the order of draws across maze,
//! rooms, lights and placement is what makes a seed reproducible.

pub mod maze;
pub mod placement;

pub use maze::*;
pub use placement::*;

use crate::{config, GameError, GameResult, Grid, MazeRng};
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Counts scale with grid area or floor count; the divisors below control
/// how densely each feature is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u32,
    /// Grid width in tiles
    pub width: i32,
    /// Grid height in tiles
    pub height: i32,
    /// One room per this many tiles of area
    pub room_area_divisor: i32,
    /// Smallest room width
    pub min_room_width: i32,
    /// Largest room width
    pub max_room_width: i32,
    /// Smallest room height
    pub min_room_height: i32,
    /// Largest room height
    pub max_room_height: i32,
    /// One light source per this many tiles of area
    pub light_area_divisor: i32,
    /// Light falloff radius in tiles
    pub light_radius: f64,
    /// Candidates drawn when searching for a far-away goal
    pub goal_samples: u32,
    /// One almond water per this many floor cells
    pub item_floor_divisor: usize,
    /// Minimum number of almond water draws
    pub min_items: usize,
    /// One hound per this many floor cells
    pub hound_floor_divisor: usize,
    /// Minimum number of hounds
    pub min_hounds: usize,
    /// Hounds start with a cooldown in `0..=max_hound_cooldown`
    pub max_hound_cooldown: i32,
}

impl GenerationConfig {
    /// Creates the default configuration for a seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use liminal::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert_eq!((config.width, config.height), (46, 30));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            width: config::DEFAULT_GRID_WIDTH,
            height: config::DEFAULT_GRID_HEIGHT,
            room_area_divisor: 400,
            min_room_width: 5,
            max_room_width: 9,
            min_room_height: 4,
            max_room_height: 7,
            light_area_divisor: 200,
            light_radius: 3.0,
            goal_samples: 200,
            item_floor_divisor: 120,
            min_items: 5,
            hound_floor_divisor: 800,
            min_hounds: 1,
            max_hound_cooldown: 2,
        }
    }

    /// Creates a configuration for testing with a small grid.
    pub fn for_testing(seed: u32) -> Self {
        Self {
            width: 21,
            height: 15,
            ..Self::new(seed)
        }
    }

    /// Number of rooms carved after the maze.
    pub fn room_count(&self) -> usize {
        (self.width * self.height / self.room_area_divisor) as usize
    }

    /// Number of light sources.
    pub fn light_count(&self) -> usize {
        (self.width * self.height / self.light_area_divisor) as usize
    }

    /// Number of almond water draws for a given floor count.
    pub fn item_count(&self, floor_count: usize) -> usize {
        self.min_items.max(floor_count / self.item_floor_divisor)
    }

    /// Number of hounds for a given floor count.
    pub fn hound_count(&self, floor_count: usize) -> usize {
        self.min_hounds.max(floor_count / self.hound_floor_divisor)
    }

    /// Checks that the configuration can produce a world.
    pub fn validate(&self) -> GameResult<()> {
        if self.width < 5 || self.height < 5 {
            return Err(GameError::InvalidConfig(format!(
                "Grid must be at least 5x5, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > config::MAX_GRID_DIMENSION || self.height > config::MAX_GRID_DIMENSION {
            return Err(GameError::InvalidConfig(format!(
                "Grid must be at most {}x{}, got {}x{}",
                config::MAX_GRID_DIMENSION,
                config::MAX_GRID_DIMENSION,
                self.width,
                self.height
            )));
        }
        if self.room_area_divisor <= 0
            || self.light_area_divisor <= 0
            || self.item_floor_divisor == 0
            || self.hound_floor_divisor == 0
        {
            return Err(GameError::InvalidConfig(
                "Density divisors must be positive".to_string(),
            ));
        }
        // A room at least 2x2 always covers an odd/odd lattice cell, which
        // keeps its floor joined to the maze.
        if self.min_room_width < 2 || self.min_room_height < 2 {
            return Err(GameError::InvalidConfig(format!(
                "Rooms must be at least 2x2, got minimum {}x{}",
                self.min_room_width, self.min_room_height
            )));
        }
        if self.min_room_width > self.max_room_width
            || self.min_room_height > self.max_room_height
        {
            return Err(GameError::InvalidConfig(
                "Room size ranges are empty".to_string(),
            ));
        }
        if self.light_radius < 0.0 || self.max_hound_cooldown < 0 {
            return Err(GameError::InvalidConfig(
                "light_radius and max_hound_cooldown must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(config::DEFAULT_SEED)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and stream.
    fn generate(&self, config: &GenerationConfig, rng: &mut MazeRng) -> GameResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> GameResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::all_floor_connected;

    /// Creates the session stream from the config.
    pub fn create_rng(config: &GenerationConfig) -> MazeRng {
        MazeRng::new(config.seed)
    }

    /// Validates that a grid has floor and that all of it is connected.
    pub fn validate_grid(grid: &Grid) -> GameResult<()> {
        if grid.floor_count() == 0 {
            return Err(GameError::GenerationFailed(
                "Grid has no floor tiles".to_string(),
            ));
        }

        if !all_floor_connected(grid) {
            return Err(GameError::GenerationFailed(
                "Grid contains unreachable floor".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Terrain};

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert!(config.min_room_width <= config.max_room_width);
        assert!(config.min_room_height <= config.max_room_height);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_density_counts() {
        let config = GenerationConfig::new(1);
        assert_eq!(config.room_count(), 46 * 30 / 400);
        assert_eq!(config.light_count(), 46 * 30 / 200);
        assert_eq!(config.item_count(100), 5);
        assert_eq!(config.item_count(1200), 10);
        assert_eq!(config.hound_count(700), 1);
        assert_eq!(config.hound_count(1600), 2);
    }

    #[test]
    fn test_config_validation() {
        let tiny = GenerationConfig {
            width: 4,
            ..GenerationConfig::new(1)
        };
        assert!(tiny.validate().is_err());

        let no_rooms = GenerationConfig {
            room_area_divisor: 0,
            ..GenerationConfig::new(1)
        };
        assert!(no_rooms.validate().is_err());
    }

    #[test]
    fn test_rejects_one_wide_rooms() {
        let thin = GenerationConfig {
            min_room_width: 1,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(thin.validate(), Err(GameError::InvalidConfig(_))));

        let flat = GenerationConfig {
            min_room_height: 1,
            max_room_height: 1,
            ..GenerationConfig::new(1)
        };
        assert!(flat.validate().is_err());

        let smallest = GenerationConfig {
            min_room_width: 2,
            max_room_width: 2,
            min_room_height: 2,
            max_room_height: 2,
            room_area_divisor: 20,
            ..GenerationConfig::new(1)
        };
        assert!(smallest.validate().is_ok());
    }

    #[test]
    fn test_small_rooms_keep_floor_connected() {
        for seed in 0..50 {
            let config = GenerationConfig {
                min_room_width: 2,
                max_room_width: 3,
                min_room_height: 2,
                max_room_height: 3,
                room_area_divisor: 20,
                ..GenerationConfig::new(seed)
            };
            assert!(config.validate().is_ok());
            let mut rng = utils::create_rng(&config);
            let grid = MazeGenerator::new().generate(&config, &mut rng).unwrap();
            assert!(utils::validate_grid(&grid).is_ok(), "seed {}", seed);
        }
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let huge = GenerationConfig {
            width: 70_000,
            height: 70_000,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(huge.validate(), Err(GameError::InvalidConfig(_))));

        let largest = GenerationConfig {
            width: config::MAX_GRID_DIMENSION,
            height: config::MAX_GRID_DIMENSION,
            ..GenerationConfig::new(1)
        };
        assert!(largest.validate().is_ok());
        assert!(largest.room_count() > 0);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GenerationConfig = serde_json::from_str(r#"{"seed": 9, "width": 31}"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.width, 31);
        assert_eq!(config.height, 30);
        assert_eq!(config.goal_samples, 200);
    }

    #[test]
    fn test_validate_grid() {
        let empty = Grid::new(5, 5).unwrap();
        assert!(utils::validate_grid(&empty).is_err());

        let mut split = Grid::from_ascii(&["#####", "#.#.#", "#####"]).unwrap();
        assert!(utils::validate_grid(&split).is_err());

        split.set_terrain(Position::new(2, 1), Terrain::Floor);
        assert!(utils::validate_grid(&split).is_ok());
    }
}
