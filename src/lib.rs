//! # Liminal
//!
//! A deterministic, seed-driven maze survival simulation.
//!
//! ## Architecture Overview
//!
//! Every world is a pure function of a 32-bit seed. The pieces, leaves first:
//!
//! - **RNG**: a Mulberry32 stream shared by everything downstream
//! - **Grid Model**: terrain, light, visibility, items and the goal marker
//! - **Generation**: randomized backtracker maze, rooms, static light field
//!   and entity placement (spawn, goal, almond water, hounds)
//! - **Session**: the turn engine that resolves one player intent at a time
//!   and hands immutable snapshots to whoever renders them
//!
//! Rendering, input mapping and seed persistence are thin collaborators that
//! only ever see snapshots or seeds.

pub mod game;
pub mod generation;
pub mod input;
pub mod persistence;
pub mod rendering;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use persistence::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Liminal engine.
///
/// Gameplay rejections (walking into walls, drinking with an empty
/// inventory, acting after the game ended) are not errors; they come back as
/// [`TurnOutcome::Ignored`].
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Session state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Liminal codebase.
pub type GameResult<T> = Result<T, GameError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default grid width in tiles
    pub const DEFAULT_GRID_WIDTH: i32 = 46;

    /// Default grid height in tiles
    pub const DEFAULT_GRID_HEIGHT: i32 = 30;

    /// Largest accepted grid width or height
    pub const MAX_GRID_DIMENSION: i32 = 1024;

    /// Default world seed
    pub const DEFAULT_SEED: u32 = 42;

    /// Sanity a fresh session starts with
    pub const STARTING_SANITY: i32 = 100;

    /// Upper bound for sanity
    pub const MAX_SANITY: i32 = 100;

    /// Sanity restored by one bottle of almond water
    pub const ALMOND_WATER_RESTORE: i32 = 35;
}
