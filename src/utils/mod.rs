//! # Utilities Module
//!
//! The deterministic random stream and grid navigation helpers.

pub mod navigation;
pub mod rng;

pub use navigation::*;
pub use rng::*;
