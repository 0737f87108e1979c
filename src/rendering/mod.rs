//! # Rendering Module
//!
//! Text rendering of session snapshots. Renderers never see a live
//! [`Session`](crate::Session), only the [`Snapshot`](crate::Snapshot) it
//! hands out.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
