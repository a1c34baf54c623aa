//! Type definitions for the crystal dice board
//!
//! This module is organized into submodules:
//! - `dice` - Dice type key
//! - `crystal` - Per-die animation state machine, crystal handle, renderer components
//! - `grid` - Tile order, drag tracking and keyboard focus
//! - `settings` - Board settings loaded from JSON

pub mod crystal;
pub mod dice;
pub mod grid;
pub mod settings;

// Re-export all public types for convenient access
pub use crystal::*;
pub use dice::*;
pub use grid::*;
pub use settings::*;
