//! Systems module for dice3d
//!
//! - `setup`: Board initialization (UI camera, grid container, tiles)
//! - `grid`: Tile factory, grid cell placement and border feedback
//! - `input`: Pointer drag/drop, hover and keyboard focus
//! - `crystal`: Per-die renderer spawning, texture gating and animation

mod crystal;
mod grid;
mod input;
mod setup;

pub use crystal::{
    create_surface_image, finish_crystal_loading, forward_crystal_intents, spawn_crystal_renderer,
    step_crystal_animation, tick_crystal_reverts,
};
pub use grid::{sync_grid_layout, update_tile_borders, DiceFactory};
pub use input::{
    handle_tile_drag, handle_tile_focus, handle_tile_hover, tile_under, PointerSample,
};
pub use setup::setup_board;
