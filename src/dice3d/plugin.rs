use bevy::prelude::*;

use crate::dice3d::crystal_material::CrystalMaterial;
use crate::dice3d::meshes::DiceGeometryCache;
use crate::dice3d::systems::*;
use crate::dice3d::types::*;

/// Installs the dice board: material pipeline, resources and systems.
///
/// Add after `DefaultPlugins`.
pub struct CrystalDicePlugin {
    pub settings: BoardSettings,
}

impl CrystalDicePlugin {
    pub fn new(settings: BoardSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for CrystalDicePlugin {
    fn build(&self, app: &mut App) {
        let palette = self.settings.palette();

        app.add_plugins(MaterialPlugin::<CrystalMaterial>::default())
            .insert_resource(ClearColor(palette.background))
            .insert_resource(palette)
            .insert_resource(DiceGrid::new(self.settings.columns))
            .insert_resource(self.settings.clone())
            .init_resource::<DiceGeometryCache>()
            .init_resource::<TileDragState>()
            .init_resource::<TileFocus>()
            .add_systems(Startup, setup_board)
            // Input runs first so the animators see this frame's flag edges.
            .add_systems(
                Update,
                (
                    (
                        handle_tile_focus,
                        handle_tile_drag,
                        handle_tile_hover,
                        forward_crystal_intents,
                        tick_crystal_reverts,
                        step_crystal_animation,
                    )
                        .chain(),
                    (finish_crystal_loading, sync_grid_layout, update_tile_borders),
                )
                    .chain(),
            );
    }
}
