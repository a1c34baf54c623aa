//! Dice grid: tile creation, cell placement and border feedback

use bevy::prelude::*;

use crate::dice3d::crystal_material::CrystalTextures;
use crate::dice3d::meshes::DiceGeometryCache;
use crate::dice3d::types::*;

use super::crystal::{create_surface_image, spawn_crystal_renderer};

/// Everything needed to add a die tile to the grid.
#[derive(bevy::ecs::system::SystemParam)]
pub struct DiceFactory<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub asset_server: Res<'w, AssetServer>,
    pub images: ResMut<'w, Assets<Image>>,
    pub meshes: ResMut<'w, Assets<Mesh>>,
    pub geometry: ResMut<'w, DiceGeometryCache>,
    pub grid: ResMut<'w, DiceGrid>,
    pub settings: Res<'w, BoardSettings>,
    pub palette: Res<'w, BoardPalette>,
}

impl DiceFactory<'_, '_> {
    /// Create a renderer for `tile` and append a tile node showing it.
    /// Returns the tile entity.
    pub fn add_dice(&mut self, tile: &TileSetting) -> Entity {
        // Layer 0 belongs to the UI camera.
        let layer = self.grid.len() + 1;
        let size = self.settings.tile_size;

        let surface = self.images.add(create_surface_image(size.round() as u32));
        let mesh = self.geometry.get_or_create(tile.die, &mut self.meshes);
        let textures = CrystalTextures::load(&self.asset_server, tile);
        let animator = CrystalAnimator::with_random_orientation(
            self.settings.tuning.clone(),
            &mut rand::thread_rng(),
        );

        let renderer = spawn_crystal_renderer(
            &mut self.commands,
            tile.die,
            layer,
            surface.clone(),
            mesh,
            textures,
            animator,
            self.palette.tile,
        );

        let index = self.grid.len();
        let (row, column) = self.grid.placement(index);
        let tile_entity = self
            .commands
            .spawn((
                Button,
                Node {
                    width: Val::Px(size),
                    height: Val::Px(size),
                    border: UiRect::all(Val::Px(3.0)),
                    grid_row: GridPlacement::start(row as i16 + 1),
                    grid_column: GridPlacement::start(column as i16 + 1),
                    ..default()
                },
                ImageNode::new(surface),
                BackgroundColor(self.palette.tile),
                BorderColor::all(self.palette.border),
                BorderRadius::all(Val::Px(12.0)),
                DiceTile,
                Crystal::new(renderer),
                Name::new(format!("DiceTile_{}_{}", tile.die, index)),
            ))
            .id();

        match self.grid.root {
            Some(root) => {
                self.commands.entity(root).add_child(tile_entity);
            }
            None => warn!("Dice grid has no root node; tile {:?} is unparented", tile_entity),
        }

        self.grid.push(tile_entity);
        info!(
            "Added {} tile #{} (layer {}, textures: {})",
            tile.die, index, layer, tile.base_color
        );
        tile_entity
    }
}

/// Move tile nodes to the cell matching their grid index.
pub fn sync_grid_layout(grid: Res<DiceGrid>, mut nodes: Query<&mut Node, With<DiceTile>>) {
    if !grid.is_changed() {
        return;
    }

    for (index, tile) in grid.tiles().iter().enumerate() {
        let Ok(mut node) = nodes.get_mut(*tile) else {
            continue;
        };
        let (row, column) = grid.placement(index);
        let grid_row = GridPlacement::start(row as i16 + 1);
        let grid_column = GridPlacement::start(column as i16 + 1);
        if node.grid_row != grid_row || node.grid_column != grid_column {
            node.grid_row = grid_row;
            node.grid_column = grid_column;
        }
    }
}

/// Border precedence: dragged, drop target, focused, hovered, resting.
pub fn update_tile_borders(
    palette: Res<BoardPalette>,
    grid: Res<DiceGrid>,
    focus: Res<TileFocus>,
    drag_state: Res<TileDragState>,
    mut tiles: Query<(Entity, &Crystal, &mut BorderColor), With<DiceTile>>,
) {
    let focused = focus.index.and_then(|index| grid.get(index));

    for (entity, crystal, mut border) in tiles.iter_mut() {
        let color = if crystal.is_dragged {
            palette.drag_border
        } else if drag_state.drop_target == Some(entity) {
            palette.drop_border
        } else if focused == Some(entity) {
            palette.focus_border
        } else if crystal.is_hovered {
            palette.hover_border
        } else {
            palette.border
        };

        let wanted = BorderColor::all(color);
        if *border != wanted {
            *border = wanted;
        }
    }
}
