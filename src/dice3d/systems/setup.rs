//! Board setup system
//!
//! Spawns the UI camera, the grid container and one tile per configured die.

use bevy::prelude::*;

use crate::dice3d::types::*;

use super::grid::DiceFactory;

/// Spawn the board and populate it from `BoardSettings`.
pub fn setup_board(mut factory: DiceFactory) {
    factory.commands.spawn((Camera2d, Name::new("UiCamera")));

    let size = factory.settings.tile_size;
    let columns = factory.grid.columns();
    let text_color = factory.palette.hover_border;

    let mut grid_root = Entity::PLACEHOLDER;
    factory
        .commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(18.0),
                ..default()
            },
            Name::new("BoardRoot"),
        ))
        .with_children(|parent| {
            grid_root = parent
                .spawn((
                    Node {
                        display: Display::Grid,
                        grid_template_columns: RepeatedGridTrack::px(columns as u16, size),
                        column_gap: Val::Px(14.0),
                        row_gap: Val::Px(14.0),
                        ..default()
                    },
                    DiceGridRoot,
                    Name::new("DiceGrid"),
                ))
                .id();

            parent.spawn((
                Text::new("Hover or Tab to a die. Drag a die onto another to swap them. Esc clears focus."),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(text_color),
            ));
        });

    factory.grid.root = Some(grid_root);

    let tiles = factory.settings.tiles.clone();
    if tiles.is_empty() {
        warn!("Board has no tiles");
    }
    for tile in &tiles {
        factory.add_dice(tile);
    }

    info!(
        "Board ready: {} tiles in {} columns ({} rows), {} shared meshes",
        factory.grid.len(),
        columns,
        factory.grid.rows(),
        factory.geometry.len()
    );
}
