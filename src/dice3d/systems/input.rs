//! Pointer and keyboard input for the dice grid
//!
//! Mouse and touch are merged into one pointer sample per frame. Hover and
//! press comes from the tile `Interaction`; drag motion and the drop target
//! are tracked by hand because the tile stays put while dragged.
//!
//! Hit testing follows the UI coordinate rule: `ComputedNode::contains_point`
//! with a `UiGlobalTransform` expects PHYSICAL pixels, while the pointer and
//! the drag threshold are kept in LOGICAL pixels. Convert with
//! `window.scale_factor()` right before testing.

use bevy::prelude::*;
use bevy::ui::{ComputedNode, UiGlobalTransform};
use bevy::window::PrimaryWindow;

use crate::dice3d::types::*;

/// Merged mouse/touch state for one frame, logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub position: Option<Vec2>,
    pub just_pressed: bool,
    pub pressed: bool,
    pub just_released: bool,
}

impl PointerSample {
    pub fn read(window: &Window, mouse: &ButtonInput<MouseButton>, touches: &Touches) -> Self {
        let touch_position = touches.first_pressed_position().or_else(|| {
            touches
                .iter_just_released()
                .next()
                .map(|touch| touch.position())
        });

        Self {
            position: window.cursor_position().or(touch_position),
            just_pressed: mouse.just_pressed(MouseButton::Left) || touches.any_just_pressed(),
            pressed: mouse.pressed(MouseButton::Left) || touches.iter().next().is_some(),
            just_released: mouse.just_released(MouseButton::Left)
                || touches.any_just_released()
                || touches.any_just_canceled(),
        }
    }
}

/// First tile whose node contains `physical` (physical pixels).
pub fn tile_under<'a>(
    tiles: impl IntoIterator<Item = (Entity, &'a ComputedNode, &'a UiGlobalTransform)>,
    physical: Vec2,
) -> Option<Entity> {
    tiles
        .into_iter()
        .find(|(_, node, transform)| node.contains_point(**transform, physical))
        .map(|(entity, _, _)| entity)
}

/// Tab / Shift+Tab cycle keyboard focus over the tiles in grid order;
/// Escape clears it.
pub fn handle_tile_focus(
    keyboard: Res<ButtonInput<KeyCode>>,
    grid: Res<DiceGrid>,
    mut focus: ResMut<TileFocus>,
) {
    if keyboard.just_pressed(KeyCode::Tab) {
        let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
        if shift {
            focus.previous(grid.len());
        } else {
            focus.next(grid.len());
        }
    } else if keyboard.just_pressed(KeyCode::Escape) && focus.index.is_some() {
        focus.clear();
    }

    if focus.index.is_some_and(|i| i >= grid.len()) {
        focus.clear();
    }
}

/// Press, drag and drop tiles. Dropping on another tile swaps the two;
/// the dragged crystal learns whether the layout changed before its drag
/// flag clears.
pub fn handle_tile_drag(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut drag_state: ResMut<TileDragState>,
    mut grid: ResMut<DiceGrid>,
    mut tiles: Query<
        (
            Entity,
            &Interaction,
            &ComputedNode,
            &UiGlobalTransform,
            &mut Crystal,
        ),
        With<DiceTile>,
    >,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let pointer = PointerSample::read(window, &mouse, &touches);
    let scale = window.scale_factor();

    if pointer.just_pressed {
        if let Some(position) = pointer.position {
            let pressed = tiles
                .iter()
                .find(|(_, interaction, ..)| **interaction == Interaction::Pressed)
                .map(|(entity, ..)| entity)
                .or_else(|| {
                    tile_under(
                        tiles.iter().map(|(e, _, node, transform, _)| (e, node, transform)),
                        position * scale,
                    )
                });
            if let Some(tile) = pressed {
                drag_state.press(tile, position);
            }
        }
    }

    if pointer.pressed {
        if let Some(position) = pointer.position {
            if let Some(tile) = drag_state.moved(position) {
                if let Ok((.., mut crystal)) = tiles.get_mut(tile) {
                    crystal.is_dragged = true;
                }
                info!("Tile {:?} drag started", tile);
            }
        }
    }

    if let Some(dragged) = drag_state.dragged_tile() {
        let target = drag_state.last_position.and_then(|position| {
            tile_under(
                tiles.iter().map(|(e, _, node, transform, _)| (e, node, transform)),
                position * scale,
            )
        });
        let target = target.filter(|tile| *tile != dragged);
        if drag_state.drop_target != target {
            drag_state.drop_target = target;
        }
    }

    if pointer.just_released {
        let target = drag_state.drop_target;
        if let Some(dragged) = drag_state.release() {
            let changed = target.is_some_and(|target| grid.swap(dragged, target));
            if let Ok((.., mut crystal)) = tiles.get_mut(dragged) {
                crystal.drag_changed = changed;
                crystal.is_dragged = false;
            }

            if changed {
                info!(
                    "Tile {:?} dropped on {:?}, now at index {:?}",
                    dragged,
                    target,
                    grid.index_of(dragged)
                );
            } else {
                info!("Tile {:?} dropped in place", dragged);
            }
        }
    }
}

/// A tile is hovered while the pointer is over it or it holds keyboard
/// focus. The dragged tile keeps its flag until the drop.
pub fn handle_tile_hover(
    grid: Res<DiceGrid>,
    focus: Res<TileFocus>,
    drag_state: Res<TileDragState>,
    mut tiles: Query<(Entity, &Interaction, &mut Crystal), With<DiceTile>>,
) {
    let focused = focus.index.and_then(|index| grid.get(index));
    let dragged = drag_state.dragged_tile();

    for (entity, interaction, mut crystal) in tiles.iter_mut() {
        if crystal.is_dragged || dragged == Some(entity) {
            continue;
        }

        let hovered = *interaction != Interaction::None || focused == Some(entity);
        if crystal.is_hovered != hovered {
            crystal.is_hovered = hovered;
        }
    }
}
