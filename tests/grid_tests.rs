//! Tests for grid ordering, crystal flag polling and drag tracking

use bevy::prelude::*;
use crystaldice::dice3d::types::{
    Crystal, CrystalIntent, DiceGrid, TileDragState, DRAG_THRESHOLD_PX,
};

fn grid_with(world: &mut World, columns: usize, n: usize) -> (DiceGrid, Vec<Entity>) {
    let mut grid = DiceGrid::new(columns);
    let tiles: Vec<Entity> = (0..n).map(|_| world.spawn_empty().id()).collect();
    for tile in &tiles {
        grid.push(*tile);
    }
    (grid, tiles)
}

#[test]
fn test_placement_is_row_major() {
    let mut world = World::new();
    let (grid, _) = grid_with(&mut world, 3, 5);
    assert_eq!(grid.placement(0), (0, 0));
    assert_eq!(grid.placement(2), (0, 2));
    assert_eq!(grid.placement(3), (1, 0));
    assert_eq!(grid.placement(4), (1, 1));
    assert_eq!(grid.rows(), 2);
}

#[test]
fn test_zero_columns_clamped() {
    let grid = DiceGrid::new(0);
    assert_eq!(grid.columns(), 1);
}

#[test]
fn test_swap_reports_change() {
    let mut world = World::new();
    let (mut grid, t) = grid_with(&mut world, 3, 4);

    assert!(grid.swap(t[0], t[3]));
    assert_eq!(grid.tiles(), &[t[3], t[1], t[2], t[0]]);
    assert_eq!(grid.index_of(t[0]), Some(3));

    // Same tile, or a tile not on the grid: nothing changes.
    assert!(!grid.swap(t[1], t[1]));
    let stranger = world.spawn_empty().id();
    assert!(!grid.swap(t[1], stranger));
    assert_eq!(grid.tiles(), &[t[3], t[1], t[2], t[0]]);
}

#[test]
fn test_crystal_emits_one_intent_per_edge() {
    let mut world = World::new();
    let renderer = world.spawn_empty().id();
    let mut crystal = Crystal::new(renderer);

    crystal.is_hovered = true;
    assert_eq!(crystal.poll_intents(), vec![CrystalIntent::HoverStart]);
    assert!(crystal.poll_intents().is_empty());

    crystal.is_dragged = true;
    assert_eq!(crystal.poll_intents(), vec![CrystalIntent::DragStart]);
    assert!(crystal.poll_intents().is_empty());

    crystal.drag_changed = true;
    crystal.is_dragged = false;
    crystal.is_hovered = false;
    assert_eq!(
        crystal.poll_intents(),
        vec![
            CrystalIntent::HoverEnd,
            CrystalIntent::DragEnd { changed: true }
        ]
    );
    assert!(crystal.poll_intents().is_empty());
}

#[test]
fn test_drag_and_drop_flow() {
    let mut world = World::new();
    let (mut grid, t) = grid_with(&mut world, 2, 2);
    let mut drag = TileDragState::default();

    drag.press(t[0], Vec2::new(50.0, 50.0));
    assert_eq!(drag.moved(Vec2::new(50.0 + DRAG_THRESHOLD_PX * 0.5, 50.0)), None);
    assert_eq!(drag.moved(Vec2::new(150.0, 50.0)), Some(t[0]));

    drag.drop_target = Some(t[1]);
    let target = drag.drop_target;
    let dragged = drag.release().unwrap();
    assert_eq!(drag.drop_target, None);

    let changed = target.is_some_and(|target| grid.swap(dragged, target));
    assert!(changed);
    assert_eq!(grid.tiles(), &[t[1], t[0]]);
}
