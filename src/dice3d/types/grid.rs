//! Grid placement, drag tracking and keyboard focus for dice tiles

use bevy::prelude::*;

/// Pointer travel (logical px) before a press on a tile becomes a drag.
pub const DRAG_THRESHOLD_PX: f32 = 6.0;

/// Marker for a dice tile UI node
#[derive(Component)]
pub struct DiceTile;

/// Marker for the grid container node
#[derive(Component)]
pub struct DiceGridRoot;

/// Ordered dice tiles; a tile's index decides its grid cell.
#[derive(Resource, Debug)]
pub struct DiceGrid {
    tiles: Vec<Entity>,
    columns: usize,
    pub root: Option<Entity>,
}

impl Default for DiceGrid {
    fn default() -> Self {
        Self::new(3)
    }
}

impl DiceGrid {
    pub fn new(columns: usize) -> Self {
        Self {
            tiles: Vec::new(),
            columns: columns.max(1),
            root: None,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.tiles.len().div_ceil(self.columns)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Entity] {
        &self.tiles
    }

    /// Append a tile, returning its index.
    pub fn push(&mut self, tile: Entity) -> usize {
        self.tiles.push(tile);
        self.tiles.len() - 1
    }

    pub fn index_of(&self, tile: Entity) -> Option<usize> {
        self.tiles.iter().position(|t| *t == tile)
    }

    pub fn get(&self, index: usize) -> Option<Entity> {
        self.tiles.get(index).copied()
    }

    /// Swap two tiles. Returns whether the order changed.
    pub fn swap(&mut self, a: Entity, b: Entity) -> bool {
        if a == b {
            return false;
        }
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => {
                self.tiles.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Zero-based (row, column) of the cell at `index`, row-major.
    pub fn placement(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }
}

/// Tile currently held by the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressedTile {
    pub tile: Entity,
    pub origin: Vec2,
    pub dragging: bool,
}

/// Press/drag/drop tracking for tile reordering.
#[derive(Resource, Debug, Default)]
pub struct TileDragState {
    pressed: Option<PressedTile>,
    /// Tile under the pointer while dragging (excluding the dragged one).
    pub drop_target: Option<Entity>,
    /// Last pointer position seen, logical px.
    pub last_position: Option<Vec2>,
}

impl TileDragState {
    pub fn press(&mut self, tile: Entity, position: Vec2) {
        self.pressed = Some(PressedTile {
            tile,
            origin: position,
            dragging: false,
        });
        self.drop_target = None;
        self.last_position = Some(position);
    }

    /// Feed a pointer position while pressed. Returns the tile when this
    /// movement turns the press into a drag.
    pub fn moved(&mut self, position: Vec2) -> Option<Entity> {
        self.last_position = Some(position);
        let pressed = self.pressed.as_mut()?;
        if pressed.dragging || pressed.origin.distance(position) < DRAG_THRESHOLD_PX {
            return None;
        }
        pressed.dragging = true;
        Some(pressed.tile)
    }

    /// Pointer released. Returns the dragged tile if a drag was in progress.
    pub fn release(&mut self) -> Option<Entity> {
        self.drop_target = None;
        self.pressed
            .take()
            .and_then(|p| if p.dragging { Some(p.tile) } else { None })
    }

    pub fn pressed(&self) -> Option<PressedTile> {
        self.pressed
    }

    pub fn dragged_tile(&self) -> Option<Entity> {
        self.pressed.filter(|p| p.dragging).map(|p| p.tile)
    }
}

/// Keyboard focus over tiles, by grid index.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TileFocus {
    pub index: Option<usize>,
}

impl TileFocus {
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.index = None;
            return;
        }
        self.index = Some(match self.index {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            self.index = None;
            return;
        }
        self.index = Some(match self.index {
            Some(0) | None => len - 1,
            Some(i) => (i - 1).min(len - 1),
        });
    }

    pub fn clear(&mut self) {
        self.index = None;
    }
}
