//! Per-die animation state and the crystal handle
//!
//! `CrystalAnimator` lives on each renderer entity and owns the eased
//! rotation velocity, accumulated orientation and camera distance.
//! `Crystal` lives on the grid tile and carries the hover/drag intent flags
//! written by the input layer.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use super::DiceType;
use crate::dice3d::crystal_material::CrystalTextures;

/// Discrete interaction state of a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrystalState {
    #[default]
    Idle,
    Hover,
    DragStart,
    DragEnd,
}

/// Targets the per-frame update eases toward while in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateTargets {
    /// Rotation velocity around X, radians per frame.
    pub velocity_x: f32,
    /// Rotation velocity around Y, radians per frame.
    pub velocity_y: f32,
    pub camera_distance: f32,
}

/// Animation constants, configurable from the board file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrystalTuning {
    pub idle: StateTargets,
    pub hover: StateTargets,
    pub drag_start: StateTargets,
    /// Fraction of the remaining distance covered per frame.
    pub smoothing: f32,
    /// Fraction used while snapping to rest after a drop.
    pub snap_smoothing: f32,
    /// Delay before a finished drag reverts to idle.
    pub revert_delay_ms: u64,
}

impl Default for CrystalTuning {
    fn default() -> Self {
        Self {
            idle: StateTargets {
                velocity_x: 0.002,
                velocity_y: 0.004,
                camera_distance: 4.0,
            },
            hover: StateTargets {
                velocity_x: 0.01,
                velocity_y: 0.02,
                camera_distance: 3.4,
            },
            drag_start: StateTargets {
                velocity_x: 0.03,
                velocity_y: 0.05,
                camera_distance: 3.0,
            },
            smoothing: 0.04,
            snap_smoothing: 0.05,
            revert_delay_ms: 500,
        }
    }
}

impl CrystalTuning {
    /// Targets for the eased states; `DragEnd` has none (it snaps instead).
    pub fn targets(&self, state: CrystalState) -> Option<StateTargets> {
        match state {
            CrystalState::Idle => Some(self.idle),
            CrystalState::Hover => Some(self.hover),
            CrystalState::DragStart => Some(self.drag_start),
            CrystalState::DragEnd => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, factor) in [
            ("smoothing", self.smoothing),
            ("snap_smoothing", self.snap_smoothing),
        ] {
            if !(factor > 0.0 && factor < 1.0) {
                return Err(format!("{} must be in (0, 1), got {}", name, factor));
            }
        }

        for (name, targets) in [
            ("idle", self.idle),
            ("hover", self.hover),
            ("drag_start", self.drag_start),
        ] {
            if !(targets.camera_distance > 0.0) {
                return Err(format!(
                    "{}.camera_distance must be positive, got {}",
                    name, targets.camera_distance
                ));
            }
        }

        Ok(())
    }
}

/// Interaction edge detected on a crystal's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrystalIntent {
    HoverStart,
    HoverEnd,
    DragStart,
    DragEnd { changed: bool },
}

/// Animation state machine for one die.
#[derive(Component, Debug, Clone)]
pub struct CrystalAnimator {
    state: CrystalState,
    /// Eased rotation velocity (radians per frame).
    pub velocity: Vec3,
    /// Accumulated Euler angles (XYZ) of the die mesh.
    pub rotation: Vec3,
    pub camera_distance: f32,
    tuning: CrystalTuning,
    /// Seconds left on each armed drag-end revert.
    pending_reverts: Vec<f32>,
}

impl CrystalAnimator {
    pub fn new(tuning: CrystalTuning, rotation: Vec3) -> Self {
        Self {
            state: CrystalState::Idle,
            velocity: Vec3::ZERO,
            rotation,
            camera_distance: tuning.idle.camera_distance,
            tuning,
            pending_reverts: Vec::new(),
        }
    }

    /// Start with a random orientation on every axis.
    pub fn with_random_orientation(tuning: CrystalTuning, rng: &mut impl Rng) -> Self {
        let rotation = Vec3::new(
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
        );
        Self::new(tuning, rotation)
    }

    pub fn state(&self) -> CrystalState {
        self.state
    }

    /// Number of drag-end reverts that have not fired yet.
    pub fn pending_reverts(&self) -> usize {
        self.pending_reverts.len()
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    pub fn begin_hover(&mut self) {
        if self.state != CrystalState::DragEnd {
            self.state = CrystalState::Hover;
        }
    }

    pub fn end_hover(&mut self) {
        if self.state != CrystalState::DragEnd {
            self.state = CrystalState::Idle;
        }
    }

    pub fn begin_drag(&mut self) {
        self.state = CrystalState::DragStart;
    }

    /// Finish a drag. Only a drag that changed the layout settles the die;
    /// an unchanged drop leaves the state alone. The revert armed here does
    /// not cancel earlier ones.
    pub fn end_drag(&mut self, changed: bool) {
        if !changed {
            return;
        }
        self.state = CrystalState::DragEnd;
        self.pending_reverts
            .push(self.tuning.revert_delay_ms as f32 / 1000.0);
    }

    pub fn apply(&mut self, intent: CrystalIntent) {
        match intent {
            CrystalIntent::HoverStart => self.begin_hover(),
            CrystalIntent::HoverEnd => self.end_hover(),
            CrystalIntent::DragStart => self.begin_drag(),
            CrystalIntent::DragEnd { changed } => self.end_drag(changed),
        }
    }

    /// Advance armed reverts. A revert that fires only applies if the die is
    /// still in `DragEnd` at that moment.
    pub fn tick_reverts(&mut self, delta_secs: f32) {
        let mut fired = false;
        self.pending_reverts.retain_mut(|remaining| {
            *remaining -= delta_secs;
            if *remaining <= 0.0 {
                fired = true;
                false
            } else {
                true
            }
        });

        if fired && self.state == CrystalState::DragEnd {
            self.state = CrystalState::Idle;
        }
    }

    /// Per-frame update. Runs once per rendered frame; the factors are per
    /// frame, not per second.
    pub fn step(&mut self) {
        match self.tuning.targets(self.state) {
            Some(targets) => {
                let k = self.tuning.smoothing;
                self.velocity.x = ease(self.velocity.x, targets.velocity_x, k);
                self.velocity.y = ease(self.velocity.y, targets.velocity_y, k);
                self.camera_distance = ease(self.camera_distance, targets.camera_distance, k);
            }
            None => {
                let k = self.tuning.snap_smoothing;
                self.velocity = Vec3::ZERO;
                self.rotation.x = ease(self.rotation.x, rest_angle(self.rotation.x), k);
                self.rotation.y = ease(self.rotation.y, rest_angle(self.rotation.y), k);
            }
        }

        self.rotation += self.velocity;
        // Multiples of 2π keep every rest angle a multiple of π.
        self.rotation.x = self.rotation.x.rem_euclid(TAU);
        self.rotation.y = self.rotation.y.rem_euclid(TAU);
    }
}

/// Exponential easing: move `current` a fixed fraction toward `target`.
pub fn ease(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Nearest multiple of π at or above `angle`.
pub fn rest_angle(angle: f32) -> f32 {
    (angle / PI).ceil() * PI
}

/// Handle the grid hands out for each die tile.
///
/// The input layer writes `is_hovered` / `is_dragged` (and `drag_changed`
/// just before clearing `is_dragged`); `poll_intents` turns flag edges into
/// transitions for the renderer.
#[derive(Component, Debug)]
pub struct Crystal {
    pub renderer: Entity,
    pub is_hovered: bool,
    pub is_dragged: bool,
    /// Outcome of the drag that is ending; consumed with the drag-end intent.
    pub drag_changed: bool,
    seen_hovered: bool,
    seen_dragged: bool,
}

impl Crystal {
    pub fn new(renderer: Entity) -> Self {
        Self {
            renderer,
            is_hovered: false,
            is_dragged: false,
            drag_changed: false,
            seen_hovered: false,
            seen_dragged: false,
        }
    }

    /// Edge-detect the flags since the last poll. Hover edges come first so
    /// a drag that starts in the same frame is not overridden.
    pub fn poll_intents(&mut self) -> Vec<CrystalIntent> {
        let mut intents = Vec::new();

        if self.is_hovered != self.seen_hovered {
            self.seen_hovered = self.is_hovered;
            intents.push(if self.is_hovered {
                CrystalIntent::HoverStart
            } else {
                CrystalIntent::HoverEnd
            });
        }

        if self.is_dragged != self.seen_dragged {
            self.seen_dragged = self.is_dragged;
            if self.is_dragged {
                intents.push(CrystalIntent::DragStart);
            } else {
                let changed = std::mem::take(&mut self.drag_changed);
                intents.push(CrystalIntent::DragEnd { changed });
            }
        }

        intents
    }
}

/// Progress of a renderer's texture loads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TextureLoadStatus {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

impl TextureLoadStatus {
    /// Fold per-texture statuses: any failure wins, then any pending.
    pub fn combine(statuses: impl IntoIterator<Item = TextureLoadStatus>) -> TextureLoadStatus {
        let mut pending = false;
        for status in statuses {
            match status {
                TextureLoadStatus::Failed(reason) => return TextureLoadStatus::Failed(reason),
                TextureLoadStatus::Pending => pending = true,
                TextureLoadStatus::Ready => {}
            }
        }

        if pending {
            TextureLoadStatus::Pending
        } else {
            TextureLoadStatus::Ready
        }
    }
}

/// Renderer for one die: its own render layer, camera and (once textures
/// arrive) mesh. The camera draws into the tile's image.
#[derive(Component)]
pub struct CrystalRenderer {
    pub die_type: DiceType,
    pub layer: usize,
    pub camera: Entity,
    pub mesh: Handle<Mesh>,
    pub textures: CrystalTextures,
    pub status: TextureLoadStatus,
    pub die: Option<Entity>,
}

/// Marker for a renderer's camera
#[derive(Component)]
pub struct CrystalCamera;

/// Marker for a renderer's die mesh entity
#[derive(Component)]
pub struct CrystalDie;

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> CrystalAnimator {
        CrystalAnimator::new(CrystalTuning::default(), Vec3::new(0.4, 1.3, 2.0))
    }

    #[test]
    fn test_rest_angle_rounds_up_to_multiple_of_pi() {
        assert_eq!(rest_angle(0.0), 0.0);
        assert!((rest_angle(0.1) - PI).abs() < 1e-6);
        assert!((rest_angle(PI + 0.01) - 2.0 * PI).abs() < 1e-5);
        assert!(rest_angle(-0.5).abs() < 1e-6);
    }

    #[test]
    fn test_end_drag_unchanged_keeps_drag_start() {
        let mut a = animator();
        a.begin_drag();
        a.end_drag(false);
        assert_eq!(a.state(), CrystalState::DragStart);
        assert_eq!(a.pending_reverts(), 0);
    }

    #[test]
    fn test_rotation_wraps_within_full_turn() {
        let start = Vec3::new(TAU - 1e-4, TAU - 1e-4, 0.0);
        let mut a = CrystalAnimator::new(CrystalTuning::default(), start);
        a.velocity = Vec3::new(0.01, 0.02, 0.0);
        a.step();
        assert!((0.0..TAU).contains(&a.rotation.x), "x {}", a.rotation.x);
        assert!((0.0..TAU).contains(&a.rotation.y), "y {}", a.rotation.y);
        assert!(a.rotation.x < 0.1 && a.rotation.y < 0.1);
    }

    #[test]
    fn test_drag_end_keeps_z_rotation() {
        let mut a = animator();
        a.begin_drag();
        a.end_drag(true);
        let z = a.rotation.z;
        for _ in 0..10 {
            a.step();
        }
        assert_eq!(a.rotation.z, z);
        assert_eq!(a.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_poll_intents_is_edge_triggered() {
        let mut world = World::new();
        let renderer = world.spawn_empty().id();
        let mut crystal = Crystal::new(renderer);

        assert!(crystal.poll_intents().is_empty());
        crystal.is_hovered = true;
        assert_eq!(crystal.poll_intents(), vec![CrystalIntent::HoverStart]);
        assert!(crystal.poll_intents().is_empty());
    }

    #[test]
    fn test_poll_intents_drag_end_carries_outcome_once() {
        let mut world = World::new();
        let renderer = world.spawn_empty().id();
        let mut crystal = Crystal::new(renderer);

        crystal.is_dragged = true;
        assert_eq!(crystal.poll_intents(), vec![CrystalIntent::DragStart]);

        crystal.drag_changed = true;
        crystal.is_dragged = false;
        assert_eq!(
            crystal.poll_intents(),
            vec![CrystalIntent::DragEnd { changed: true }]
        );
        assert!(!crystal.drag_changed);
    }

    #[test]
    fn test_poll_intents_drop_in_place_adds_no_hover() {
        let mut world = World::new();
        let renderer = world.spawn_empty().id();
        let mut crystal = Crystal::new(renderer);

        crystal.is_hovered = true;
        crystal.is_dragged = true;
        crystal.poll_intents();

        crystal.is_dragged = false;
        assert_eq!(
            crystal.poll_intents(),
            vec![CrystalIntent::DragEnd { changed: false }]
        );
    }

    #[test]
    fn test_texture_status_combine() {
        use TextureLoadStatus::*;
        assert_eq!(TextureLoadStatus::combine([Ready, Ready]), Ready);
        assert_eq!(TextureLoadStatus::combine([Ready, Pending]), Pending);
        assert_eq!(
            TextureLoadStatus::combine([Pending, Failed("x".into()), Ready]),
            Failed("x".into())
        );
        assert_eq!(TextureLoadStatus::combine(Vec::new()), Ready);
    }

    #[test]
    fn test_tuning_validate() {
        assert!(CrystalTuning::default().validate().is_ok());
        let mut bad = CrystalTuning::default();
        bad.smoothing = 1.5;
        assert!(bad.validate().is_err());
        let mut bad = CrystalTuning::default();
        bad.hover.camera_distance = 0.0;
        assert!(bad.validate().is_err());
    }
}
