//! Per-die renderer systems
//!
//! Each die renders into its own image through a dedicated camera on its own
//! render layer (isolated from every other die). The die mesh joins the
//! scene only after its textures have loaded; the animation runs from the
//! first frame regardless.

use bevy::camera::visibility::RenderLayers;
use bevy::camera::RenderTarget;
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureFormat, TextureUsages,
};

use crate::dice3d::crystal_material::{build_crystal_material, CrystalMaterial, CrystalTextures};
use crate::dice3d::types::*;

/// Allocate the image a die renders into.
pub fn create_surface_image(size: u32) -> Image {
    let size = Extent3d {
        width: size.max(1),
        height: size.max(1),
        depth_or_array_layers: 1,
    };

    let mut image = Image {
        texture_descriptor: bevy::render::render_resource::TextureDescriptor {
            label: Some("crystal_surface"),
            size,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            mip_level_count: 1,
            sample_count: 1,
            usage: TextureUsages::TEXTURE_BINDING
                | TextureUsages::COPY_DST
                | TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        },
        ..default()
    };

    image.resize(size);
    image
}

/// Spawn a renderer scene (root, camera, lights) and return the root, which
/// carries the `CrystalRenderer` and `CrystalAnimator`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_crystal_renderer(
    commands: &mut Commands,
    die_type: DiceType,
    layer: usize,
    surface: Handle<Image>,
    mesh: Handle<Mesh>,
    textures: CrystalTextures,
    animator: CrystalAnimator,
    clear_color: Color,
) -> Entity {
    let render_layer = RenderLayers::layer(layer);
    let distance = animator.camera_distance;

    let root = commands
        .spawn((
            Transform::default(),
            Visibility::Visible,
            render_layer.clone(),
            Name::new(format!("CrystalRenderer_{}_{}", die_type, layer)),
        ))
        .id();

    let mut camera_id = Entity::PLACEHOLDER;
    commands.entity(root).with_children(|parent| {
        camera_id = parent
            .spawn((
                Camera3d::default(),
                Camera {
                    target: RenderTarget::Image(surface.into()),
                    clear_color: ClearColorConfig::Custom(clear_color),
                    // Render before the UI camera samples the image.
                    order: -(layer as isize),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, distance).looking_at(Vec3::ZERO, Vec3::Y),
                render_layer.clone(),
                CrystalCamera,
                Name::new("CrystalCamera"),
            ))
            .id();

        // Key light
        parent.spawn((
            PointLight {
                intensity: 400_000.0,
                range: 30.0,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_xyz(3.0, 4.0, 4.0),
            render_layer.clone(),
        ));

        // Rim light
        parent.spawn((
            PointLight {
                intensity: 150_000.0,
                color: Color::srgb(0.7, 0.8, 1.0),
                range: 30.0,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_xyz(-4.0, -2.0, -3.0),
            render_layer.clone(),
        ));
    });

    commands.entity(root).insert((
        CrystalRenderer {
            die_type,
            layer,
            camera: camera_id,
            mesh,
            textures,
            status: TextureLoadStatus::Pending,
            die: None,
        },
        animator,
    ));

    root
}

/// Add the die mesh once every texture has loaded. A failed load is logged
/// once and the die stays empty.
pub fn finish_crystal_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<CrystalMaterial>>,
    mut renderers: Query<(Entity, &mut CrystalRenderer, &CrystalAnimator)>,
) {
    for (entity, mut renderer, animator) in renderers.iter_mut() {
        if renderer.status != TextureLoadStatus::Pending {
            continue;
        }

        match renderer.textures.status(&asset_server) {
            TextureLoadStatus::Pending => {}
            TextureLoadStatus::Failed(reason) => {
                error!(
                    "{} on layer {}: texture load failed, die will not be shown: {}",
                    renderer.die_type, renderer.layer, reason
                );
                renderer.status = TextureLoadStatus::Failed(reason);
            }
            TextureLoadStatus::Ready => {
                let material =
                    materials.add(build_crystal_material(renderer.die_type, &renderer.textures));
                let mesh = renderer.mesh.clone();
                let render_layer = RenderLayers::layer(renderer.layer);
                let rotation = animator.orientation();

                let mut die_id = None;
                commands.entity(entity).with_children(|parent| {
                    die_id = Some(
                        parent
                            .spawn((
                                Mesh3d(mesh),
                                MeshMaterial3d(material),
                                Transform::from_rotation(rotation),
                                render_layer,
                                CrystalDie,
                                Name::new("CrystalDie"),
                            ))
                            .id(),
                    );
                });

                renderer.die = die_id;
                renderer.status = TextureLoadStatus::Ready;
                info!(
                    "{} on layer {}: textures loaded, die mesh {:?} added",
                    renderer.die_type, renderer.layer, die_id
                );
            }
        }
    }
}

/// Forward crystal flag edges to the matching renderer's animator.
pub fn forward_crystal_intents(
    mut crystals: Query<&mut Crystal>,
    mut animators: Query<&mut CrystalAnimator>,
) {
    for mut crystal in crystals.iter_mut() {
        let intents = crystal.poll_intents();
        if intents.is_empty() {
            continue;
        }

        let Ok(mut animator) = animators.get_mut(crystal.renderer) else {
            warn!("Crystal points at missing renderer {:?}", crystal.renderer);
            continue;
        };

        for intent in intents {
            let before = animator.state();
            animator.apply(intent);
            debug!(
                "Renderer {:?}: {:?} {:?} -> {:?}",
                crystal.renderer,
                intent,
                before,
                animator.state()
            );
        }
    }
}

/// Advance drag-end reverts by wall-clock time.
pub fn tick_crystal_reverts(time: Res<Time>, mut animators: Query<&mut CrystalAnimator>) {
    let delta = time.delta_secs();
    for mut animator in animators.iter_mut() {
        if animator.pending_reverts() > 0 {
            animator.tick_reverts(delta);
        }
    }
}

/// Per-frame easing; writes the die orientation and camera distance.
pub fn step_crystal_animation(
    mut renderers: Query<(&mut CrystalAnimator, &CrystalRenderer)>,
    mut transforms: Query<&mut Transform, Or<(With<CrystalDie>, With<CrystalCamera>)>>,
) {
    for (mut animator, renderer) in renderers.iter_mut() {
        animator.step();

        if let Some(die) = renderer.die {
            if let Ok(mut transform) = transforms.get_mut(die) {
                transform.rotation = animator.orientation();
            }
        }

        if let Ok(mut transform) = transforms.get_mut(renderer.camera) {
            *transform = Transform::from_xyz(0.0, 0.0, animator.camera_distance)
                .looking_at(Vec3::ZERO, Vec3::Y);
        }
    }
}
