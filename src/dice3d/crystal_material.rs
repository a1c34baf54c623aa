//! Crystal die material: `StandardMaterial` extended with a rune alpha mask
//! and an equirectangular environment reflection.

use bevy::asset::LoadState;
use bevy::pbr::{ExtendedMaterial, MaterialExtension};
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;

use crate::dice3d::types::{DiceType, TextureLoadStatus, TileSetting};

pub const CRYSTAL_SHADER: &str = "shaders/crystal.wgsl";

/// `CrystalParams::flags` bit: rune mask bound.
pub const CRYSTAL_FLAG_RUNE: u32 = 1;
/// `CrystalParams::flags` bit: environment texture bound.
pub const CRYSTAL_FLAG_ENVIRONMENT: u32 = 2;

/// The extension applied to `StandardMaterial` for crystal dice.
#[derive(Asset, AsBindGroup, Reflect, Debug, Clone, Default)]
pub struct CrystalMaterialExtension {
    /// We start at binding slot 100 to avoid conflicts with `StandardMaterial`.
    #[uniform(100)]
    pub params: CrystalParams,
    #[texture(101)]
    #[sampler(102)]
    pub rune: Option<Handle<Image>>,
    #[texture(103)]
    #[sampler(104)]
    pub environment: Option<Handle<Image>>,
}

impl MaterialExtension for CrystalMaterialExtension {
    fn fragment_shader() -> ShaderRef {
        CRYSTAL_SHADER.into()
    }

    fn deferred_fragment_shader() -> ShaderRef {
        CRYSTAL_SHADER.into()
    }
}

/// GPU parameters for the crystal extension.
#[derive(Clone, Copy, Debug, Default, ShaderType, Reflect)]
pub struct CrystalParams {
    pub flags: u32,
    /// Scale applied to the reflected environment color.
    pub environment_strength: f32,
    /// Padding for alignment.
    pub _pad: Vec2,
}

pub type CrystalMaterial = ExtendedMaterial<StandardMaterial, CrystalMaterialExtension>;

/// Texture handles requested for one die.
#[derive(Debug, Clone)]
pub struct CrystalTextures {
    pub base_color: Handle<Image>,
    pub rune: Option<Handle<Image>>,
    pub image: Option<Handle<Image>>,
}

impl CrystalTextures {
    /// Kick off the loads; the asset server resolves them in the background.
    pub fn load(asset_server: &AssetServer, tile: &TileSetting) -> Self {
        Self {
            base_color: asset_server.load(tile.base_color.clone()),
            rune: tile.rune.clone().map(|path| asset_server.load(path)),
            image: tile.image.clone().map(|path| asset_server.load(path)),
        }
    }

    pub fn handles(&self) -> impl Iterator<Item = &Handle<Image>> {
        std::iter::once(&self.base_color)
            .chain(self.rune.iter())
            .chain(self.image.iter())
    }

    pub fn status(&self, asset_server: &AssetServer) -> TextureLoadStatus {
        TextureLoadStatus::combine(self.handles().map(|handle| {
            match asset_server.load_state(handle.id()) {
                LoadState::Loaded => TextureLoadStatus::Ready,
                LoadState::Failed(err) => TextureLoadStatus::Failed(format!(
                    "{}: {}",
                    handle
                        .path()
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "<unnamed>".to_string()),
                    err
                )),
                _ => TextureLoadStatus::Pending,
            }
        }))
    }

    pub fn flags(&self) -> u32 {
        let mut flags = 0;
        if self.rune.is_some() {
            flags |= CRYSTAL_FLAG_RUNE;
        }
        if self.image.is_some() {
            flags |= CRYSTAL_FLAG_ENVIRONMENT;
        }
        flags
    }
}

/// Build the material once every texture is available.
pub fn build_crystal_material(die_type: DiceType, textures: &CrystalTextures) -> CrystalMaterial {
    // The rune mask carves alpha, so it needs blending.
    let alpha_mode = if textures.rune.is_some() {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    };

    ExtendedMaterial {
        base: StandardMaterial {
            base_color: die_type.tint(),
            base_color_texture: Some(textures.base_color.clone()),
            alpha_mode,
            perceptual_roughness: 0.25,
            metallic: 0.1,
            reflectance: 0.6,
            double_sided: textures.rune.is_some(),
            cull_mode: if textures.rune.is_some() {
                None
            } else {
                Some(bevy::render::render_resource::Face::Back)
            },
            ..default()
        },
        extension: CrystalMaterialExtension {
            params: CrystalParams {
                flags: textures.flags(),
                environment_strength: 0.6,
                _pad: Vec2::ZERO,
            },
            rune: textures.rune.clone(),
            environment: textures.image.clone(),
        },
    }
}
