//! Board settings
//!
//! The board file (JSON) lists the dice tiles, their textures, grid layout
//! and animation tuning. Tile order is never written back.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{CrystalTuning, DiceType};

/// One die tile: geometry key plus texture asset paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSetting {
    pub die: DiceType,
    /// Base color texture (required).
    pub base_color: String,
    /// Alpha mask texture.
    #[serde(default)]
    pub rune: Option<String>,
    /// Environment (reflection) texture.
    #[serde(default)]
    pub image: Option<String>,
}

impl TileSetting {
    pub fn new(die: DiceType, base_color: impl Into<String>) -> Self {
        Self {
            die,
            base_color: base_color.into(),
            rune: None,
            image: None,
        }
    }

    pub fn with_rune(mut self, rune: impl Into<String>) -> Self {
        self.rune = Some(rune.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Everything needed to build the board.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub columns: usize,
    /// Tile edge length in logical pixels; also the render target size.
    pub tile_size: f32,
    pub background_color: String,
    pub tile_color: String,
    pub border_color: String,
    pub hover_border_color: String,
    pub focus_border_color: String,
    pub drag_border_color: String,
    pub drop_border_color: String,
    pub tiles: Vec<TileSetting>,
    pub tuning: CrystalTuning,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            columns: 3,
            tile_size: 220.0,
            background_color: "#0d0d14".to_string(),
            tile_color: "#191926".to_string(),
            border_color: "#2e2e3d".to_string(),
            hover_border_color: "#6b6b8a".to_string(),
            focus_border_color: "#e6e6ff".to_string(),
            drag_border_color: "#26d9ff".to_string(),
            drop_border_color: "#ffb340".to_string(),
            tiles: vec![
                TileSetting::new(DiceType::D4, "textures/crystal_blue.png")
                    .with_rune("textures/rune.png"),
                TileSetting::new(DiceType::D6, "textures/crystal_smoke.png")
                    .with_image("textures/environment.png"),
                TileSetting::new(DiceType::D8, "textures/crystal_purple.png")
                    .with_rune("textures/rune.png")
                    .with_image("textures/environment.png"),
                TileSetting::new(DiceType::D12, "textures/crystal_amber.png"),
                TileSetting::new(DiceType::D20, "textures/crystal_gold.png")
                    .with_rune("textures/rune.png")
                    .with_image("textures/environment.png"),
            ],
            tuning: CrystalTuning::default(),
        }
    }
}

impl BoardSettings {
    pub fn from_json(contents: &str) -> Result<Self, String> {
        let settings: BoardSettings = serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse board settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read board file {}: {}", path.display(), e))?;
        Self::from_json(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize board settings: {}", e))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.columns == 0 {
            return Err("columns must be at least 1".to_string());
        }
        if !(self.tile_size >= 32.0 && self.tile_size <= 2048.0) {
            return Err(format!(
                "tile_size must be between 32 and 2048, got {}",
                self.tile_size
            ));
        }
        for color in [
            &self.background_color,
            &self.tile_color,
            &self.border_color,
            &self.hover_border_color,
            &self.focus_border_color,
            &self.drag_border_color,
            &self.drop_border_color,
        ] {
            parse_css_color(color)?;
        }
        for (i, tile) in self.tiles.iter().enumerate() {
            if tile.base_color.trim().is_empty() {
                return Err(format!("tile {} ({}) has no base_color texture", i, tile.die));
            }
        }
        self.tuning.validate()
    }

    /// Resolved colors; validated settings always parse.
    pub fn palette(&self) -> BoardPalette {
        let color = |s: &str, fallback: Color| parse_css_color(s).unwrap_or(fallback);
        BoardPalette {
            background: color(&self.background_color, Color::BLACK),
            tile: color(&self.tile_color, Color::BLACK),
            border: color(&self.border_color, Color::BLACK),
            hover_border: color(&self.hover_border_color, Color::WHITE),
            focus_border: color(&self.focus_border_color, Color::WHITE),
            drag_border: color(&self.drag_border_color, Color::WHITE),
            drop_border: color(&self.drop_border_color, Color::WHITE),
        }
    }
}

/// Parsed board colors.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BoardPalette {
    pub background: Color,
    pub tile: Color,
    pub border: Color,
    pub hover_border: Color,
    pub focus_border: Color,
    pub drag_border: Color,
    pub drop_border: Color,
}

/// Parse any CSS color string (`#rgb`, `#rrggbbaa`, `rgb(...)`, names).
pub fn parse_css_color(s: &str) -> Result<Color, String> {
    let parsed =
        csscolorparser::parse(s).map_err(|e| format!("Invalid color '{}': {}", s, e))?;
    let [r, g, b, a] = parsed.to_rgba8();
    Ok(Color::srgba_u8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board_is_valid() {
        let settings = BoardSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.tiles.len(), 5);
    }

    #[test]
    fn test_parse_css_color() {
        let color = parse_css_color("#ff0000").unwrap().to_srgba();
        assert!((color.red - 1.0).abs() < 0.01);
        assert!(color.green.abs() < 0.01);
        assert!(parse_css_color("rebeccapurple").is_ok());
        assert!(parse_css_color("not a color").is_err());
    }

    #[test]
    fn test_partial_board_uses_defaults() {
        let settings = BoardSettings::from_json(r#"{ "columns": 2 }"#).unwrap();
        assert_eq!(settings.columns, 2);
        assert_eq!(settings.tile_size, BoardSettings::default().tile_size);
        assert_eq!(settings.tuning, CrystalTuning::default());
    }

    #[test]
    fn test_zero_columns_rejected() {
        let err = BoardSettings::from_json(r#"{ "columns": 0 }"#).unwrap_err();
        assert!(err.contains("columns"));
    }
}
