//! Dice-related types
//!
//! This module contains the `DiceType` key used to pick a shared geometry,
//! a default tint and the per-die display name.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// All supported dice types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DiceType {
    D4,
    D6,
    D8,
    D12,
    D20,
}

impl DiceType {
    pub const ALL: [DiceType; 5] = [
        DiceType::D4,
        DiceType::D6,
        DiceType::D8,
        DiceType::D12,
        DiceType::D20,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DiceType::D4 => "D4",
            DiceType::D6 => "D6",
            DiceType::D8 => "D8",
            DiceType::D12 => "D12",
            DiceType::D20 => "D20",
        }
    }

    /// Lowercase key used in board files (`d4`, `d20`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            DiceType::D4 => "d4",
            DiceType::D6 => "d6",
            DiceType::D8 => "d8",
            DiceType::D12 => "d12",
            DiceType::D20 => "d20",
        }
    }

    /// Tint multiplied over the base color texture.
    pub fn tint(&self) -> Color {
        // Slightly translucent crystal-like colors
        match self {
            DiceType::D4 => Color::srgba(0.75, 0.85, 1.0, 0.92),
            DiceType::D6 => Color::srgba(0.85, 0.85, 0.9, 0.95),
            DiceType::D8 => Color::srgba(0.9, 0.8, 1.0, 0.92),
            DiceType::D12 => Color::srgba(1.0, 0.9, 0.8, 0.92),
            DiceType::D20 => Color::srgba(1.0, 0.97, 0.85, 0.92),
        }
    }

    pub fn parse(s: &str) -> Option<DiceType> {
        match s.trim().to_lowercase().as_str() {
            "d4" => Some(DiceType::D4),
            "d6" => Some(DiceType::D6),
            "d8" => Some(DiceType::D8),
            "d12" => Some(DiceType::D12),
            "d20" => Some(DiceType::D20),
            _ => None,
        }
    }
}

impl TryFrom<String> for DiceType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DiceType::parse(&value).ok_or_else(|| {
            format!(
                "Unknown die type: {}. Valid: d4, d6, d8, d12, d20",
                value
            )
        })
    }
}

impl From<DiceType> for String {
    fn from(value: DiceType) -> Self {
        value.key().to_string()
    }
}

impl std::fmt::Display for DiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
