//! Squad settings
//!
//! Pushed by the options panel whenever the player changes a value. The whole
//! struct is replaced at once; bots recompute their speed from it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Bot movement speed tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementSpeed {
    #[default]
    Standard,
    Fast,
    #[serde(rename = "Very Fast")]
    VeryFast,
}

impl MovementSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementSpeed::Standard => "Standard",
            MovementSpeed::Fast => "Fast",
            MovementSpeed::VeryFast => "Very Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Some(MovementSpeed::Standard),
            "fast" => Some(MovementSpeed::Fast),
            "very fast" | "very_fast" | "veryfast" => Some(MovementSpeed::VeryFast),
            _ => None,
        }
    }

    /// Multiplier applied to the bot base speed
    pub fn multiplier(&self) -> f32 {
        match self {
            MovementSpeed::Standard => 1.0,
            MovementSpeed::Fast => 1.5,
            MovementSpeed::VeryFast => 2.0,
        }
    }
}

/// Settings supplied by the options panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Scales damage of bot-fired projectiles when they land
    pub damage_multiplier: f32,
    /// Bot movement speed tier
    pub movement_speed: MovementSpeed,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            movement_speed: MovementSpeed::Standard,
        }
    }
}

impl Settings {
    pub fn new(damage_multiplier: f32, movement_speed: MovementSpeed) -> Self {
        Self {
            damage_multiplier,
            movement_speed,
        }
    }

    /// Check the value is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.damage_multiplier.is_finite() || self.damage_multiplier <= 0.0 {
            return Err(SettingsError::InvalidDamageMultiplier(
                self.damage_multiplier,
            ));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

/// Parse a speed label, reporting the label on failure
pub fn parse_movement_speed(label: &str) -> Result<MovementSpeed, SettingsError> {
    MovementSpeed::from_str(label)
        .ok_or_else(|| SettingsError::UnknownMovementSpeed(label.to_string()))
}
