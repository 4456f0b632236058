//! Error types for the settings boundary
//!
//! The simulation core itself has no failure paths; only values arriving from
//! outside (the options panel, a settings file) can be rejected.

use thiserror::Error;

/// Errors raised while loading or validating [`crate::Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Damage multiplier must be a positive, finite number.
    #[error("Invalid damage multiplier: {0}")]
    InvalidDamageMultiplier(f32),

    /// Movement speed label not one of Standard / Fast / Very Fast.
    #[error("Unknown movement speed: {0}")]
    UnknownMovementSpeed(String),

    /// Settings JSON could not be parsed.
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings file could not be read.
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}
