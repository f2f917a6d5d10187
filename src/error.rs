//! Error types for the simulation core and its configuration.
//!
//! Simulation faults never cross the tick boundary: the tick logs a
//! [`SimError`] and clamps or skips instead. [`ConfigError`] is the only
//! error a caller ever sees, returned when loading [`crate::Settings`].

use std::fmt;

use crate::sim::{BallTier, Rect};

/// Invalid-state and boundary-consistency faults detected during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A split would have produced children with a non-positive size.
    InvalidSplit {
        /// Tier of the ball that was hit.
        tier: BallTier,
        /// Size the children would have had.
        child_size: f32,
    },

    /// An entity box was found outside the playfield and was clamped back.
    OutOfBounds {
        /// Which kind of entity drifted.
        entity: &'static str,
        /// Box before clamping.
        rect: Rect,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidSplit { tier, child_size } => write!(
                f,
                "refusing to split {:?} ball: children would be {} px",
                tier, child_size
            ),
            SimError::OutOfBounds { entity, rect } => write!(
                f,
                "{} drifted out of the field at ({}, {}) {}x{}, clamped",
                entity, rect.pos.x, rect.pos.y, rect.size.x, rect.size.y
            ),
        }
    }
}

impl std::error::Error for SimError {}

/// Failure to obtain a usable [`crate::Settings`].
#[derive(Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    Io(std::io::Error),
    /// The settings text is not valid JSON or names an unknown option.
    Parse(serde_json::Error),
    /// A value parsed but is outside its usable range.
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read settings: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse settings: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid setting '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
