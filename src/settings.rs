//! Field configuration
//!
//! Every gameplay constant the core consumes lives here so the simulation
//! never hardcodes them. Settings load from JSON; missing keys fall back to
//! the defaults in [`crate::consts`], unknown keys are rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{BallTier, Field};

/// Size and bounce behaviour of one ball tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierSettings {
    /// Edge length of the ball's square box
    pub size: f32,
    /// Upward speed the ball leaves the floor with (px/tick)
    pub rebound_speed: f32,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    pub padding: f32,

    // === Timing ===
    /// Sleep between ticks
    pub tick_delay_ms: u64,
    /// Level banner duration
    pub level_delay_ms: u64,
    pub death_delay_ms: u64,
    pub ready_delay_ms: u64,
    pub countdown_step_ms: u64,

    // === Power-ups ===
    /// Denominator of the per-split package drop chance
    pub power_up_chance: u32,
    pub package_size: f32,
    pub package_fall_speed: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub projectile_growth: f32,
    pub projectile_width: f32,

    // === Balls ===
    pub ball_large: TierSettings,
    pub ball_medium: TierSettings,
    pub ball_small: TierSettings,
    pub ball_base_speed: f32,
    pub ball_speed_per_level: f32,
    pub gravity: f32,

    // === Session ===
    pub max_level: u32,
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            padding: PADDING,

            tick_delay_ms: TICK_DELAY_MS,
            level_delay_ms: LEVEL_DELAY_MS,
            death_delay_ms: DEATH_DELAY_MS,
            ready_delay_ms: READY_DELAY_MS,
            countdown_step_ms: COUNTDOWN_STEP_MS,

            power_up_chance: CHANCE_FOR_POWER_UP,
            package_size: PACKAGE_SIZE,
            package_fall_speed: PACKAGE_FALL_SPEED,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            projectile_growth: PROJECTILE_GROWTH_SPEED,
            projectile_width: PROJECTILE_WIDTH,

            ball_large: TierSettings {
                size: BALL_LARGE_SIZE,
                rebound_speed: BALL_LARGE_REBOUND,
            },
            ball_medium: TierSettings {
                size: BALL_MEDIUM_SIZE,
                rebound_speed: BALL_MEDIUM_REBOUND,
            },
            ball_small: TierSettings {
                size: BALL_MIN_SIZE,
                rebound_speed: BALL_SMALL_REBOUND,
            },
            ball_base_speed: BALL_BASE_SPEED,
            ball_speed_per_level: BALL_SPEED_PER_LEVEL,
            gravity: GRAVITY,

            max_level: MAX_LEVEL,
            seed: 0,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check that every value is inside its usable range
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.padding < 0.0 {
            return Err(invalid("padding", "must not be negative"));
        }
        let inner_width = self.field_width - 2.0 * self.padding;
        let inner_height = self.field_height - 2.0 * self.padding;
        if inner_width < self.player_width {
            return Err(invalid("field_width", "player does not fit between the walls"));
        }
        if inner_height < self.player_height + self.ball_large.size {
            return Err(invalid("field_height", "no room for a large ball above the player"));
        }
        if self.tick_delay_ms == 0 {
            return Err(invalid("tick_delay_ms", "must be at least 1"));
        }
        if self.power_up_chance == 0 {
            return Err(invalid("power_up_chance", "must be at least 1"));
        }
        if self.max_level == 0 {
            return Err(invalid("max_level", "must be at least 1"));
        }
        if self.player_speed <= 0.0 || self.projectile_growth <= 0.0 {
            return Err(invalid("player_speed", "player and tether speeds must be positive"));
        }
        if self.package_size <= 0.0 || self.package_fall_speed <= 0.0 {
            return Err(invalid("package_size", "package size and fall speed must be positive"));
        }

        let tiers = [
            ("ball_small", self.ball_small),
            ("ball_medium", self.ball_medium),
            ("ball_large", self.ball_large),
        ];
        for (name, tier) in tiers {
            if tier.size <= 0.0 {
                return Err(invalid(name, "size must be positive"));
            }
            if tier.rebound_speed <= 0.0 {
                return Err(invalid(name, "rebound speed must be positive"));
            }
        }
        if self.ball_medium.size >= self.ball_large.size
            || self.ball_small.size >= self.ball_medium.size
        {
            return Err(invalid("ball_medium", "tiers must shrink from large to small"));
        }

        Ok(())
    }

    /// Playfield bounds
    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height, self.padding)
    }

    /// Settings of one ball tier
    pub fn tier(&self, tier: BallTier) -> &TierSettings {
        match tier {
            BallTier::Large => &self.ball_large,
            BallTier::Medium => &self.ball_medium,
            BallTier::Small => &self.ball_small,
        }
    }

    /// Number of ticks covering a wall-clock duration (at least one)
    pub fn ticks_for(&self, duration_ms: u64) -> u32 {
        duration_ms.div_ceil(self.tick_delay_ms).max(1) as u32
    }

    /// Horizontal ball speed on a given level
    pub fn ball_speed_for_level(&self, level: u32) -> f32 {
        self.ball_base_speed + self.ball_speed_per_level * level.saturating_sub(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "power_up_chance": 4, "seed": 7 }"#).unwrap();
        assert_eq!(settings.power_up_chance, 4);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.field_width, FIELD_WIDTH);
        assert_eq!(settings.ball_small.size, BALL_MIN_SIZE);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = Settings::from_json(r#"{ "lives": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_tiers_must_shrink() {
        let json = r#"{ "ball_medium": { "size": 120.0, "rebound_speed": 9.0 } }"#;
        let err = Settings::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "ball_medium", .. }));
    }

    #[test]
    fn test_zero_chance_rejected() {
        let err = Settings::from_json(r#"{ "power_up_chance": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "power_up_chance", .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/pang-settings.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_ticks_for_rounds_up() {
        let settings = Settings::default();
        assert_eq!(settings.ticks_for(500), 50);
        assert_eq!(settings.ticks_for(5), 1);
        assert_eq!(settings.ticks_for(0), 1);
    }

    #[test]
    fn test_ball_speed_scales_with_level() {
        let settings = Settings::default();
        assert_eq!(settings.ball_speed_for_level(1), BALL_BASE_SPEED);
        assert!(settings.ball_speed_for_level(3) > settings.ball_speed_for_level(2));
    }
}
