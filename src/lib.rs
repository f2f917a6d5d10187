//! Pang - simulation core for a ball-splitting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, level state machine)
//! - `settings`: Field configuration with recognized options
//! - `input`: Intent buffering between the input collaborator and the tick
//! - `render`: Renderer collaborator interface
//! - `game`: Real-time loop controller driving the simulation
//! - `autopilot`: Demo player used by headless runs

pub mod autopilot;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use game::GameLoop;
pub use input::IntentBuffer;
pub use render::{Frame, LogRenderer, Renderer};
pub use settings::{Settings, TierSettings};

/// Default tuning values, in field pixels and milliseconds
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 800.0;
    /// Inset of the playable area from every field edge
    pub const PADDING: f32 = 10.0;

    /// Wall-clock interval between ticks
    pub const TICK_DELAY_MS: u64 = 10;
    /// "Level N" / "Level N Complete" banner duration
    pub const LEVEL_DELAY_MS: u64 = 500;
    pub const DEATH_DELAY_MS: u64 = 3000;
    pub const READY_DELAY_MS: u64 = 2000;
    pub const COUNTDOWN_STEP_MS: u64 = 1000;

    /// A package drops on 1 in this many splits
    pub const CHANCE_FOR_POWER_UP: u32 = 10;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 96.0;
    pub const PLAYER_HEIGHT: f32 = 96.0;
    pub const PLAYER_SPEED: f32 = 10.0;

    /// Tether weapon
    pub const PROJECTILE_GROWTH_SPEED: f32 = 10.0;
    pub const PROJECTILE_WIDTH: f32 = 10.0;

    /// Ball sizes per tier; each tier is twice the next smaller one
    pub const BALL_MIN_SIZE: f32 = 25.0;
    pub const BALL_MEDIUM_SIZE: f32 = BALL_MIN_SIZE * 2.0;
    pub const BALL_LARGE_SIZE: f32 = BALL_MEDIUM_SIZE * 2.0;
    /// Upward speed a ball leaves the floor with (px/tick)
    pub const BALL_LARGE_REBOUND: f32 = 11.0;
    pub const BALL_MEDIUM_REBOUND: f32 = 9.5;
    pub const BALL_SMALL_REBOUND: f32 = 8.0;
    /// Horizontal ball speed on level 1 and the increase per level (px/tick)
    pub const BALL_BASE_SPEED: f32 = 2.0;
    pub const BALL_SPEED_PER_LEVEL: f32 = 0.5;
    /// Downward acceleration applied to balls (px/tick²)
    pub const GRAVITY: f32 = 0.15;

    /// Power-up package
    pub const PACKAGE_SIZE: f32 = 40.0;
    pub const PACKAGE_FALL_SPEED: f32 = 3.0;

    /// Number of built-in levels
    pub const MAX_LEVEL: u32 = 3;
}
