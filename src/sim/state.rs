//! Session state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there are no
//! process-wide counters. The state is serializable for debugging dumps.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level;
use super::package::{Package, WeaponKind};
use super::player::Player;
use super::splittable::{BallTier, Splittable};
use crate::settings::Settings;

/// Current phase of the level/life state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Scripted messages before play; input is ignored
    Preparing,
    /// Balls and player are live
    Playing,
    /// Every ball of the level is gone (transient, resolved in the same tick)
    LevelCleared,
    /// A ball touched the player (transient, resolved in the same tick)
    PlayerDied,
    /// The last level was cleared
    GameComplete,
}

/// Message colours the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageColor {
    Yellow,
    Green,
    Red,
}

/// A timed text message for the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: MessageColor,
    pub duration_ms: u64,
}

impl Message {
    pub fn new(text: impl Into<String>, color: MessageColor, duration_ms: u64) -> Self {
        Self {
            text: text.into(),
            color,
            duration_ms,
        }
    }
}

/// Things that happened during a tick, drained by the loop controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Start showing a message
    Message(Message),
    LevelStarted { level: u32 },
    LevelCleared { level: u32 },
    PlayerDied { level: u32 },
    GameComplete,
    /// A ball was hit and replaced by `children` smaller balls
    BallSplit { id: u32, tier: BallTier, children: usize },
    PackageSpawned { id: u32, payload: WeaponKind },
    PackageCollected { id: u32, payload: WeaponKind },
}

/// Monotonic entity id allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    /// Current level, 1-based
    pub level: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live balls, in insertion order
    pub splittables: Vec<Splittable>,
    /// Falling power-ups, in insertion order
    pub packages: Vec<Package>,
    /// Remaining preparation messages; the front one is on screen
    pub script: VecDeque<Message>,
    /// Ticks left for the message at the front of `script`
    pub script_ticks: u32,
    pub rng: Pcg32,
    pub ids: EntityIds,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session at level 1 in the preparation phase
    pub fn new(settings: Settings) -> Self {
        let mut state = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            player: Player::spawn(&settings),
            settings,
            level: 1,
            phase: GamePhase::Preparing,
            time_ticks: 0,
            splittables: Vec::new(),
            packages: Vec::new(),
            script: VecDeque::new(),
            script_ticks: 0,
            ids: EntityIds::default(),
            events: Vec::new(),
        };

        log::info!("Session started (seed {})", state.settings.seed);
        level::begin_preparation(&mut state, Vec::new());
        state
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next()
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The message currently on screen, if any
    pub fn current_message(&self) -> Option<&Message> {
        if self.phase == GamePhase::Preparing {
            self.script.front()
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::GameComplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_preparing_level_one() {
        let mut state = GameState::new(Settings::default());
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, GamePhase::Preparing);
        assert!(state.splittables.is_empty());
        assert!(state.player.alive);

        let message = state.current_message().unwrap();
        assert_eq!(message.text, "Level 1");

        let events = state.drain_events();
        assert!(matches!(&events[0], GameEvent::Message(m) if m.text == "Level 1"));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(Settings::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(Settings::default());
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, state.level);
        assert_eq!(back.phase, state.phase);
        assert_eq!(back.script.len(), state.script.len());
    }
}
