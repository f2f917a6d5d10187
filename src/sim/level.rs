//! Level/life state machine
//!
//! Preparing -> Playing -> {LevelCleared, PlayerDied} -> Preparing (or
//! GameComplete after the last level). Death replays the same level with a
//! fresh player; a clear moves on to the next one. Either way the weapon goes
//! back to the default and leftover packages are discarded.

use glam::Vec2;

use super::player::{Intent, Player};
use super::splittable::{BallTier, Splittable};
use super::state::{GameEvent, GamePhase, GameState, Message, MessageColor};
use crate::settings::Settings;

/// Large balls a level starts with
pub fn balls_for_level(level: u32) -> usize {
    level.max(1) as usize
}

/// Background image index for a level
pub fn backdrop_for_level(level: u32) -> usize {
    level.saturating_sub(1) as usize
}

/// Starting population for a level: large balls spread evenly across the
/// field near the ceiling, alternating direction, faster on later levels.
pub fn spawn_population(
    settings: &Settings,
    level: u32,
    mut next_id: impl FnMut() -> u32,
) -> Vec<Splittable> {
    let field = settings.field();
    let count = balls_for_level(level);
    let size = settings.tier(BallTier::Large).size;
    let speed = settings.ball_speed_for_level(level);
    let y = field.top() + size * 0.5 + size * 0.4;

    (0..count)
        .map(|i| {
            let x = field.left() + field.inner_width() * (i + 1) as f32 / (count + 1) as f32;
            let dx = if i % 2 == 0 { speed } else { -speed };
            Splittable::new(
                next_id(),
                BallTier::Large,
                Vec2::new(x, y),
                Vec2::new(dx, 0.0),
                settings,
            )
        })
        .collect()
}

/// "Level N", "Get Ready...", countdown, "GOOOOOOO!!!"
pub fn preparation_messages(settings: &Settings, level: u32) -> Vec<Message> {
    let countdown = settings.countdown_step_ms;
    vec![
        Message::new(format!("Level {level}"), MessageColor::Yellow, settings.level_delay_ms),
        Message::new("Get Ready...", MessageColor::Green, settings.ready_delay_ms),
        Message::new("3", MessageColor::Green, countdown),
        Message::new("2", MessageColor::Green, countdown),
        Message::new("1", MessageColor::Green, countdown),
        Message::new("GOOOOOOO!!!", MessageColor::Green, countdown),
    ]
}

/// Enter the preparation phase for the current level, showing `prelude`
/// before the usual countdown.
pub fn begin_preparation(state: &mut GameState, prelude: Vec<Message>) {
    state.phase = GamePhase::Preparing;
    state.player.apply_intent(Intent::Stop);
    state.script = prelude
        .into_iter()
        .chain(preparation_messages(&state.settings, state.level))
        .collect();
    show_front_message(state);
}

fn show_front_message(state: &mut GameState) {
    match state.script.front() {
        Some(message) => {
            state.script_ticks = state.settings.ticks_for(message.duration_ms);
            state.events.push(GameEvent::Message(message.clone()));
        }
        None => state.script_ticks = 0,
    }
}

/// Count down the message on screen; start the level when the script ends
pub fn advance_preparation(state: &mut GameState) {
    state.script_ticks = state.script_ticks.saturating_sub(1);
    if state.script_ticks > 0 {
        return;
    }

    state.script.pop_front();
    if state.script.is_empty() {
        start_level(state);
    } else {
        show_front_message(state);
    }
}

/// Populate the level and hand control to the player
pub fn start_level(state: &mut GameState) {
    state.splittables = spawn_population(&state.settings, state.level, || state.ids.next());
    state.phase = GamePhase::Playing;
    log::info!(
        "Level {} started with {} balls",
        state.level,
        state.splittables.len()
    );
    state.events.push(GameEvent::LevelStarted { level: state.level });
}

/// Terminal condition reached during play, if any. Death wins over a clear.
pub fn check_outcome(state: &GameState) -> Option<GamePhase> {
    if state.phase != GamePhase::Playing {
        return None;
    }
    if !state.player.alive {
        Some(GamePhase::PlayerDied)
    } else if state.splittables.is_empty() {
        Some(GamePhase::LevelCleared)
    } else {
        None
    }
}

/// Apply a terminal outcome and move on to the next phase
pub fn resolve_outcome(state: &mut GameState, outcome: GamePhase) {
    state.phase = outcome;
    state.packages.clear();
    state.player.retract();
    state.player.set_weapon_type(Default::default());

    match outcome {
        GamePhase::PlayerDied => {
            log::info!("Player died on level {}", state.level);
            state.events.push(GameEvent::PlayerDied { level: state.level });
            state.splittables.clear();
            state.player = Player::spawn(&state.settings);

            let death = Message::new("You died!!", MessageColor::Red, state.settings.death_delay_ms);
            begin_preparation(state, vec![death]);
        }
        GamePhase::LevelCleared => {
            let cleared = state.level;
            log::info!("Level {} cleared", cleared);
            state.events.push(GameEvent::LevelCleared { level: cleared });
            let banner = Message::new(
                format!("Level {cleared} Complete!!!"),
                MessageColor::Yellow,
                state.settings.level_delay_ms,
            );

            if cleared >= state.settings.max_level {
                complete_game(state, banner);
            } else {
                state.level = cleared + 1;
                begin_preparation(state, vec![banner]);
            }
        }
        GamePhase::Preparing | GamePhase::Playing | GamePhase::GameComplete => {
            log::warn!("Ignoring non-terminal outcome {:?}", outcome);
        }
    }
}

fn complete_game(state: &mut GameState, banner: Message) {
    log::info!("All {} levels cleared", state.level);
    state.phase = GamePhase::GameComplete;
    state.script.clear();
    state.script_ticks = 0;
    state.events.push(GameEvent::Message(banner));
    state.events.push(GameEvent::Message(Message::new(
        "You win!!!",
        MessageColor::Yellow,
        state.settings.death_delay_ms,
    )));
    state.events.push(GameEvent::GameComplete);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::package::{Package, WeaponKind};

    fn playing_state() -> GameState {
        let mut state = GameState::new(Settings::default());
        start_level(&mut state);
        state.drain_events();
        state
    }

    #[test]
    fn test_population_scales_with_level() {
        let settings = Settings::default();
        let mut next = 0;
        let mut ids = || {
            next += 1;
            next
        };
        let one = spawn_population(&settings, 1, &mut ids);
        let three = spawn_population(&settings, 3, &mut ids);
        assert_eq!(one.len(), 1);
        assert_eq!(three.len(), 3);
        assert!(three.iter().all(|b| b.tier == BallTier::Large));
        assert!(three[0].velocity.x.abs() > one[0].velocity.x.abs());
        assert!(three[0].velocity.x > 0.0 && three[1].velocity.x < 0.0);

        let field = settings.field();
        assert!(three.iter().all(|b| field.contains(&b.rect)));
    }

    #[test]
    fn test_preparation_runs_script_then_plays() {
        let mut state = GameState::new(Settings::default());
        let total_ticks: u32 = state
            .script
            .iter()
            .map(|m| state.settings.ticks_for(m.duration_ms))
            .sum();
        // 500 + 2000 + 4 * 1000 ms at 10 ms per tick
        assert_eq!(total_ticks, 650);

        for _ in 0..total_ticks - 1 {
            advance_preparation(&mut state);
            assert_eq!(state.phase, GamePhase::Preparing);
        }
        advance_preparation(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.splittables.len(), balls_for_level(1));

        let texts: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Message(m) => Some(m.text),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["Level 1", "Get Ready...", "3", "2", "1", "GOOOOOOO!!!"]);
    }

    #[test]
    fn test_empty_field_clears_level() {
        let mut state = playing_state();
        state.splittables.clear();

        let outcome = check_outcome(&state);
        assert_eq!(outcome, Some(GamePhase::LevelCleared));

        resolve_outcome(&mut state, GamePhase::LevelCleared);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Preparing);
        assert_eq!(state.current_message().unwrap().text, "Level 1 Complete!!!");
        assert!(state.drain_events().contains(&GameEvent::LevelCleared { level: 1 }));
    }

    #[test]
    fn test_death_replays_same_level() {
        let mut state = playing_state();
        let pkg_id = state.next_entity_id();
        state
            .packages
            .push(Package::new(pkg_id, Vec2::new(100.0, 100.0), 40.0, 3.0, WeaponKind::Laser));
        state.player.set_weapon_type(WeaponKind::Harpoon);
        state.player.rect.pos.x = 30.0;
        state.player.alive = false;

        // Death wins even with an empty field
        state.splittables.clear();
        let outcome = check_outcome(&state);
        assert_eq!(outcome, Some(GamePhase::PlayerDied));

        resolve_outcome(&mut state, GamePhase::PlayerDied);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, GamePhase::Preparing);
        assert!(state.splittables.is_empty());
        assert!(state.packages.is_empty());
        assert!(state.player.alive);
        assert!(state.player.projectile.is_none());
        assert_eq!(state.player.weapon, WeaponKind::Rope);
        assert_eq!(state.player, Player::spawn(&state.settings));

        let message = state.current_message().unwrap();
        assert_eq!(message.text, "You died!!");
        assert_eq!(message.color, MessageColor::Red);
    }

    #[test]
    fn test_clearing_last_level_completes_game() {
        let mut state = playing_state();
        state.level = state.settings.max_level;
        state.splittables.clear();

        resolve_outcome(&mut state, GamePhase::LevelCleared);
        assert_eq!(state.phase, GamePhase::GameComplete);
        assert_eq!(state.level, state.settings.max_level);
        assert!(state.drain_events().contains(&GameEvent::GameComplete));
        assert_eq!(check_outcome(&state), None);
    }

    #[test]
    fn test_no_outcome_while_balls_remain() {
        let state = playing_state();
        assert_eq!(check_outcome(&state), None);
    }
}
