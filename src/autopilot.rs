//! Demo autopilot
//!
//! Plays the game for headless runs: dodge a ball that is about to land on
//! the player, otherwise grab a falling package, otherwise line up under the
//! lowest ball and shoot.

use crate::sim::{Direction, GamePhase, GameState, Rect, TickInput};

/// How close (in player heights) a ball has to be above the player to dodge
const DANGER_HEIGHTS: f32 = 1.5;

fn horizontal_gap(a: &Rect, b: &Rect) -> f32 {
    (a.center().x - b.center().x).abs() - (a.size.x + b.size.x) * 0.5
}

fn steer_towards(from_x: f32, to_x: f32, tolerance: f32) -> Direction {
    if to_x < from_x - tolerance {
        Direction::Left
    } else if to_x > from_x + tolerance {
        Direction::Right
    } else {
        Direction::Stopped
    }
}

/// Choose the input for the next tick
pub fn decide(state: &GameState) -> TickInput {
    if state.phase != GamePhase::Playing || !state.player.alive {
        return TickInput::default();
    }

    let player = &state.player.rect;
    let player_x = player.center().x;
    let field = state.settings.field();

    let threat = state
        .splittables
        .iter()
        .filter(|ball| {
            ball.rect.bottom() > player.top() - player.size.y * DANGER_HEIGHTS
                && horizontal_gap(&ball.rect, player) < player.size.x * 0.5
        })
        .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));

    if let Some(ball) = threat {
        let ball_x = ball.rect.center().x;
        let room_left = player.left() - field.left() > player.size.x;
        let room_right = field.right() - player.right() > player.size.x;
        let direction = match (ball_x >= player_x, room_left, room_right) {
            (true, true, _) | (false, true, false) => Direction::Left,
            _ => Direction::Right,
        };
        return TickInput {
            direction,
            fire: false,
        };
    }

    if let Some(package) = state
        .packages
        .iter()
        .min_by(|a, b| {
            (a.rect.center().x - player_x)
                .abs()
                .total_cmp(&(b.rect.center().x - player_x).abs())
        })
    {
        return TickInput {
            direction: steer_towards(player_x, package.rect.center().x, player.size.x * 0.25),
            fire: false,
        };
    }

    let Some(target) = state
        .splittables
        .iter()
        .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()))
    else {
        return TickInput::default();
    };

    // Lead the target by the time the tether needs to reach it
    let travel = (player.bottom() - target.rect.bottom()).max(0.0)
        / state.settings.projectile_growth.max(1.0);
    let aim_x = (target.rect.center().x + target.velocity.x * travel)
        .clamp(field.left(), field.right());
    let tolerance = target.rect.size.x * 0.25;
    let direction = steer_towards(player_x, aim_x, tolerance);
    TickInput {
        direction,
        fire: direction == Direction::Stopped && state.player.projectile.is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::level::start_level;
    use crate::sim::{BallTier, GameEvent, Splittable, tick};
    use glam::Vec2;

    fn playing_with_ball(center: Vec2) -> GameState {
        let mut state = GameState::new(Settings::default());
        start_level(&mut state);
        let id = state.next_entity_id();
        state.splittables = vec![Splittable::new(
            id,
            BallTier::Large,
            center,
            Vec2::ZERO,
            &state.settings,
        )];
        state
    }

    #[test]
    fn test_idle_outside_play() {
        let state = GameState::new(Settings::default());
        assert_eq!(decide(&state), TickInput::default());
    }

    #[test]
    fn test_fires_when_lined_up() {
        let player_x = GameState::new(Settings::default()).player.rect.center().x;
        let state = playing_with_ball(Vec2::new(player_x, 200.0));
        let input = decide(&state);
        assert_eq!(input.direction, Direction::Stopped);
        assert!(input.fire);
    }

    #[test]
    fn test_moves_under_target() {
        let state = playing_with_ball(Vec2::new(150.0, 200.0));
        let input = decide(&state);
        assert_eq!(input.direction, Direction::Left);
        assert!(!input.fire);
    }

    #[test]
    fn test_dodges_ball_overhead() {
        let player = GameState::new(Settings::default()).player.rect;
        let state = playing_with_ball(Vec2::new(player.center().x + 20.0, player.top() - 60.0));
        let input = decide(&state);
        assert_eq!(input.direction, Direction::Left);
        assert!(!input.fire);
    }

    #[test]
    fn test_hits_falling_ball() {
        let mut state = playing_with_ball(Vec2::new(300.0, 300.0));
        state.drain_events();

        let mut split = false;
        for _ in 0..200 {
            let input = decide(&state);
            tick(&mut state, &input);
            if state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::BallSplit { .. }))
            {
                split = true;
                break;
            }
        }
        assert!(split);
        assert!(state.player.alive);
    }
}
