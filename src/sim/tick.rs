//! Simulation tick
//!
//! One call advances every entity once and evaluates collisions in a fixed
//! order: player intent, player movement, packages, balls, then the level
//! state machine. Sleeping between ticks belongs to the loop controller.

use super::collision::overlaps;
use super::level;
use super::package::{Package, WeaponKind, roll_power_up};
use super::player::{Direction, Intent};
use super::state::{GameEvent, GamePhase, GameState};

/// Input consumed by a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held direction (last writer wins)
    pub direction: Direction,
    /// Fire was requested since the previous tick
    pub fire: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    match state.phase {
        // Input is not processed while messages play
        GamePhase::Preparing => level::advance_preparation(state),
        GamePhase::Playing => {
            play(state, input);
            if let Some(outcome) = level::check_outcome(state) {
                level::resolve_outcome(state, outcome);
            }
        }
        GamePhase::LevelCleared | GamePhase::PlayerDied => {
            let outcome = state.phase;
            level::resolve_outcome(state, outcome);
        }
        GamePhase::GameComplete => {}
    }
}

fn play(state: &mut GameState, input: &TickInput) {
    let field = state.settings.field();

    // 1. Queued intent
    state.player.apply_intent(input.direction.intent());
    if input.fire {
        state.player.apply_intent(Intent::Fire);
    }

    // 2. Player and tether
    state.player.tick(&field);

    // 3. Packages: fall, collect on contact, drop once off the field
    let packages = std::mem::take(&mut state.packages);
    for mut package in packages {
        let on_field = package.tick(&field);

        if overlaps(&state.player.rect, &package.rect) {
            package.on_collected(&mut state.player);
            state.events.push(GameEvent::PackageCollected {
                id: package.id,
                payload: package.payload,
            });
            continue;
        }
        if !on_field {
            log::debug!("Package {} fell off the field", package.id);
            continue;
        }

        // A package in the way spends the tether but stays in play
        state.player.check_projectile_hits(&package.rect);
        state.packages.push(package);
    }

    // 4. Balls: move, tether hit splits, otherwise contact kills.
    // Children join the next tick's scan.
    let balls = std::mem::take(&mut state.splittables);
    let mut survivors = Vec::with_capacity(balls.len() + 2);
    for mut ball in balls {
        ball.tick(&state.settings);

        if state.player.check_projectile_hits(&ball.rect) {
            let children = match ball.split(&state.settings, || state.ids.next()) {
                Ok(children) => children,
                Err(err) => {
                    log::warn!("{}", err);
                    Vec::new()
                }
            };
            log::debug!(
                "Ball {} ({:?}) split into {}",
                ball.id,
                ball.tier,
                children.len()
            );
            state.events.push(GameEvent::BallSplit {
                id: ball.id,
                tier: ball.tier,
                children: children.len(),
            });

            if !children.is_empty() && roll_power_up(&mut state.rng, state.settings.power_up_chance)
            {
                let payload = WeaponKind::random_payload(&mut state.rng);
                let package = Package::new(
                    state.ids.next(),
                    ball.rect.center(),
                    state.settings.package_size,
                    state.settings.package_fall_speed,
                    payload,
                );
                log::debug!("Package {} spawned carrying {}", package.id, payload.as_str());
                state.events.push(GameEvent::PackageSpawned {
                    id: package.id,
                    payload,
                });
                state.packages.push(package);
            }

            survivors.extend(children);
            continue;
        }

        state.player.check_killed_by(&ball.rect);
        survivors.push(ball);
    }
    state.splittables = survivors;
}
