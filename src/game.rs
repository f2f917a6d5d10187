//! Real-time loop controller
//!
//! Drives the simulation at a fixed tick delay, feeding it buffered intents
//! (or the autopilot) and forwarding messages and frames to the renderer.

use std::time::{Duration, Instant};

use crate::autopilot;
use crate::input::IntentBuffer;
use crate::render::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};

/// Owns one session and the collaborators around it
pub struct GameLoop<R: Renderer> {
    state: GameState,
    input: IntentBuffer,
    renderer: R,
    autopilot: bool,
}

impl<R: Renderer> GameLoop<R> {
    pub fn new(settings: Settings, renderer: R) -> Self {
        Self {
            state: GameState::new(settings),
            input: IntentBuffer::new(),
            renderer,
            autopilot: false,
        }
    }

    /// Let the demo autopilot play instead of the intent buffer
    pub fn with_autopilot(mut self, enabled: bool) -> Self {
        self.autopilot = enabled;
        self
    }

    /// Handle for the input collaborator to push intents into
    pub fn input(&self) -> IntentBuffer {
        self.input.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Advance one tick and present the result
    pub fn step(&mut self) {
        let buffered = self.input.take();
        let input = if self.autopilot {
            autopilot::decide(&self.state)
        } else {
            buffered
        };

        tick(&mut self.state, &input);

        for event in self.state.drain_events() {
            match event {
                GameEvent::Message(message) => self.renderer.show_message(&message),
                other => log::debug!("tick {}: {:?}", self.state.time_ticks, other),
            }
        }
        self.renderer.draw(&Frame::from_state(&self.state));
    }

    /// Run until the game is complete or `max_ticks` have passed. With
    /// `realtime` set, each tick is paced to the configured tick delay.
    /// Returns the number of ticks run.
    pub fn run(&mut self, max_ticks: Option<u64>, realtime: bool) -> u64 {
        let delay = Duration::from_millis(self.state.settings.tick_delay_ms);
        let mut deadline = Instant::now();
        let mut ticks = 0;

        while !self.state.is_complete() && max_ticks.is_none_or(|max| ticks < max) {
            self.step();
            ticks += 1;

            if realtime {
                deadline += delay;
                let now = Instant::now();
                if deadline > now {
                    std::thread::sleep(deadline - now);
                } else {
                    // Fell behind; don't try to catch up
                    deadline = now;
                }
            }
        }

        log::info!(
            "Stopped after {} ticks on level {} ({:?})",
            ticks,
            self.state.level,
            self.state.phase
        );
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::start_level;
    use crate::sim::{GamePhase, Intent, Message};

    #[derive(Default)]
    struct RecordingRenderer {
        messages: Vec<String>,
        frames: Vec<Frame>,
    }

    impl Renderer for RecordingRenderer {
        fn show_message(&mut self, message: &Message) {
            self.messages.push(message.text.clone());
        }

        fn draw(&mut self, frame: &Frame) {
            self.frames.push(frame.clone());
        }
    }

    fn new_loop() -> GameLoop<RecordingRenderer> {
        GameLoop::new(Settings::default(), RecordingRenderer::default())
    }

    #[test]
    fn test_step_draws_every_tick() {
        let mut game = new_loop();
        let ticks = game.run(Some(25), false);
        assert_eq!(ticks, 25);
        assert_eq!(game.renderer().frames.len(), 25);
        assert_eq!(game.renderer().frames.last().unwrap().tick, 25);
    }

    #[test]
    fn test_preparation_messages_reach_renderer() {
        let mut game = new_loop();
        // The opening message was raised before the loop existed
        game.state_mut().drain_events();
        game.run(Some(650), false);

        assert_eq!(game.state().phase, GamePhase::Playing);
        assert_eq!(
            game.renderer().messages,
            ["Get Ready...", "3", "2", "1", "GOOOOOOO!!!"]
        );
    }

    #[test]
    fn test_buffered_intents_drive_player() {
        let mut game = new_loop();
        start_level(game.state_mut());
        let x = game.state().player.rect.left();

        let input = game.input();
        input.push(Intent::MoveRight);
        input.push(Intent::Fire);
        game.step();

        assert!(game.state().player.rect.left() > x);
        assert!(game.state().player.projectile.is_some());
    }

    #[test]
    fn test_run_stops_when_complete() {
        let mut game = new_loop();
        game.state_mut().phase = GamePhase::GameComplete;
        assert_eq!(game.run(Some(100), false), 0);
        assert_eq!(game.run(None, false), 0);
    }

    #[test]
    fn test_autopilot_plays() {
        let mut game = new_loop().with_autopilot(true);
        game.run(Some(1_000), false);
        assert!(
            game.renderer()
                .frames
                .iter()
                .any(|f| f.phase == GamePhase::Playing)
        );
        assert_eq!(game.into_state().time_ticks, 1_000);
    }
}
