//! Intent buffering between the input collaborator and the tick
//!
//! Intents can arrive at any moment from another thread. They collapse into
//! one held direction (last writer wins) and one fire request, which fires
//! once and is then cleared.

use std::sync::{Arc, Mutex, PoisonError};

use crate::sim::{Direction, Intent, TickInput};

#[derive(Debug, Default)]
struct Latch {
    direction: Direction,
    fire: bool,
}

/// Shared, cloneable handle to the pending input
#[derive(Debug, Clone, Default)]
pub struct IntentBuffer {
    latch: Arc<Mutex<Latch>>,
}

impl IntentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an intent from the input side
    pub fn push(&self, intent: Intent) {
        let mut latch = self.latch.lock().unwrap_or_else(PoisonError::into_inner);
        match intent {
            Intent::MoveLeft => latch.direction = Direction::Left,
            Intent::MoveRight => latch.direction = Direction::Right,
            Intent::Stop => latch.direction = Direction::Stopped,
            Intent::Fire => latch.fire = true,
        }
    }

    /// Input for the next tick. The direction stays held; fire is consumed.
    pub fn take(&self) -> TickInput {
        let mut latch = self.latch.lock().unwrap_or_else(PoisonError::into_inner);
        TickInput {
            direction: latch.direction,
            fire: std::mem::take(&mut latch.fire),
        }
    }
}
