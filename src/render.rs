//! Render collaborator boundary
//!
//! The simulation never draws. Each tick the loop builds a [`Frame`], a flat
//! snapshot of what is visible, and hands it to a [`Renderer`] together with
//! any messages raised by the tick.

use std::fmt;

use crate::sim::level::backdrop_for_level;
use crate::sim::{BallTier, GamePhase, GameState, Message, Rect, WeaponKind};

/// Which sprite an entity is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualTag {
    Player,
    Projectile(WeaponKind),
    Ball(BallTier),
    Package(WeaponKind),
}

/// One entity to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    /// Entity id; the player and its projectile use 0
    pub id: u32,
    pub tag: VisualTag,
    pub rect: Rect,
}

/// Visible state after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub level: u32,
    pub phase: GamePhase,
    pub backdrop: usize,
    /// Draw order: balls, packages, projectile, player
    pub items: Vec<DrawItem>,
    pub status: StatusLine,
}

/// Text shown along the bottom of the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusLine {
    pub level: u32,
    pub weapon: WeaponKind,
    pub balls: usize,
    pub phase: GamePhase,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level {} | Weapon {} | Balls {} | {:?}",
            self.level,
            self.weapon.as_str(),
            self.balls,
            self.phase
        )
    }
}

impl Frame {
    pub fn from_state(state: &GameState) -> Self {
        let mut items = Vec::with_capacity(state.splittables.len() + state.packages.len() + 2);

        items.extend(state.splittables.iter().map(|ball| DrawItem {
            id: ball.id,
            tag: VisualTag::Ball(ball.tier),
            rect: ball.rect,
        }));
        items.extend(state.packages.iter().map(|package| DrawItem {
            id: package.id,
            tag: VisualTag::Package(package.payload),
            rect: package.rect,
        }));
        if let Some(projectile) = &state.player.projectile {
            items.push(DrawItem {
                id: 0,
                tag: VisualTag::Projectile(projectile.kind),
                rect: projectile.bounds(),
            });
        }
        if state.player.alive {
            items.push(DrawItem {
                id: 0,
                tag: VisualTag::Player,
                rect: state.player.rect,
            });
        }

        Self {
            tick: state.time_ticks,
            level: state.level,
            phase: state.phase,
            backdrop: backdrop_for_level(state.level),
            items,
            status: StatusLine {
                level: state.level,
                weapon: state.player.weapon,
                balls: state.splittables.len(),
                phase: state.phase,
            },
        }
    }

    pub fn count(&self, pred: impl Fn(&VisualTag) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.tag)).count()
    }
}

/// Anything that can present frames and messages
pub trait Renderer {
    fn show_message(&mut self, message: &Message);
    fn draw(&mut self, frame: &Frame);
}

/// Headless renderer that writes to the log
///
/// Messages go out at info; frames at trace, with the status line repeated at
/// debug every `status_every` ticks.
#[derive(Debug, Clone)]
pub struct LogRenderer {
    status_every: u64,
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self { status_every: 100 }
    }
}

impl LogRenderer {
    pub fn new(status_every: u64) -> Self {
        Self {
            status_every: status_every.max(1),
        }
    }
}

impl Renderer for LogRenderer {
    fn show_message(&mut self, message: &Message) {
        log::info!(
            "[{:?}] {} ({} ms)",
            message.color,
            message.text,
            message.duration_ms
        );
    }

    fn draw(&mut self, frame: &Frame) {
        if frame.tick % self.status_every == 0 {
            log::debug!("tick {}: {}", frame.tick, frame.status);
        }
        log::trace!(
            "tick {} backdrop {}: {} items",
            frame.tick,
            frame.backdrop,
            frame.items.len()
        );
    }
}
