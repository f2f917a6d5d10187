//! The player character
//!
//! Walks along the floor, fires the tether, and dies on contact with a ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::overlaps;
use super::geometry::{Field, Rect};
use super::package::WeaponKind;
use super::projectile::Projectile;
use crate::settings::Settings;

/// Player intents produced by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Stop,
    Fire,
}

/// Held horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    #[default]
    Stopped,
}

impl Direction {
    /// The movement intent that holds this direction
    pub fn intent(self) -> Intent {
        match self {
            Direction::Left => Intent::MoveLeft,
            Direction::Right => Intent::MoveRight,
            Direction::Stopped => Intent::Stop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal velocity (px/tick)
    pub velocity: f32,
    pub alive: bool,
    pub weapon: WeaponKind,
    pub projectile: Option<Projectile>,
    speed: f32,
    tether_width: f32,
    tether_growth: f32,
}

impl Player {
    /// A fresh player standing on the floor in the middle of the field
    pub fn spawn(settings: &Settings) -> Self {
        let field = settings.field();
        let size = Vec2::new(settings.player_width, settings.player_height);
        let pos = Vec2::new(
            field.left() + (field.inner_width() - size.x) * 0.5,
            field.floor() - size.y,
        );
        Self {
            rect: Rect::new(pos, size),
            velocity: 0.0,
            alive: true,
            weapon: WeaponKind::default(),
            projectile: None,
            speed: settings.player_speed,
            tether_width: settings.projectile_width,
            tether_growth: settings.projectile_growth,
        }
    }

    /// Update velocity or fire. Dead players ignore everything.
    pub fn apply_intent(&mut self, intent: Intent) {
        if !self.alive {
            return;
        }
        match intent {
            Intent::MoveLeft => self.velocity = -self.speed,
            Intent::MoveRight => self.velocity = self.speed,
            Intent::Stop => self.velocity = 0.0,
            Intent::Fire => {
                if self.projectile.is_none() {
                    let anchor = self.rect.center().x;
                    log::debug!("Tether fired at x={anchor}");
                    self.projectile = Some(Projectile::fire(
                        anchor,
                        self.rect.bottom(),
                        self.tether_width,
                        self.weapon,
                    ));
                }
            }
        }
    }

    /// Move, then advance the tether
    pub fn tick(&mut self, field: &Field) {
        if !self.alive {
            return;
        }

        // Never step past a wall
        let min_dx = field.left() - self.rect.left();
        let max_dx = field.right() - self.rect.right();
        let dx = self.velocity.clamp(min_dx.min(0.0), max_dx.max(0.0));
        self.rect.translate(Vec2::new(dx, 0.0));

        let spent = self.projectile.as_ref().is_some_and(|p| p.at_ceiling(field));
        if spent {
            log::debug!("Tether reached the ceiling");
            self.projectile = None;
        } else if let Some(projectile) = &mut self.projectile {
            projectile.grow(self.tether_growth, field);
        }
    }

    /// True if `other` touches the player; the player dies if so
    pub fn check_killed_by(&mut self, other: &Rect) -> bool {
        let hit = overlaps(&self.rect, other);
        if hit {
            self.alive = false;
        }
        hit
    }

    /// True if the active tether touches `other`; the tether is spent if so
    pub fn check_projectile_hits(&mut self, other: &Rect) -> bool {
        let hit = self
            .projectile
            .as_ref()
            .is_some_and(|p| overlaps(&p.bounds(), other));
        if hit {
            self.projectile = None;
        }
        hit
    }

    /// Weapon used by future shots
    pub fn set_weapon_type(&mut self, kind: WeaponKind) {
        self.weapon = kind;
    }

    pub fn retract(&mut self) {
        self.projectile = None;
    }

    /// Current tether height, zero when none is active
    pub fn projectile_height(&self) -> f32 {
        self.projectile.as_ref().map_or(0.0, Projectile::height)
    }
}
