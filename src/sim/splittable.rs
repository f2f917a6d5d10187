//! Bouncing balls and the splitting rule
//!
//! A ball falls under simple gravity, bounces elastically off the side walls
//! and ceiling, and leaves the floor at a fixed per-tier rebound speed so
//! bounces never gain energy. A hit ball is replaced by two balls of the next
//! smaller tier; the smallest tier just vanishes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::bounce_off_walls;
use super::geometry::Rect;
use crate::error::SimError;
use crate::settings::Settings;

/// Ball size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallTier {
    Large,
    Medium,
    Small,
}

impl BallTier {
    /// Tier of the children produced by a split, if any
    pub fn smaller(self) -> Option<BallTier> {
        match self {
            BallTier::Large => Some(BallTier::Medium),
            BallTier::Medium => Some(BallTier::Small),
            BallTier::Small => None,
        }
    }
}

/// A ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Splittable {
    pub id: u32,
    pub rect: Rect,
    /// Velocity (px/tick)
    pub velocity: Vec2,
    pub tier: BallTier,
}

impl Splittable {
    /// A ball of `tier` centred on `center`
    pub fn new(id: u32, tier: BallTier, center: Vec2, velocity: Vec2, settings: &Settings) -> Self {
        let size = Vec2::splat(settings.tier(tier).size);
        Self {
            id,
            rect: Rect::new(center - size * 0.5, size),
            velocity,
            tier,
        }
    }

    /// Integrate one tick of motion and resolve wall contact
    pub fn tick(&mut self, settings: &Settings) {
        let field = settings.field();

        self.velocity.y += settings.gravity;
        self.rect.translate(self.velocity);

        let contact = bounce_off_walls(&mut self.rect, &mut self.velocity, &field);
        if contact.floor {
            self.velocity.y = -settings.tier(self.tier).rebound_speed;
        }

        if !field.contains(&self.rect) {
            let err = SimError::OutOfBounds {
                entity: "ball",
                rect: self.rect,
            };
            log::warn!("{}", err);
            self.rect.clamp_to_field(&field);
        }
    }

    /// Children replacing this ball after a hit.
    ///
    /// Large and medium balls yield two balls of the next tier at the same
    /// centre, moving apart horizontally with the parent's vertical velocity.
    /// Small balls yield nothing.
    pub fn split(
        &self,
        settings: &Settings,
        mut next_id: impl FnMut() -> u32,
    ) -> Result<Vec<Splittable>, SimError> {
        let Some(child_tier) = self.tier.smaller() else {
            return Ok(Vec::new());
        };

        let child_size = settings.tier(child_tier).size;
        if child_size <= 0.0 {
            return Err(SimError::InvalidSplit {
                tier: self.tier,
                child_size,
            });
        }

        let speed = match self.velocity.x.abs() {
            s if s > 0.0 => s,
            _ => settings.ball_base_speed,
        };
        let center = self.rect.center();
        let children = [-speed, speed]
            .into_iter()
            .map(|dx| {
                Splittable::new(
                    next_id(),
                    child_tier,
                    center,
                    Vec2::new(dx, self.velocity.y),
                    settings,
                )
            })
            .collect();
        Ok(children)
    }
}
