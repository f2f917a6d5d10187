//! Power-up packages
//!
//! Dropped by some splits, they fall at a constant speed and change the
//! player's weapon when touched.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Field, Rect};
use super::player::Player;

/// Weapon types a package can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Rope,
    Harpoon,
    Laser,
}

impl WeaponKind {
    /// Kinds a package may carry (never the default)
    pub const PAYLOADS: [WeaponKind; 2] = [WeaponKind::Harpoon, WeaponKind::Laser];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Rope => "Rope",
            WeaponKind::Harpoon => "Harpoon",
            WeaponKind::Laser => "Laser",
        }
    }

    pub fn random_payload<R: Rng>(rng: &mut R) -> Self {
        Self::PAYLOADS[rng.random_range(0..Self::PAYLOADS.len())]
    }
}

/// Roll the 1-in-`chance` package drop
pub fn roll_power_up<R: Rng>(rng: &mut R, chance: u32) -> bool {
    rng.random_range(0..chance.max(1)) == 0
}

/// A falling power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: u32,
    pub rect: Rect,
    /// Downward speed (px/tick)
    pub fall_speed: f32,
    pub payload: WeaponKind,
}

impl Package {
    /// A package centred on `center`
    pub fn new(id: u32, center: Vec2, size: f32, fall_speed: f32, payload: WeaponKind) -> Self {
        Self {
            id,
            rect: Rect::new(center - Vec2::splat(size * 0.5), Vec2::splat(size)),
            fall_speed,
            payload,
        }
    }

    /// Fall one tick. Returns false once the package has left the field.
    pub fn tick(&mut self, field: &Field) -> bool {
        self.rect.translate(Vec2::new(0.0, self.fall_speed));
        self.rect.top() <= field.floor()
    }

    /// Hand the payload to the player
    pub fn on_collected(&self, player: &mut Player) {
        log::debug!("Package {} collected: {}", self.id, self.payload.as_str());
        player.set_weapon_type(self.payload);
    }
}
