//! Tether weapon
//!
//! A vertical beam fired from the player's feet. It stays at the horizontal
//! position it was fired from and grows upward a fixed amount every tick until
//! it touches the ceiling, then retracts on the following tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Field, Rect};
use super::package::WeaponKind;

/// An active tether. The player holds at most one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Horizontal centre of the beam
    pub anchor_x: f32,
    /// Current tip of the beam
    pub top_y: f32,
    /// Where the beam starts (the player's feet)
    pub base_y: f32,
    pub width: f32,
    /// Weapon the beam was fired with; only affects how it is drawn
    pub kind: WeaponKind,
}

impl Projectile {
    /// A new beam of zero height
    pub fn fire(anchor_x: f32, base_y: f32, width: f32, kind: WeaponKind) -> Self {
        Self {
            anchor_x,
            top_y: base_y,
            base_y,
            width,
            kind,
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        (self.base_y - self.top_y).max(0.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            Vec2::new(self.anchor_x - self.width * 0.5, self.top_y),
            Vec2::new(self.width, self.height()),
        )
    }

    /// The tip has reached the ceiling
    #[inline]
    pub fn at_ceiling(&self, field: &Field) -> bool {
        self.top_y <= field.top()
    }

    /// Extend the beam upward, stopping at the ceiling
    pub fn grow(&mut self, amount: f32, field: &Field) {
        self.top_y = (self.top_y - amount).max(field.top());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Field {
        Field::new(640.0, 480.0, 10.0)
    }

    #[test]
    fn test_fire_starts_empty() {
        let p = Projectile::fire(100.0, 470.0, 10.0, WeaponKind::Rope);
        assert_eq!(p.height(), 0.0);
        assert_eq!(p.bounds().left(), 95.0);
        assert_eq!(p.bounds().bottom(), 470.0);
    }

    #[test]
    fn test_growth_caps_at_ceiling() {
        let field = field();
        let mut p = Projectile::fire(100.0, 470.0, 10.0, WeaponKind::Rope);
        for _ in 0..100 {
            p.grow(10.0, &field);
        }
        assert!(p.at_ceiling(&field));
        assert_eq!(p.top_y, field.top());
        assert_eq!(p.height(), 460.0);
    }

    proptest! {
        #[test]
        fn prop_height_never_shrinks_while_growing(steps in 1usize..80, amount in 0.5f32..30.0) {
            let field = field();
            let mut p = Projectile::fire(50.0, field.floor(), 10.0, WeaponKind::Laser);
            let mut last = p.height();
            for _ in 0..steps {
                p.grow(amount, &field);
                prop_assert!(p.height() >= last);
                last = p.height();
            }
        }
    }
}
