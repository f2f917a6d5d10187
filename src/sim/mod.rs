//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (insertion order, children replace their parent)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod level;
pub mod package;
pub mod player;
pub mod projectile;
pub mod splittable;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, WallContact, bounce_off_rect, bounce_off_walls, overlaps};
pub use geometry::{Field, Rect};
pub use package::{Package, WeaponKind};
pub use player::{Direction, Intent, Player};
pub use projectile::Projectile;
pub use splittable::{BallTier, Splittable};
pub use state::{EntityIds, GameEvent, GamePhase, GameState, Message, MessageColor};
pub use tick::{TickInput, tick};
