//! Collision detection and response for axis-aligned boxes
//!
//! Stateless with respect to entities: every function takes boxes and
//! velocities and reports or resolves contact. The tick decides the order in
//! which checks run.

use glam::Vec2;

use super::geometry::{Field, Rect};

/// Result of a box-vs-box collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the boxes overlap
    pub hit: bool,
    /// Surface normal of the obstacle at the contact (points toward the mover)
    pub normal: Vec2,
    /// Penetration depth along the normal
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Which field walls a box touches or crosses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub floor: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.floor
    }
}

/// Overlap test between two boxes (shared edges count)
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Check `moving` against `obstacle`, resolving along the axis of least
/// penetration.
pub fn rect_collision(moving: &Rect, obstacle: &Rect) -> CollisionResult {
    if !moving.intersects(obstacle) {
        return CollisionResult::miss();
    }

    let push_left = moving.right() - obstacle.left();
    let push_right = obstacle.right() - moving.left();
    let push_up = moving.bottom() - obstacle.top();
    let push_down = obstacle.bottom() - moving.top();

    let (pen_x, normal_x) = if push_left < push_right {
        (push_left, Vec2::NEG_X)
    } else {
        (push_right, Vec2::X)
    };
    let (pen_y, normal_y) = if push_up < push_down {
        (push_up, Vec2::NEG_Y)
    } else {
        (push_down, Vec2::Y)
    };

    let (penetration, normal) = if pen_x < pen_y {
        (pen_x, normal_x)
    } else {
        (pen_y, normal_y)
    };

    CollisionResult {
        hit: true,
        normal,
        penetration,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Report which walls a box touches
pub fn wall_contacts(rect: &Rect, field: &Field) -> WallContact {
    WallContact {
        left: rect.left() <= field.left(),
        right: rect.right() >= field.right(),
        top: rect.top() <= field.top(),
        floor: rect.bottom() >= field.floor(),
    }
}

/// Push a box back inside the field and reflect every velocity component
/// that was carrying it into a wall. Magnitudes are unchanged.
pub fn bounce_off_walls(rect: &mut Rect, velocity: &mut Vec2, field: &Field) -> WallContact {
    let contact = wall_contacts(rect, field);
    if !contact.any() {
        return contact;
    }

    let walls = [
        (contact.left, Vec2::X),
        (contact.right, Vec2::NEG_X),
        (contact.top, Vec2::Y),
        (contact.floor, Vec2::NEG_Y),
    ];
    for (touching, normal) in walls {
        if touching && velocity.dot(normal) < 0.0 {
            *velocity = reflect_velocity(*velocity, normal);
        }
    }

    rect.clamp_to_field(field);
    contact
}

/// Bounce a moving box off a static one. Returns true on contact.
pub fn bounce_off_rect(moving: &mut Rect, velocity: &mut Vec2, obstacle: &Rect) -> bool {
    let result = rect_collision(moving, obstacle);
    if !result.hit {
        return false;
    }

    moving.translate(result.normal * result.penetration);
    if velocity.dot(result.normal) < 0.0 {
        *velocity = reflect_velocity(*velocity, result.normal);
    }
    true
}
