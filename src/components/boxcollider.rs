use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box placed relative to an entity's [`MapPosition`].
///
/// Used for the actor's collision box (with an offset into its display box),
/// for static walls and doors, and for interactable footprints.
///
/// [`MapPosition`]: super::mapposition::MapPosition
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    /// Modify BoxCollider with given size and offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        (p0.min(p1), p0.max(p1))
    }

    /// World-space rectangle of the box at `position`.
    pub fn rect(&self, position: Vec2) -> Rect {
        let (min, max) = self.aabb(position);
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Center of the box in world space.
    pub fn center(&self, position: Vec2) -> Vec2 {
        let (min, max) = self.aabb(position);
        (min + max) * 0.5
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    ///
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }
}

/// Plain world rectangle, as found in world descriptions and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Split into the position/collider pair the ECS stores.
    pub fn to_parts(&self) -> (Vec2, BoxCollider) {
        (self.origin(), BoxCollider::new(self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_requires_interior_intersection() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(a.overlaps(Vec2::ZERO, &b, Vec2::new(5.0, 5.0)));
        // Edges touching
        assert!(!a.overlaps(Vec2::ZERO, &b, Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn offset_shifts_the_box() {
        let hitbox = BoxCollider::new(24.0, 20.0).with_offset(Vec2::new(4.0, 8.0));
        let r = hitbox.rect(Vec2::new(100.0, 100.0));
        assert_eq!(r, Rect::new(104.0, 108.0, 24.0, 20.0));
    }

    #[test]
    fn negative_size_is_normalized() {
        let c = BoxCollider::new(-10.0, -10.0);
        let (min, max) = c.aabb(Vec2::ZERO);
        assert_eq!(min, Vec2::new(-10.0, -10.0));
        assert_eq!(max, Vec2::ZERO);
    }

    #[test]
    fn zero_sized_box_behaves_like_a_post() {
        let post = BoxCollider::new(0.0, 0.0);
        let body = BoxCollider::new(50.0, 50.0);
        assert!(post.overlaps(Vec2::new(25.0, 25.0), &body, Vec2::ZERO));
        assert!(!post.overlaps(Vec2::new(50.0, 25.0), &body, Vec2::ZERO));
        assert!(post.center(Vec2::new(3.0, 4.0)).is_finite());
    }
}
