//! Static obstacles the actor collides with.
//!
//! Both kinds are entities with a [`MapPosition`](super::mapposition::MapPosition)
//! and a [`BoxCollider`](super::boxcollider::BoxCollider). Walls always block;
//! doors block only while closed.

use bevy_ecs::prelude::Component;

/// Immutable wall collider. Created at world build time, never changed.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Wall;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Door {
    pub id: u32,
    pub open: bool,
}

impl Door {
    pub fn blocks(&self) -> bool {
        !self.open
    }
}
