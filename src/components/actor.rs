//! Actor marker, facing and movement state.
//!
//! The actor is the single player-controlled entity. Its display box is the
//! [`Actor::display`] size laid out at the entity's
//! [`MapPosition`](super::mapposition::MapPosition); its collision box is a
//! separate [`BoxCollider`](super::boxcollider::BoxCollider) with an offset.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Cardinal direction the actor faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Derive facing from velocity.
    ///
    /// Horizontal wins whenever `|vx| >= |vy|` (ties included) and the body
    /// moves horizontally at all. Otherwise vertical facing only changes once
    /// `|vy|` exceeds `deadzone`; below that the previous facing is kept so
    /// the actor does not flicker while coming to rest.
    pub fn from_velocity(current: Facing, velocity: Vec2, deadzone: f32) -> Facing {
        if velocity.x != 0.0 && velocity.x.abs() >= velocity.y.abs() {
            if velocity.x > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            }
        } else if velocity.y.abs() > deadzone {
            if velocity.y > 0.0 {
                Facing::Down
            } else {
                Facing::Up
            }
        } else {
            current
        }
    }
}

/// Coarse movement state exposed to presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementState {
    #[default]
    Idle,
    Walking,
    Sprinting,
}

/// The player-controlled actor.
#[derive(Component, Debug, Clone)]
pub struct Actor {
    /// Display box size, laid out at the actor's position.
    pub display: Vec2,
    pub facing: Facing,
    pub state: MovementState,
    /// Movement flag computed by the last movement pass.
    pub moving: bool,
    /// Clock time (ms) of the last interaction attempt that reached an object.
    pub last_interaction: Option<f64>,
}

impl Actor {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            display: Vec2::new(width, height),
            facing: Facing::Down,
            state: MovementState::Idle,
            moving: false,
            last_interaction: None,
        }
    }

    /// Center of the display box for an actor at `position`.
    pub fn center(&self, position: Vec2) -> Vec2 {
        position + self.display * 0.5
    }

    /// Whether an interaction at `now` is outside the cooldown window.
    ///
    /// An actor that never interacted is always ready.
    pub fn off_cooldown(&self, now: f64, cooldown_ms: f64) -> bool {
        match self.last_interaction {
            None => true,
            Some(last) => now - last > cooldown_ms,
        }
    }
}
