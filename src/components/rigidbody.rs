//! Kinematic body driven by per-tick acceleration and linear friction.
//!
//! The [`RigidBody`] stores the actor's velocity in world units per tick. The
//! movement system adds input acceleration, clamps the speed to the cap the
//! energy model hands out, integrates one tick and then damps the velocity by
//! a multiplicative friction factor.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity and the tuning used to integrate it.
///
/// # Fields
/// - `velocity` - Current velocity in world units per tick
/// - `acceleration` - Velocity gained per tick from a unit-length intent
/// - `friction` - Multiplicative damping applied after every tick (0..1)
/// - `max_speed` - Speed cap for the current tick, refreshed by the energy model
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per tick.
    pub velocity: Vec2,
    /// Velocity added per tick for a unit-length intent.
    pub acceleration: f32,
    /// Velocity multiplier applied after each tick. Applied as: velocity *= friction.
    pub friction: f32,
    /// Maximum speed. Velocity magnitude is clamped to this value.
    pub max_speed: f32,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest with no acceleration and no friction.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration: 0.0,
            friction: 1.0,
            max_speed: f32::INFINITY,
        }
    }

    /// Create a RigidBody with physics parameters configured.
    ///
    /// # Arguments
    /// * `acceleration` - Velocity gained per tick at full intent
    /// * `friction` - Velocity multiplier per tick (0.85 = responsive, 0.98 = icy)
    /// * `max_speed` - Initial velocity magnitude limit
    pub fn with_physics(acceleration: f32, friction: f32, max_speed: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration,
            friction,
            max_speed,
        }
    }

    /// Push the body along `intent`.
    ///
    /// Intent is normalized first so diagonals accelerate as fast as straight
    /// lines. A zero (or sub-epsilon) intent adds nothing.
    pub fn accelerate(&mut self, intent: Vec2) {
        let dir = intent.normalize_or_zero();
        self.velocity += dir * self.acceleration;
    }

    /// Uniformly rescale velocity so its magnitude does not exceed `max_speed`.
    pub fn clamp_speed(&mut self) {
        let speed = self.velocity.length();
        if speed > self.max_speed && speed > 0.0 {
            self.velocity *= self.max_speed / speed;
        }
    }

    /// Damp velocity by the friction factor.
    pub fn apply_friction(&mut self) {
        self.velocity *= self.friction;
    }

    /// Whether either velocity component exceeds `deadzone`.
    pub fn is_moving(&self, deadzone: f32) -> bool {
        self.velocity.x.abs() > deadzone || self.velocity.y.abs() > deadzone
    }

    /// Stop movement along the X axis.
    pub fn stop_x(&mut self) {
        self.velocity.x = 0.0;
    }

    /// Stop movement along the Y axis.
    pub fn stop_y(&mut self) {
        self.velocity.y = 0.0;
    }
}
