//! Movement and collision system.
//!
//! One tick of actor movement:
//! 1. accelerate along the normalized intent,
//! 2. clamp speed to the cap set by the energy system,
//! 3. derive facing and the movement flag,
//! 4. resolve the tentative move **per axis** against walls and closed doors,
//! 5. apply friction.
//!
//! The X test uses `(next.x, current.y)` and the Y test `(current.x, next.y)`,
//! so a blocked axis never stops a slide along the other one. Doors only
//! block while closed.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::actor::{Actor, Facing, MovementState};
use crate::components::boxcollider::BoxCollider;
use crate::components::energy::Energy;
use crate::components::mapposition::MapPosition;
use crate::components::obstacle::{Door, Wall};
use crate::components::rigidbody::RigidBody;
use crate::resources::input::MoveIntent;
use crate::resources::simconfig::{MovementConfig, SimConfig};

/// Result of resolving one tentative move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisResolution {
    pub position: Vec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

/// Move from `current` towards `next`, one axis at a time.
///
/// `blocked` answers whether the collision box placed at a candidate
/// position overlaps any obstacle.
pub fn resolve_axes(current: Vec2, next: Vec2, blocked: impl Fn(Vec2) -> bool) -> AxisResolution {
    let blocked_x = next.x != current.x && blocked(Vec2::new(next.x, current.y));
    let blocked_y = next.y != current.y && blocked(Vec2::new(current.x, next.y));
    AxisResolution {
        position: Vec2::new(
            if blocked_x { current.x } else { next.x },
            if blocked_y { current.y } else { next.y },
        ),
        blocked_x,
        blocked_y,
    }
}

/// Advance one body by one tick. Returns the new position.
///
/// `body.max_speed` must already hold this tick's cap.
pub fn step_body(
    position: Vec2,
    body: &mut RigidBody,
    actor: &mut Actor,
    intent: Vec2,
    cfg: &MovementConfig,
    blocked: impl Fn(Vec2) -> bool,
) -> Vec2 {
    body.accelerate(intent);
    body.clamp_speed();

    actor.facing = Facing::from_velocity(actor.facing, body.velocity, cfg.facing_deadzone);
    actor.moving = body.is_moving(cfg.move_deadzone);

    let next = position + body.velocity;
    let resolved = resolve_axes(position, next, blocked);
    if resolved.blocked_x {
        body.stop_x();
    }
    if resolved.blocked_y {
        body.stop_y();
    }

    body.apply_friction();
    resolved.position
}

/// Move every actor, colliding against walls and closed doors.
pub fn movement_system(
    mut actors: Query<(
        &mut MapPosition,
        &mut RigidBody,
        &mut Actor,
        &BoxCollider,
        &Energy,
    )>,
    walls: Query<(&MapPosition, &BoxCollider), (With<Wall>, Without<Actor>)>,
    doors: Query<(&MapPosition, &BoxCollider, &Door), Without<Actor>>,
    intent: Res<MoveIntent>,
    config: Res<SimConfig>,
) {
    for (mut position, mut body, mut actor, hitbox, energy) in actors.iter_mut() {
        let current = position.pos;
        let blocked = |candidate: Vec2| {
            walls
                .iter()
                .any(|(wall_pos, wall)| hitbox.overlaps(candidate, wall, wall_pos.pos))
                || doors.iter().any(|(door_pos, collider, door)| {
                    // A door closed on top of the actor must not trap it.
                    door.blocks()
                        && hitbox.overlaps(candidate, collider, door_pos.pos)
                        && !hitbox.overlaps(current, collider, door_pos.pos)
                })
        };

        position.pos = step_body(
            position.pos,
            &mut body,
            &mut actor,
            intent.direction,
            &config.movement,
            blocked,
        );

        actor.state = match (actor.moving, energy.sprinting) {
            (false, _) => MovementState::Idle,
            (true, false) => MovementState::Walking,
            (true, true) => MovementState::Sprinting,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn walker() -> (RigidBody, Actor) {
        let cfg = MovementConfig::default();
        (
            RigidBody::with_physics(cfg.acceleration, cfg.friction, cfg.walk_speed),
            Actor::new(32.0, 32.0),
        )
    }

    #[test]
    fn open_space_moves_both_axes() {
        let r = resolve_axes(Vec2::ZERO, Vec2::new(1.0, 2.0), |_| false);
        assert_eq!(r.position, Vec2::new(1.0, 2.0));
        assert!(!r.blocked_x && !r.blocked_y);
    }

    #[test]
    fn blocked_x_still_slides_on_y() {
        // Anything right of x = 0.5 is solid.
        let r = resolve_axes(Vec2::ZERO, Vec2::new(1.0, 1.0), |p| p.x > 0.5);
        assert_eq!(r.position, Vec2::new(0.0, 1.0));
        assert!(r.blocked_x);
        assert!(!r.blocked_y);
    }

    #[test]
    fn step_integrates_then_applies_friction() {
        let cfg = MovementConfig::default();
        let (mut body, mut actor) = walker();
        let pos = step_body(Vec2::ZERO, &mut body, &mut actor, Vec2::X, &cfg, |_| false);
        assert!(approx_eq(pos.x, 0.3));
        assert!(approx_eq(body.velocity.x, 0.3 * 0.85));
        assert_eq!(actor.facing, Facing::Right);
        assert!(actor.moving);
    }

    #[test]
    fn blocked_axis_zeroes_its_velocity() {
        let cfg = MovementConfig::default();
        let (mut body, mut actor) = walker();
        body.velocity = Vec2::new(1.0, 1.0);
        let pos = step_body(Vec2::ZERO, &mut body, &mut actor, Vec2::ZERO, &cfg, |p| {
            p.x > 0.0
        });
        assert_eq!(pos.x, 0.0);
        assert_eq!(body.velocity.x, 0.0);
        assert!(pos.y > 0.0);
        assert!(body.velocity.y > 0.0);
    }

    #[test]
    fn speed_never_exceeds_cap_for_any_intent() {
        let cfg = MovementConfig::default();
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..2000 {
            let cap = rng.f32() * 6.0;
            let mut body = RigidBody::with_physics(cfg.acceleration, cfg.friction, cap);
            body.velocity = Vec2::new(rng.f32() * 20.0 - 10.0, rng.f32() * 20.0 - 10.0);
            let intent = Vec2::new(rng.f32() * 2.0 - 1.0, rng.f32() * 2.0 - 1.0);
            body.accelerate(intent);
            body.clamp_speed();
            assert!(body.velocity.length() <= cap + 1e-4);
        }
    }

    #[test]
    fn coasting_comes_to_rest_and_keeps_facing() {
        let cfg = MovementConfig::default();
        let (mut body, mut actor) = walker();
        body.velocity = Vec2::new(0.0, -1.5);
        for _ in 0..60 {
            step_body(Vec2::ZERO, &mut body, &mut actor, Vec2::ZERO, &cfg, |_| false);
        }
        assert!(!actor.moving);
        assert_eq!(actor.facing, Facing::Up);
    }
}
