//! Particle systems.
//!
//! - [`sprint_dust_system`] kicks up dust at the actor's feet while it
//!   sprints.
//! - [`particle_step_system`] integrates the [`ParticleField`] and drops
//!   expired particles. It runs last in the tick.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::actor::Actor;
use crate::components::energy::Energy;
use crate::components::mapposition::MapPosition;
use crate::resources::particles::ParticleField;
use crate::resources::simconfig::SimConfig;
use crate::resources::simrng::SimRng;

/// Point under the middle of the actor's display box.
pub fn feet(position: Vec2, actor: &Actor) -> Vec2 {
    position + Vec2::new(actor.display.x / 2.0, actor.display.y)
}

pub fn sprint_dust_system(
    query: Query<(&MapPosition, &Actor, &Energy)>,
    config: Res<SimConfig>,
    mut rng: ResMut<SimRng>,
    mut particles: ResMut<ParticleField>,
) {
    for (position, actor, energy) in query.iter() {
        if !(energy.sprinting && actor.moving) {
            continue;
        }
        if rng.0.f32() < config.particles.dust_chance {
            particles.emit_dust(&mut rng.0, feet(position.pos, actor));
        }
    }
}

pub fn particle_step_system(mut particles: ResMut<ParticleField>) {
    let expired = particles.step();
    if expired > 0 {
        log::trace!("{} particles expired, {} live", expired, particles.len());
    }
}
