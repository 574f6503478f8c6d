//! Proximity flags and glow for interactables.
//!
//! Recomputes [`Interactable::is_near`] for every object each tick from the
//! distance between the actor's center and the object's center, then steps
//! the glow animation. This is a read-only side channel for presentation; it
//! never triggers an interaction.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::actor::Actor;
use crate::components::boxcollider::BoxCollider;
use crate::components::interactable::Interactable;
use crate::components::mapposition::MapPosition;
use crate::resources::simconfig::SimConfig;

/// Whether `target` is strictly closer than `range` to `from`.
pub fn within_range(from: Vec2, target: Vec2, range: f32) -> bool {
    from.distance(target) < range
}

pub fn proximity_system(
    actors: Query<(&MapPosition, &Actor)>,
    mut objects: Query<(&MapPosition, &BoxCollider, &mut Interactable), Without<Actor>>,
    config: Res<SimConfig>,
) {
    let Ok((actor_pos, actor)) = actors.single() else {
        return;
    };
    let center = actor.center(actor_pos.pos);
    let range = config.interaction.range;

    for (pos, footprint, mut object) in objects.iter_mut() {
        object.is_near = !object.inert && within_range(center, footprint.center(pos.pos), range);
        object.update_glow();
    }
}
