//! Tick driver and public facade of the simulation core.
//!
//! [`Simulation`] exclusively owns the ECS [`World`] and the tick
//! [`Schedule`]. Each call to [`Simulation::advance`] is one tick, run in a
//! fixed order:
//!
//! 1. energy (sprint gate, drain/regen, speed cap)
//! 2. movement and collision
//! 3. interactable proximity flags
//! 4. sprint dust, then particle integration
//!
//! Inputs are validated before anything is touched, so a rejected tick leaves
//! the world exactly as it was. Presentation only ever sees snapshots and
//! drained [`PresentationEvent`]s.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use glam::Vec2;
use serde::Serialize;

use crate::components::actor::{Actor, Facing, MovementState};
use crate::components::boxcollider::{BoxCollider, Rect};
use crate::components::energy::Energy;
use crate::components::interactable::{Interactable, InteractableId};
use crate::components::inventory::{Inventory, Item};
use crate::components::mapposition::MapPosition;
use crate::components::obstacle::Door;
use crate::components::rigidbody::RigidBody;
use crate::components::tint::Tint;
use crate::error::TickError;
use crate::events::interaction::InteractionResult;
use crate::events::presentation::PresentationEvent;
use crate::resources::input::{LowEnergyNotice, MoveIntent};
use crate::resources::particles::{Particle, ParticleField};
use crate::resources::presentation::{setup_presentation, shutdown_presentation};
use crate::resources::simconfig::SimConfig;
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;
use crate::systems::energy::energy_system;
use crate::systems::interaction::try_interact_system;
use crate::systems::movement::movement_system;
use crate::systems::particles::{particle_step_system, sprint_dust_system};
use crate::systems::presentation::{
    PresentationStats, forward_presentation_events, update_presentation_messages,
};
use crate::systems::proximity::proximity_system;
use crate::systems::time::update_world_time;
use crate::world::{WorldDescription, WorldIndex, build_world};

/// Read-only view of the actor after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub state: MovementState,
    pub moving: bool,
    pub sprinting: bool,
    pub energy: f32,
    pub max_energy: f32,
    /// Speed cap that applied during the last tick.
    pub max_speed: f32,
    pub display: Rect,
    pub hitbox: Rect,
    pub inventory: Vec<Item>,
}

impl ActorSnapshot {
    pub fn center(&self) -> Vec2 {
        self.display.center()
    }
}

/// Read-only view of one interactable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractableSnapshot {
    pub id: InteractableId,
    pub kind: String,
    pub rect: Rect,
    pub prompt: String,
    pub glow_color: Tint,
    pub glow: f32,
    pub near: bool,
    pub used: bool,
    /// Consumed; presentation should no longer draw it.
    pub inert: bool,
    pub consumable: bool,
}

pub struct Simulation {
    world: World,
    tick: Schedule,
    interact: SystemId<(), InteractionResult>,
    index: WorldIndex,
}

impl Simulation {
    /// Build a simulation from an explicit configuration and world description.
    pub fn new(config: SimConfig, desc: &WorldDescription) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(MoveIntent::default());
        world.insert_resource(LowEnergyNotice::default());
        world.insert_resource(SimRng::with_seed(config.seed));
        world.insert_resource(ParticleField::new(&config.particles));
        world.init_resource::<Messages<PresentationEvent>>();

        let index = build_world(&mut world, desc, &config);
        world.insert_resource(config);

        let mut tick = Schedule::default();
        tick.add_systems(
            (
                update_presentation_messages,
                energy_system,
                movement_system,
                proximity_system,
                sprint_dust_system,
                particle_step_system,
                forward_presentation_events,
            )
                .chain(),
        );

        let interact = world.register_system(try_interact_system);
        world.flush();

        Self {
            world,
            tick,
            interact,
            index,
        }
    }

    /// Run one tick.
    ///
    /// `delta_ms` is the elapsed time since the previous tick. It must be
    /// finite and non-negative, the intent components must be finite and the
    /// actor must still exist; otherwise the tick is rejected and nothing
    /// changes.
    pub fn advance(
        &mut self,
        delta_ms: f32,
        dx: f32,
        dy: f32,
        sprint: bool,
    ) -> Result<ActorSnapshot, TickError> {
        if let Err(e) = TickError::check(delta_ms, dx, dy) {
            log::warn!("tick rejected: {}", e);
            return Err(e);
        }
        if self.actor().is_none() {
            log::warn!("tick rejected: {}", TickError::MissingActor);
            return Err(TickError::MissingActor);
        }

        *self.world.resource_mut::<MoveIntent>() = MoveIntent::new(dx, dy, sprint);
        update_world_time(&mut self.world, delta_ms);
        self.tick.run(&mut self.world);
        self.world.clear_trackers();

        self.actor().ok_or(TickError::MissingActor)
    }

    /// Attempt to interact with the nearest object in reach.
    pub fn try_interact(&mut self) -> InteractionResult {
        match self.world.run_system(self.interact) {
            Ok(result) => result,
            Err(e) => {
                log::error!("interaction system failed: {}", e);
                InteractionResult::default()
            }
        }
    }

    pub fn emit_explosion(&mut self, x: f32, y: f32, color: Tint, count: u32) {
        self.with_particles(|particles, rng| {
            particles.emit_explosion(rng, Vec2::new(x, y), color, count)
        });
    }

    pub fn emit_pickup_effect(&mut self, x: f32, y: f32) {
        self.with_particles(|particles, rng| particles.emit_pickup_effect(rng, Vec2::new(x, y)));
    }

    pub fn emit_dust(&mut self, x: f32, y: f32) {
        self.with_particles(|particles, rng| particles.emit_dust(rng, Vec2::new(x, y)));
    }

    fn with_particles(&mut self, f: impl FnOnce(&mut ParticleField, &mut fastrand::Rng)) {
        self.world
            .resource_scope(|world, mut particles: Mut<ParticleField>| {
                let mut rng = world.resource_mut::<SimRng>();
                f(&mut *particles, &mut rng.0);
            });
    }

    /// Open or close a door. Returns `false` if no door has that id.
    pub fn set_door_open(&mut self, id: u32, open: bool) -> bool {
        let Some(&entity) = self.index.doors.get(&id) else {
            return false;
        };
        match self.world.get_mut::<Door>(entity) {
            Some(mut door) => {
                door.open = open;
                log::debug!("door {} {}", id, if open { "opened" } else { "closed" });
                true
            }
            None => false,
        }
    }

    pub fn door_open(&self, id: u32) -> Option<bool> {
        let entity = *self.index.doors.get(&id)?;
        self.world.get::<Door>(entity).map(|door| door.open)
    }

    /// Take every pending presentation event, oldest first.
    pub fn drain_events(&mut self) -> Vec<PresentationEvent> {
        self.world
            .resource_mut::<Messages<PresentationEvent>>()
            .drain()
            .collect()
    }

    /// Forward events to a background presentation thread from now on.
    pub fn attach_presentation(&mut self) {
        setup_presentation(&mut self.world);
    }

    /// Stop the presentation thread, if one is attached.
    pub fn detach_presentation(&mut self) -> Option<PresentationStats> {
        shutdown_presentation(&mut self.world)
    }

    pub fn actor(&self) -> Option<ActorSnapshot> {
        let entity = self.world.get_entity(self.index.actor).ok()?;
        let position = entity.get::<MapPosition>()?.pos;
        let actor = entity.get::<Actor>()?;
        let body = entity.get::<RigidBody>()?;
        let energy = entity.get::<Energy>()?;
        let hitbox = entity.get::<BoxCollider>()?;
        let inventory = entity.get::<Inventory>()?;
        Some(ActorSnapshot {
            position,
            velocity: body.velocity,
            facing: actor.facing,
            state: actor.state,
            moving: actor.moving,
            sprinting: energy.sprinting,
            energy: energy.current,
            max_energy: energy.max,
            max_speed: body.max_speed,
            display: Rect::new(position.x, position.y, actor.display.x, actor.display.y),
            hitbox: hitbox.rect(position),
            inventory: inventory.items().to_vec(),
        })
    }

    /// Snapshots of every interactable, in description order.
    pub fn interactables(&self) -> Vec<InteractableSnapshot> {
        self.index
            .interactables
            .iter()
            .filter_map(|&entity| self.interactable_snapshot(entity))
            .collect()
    }

    pub fn interactable(&self, id: InteractableId) -> Option<InteractableSnapshot> {
        self.interactable_snapshot(self.index.interactable(id)?)
    }

    fn interactable_snapshot(&self, entity: Entity) -> Option<InteractableSnapshot> {
        let entity = self.world.get_entity(entity).ok()?;
        let pos = entity.get::<MapPosition>()?.pos;
        let footprint = entity.get::<BoxCollider>()?;
        let object = entity.get::<Interactable>()?;
        Some(InteractableSnapshot {
            id: object.id,
            kind: object.kind.clone(),
            rect: footprint.rect(pos),
            prompt: object.prompt.clone(),
            glow_color: object.glow_color,
            glow: object.glow,
            near: object.is_near,
            used: object.has_been_interacted,
            inert: object.inert,
            consumable: object.is_consumable(),
        })
    }

    pub fn particles(&self) -> &[Particle] {
        self.world.resource::<ParticleField>().particles()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.world.resource::<WorldTime>().elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.world.resource::<WorldTime>().frame_count
    }

    pub fn config(&self) -> &SimConfig {
        self.world.resource::<SimConfig>()
    }

    pub fn index(&self) -> &WorldIndex {
        &self.index
    }

    /// Direct world access, for tests and tooling.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
