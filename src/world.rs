//! Static world description and world building.
//!
//! A [`WorldDescription`] lists colliders, doors and interactable definitions.
//! It is read once by [`build_world`], which spawns the matching entities
//! and the actor; after that the description is never consulted again.
//!
//! Descriptions are plain serde data, so they can be loaded from and dumped
//! to JSON. [`WorldDescription::house`] is the built-in layout.

use std::path::Path;

use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::actor::Actor;
use crate::components::boxcollider::{BoxCollider, Rect};
use crate::components::energy::Energy;
use crate::components::interactable::{
    Burst, EnergyGain, Interactable, InteractableId, InteractionPolicy, Notice, Requirement,
    SearchEffect, SideEffect,
};
use crate::components::inventory::{Inventory, Item};
use crate::components::mapposition::MapPosition;
use crate::components::obstacle::{Door, Wall};
use crate::components::rigidbody::RigidBody;
use crate::components::tint::Tint;
use crate::resources::simconfig::SimConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorDef {
    pub id: u32,
    pub rect: Rect,
    #[serde(default)]
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractableDef {
    pub kind: String,
    pub rect: Rect,
    pub policy: InteractionPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow_color: Option<Tint>,
}

impl InteractableDef {
    pub fn new(kind: impl Into<String>, rect: Rect, policy: InteractionPolicy) -> Self {
        Self {
            kind: kind.into(),
            rect,
            policy,
            prompt: None,
            glow_color: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_glow_color(mut self, color: Tint) -> Self {
        self.glow_color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorldDescription {
    #[serde(default)]
    pub colliders: Vec<Rect>,
    #[serde(default)]
    pub doors: Vec<DoorDef>,
    #[serde(default)]
    pub interactables: Vec<InteractableDef>,
    /// Actor start position; falls back to the configured start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn: Option<Vec2>,
}

/// Entities created by [`build_world`], by stable identifier.
#[derive(Resource, Debug, Clone)]
pub struct WorldIndex {
    pub actor: Entity,
    /// Interactable entities, indexed by [`InteractableId`].
    pub interactables: Vec<Entity>,
    pub doors: FxHashMap<u32, Entity>,
}

impl WorldIndex {
    pub fn interactable(&self, id: InteractableId) -> Option<Entity> {
        self.interactables.get(id.0 as usize).copied()
    }
}

impl WorldDescription {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to parse world description: {}", e))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read world file {:?}: {}", path, e))?;
        let world = Self::from_json(&text)?;
        log::info!(
            "Loaded world from {:?}: {} colliders, {} doors, {} interactables",
            path,
            world.colliders.len(),
            world.doors.len(),
            world.interactables.len()
        );
        Ok(world)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize world description: {}", e))
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create directory {:?}: {}", parent, e))?;
            }
        }
        std::fs::write(path, self.to_json()?)
            .map_err(|e| format!("Failed to write world file {:?}: {}", path, e))
    }

    /// The two-bedroom house on an 800x600 canvas.
    ///
    /// The house is 600x400, centered, with a gap in the bottom wall for the
    /// front door (open at start). The actor spawns at the canvas center.
    pub fn house() -> Self {
        let (hx, hy) = (100.0, 100.0);
        let r = |x: f32, y: f32, w: f32, h: f32| Rect::new(hx + x, hy + y, w, h);

        let colliders = vec![
            // Outer walls
            r(0.0, 0.0, 600.0, 20.0),
            r(0.0, 0.0, 20.0, 400.0),
            r(580.0, 0.0, 20.0, 400.0),
            // Bottom walls either side of the front door
            r(0.0, 380.0, 260.0, 20.0),
            r(340.0, 380.0, 260.0, 20.0),
            // Room dividers
            r(200.0, 0.0, 20.0, 200.0),
            r(200.0, 300.0, 20.0, 100.0),
            r(400.0, 0.0, 20.0, 300.0),
        ];

        let doors = vec![DoorDef {
            id: 0,
            rect: r(260.0, 380.0, 80.0, 20.0),
            open: true,
        }];

        let bed = |x: f32, y: f32| {
            InteractableDef::new(
                "Bed",
                r(x, y, 80.0, 40.0),
                InteractionPolicy::Repeatable {
                    effect: SideEffect::Restore {
                        gain: EnergyGain::Full,
                        notice: Notice::new("You feel well rested!", 2000, Tint::SUCCESS),
                        burst: Some(Burst {
                            color: Tint::SKY,
                            count: 15,
                        }),
                    },
                },
            )
            .with_prompt("Press E to sleep")
        };
        let pickup = |kind: &str, rect: Rect, name: &str, description: &str| {
            InteractableDef::new(
                kind,
                rect,
                InteractionPolicy::Consumable {
                    item: Item::new(name, kind, description),
                },
            )
        };
        let repeatable = |kind: &str, rect: Rect, effect: SideEffect, prompt: &str| {
            InteractableDef::new(kind, rect, InteractionPolicy::Repeatable { effect })
                .with_prompt(prompt)
        };

        let interactables = vec![
            // Bedroom 1
            bed(50.0, 50.0),
            repeatable(
                "Dresser",
                r(50.0, 100.0, 40.0, 40.0),
                SideEffect::Search(
                    SearchEffect {
                        found_color: Tint::GOLD,
                        ..SearchEffect::new(
                            &["Family Photo", "Pocket Watch", "Reading Glasses"],
                            "personal",
                            "dresser drawer",
                        )
                    }
                    .with_description("A {item_lower} from the dresser drawer"),
                ),
                "Press E to search",
            ),
            pickup(
                "Keys",
                r(140.0, 60.0, 15.0, 15.0),
                "House Keys",
                "A set of house keys on a keychain",
            )
            .with_glow_color(Tint::SILVER),
            // Bedroom 2
            bed(250.0, 50.0),
            repeatable(
                "Closet",
                r(250.0, 100.0, 40.0, 40.0),
                SideEffect::Search(SearchEffect {
                    requires: Some(Requirement {
                        item: "House Keys".to_string(),
                        locked_notice: Notice::new(
                            "The closet is locked. Need keys...",
                            2000,
                            Tint::ALERT,
                        ),
                    }),
                    ..SearchEffect::new(
                        &["Winter Coat", "Umbrella", "Hiking Boots"],
                        "clothing",
                        "closet",
                    )
                }),
                "Press E to open",
            ),
            // Living room
            repeatable(
                "Sofa",
                r(450.0, 200.0, 100.0, 60.0),
                SideEffect::Restore {
                    gain: EnergyGain::Amount(30.0),
                    notice: Notice::new(
                        "You sit and relax on the comfortable sofa",
                        2500,
                        Tint::SKY,
                    ),
                    burst: None,
                },
                "Press E to sit and rest",
            ),
            repeatable(
                "TV",
                r(450.0, 150.0, 40.0, 40.0),
                SideEffect::Broadcast {
                    pool: ["Local News", "Weather Report", "Nature Documentary", "Classic Movie"]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    prefix: "Now watching: ".to_string(),
                    energy_bonus: 10.0,
                },
                "Press E to watch TV",
            ),
            // Kitchen
            repeatable(
                "Counter",
                r(450.0, 50.0, 100.0, 40.0),
                SideEffect::Search(SearchEffect {
                    energy_bonus: 15.0,
                    ..SearchEffect::new(
                        &["Fresh Apple", "Granola Bar", "Water Bottle"],
                        "food",
                        "kitchen counter",
                    )
                }),
                "Press E to search counter",
            ),
            repeatable(
                "Refrigerator",
                r(450.0, 100.0, 60.0, 60.0),
                SideEffect::Search(SearchEffect {
                    energy_bonus: 25.0,
                    found_prefix: "Took: ".to_string(),
                    ..SearchEffect::new(
                        &["Cold Milk", "Fresh Cheese", "Leftover Pizza", "Orange Juice"],
                        "food",
                        "refrigerator",
                    )
                }),
                "Press E to open fridge",
            ),
            // Dining room
            repeatable(
                "Dining Table",
                r(250.0, 200.0, 80.0, 80.0),
                SideEffect::Search(
                    SearchEffect {
                        found_color: Tint::DUST,
                        full_notice: Notice::new("Nothing useful on the table", 2000, Tint::GREY),
                        ..SearchEffect::new(
                            &["Newspaper", "Coffee Mug", "Car Keys"],
                            "misc",
                            "dining table",
                        )
                    }
                    .with_description("{item} left on the dining table"),
                ),
                "Press E to examine table",
            ),
            // Loose pickups
            pickup(
                "Wallet",
                r(330.0, 140.0, 12.0, 12.0),
                "Leather Wallet",
                "A brown leather wallet with some cash inside",
            ),
            pickup(
                "Book",
                r(180.0, 250.0, 18.0, 18.0),
                "Recipe Book",
                "A well-used cookbook with family recipes",
            ),
            pickup(
                "Phone",
                r(530.0, 280.0, 14.0, 14.0),
                "Mobile Phone",
                "A smartphone that still has some battery",
            ),
        ];

        Self {
            colliders,
            doors,
            interactables,
            spawn: Some(Vec2::new(400.0, 300.0)),
        }
    }
}

/// Spawn the actor, obstacles and interactables described by `desc`.
///
/// Inserts and returns the [`WorldIndex`].
pub fn build_world(world: &mut World, desc: &WorldDescription, config: &SimConfig) -> WorldIndex {
    let a = &config.actor;
    let m = &config.movement;
    let spawn = desc.spawn.unwrap_or(Vec2::new(a.start_x, a.start_y));

    let actor = world
        .spawn((
            Actor::new(a.width, a.height),
            MapPosition { pos: spawn },
            BoxCollider::new(a.hitbox_width, a.hitbox_height)
                .with_offset(Vec2::new(a.hitbox_offset_x, a.hitbox_offset_y)),
            RigidBody::with_physics(m.acceleration, m.friction, m.walk_speed),
            Energy::new(config.energy.max),
            Inventory::with_capacity(config.interaction.inventory_capacity),
        ))
        .id();

    for rect in &desc.colliders {
        let (pos, collider) = rect.to_parts();
        world.spawn((Wall, MapPosition { pos }, collider));
    }

    let mut doors = FxHashMap::default();
    for def in &desc.doors {
        let (pos, collider) = def.rect.to_parts();
        let entity = world
            .spawn((
                Door {
                    id: def.id,
                    open: def.open,
                },
                MapPosition { pos },
                collider,
            ))
            .id();
        if doors.insert(def.id, entity).is_some() {
            log::warn!("duplicate door id {}; the last one wins", def.id);
        }
    }

    let mut interactables = Vec::with_capacity(desc.interactables.len());
    for (index, def) in desc.interactables.iter().enumerate() {
        let (pos, footprint) = def.rect.to_parts();
        let mut object = Interactable::new(
            InteractableId(index as u32),
            def.kind.clone(),
            def.policy.clone(),
        );
        if let Some(prompt) = &def.prompt {
            object = object.with_prompt(prompt.clone());
        }
        if let Some(color) = def.glow_color {
            object = object.with_glow_color(color);
        }
        interactables.push(world.spawn((object, MapPosition { pos }, footprint)).id());
    }

    log::info!(
        "World built: {} colliders, {} doors, {} interactables, actor at ({}, {})",
        desc.colliders.len(),
        desc.doors.len(),
        desc.interactables.len(),
        spawn.x,
        spawn.y
    );

    let index = WorldIndex {
        actor,
        interactables,
        doors,
    };
    world.insert_resource(index.clone());
    index
}
