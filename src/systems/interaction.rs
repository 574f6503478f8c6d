//! Interaction protocol.
//!
//! [`try_interact_system`] is run on demand (it is registered as a one-shot
//! system, not part of the tick schedule) and engages at most one
//! interactable per attempt:
//!
//! 1. If the actor is still inside its cooldown window, nothing happens.
//! 2. The nearest non-inert object strictly within range is selected; ties
//!    go to the lower [`InteractableId`], i.e. world description order.
//! 3. Engaging an object starts the cooldown, whether or not the
//!    interaction succeeds.
//! 4. Consumables move their item into the inventory and go inert;
//!    repeatables run their [`SideEffect`] and stay available.
//!
//! Every notification produced along the way is both written to the
//! presentation queue and returned in the [`InteractionResult`].

use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::actor::Actor;
use crate::components::boxcollider::BoxCollider;
use crate::components::energy::Energy;
use crate::components::interactable::{
    EnergyGain, Interactable, InteractableId, InteractionPolicy, Notice, SearchEffect, SideEffect,
};
use crate::components::inventory::{Inventory, Item};
use crate::components::mapposition::MapPosition;
use crate::components::tint::Tint;
use crate::events::interaction::{InteractionOutcome, InteractionResult};
use crate::events::presentation::PresentationEvent;
use crate::resources::particles::ParticleField;
use crate::resources::simconfig::SimConfig;
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;

type EventList = SmallVec<[PresentationEvent; 4]>;

const NOTHING_HERE: &str = "Nothing to interact with here";
const NOTHING_HERE_MS: u32 = 1500;
const INVENTORY_FULL: &str = "Inventory full!";
const FEEDBACK_BURST: u32 = 8;

/// Pick the nearest candidate strictly within `range`.
///
/// Candidates are `(id, distance, payload)`. Equal distances resolve to the
/// lower id, independent of iteration order.
pub fn select_nearest<T>(
    candidates: impl IntoIterator<Item = (InteractableId, f32, T)>,
    range: f32,
) -> Option<(InteractableId, T)> {
    candidates
        .into_iter()
        .filter(|(_, distance, _)| *distance < range)
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
        .map(|(id, _, payload)| (id, payload))
}

fn notice_event(notice: &Notice) -> PresentationEvent {
    PresentationEvent::notify(notice.text.clone(), notice.duration_ms, notice.color)
}

fn pick<'a>(rng: &mut Rng, pool: &'a [String]) -> Option<&'a String> {
    if pool.is_empty() {
        return None;
    }
    pool.get(rng.usize(..pool.len()))
}

/// Mutable state a side-effect may touch.
pub struct EffectContext<'a> {
    pub energy: &'a mut Energy,
    pub inventory: &'a mut Inventory,
    pub particles: &'a mut ParticleField,
    pub rng: &'a mut Rng,
    /// Center of the object running the effect.
    pub at: Vec2,
}

/// Run a repeatable object's side-effect.
///
/// Returns the item added to the inventory, if any. Notifications are
/// appended to `events`.
pub fn apply_side_effect(
    effect: &SideEffect,
    ctx: &mut EffectContext<'_>,
    events: &mut EventList,
) -> Option<Item> {
    match effect {
        SideEffect::None => None,
        SideEffect::Restore {
            gain,
            notice,
            burst,
        } => {
            match gain {
                EnergyGain::Full => ctx.energy.restore_full(),
                EnergyGain::Amount(amount) => ctx.energy.add(*amount),
            }
            events.push(notice_event(notice));
            if let Some(burst) = burst {
                ctx.particles
                    .emit_explosion(ctx.rng, ctx.at, burst.color, burst.count);
            }
            None
        }
        SideEffect::Search(search) => {
            let SearchEffect {
                pool,
                category,
                requires,
                energy_bonus,
                found_prefix,
                found_color,
                full_notice,
                ..
            } = search;
            if let Some(req) = requires {
                if !ctx.inventory.contains(&req.item) {
                    events.push(notice_event(&req.locked_notice));
                    return None;
                }
            }
            let Some(name) = pick(ctx.rng, pool) else {
                log::warn!("search effect with an empty pool");
                return None;
            };
            let item = Item::new(name.clone(), category.clone(), search.describe(name));
            match ctx.inventory.add(item.clone()) {
                Ok(()) => {
                    events.push(PresentationEvent::notify(
                        format!("{}{}", found_prefix, name),
                        2000,
                        *found_color,
                    ));
                    ctx.particles.emit_pickup_effect(ctx.rng, ctx.at);
                    ctx.energy.add(*energy_bonus);
                    Some(item)
                }
                Err(_) => {
                    events.push(notice_event(full_notice));
                    None
                }
            }
        }
        SideEffect::Broadcast {
            pool,
            prefix,
            energy_bonus,
        } => {
            if let Some(show) = pick(ctx.rng, pool) {
                events.push(PresentationEvent::notify(
                    format!("{}{}", prefix, show),
                    PresentationEvent::DEFAULT_NOTIFICATION_MS,
                    Tint::SKY,
                ));
            }
            ctx.energy.add(*energy_bonus);
            None
        }
    }
}

/// Attempt one interaction. Registered as a one-shot system.
pub fn try_interact_system(
    mut actors: Query<(&MapPosition, &mut Actor, &mut Energy, &mut Inventory)>,
    mut objects: Query<(&MapPosition, &BoxCollider, &mut Interactable), Without<Actor>>,
    time: Res<WorldTime>,
    config: Res<SimConfig>,
    mut rng: ResMut<SimRng>,
    mut particles: ResMut<ParticleField>,
    mut writer: MessageWriter<PresentationEvent>,
) -> InteractionResult {
    let Ok((actor_pos, mut actor, mut energy, mut inventory)) = actors.single_mut() else {
        log::warn!("interaction attempted without exactly one actor");
        return InteractionResult::default();
    };

    let now = time.elapsed;
    if !actor.off_cooldown(now, config.interaction.cooldown_ms) {
        return InteractionResult::on_cooldown();
    }

    let center = actor.center(actor_pos.pos);
    let candidates = objects
        .iter()
        .filter(|(_, _, object)| !object.inert)
        .map(|(pos, footprint, object)| {
            let footprint_center = footprint.center(pos.pos);
            (object.id, center.distance(footprint_center), footprint_center)
        });
    let mut events = EventList::new();

    let Some((id, at)) = select_nearest(candidates, config.interaction.range) else {
        events.push(PresentationEvent::notify(
            NOTHING_HERE,
            NOTHING_HERE_MS,
            Tint::GREY,
        ));
        writer.write_batch(events.iter().cloned());
        return InteractionResult::nothing_in_range(events);
    };
    let Some((_, _, mut object)) = objects.iter_mut().find(|(_, _, object)| object.id == id)
    else {
        return InteractionResult::default();
    };

    actor.last_interaction = Some(now);

    let rng = &mut rng.0;
    let consumable = object.is_consumable();
    let mut result = InteractionResult {
        interactable_id: Some(id),
        ..Default::default()
    };

    match object.policy.clone() {
        InteractionPolicy::Consumable { item } => match inventory.add(item.clone()) {
            Ok(()) => {
                object.inert = true;
                object.is_near = false;
                object.has_been_interacted = true;
                result.item_gained = Some(item);
                result.happened = true;
            }
            Err(_) => {
                events.push(PresentationEvent::notify(
                    INVENTORY_FULL,
                    2000,
                    Tint::ALERT,
                ));
                result.outcome = InteractionOutcome::InventoryFull;
            }
        },
        InteractionPolicy::Repeatable { effect } => {
            let mut ctx = EffectContext {
                energy: &mut *energy,
                inventory: &mut *inventory,
                particles: &mut *particles,
                rng: &mut *rng,
                at,
            };
            result.item_gained = apply_side_effect(&effect, &mut ctx, &mut events);
            object.has_been_interacted = true;
            result.happened = true;
        }
    }

    if result.happened {
        let color = if consumable { Tint::PICKUP } else { Tint::SKY };
        particles.emit_explosion(rng, at, color, FEEDBACK_BURST);
        events.push(PresentationEvent::sound("interact"));
        if consumable {
            particles.emit_pickup_effect(rng, at);
        }
        result.outcome = InteractionOutcome::Succeeded;
        log::debug!("interacted with {} ({:?})", object.kind, id);
    }

    writer.write_batch(events.iter().cloned());
    result.effect_events = events;
    result
}
