//! Tick-level integration tests for movement, energy, interaction, particles
//! and presentation, driven through the public `Simulation` facade.

use glam::Vec2;

use unscripted::components::boxcollider::Rect;
use unscripted::components::energy::Energy;
use unscripted::components::interactable::{
    EnergyGain, InteractableId, InteractionPolicy, Notice, SideEffect,
};
use unscripted::components::inventory::Item;
use unscripted::components::mapposition::MapPosition;
use unscripted::components::tint::Tint;
use unscripted::error::TickError;
use unscripted::events::interaction::InteractionOutcome;
use unscripted::events::presentation::PresentationEvent;
use unscripted::resources::simconfig::SimConfig;
use unscripted::simulation::Simulation;
use unscripted::world::{DoorDef, InteractableDef, WorldDescription};

const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Open space with the actor at the origin. Its center is at (16, 16) and
/// its hitbox spans x in [4, 28], y in [8, 28].
fn open_world() -> WorldDescription {
    WorldDescription {
        spawn: Some(Vec2::ZERO),
        ..Default::default()
    }
}

/// A 10x10 footprint centered at `center`.
fn footprint(center: Vec2) -> Rect {
    Rect::new(center.x - 5.0, center.y - 5.0, 10.0, 10.0)
}

fn pickup(name: &str, center: Vec2) -> InteractableDef {
    InteractableDef::new(
        name,
        footprint(center),
        InteractionPolicy::Consumable {
            item: Item::new(name, "misc", "test item"),
        },
    )
}

fn rest_spot(name: &str, center: Vec2) -> InteractableDef {
    InteractableDef::new(
        name,
        footprint(center),
        InteractionPolicy::Repeatable {
            effect: SideEffect::Restore {
                gain: EnergyGain::Amount(5.0),
                notice: Notice::new("Rested", 1000, Tint::SKY),
                burst: None,
            },
        },
    )
}

fn sim_with(desc: WorldDescription) -> Simulation {
    Simulation::new(SimConfig::default(), &desc)
}

fn set_energy(sim: &mut Simulation, value: f32) {
    let actor = sim.index().actor;
    sim.world_mut()
        .get_mut::<Energy>(actor)
        .unwrap()
        .set(value);
}

fn teleport(sim: &mut Simulation, pos: Vec2) {
    let actor = sim.index().actor;
    sim.world_mut().get_mut::<MapPosition>(actor).unwrap().pos = pos;
}

fn texts(events: &[PresentationEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| e.text().map(str::to_string))
        .collect()
}

// ==================== MOVEMENT ====================

#[test]
fn diagonal_move_slides_along_blocking_wall() {
    let mut desc = open_world();
    desc.colliders.push(Rect::new(40.0, -200.0, 20.0, 400.0));
    let mut sim = sim_with(desc);

    let mut last = sim.advance(16.0, 1.0, 1.0, false).unwrap();
    for _ in 0..60 {
        last = sim.advance(16.0, 1.0, 1.0, false).unwrap();
    }

    // Hitbox right edge (pos.x + 28) never crosses the wall at x = 40.
    assert!(last.position.x <= 12.0 + EPSILON);
    assert!(last.position.y > 30.0);
    assert!(last.hitbox.x + last.hitbox.width <= 40.0 + EPSILON);
}

#[test]
fn closed_door_blocks_and_open_door_does_not() {
    let mut desc = open_world();
    desc.doors.push(DoorDef {
        id: 0,
        rect: Rect::new(40.0, -200.0, 20.0, 400.0),
        open: false,
    });
    let mut sim = sim_with(desc);

    for _ in 0..100 {
        sim.advance(16.0, 1.0, 0.0, false).unwrap();
    }
    let blocked = sim.actor().unwrap();
    assert!(blocked.position.x <= 12.0 + EPSILON);

    assert!(sim.set_door_open(0, true));
    assert_eq!(sim.door_open(0), Some(true));
    for _ in 0..100 {
        sim.advance(16.0, 1.0, 0.0, false).unwrap();
    }
    assert!(sim.actor().unwrap().position.x > 60.0);

    assert!(!sim.set_door_open(99, true));
    assert_eq!(sim.door_open(99), None);
}

#[test]
fn rejected_tick_leaves_state_unchanged() {
    let mut sim = sim_with(open_world());
    sim.advance(16.0, 1.0, 0.0, true).unwrap();
    let before = sim.actor().unwrap();
    let frames = sim.frame_count();
    let elapsed = sim.elapsed_ms();

    assert_eq!(
        sim.advance(-1.0, 1.0, 0.0, false),
        Err(TickError::InvalidDelta(-1.0))
    );
    assert!(matches!(
        sim.advance(16.0, f32::NAN, 0.0, false),
        Err(TickError::InvalidIntent { .. })
    ));

    assert_eq!(sim.actor().unwrap(), before);
    assert_eq!(sim.frame_count(), frames);
    assert_eq!(sim.elapsed_ms(), elapsed);
}

#[test]
fn missing_actor_rejects_tick_before_anything_moves() {
    let mut sim = sim_with(open_world());
    sim.advance(16.0, 0.0, 0.0, false).unwrap();
    sim.emit_explosion(50.0, 50.0, Tint::EXPLOSION, 4);
    let frames = sim.frame_count();
    let elapsed = sim.elapsed_ms();
    let particles = sim.particles().to_vec();

    let actor = sim.index().actor;
    assert!(sim.world_mut().despawn(actor));

    assert_eq!(
        sim.advance(16.0, 1.0, 0.0, false),
        Err(TickError::MissingActor)
    );
    assert_eq!(sim.frame_count(), frames);
    assert_eq!(sim.elapsed_ms(), elapsed);
    assert_eq!(sim.particles(), particles.as_slice());
}

#[test]
fn speed_drops_to_walk_cap_the_tick_sprint_ends() {
    let mut config = SimConfig::default();
    // Strong enough to reach the sprint cap.
    config.movement.acceleration = 2.0;
    let mut sim = Simulation::new(config, &open_world());

    sim.advance(0.0, 1.0, 0.0, true).unwrap();
    let mut fast = sim.advance(16.0, 1.0, 0.0, true).unwrap();
    for _ in 0..10 {
        fast = sim.advance(16.0, 1.0, 0.0, true).unwrap();
    }
    assert!(fast.sprinting);
    assert!(fast.velocity.length() > 4.0);

    // Intent released: the walk cap applies on this very tick.
    let released = sim.advance(16.0, 0.0, 0.0, false).unwrap();
    assert!(approx_eq(released.max_speed, 1.5));
    assert!(released.velocity.length() <= released.max_speed + EPSILON);
    assert!(released.position.x - fast.position.x <= 1.5 + EPSILON);

    // Sprint lost to exhaustion while still pushing.
    for _ in 0..10 {
        sim.advance(16.0, 1.0, 0.0, true).unwrap();
    }
    set_energy(&mut sim, 0.0);
    let tired = sim.advance(16.0, 1.0, 0.0, true).unwrap();
    assert!(!tired.sprinting);
    assert!(tired.velocity.length() <= tired.max_speed + EPSILON);
}

#[test]
fn out_of_range_tuning_cannot_break_motion_or_energy() {
    let mut config = SimConfig::default();
    config
        .load_from_str("[movement]\nfriction = 1.5\nwalk_speed = -1\n[energy]\nidle_regen = nan\n")
        .unwrap();
    let mut sim = Simulation::new(config, &open_world());

    let mut last = sim.advance(16.0, 1.0, 0.0, false).unwrap();
    for _ in 0..20 {
        last = sim.advance(16.0, 1.0, 0.0, false).unwrap();
        assert!(last.velocity.length() <= last.max_speed + EPSILON);
    }
    assert!(last.position.x > 0.0);

    let idle = sim.advance(100.0, 0.0, 0.0, false).unwrap();
    assert!(idle.energy.is_finite());
    assert!(idle.energy >= 0.0 && idle.energy <= idle.max_energy);
}

// ==================== ENERGY ====================

#[test]
fn sprinting_drains_energy_and_raises_the_cap() {
    let mut sim = sim_with(open_world());
    // Movement starts on this tick; sprint engages from the next one.
    let primed = sim.advance(0.0, 1.0, 0.0, true).unwrap();
    assert!(!primed.sprinting);
    assert!(approx_eq(primed.energy, 100.0));

    let mut last = primed;
    for _ in 0..10 {
        last = sim.advance(100.0, 1.0, 0.0, true).unwrap();
    }
    assert!(approx_eq(last.energy, 20.0));
    assert!(last.sprinting);
    assert!(approx_eq(last.max_speed, 5.0));
}

#[test]
fn sprint_stops_at_threshold_and_walk_cap_returns() {
    let mut sim = sim_with(open_world());
    sim.advance(0.0, 1.0, 0.0, true).unwrap();
    set_energy(&mut sim, 10.0);

    let snap = sim.advance(100.0, 1.0, 0.0, true).unwrap();
    assert!(!snap.sprinting);
    assert!(approx_eq(snap.max_speed, 1.5));
    // Walking regenerates at the slower rate.
    assert!(approx_eq(snap.energy, 13.0));
}

#[test]
fn resting_regenerates_faster_than_walking() {
    let mut sim = sim_with(open_world());
    set_energy(&mut sim, 50.0);
    let idle = sim.advance(100.0, 0.0, 0.0, false).unwrap();
    assert!(approx_eq(idle.energy, 56.0));
    assert!(idle.energy <= idle.max_energy);
}

#[test]
fn low_energy_notice_is_throttled() {
    let mut sim = sim_with(open_world());
    sim.advance(0.0, 1.0, 0.0, true).unwrap();

    let mut notices = 0;
    for _ in 0..40 {
        set_energy(&mut sim, 0.0);
        sim.advance(100.0, 1.0, 0.0, true).unwrap();
        notices += texts(&sim.drain_events())
            .iter()
            .filter(|t| t.starts_with("Too tired to sprint"))
            .count();
    }
    // Shown at 100 ms and again once more than 3000 ms have passed.
    assert_eq!(notices, 2);
}

// ==================== INTERACTION ====================

#[test]
fn nearest_object_is_chosen() {
    let mut desc = open_world();
    desc.interactables
        .push(rest_spot("Far", Vec2::new(16.0 + 30.0, 16.0)));
    desc.interactables
        .push(rest_spot("Near", Vec2::new(16.0, 16.0 + 10.0)));
    desc.interactables
        .push(rest_spot("Away", Vec2::new(16.0 - 50.0, 16.0)));
    let mut sim = sim_with(desc);

    sim.advance(0.0, 0.0, 0.0, false).unwrap();
    let flags: Vec<bool> = sim.interactables().iter().map(|o| o.near).collect();
    assert_eq!(flags, vec![true, true, false]);

    let result = sim.try_interact();
    assert!(result.happened);
    assert_eq!(result.outcome, InteractionOutcome::Succeeded);
    assert_eq!(result.interactable_id, Some(InteractableId(1)));
    assert!(sim.interactable(InteractableId(1)).unwrap().used);
    assert!(!sim.interactable(InteractableId(0)).unwrap().used);
}

#[test]
fn nothing_in_range_is_reported() {
    let mut desc = open_world();
    desc.interactables
        .push(rest_spot("Away", Vec2::new(200.0, 200.0)));
    let mut sim = sim_with(desc);

    let result = sim.try_interact();
    assert!(!result.happened);
    assert_eq!(result.outcome, InteractionOutcome::NothingInRange);
    assert_eq!(
        texts(&result.effect_events),
        vec!["Nothing to interact with here".to_string()]
    );
    assert_eq!(texts(&sim.drain_events()), texts(&result.effect_events));
}

#[test]
fn cooldown_gates_repeat_attempts() {
    let mut desc = open_world();
    desc.interactables
        .push(rest_spot("Chair", Vec2::new(16.0, 26.0)));
    let mut sim = sim_with(desc);

    assert!(sim.try_interact().happened);

    sim.advance(300.0, 0.0, 0.0, false).unwrap();
    let early = sim.try_interact();
    assert!(!early.happened);
    assert_eq!(early.outcome, InteractionOutcome::OnCooldown);
    assert!(early.effect_events.is_empty());

    sim.advance(300.0, 0.0, 0.0, false).unwrap();
    assert!(sim.try_interact().happened);
}

#[test]
fn consumable_is_taken_once() {
    let mut desc = open_world();
    desc.interactables.push(pickup("Coin", Vec2::new(16.0, 26.0)));
    let mut sim = sim_with(desc);

    sim.advance(0.0, 0.0, 0.0, false).unwrap();
    let taken = sim.try_interact();
    assert!(taken.happened);
    assert_eq!(taken.item_gained.as_ref().map(|i| i.name.as_str()), Some("Coin"));
    assert!(
        taken
            .effect_events
            .iter()
            .any(|e| *e == PresentationEvent::sound("interact"))
    );

    sim.advance(600.0, 0.0, 0.0, false).unwrap();
    let coin = sim.interactable(InteractableId(0)).unwrap();
    assert!(coin.inert);
    assert!(!coin.near);

    let again = sim.try_interact();
    assert!(!again.happened);
    assert_eq!(again.outcome, InteractionOutcome::NothingInRange);
    assert_eq!(sim.actor().unwrap().inventory.len(), 1);
}

#[test]
fn full_inventory_refuses_pickup_but_starts_cooldown() {
    let mut config = SimConfig::default();
    config.interaction.inventory_capacity = 1;
    let mut desc = open_world();
    desc.interactables.push(pickup("Coin", Vec2::new(16.0, 26.0)));
    desc.interactables.push(pickup("Ring", Vec2::new(16.0, 36.0)));
    let mut sim = Simulation::new(config, &desc);

    assert!(sim.try_interact().happened);
    sim.advance(600.0, 0.0, 0.0, false).unwrap();

    let refused = sim.try_interact();
    assert!(!refused.happened);
    assert_eq!(refused.outcome, InteractionOutcome::InventoryFull);
    assert_eq!(refused.interactable_id, Some(InteractableId(1)));
    assert_eq!(texts(&refused.effect_events), vec!["Inventory full!".to_string()]);
    assert!(!sim.interactable(InteractableId(1)).unwrap().inert);

    assert_eq!(sim.try_interact().outcome, InteractionOutcome::OnCooldown);
    assert_eq!(sim.actor().unwrap().inventory.len(), 1);
}

#[test]
fn house_closet_needs_the_keys() {
    let mut sim = sim_with(WorldDescription::house());
    let closet_center = Vec2::new(370.0, 220.0);
    let keys_center = Vec2::new(247.5, 167.5);
    let half = Vec2::splat(16.0);

    teleport(&mut sim, closet_center - half);
    let locked = sim.try_interact();
    assert_eq!(locked.interactable_id, Some(InteractableId(4)));
    assert!(
        texts(&locked.effect_events).contains(&"The closet is locked. Need keys...".to_string())
    );
    assert!(locked.item_gained.is_none());

    sim.advance(600.0, 0.0, 0.0, false).unwrap();
    teleport(&mut sim, keys_center - half);
    let keys = sim.try_interact();
    assert_eq!(keys.interactable_id, Some(InteractableId(2)));
    assert_eq!(
        keys.item_gained.as_ref().map(|i| i.name.as_str()),
        Some("House Keys")
    );

    sim.advance(600.0, 0.0, 0.0, false).unwrap();
    teleport(&mut sim, closet_center - half);
    let opened = sim.try_interact();
    let found = opened.item_gained.expect("closet yields an item");
    assert_eq!(found.category, "clothing");
    assert_eq!(found.description, format!("{} from the closet", found.name));
    assert_eq!(sim.actor().unwrap().inventory.len(), 2);
}

// ==================== PARTICLES ====================

#[test]
fn particles_expire_within_their_lifetime() {
    let mut sim = sim_with(open_world());
    sim.emit_explosion(100.0, 100.0, Tint::EXPLOSION, 12);
    sim.emit_pickup_effect(100.0, 100.0);
    assert_eq!(sim.particles().len(), 18);
    assert!(sim.particles().iter().all(|p| p.life <= p.max_life));

    // Pickup particles live exactly 40 ticks.
    for _ in 0..39 {
        sim.advance(16.0, 0.0, 0.0, false).unwrap();
    }
    let pickups = |sim: &Simulation| {
        sim.particles()
            .iter()
            .filter(|p| p.color == Tint::PICKUP)
            .count()
    };
    assert_eq!(pickups(&sim), 6);
    sim.advance(16.0, 0.0, 0.0, false).unwrap();
    assert_eq!(pickups(&sim), 0);

    // Explosion particles live fewer than 50.
    for _ in 0..10 {
        sim.advance(16.0, 0.0, 0.0, false).unwrap();
    }
    assert!(sim.particles().is_empty());
}

#[test]
fn sprinting_kicks_up_dust() {
    let mut sim = sim_with(open_world());
    sim.advance(0.0, 1.0, 0.0, true).unwrap();
    let mut seen = 0;
    for _ in 0..20 {
        sim.advance(16.0, 1.0, 0.0, true).unwrap();
        seen = seen.max(sim.particles().len());
    }
    assert!(seen > 0);
    assert!(
        sim.particles()
            .iter()
            .all(|p| p.color == Tint::DUST)
    );
}

// ==================== PRESENTATION ====================

#[test]
fn presentation_thread_receives_forwarded_events() {
    let mut desc = open_world();
    desc.interactables
        .push(rest_spot("Chair", Vec2::new(16.0, 26.0)));
    let mut sim = sim_with(desc);
    sim.attach_presentation();

    assert!(sim.try_interact().happened);
    sim.advance(16.0, 0.0, 0.0, false).unwrap();

    let stats = sim.detach_presentation().unwrap();
    assert_eq!(stats.notifications, 1);
    assert_eq!(stats.sounds, 1);
    assert!(sim.detach_presentation().is_none());
}
