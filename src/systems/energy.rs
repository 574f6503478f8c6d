//! Energy model system.
//!
//! Runs first in the tick: it resolves the sprint flag from the intent and
//! the movement flag left by the previous tick, drains or regenerates energy
//! and hands the resulting speed cap to the actor's [`RigidBody`].

use bevy_ecs::prelude::*;

use crate::components::actor::Actor;
use crate::components::energy::Energy;
use crate::components::rigidbody::RigidBody;
use crate::components::tint::Tint;
use crate::events::presentation::PresentationEvent;
use crate::resources::input::{LowEnergyNotice, MoveIntent};
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;

const LOW_ENERGY_TEXT: &str = "Too tired to sprint! Rest to recover energy";
const LOW_ENERGY_MS: u32 = 2000;

pub fn energy_system(
    mut query: Query<(&Actor, &mut Energy, &mut RigidBody)>,
    intent: Res<MoveIntent>,
    config: Res<SimConfig>,
    time: Res<WorldTime>,
    mut notice: ResMut<LowEnergyNotice>,
    mut writer: MessageWriter<PresentationEvent>,
) {
    let cfg = &config.energy;
    for (actor, mut energy, mut body) in query.iter_mut() {
        if intent.sprint
            && intent.has_direction()
            && energy.current <= cfg.min_sprint
            && notice.ready(time.elapsed, cfg.low_energy_notice_interval_ms)
        {
            writer.write(PresentationEvent::notify(
                LOW_ENERGY_TEXT,
                LOW_ENERGY_MS,
                Tint::ALERT,
            ));
            notice.last_shown = Some(time.elapsed);
            log::debug!("sprint refused at energy {:.1}", energy.current);
        }

        energy.tick(intent.sprint, actor.moving, time.delta, cfg);
        body.max_speed = energy.max_speed(config.movement.walk_speed, config.movement.sprint_speed);
    }
}
