//! Time update system.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick with the externally supplied delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta milliseconds on the `WorldTime` resource.
///
/// `dt` is expected to be the already validated frame delta in milliseconds.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.elapsed += f64::from(dt);
    wt.delta = dt;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_delta_and_counts_frames() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, 100.0);
        update_world_time(&mut world, 50.0);
        let wt = world.resource::<WorldTime>();
        assert_eq!(wt.elapsed, 150.0);
        assert_eq!(wt.delta, 50.0);
        assert_eq!(wt.frame_count, 2);
    }
}
