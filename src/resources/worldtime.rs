use bevy_ecs::prelude::Resource;

/// Injected simulation clock, in milliseconds.
///
/// Nothing in the simulation reads a wall clock; the tick driver advances
/// this resource with the externally supplied frame delta and every
/// time-dependent rule (energy rates, interaction cooldown) reads it from
/// here.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    /// Milliseconds elapsed since the simulation started.
    pub elapsed: f64,
    /// Delta of the current tick, in milliseconds.
    pub delta: f32,
    pub frame_count: u64,
}
