//! Per-tick movement intent resource.
//!
//! Key-to-intent mapping is done by whoever drives the simulation; the core
//! only ever sees the resulting [`MoveIntent`], written once at the start of
//! each tick.
use bevy_ecs::prelude::*;
use glam::Vec2;

/// Directional intent and sprint request for the current tick.
///
/// `direction` components are expected in `[-1, 1]`; a zero vector means no
/// input. The movement system normalizes it, so diagonal input is no faster
/// than straight input.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub direction: Vec2,
    pub sprint: bool,
}

impl MoveIntent {
    pub fn new(dx: f32, dy: f32, sprint: bool) -> Self {
        Self {
            direction: Vec2::new(dx, dy),
            sprint,
        }
    }

    /// Whether any direction is requested.
    pub fn has_direction(&self) -> bool {
        self.direction != Vec2::ZERO
    }

    pub fn is_finite(&self) -> bool {
        self.direction.is_finite()
    }
}

/// Throttle state for the "too tired to sprint" notice.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LowEnergyNotice {
    /// Clock time (ms) the notice was last emitted.
    pub last_shown: Option<f64>,
}

impl LowEnergyNotice {
    /// Whether a notice may be shown at `now` given the minimum `interval`.
    pub fn ready(&self, now: f64, interval: f64) -> bool {
        match self.last_shown {
            None => true,
            Some(last) => now - last > interval,
        }
    }
}
