//! Depletable energy that gates sprinting.
//!
//! Sprinting is not a latched state: every tick [`Energy::tick`] re-checks
//! that sprint was requested, that the actor is moving and that energy is
//! above the sprint threshold. Energy drains while sprinting and regenerates
//! otherwise, faster at rest than while walking, and is always clamped to
//! `[0, max]`.

use bevy_ecs::prelude::Component;

use crate::resources::simconfig::EnergyConfig;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Energy {
    pub current: f32,
    pub max: f32,
    /// Sprint flag resolved by the last tick.
    pub sprinting: bool,
}

impl Energy {
    /// Full energy pool of size `max`.
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            sprinting: false,
        }
    }

    /// Start at `current`, clamped into `[0, max]`.
    pub fn with_current(mut self, current: f32) -> Self {
        self.set(current);
        self
    }

    /// Set energy, saturating at both ends.
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }

    /// Add (or remove, when negative) energy, saturating at both ends.
    pub fn add(&mut self, amount: f32) {
        self.set(self.current + amount);
    }

    /// Refill to `max`.
    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    /// Advance the energy model by `dt_ms`.
    ///
    /// `moving` is the movement flag from the previous movement pass. Returns
    /// the resolved sprint flag, which is also stored on `self`.
    pub fn tick(&mut self, requested: bool, moving: bool, dt_ms: f32, cfg: &EnergyConfig) -> bool {
        self.sprinting = requested && moving && self.current > cfg.min_sprint;

        if self.sprinting {
            self.set(self.current - cfg.sprint_decay * dt_ms);
            if self.current <= 0.0 {
                self.sprinting = false;
            }
        } else {
            let regen = if moving {
                cfg.walk_regen
            } else {
                cfg.idle_regen
            };
            self.set(self.current + regen * dt_ms);
        }
        self.sprinting
    }

    /// Speed cap implied by the current sprint flag.
    pub fn max_speed(&self, walk_speed: f32, sprint_speed: f32) -> f32 {
        if self.sprinting {
            sprint_speed
        } else {
            walk_speed
        }
    }
}
