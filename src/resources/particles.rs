//! Transient particle field used as visual feedback.
//!
//! Particles are plain values owned by the [`ParticleField`] resource rather
//! than entities: they never interact with anything, live for a few dozen
//! ticks and are only read back by presentation through [`ParticleField::particles`].
//!
//! # Integration
//!
//! Every tick each particle:
//! 1. moves by its velocity,
//! 2. gains its gravity on the Y axis (Y+ is down),
//! 3. loses one tick of lifetime,
//! 4. has its velocity damped.
//!
//! Dead particles are dropped by rebuilding the live set, never by deleting
//! while iterating.

use std::f32::consts::TAU;

use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::Vec2;

use crate::components::tint::Tint;
use crate::resources::simconfig::ParticleConfig;
use crate::resources::simrng::random_f32_range;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// World units per tick.
    pub vel: Vec2,
    pub color: Tint,
    /// Remaining lifetime, in ticks.
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    /// Downward acceleration per tick.
    pub gravity: f32,
}

impl Particle {
    /// Remaining life as a fraction of the initial life; presentation uses
    /// it as opacity.
    pub fn alpha(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    fn integrate(&mut self, damping: f32) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.life -= 1.0;
        self.vel *= damping;
    }
}

#[derive(Resource, Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    gravity: f32,
    damping: f32,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(&ParticleConfig::default())
    }
}

impl ParticleField {
    pub fn new(config: &ParticleConfig) -> Self {
        Self {
            particles: Vec::new(),
            gravity: config.gravity,
            damping: config.damping,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Add a single particle with the field's gravity.
    pub fn add(&mut self, pos: Vec2, vel: Vec2, color: Tint, life: f32, size: f32) {
        self.particles.push(Particle {
            pos,
            vel,
            color,
            life,
            max_life: life,
            size,
            gravity: self.gravity,
        });
    }

    /// Radial burst of `count` particles evenly spaced in angle.
    ///
    /// Speed is drawn from `[2, 5)`, life from `[30, 50)` ticks and size from
    /// `[2, 4)`.
    pub fn emit_explosion(&mut self, rng: &mut Rng, at: Vec2, color: Tint, count: u32) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = random_f32_range(rng, 2.0, 5.0);
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let life = random_f32_range(rng, 30.0, 50.0);
            let size = random_f32_range(rng, 2.0, 4.0);
            self.add(at, vel, color, life, size);
        }
    }

    /// Upward puff of six green particles, used when something is picked up.
    pub fn emit_pickup_effect(&mut self, rng: &mut Rng, at: Vec2) {
        for _ in 0..6 {
            let vx = random_f32_range(rng, -2.0, 2.0);
            let vy = -random_f32_range(rng, 1.0, 4.0);
            self.add(at, Vec2::new(vx, vy), Tint::PICKUP, 40.0, 3.0);
        }
    }

    /// One dust mote scattered around `at`, drifting down.
    pub fn emit_dust(&mut self, rng: &mut Rng, at: Vec2) {
        let jitter = Vec2::new(
            random_f32_range(rng, -10.0, 10.0),
            random_f32_range(rng, -5.0, 5.0),
        );
        let vel = Vec2::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, 1.0, 3.0),
        );
        let life = random_f32_range(rng, 15.0, 25.0);
        let size = random_f32_range(rng, 1.0, 2.0);
        self.add(at + jitter, vel, Tint::DUST, life, size);
    }

    /// Integrate every particle one tick and drop the dead ones.
    ///
    /// Returns how many particles expired.
    pub fn step(&mut self) -> usize {
        let before = self.particles.len();
        let damping = self.damping;
        self.particles = std::mem::take(&mut self.particles)
            .into_iter()
            .filter_map(|mut p| {
                p.integrate(damping);
                (!p.is_dead()).then_some(p)
            })
            .collect();
        before - self.particles.len()
    }
}
