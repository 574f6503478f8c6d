//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the simulation world
//! and accessed by systems during a tick: the injected clock, the per-tick
//! intent, tuning, the particle field and the shared RNG. Each submodule
//! documents the semantics and intended usage of its resource(s).
//!
//! Overview
//! - `input` – per-tick movement intent and the low-energy notice throttle
//! - `particles` – live particle set and its emitters
//! - `presentation` – bridge and channel for the presentation thread
//! - `simconfig` – tuning constants, loadable from INI
//! - `simrng` – seeded RNG for loot and particle spread
//! - `worldtime` – simulation time and delta
pub mod input;
pub mod particles;
pub mod presentation;
pub mod simconfig;
pub mod simrng;
pub mod worldtime;
