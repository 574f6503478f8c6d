//! Simulation systems.
//!
//! This module groups all ECS systems that advance the simulation. The tick
//! schedule chains them in a fixed order: energy, movement, proximity, sprint
//! dust, particles.
//!
//! Submodules overview
//! - [`energy`] – resolve sprint, drain/regenerate energy, set the speed cap
//! - [`interaction`] – nearest-object selection and the one-shot interaction system
//! - [`movement`] – accelerate, clamp, and resolve collisions per axis
//! - [`particles`] – sprint dust and particle integration
//! - [`presentation`] – forward events to the presentation thread
//! - [`proximity`] – near flags and glow for interactables
//! - [`time`] – update simulation time and delta

pub mod energy;
pub mod interaction;
pub mod movement;
pub mod particles;
pub mod presentation;
pub mod proximity;
pub mod time;
