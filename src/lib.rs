//! Unscripted simulation core.
//!
//! A real-time 2D top-down simulation: an actor moves through a world of
//! static rectangular obstacles, spends energy to sprint, and interacts with
//! nearby objects, while a particle field provides visual feedback.
//!
//! Rendering, input mapping, notifications and audio are external
//! collaborators. They drive [`simulation::Simulation`] one tick at a time,
//! read snapshots back, and drain outbound
//! [`events::presentation::PresentationEvent`]s.

pub mod components;
pub mod error;
pub mod events;
pub mod resources;
pub mod simulation;
pub mod systems;
pub mod world;
