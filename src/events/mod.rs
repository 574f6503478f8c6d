//! Event types exchanged between the simulation and its collaborators.
//!
//! Events are one-way: the simulation produces them, presentation consumes
//! them, and nothing flows back.
//!
//! Submodules:
//! - [`interaction`] – structured result of an interaction attempt
//! - [`presentation`] – notifications and sound cues for the presentation thread
pub mod interaction;
pub mod presentation;
