//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulation world: the actor and its resources, static obstacles, and
//! interactable objects.
//!
//! Submodules overview:
//! - [`actor`] – actor marker, facing and movement state
//! - [`boxcollider`] – axis-aligned box used for collision and footprints
//! - [`energy`] – depletable energy that gates sprinting
//! - [`interactable`] – proximity-triggered objects and their side-effects
//! - [`inventory`] – capacity-bounded item storage
//! - [`mapposition`] – world-space position (top-left corner) of an entity
//! - [`obstacle`] – walls and doors
//! - [`rigidbody`] – velocity, acceleration, friction and speed cap
//! - [`tint`] – RGBA color handed to presentation

pub mod actor;
pub mod boxcollider;
pub mod energy;
pub mod interactable;
pub mod inventory;
pub mod mapposition;
pub mod obstacle;
pub mod rigidbody;
pub mod tint;
