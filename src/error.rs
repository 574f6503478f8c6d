//! Errors surfaced by the tick driver.
//!
//! Only invalid external input is an error. Saturation (energy, inventory)
//! and failed interactions are reported through normal return values.

use thiserror::Error;

/// Why a tick was rejected. A rejected tick leaves the simulation untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TickError {
    /// Delta time was negative, NaN or infinite.
    #[error("invalid delta time: {0} ms")]
    InvalidDelta(f32),
    /// Intent had a NaN or infinite component.
    #[error("invalid intent: ({dx}, {dy})")]
    InvalidIntent { dx: f32, dy: f32 },
    /// The actor entity is gone; the world was modified from outside.
    #[error("actor entity missing from the world")]
    MissingActor,
}

impl TickError {
    /// Validate the external inputs of one tick.
    pub fn check(delta_ms: f32, dx: f32, dy: f32) -> Result<(), TickError> {
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            return Err(TickError::InvalidDelta(delta_ms));
        }
        if !dx.is_finite() || !dy.is_finite() {
            return Err(TickError::InvalidIntent { dx, dy });
        }
        Ok(())
    }
}
