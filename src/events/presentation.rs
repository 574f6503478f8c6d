use bevy_ecs::message::Message;
use serde::{Deserialize, Serialize};

use crate::components::tint::Tint;

/// One-way events sent *to* the presentation collaborator.
///
/// The simulation writes these into `Messages<PresentationEvent>`; the
/// driver drains them once per tick. Nothing the collaborator does with them
/// ever flows back into the simulation.
#[derive(Message, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresentationEvent {
    /// Transient on-screen text.
    Notification {
        text: String,
        duration_ms: u32,
        color: Tint,
    },
    /// Sound cue identified by name, e.g. `"interact"`.
    Sound { id: String },
}

impl PresentationEvent {
    /// How long a notification stays up when nothing more specific applies.
    pub const DEFAULT_NOTIFICATION_MS: u32 = 3000;

    pub fn notify(text: impl Into<String>, duration_ms: u32, color: Tint) -> Self {
        PresentationEvent::Notification {
            text: text.into(),
            duration_ms,
            color,
        }
    }

    pub fn sound(id: impl Into<String>) -> Self {
        PresentationEvent::Sound { id: id.into() }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            PresentationEvent::Notification { text, .. } => Some(text),
            PresentationEvent::Sound { .. } => None,
        }
    }
}

/// Commands sent *to* the presentation thread.
#[derive(Debug, Clone)]
pub enum PresentationCmd {
    Present(PresentationEvent),
    Shutdown,
}
