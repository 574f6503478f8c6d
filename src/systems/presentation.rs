//! Presentation bridge systems and thread.
//!
//! - [`presentation_thread`] runs on its own OS thread and handles
//!   [`PresentationCmd`] messages. It stands in for the notification and
//!   audio collaborators by logging what it would show or play.
//! - [`forward_presentation_events`] sends every new
//!   [`PresentationEvent`] to that thread, if a bridge is set up.
//! - [`update_presentation_messages`] advances the ECS message queue once per
//!   tick.
//!
//! See also: [`crate::resources::presentation`].

use bevy_ecs::prelude::{MessageReader, Messages, Res, ResMut};
use crossbeam_channel::Receiver;

use crate::events::presentation::{PresentationCmd, PresentationEvent};
use crate::resources::presentation::PresentationBridge;

/// What the presentation thread handled before shutting down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentationStats {
    pub notifications: usize,
    pub sounds: usize,
}

/// Advance the ECS message queue for [`PresentationEvent`].
///
/// Messages survive two updates, so a driver that drains once per tick never
/// misses one.
pub fn update_presentation_messages(mut messages: ResMut<Messages<PresentationEvent>>) {
    messages.update();
}

/// Forward ECS PresentationEvent messages to the presentation thread.
pub fn forward_presentation_events(
    bridge: Option<Res<PresentationBridge>>,
    mut reader: MessageReader<PresentationEvent>,
) {
    let Some(bridge) = bridge else {
        return;
    };
    for event in reader.read() {
        // Ignore send error on shutdown
        let _ = bridge.tx_cmd.send(PresentationCmd::Present(event.clone()));
    }
}

/// Entry point of the dedicated presentation thread.
///
/// Runs until [`PresentationCmd::Shutdown`] arrives or every sender is gone.
pub fn presentation_thread(rx_cmd: Receiver<PresentationCmd>) -> PresentationStats {
    let mut stats = PresentationStats::default();
    while let Ok(cmd) = rx_cmd.recv() {
        match cmd {
            PresentationCmd::Present(PresentationEvent::Notification {
                text,
                duration_ms,
                color,
            }) => {
                log::info!("[notice {} {}ms] {}", color.to_hex(), duration_ms, text);
                stats.notifications += 1;
            }
            PresentationCmd::Present(PresentationEvent::Sound { id }) => {
                log::info!("[sound] {}", id);
                stats.sounds += 1;
            }
            PresentationCmd::Shutdown => break,
        }
    }
    stats
}
