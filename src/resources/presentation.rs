//! ECS resource that bridges the simulation with a presentation thread.
//!
//! Use [`setup_presentation`] once to spawn the thread and insert the
//! [`PresentationBridge`]; the tick schedule then forwards every
//! [`PresentationEvent`](crate::events::presentation::PresentationEvent) it
//! sees. Call [`shutdown_presentation`] during teardown to stop and join the
//! thread.

use crate::events::presentation::PresentationCmd;
use crate::systems::presentation::{PresentationStats, presentation_thread};
use bevy_ecs::prelude::*;
use crossbeam_channel::{Sender, unbounded};

/// Shared bridge between the ECS world and the presentation thread.
#[derive(Resource)]
pub struct PresentationBridge {
    /// Sender for [`PresentationCmd`] messages (ECS -> presentation thread).
    pub tx_cmd: Sender<PresentationCmd>,
    /// Join handle for the background thread.
    pub handle: std::thread::JoinHandle<PresentationStats>,
}

/// Spawn the presentation thread and register the bridge resource.
pub fn setup_presentation(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<PresentationCmd>();

    let handle = std::thread::spawn(move || presentation_thread(rx_cmd));

    world.insert_resource(PresentationBridge { tx_cmd, handle });
}

/// Request shutdown of the presentation thread and join it.
///
/// Returns what the thread presented, or `None` if no bridge was set up or
/// the thread panicked.
pub fn shutdown_presentation(world: &mut World) -> Option<PresentationStats> {
    let bridge = world.remove_resource::<PresentationBridge>()?;
    let _ = bridge.tx_cmd.send(PresentationCmd::Shutdown);
    bridge.handle.join().ok()
}
