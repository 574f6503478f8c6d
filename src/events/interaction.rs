//! Outcome of an interaction attempt.
//!
//! Failures are values, not errors: callers branch on
//! [`InteractionResult::outcome`] to decide what feedback to show.

use smallvec::SmallVec;

use crate::components::interactable::InteractableId;
use crate::components::inventory::Item;
use crate::events::presentation::PresentationEvent;

/// Why an attempt did or did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionOutcome {
    Succeeded,
    /// A consumable was in reach but the inventory had no room.
    InventoryFull,
    /// The last attempt is still inside the cooldown window.
    OnCooldown,
    #[default]
    NothingInRange,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionResult {
    pub happened: bool,
    /// The object engaged, if any was in reach.
    pub interactable_id: Option<InteractableId>,
    pub item_gained: Option<Item>,
    /// Events written to the presentation queue by this attempt.
    pub effect_events: SmallVec<[PresentationEvent; 4]>,
    pub outcome: InteractionOutcome,
}

impl InteractionResult {
    pub fn on_cooldown() -> Self {
        Self {
            outcome: InteractionOutcome::OnCooldown,
            ..Default::default()
        }
    }

    pub fn nothing_in_range(events: SmallVec<[PresentationEvent; 4]>) -> Self {
        Self {
            effect_events: events,
            outcome: InteractionOutcome::NothingInRange,
            ..Default::default()
        }
    }
}
