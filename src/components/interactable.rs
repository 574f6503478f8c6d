//! Proximity-triggered world objects.
//!
//! An [`Interactable`] carries its interaction policy as data:
//! - [`InteractionPolicy::Consumable`] – a one-shot pickup that goes inert once
//!   its item lands in the actor's inventory.
//! - [`InteractionPolicy::Repeatable`] – usable forever (gated only by the
//!   actor's cooldown), running a [`SideEffect`] each time.
//!
//! Side-effects are plain enums so they can be listed, serialized and tested;
//! [`crate::systems::interaction`] is the only place that interprets them.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::inventory::Item;
use crate::components::tint::Tint;

/// Stable identifier of an interactable: its index in the world description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InteractableId(pub u32);

/// How much energy a restore effect grants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyGain {
    Full,
    Amount(f32),
}

/// A particle burst played at the object's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    pub color: Tint,
    pub count: u32,
}

/// Notification text plus how it should be shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    #[serde(default = "Notice::default_duration")]
    pub duration_ms: u32,
    #[serde(default)]
    pub color: Tint,
}

impl Notice {
    pub fn new(text: impl Into<String>, duration_ms: u32, color: Tint) -> Self {
        Self {
            text: text.into(),
            duration_ms,
            color,
        }
    }

    fn default_duration() -> u32 {
        2000
    }
}

/// Effect of using a repeatable interactable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SideEffect {
    /// Nothing beyond the generic interaction feedback.
    #[default]
    None,
    /// Restore energy (beds, sofa).
    Restore {
        gain: EnergyGain,
        notice: Notice,
        #[serde(default)]
        burst: Option<Burst>,
    },
    /// Pull a random item out of a container (dresser, fridge, table...).
    Search(SearchEffect),
    /// Tune into a random channel (TV).
    Broadcast {
        pool: Vec<String>,
        prefix: String,
        #[serde(default)]
        energy_bonus: f32,
    },
}

/// Parameters of [`SideEffect::Search`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEffect {
    pub pool: Vec<String>,
    pub category: String,
    /// Description of the found item. `{item}` expands to the item name and
    /// `{item_lower}` to the lowercased name.
    pub description: String,
    /// Item that must be carried to open the container.
    #[serde(default)]
    pub requires: Option<Requirement>,
    #[serde(default)]
    pub energy_bonus: f32,
    pub found_prefix: String,
    #[serde(default)]
    pub found_color: Tint,
    /// Shown when the item does not fit in the inventory.
    pub full_notice: Notice,
}

impl SearchEffect {
    /// Search with the usual "Found: " wording and inventory-full notice.
    pub fn new(pool: &[&str], category: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            pool: pool.iter().map(|s| s.to_string()).collect(),
            category: category.into(),
            description: format!("{{item}} from the {}", origin.into()),
            requires: None,
            energy_bonus: 0.0,
            found_prefix: "Found: ".to_string(),
            found_color: Tint::SUCCESS,
            full_notice: Notice::new("Inventory full!", 2000, Tint::ALERT),
        }
    }
}

impl SearchEffect {
    /// Replace the description template.
    pub fn with_description(mut self, template: impl Into<String>) -> Self {
        self.description = template.into();
        self
    }

    /// Description of `item` when found here.
    pub fn describe(&self, item: &str) -> String {
        self.description
            .replace("{item_lower}", &item.to_lowercase())
            .replace("{item}", item)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub item: String,
    pub locked_notice: Notice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum InteractionPolicy {
    Consumable { item: Item },
    Repeatable { effect: SideEffect },
}

#[derive(Component, Debug, Clone)]
pub struct Interactable {
    pub id: InteractableId,
    /// Type tag, e.g. "Bed" or "Keys".
    pub kind: String,
    pub policy: InteractionPolicy,
    /// Prompt shown by presentation while near.
    pub prompt: String,
    pub glow_color: Tint,
    /// Presentation side channel, recomputed every tick.
    pub is_near: bool,
    /// Set by every successful interaction, kept for bookkeeping.
    pub has_been_interacted: bool,
    /// Consumed; never selected or drawn again.
    pub inert: bool,
    /// Presentation glow level in `[0, 1]`.
    pub glow: f32,
    glow_rising: bool,
}

impl Interactable {
    pub fn new(id: InteractableId, kind: impl Into<String>, policy: InteractionPolicy) -> Self {
        let prompt = match policy {
            InteractionPolicy::Consumable { .. } => "Press E to take",
            InteractionPolicy::Repeatable { .. } => "Press E to use",
        };
        Self {
            id,
            kind: kind.into(),
            policy,
            prompt: prompt.to_string(),
            glow_color: Tint::YELLOW,
            is_near: false,
            has_been_interacted: false,
            inert: false,
            glow: 0.0,
            glow_rising: true,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_glow_color(mut self, color: Tint) -> Self {
        self.glow_color = color;
        self
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self.policy, InteractionPolicy::Consumable { .. })
    }

    /// Step the glow animation one tick.
    ///
    /// While near it pulses between 0.3 and 1.0; otherwise it fades out.
    pub fn update_glow(&mut self) {
        if self.is_near {
            let step = if self.glow_rising { 0.05 } else { -0.05 };
            self.glow += step;
            if self.glow >= 1.0 {
                self.glow = 1.0;
                self.glow_rising = false;
            } else if self.glow <= 0.3 {
                self.glow = 0.3;
                self.glow_rising = true;
            }
        } else {
            self.glow = (self.glow - 0.1).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pickup() -> Interactable {
        Interactable::new(
            InteractableId(0),
            "Keys",
            InteractionPolicy::Consumable {
                item: Item::new("House Keys", "Keys", "A set of house keys"),
            },
        )
    }

    #[test]
    fn default_prompt_depends_on_policy() {
        assert_eq!(pickup().prompt, "Press E to take");
        let bed = Interactable::new(
            InteractableId(1),
            "Bed",
            InteractionPolicy::Repeatable {
                effect: SideEffect::None,
            },
        );
        assert_eq!(bed.prompt, "Press E to use");
        assert!(!bed.is_consumable());
    }

    #[test]
    fn glow_pulses_while_near_and_fades_after() {
        let mut obj = pickup();
        obj.is_near = true;
        for _ in 0..100 {
            obj.update_glow();
            assert!(obj.glow >= 0.0 && obj.glow <= 1.0);
        }
        assert!(obj.glow >= 0.3);
        obj.is_near = false;
        for _ in 0..12 {
            obj.update_glow();
        }
        assert_eq!(obj.glow, 0.0);
    }

    #[test]
    fn search_description_expands_item_name() {
        let closet = SearchEffect::new(&["Umbrella"], "clothing", "closet");
        assert_eq!(closet.describe("Umbrella"), "Umbrella from the closet");

        let dresser = SearchEffect::new(&["Pocket Watch"], "personal", "dresser drawer")
            .with_description("A {item_lower} from the dresser drawer");
        assert_eq!(
            dresser.describe("Pocket Watch"),
            "A pocket watch from the dresser drawer"
        );
    }

    #[test]
    fn notice_duration_defaults_when_missing() {
        let notice: Notice = serde_json::from_str(r##"{"text":"Hi","color":"#999999"}"##).unwrap();
        assert_eq!(notice.duration_ms, 2000);
        assert_eq!(notice.color, Tint::GREY);
    }

    #[test]
    fn policy_round_trips_through_json() {
        let policy = InteractionPolicy::Repeatable {
            effect: SideEffect::Restore {
                gain: EnergyGain::Amount(30.0),
                notice: Notice::new("Rested", 2500, Tint::SKY),
                burst: None,
            },
        };
        let text = serde_json::to_string(&policy).unwrap();
        let back: InteractionPolicy = serde_json::from_str(&text).unwrap();
        assert_eq!(back, policy);
    }
}
