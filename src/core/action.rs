//! Action representation: category tag + effect descriptor.
//!
//! An action is a value: a human-readable label, a category tag, and an
//! [`ActionEffect`] that names its targets by [`EntityId`]. Nothing in an
//! action points into live state, so an action discovered on one state can
//! be executed against a clone of it (planner search) and is re-resolved
//! by id at execution time.
//!
//! Actions are ephemeral: discovery builds a fresh list after every
//! execution.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;
use crate::cards::EnergyType;
use crate::effects::{AbilityKind, TrainerKind};

/// What kind of move an action is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionCategory {
    PlayToActive,
    AddToBench,
    AddEnergy,
    Attack,
    Retreat,
    Evolve,
    UseItem,
    UseSupporter,
    UseAbility,
    EndTurn,
}

impl ActionCategory {
    /// Whether the turn may continue after an action of this category.
    /// False exactly for attacks and end-turn.
    #[must_use]
    pub const fn continues_turn(self) -> bool {
        !matches!(self, ActionCategory::Attack | ActionCategory::EndTurn)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionCategory::PlayToActive => "play-to-active",
            ActionCategory::AddToBench => "add-to-bench",
            ActionCategory::AddEnergy => "add-energy",
            ActionCategory::Attack => "attack",
            ActionCategory::Retreat => "retreat",
            ActionCategory::Evolve => "evolve",
            ActionCategory::UseItem => "use-item",
            ActionCategory::UseSupporter => "use-supporter",
            ActionCategory::UseAbility => "use-ability",
            ActionCategory::EndTurn => "end-turn",
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The effect an action applies, with targets captured by id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ActionEffect {
    /// Move a basic creature from hand to the empty active slot.
    PlaceActive { card: EntityId },
    /// Move a basic creature from hand to the bench.
    AddToBench { card: EntityId },
    /// Attach this turn's energy token to an in-play card.
    AttachEnergy { target: EntityId, energy: EnergyType },
    /// Use one of the active card's attacks.
    Attack { attack: String },
    /// Pay the retreat cost and swap with a random bench card.
    Retreat,
    /// Evolve an in-play card using an evolution card from hand.
    Evolve { target: EntityId, evolution: EntityId },
    /// Play an item card on an in-play card.
    UseItem {
        card: EntityId,
        kind: TrainerKind,
        target: EntityId,
    },
    /// Play a supporter card, optionally on an in-play card.
    UseSupporter {
        card: EntityId,
        kind: TrainerKind,
        target: Option<EntityId>,
    },
    /// Use an in-play card's ability.
    UseAbility {
        source: EntityId,
        ability: AbilityKind,
        target: Option<EntityId>,
    },
    EndTurn,
}

/// One legal move.
///
/// ## Example
///
/// ```
/// use pocket_engine::core::{Action, ActionCategory, ActionEffect, EntityId};
///
/// let place = Action::new(
///     ActionCategory::PlayToActive,
///     "Place Ralts as active",
///     ActionEffect::PlaceActive { card: EntityId(3) },
/// );
/// assert!(place.continues_turn());
/// assert!(!Action::end_turn().continues_turn());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Display name.
    pub label: String,

    pub category: ActionCategory,

    /// Trainer kind whose first hand copy is discarded after execution.
    pub consumes: Option<TrainerKind>,

    pub effect: ActionEffect,
}

impl Action {
    #[must_use]
    pub fn new(category: ActionCategory, label: impl Into<String>, effect: ActionEffect) -> Self {
        Self {
            label: label.into(),
            category,
            consumes: None,
            effect,
        }
    }

    /// The end-turn action.
    #[must_use]
    pub fn end_turn() -> Self {
        Self::new(ActionCategory::EndTurn, "End turn", ActionEffect::EndTurn)
    }

    /// Declare the trainer kind this action consumes (builder pattern).
    #[must_use]
    pub fn consuming(mut self, kind: TrainerKind) -> Self {
        self.consumes = Some(kind);
        self
    }

    /// Continuation flag: false exactly for attacks and end-turn.
    #[must_use]
    pub fn continues_turn(&self) -> bool {
        self.category.continues_turn()
    }

    #[must_use]
    pub fn is_end_turn(&self) -> bool {
        self.category == ActionCategory::EndTurn
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Per-turn data collection
/// - Replay/debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuation_flags() {
        let continuing = [
            ActionCategory::PlayToActive,
            ActionCategory::AddToBench,
            ActionCategory::AddEnergy,
            ActionCategory::Retreat,
            ActionCategory::Evolve,
            ActionCategory::UseItem,
            ActionCategory::UseSupporter,
            ActionCategory::UseAbility,
        ];
        assert!(continuing.iter().all(|c| c.continues_turn()));
        assert!(!ActionCategory::Attack.continues_turn());
        assert!(!ActionCategory::EndTurn.continues_turn());
    }

    #[test]
    fn test_consuming_builder() {
        let action = Action::new(
            ActionCategory::UseItem,
            "Use Potion on Ralts",
            ActionEffect::UseItem {
                card: EntityId(1),
                kind: TrainerKind::Potion,
                target: EntityId(2),
            },
        )
        .consuming(TrainerKind::Potion);

        assert_eq!(action.consumes, Some(TrainerKind::Potion));
        assert_eq!(action.to_string(), "Use Potion on Ralts");
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ActionCategory::PlayToActive.to_string(), "play-to-active");
        let json = serde_json::to_string(&ActionCategory::UseSupporter).unwrap();
        assert_eq!(json, r#""use-supporter""#);
    }

    #[test]
    fn test_action_record_serialization() {
        let action = Action::new(
            ActionCategory::Attack,
            "Attack with Psydrive",
            ActionEffect::Attack {
                attack: "Psydrive".to_string(),
            },
        );
        let record = ActionRecord::new(PlayerId::new(1), action, 2, 3);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
