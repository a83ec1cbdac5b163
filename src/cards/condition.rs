//! Status conditions carried by creature cards.
//!
//! Each condition answers "does it wear off now?" when its holder is ticked
//! at the start of the holder's turn. Only the active card is ticked.
//!
//! | condition                  | wear-off at tick           | effect                     |
//! |----------------------------|----------------------------|----------------------------|
//! | `Asleep`, `Paralyzed`      | independent 50% chance     | none on attack or retreat  |
//! | `Poisoned`                 | never                      | none                       |
//! | `PlusDamageDealt10` / `30` | always                     | +10 / +30 to own attacks   |
//! | `MinusDamageReceived20`    | always                     | -20 to incoming damage     |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::GameRng;

/// A status condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Asleep,
    Paralyzed,
    Poisoned,
    PlusDamageDealt10,
    PlusDamageDealt30,
    MinusDamageReceived20,
}

impl Condition {
    /// Whether the condition clears on this tick.
    pub fn wears_off(self, rng: &mut GameRng) -> bool {
        match self {
            Condition::Asleep | Condition::Paralyzed => rng.gen_bool(0.5),
            Condition::Poisoned => false,
            Condition::PlusDamageDealt10
            | Condition::PlusDamageDealt30
            | Condition::MinusDamageReceived20 => true,
        }
    }

    /// Flat bonus added to attacks made by the holder.
    #[must_use]
    pub fn damage_dealt_bonus(self) -> i32 {
        match self {
            Condition::PlusDamageDealt10 => 10,
            Condition::PlusDamageDealt30 => 30,
            _ => 0,
        }
    }

    /// Flat reduction applied to attacks against the holder.
    #[must_use]
    pub fn damage_received_reduction(self) -> i32 {
        match self {
            Condition::MinusDamageReceived20 => 20,
            _ => 0,
        }
    }
}

/// Conditions on one card. Holds each condition at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conditions(SmallVec<[Condition; 2]>);

impl Conditions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition. Re-adding one already held is a no-op.
    pub fn add(&mut self, condition: Condition) {
        if !self.contains(condition) {
            self.0.push(condition);
        }
    }

    #[must_use]
    pub fn contains(&self, condition: Condition) -> bool {
        self.0.contains(&condition)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Condition> + '_ {
        self.0.iter().copied()
    }

    /// Remove every condition whose wear-off predicate fires. Returns the
    /// removed conditions in the order they were held.
    pub fn tick(&mut self, rng: &mut GameRng) -> SmallVec<[Condition; 2]> {
        let mut cleared = SmallVec::new();
        self.0.retain(|c| {
            if c.wears_off(rng) {
                cleared.push(*c);
                false
            } else {
                true
            }
        });
        cleared
    }

    /// Sum of damage-dealt bonuses.
    #[must_use]
    pub fn damage_dealt_bonus(&self) -> i32 {
        self.iter().map(Condition::damage_dealt_bonus).sum()
    }

    /// Sum of damage-received reductions.
    #[must_use]
    pub fn damage_received_reduction(&self) -> i32 {
        self.iter().map(Condition::damage_received_reduction).sum()
    }
}
