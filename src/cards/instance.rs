//! Card instances - runtime card state.
//!
//! `Card` is one creature in a match. It carries copies of everything it
//! needs from its definition (attacks, retreat cost, lineage) so an
//! evolution card sitting in hand is self-describing, and evolving mutates
//! the in-play card in place instead of replacing it.
//!
//! `TrainerCard` is a single-use item or supporter. Both kinds live in a
//! hand as [`HandCard`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::condition::{Condition, Conditions};
use super::energy::{EnergyPool, EnergyType};
use crate::core::{EntityId, GameRng};
use crate::effects::{AbilityKind, TrainerKind};

/// A creature card instance.
///
/// HP is kept in `[0, max_hp]`; use [`take_damage`](Self::take_damage) and
/// [`heal`](Self::heal) to change it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique instance id.
    pub id: EntityId,

    /// Current species name.
    pub name: String,

    hp: i32,
    max_hp: i32,

    pub energy_type: EnergyType,

    /// Attached energy.
    pub energies: EnergyPool,

    /// Attack ids, copied from the catalog.
    pub attacks: SmallVec<[String; 2]>,

    pub retreat_cost: u32,

    pub ability: Option<AbilityKind>,

    pub conditions: Conditions,

    pub weakness: Option<EnergyType>,

    pub is_ex: bool,

    /// Evolution stage; 0 is basic.
    pub stage: u8,

    pub evolves_from: Option<String>,

    /// Set once the ability has been used this turn.
    pub has_used_ability: bool,

    /// Set at the owner's turn setup for cards already in play.
    pub can_evolve: bool,
}

impl Card {
    /// Create a full-HP basic creature with nothing attached.
    ///
    /// Usually built through [`Catalog::create_card`](super::Catalog::create_card).
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, hp: i32, energy_type: EnergyType) -> Self {
        let hp = hp.max(0);
        Self {
            id,
            name: name.into(),
            hp,
            max_hp: hp,
            energy_type,
            energies: EnergyPool::new(),
            attacks: SmallVec::new(),
            retreat_cost: 0,
            ability: None,
            conditions: Conditions::new(),
            weakness: None,
            is_ex: false,
            stage: 0,
            evolves_from: None,
            has_used_ability: false,
            can_evolve: false,
        }
    }

    #[must_use]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Damage currently on the card.
    #[must_use]
    pub fn damage_taken(&self) -> i32 {
        self.max_hp - self.hp
    }

    #[must_use]
    pub fn is_basic(&self) -> bool {
        self.stage == 0
    }

    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.hp < self.max_hp
    }

    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.hp <= 0
    }

    /// Knockout points this card is worth to the opponent.
    #[must_use]
    pub fn knockout_points(&self) -> u32 {
        if self.is_ex {
            2
        } else {
            1
        }
    }

    /// Reduce HP, stopping at 0.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount.max(0)).max(0);
    }

    /// Restore HP, stopping at max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    pub fn add_condition(&mut self, condition: Condition) {
        self.conditions.add(condition);
    }

    /// Whether the named evolution card can go on top of this one now.
    #[must_use]
    pub fn accepts_evolution(&self, evolution: &Card) -> bool {
        self.can_evolve && evolution.evolves_from.as_deref() == Some(self.name.as_str())
    }

    /// Evolve in place into `evolution`.
    ///
    /// Damage is carried over (`new_hp = new_max - damage_taken`); attached
    /// energy and conditions stay. The card cannot evolve again this turn.
    pub fn evolve_into(&mut self, evolution: &Card) {
        let damage = self.damage_taken();
        self.name = evolution.name.clone();
        self.max_hp = evolution.max_hp;
        self.hp = (evolution.max_hp - damage).clamp(0, evolution.max_hp);
        self.energy_type = evolution.energy_type;
        self.attacks = evolution.attacks.clone();
        self.retreat_cost = evolution.retreat_cost;
        self.ability = evolution.ability;
        self.weakness = evolution.weakness;
        self.is_ex = evolution.is_ex;
        self.stage = evolution.stage;
        self.evolves_from = evolution.evolves_from.clone();
        self.can_evolve = false;
    }

    /// Whether attached energy covers the retreat cost.
    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.energies.total() >= self.retreat_cost
    }

    /// Detach `retreat_cost` energies, each of a randomly chosen attached
    /// type. Returns false (having removed nothing) if the card cannot
    /// afford it.
    pub fn pay_retreat_cost(&mut self, rng: &mut GameRng) -> bool {
        if !self.can_retreat() {
            return false;
        }
        for _ in 0..self.retreat_cost {
            let present = self.energies.present();
            if let Some(energy) = rng.choose(&present).copied() {
                self.energies.remove(energy);
            }
        }
        true
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}/{} HP, energy {})",
            self.name, self.hp, self.max_hp, self.energies
        )
    }
}

/// A single-use trainer card instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerCard {
    pub id: EntityId,
    pub name: String,
    pub kind: TrainerKind,
}

impl TrainerCard {
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, kind: TrainerKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}

/// Anything that can sit in a deck or hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandCard {
    Creature(Card),
    Trainer(TrainerCard),
}

impl HandCard {
    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            HandCard::Creature(card) => card.id,
            HandCard::Trainer(trainer) => trainer.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            HandCard::Creature(card) => &card.name,
            HandCard::Trainer(trainer) => &trainer.name,
        }
    }

    #[must_use]
    pub fn as_creature(&self) -> Option<&Card> {
        match self {
            HandCard::Creature(card) => Some(card),
            HandCard::Trainer(_) => None,
        }
    }

    #[must_use]
    pub fn as_trainer(&self) -> Option<&TrainerCard> {
        match self {
            HandCard::Trainer(trainer) => Some(trainer),
            HandCard::Creature(_) => None,
        }
    }

    /// Basic creature cards can be placed directly into play.
    #[must_use]
    pub fn is_basic_creature(&self) -> bool {
        self.as_creature().is_some_and(Card::is_basic)
    }
}

impl From<Card> for HandCard {
    fn from(card: Card) -> Self {
        HandCard::Creature(card)
    }
}

impl From<TrainerCard> for HandCard {
    fn from(trainer: TrainerCard) -> Self {
        HandCard::Trainer(trainer)
    }
}
