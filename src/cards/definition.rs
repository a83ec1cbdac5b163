//! Catalog definitions - static card data.
//!
//! `CreatureDef` holds the immutable properties of a species. For example,
//! "Ralts" has 60 HP, the Psychic type and the attack "Ram" - these are
//! part of the definition. Instance-specific data (damage taken, attached
//! energy, conditions) is stored separately in [`Card`](super::Card).
//!
//! Definitions reference each other by name only: attacks by attack id,
//! evolution lineage by the species name it evolves from.

use serde::{Deserialize, Serialize};

use super::energy::{EnergyCost, EnergyType};
use crate::effects::AttackEffect;

/// Static creature definition.
///
/// ## Example
///
/// ```
/// use pocket_engine::cards::{CreatureDef, EnergyType};
///
/// let kirlia = CreatureDef::new("Kirlia", 80, EnergyType::Psychic)
///     .with_attacks(["Smack"])
///     .with_retreat_cost(1)
///     .evolves_from("Ralts");
///
/// assert_eq!(kirlia.stage, 1);
/// assert!(!kirlia.is_basic());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureDef {
    /// Species name; also the catalog key.
    pub name: String,

    /// Base hit points.
    pub hp: i32,

    /// Element type.
    #[serde(rename = "type")]
    pub energy_type: EnergyType,

    /// Attack ids in display order.
    #[serde(default)]
    pub attacks: Vec<String>,

    /// Energy count needed to retreat.
    #[serde(default)]
    pub retreat_cost: u32,

    /// Ability behaviour key, if any.
    #[serde(default)]
    pub ability: Option<String>,

    #[serde(default)]
    pub weakness: Option<EnergyType>,

    /// Evolution stage; 0 is basic.
    #[serde(default)]
    pub stage: u8,

    /// Species this one evolves from.
    #[serde(default)]
    pub evolves_from: Option<String>,

    /// Ex cards are worth two knockout points.
    #[serde(default)]
    pub is_ex: bool,
}

impl CreatureDef {
    /// Create a basic creature with no attacks.
    #[must_use]
    pub fn new(name: impl Into<String>, hp: i32, energy_type: EnergyType) -> Self {
        Self {
            name: name.into(),
            hp,
            energy_type,
            attacks: Vec::new(),
            retreat_cost: 0,
            ability: None,
            weakness: None,
            stage: 0,
            evolves_from: None,
            is_ex: false,
        }
    }

    #[must_use]
    pub fn with_attacks<I, S>(mut self, attacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attacks = attacks.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_retreat_cost(mut self, cost: u32) -> Self {
        self.retreat_cost = cost;
        self
    }

    #[must_use]
    pub fn with_weakness(mut self, weakness: EnergyType) -> Self {
        self.weakness = Some(weakness);
        self
    }

    #[must_use]
    pub fn with_ability(mut self, key: impl Into<String>) -> Self {
        self.ability = Some(key.into());
        self
    }

    /// Mark as evolving from `base`, one stage above it.
    ///
    /// Stage is derived by counting: evolving from a basic gives stage 1;
    /// call [`with_stage`](Self::with_stage) for later stages.
    #[must_use]
    pub fn evolves_from(mut self, base: impl Into<String>) -> Self {
        self.evolves_from = Some(base.into());
        self.stage = self.stage.max(1);
        self
    }

    #[must_use]
    pub fn with_stage(mut self, stage: u8) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn ex(mut self) -> Self {
        self.is_ex = true;
        self
    }

    /// Basic creatures can be played directly to the active slot or bench.
    #[must_use]
    pub fn is_basic(&self) -> bool {
        self.stage == 0
    }
}

/// Static attack definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackDef {
    /// Attack id; also the catalog key.
    pub name: String,

    pub cost: EnergyCost,

    /// Base damage before modifiers.
    #[serde(default)]
    pub damage: i32,

    /// Side effect run before damage is applied.
    #[serde(default)]
    pub effect: AttackEffect,
}

impl AttackDef {
    #[must_use]
    pub fn new(name: impl Into<String>, damage: i32, cost: EnergyCost) -> Self {
        Self {
            name: name.into(),
            cost,
            damage,
            effect: AttackEffect::None,
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: AttackEffect) -> Self {
        self.effect = effect;
        self
    }

    #[must_use]
    pub fn has_side_effect(&self) -> bool {
        !matches!(self.effect, AttackEffect::None)
    }
}

/// Static trainer (item or supporter) definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerDef {
    /// Card name; also the catalog key.
    pub name: String,

    /// Behaviour key resolved to a [`TrainerKind`](crate::effects::TrainerKind)
    /// when the catalog is loaded.
    pub behaviour: String,
}

impl TrainerDef {
    #[must_use]
    pub fn new(name: impl Into<String>, behaviour: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behaviour: behaviour.into(),
        }
    }
}
