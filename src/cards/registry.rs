//! Catalog of creature, attack and trainer definitions.
//!
//! The `Catalog` is built once (embedded table or JSON file), validated,
//! and then shared read-only by every match. Every cross reference is
//! checked at load time so that lookups during play cannot fail on
//! well-formed data.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::definition::{AttackDef, CreatureDef, TrainerDef};
use super::energy::{EnergyCost, EnergyType};
use super::instance::{Card, HandCard, TrainerCard};
use crate::core::EntityId;
use crate::effects::{AbilityKind, AttackEffect, TrainerKind};
use crate::error::{EngineError, Result};

/// On-disk catalog shape.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub creatures: Vec<CreatureDef>,
    #[serde(default)]
    pub attacks: Vec<AttackDef>,
    #[serde(default)]
    pub trainers: Vec<TrainerDef>,
}

/// Read-only lookup of static card data.
///
/// ## Example
///
/// ```
/// use pocket_engine::cards::Catalog;
/// use pocket_engine::core::EntityId;
///
/// let catalog = Catalog::standard();
/// let ralts = catalog.create_card("Ralts", EntityId(0)).unwrap();
///
/// assert_eq!(ralts.max_hp(), 60);
/// assert!(catalog.create_card("Missingno", EntityId(1)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    creatures: FxHashMap<String, CreatureDef>,
    attacks: FxHashMap<String, AttackDef>,
    trainers: FxHashMap<String, TrainerDef>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and validate a catalog from loaded data.
    pub fn from_data(data: CatalogData) -> Result<Self> {
        let mut catalog = Self::new();
        for attack in data.attacks {
            catalog.register_attack(attack)?;
        }
        for creature in data.creatures {
            catalog.register_creature(creature)?;
        }
        for trainer in data.trainers {
            catalog.register_trainer(trainer)?;
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a JSON catalog.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Export the catalog in its on-disk shape, sorted by name.
    #[must_use]
    pub fn to_data(&self) -> CatalogData {
        let mut data = CatalogData {
            creatures: self.creatures.values().cloned().collect(),
            attacks: self.attacks.values().cloned().collect(),
            trainers: self.trainers.values().cloned().collect(),
        };
        data.creatures.sort_by(|a, b| a.name.cmp(&b.name));
        data.attacks.sort_by(|a, b| a.name.cmp(&b.name));
        data.trainers.sort_by(|a, b| a.name.cmp(&b.name));
        data
    }

    /// Register a creature. Duplicate names are rejected.
    pub fn register_creature(&mut self, def: CreatureDef) -> Result<()> {
        if self.creatures.contains_key(&def.name) || self.trainers.contains_key(&def.name) {
            return Err(EngineError::InvalidCatalog(format!(
                "card '{}' registered twice",
                def.name
            )));
        }
        self.creatures.insert(def.name.clone(), def);
        Ok(())
    }

    /// Register an attack. Duplicate ids are rejected.
    pub fn register_attack(&mut self, def: AttackDef) -> Result<()> {
        if self.attacks.contains_key(&def.name) {
            return Err(EngineError::InvalidCatalog(format!(
                "attack '{}' registered twice",
                def.name
            )));
        }
        self.attacks.insert(def.name.clone(), def);
        Ok(())
    }

    /// Register a trainer. Duplicate names are rejected.
    pub fn register_trainer(&mut self, def: TrainerDef) -> Result<()> {
        if self.trainers.contains_key(&def.name) || self.creatures.contains_key(&def.name) {
            return Err(EngineError::InvalidCatalog(format!(
                "card '{}' registered twice",
                def.name
            )));
        }
        self.trainers.insert(def.name.clone(), def);
        Ok(())
    }

    /// Check every cross reference.
    pub fn validate(&self) -> Result<()> {
        for creature in self.creatures.values() {
            for attack in &creature.attacks {
                self.attack(attack)?;
            }
            if let Some(key) = &creature.ability {
                resolve_ability(key)?;
            }
            match (&creature.evolves_from, creature.stage) {
                (Some(base), stage) if stage > 0 => {
                    let base_def = self.creature(base)?;
                    if base_def.stage + 1 != stage {
                        return Err(EngineError::InvalidCatalog(format!(
                            "'{}' is stage {stage} but evolves from stage {} '{base}'",
                            creature.name, base_def.stage
                        )));
                    }
                }
                (None, 0) => {}
                _ => {
                    return Err(EngineError::InvalidCatalog(format!(
                        "'{}' has inconsistent stage and lineage",
                        creature.name
                    )));
                }
            }
            if creature.hp <= 0 {
                return Err(EngineError::InvalidCatalog(format!(
                    "'{}' has non-positive hp",
                    creature.name
                )));
            }
        }
        for trainer in self.trainers.values() {
            resolve_trainer(&trainer.behaviour)?;
        }
        Ok(())
    }

    /// Look up a creature definition.
    pub fn creature(&self, name: &str) -> Result<&CreatureDef> {
        self.creatures
            .get(name)
            .ok_or_else(|| missing("creature", name))
    }

    /// Look up an attack definition.
    pub fn attack(&self, name: &str) -> Result<&AttackDef> {
        self.attacks.get(name).ok_or_else(|| missing("attack", name))
    }

    /// Look up a trainer definition.
    pub fn trainer(&self, name: &str) -> Result<&TrainerDef> {
        self.trainers
            .get(name)
            .ok_or_else(|| missing("trainer", name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.creatures.contains_key(name) || self.trainers.contains_key(name)
    }

    /// Number of registered cards (creatures and trainers).
    #[must_use]
    pub fn len(&self) -> usize {
        self.creatures.len() + self.trainers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over creature definitions.
    pub fn creatures(&self) -> impl Iterator<Item = &CreatureDef> {
        self.creatures.values()
    }

    /// Create a creature instance.
    pub fn create_card(&self, name: &str, id: EntityId) -> Result<Card> {
        let def = self.creature(name)?;
        let mut card = Card::new(id, &def.name, def.hp, def.energy_type);
        card.attacks = def.attacks.iter().cloned().collect();
        card.retreat_cost = def.retreat_cost;
        card.ability = def.ability.as_deref().map(resolve_ability).transpose()?;
        card.weakness = def.weakness;
        card.is_ex = def.is_ex;
        card.stage = def.stage;
        card.evolves_from = def.evolves_from.clone();
        Ok(card)
    }

    /// Create a trainer instance.
    pub fn create_trainer(&self, name: &str, id: EntityId) -> Result<TrainerCard> {
        let def = self.trainer(name)?;
        let kind = resolve_trainer(&def.behaviour)?;
        Ok(TrainerCard::new(id, &def.name, kind))
    }

    /// Create any card by name (creature or trainer).
    pub fn create_hand_card(&self, name: &str, id: EntityId) -> Result<HandCard> {
        if self.trainers.contains_key(name) {
            self.create_trainer(name, id).map(HandCard::Trainer)
        } else {
            self.create_card(name, id).map(HandCard::Creature)
        }
    }

    /// The embedded default catalog.
    #[must_use]
    pub fn standard() -> Self {
        use EnergyType::{Fighting, Fire, Grass, Psychic, Water};

        let attacks = vec![
            AttackDef::new("Ram", 20, EnergyCost::free().colorless(1)),
            AttackDef::new("Smack", 30, EnergyCost::free().typed(Psychic, 1).colorless(1)),
            AttackDef::new("Psyshot", 60, EnergyCost::free().typed(Psychic, 2).colorless(1)),
            AttackDef::new("Psychic Sphere", 50, EnergyCost::free().typed(Psychic, 1).colorless(1)),
            AttackDef::new("Psydrive", 150, EnergyCost::free().typed(Psychic, 2).colorless(2))
                .with_effect(AttackEffect::DiscardEnergy {
                    energy: Psychic,
                    count: 2,
                }),
            AttackDef::new("Vine Whip", 40, EnergyCost::free().typed(Grass, 1).colorless(1)),
            AttackDef::new("Razor Leaf", 60, EnergyCost::free().typed(Grass, 1).colorless(2)),
            AttackDef::new("Giant Bloom", 100, EnergyCost::free().typed(Grass, 2).colorless(2))
                .with_effect(AttackEffect::HealSelf { amount: 30 }),
            AttackDef::new("Ember", 30, EnergyCost::free().typed(Fire, 1))
                .with_effect(AttackEffect::DiscardEnergy {
                    energy: Fire,
                    count: 1,
                }),
            AttackDef::new("Fire Claws", 60, EnergyCost::free().typed(Fire, 1).colorless(2)),
            AttackDef::new("Water Gun", 20, EnergyCost::free().typed(Water, 1)),
            AttackDef::new("Brace", 10, EnergyCost::free().typed(Fighting, 1)).with_effect(
                AttackEffect::SelfCondition {
                    condition: Condition::MinusDamageReceived20,
                },
            ),
            AttackDef::new("Hypnosis", 0, EnergyCost::free().typed(Psychic, 1)).with_effect(
                AttackEffect::InflictCondition {
                    condition: Condition::Asleep,
                },
            ),
        ];

        let creatures = vec![
            CreatureDef::new("Ralts", 60, Psychic)
                .with_attacks(["Ram"])
                .with_retreat_cost(1)
                .with_weakness(EnergyType::Darkness),
            CreatureDef::new("Kirlia", 80, Psychic)
                .with_attacks(["Smack"])
                .with_retreat_cost(1)
                .with_weakness(EnergyType::Darkness)
                .evolves_from("Ralts"),
            CreatureDef::new("Gardevoir", 110, Psychic)
                .with_attacks(["Psyshot"])
                .with_retreat_cost(2)
                .with_weakness(EnergyType::Darkness)
                .with_ability("psy-shadow")
                .evolves_from("Kirlia")
                .with_stage(2),
            CreatureDef::new("Mewtwo EX", 150, Psychic)
                .with_attacks(["Psychic Sphere", "Psydrive"])
                .with_retreat_cost(2)
                .with_weakness(Fighting)
                .ex(),
            CreatureDef::new("Bulbasaur", 70, Grass)
                .with_attacks(["Vine Whip"])
                .with_retreat_cost(1)
                .with_weakness(Fire),
            CreatureDef::new("Ivysaur", 90, Grass)
                .with_attacks(["Razor Leaf"])
                .with_retreat_cost(2)
                .with_weakness(Fire)
                .evolves_from("Bulbasaur"),
            CreatureDef::new("Venusaur EX", 190, Grass)
                .with_attacks(["Razor Leaf", "Giant Bloom"])
                .with_retreat_cost(3)
                .with_weakness(Fire)
                .evolves_from("Ivysaur")
                .with_stage(2)
                .ex(),
            CreatureDef::new("Charmander", 60, Fire)
                .with_attacks(["Ember"])
                .with_retreat_cost(1)
                .with_weakness(Water),
            CreatureDef::new("Charmeleon", 90, Fire)
                .with_attacks(["Fire Claws"])
                .with_retreat_cost(2)
                .with_weakness(Water)
                .evolves_from("Charmander"),
            CreatureDef::new("Squirtle", 60, Water)
                .with_attacks(["Water Gun"])
                .with_retreat_cost(1)
                .with_weakness(EnergyType::Lightning),
            CreatureDef::new("Machop", 70, Fighting)
                .with_attacks(["Brace"])
                .with_retreat_cost(1)
                .with_weakness(Psychic),
            CreatureDef::new("Drowzee", 70, Psychic)
                .with_attacks(["Hypnosis"])
                .with_retreat_cost(1)
                .with_weakness(EnergyType::Darkness),
        ];

        let trainers = vec![
            TrainerDef::new("Potion", "potion"),
            TrainerDef::new("Erika", "erika"),
            TrainerDef::new("Giovanni", "giovanni"),
            TrainerDef::new("Sabrina", "sabrina"),
        ];

        let mut catalog = Self::new();
        for attack in attacks {
            catalog.attacks.insert(attack.name.clone(), attack);
        }
        for creature in creatures {
            catalog.creatures.insert(creature.name.clone(), creature);
        }
        for trainer in trainers {
            catalog.trainers.insert(trainer.name.clone(), trainer);
        }
        catalog
    }
}

fn missing(kind: &'static str, key: &str) -> EngineError {
    EngineError::MissingCatalogEntry {
        kind,
        key: key.to_string(),
    }
}

fn resolve_ability(key: &str) -> Result<AbilityKind> {
    AbilityKind::from_key(key).ok_or_else(|| missing("ability", key))
}

fn resolve_trainer(key: &str) -> Result<TrainerKind> {
    TrainerKind::from_key(key).ok_or_else(|| missing("trainer behaviour", key))
}
