//! Energy types, attached-energy pools and attack costs.
//!
//! ## Cost legality
//!
//! A cost is payable when every typed requirement is covered by attached
//! energy of that type, and whatever is left over (of any type) covers the
//! colorless requirement. The check works on a copy and never mutates the
//! pool.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Elemental type of a creature, an energy token or a weakness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyType {
    Grass,
    Fire,
    Water,
    #[serde(alias = "electric")]
    Lightning,
    Psychic,
    Fighting,
    Darkness,
    Metal,
}

impl EnergyType {
    /// Number of energy types.
    pub const COUNT: usize = 8;

    /// All energy types in a stable order.
    pub const ALL: [EnergyType; Self::COUNT] = [
        EnergyType::Grass,
        EnergyType::Fire,
        EnergyType::Water,
        EnergyType::Lightning,
        EnergyType::Psychic,
        EnergyType::Fighting,
        EnergyType::Darkness,
        EnergyType::Metal,
    ];

    /// Lowercase name, as used in catalog data.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EnergyType::Grass => "grass",
            EnergyType::Fire => "fire",
            EnergyType::Water => "water",
            EnergyType::Lightning => "lightning",
            EnergyType::Psychic => "psychic",
            EnergyType::Fighting => "fighting",
            EnergyType::Darkness => "darkness",
            EnergyType::Metal => "metal",
        }
    }

    /// Parse a lowercase name. Accepts "electric" for lightning.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "electric" => Some(EnergyType::Lightning),
            _ => Self::ALL.into_iter().find(|t| t.name() == name),
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EnergyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Multiset of energy attached to one creature. Counts never go negative.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnergyPool {
    counts: [u32; EnergyType::COUNT],
}

impl EnergyPool {
    /// An empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attached count of one type.
    #[must_use]
    pub fn count(&self, energy: EnergyType) -> u32 {
        self.counts[energy.slot()]
    }

    /// Total attached energy of all types.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Attach `amount` energy of one type.
    pub fn add(&mut self, energy: EnergyType, amount: u32) {
        self.counts[energy.slot()] += amount;
    }

    /// Detach one energy of a type. Returns false (and changes nothing) if
    /// none is attached.
    pub fn remove(&mut self, energy: EnergyType) -> bool {
        let slot = &mut self.counts[energy.slot()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Types with at least one attached energy, in stable order.
    #[must_use]
    pub fn present(&self) -> SmallVec<[EnergyType; 4]> {
        EnergyType::ALL
            .into_iter()
            .filter(|t| self.count(*t) > 0)
            .collect()
    }

    /// Non-zero counts keyed by type (for snapshots and display).
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<EnergyType, u32> {
        self.present()
            .into_iter()
            .map(|t| (t, self.count(t)))
            .collect()
    }

    /// Whether this pool covers `cost`. Side-effect free.
    #[must_use]
    pub fn can_pay(&self, cost: &EnergyCost) -> bool {
        let mut remaining = self.counts;
        for &(energy, amount) in &cost.typed {
            let slot = &mut remaining[energy.slot()];
            if *slot < amount {
                return false;
            }
            *slot -= amount;
        }
        remaining.iter().sum::<u32>() >= cost.colorless
    }
}

impl fmt::Display for EnergyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<_> = self
            .to_map()
            .into_iter()
            .map(|(t, n)| format!("{t}: {n}"))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Energy cost of an attack: typed requirements plus a colorless remainder.
///
/// Catalog data spells it as a map, e.g. `{"psychic": 2, "colorless": 1}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct EnergyCost {
    /// Typed requirements, at most one entry per type.
    pub typed: SmallVec<[(EnergyType, u32); 2]>,
    /// Requirement payable by any type.
    pub colorless: u32,
}

impl EnergyCost {
    /// A cost with no requirements.
    #[must_use]
    pub fn free() -> Self {
        Self::default()
    }

    /// Add a typed requirement (builder style).
    #[must_use]
    pub fn typed(mut self, energy: EnergyType, amount: u32) -> Self {
        match self.typed.iter_mut().find(|(t, _)| *t == energy) {
            Some((_, n)) => *n += amount,
            None => self.typed.push((energy, amount)),
        }
        self
    }

    /// Add a colorless requirement (builder style).
    #[must_use]
    pub fn colorless(mut self, amount: u32) -> Self {
        self.colorless += amount;
        self
    }

    /// Total number of energies the cost asks for.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.typed.iter().map(|(_, n)| n).sum::<u32>() + self.colorless
    }
}

impl TryFrom<BTreeMap<String, u32>> for EnergyCost {
    type Error = String;

    fn try_from(map: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        let mut cost = EnergyCost::free();
        for (name, amount) in map {
            if name == "colorless" {
                cost = cost.colorless(amount);
            } else {
                let energy = EnergyType::from_name(&name)
                    .ok_or_else(|| format!("unknown energy type '{name}'"))?;
                cost = cost.typed(energy, amount);
            }
        }
        Ok(cost)
    }
}

impl From<EnergyCost> for BTreeMap<String, u32> {
    fn from(cost: EnergyCost) -> Self {
        let mut map: BTreeMap<String, u32> = cost
            .typed
            .iter()
            .map(|(t, n)| (t.name().to_string(), *n))
            .collect();
        if cost.colorless > 0 {
            map.insert("colorless".to_string(), cost.colorless);
        }
        map
    }
}
