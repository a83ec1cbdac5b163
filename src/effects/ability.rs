//! Creature abilities.
//!
//! An ability supplies its own actions; discovery only asks each in-play
//! card with an unused ability for its list. Every ability is limited to
//! once per turn per card.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, EnergyType};
use crate::core::{Action, ActionCategory, ActionEffect, EntityId};
use crate::error::{EngineError, Result};
use crate::zones::Player;

/// Behaviour of an ability, resolved from its catalog key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbilityKind {
    /// Attach one Psychic energy to the owner's active card.
    PsyShadow,
}

impl AbilityKind {
    /// Resolve a catalog ability key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "psy-shadow" => Some(AbilityKind::PsyShadow),
            _ => None,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            AbilityKind::PsyShadow => "psy-shadow",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AbilityKind::PsyShadow => "Psy Shadow",
        }
    }

    /// Actions this ability offers for `source`, which belongs to `me`.
    #[must_use]
    pub fn actions(self, source: &Card, me: &Player) -> Vec<Action> {
        if source.has_used_ability {
            return Vec::new();
        }
        match self {
            AbilityKind::PsyShadow => me
                .active
                .iter()
                .map(|active| {
                    Action::new(
                        ActionCategory::UseAbility,
                        format!("Use ability {} on {}", self.name(), active.name),
                        ActionEffect::UseAbility {
                            source: source.id,
                            ability: self,
                            target: Some(active.id),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Apply the ability from `source` and mark it used.
    pub fn apply(self, source: EntityId, target: Option<EntityId>, me: &mut Player) -> Result<()> {
        let label = format!("use ability {}", self.name());
        let user = me.in_play_mut(source)?;
        if user.has_used_ability {
            let reason = format!("{} already used {} this turn", user.name, self.name());
            return Err(EngineError::rule(&me.name, label, reason));
        }
        if user.ability != Some(self) {
            let reason = format!("{} does not have {}", user.name, self.name());
            return Err(EngineError::rule(&me.name, label, reason));
        }

        match self {
            AbilityKind::PsyShadow => {
                let active_id = me.active.as_ref().map(|card| card.id);
                if active_id.is_none() || target != active_id {
                    return Err(EngineError::rule(&me.name, label, "target is not the active card"));
                }
                me.active_mut()?.energies.add(EnergyType::Psychic, 1);
            }
        }

        me.in_play_mut(source)?.has_used_ability = true;
        Ok(())
    }
}

impl std::fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
