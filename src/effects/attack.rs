//! Attack side effects and damage application.
//!
//! An attack resolves in two phases:
//!
//! 1. The side effect runs. It may spend energy, heal, or apply
//!    conditions; a mandatory cost it cannot pay aborts the attack as a
//!    rule violation before any damage is dealt.
//! 2. Damage is computed against the defender as it is *after* the side
//!    effect and subtracted from its HP.
//!
//! ## Damage
//!
//! `base`, then +20 if the defender is weak to the attacker's type, then
//! the attacker's damage-dealt bonuses, then the defender's reduction
//! (floored at 0). Attacks with 0 base damage deal no damage at all.

use serde::{Deserialize, Serialize};

use crate::cards::{AttackDef, Card, Condition, EnergyType};
use crate::core::EntityId;
use crate::error::{EngineError, Result};
use crate::zones::Player;

/// Extra damage when the defender is weak to the attacker's type.
pub const WEAKNESS_BONUS: i32 = 20;

/// Side effect of an attack, run before damage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackEffect {
    #[default]
    None,
    /// Discard energy of one type from the attacker. Mandatory.
    DiscardEnergy { energy: EnergyType, count: u32 },
    /// Apply a condition to the defending active card.
    InflictCondition { condition: Condition },
    /// Apply a condition to the attacker.
    SelfCondition { condition: Condition },
    /// Heal the attacker.
    HealSelf { amount: i32 },
}

/// What an attack did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: EntityId,
    pub defender: Option<EntityId>,
    pub damage: i32,
}

/// Final damage of an attack with base damage `base`.
#[must_use]
pub fn compute_damage(base: i32, attacker: &Card, defender: &Card) -> i32 {
    if base <= 0 {
        return 0;
    }
    let mut damage = base;
    if defender.weakness == Some(attacker.energy_type) {
        damage += WEAKNESS_BONUS;
    }
    damage += attacker.conditions.damage_dealt_bonus();
    (damage - defender.conditions.damage_received_reduction()).max(0)
}

/// Resolve `attack` from `me`'s active card against `opponent`'s.
///
/// Re-checks that the active card knows the attack and can pay for it.
pub fn perform_attack(attack: &AttackDef, me: &mut Player, opponent: &mut Player) -> Result<AttackReport> {
    let label = format!("attack with {}", attack.name);
    let attacker = me
        .active
        .as_mut()
        .ok_or_else(|| EngineError::rule(&me.name, &label, "no active card"))?;

    if !attacker.attacks.iter().any(|a| *a == attack.name) {
        let reason = format!("{} does not know {}", attacker.name, attack.name);
        return Err(EngineError::rule(&me.name, &label, reason));
    }
    if !attacker.energies.can_pay(&attack.cost) {
        let reason = format!("energy {} cannot pay the cost", attacker.energies);
        return Err(EngineError::rule(&me.name, &label, reason));
    }

    apply_side_effect(&attack.effect, attacker, opponent.active.as_mut())
        .map_err(|reason| EngineError::rule(&me.name, &label, reason))?;

    let mut report = AttackReport {
        attacker: attacker.id,
        defender: None,
        damage: 0,
    };
    if let Some(defender) = opponent.active.as_mut() {
        let damage = compute_damage(attack.damage, attacker, defender);
        defender.take_damage(damage);
        report.defender = Some(defender.id);
        report.damage = damage;
    }
    Ok(report)
}

fn apply_side_effect(
    effect: &AttackEffect,
    attacker: &mut Card,
    defender: Option<&mut Card>,
) -> std::result::Result<(), String> {
    match *effect {
        AttackEffect::None => {}
        AttackEffect::DiscardEnergy { energy, count } => {
            let attached = attacker.energies.count(energy);
            if attached < count {
                return Err(format!("needs {count} {energy} energy to discard, has {attached}"));
            }
            for _ in 0..count {
                attacker.energies.remove(energy);
            }
        }
        AttackEffect::InflictCondition { condition } => {
            if let Some(defender) = defender {
                defender.add_condition(condition);
            }
        }
        AttackEffect::SelfCondition { condition } => attacker.add_condition(condition),
        AttackEffect::HealSelf { amount } => {
            attacker.heal(amount);
        }
    }
    Ok(())
}
