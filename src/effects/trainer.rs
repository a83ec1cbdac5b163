//! Trainer behaviours: items and supporters.
//!
//! | card      | kind      | legal target                                  | effect                         |
//! |-----------|-----------|-----------------------------------------------|--------------------------------|
//! | Potion    | item      | own in-play card below max HP                 | heal 20                        |
//! | Erika     | supporter | own in-play Grass card below max HP           | heal 50                        |
//! | Giovanni  | supporter | none (needs an active card)                   | +10 dealt on active and bench  |
//! | Sabrina   | supporter | none (opponent has an active and a bench)     | opponent switches at random    |
//!
//! Supporters are limited to one per turn; that flag is owned by the
//! executor, not by the behaviours here.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Condition, EnergyType, TrainerCard};
use crate::core::{Action, ActionCategory, ActionEffect, EntityId, GameRng};
use crate::error::{EngineError, Result};
use crate::zones::Player;

pub const POTION_HEAL: i32 = 20;
pub const ERIKA_HEAL: i32 = 50;

/// Behaviour of a trainer card, resolved from its catalog key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrainerKind {
    Potion,
    Erika,
    Giovanni,
    Sabrina,
}

impl TrainerKind {
    /// Resolve a catalog behaviour key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "potion" => Some(TrainerKind::Potion),
            "erika" => Some(TrainerKind::Erika),
            "giovanni" => Some(TrainerKind::Giovanni),
            "sabrina" => Some(TrainerKind::Sabrina),
            _ => None,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            TrainerKind::Potion => "potion",
            TrainerKind::Erika => "erika",
            TrainerKind::Giovanni => "giovanni",
            TrainerKind::Sabrina => "sabrina",
        }
    }

    /// Supporters are limited to one per turn; everything else is an item.
    #[must_use]
    pub const fn is_supporter(self) -> bool {
        !matches!(self, TrainerKind::Potion)
    }

    #[must_use]
    pub const fn category(self) -> ActionCategory {
        if self.is_supporter() {
            ActionCategory::UseSupporter
        } else {
            ActionCategory::UseItem
        }
    }
}

impl std::fmt::Display for TrainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

fn heal_target(kind: TrainerKind, card: &Card) -> bool {
    match kind {
        TrainerKind::Potion => card.is_damaged(),
        TrainerKind::Erika => card.is_damaged() && card.energy_type == EnergyType::Grass,
        TrainerKind::Giovanni | TrainerKind::Sabrina => false,
    }
}

/// Actions for playing `trainer` from `me`'s hand, one per legal target.
///
/// Supporter actions are only produced when no supporter was played yet
/// this turn.
#[must_use]
pub fn trainer_actions(trainer: &TrainerCard, me: &Player, opponent: &Player) -> Vec<Action> {
    let kind = trainer.kind;
    if kind.is_supporter() && me.has_used_supporter {
        return Vec::new();
    }
    match kind {
        TrainerKind::Potion => me
            .in_play()
            .filter(|card| heal_target(kind, card))
            .map(|card| {
                Action::new(
                    ActionCategory::UseItem,
                    format!("Use {} on {}", trainer.name, card.name),
                    ActionEffect::UseItem {
                        card: trainer.id,
                        kind,
                        target: card.id,
                    },
                )
                .consuming(kind)
            })
            .collect(),
        TrainerKind::Erika => me
            .in_play()
            .filter(|card| heal_target(kind, card))
            .map(|card| supporter_action(trainer, Some(card)))
            .collect(),
        TrainerKind::Giovanni if me.active.is_some() => vec![supporter_action(trainer, None)],
        TrainerKind::Sabrina if opponent.active.is_some() && !opponent.bench.is_empty() => {
            vec![supporter_action(trainer, None)]
        }
        TrainerKind::Giovanni | TrainerKind::Sabrina => Vec::new(),
    }
}

fn supporter_action(trainer: &TrainerCard, target: Option<&Card>) -> Action {
    let label = match target {
        Some(card) => format!("Use {} on {}", trainer.name, card.name),
        None => format!("Use {}", trainer.name),
    };
    Action::new(
        ActionCategory::UseSupporter,
        label,
        ActionEffect::UseSupporter {
            card: trainer.id,
            kind: trainer.kind,
            target: target.map(|card| card.id),
        },
    )
    .consuming(trainer.kind)
}

/// Apply a trainer's effect. Re-checks the target against current state.
pub fn apply_trainer(
    kind: TrainerKind,
    target: Option<EntityId>,
    me: &mut Player,
    opponent: &mut Player,
    rng: &mut GameRng,
) -> Result<()> {
    let label = format!("use {kind}");
    match kind {
        TrainerKind::Potion | TrainerKind::Erika => {
            let id = target
                .ok_or_else(|| EngineError::rule(&me.name, &label, "missing heal target"))?;
            let name = me.name.clone();
            let card = me.in_play_mut(id)?;
            if !heal_target(kind, card) {
                let reason = format!("{} is not a legal target", card.name);
                return Err(EngineError::rule(name, label, reason));
            }
            let amount = if kind == TrainerKind::Potion {
                POTION_HEAL
            } else {
                ERIKA_HEAL
            };
            card.heal(amount);
        }
        TrainerKind::Giovanni => {
            if me.active.is_none() {
                return Err(EngineError::rule(&me.name, &label, "no active card"));
            }
            me.for_each_in_play_mut(|card| card.add_condition(Condition::PlusDamageDealt10));
        }
        TrainerKind::Sabrina => {
            if opponent.active.is_none() || opponent.bench.is_empty() {
                return Err(EngineError::rule(
                    &me.name,
                    &label,
                    "opponent has nothing to switch",
                ));
            }
            opponent.switch_active(rng)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::Deck;

    fn board(name: &str, active: Option<Card>, bench: Vec<Card>) -> Player {
        let mut player = Player::new(name, Deck::new([]));
        player.active = active;
        player.bench = bench.into_iter().collect();
        player
    }

    fn damaged(id: u32, energy_type: EnergyType, damage: i32) -> Card {
        let mut card = Card::new(EntityId(id), format!("card-{id}"), 80, energy_type);
        card.take_damage(damage);
        card
    }

    fn trainer(kind: TrainerKind) -> TrainerCard {
        TrainerCard::new(EntityId(100), kind.key(), kind)
    }

    #[test]
    fn test_keys_round_trip() {
        for kind in [
            TrainerKind::Potion,
            TrainerKind::Erika,
            TrainerKind::Giovanni,
            TrainerKind::Sabrina,
        ] {
            assert_eq!(TrainerKind::from_key(kind.key()), Some(kind));
        }
        assert!(TrainerKind::from_key("rare-candy").is_none());
        assert!(!TrainerKind::Potion.is_supporter());
        assert!(TrainerKind::Sabrina.is_supporter());
    }

    #[test]
    fn test_potion_targets_damaged_cards_only() {
        let me = board(
            "p1",
            Some(damaged(1, EnergyType::Psychic, 0)),
            vec![damaged(2, EnergyType::Psychic, 30), damaged(3, EnergyType::Fire, 10)],
        );
        let opponent = board("p2", None, vec![]);

        let actions = trainer_actions(&trainer(TrainerKind::Potion), &me, &opponent);
        let targets: Vec<_> = actions
            .iter()
            .map(|a| match a.effect {
                ActionEffect::UseItem { target, .. } => target,
                _ => panic!("unexpected effect"),
            })
            .collect();
        assert_eq!(targets, vec![EntityId(2), EntityId(3)]);
        assert!(actions.iter().all(|a| a.consumes == Some(TrainerKind::Potion)));
    }

    #[test]
    fn test_erika_needs_grass() {
        let me = board(
            "p1",
            Some(damaged(1, EnergyType::Grass, 60)),
            vec![damaged(2, EnergyType::Water, 30)],
        );
        let opponent = board("p2", None, vec![]);
        let actions = trainer_actions(&trainer(TrainerKind::Erika), &me, &opponent);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].category, ActionCategory::UseSupporter);
    }

    #[test]
    fn test_supporter_once_per_turn() {
        let mut me = board("p1", Some(damaged(1, EnergyType::Grass, 0)), vec![]);
        let opponent = board("p2", None, vec![]);
        assert_eq!(trainer_actions(&trainer(TrainerKind::Giovanni), &me, &opponent).len(), 1);

        me.has_used_supporter = true;
        assert!(trainer_actions(&trainer(TrainerKind::Giovanni), &me, &opponent).is_empty());
    }

    #[test]
    fn test_sabrina_needs_opponent_bench() {
        let me = board("p1", Some(damaged(1, EnergyType::Psychic, 0)), vec![]);
        let lonely = board("p2", Some(damaged(2, EnergyType::Fire, 0)), vec![]);
        assert!(trainer_actions(&trainer(TrainerKind::Sabrina), &me, &lonely).is_empty());

        let mut rng = GameRng::new(3);
        let mut opponent = board(
            "p2",
            Some(damaged(2, EnergyType::Fire, 0)),
            vec![damaged(3, EnergyType::Fire, 0)],
        );
        assert_eq!(trainer_actions(&trainer(TrainerKind::Sabrina), &me, &opponent).len(), 1);

        let mut me = me;
        apply_trainer(TrainerKind::Sabrina, None, &mut me, &mut opponent, &mut rng).unwrap();
        assert_eq!(opponent.active.as_ref().unwrap().id, EntityId(3));
        assert_eq!(opponent.bench[0].id, EntityId(2));
    }

    #[test]
    fn test_heal_amounts() {
        let mut rng = GameRng::new(1);
        let mut me = board("p1", Some(damaged(1, EnergyType::Grass, 70)), vec![]);
        let mut opponent = board("p2", None, vec![]);

        apply_trainer(TrainerKind::Potion, Some(EntityId(1)), &mut me, &mut opponent, &mut rng)
            .unwrap();
        assert_eq!(me.active.as_ref().unwrap().hp(), 30);

        apply_trainer(TrainerKind::Erika, Some(EntityId(1)), &mut me, &mut opponent, &mut rng)
            .unwrap();
        assert_eq!(me.active.as_ref().unwrap().hp(), 80);

        let err =
            apply_trainer(TrainerKind::Potion, Some(EntityId(1)), &mut me, &mut opponent, &mut rng)
                .unwrap_err();
        assert!(matches!(err, EngineError::RuleViolation { .. }));
    }

    #[test]
    fn test_giovanni_boosts_all_in_play() {
        let mut rng = GameRng::new(1);
        let mut me = board(
            "p1",
            Some(damaged(1, EnergyType::Psychic, 0)),
            vec![damaged(2, EnergyType::Psychic, 0)],
        );
        let mut opponent = board("p2", None, vec![]);

        apply_trainer(TrainerKind::Giovanni, None, &mut me, &mut opponent, &mut rng).unwrap();
        assert!(me
            .in_play()
            .all(|card| card.conditions.contains(Condition::PlusDamageDealt10)));
    }

    #[test]
    fn test_missing_target_is_not_found() {
        let mut rng = GameRng::new(1);
        let mut me = board("p1", Some(damaged(1, EnergyType::Grass, 10)), vec![]);
        let mut opponent = board("p2", None, vec![]);
        let err = apply_trainer(TrainerKind::Potion, Some(EntityId(9)), &mut me, &mut opponent, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::CardNotFound { .. }));
    }
}
