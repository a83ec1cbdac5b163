//! Action execution.
//!
//! `execute` re-resolves every captured id against the current state,
//! re-checks the preconditions discovery relied on, applies the effect,
//! and then does the per-category bookkeeping:
//!
//! - energy attachment sets the energy-added flag
//! - supporters set the supporter-used flag
//! - item and supporter actions discard the first hand trainer of the
//!   declared kind
//!
//! It returns the action's continuation flag unchanged. Any failed check
//! is a rule violation or a not-found fault; both mean discovery and
//! execution disagree and are surfaced as errors, never ignored.

use tracing::debug;

use crate::cards::{Catalog, HandCard};
use crate::core::{Action, ActionCategory, ActionEffect, GameState, MatchConfig, PlayerId};
use crate::effects::{apply_trainer, perform_attack, TrainerKind};
use crate::error::{EngineError, Result};
use crate::zones::Player;

/// Apply `action` for `player`. Returns whether the turn may continue.
pub fn execute(
    catalog: &Catalog,
    config: &MatchConfig,
    state: &mut GameState,
    player: PlayerId,
    action: &Action,
) -> Result<bool> {
    let GameState { players, rng, .. } = state;
    let (me, opponent) = players.pair_mut(player);
    let name = me.name.clone();
    let fail = |reason: &str| EngineError::rule(&name, &action.label, reason);

    if let Some(kind) = action.consumes {
        if !me.trainers_in_hand().any(|t| t.kind == kind) {
            return Err(fail(&format!("no {kind} card in hand")));
        }
    }

    match &action.effect {
        ActionEffect::PlaceActive { card } => me.place_active_from_hand(*card)?,

        ActionEffect::AddToBench { card } => me.bench_from_hand(*card, config.bench_capacity)?,

        ActionEffect::AttachEnergy { target, energy } => {
            if me.has_added_energy {
                return Err(fail("energy already attached this turn"));
            }
            if me.current_energy != Some(*energy) {
                return Err(fail("energy token does not match this turn's draw"));
            }
            me.in_play_mut(*target)?.energies.add(*energy, 1);
            me.has_added_energy = true;
        }

        ActionEffect::Attack { attack } => {
            let def = catalog.attack(attack)?;
            let report = perform_attack(def, me, opponent)?;
            debug!(
                player = %me.name,
                attack = %def.name,
                damage = report.damage,
                "attack resolved"
            );
        }

        ActionEffect::Retreat => {
            let new_active = me.retreat(rng)?;
            debug!(player = %me.name, %new_active, "retreated");
        }

        ActionEffect::Evolve { target, evolution } => {
            let evolution_card = match me.hand_card(*evolution) {
                Some(HandCard::Creature(card)) => card.clone(),
                Some(HandCard::Trainer(_)) => return Err(fail("evolution card is a trainer")),
                None => {
                    return Err(EngineError::CardNotFound {
                        player: name.clone(),
                        card: *evolution,
                        zone: "hand",
                    })
                }
            };
            let accepts = me
                .find_in_play(*target)
                .map(|card| card.accepts_evolution(&evolution_card));
            match accepts {
                Some(true) => {}
                Some(false) => return Err(fail("target cannot evolve into this card")),
                None => {
                    return Err(EngineError::CardNotFound {
                        player: name.clone(),
                        card: *target,
                        zone: "play area",
                    })
                }
            }
            me.take_creature_from_hand(*evolution)?;
            me.in_play_mut(*target)?.evolve_into(&evolution_card);
        }

        ActionEffect::UseItem { kind, target, .. } => {
            if kind.is_supporter() {
                return Err(fail("supporter played as an item"));
            }
            apply_trainer(*kind, Some(*target), me, opponent, rng)?;
        }

        ActionEffect::UseSupporter { kind, target, .. } => {
            if !kind.is_supporter() {
                return Err(fail("item played as a supporter"));
            }
            if me.has_used_supporter {
                return Err(fail("a supporter was already played this turn"));
            }
            apply_trainer(*kind, *target, me, opponent, rng)?;
            me.has_used_supporter = true;
        }

        ActionEffect::UseAbility {
            source,
            ability,
            target,
        } => ability.apply(*source, *target, me)?,

        ActionEffect::EndTurn => {}
    }

    if let Some(kind) = action.consumes {
        discard_consumed(me, kind)?;
    }
    debug_assert!(
        action.category != ActionCategory::AddEnergy || me.has_added_energy,
        "energy flag not set"
    );

    debug!(player = %me.name, action = %action.label, "executed");
    Ok(action.continues_turn())
}

fn discard_consumed(me: &mut Player, kind: TrainerKind) -> Result<()> {
    let card = me.discard_trainer(kind)?;
    debug!(player = %me.name, %card, %kind, "trainer discarded");
    Ok(())
}
