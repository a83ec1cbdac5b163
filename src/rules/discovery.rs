//! Action discovery: every legal move for the player on turn.
//!
//! Discovery is a pure read of the player, the opponent and the catalog.
//! It enumerates, it does not rank: categories are emitted in a fixed
//! order and duplicates across categories are all kept.
//!
//! ## Order
//!
//! With no active card, only "place as active" for each basic in hand.
//! Otherwise:
//!
//! 1. items, one per legal target per item card
//! 2. supporters (none once one was played this turn)
//! 3. evolutions, one per (in-play card, evolution card) pair
//! 4. abilities, as supplied by each unused ability
//! 5. attacks whose cost is payable
//! 6. retreat, if affordable and the bench is non-empty
//! 7. bench placement, one per basic in hand while the bench has room
//! 8. energy attachment, one per in-play card, once per turn
//!
//! End turn is appended when an active card exists and the list is not
//! otherwise empty.

use tracing::trace;

use crate::cards::{Card, Catalog};
use crate::core::{Action, ActionCategory, ActionEffect, GameState, MatchConfig, PlayerId};
use crate::effects::trainer_actions;
use crate::error::Result;
use crate::zones::Player;

/// Enumerate the legal actions of `player` on `state`.
pub fn discover(
    catalog: &Catalog,
    config: &MatchConfig,
    state: &GameState,
    player: PlayerId,
) -> Result<Vec<Action>> {
    let me = state.player(player);
    let opponent = state.player(player.opponent());

    let Some(active) = me.active.as_ref() else {
        let actions: Vec<_> = me.basics_in_hand().map(place_active).collect();
        trace!(player = %me.name, count = actions.len(), "discovered actions (no active)");
        return Ok(actions);
    };

    let mut actions = Vec::new();

    // Items, then supporters.
    for trainer in me.trainers_in_hand().filter(|t| !t.kind.is_supporter()) {
        actions.extend(trainer_actions(trainer, me, opponent));
    }
    if !me.has_used_supporter {
        for trainer in me.trainers_in_hand().filter(|t| t.kind.is_supporter()) {
            actions.extend(trainer_actions(trainer, me, opponent));
        }
    }

    for evolution in me.evolutions_in_hand() {
        for target in me.in_play().filter(|card| card.accepts_evolution(evolution)) {
            actions.push(evolve(target, evolution));
        }
    }

    for card in me.in_play().filter(|card| !card.has_used_ability) {
        if let Some(ability) = card.ability {
            actions.extend(ability.actions(card, me));
        }
    }

    for attack_id in &active.attacks {
        let attack = catalog.attack(attack_id)?;
        if active.energies.can_pay(&attack.cost) {
            actions.push(Action::new(
                ActionCategory::Attack,
                format!("Attack with {} ({} damage)", attack.name, attack.damage),
                ActionEffect::Attack {
                    attack: attack.name.clone(),
                },
            ));
        }
    }

    if active.can_retreat() && !me.bench.is_empty() {
        actions.push(Action::new(
            ActionCategory::Retreat,
            format!("Retreat {}", active.name),
            ActionEffect::Retreat,
        ));
    }

    if me.bench.len() < config.bench_capacity {
        actions.extend(me.basics_in_hand().map(add_to_bench));
    }

    actions.extend(energy_actions(me));

    if !actions.is_empty() {
        actions.push(Action::end_turn());
    }

    trace!(player = %me.name, count = actions.len(), "discovered actions");
    Ok(actions)
}

fn place_active(card: &Card) -> Action {
    Action::new(
        ActionCategory::PlayToActive,
        format!("Place {} as active", card.name),
        ActionEffect::PlaceActive { card: card.id },
    )
}

fn add_to_bench(card: &Card) -> Action {
    Action::new(
        ActionCategory::AddToBench,
        format!("Add {} to bench", card.name),
        ActionEffect::AddToBench { card: card.id },
    )
}

fn evolve(target: &Card, evolution: &Card) -> Action {
    Action::new(
        ActionCategory::Evolve,
        format!("Evolve {} into {}", target.name, evolution.name),
        ActionEffect::Evolve {
            target: target.id,
            evolution: evolution.id,
        },
    )
}

fn energy_actions(me: &Player) -> Vec<Action> {
    let Some(energy) = me.current_energy.filter(|_| !me.has_added_energy) else {
        return Vec::new();
    };
    me.in_play()
        .map(|card| {
            Action::new(
                ActionCategory::AddEnergy,
                format!("Attach {energy} energy to {}", card.name),
                ActionEffect::AttachEnergy {
                    target: card.id,
                    energy,
                },
            )
        })
        .collect()
}
