//! Property tests: energy payment and whole-match invariants.

use std::sync::Arc;

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use pocket_engine::cards::{Catalog, EnergyCost, EnergyPool, EnergyType};
use pocket_engine::core::{
    card_census, ActionCategory, ActionEffect, EntityId, GameState, MatchConfig, PlayerId,
};
use pocket_engine::game::{Match, PlayerSpec, DEMO_DECK_A, DEMO_DECK_B};

fn energy_type() -> impl Strategy<Value = EnergyType> {
    (0..EnergyType::COUNT).prop_map(|i| EnergyType::ALL[i])
}

fn pool() -> impl Strategy<Value = EnergyPool> {
    prop::collection::vec((energy_type(), 0u32..4), 0..5).prop_map(|entries| {
        let mut pool = EnergyPool::new();
        for (energy, amount) in entries {
            pool.add(energy, amount);
        }
        pool
    })
}

fn cost() -> impl Strategy<Value = EnergyCost> {
    (prop::collection::vec((energy_type(), 1u32..3), 0..3), 0u32..4).prop_map(
        |(typed, colorless)| {
            typed
                .into_iter()
                .fold(EnergyCost::free().colorless(colorless), |cost, (energy, n)| {
                    cost.typed(energy, n)
                })
        },
    )
}

/// Typed requirements are met per type, and the surplus covers colorless.
fn reference_can_pay(pool: &EnergyPool, cost: &EnergyCost) -> bool {
    let typed_ok = cost
        .typed
        .iter()
        .all(|(energy, amount)| pool.count(*energy) >= *amount);
    let typed_total: u32 = cost.typed.iter().map(|(_, n)| n).sum();
    typed_ok && pool.total() >= typed_total + cost.colorless
}

fn all_ids(state: &GameState) -> Vec<EntityId> {
    PlayerId::all()
        .flat_map(|player| state.player(player).all_card_ids())
        .collect()
}

fn demo(seed: u64) -> Match {
    Match::builder(Arc::new(Catalog::standard()))
        .config(MatchConfig::new().with_seed(seed))
        .player(PlayerSpec::new("alice", DEMO_DECK_A, [EnergyType::Psychic]))
        .player(PlayerSpec::new("bob", DEMO_DECK_B, [EnergyType::Psychic]))
        .build()
        .unwrap()
}

// =============================================================================
// Energy Payment
// =============================================================================

proptest! {
    /// Test that payment agrees with the per-type reference rule.
    #[test]
    fn test_can_pay_matches_reference(pool in pool(), cost in cost()) {
        prop_assert_eq!(pool.can_pay(&cost), reference_can_pay(&pool, &cost));
    }

    /// Test that checking payment leaves the pool untouched.
    #[test]
    fn test_can_pay_is_pure(pool in pool(), cost in cost()) {
        let before = pool.clone();
        let _ = pool.can_pay(&cost);
        prop_assert_eq!(pool, before);
    }

    /// Test that a free cost is always payable.
    #[test]
    fn test_free_cost_always_payable(pool in pool()) {
        prop_assert!(pool.can_pay(&EnergyCost::free()));
    }
}

// =============================================================================
// Random Play
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Test that random play never loses a card, never overfills a bench
    /// and always finishes within the turn cap.
    #[test]
    fn test_random_play_invariants(seed in any::<u64>()) {
        let mut game = demo(seed);
        let initial: Vec<_> = card_census(game.state());
        let initial_ids: FxHashSet<EntityId> = all_ids(game.state()).into_iter().collect();
        let capacity = game.config().bench_capacity;

        while !game.is_over() {
            game.advance().unwrap();
            let state = game.state();

            for player in PlayerId::all() {
                prop_assert!(state.player(player).bench.len() <= capacity);
            }

            // Evolution cards merge into their target, so each one leaves
            // the census.
            for ((player, count), (_, start)) in card_census(state).into_iter().zip(&initial) {
                let absorbed = state
                    .action_history
                    .iter()
                    .filter(|r| r.player == player && r.action.category == ActionCategory::Evolve)
                    .count();
                prop_assert_eq!(count + absorbed, *start);
            }

            // Every card sits in exactly one zone; the only ids that may
            // disappear are evolution cards merged into their target.
            let ids = all_ids(state);
            let unique: FxHashSet<EntityId> = ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), ids.len());
            prop_assert!(unique.is_subset(&initial_ids));

            let missing: FxHashSet<EntityId> = initial_ids.difference(&unique).copied().collect();
            let merged: FxHashSet<EntityId> = state
                .action_history
                .iter()
                .filter_map(|r| match r.action.effect {
                    ActionEffect::Evolve { evolution, .. } => Some(evolution),
                    _ => None,
                })
                .collect();
            prop_assert_eq!(missing, merged);
        }

        let over = game.outcome().unwrap();
        prop_assert!(over.turn <= game.config().max_turns + 1);
    }
}
