//! Action discovery and execution tests against hand-built boards.

use std::sync::Arc;

use pocket_engine::cards::{Catalog, EnergyType};
use pocket_engine::core::{
    Action, ActionCategory, ActionEffect, EntityAllocator, GameRng, GameState, MatchConfig,
    PlayerId,
};
use pocket_engine::rules::{discover, PocketRules, RulesEngine};
use pocket_engine::zones::{Deck, Player};
use pocket_engine::EngineError;

fn setup(a: &[&str], b: &[&str]) -> (PocketRules, GameState) {
    let catalog = Arc::new(Catalog::standard());
    let mut ids = EntityAllocator::default();
    let deck_a = Deck::from_names(&catalog, a, [EnergyType::Psychic], &mut ids).unwrap();
    let deck_b = Deck::from_names(&catalog, b, [EnergyType::Psychic], &mut ids).unwrap();
    let mut state = GameState::new(
        Player::new("alice", deck_a),
        Player::new("bob", deck_b),
        GameRng::new(17),
    );
    for player in PlayerId::all() {
        state.player_mut(player).draw_cards(20);
    }
    (PocketRules::new(catalog, MatchConfig::default()), state)
}

fn place_basics(state: &mut GameState, player: PlayerId, bench: usize) {
    let me = state.player_mut(player);
    let basics: Vec<_> = me.basics_in_hand().map(|c| c.id).collect();
    me.place_active_from_hand(basics[0]).unwrap();
    for id in basics.iter().skip(1).take(bench) {
        me.bench_from_hand(*id, 3).unwrap();
    }
}

fn of_category(actions: &[Action], category: ActionCategory) -> Vec<&Action> {
    actions.iter().filter(|a| a.category == category).collect()
}

// =============================================================================
// Consistency
// =============================================================================

/// Test that every discovered action executes cleanly on a fresh clone.
#[test]
fn test_every_offered_action_executes() {
    let (rules, mut state) = setup(
        &["Ralts", "Kirlia", "Gardevoir", "Mewtwo EX", "Potion", "Giovanni", "Sabrina", "Erika", "Bulbasaur"],
        &["Ralts", "Ralts"],
    );
    place_basics(&mut state, PlayerId::FIRST, 2);
    place_basics(&mut state, PlayerId::SECOND, 1);
    {
        let alice = state.player_mut(PlayerId::FIRST);
        alice.current_energy = Some(EnergyType::Psychic);
        alice.for_each_in_play_mut(|card| {
            card.can_evolve = true;
            card.take_damage(10);
            card.energies.add(EnergyType::Psychic, 2);
        });
    }

    let actions = rules.legal_actions(&state, PlayerId::FIRST).unwrap();
    for category in [
        ActionCategory::UseItem,
        ActionCategory::UseSupporter,
        ActionCategory::Evolve,
        ActionCategory::Attack,
        ActionCategory::Retreat,
        ActionCategory::AddEnergy,
        ActionCategory::EndTurn,
    ] {
        assert!(
            !of_category(&actions, category).is_empty(),
            "no {category} action offered"
        );
    }

    for action in &actions {
        let mut scratch = state.clone();
        let result = rules.apply_action(&mut scratch, PlayerId::FIRST, action);
        assert!(result.is_ok(), "{action} failed: {:?}", result.err());
    }
}

/// Test that an action from an earlier discovery still executes after an
/// unrelated action moved other cards.
#[test]
fn test_captured_ids_survive_other_moves() {
    let (rules, mut state) = setup(&["Ralts", "Ralts", "Mewtwo EX", "Potion"], &["Ralts"]);
    place_basics(&mut state, PlayerId::FIRST, 0);
    let damaged = state.player(PlayerId::FIRST).active.as_ref().unwrap().id;
    state
        .player_mut(PlayerId::FIRST)
        .active
        .as_mut()
        .unwrap()
        .take_damage(30);

    let actions = rules.legal_actions(&state, PlayerId::FIRST).unwrap();
    let potion = of_category(&actions, ActionCategory::UseItem)[0].clone();
    let bench = of_category(&actions, ActionCategory::AddToBench)[0].clone();

    rules.apply_action(&mut state, PlayerId::FIRST, &bench).unwrap();
    rules.apply_action(&mut state, PlayerId::FIRST, &potion).unwrap();

    let alice = state.player(PlayerId::FIRST);
    let card = alice.in_play().find(|c| c.id == damaged).unwrap();
    assert_eq!(card.damage_taken(), 10);
    assert_eq!(alice.bench.len(), 1);
}

/// Test that executing a stale action reports the failing precondition.
#[test]
fn test_stale_action_is_a_named_fault() {
    let (rules, mut state) = setup(&["Ralts", "Potion"], &["Ralts"]);
    place_basics(&mut state, PlayerId::FIRST, 0);
    state
        .player_mut(PlayerId::FIRST)
        .active
        .as_mut()
        .unwrap()
        .take_damage(10);

    let potion = rules
        .legal_actions(&state, PlayerId::FIRST)
        .unwrap()
        .into_iter()
        .find(|a| a.category == ActionCategory::UseItem)
        .unwrap();
    rules.apply_action(&mut state, PlayerId::FIRST, &potion).unwrap();

    let err = rules
        .apply_action(&mut state, PlayerId::FIRST, &potion)
        .unwrap_err();
    assert!(err.is_consistency_fault());
    match err {
        EngineError::RuleViolation { player, action, .. } => {
            assert_eq!(player, "alice");
            assert_eq!(action, potion.label);
        }
        other => panic!("unexpected error {other}"),
    }
}

// =============================================================================
// Discovery Shape
// =============================================================================

/// Test that an empty board with no basics yields no actions at all.
#[test]
fn test_no_basics_no_actions() {
    let (rules, state) = setup(&["Kirlia", "Potion"], &["Ralts"]);
    assert!(rules.legal_actions(&state, PlayerId::FIRST).unwrap().is_empty());
}

/// Test that bench placement stops at capacity.
#[test]
fn test_bench_capacity_respected() {
    let (rules, mut state) = setup(&["Ralts"; 6], &["Ralts"]);
    place_basics(&mut state, PlayerId::FIRST, 0);

    for expected_bench in 1..=3 {
        let actions = rules.legal_actions(&state, PlayerId::FIRST).unwrap();
        let bench = of_category(&actions, ActionCategory::AddToBench)[0].clone();
        rules.apply_action(&mut state, PlayerId::FIRST, &bench).unwrap();
        assert_eq!(state.player(PlayerId::FIRST).bench.len(), expected_bench);
    }

    let actions = rules.legal_actions(&state, PlayerId::FIRST).unwrap();
    assert!(of_category(&actions, ActionCategory::AddToBench).is_empty());
}

/// Test that a smaller configured bench is honoured.
#[test]
fn test_configured_bench_capacity() {
    let (_, mut state) = setup(&["Ralts"; 4], &["Ralts"]);
    place_basics(&mut state, PlayerId::FIRST, 1);
    let config = MatchConfig::new().with_bench_capacity(1);
    let catalog = Catalog::standard();

    let actions = discover(&catalog, &config, &state, PlayerId::FIRST).unwrap();
    assert!(of_category(&actions, ActionCategory::AddToBench).is_empty());
}

/// Test that one energy action is offered per in-play card.
#[test]
fn test_energy_offered_per_card() {
    let (rules, mut state) = setup(&["Ralts", "Ralts", "Ralts"], &["Ralts"]);
    place_basics(&mut state, PlayerId::FIRST, 2);
    state.player_mut(PlayerId::FIRST).current_energy = Some(EnergyType::Psychic);

    let actions = rules.legal_actions(&state, PlayerId::FIRST).unwrap();
    let targets: Vec<_> = of_category(&actions, ActionCategory::AddEnergy)
        .iter()
        .map(|a| match a.effect {
            ActionEffect::AttachEnergy { target, .. } => target,
            _ => panic!("unexpected effect"),
        })
        .collect();
    let in_play: Vec<_> = state.player(PlayerId::FIRST).in_play().map(|c| c.id).collect();
    assert_eq!(targets, in_play);
}

/// Test that Sabrina is only offered against a benched opponent.
#[test]
fn test_sabrina_requires_opponent_bench() {
    let (rules, mut state) = setup(&["Ralts", "Sabrina"], &["Ralts", "Ralts"]);
    place_basics(&mut state, PlayerId::FIRST, 0);
    place_basics(&mut state, PlayerId::SECOND, 0);

    let actions = rules.legal_actions(&state, PlayerId::FIRST).unwrap();
    assert!(of_category(&actions, ActionCategory::UseSupporter).is_empty());

    let id = state.player(PlayerId::SECOND).hand[0].id();
    state.player_mut(PlayerId::SECOND).bench_from_hand(id, 3).unwrap();
    let actions = rules.legal_actions(&state, PlayerId::FIRST).unwrap();
    assert_eq!(of_category(&actions, ActionCategory::UseSupporter).len(), 1);
}

/// Test that Psy Shadow is offered once and then exhausted for the turn.
#[test]
fn test_psy_shadow_once_per_turn() {
    let (rules, mut state) = setup(&["Mewtwo EX", "Ralts", "Kirlia", "Gardevoir"], &["Ralts"]);
    place_basics(&mut state, PlayerId::FIRST, 1);
    state
        .player_mut(PlayerId::FIRST)
        .for_each_in_play_mut(|card| card.can_evolve = true);

    let evolve_into = |state: &mut GameState, name: &str| {
        let action = rules
            .legal_actions(state, PlayerId::FIRST)
            .unwrap()
            .into_iter()
            .find(|a| a.category == ActionCategory::Evolve && a.label.ends_with(name))
            .unwrap();
        rules.apply_action(state, PlayerId::FIRST, &action).unwrap();
        state
            .player_mut(PlayerId::FIRST)
            .for_each_in_play_mut(|card| card.can_evolve = true);
    };
    evolve_into(&mut state, "Kirlia");
    evolve_into(&mut state, "Gardevoir");

    let actions = rules.legal_actions(&state, PlayerId::FIRST).unwrap();
    let ability = of_category(&actions, ActionCategory::UseAbility);
    assert_eq!(ability.len(), 1);
    let ability = ability[0].clone();

    rules.apply_action(&mut state, PlayerId::FIRST, &ability).unwrap();
    let alice = state.player(PlayerId::FIRST);
    assert_eq!(alice.active.as_ref().unwrap().energies.count(EnergyType::Psychic), 1);

    let actions = rules.legal_actions(&state, PlayerId::FIRST).unwrap();
    assert!(of_category(&actions, ActionCategory::UseAbility).is_empty());
}
