//! Shared fixtures for unit tests.

use std::sync::Arc;

use crate::cards::{Catalog, EnergyType};
use crate::core::{EntityAllocator, GameRng, GameState, MatchConfig, PlayerId};
use crate::game::{DEMO_DECK_A, DEMO_DECK_B};
use crate::rules::PocketRules;
use crate::zones::{Deck, Player};

/// Demo decks fully drawn into hand, turn 0, nothing in play.
pub(crate) fn fixture_state() -> (PocketRules, GameState) {
    let catalog = Arc::new(Catalog::standard());
    let mut ids = EntityAllocator::default();
    let a = Deck::from_names(&catalog, DEMO_DECK_A, [EnergyType::Psychic], &mut ids).unwrap();
    let b = Deck::from_names(&catalog, DEMO_DECK_B, [EnergyType::Psychic], &mut ids).unwrap();

    let mut state = GameState::new(Player::new("alice", a), Player::new("bob", b), GameRng::new(1));
    for player in PlayerId::all() {
        state.player_mut(player).draw_cards(10);
    }
    (PocketRules::new(catalog, MatchConfig::default()), state)
}

/// Put the first basic in `player`'s hand into the active slot.
pub(crate) fn place_first_basic(state: &mut GameState, player: PlayerId) {
    let id = state.player(player).basics_in_hand().next().unwrap().id;
    state.player_mut(player).place_active_from_hand(id).unwrap();
}
