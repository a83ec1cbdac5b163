//! Game state and serializable snapshots.
//!
//! ## GameState
//!
//! Complete match state:
//! - Both players' boards (deck, hand, active, bench, discard, score)
//! - Turn counter and in-turn action sequence
//! - Action history
//! - RNG
//! - Outcome, once the match is over
//!
//! Boards use `im` persistent vectors, so cloning a state for planner
//! search is cheap.
//!
//! ## Snapshots
//!
//! `MatchSnapshot` is a plain, JSON-safe view of the state used by the
//! data-collection and render sinks. It is derived on demand and never
//! read back by the engine.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, Condition, EnergyType};
use crate::rules::GameOver;
use crate::zones::Player;

/// Full match state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Both boards, first seat first.
    pub players: PlayerMap<Player>,

    /// Turn counter; 0 before the first turn.
    pub turn: u32,

    /// Action sequence within the current turn.
    pub action_sequence: u32,

    /// Every executed action, oldest first.
    pub action_history: Vector<ActionRecord>,

    /// Deterministic RNG for all in-engine randomness.
    pub rng: GameRng,

    /// Set once the match has ended.
    pub outcome: Option<GameOver>,
}

impl GameState {
    /// Create a state at turn 0.
    #[must_use]
    pub fn new(first: Player, second: Player, rng: GameRng) -> Self {
        Self {
            players: PlayerMap::from_pair(first, second),
            turn: 0,
            action_sequence: 0,
            action_history: Vector::new(),
            rng,
            outcome: None,
        }
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    /// The player acting on the current turn.
    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        PlayerId::for_turn(self.turn)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Advance the turn counter and reset the in-turn sequence.
    pub fn advance_turn(&mut self) -> u32 {
        self.turn += 1;
        self.action_sequence = 0;
        self.turn
    }

    /// Record an action in history.
    pub fn record_action(&mut self, record: ActionRecord) {
        self.action_history.push_back(record);
    }

    /// Get the next action sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }

    /// Actions recorded during `turn`, in order.
    #[must_use]
    pub fn actions_in_turn(&self, turn: u32) -> Vec<ActionRecord> {
        self.action_history
            .iter()
            .filter(|record| record.turn == turn)
            .cloned()
            .collect()
    }

    /// Serializable view of the whole match.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            turn: self.turn,
            players: self.players.iter().map(|(_, p)| PlayerSnapshot::of(p)).collect(),
            game_over: self.is_over(),
        }
    }
}

/// Serializable view of one creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub id: u32,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub energy_type: EnergyType,
    pub energies: BTreeMap<EnergyType, u32>,
    pub conditions: Vec<Condition>,
    pub is_ex: bool,
    pub stage: u8,
    pub can_evolve: bool,
    pub has_used_ability: bool,
}

impl CardSnapshot {
    #[must_use]
    pub fn of(card: &Card) -> Self {
        Self {
            id: card.id.raw(),
            name: card.name.clone(),
            hp: card.hp(),
            max_hp: card.max_hp(),
            energy_type: card.energy_type,
            energies: card.energies.to_map(),
            conditions: card.conditions.iter().collect(),
            is_ex: card.is_ex,
            stage: card.stage,
            can_evolve: card.can_evolve,
            has_used_ability: card.has_used_ability,
        }
    }
}

/// Serializable view of one board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub points: u32,
    pub active: Option<CardSnapshot>,
    pub bench: Vec<CardSnapshot>,
    /// Hand card names, in hand order.
    pub hand: Vec<String>,
    pub deck_size: usize,
    pub discard: Vec<String>,
    pub has_added_energy: bool,
    pub has_used_supporter: bool,
    pub current_energy: Option<EnergyType>,
}

impl PlayerSnapshot {
    #[must_use]
    pub fn of(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            points: player.points,
            active: player.active.as_ref().map(CardSnapshot::of),
            bench: player.bench.iter().map(CardSnapshot::of).collect(),
            hand: player.hand.iter().map(|c| c.name().to_string()).collect(),
            deck_size: player.deck.len(),
            discard: player.discard.iter().map(|c| c.name().to_string()).collect(),
            has_added_energy: player.has_added_energy,
            has_used_supporter: player.has_used_supporter,
            current_energy: player.current_energy,
        }
    }
}

/// Serializable view of the whole match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub turn: u32,
    /// First seat first.
    pub players: Vec<PlayerSnapshot>,
    pub game_over: bool,
}

impl MatchSnapshot {
    /// Snapshot of one seat.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.get(player.index())
    }
}

/// Counts cards across every zone of both boards; used to check that no
/// card is duplicated or lost.
#[must_use]
pub fn card_census(state: &GameState) -> Vec<(PlayerId, usize)> {
    state
        .players
        .iter()
        .map(|(id, p)| {
            let in_play = p.in_play().count();
            let piles = p.deck.len() + p.hand.len() + p.discard.len();
            (id, in_play + piles)
        })
        .collect()
}
