//! # pocket-engine
//!
//! Turn/action engine for a pocket-style creature card game.
//!
//! Two players alternately draw, deploy, power up, evolve and attack with
//! creature cards until one reaches the winning knockout points, runs out
//! of creatures, or the turn cap is hit.
//!
//! ## Design Principles
//!
//! 1. **Discovery and execution agree**: every action discovery offers
//!    executes without a rule violation. A mismatch is surfaced as an
//!    error naming the player, the action and the failed precondition.
//!
//! 2. **Ids, not references**: actions capture card instance ids and an
//!    effect tag. Execution resolves ids against the current state, so
//!    actions survive state clones.
//!
//! 3. **Injected dependencies**: the catalog, the configuration and the
//!    random stream are passed in. There are no globals.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: boards use `im` vectors, so cloning
//!   a state for lookahead is cheap.
//!
//! - **Deterministic RNG**: one seeded ChaCha stream per match, with
//!   derived streams for bot policies and deck shuffles.
//!
//! ## Modules
//!
//! - `core`: ids, seats, RNG, configuration, actions, state and snapshots
//! - `cards`: energy, catalog definitions, card instances, conditions
//! - `effects`: attack side effects and damage, trainers, abilities
//! - `zones`: draw pile and player board
//! - `rules`: `RulesEngine`, action discovery and execution
//! - `game`: turn loop and match driver
//! - `policy`: action selection (random, human, scripted, planner)
//! - `recording`: turn snapshot and render sinks
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pocket_engine::{Catalog, EnergyType, Match, MatchConfig, PlayerSpec};
//! use pocket_engine::game::{DEMO_DECK_A, DEMO_DECK_B};
//!
//! let mut game = Match::builder(Arc::new(Catalog::standard()))
//!     .config(MatchConfig::new().with_seed(42))
//!     .player(PlayerSpec::new("alice", DEMO_DECK_A, [EnergyType::Psychic]))
//!     .player(PlayerSpec::new("bob", DEMO_DECK_B, [EnergyType::Psychic]))
//!     .build()
//!     .unwrap();
//!
//! let over = game.play().unwrap();
//! println!("{:?} after {} turns", over.result, over.turn);
//! ```

pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod game;
pub mod policy;
pub mod recording;
pub mod rules;
pub mod zones;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionCategory, ActionEffect, ActionRecord, EntityId, GameRng, GameState,
    MatchConfig, MatchSnapshot, PlayerId, PlayerMap,
};

pub use crate::cards::{Card, Catalog, EnergyCost, EnergyType};

pub use crate::error::{EngineError, Result};

pub use crate::game::{Match, MatchBuilder, PlayerSpec, PolicyKind};

pub use crate::policy::{DecisionContext, Policy};

pub use crate::recording::{SnapshotSink, TurnRecord};

pub use crate::rules::{GameOver, GameOverCause, GameResult, PocketRules, RulesEngine};
