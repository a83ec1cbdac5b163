//! Core engine types: entities, players, state, actions, RNG, configuration.
//!
//! This module contains the building blocks every other module shares.
//! Rules live in `rules`; this module only holds data.

pub mod action;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionCategory, ActionEffect, ActionRecord};
pub use config::MatchConfig;
pub use entity::{EntityAllocator, EntityId};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use state::{card_census, CardSnapshot, GameState, MatchSnapshot, PlayerSnapshot};
