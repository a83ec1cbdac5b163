//! Card locations.
//!
//! A player's cards live in exactly one of five zones at a time: deck,
//! hand, active slot, bench or discard pile.
//!
//! ## Key Types
//!
//! - `Deck`: ordered draw pile plus the energy types drawn each turn
//! - `Player`: hand, active slot, bench, discard, score and turn flags
//! - `Zone`: zone tag used in lookups and diagnostics

pub mod board;
pub mod deck;

pub use board::{Player, Zone};
pub use deck::Deck;
