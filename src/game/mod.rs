//! Turn loop and match driver.
//!
//! ## Key Types
//!
//! - `Match`: owns the state, one policy per seat and the optional sinks;
//!   `advance` plays one turn, `play` runs to the end
//! - `MatchBuilder` / `PlayerSpec`: seat setup, decks and opening hands
//! - `TurnReport`: actions and outcome of one turn

pub mod runner;
pub mod turn;

pub use runner::{Match, MatchBuilder, PlayerSpec, PolicyKind};
pub use turn::{play_turn, resolve_knockout, setup_turn, TurnReport};

/// Demo deck: the Gardevoir line with Mewtwo EX and two potions.
pub const DEMO_DECK_A: [&str; 6] = ["Ralts", "Kirlia", "Gardevoir", "Mewtwo EX", "Potion", "Potion"];

/// Demo deck: four Ralts.
pub const DEMO_DECK_B: [&str; 4] = ["Ralts", "Ralts", "Ralts", "Ralts"];
