//! Rules of the pocket game.
//!
//! - `discovery`: enumerate legal actions for the player on turn
//! - `execution`: apply a chosen action and report whether the turn goes on
//! - `engine`: the `RulesEngine` seam and match outcome types
//!
//! The turn loop only talks to `RulesEngine`; it never interprets card
//! rules itself.

pub mod discovery;
pub mod engine;
pub mod execution;

pub use discovery::discover;
pub use engine::{GameOver, GameOverCause, GameResult, PocketRules, RulesEngine};
pub use execution::execute;
