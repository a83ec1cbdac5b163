//! Rules engine trait and the pocket ruleset.
//!
//! `RulesEngine` is the seam between the turn loop (and anything else that
//! drives play, such as the planner) and the rules:
//! - What actions are legal
//! - How actions modify state
//! - Win/loss conditions

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::discovery::discover;
use super::execution::execute;
use crate::cards::Catalog;
use crate::core::{Action, GameState, MatchConfig, PlayerId};
use crate::error::Result;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Why the match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverCause {
    /// A player reached the winning points.
    Points,
    /// A player had no active card and an empty bench past the opening.
    NoCreatures,
    /// The turn counter exceeded the cap.
    TurnLimit,
}

/// Terminal outcome of a match. Forced losses and the turn cap are normal
/// outcomes, not errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub result: GameResult,
    pub cause: GameOverCause,
    /// Turn on which the match ended.
    pub turn: u32,
}

impl GameOver {
    #[must_use]
    pub fn new(result: GameResult, cause: GameOverCause, turn: u32) -> Self {
        Self {
            result,
            cause,
            turn,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if player can't act
/// - `apply_action`: Returns the action's continuation flag
/// - `is_terminal`: Return None if game continues
pub trait RulesEngine {
    /// Get the match configuration.
    fn config(&self) -> &MatchConfig;

    /// Enumerate all legal actions for a player.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Result<Vec<Action>>;

    /// Apply an action to the game state.
    ///
    /// Returns whether the turn may continue. An action the rules do not
    /// allow is an error.
    fn apply_action(&self, state: &mut GameState, player: PlayerId, action: &Action)
        -> Result<bool>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.outcome.as_ref().map(|outcome| outcome.result.clone())
    }
}

/// The pocket ruleset: discovery and execution over a shared catalog.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use pocket_engine::cards::Catalog;
/// use pocket_engine::core::MatchConfig;
/// use pocket_engine::rules::{PocketRules, RulesEngine};
///
/// let rules = PocketRules::new(Arc::new(Catalog::standard()), MatchConfig::default());
/// assert_eq!(rules.config().bench_capacity, 3);
/// ```
#[derive(Clone, Debug)]
pub struct PocketRules {
    catalog: Arc<Catalog>,
    config: MatchConfig,
}

impl PocketRules {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, config: MatchConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl RulesEngine for PocketRules {
    fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Result<Vec<Action>> {
        discover(&self.catalog, &self.config, state, player)
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<bool> {
        execute(&self.catalog, &self.config, state, player, action)
    }
}
