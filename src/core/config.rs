//! Match configuration.
//!
//! The ruleset constants (turn cap, points to win, bench size) live here
//! rather than in the engine so tests and tools can vary them. Defaults
//! match the standard pocket ruleset.

use serde::{Deserialize, Serialize};

/// Configuration for one match.
///
/// ## Example
///
/// ```
/// use pocket_engine::core::MatchConfig;
///
/// let config = MatchConfig::new().with_seed(7).with_max_turns(40);
///
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.max_turns, 40);
/// assert_eq!(config.winning_points, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Root seed for every random stream in the match.
    pub seed: u64,

    /// Turn cap. The match is force-terminated once the turn counter
    /// exceeds this value.
    pub max_turns: u32,

    /// Knockout points needed to win.
    pub winning_points: u32,

    /// Bench slots per player.
    pub bench_capacity: usize,

    /// Cards drawn into hand when the match is set up.
    pub opening_hand_size: usize,

    /// Evolution and bench promotion only happen once the turn counter is
    /// past this value.
    pub evolution_turn: u32,

    /// Shuffle both draw piles (with the match seed) before dealing.
    pub shuffle_decks: bool,

    /// How many out-of-range selections a policy may make in a row before
    /// the turn loop applies the forced default.
    pub selection_retries: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_turns: 100,
            winning_points: 3,
            bench_capacity: 3,
            opening_hand_size: 5,
            evolution_turn: 2,
            shuffle_decks: false,
            selection_retries: 3,
        }
    }
}

impl MatchConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the turn cap.
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the points needed to win.
    pub fn with_winning_points(mut self, points: u32) -> Self {
        self.winning_points = points;
        self
    }

    /// Set the bench capacity.
    pub fn with_bench_capacity(mut self, capacity: usize) -> Self {
        self.bench_capacity = capacity;
        self
    }

    /// Set the opening hand size.
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Enable or disable deck shuffling at setup.
    pub fn with_shuffle_decks(mut self, shuffle: bool) -> Self {
        self.shuffle_decks = shuffle;
        self
    }

    /// Set the number of tolerated out-of-range selections.
    pub fn with_selection_retries(mut self, retries: u32) -> Self {
        self.selection_retries = retries;
        self
    }

    /// Whether evolution and promotion are unlocked on `turn`.
    #[must_use]
    pub fn past_opening(&self, turn: u32) -> bool {
        turn > self.evolution_turn
    }
}
