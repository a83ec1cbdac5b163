//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index of one of the two players. The opponent relation is
//! positional (`PlayerId::opponent`), so it is fixed for the whole match
//! and mutual by construction.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access, indexed by
//! `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats in a match.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier: seat 0 starts the match, seat 1 plays second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who takes turn 1.
    pub const FIRST: PlayerId = PlayerId(0);
    /// The player who takes turn 2.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// The player acting on a given (1-based) turn: odd turns belong to the
    /// first player, even turns to the second.
    ///
    /// ```
    /// use pocket_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::for_turn(1), PlayerId::FIRST);
    /// assert_eq!(PlayerId::for_turn(2), PlayerId::SECOND);
    /// assert_eq!(PlayerId::for_turn(3), PlayerId::FIRST);
    /// ```
    #[must_use]
    pub const fn for_turn(turn: u32) -> Self {
        if turn % 2 == 0 {
            Self::SECOND
        } else {
            Self::FIRST
        }
    }

    /// Iterate over both player IDs.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use pocket_engine::core::{PlayerId, PlayerMap};
///
/// let mut points: PlayerMap<u32> = PlayerMap::with_value(0);
/// points[PlayerId::SECOND] += 2;
///
/// assert_eq!(points[PlayerId::FIRST], 0);
/// assert_eq!(points[PlayerId::SECOND], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl FnMut(PlayerId) -> T) -> Self {
        let data = PlayerId::all().map(factory).collect();
        Self { data }
    }

    /// Create from two explicit values, first seat first.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            data: vec![first, second],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Borrow `player`'s entry and the opponent's entry mutably at once.
    ///
    /// Used where one player's action mutates the other's board (attacks,
    /// forced switches).
    pub fn pair_mut(&mut self, player: PlayerId) -> (&mut T, &mut T) {
        let (first, second) = self.data.split_at_mut(1);
        if player == PlayerId::FIRST {
            (&mut first[0], &mut second[0])
        } else {
            (&mut second[0], &mut first[0])
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
