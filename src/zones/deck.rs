//! Draw pile and energy source for one player.
//!
//! The front of the pile is the next card drawn. Decks are not shuffled
//! unless the match asks for it; energy is not a card here but a
//! per-turn draw from the deck's configured energy types.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Catalog, EnergyType, HandCard};
use crate::core::{EntityAllocator, GameRng};
use crate::error::Result;

/// A player's draw pile plus the energy types they draw from.
///
/// ## Example
///
/// ```
/// use pocket_engine::cards::{Catalog, EnergyType};
/// use pocket_engine::core::EntityAllocator;
/// use pocket_engine::zones::Deck;
///
/// let catalog = Catalog::standard();
/// let mut ids = EntityAllocator::default();
/// let mut deck = Deck::from_names(&catalog, ["Ralts", "Potion"], [EnergyType::Psychic], &mut ids)
///     .unwrap();
///
/// assert_eq!(deck.draw().unwrap().name(), "Ralts");
/// assert_eq!(deck.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<HandCard>,
    energy_types: SmallVec<[EnergyType; 2]>,
}

impl Deck {
    /// An empty deck drawing energy from `energy_types`.
    #[must_use]
    pub fn new(energy_types: impl IntoIterator<Item = EnergyType>) -> Self {
        Self {
            cards: Vector::new(),
            energy_types: energy_types.into_iter().collect(),
        }
    }

    /// Build a deck from catalog names, allocating an id per card.
    pub fn from_names<I, S>(
        catalog: &Catalog,
        names: I,
        energy_types: impl IntoIterator<Item = EnergyType>,
        ids: &mut EntityAllocator,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut deck = Self::new(energy_types);
        for name in names {
            deck.push(catalog.create_hand_card(name.as_ref(), ids.alloc())?);
        }
        Ok(deck)
    }

    /// Add a card to the bottom of the pile.
    pub fn push(&mut self, card: impl Into<HandCard>) {
        self.cards.push_back(card.into());
    }

    /// Take the next card, if any.
    pub fn draw(&mut self) -> Option<HandCard> {
        self.cards.pop_front()
    }

    /// Random energy type for this turn. `None` if the deck has no types.
    pub fn draw_energy(&self, rng: &mut GameRng) -> Option<EnergyType> {
        rng.choose(&self.energy_types).copied()
    }

    /// Shuffle the pile in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<_> = self.cards.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn energy_types(&self) -> &[EnergyType] {
        &self.energy_types
    }

    /// Cards in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &HandCard> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(names: &[&str]) -> Deck {
        let mut ids = EntityAllocator::default();
        Deck::from_names(&Catalog::standard(), names, [EnergyType::Psychic], &mut ids).unwrap()
    }

    #[test]
    fn test_draw_from_front() {
        let mut d = deck(&["Ralts", "Kirlia", "Gardevoir"]);
        let names: Vec<_> = std::iter::from_fn(|| d.draw())
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Ralts", "Kirlia", "Gardevoir"]);
        assert!(d.draw().is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let d = deck(&["Ralts", "Ralts", "Ralts"]);
        let mut ids: Vec<_> = d.iter().map(HandCard::id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_unknown_name_fails() {
        let mut ids = EntityAllocator::default();
        let result = Deck::from_names(&Catalog::standard(), ["Agumon"], [], &mut ids);
        assert!(result.is_err());
    }

    #[test]
    fn test_draw_energy() {
        let mut rng = GameRng::new(1);
        let d = Deck::new([EnergyType::Grass, EnergyType::Water]);
        for _ in 0..20 {
            let energy = d.draw_energy(&mut rng).unwrap();
            assert!(matches!(energy, EnergyType::Grass | EnergyType::Water));
        }
        assert!(Deck::new([]).draw_energy(&mut rng).is_none());
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut rng = GameRng::new(2);
        let mut d = deck(&["Ralts", "Kirlia", "Gardevoir", "Mewtwo EX", "Potion", "Potion"]);
        let mut before: Vec<_> = d.iter().map(HandCard::id).collect();
        d.shuffle(&mut rng);
        let mut after: Vec<_> = d.iter().map(HandCard::id).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
