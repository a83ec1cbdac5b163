//! A player's play area: hand, active slot, bench, discard and score.
//!
//! All zone moves look cards up by [`EntityId`] at the moment of the move,
//! so an id captured earlier stays valid while the card moves within its
//! zone. A missing id is a [`CardNotFound`](EngineError::CardNotFound)
//! fault; a move the rules forbid is a rule violation.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::deck::Deck;
use crate::cards::{Card, EnergyType, HandCard, TrainerCard};
use crate::core::{EntityId, GameRng};
use crate::effects::TrainerKind;
use crate::error::{EngineError, Result};

/// Where a card currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Active,
    Bench,
    Discard,
}

impl Zone {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Active => "active slot",
            Zone::Bench => "bench",
            Zone::Discard => "discard pile",
        }
    }
}

/// One player's full board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub deck: Deck,
    pub hand: Vector<HandCard>,
    pub active: Option<Card>,
    pub bench: Vector<Card>,
    pub discard: Vector<HandCard>,

    /// Knockout points scored.
    pub points: u32,

    // Per-turn flags, cleared at setup.
    pub has_added_energy: bool,
    pub has_used_supporter: bool,

    /// Energy drawn this turn, available to attach once.
    pub current_energy: Option<EnergyType>,
}

impl Player {
    /// A player with an empty board.
    #[must_use]
    pub fn new(name: impl Into<String>, deck: Deck) -> Self {
        Self {
            name: name.into(),
            deck,
            hand: Vector::new(),
            active: None,
            bench: Vector::new(),
            discard: Vector::new(),
            points: 0,
            has_added_energy: false,
            has_used_supporter: false,
            current_energy: None,
        }
    }

    // === Drawing ===

    /// Move the top card of the deck into hand. No-op on an empty deck.
    pub fn draw_card(&mut self) -> Option<EntityId> {
        let card = self.deck.draw()?;
        let id = card.id();
        self.hand.push_back(card);
        Some(id)
    }

    /// Draw up to `count` cards.
    pub fn draw_cards(&mut self, count: usize) -> usize {
        (0..count).take_while(|_| self.draw_card().is_some()).count()
    }

    /// Draw this turn's energy token.
    pub fn draw_energy(&mut self, rng: &mut GameRng) {
        self.current_energy = self.deck.draw_energy(rng);
    }

    pub fn reset_turn_flags(&mut self) {
        self.has_added_energy = false;
        self.has_used_supporter = false;
    }

    // === Queries ===

    /// Active card first, then the bench in order.
    pub fn in_play(&self) -> impl Iterator<Item = &Card> {
        self.active.iter().chain(self.bench.iter())
    }

    /// Apply `f` to every in-play card.
    pub fn for_each_in_play_mut(&mut self, mut f: impl FnMut(&mut Card)) {
        if let Some(active) = self.active.as_mut() {
            f(active);
        }
        for card in self.bench.iter_mut() {
            f(card);
        }
    }

    #[must_use]
    pub fn find_in_play(&self, id: EntityId) -> Option<&Card> {
        self.in_play().find(|card| card.id == id)
    }

    /// Mutable lookup of an in-play card, or `CardNotFound`.
    pub fn in_play_mut(&mut self, id: EntityId) -> Result<&mut Card> {
        let name = &self.name;
        if let Some(active) = self.active.as_mut().filter(|card| card.id == id) {
            return Ok(active);
        }
        self.bench
            .iter_mut()
            .find(|card| card.id == id)
            .ok_or_else(|| EngineError::CardNotFound {
                player: name.clone(),
                card: id,
                zone: "play area",
            })
    }

    /// The active card, or a rule violation if the slot is empty.
    pub fn active_mut(&mut self) -> Result<&mut Card> {
        let name = &self.name;
        self.active
            .as_mut()
            .ok_or_else(|| EngineError::rule(name, "use active card", "no active card"))
    }

    #[must_use]
    pub fn hand_card(&self, id: EntityId) -> Option<&HandCard> {
        self.hand.iter().find(|card| card.id() == id)
    }

    /// Basic creatures in hand, in hand order.
    pub fn basics_in_hand(&self) -> impl Iterator<Item = &Card> {
        self.hand
            .iter()
            .filter_map(HandCard::as_creature)
            .filter(|card| card.is_basic())
    }

    /// Evolution creatures in hand, in hand order.
    pub fn evolutions_in_hand(&self) -> impl Iterator<Item = &Card> {
        self.hand
            .iter()
            .filter_map(HandCard::as_creature)
            .filter(|card| !card.is_basic())
    }

    /// Trainer cards in hand, in hand order.
    pub fn trainers_in_hand(&self) -> impl Iterator<Item = &TrainerCard> {
        self.hand.iter().filter_map(HandCard::as_trainer)
    }

    /// No active card and nothing on the bench.
    #[must_use]
    pub fn has_no_creatures_in_play(&self) -> bool {
        self.active.is_none() && self.bench.is_empty()
    }

    /// Which zone holds `id`, if any.
    #[must_use]
    pub fn locate(&self, id: EntityId) -> Option<Zone> {
        if self.active.as_ref().is_some_and(|c| c.id == id) {
            Some(Zone::Active)
        } else if self.bench.iter().any(|c| c.id == id) {
            Some(Zone::Bench)
        } else if self.hand.iter().any(|c| c.id() == id) {
            Some(Zone::Hand)
        } else if self.deck.iter().any(|c| c.id() == id) {
            Some(Zone::Deck)
        } else if self.discard.iter().any(|c| c.id() == id) {
            Some(Zone::Discard)
        } else {
            None
        }
    }

    /// Ids of every card this player owns, across all zones.
    #[must_use]
    pub fn all_card_ids(&self) -> Vec<EntityId> {
        self.deck
            .iter()
            .map(HandCard::id)
            .chain(self.hand.iter().map(HandCard::id))
            .chain(self.in_play().map(|c| c.id))
            .chain(self.discard.iter().map(HandCard::id))
            .collect()
    }

    // === Zone moves ===

    /// Remove a card from hand by id.
    pub fn take_from_hand(&mut self, id: EntityId) -> Result<HandCard> {
        let index = self
            .hand
            .iter()
            .position(|card| card.id() == id)
            .ok_or_else(|| self.not_found(id, Zone::Hand))?;
        Ok(self.hand.remove(index))
    }

    /// Remove a creature from hand by id.
    pub fn take_creature_from_hand(&mut self, id: EntityId) -> Result<Card> {
        let is_creature = self
            .hand_card(id)
            .map(|card| card.as_creature().is_some())
            .ok_or_else(|| self.not_found(id, Zone::Hand))?;
        if !is_creature {
            return Err(EngineError::rule(
                &self.name,
                "take creature",
                format!("{id} is a trainer card"),
            ));
        }
        match self.take_from_hand(id)? {
            HandCard::Creature(card) => Ok(card),
            HandCard::Trainer(_) => Err(self.not_found(id, Zone::Hand)),
        }
    }

    /// Put a basic creature from hand into the empty active slot.
    pub fn place_active_from_hand(&mut self, id: EntityId) -> Result<()> {
        if self.active.is_some() {
            return Err(EngineError::rule(&self.name, "place active", "active slot occupied"));
        }
        self.require_basic_in_hand(id, "place active")?;
        let card = self.take_creature_from_hand(id)?;
        self.active = Some(card);
        Ok(())
    }

    /// Put a basic creature from hand onto the bench.
    pub fn bench_from_hand(&mut self, id: EntityId, capacity: usize) -> Result<()> {
        if self.bench.len() >= capacity {
            return Err(EngineError::rule(&self.name, "add to bench", "bench is full"));
        }
        self.require_basic_in_hand(id, "add to bench")?;
        let card = self.take_creature_from_hand(id)?;
        self.bench.push_back(card);
        Ok(())
    }

    /// Move a random bench card into the empty active slot.
    pub fn promote_random_bench(&mut self, rng: &mut GameRng) -> Option<EntityId> {
        if self.active.is_some() {
            return None;
        }
        let index = rng.choose_index(self.bench.len())?;
        let card = self.bench.remove(index);
        let id = card.id;
        self.active = Some(card);
        Some(id)
    }

    /// Pay the retreat cost and swap the active card with a random bench
    /// card. Returns the new active card's id.
    pub fn retreat(&mut self, rng: &mut GameRng) -> Result<EntityId> {
        if self.bench.is_empty() {
            return Err(EngineError::rule(&self.name, "retreat", "bench is empty"));
        }
        let active = self.active_mut()?;
        if !active.pay_retreat_cost(rng) {
            let reason = format!(
                "retreat cost {} exceeds attached energy {}",
                active.retreat_cost,
                active.energies.total()
            );
            return Err(EngineError::rule(&self.name, "retreat", reason));
        }
        self.switch_active(rng)
    }

    /// Swap the active card with a random bench card without paying
    /// anything. Returns the new active card's id.
    pub fn switch_active(&mut self, rng: &mut GameRng) -> Result<EntityId> {
        let index = rng
            .choose_index(self.bench.len())
            .ok_or_else(|| EngineError::rule(&self.name, "switch active", "bench is empty"))?;
        let old = self
            .active
            .take()
            .ok_or_else(|| EngineError::rule(&self.name, "switch active", "no active card"))?;
        let new = self.bench.remove(index);
        let id = new.id;
        self.bench.push_back(old);
        self.active = Some(new);
        Ok(id)
    }

    /// Discard the first trainer of `kind` in hand.
    pub fn discard_trainer(&mut self, kind: TrainerKind) -> Result<EntityId> {
        let index = self
            .hand
            .iter()
            .position(|card| card.as_trainer().is_some_and(|t| t.kind == kind))
            .ok_or_else(|| {
                EngineError::rule(&self.name, "discard trainer", format!("no {kind} in hand"))
            })?;
        let card = self.hand.remove(index);
        let id = card.id();
        self.discard.push_back(card);
        Ok(id)
    }

    /// Move a knocked-out active card to the discard pile.
    pub fn knock_out_active(&mut self) -> Option<Card> {
        let card = self.active.take()?;
        self.discard.push_back(HandCard::Creature(card.clone()));
        Some(card)
    }

    fn require_basic_in_hand(&self, id: EntityId, action: &str) -> Result<()> {
        match self.hand_card(id) {
            Some(card) if card.is_basic_creature() => Ok(()),
            Some(card) => Err(EngineError::rule(
                &self.name,
                action,
                format!("{} is not a basic creature", card.name()),
            )),
            None => Err(self.not_found(id, Zone::Hand)),
        }
    }

    fn not_found(&self, id: EntityId, zone: Zone) -> EngineError {
        EngineError::CardNotFound {
            player: self.name.clone(),
            card: id,
            zone: zone.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Catalog;
    use crate::core::EntityAllocator;

    fn player(names: &[&str]) -> Player {
        let mut ids = EntityAllocator::default();
        let deck = Deck::from_names(&Catalog::standard(), names, [EnergyType::Psychic], &mut ids)
            .unwrap();
        let mut player = Player::new("p1", deck);
        player.draw_cards(names.len());
        player
    }

    fn id_of(player: &Player, name: &str) -> EntityId {
        player
            .hand
            .iter()
            .find(|c| c.name() == name)
            .map(HandCard::id)
            .unwrap()
    }

    #[test]
    fn test_draw_moves_cards_to_hand() {
        let mut ids = EntityAllocator::default();
        let deck = Deck::from_names(&Catalog::standard(), ["Ralts", "Ralts"], [], &mut ids).unwrap();
        let mut p = Player::new("p1", deck);

        assert_eq!(p.draw_cards(5), 2);
        assert_eq!(p.hand.len(), 2);
        assert!(p.draw_card().is_none());
    }

    #[test]
    fn test_place_active_requires_basic() {
        let mut p = player(&["Kirlia", "Ralts"]);
        let kirlia = id_of(&p, "Kirlia");
        let ralts = id_of(&p, "Ralts");

        let err = p.place_active_from_hand(kirlia).unwrap_err();
        assert!(matches!(err, EngineError::RuleViolation { .. }));

        p.place_active_from_hand(ralts).unwrap();
        assert_eq!(p.locate(ralts), Some(Zone::Active));
        assert!(p.place_active_from_hand(ralts).is_err());
    }

    #[test]
    fn test_bench_capacity() {
        let mut p = player(&["Ralts", "Ralts", "Ralts", "Ralts"]);
        let ids: Vec<_> = p.hand.iter().map(HandCard::id).collect();

        for id in &ids[..3] {
            p.bench_from_hand(*id, 3).unwrap();
        }
        let err = p.bench_from_hand(ids[3], 3).unwrap_err();
        assert!(matches!(err, EngineError::RuleViolation { .. }));
        assert_eq!(p.bench.len(), 3);
        assert_eq!(p.locate(ids[3]), Some(Zone::Hand));
    }

    #[test]
    fn test_missing_card_is_not_found() {
        let mut p = player(&["Ralts"]);
        let err = p.bench_from_hand(EntityId(99), 3).unwrap_err();
        assert!(matches!(err, EngineError::CardNotFound { zone: "hand", .. }));
    }

    #[test]
    fn test_retreat_swaps_and_pays() {
        let mut rng = GameRng::new(4);
        let mut p = player(&["Ralts", "Mewtwo EX"]);
        let ralts = id_of(&p, "Ralts");
        let mewtwo = id_of(&p, "Mewtwo EX");
        p.place_active_from_hand(ralts).unwrap();
        p.bench_from_hand(mewtwo, 3).unwrap();

        assert!(p.retreat(&mut rng).is_err());

        p.active.as_mut().unwrap().energies.add(EnergyType::Psychic, 2);
        let new_active = p.retreat(&mut rng).unwrap();

        assert_eq!(new_active, mewtwo);
        assert_eq!(p.locate(ralts), Some(Zone::Bench));
        assert_eq!(p.find_in_play(ralts).unwrap().energies.total(), 1);
    }

    #[test]
    fn test_promote_random_bench() {
        let mut rng = GameRng::new(4);
        let mut p = player(&["Ralts", "Ralts"]);
        let ids: Vec<_> = p.hand.iter().map(HandCard::id).collect();
        for id in &ids {
            p.bench_from_hand(*id, 3).unwrap();
        }

        let promoted = p.promote_random_bench(&mut rng).unwrap();
        assert!(ids.contains(&promoted));
        assert_eq!(p.bench.len(), 1);
        assert!(p.promote_random_bench(&mut rng).is_none());
    }

    #[test]
    fn test_discard_trainer_by_kind() {
        let mut p = player(&["Potion", "Ralts", "Potion"]);
        let first_potion = id_of(&p, "Potion");

        assert_eq!(p.discard_trainer(TrainerKind::Potion).unwrap(), first_potion);
        assert_eq!(p.locate(first_potion), Some(Zone::Discard));
        assert!(p.discard_trainer(TrainerKind::Sabrina).is_err());
    }

    #[test]
    fn test_knock_out_active() {
        let mut p = player(&["Ralts"]);
        let ralts = id_of(&p, "Ralts");
        p.place_active_from_hand(ralts).unwrap();

        let card = p.knock_out_active().unwrap();
        assert_eq!(card.id, ralts);
        assert!(p.active.is_none());
        assert_eq!(p.locate(ralts), Some(Zone::Discard));
        assert!(p.has_no_creatures_in_play());
    }
}
