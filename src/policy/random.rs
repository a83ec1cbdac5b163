//! Uniform random bot.

use super::{DecisionContext, Policy};
use crate::core::{Action, GameRng};
use crate::error::{EngineError, Result};

/// Picks uniformly among the offered actions.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Stream derived from `seed`, independent of the match stream.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed).for_context("random-policy"))
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, _ctx: &DecisionContext<'_>, actions: &[Action]) -> Result<usize> {
        self.rng
            .choose_index(actions.len())
            .ok_or(EngineError::SelectionOutOfRange { index: 0, len: 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_state;

    #[test]
    fn test_random_choice_in_range_and_deterministic() {
        let (rules, state) = fixture_state();
        let ctx = DecisionContext::new(&rules, &state, crate::core::PlayerId::FIRST);
        let actions = vec![Action::end_turn(); 4];

        let mut a = RandomPolicy::seeded(5);
        let mut b = RandomPolicy::seeded(5);
        for _ in 0..20 {
            let pick = a.choose(&ctx, &actions).unwrap();
            assert!(pick < actions.len());
            assert_eq!(pick, b.choose(&ctx, &actions).unwrap());
        }
    }

    #[test]
    fn test_empty_list_is_error() {
        let (rules, state) = fixture_state();
        let ctx = DecisionContext::new(&rules, &state, crate::core::PlayerId::FIRST);
        let err = RandomPolicy::seeded(1).choose(&ctx, &[]).unwrap_err();
        assert!(matches!(err, EngineError::SelectionOutOfRange { .. }));
    }
}
