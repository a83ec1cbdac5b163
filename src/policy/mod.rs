//! Action selection policies.
//!
//! The turn loop blocks on exactly one `Policy::choose` call per action.
//! A policy sees the read-only state through a `DecisionContext` and
//! returns an index into the discovered action list.
//!
//! ## Adapters
//!
//! - `RandomPolicy`: uniform choice from a seeded stream
//! - `HumanPolicy`: prints the list and reads an index from a line
//! - `ScriptedPolicy`: replays externally supplied indices
//! - `PlannerPolicy`: depth-limited search over state clones
//!
//! An index outside the list is rejected by the turn loop and requested
//! again; after too many rejections the loop applies a forced default
//! (see [`forced_default`]).

pub mod human;
pub mod planner;
pub mod random;
pub mod scripted;

pub use human::HumanPolicy;
pub use planner::{evaluate_player, PlannerPolicy};
pub use random::RandomPolicy;
pub use scripted::ScriptedPolicy;

use crate::core::{Action, GameState, PlayerId};
use crate::error::Result;
use crate::rules::RulesEngine;

/// What a policy may look at when choosing.
#[derive(Clone, Copy)]
pub struct DecisionContext<'a> {
    pub rules: &'a dyn RulesEngine,
    pub state: &'a GameState,
    pub player: PlayerId,
}

impl<'a> DecisionContext<'a> {
    #[must_use]
    pub fn new(rules: &'a dyn RulesEngine, state: &'a GameState, player: PlayerId) -> Self {
        Self {
            rules,
            state,
            player,
        }
    }
}

/// Chooses one action from a non-empty list.
pub trait Policy {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Return an index into `actions`.
    ///
    /// Out-of-range indices are not errors here; the caller rejects and
    /// asks again.
    fn choose(&mut self, ctx: &DecisionContext<'_>, actions: &[Action]) -> Result<usize>;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose(&mut self, ctx: &DecisionContext<'_>, actions: &[Action]) -> Result<usize> {
        (**self).choose(ctx, actions)
    }
}

/// End turn if offered, otherwise the first action.
#[must_use]
pub fn forced_default(actions: &[Action]) -> usize {
    actions.iter().position(Action::is_end_turn).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_default_prefers_end_turn() {
        let actions = vec![
            Action::new(
                crate::core::ActionCategory::Retreat,
                "Retreat",
                crate::core::ActionEffect::Retreat,
            ),
            Action::end_turn(),
        ];
        assert_eq!(forced_default(&actions), 1);
        assert_eq!(forced_default(&actions[..1]), 0);
    }
}
