//! Depth-limited lookahead bot.
//!
//! Every candidate action is applied to a clone of the state, and while
//! the turn may continue the search keeps expanding the follow-up actions
//! up to `depth` actions deep. Leaves are scored with [`evaluate_player`];
//! the first action of the best-scoring sequence is chosen, earliest
//! wins ties. Clones are cheap because boards use persistent vectors.
//!
//! Each clone gets its own random stream, so simulated retreats and
//! switches never reveal the draws the real match will make.
//!
//! Knockouts are resolved by the turn loop after the turn ends, so a leaf
//! where the opponent's active card is down is credited its pending
//! points.

use super::{DecisionContext, Policy};
use crate::core::{Action, GameState, PlayerId};
use crate::error::Result;
use crate::rules::RulesEngine;

const POINT_WEIGHT: f64 = 25.0;
const DAMAGE_WEIGHT: f64 = 0.1;
const EVOLVED_WEIGHT: f64 = 5.0;

/// Heuristic value of `state` for `player`.
///
/// ```
/// use pocket_engine::policy::evaluate_player;
/// # use pocket_engine::cards::{Catalog, EnergyType};
/// # use pocket_engine::core::{GameRng, GameState, PlayerId};
/// # use pocket_engine::zones::{Deck, Player};
/// let state = GameState::new(
///     Player::new("a", Deck::new([EnergyType::Psychic])),
///     Player::new("b", Deck::new([EnergyType::Psychic])),
///     GameRng::new(0),
/// );
/// assert_eq!(evaluate_player(&state, PlayerId::FIRST), 0.0);
/// ```
#[must_use]
pub fn evaluate_player(state: &GameState, player: PlayerId) -> f64 {
    let me = state.player(player);
    let opponent = state.player(player.opponent());

    let damage: i32 = opponent.in_play().map(|card| card.damage_taken()).sum();
    let evolved = me.in_play().filter(|card| !card.is_basic()).count();
    let pending = opponent
        .active
        .as_ref()
        .filter(|card| card.is_knocked_out())
        .map_or(0, |card| card.knockout_points());

    POINT_WEIGHT * f64::from(me.points + pending)
        + DAMAGE_WEIGHT * f64::from(damage)
        + EVOLVED_WEIGHT * evolved as f64
}

/// Picks the action that starts the best sequence within `depth` actions.
#[derive(Clone, Debug)]
pub struct PlannerPolicy {
    depth: usize,
}

impl Default for PlannerPolicy {
    fn default() -> Self {
        Self { depth: 3 }
    }
}

impl PlannerPolicy {
    /// A planner looking `depth` actions ahead (at least one).
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn score_after(
        &self,
        rules: &dyn RulesEngine,
        state: &GameState,
        player: PlayerId,
        action: &Action,
        depth: usize,
    ) -> Result<f64> {
        let mut next = branch(state);
        let can_continue = rules.apply_action(&mut next, player, action)?;
        if !can_continue || depth <= 1 {
            return Ok(evaluate_player(&next, player));
        }

        let mut best = evaluate_player(&next, player);
        for follow_up in rules.legal_actions(&next, player)? {
            let score = self.score_after(rules, &next, player, &follow_up, depth - 1)?;
            best = best.max(score);
        }
        Ok(best)
    }
}

/// A clone of `state` with a random stream detached from the live one.
fn branch(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.rng = state.rng.for_context("planner");
    next
}

impl Policy for PlannerPolicy {
    fn name(&self) -> &str {
        "planner"
    }

    fn choose(&mut self, ctx: &DecisionContext<'_>, actions: &[Action]) -> Result<usize> {
        let mut best = (0, f64::NEG_INFINITY);
        for (index, action) in actions.iter().enumerate() {
            let score = self.score_after(ctx.rules, ctx.state, ctx.player, action, self.depth)?;
            if score > best.1 {
                best = (index, score);
            }
        }
        Ok(best.0)
    }
}
