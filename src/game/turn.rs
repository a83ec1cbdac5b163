//! The per-turn state machine.
//!
//! `SETUP -> (DISCOVER -> SELECT -> EXECUTE)* -> RESOLVE_KNOCKOUT`
//!
//! Setup can end the match (no creatures left past the opening), and so
//! can knockout resolution (winning points reached). Both are reported in
//! [`TurnReport::outcome`], never as errors. Errors out of this module are
//! discovery/execution mismatches or policy I/O failures.

use tracing::{debug, info, warn};

use crate::core::{Action, ActionCategory, ActionRecord, GameState, MatchConfig, PlayerId};
use crate::error::{EngineError, Result};
use crate::policy::{forced_default, DecisionContext, Policy};
use crate::recording::{BoardView, RenderSink};
use crate::rules::{GameOver, GameOverCause, GameResult, RulesEngine};

/// What happened during one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player: PlayerId,
    /// Executed actions, in order.
    pub actions: Vec<ActionRecord>,
    /// Set when this turn ended the match.
    pub outcome: Option<GameOver>,
}

impl TurnReport {
    fn new(player: PlayerId) -> Self {
        Self {
            player,
            actions: Vec::new(),
            outcome: None,
        }
    }
}

/// Start-of-turn bookkeeping for `player`.
///
/// Returns the match outcome if the player has no creature left to
/// promote once the opening is over.
pub fn setup_turn(config: &MatchConfig, state: &mut GameState, player: PlayerId) -> Option<GameOver> {
    let turn = state.turn;
    let past_opening = config.past_opening(turn);
    let GameState { players, rng, .. } = state;
    let me = players.get_mut(player);

    me.reset_turn_flags();
    me.for_each_in_play_mut(|card| {
        card.has_used_ability = false;
        if past_opening {
            card.can_evolve = true;
        }
    });

    if let Some(active) = me.active.as_mut() {
        let cleared = active.conditions.tick(rng);
        if !cleared.is_empty() {
            debug!(card = %active.name, ?cleared, "conditions wore off");
        }
    }

    if me.active.is_none() && past_opening {
        match me.promote_random_bench(rng) {
            Some(card) => debug!(player = %me.name, %card, "promoted from bench"),
            None => {
                info!(player = %me.name, turn, "no creatures left");
                return Some(GameOver::new(
                    GameResult::Winner(player.opponent()),
                    GameOverCause::NoCreatures,
                    turn,
                ));
            }
        }
    }

    me.draw_card();
    me.draw_energy(rng);
    None
}

/// Play one full turn for `player`.
pub fn play_turn(
    rules: &dyn RulesEngine,
    state: &mut GameState,
    player: PlayerId,
    policy: &mut dyn Policy,
    mut render: Option<&mut (dyn RenderSink + '_)>,
) -> Result<TurnReport> {
    let config = rules.config();
    let mut report = TurnReport::new(player);

    if let Some(over) = setup_turn(config, state, player) {
        report.outcome = Some(over);
        return Ok(report);
    }

    let mut actions = rules.legal_actions(state, player)?;
    if actions.is_empty() {
        debug!(player = %state.player(player).name, "no legal actions, passing");
    }

    while !actions.is_empty() {
        let index = select_action(rules, state, player, policy, &actions)?;
        let action = actions.swap_remove(index);
        let category = action.category;

        let sequence = state.next_sequence();
        let can_continue = rules.apply_action(state, player, &action)?;
        let record = ActionRecord::new(player, action, state.turn, sequence);
        state.record_action(record.clone());
        report.actions.push(record);

        if let Some(sink) = render.as_deref_mut() {
            if let Err(err) = sink.render(&BoardView::of(state)) {
                warn!(%err, "render sink failed");
            }
        }

        if !can_continue {
            break;
        }
        actions = if category == ActionCategory::PlayToActive && !config.past_opening(state.turn) {
            Vec::new()
        } else {
            rules.legal_actions(state, player)?
        };
    }

    report.outcome = resolve_knockout(config, state, player);
    Ok(report)
}

/// Ask the policy for an index, rejecting out-of-range answers.
fn select_action(
    rules: &dyn RulesEngine,
    state: &GameState,
    player: PlayerId,
    policy: &mut dyn Policy,
    actions: &[Action],
) -> Result<usize> {
    let ctx = DecisionContext::new(rules, state, player);
    let retries = rules.config().selection_retries;

    for attempt in 0..=retries {
        let index = match policy.choose(&ctx, actions) {
            Ok(index) => index,
            Err(EngineError::SelectionOutOfRange { index, .. }) => index,
            Err(err) => return Err(err),
        };
        if index < actions.len() {
            return Ok(index);
        }
        warn!(
            policy = policy.name(),
            index,
            len = actions.len(),
            attempt,
            "rejected out-of-range selection"
        );
    }

    let fallback = forced_default(actions);
    warn!(policy = policy.name(), action = %actions[fallback], "applying forced default");
    Ok(fallback)
}

/// Award points for a knocked-out opposing active card.
pub fn resolve_knockout(
    config: &MatchConfig,
    state: &mut GameState,
    player: PlayerId,
) -> Option<GameOver> {
    let turn = state.turn;
    let (me, opponent) = state.players.pair_mut(player);
    if !opponent.active.as_ref().is_some_and(|card| card.is_knocked_out()) {
        return None;
    }

    let card = opponent.knock_out_active()?;
    let points = card.knockout_points();
    me.points += points;
    info!(
        player = %me.name,
        card = %card.name,
        points,
        total = me.points,
        "knockout"
    );

    (me.points >= config.winning_points).then(|| {
        GameOver::new(GameResult::Winner(player), GameOverCause::Points, turn)
    })
}
