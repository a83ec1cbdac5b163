//! Match driver and builder.

use std::sync::Arc;

use tracing::info;

use super::turn::{play_turn, TurnReport};
use crate::cards::{Catalog, EnergyType};
use crate::core::{EntityAllocator, GameRng, GameState, MatchConfig, PlayerId, PlayerMap};
use crate::error::{EngineError, Result};
use crate::policy::{HumanPolicy, PlannerPolicy, Policy, RandomPolicy, ScriptedPolicy};
use crate::recording::{RenderSink, SnapshotSink, TurnRecord};
use crate::rules::{GameOver, GameOverCause, GameResult, PocketRules, RulesEngine};
use crate::zones::{Deck, Player};

/// How a seat chooses its actions.
pub enum PolicyKind {
    /// Uniform random, seeded from the match seed.
    Random,
    /// Prompt on stdin/stdout.
    Human,
    /// Replay these indices, then end turns.
    Scripted(Vec<usize>),
    /// Lookahead search.
    Planner { depth: usize },
    /// Any other policy.
    Custom(Box<dyn Policy>),
}

impl std::fmt::Debug for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyKind::Random => f.write_str("Random"),
            PolicyKind::Human => f.write_str("Human"),
            PolicyKind::Scripted(indices) => f.debug_tuple("Scripted").field(indices).finish(),
            PolicyKind::Planner { depth } => f.debug_struct("Planner").field("depth", depth).finish(),
            PolicyKind::Custom(policy) => f.debug_tuple("Custom").field(&policy.name()).finish(),
        }
    }
}

/// One seat: name, deck list, energy pool, policy.
#[derive(Debug)]
pub struct PlayerSpec {
    pub name: String,
    pub deck: Vec<String>,
    pub energy_types: Vec<EnergyType>,
    pub policy: PolicyKind,
}

impl PlayerSpec {
    /// A random-policy seat.
    pub fn new<I, S>(
        name: impl Into<String>,
        deck: I,
        energy_types: impl IntoIterator<Item = EnergyType>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            deck: deck.into_iter().map(Into::into).collect(),
            energy_types: energy_types.into_iter().collect(),
            policy: PolicyKind::Random,
        }
    }

    /// Set the policy (builder pattern).
    #[must_use]
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }
}

/// Builds a [`Match`].
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use pocket_engine::cards::{Catalog, EnergyType};
/// use pocket_engine::core::MatchConfig;
/// use pocket_engine::game::{Match, PlayerSpec};
///
/// let mut game = Match::builder(Arc::new(Catalog::standard()))
///     .config(MatchConfig::new().with_seed(3))
///     .player(PlayerSpec::new("alice", ["Ralts", "Ralts"], [EnergyType::Psychic]))
///     .player(PlayerSpec::new("bob", ["Machop", "Machop"], [EnergyType::Fighting]))
///     .build()
///     .unwrap();
///
/// let over = game.play().unwrap();
/// assert!(game.is_over());
/// assert!(over.turn <= 101);
/// ```
pub struct MatchBuilder {
    catalog: Arc<Catalog>,
    config: MatchConfig,
    players: Vec<PlayerSpec>,
    sink: Option<Box<dyn SnapshotSink>>,
    render: Option<Box<dyn RenderSink>>,
}

impl MatchBuilder {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            config: MatchConfig::default(),
            players: Vec::new(),
            sink: None,
            render: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a seat. The first seat acts on odd turns.
    #[must_use]
    pub fn player(mut self, spec: PlayerSpec) -> Self {
        self.players.push(spec);
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl SnapshotSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn render(mut self, render: impl RenderSink + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Build decks, deal opening hands and create the policies.
    pub fn build(self) -> Result<Match> {
        let mut specs = self.players.into_iter();
        let (Some(first), Some(second), None) = (specs.next(), specs.next(), specs.next()) else {
            return Err(EngineError::InvalidSetup(
                "a match needs exactly two players".to_string(),
            ));
        };

        let rng = GameRng::new(self.config.seed);
        let mut ids = EntityAllocator::default();
        let mut seat = |spec: PlayerSpec, index: usize| -> Result<(Player, Box<dyn Policy>)> {
            let mut deck =
                Deck::from_names(&self.catalog, &spec.deck, spec.energy_types, &mut ids)?;
            if self.config.shuffle_decks {
                deck.shuffle(&mut rng.for_context(&format!("deck-{index}")));
            }
            let mut player = Player::new(spec.name, deck);
            player.draw_cards(self.config.opening_hand_size);

            let policy: Box<dyn Policy> = match spec.policy {
                PolicyKind::Random => {
                    Box::new(RandomPolicy::new(rng.for_context(&format!("policy-{index}"))))
                }
                PolicyKind::Human => Box::new(HumanPolicy::stdio()),
                PolicyKind::Scripted(indices) => Box::new(ScriptedPolicy::new(indices)),
                PolicyKind::Planner { depth } => Box::new(PlannerPolicy::new(depth)),
                PolicyKind::Custom(policy) => policy,
            };
            Ok((player, policy))
        };
        let (first, first_policy) = seat(first, 0)?;
        let (second, second_policy) = seat(second, 1)?;

        info!(
            seed = self.config.seed,
            first = %first.name,
            second = %second.name,
            "match created"
        );
        Ok(Match {
            rules: PocketRules::new(self.catalog, self.config),
            state: GameState::new(first, second, rng),
            policies: PlayerMap::from_pair(first_policy, second_policy),
            sink: self.sink,
            render: self.render,
        })
    }
}

/// A two-player match: rules, state, one policy per seat, optional sinks.
pub struct Match {
    rules: PocketRules,
    state: GameState,
    policies: PlayerMap<Box<dyn Policy>>,
    sink: Option<Box<dyn SnapshotSink>>,
    render: Option<Box<dyn RenderSink>>,
}

impl Match {
    #[must_use]
    pub fn builder(catalog: Arc<Catalog>) -> MatchBuilder {
        MatchBuilder::new(catalog)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> &PocketRules {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        self.rules.config()
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameOver> {
        self.state.outcome.as_ref()
    }

    /// Play the next turn. Returns the outcome once the match is over.
    ///
    /// Calling this on a finished match does nothing.
    pub fn advance(&mut self) -> Result<Option<GameOver>> {
        if let Some(over) = &self.state.outcome {
            return Ok(Some(over.clone()));
        }

        let turn = self.state.advance_turn();
        if turn > self.rules.config().max_turns {
            let over = self.turn_limit_outcome(turn);
            info!(turn, result = ?over.result, "turn limit reached");
            self.finish(over.clone())?;
            return Ok(Some(over));
        }

        let player = self.state.acting_player();
        let name = self.state.player(player).name.clone();
        info!(turn, player = %name, "turn start");

        let before = self.sink.is_some().then(|| self.state.snapshot());
        let TurnReport {
            actions, outcome, ..
        } = play_turn(
            &self.rules,
            &mut self.state,
            player,
            &mut **self.policies.get_mut(player),
            self.render.as_deref_mut(),
        )?;

        if let Some(over) = &outcome {
            self.state.outcome = Some(over.clone());
        }
        if let (Some(sink), Some(before)) = (self.sink.as_mut(), before) {
            sink.record(TurnRecord {
                turn,
                active_player: name,
                match_state_before: before,
                actions_taken: actions,
                match_state_after: self.state.snapshot(),
            })?;
        }
        if let Some(over) = outcome {
            info!(turn, result = ?over.result, cause = ?over.cause, "game over");
            self.finish(over.clone())?;
            return Ok(Some(over));
        }
        Ok(None)
    }

    /// Play until the match ends.
    pub fn play(&mut self) -> Result<GameOver> {
        loop {
            if let Some(over) = self.advance()? {
                return Ok(over);
            }
        }
    }

    fn turn_limit_outcome(&self, turn: u32) -> GameOver {
        let first = self.state.player(PlayerId::FIRST).points;
        let second = self.state.player(PlayerId::SECOND).points;
        let result = match first.cmp(&second) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::FIRST),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::SECOND),
            std::cmp::Ordering::Equal => GameResult::Draw,
        };
        GameOver::new(result, GameOverCause::TurnLimit, turn)
    }

    fn finish(&mut self, over: GameOver) -> Result<()> {
        self.state.outcome = Some(over);
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        Ok(())
    }
}
