//! Externally driven selection.

use std::collections::VecDeque;

use super::{forced_default, DecisionContext, Policy};
use crate::core::Action;
use crate::error::Result;

/// Replays a queue of indices supplied from outside the loop.
///
/// Indices are returned as given, so a bad index reaches the turn loop's
/// rejection path. Once the queue is exhausted the policy ends the turn.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPolicy {
    queue: VecDeque<usize>,
}

impl ScriptedPolicy {
    #[must_use]
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: indices.into_iter().collect(),
        }
    }

    /// Append an index to the queue.
    pub fn push(&mut self, index: usize) {
        self.queue.push_back(index);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Policy for ScriptedPolicy {
    fn name(&self) -> &str {
        "scripted"
    }

    fn choose(&mut self, _ctx: &DecisionContext<'_>, actions: &[Action]) -> Result<usize> {
        Ok(self
            .queue
            .pop_front()
            .unwrap_or_else(|| forced_default(actions)))
    }
}
