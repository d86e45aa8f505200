//! Tabular Q-learning agent.
//!
//! The agent owns the action-value table and its latest copy of the
//! hyperparameters. It selects actions epsilon-greedily and learns with the
//! one-step Bellman update
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α · (r + γ · max_a' Q(s',a') − Q(s,a))
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::{HyperParams, HyperParamsUpdate};
use super::policy::{EpsilonGreedy, Policy};
use super::q_table::QTable;
use crate::gridworld::{Action, ActionValues, StateKey};

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Q-learning agent (off-policy TD control).
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    params: HyperParams,
    rng: StdRng,
}

impl QLearningAgent {
    /// Creates an agent with an empty table and an entropy-seeded RNG.
    pub fn new(params: HyperParams) -> Self {
        Self {
            q_table: QTable::new(),
            params,
            rng: build_rng(None),
        }
    }

    /// Reseeds the agent's RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self
    }

    /// Current hyperparameters.
    pub fn config(&self) -> &HyperParams {
        &self.params
    }

    /// Read-only view of the action-value table.
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Returns the values of `state`, creating a zero row on first access.
    pub fn action_values(&mut self, state: StateKey) -> ActionValues {
        self.q_table.row(state)
    }

    /// Mutable row access with the same get-or-insert behaviour as
    /// [`QLearningAgent::action_values`].
    pub fn action_values_mut(&mut self, state: StateKey) -> &mut ActionValues {
        self.q_table.row_mut(state)
    }

    /// Epsilon-greedy action for `state` using the current ε.
    pub fn select_action(&mut self, state: StateKey) -> Action {
        let values = self.q_table.row(state);
        EpsilonGreedy::new(self.params.epsilon).select_action(&values, &mut self.rng)
    }

    /// Applies one Bellman update for the transition `state --action--> next_state`.
    ///
    /// Reading the maximum of `next_state` creates its row if needed.
    pub fn update(&mut self, state: StateKey, action: Action, reward: f64, next_state: StateKey) {
        let next_max = self.q_table.max_value(next_state);
        let HyperParams { alpha, gamma, .. } = self.params;

        let slot = &mut self.q_table.row_mut(state)[action.index()];
        let current = *slot;
        *slot = current + alpha * (reward + gamma * next_max - current);

        debug_assert!(
            slot.is_finite(),
            "non-finite Q({state}, {action}) after update: {slot}"
        );
    }

    /// Merges a partial hyperparameter change. Effective on the next call.
    pub fn set_config(&mut self, update: &HyperParamsUpdate) {
        self.params.apply(update);
    }

    /// Clears the table. Hyperparameters are kept.
    pub fn reset(&mut self) {
        self.q_table.clear();
    }
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self::new(HyperParams::default())
    }
}
