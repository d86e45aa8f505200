//! Episode/step scheduler.
//!
//! A [`Session`] owns the agent's position and running statistics and drives
//! repeated environment-step / agent-update cycles. It is a plain value: the
//! caller decides when cycles run, either through [`Session::tick`] from a
//! timer (see [`crate::runner`]) or through [`Session::advance_one_step`].
//!
//! # Lifecycle
//!
//! 1. Build with [`Session::new`] from a [`SessionConfig`].
//! 2. Call [`Session::tick`] at the cadence given by [`Session::tick_delay`].
//! 3. Use [`Session::pause`], [`Session::resume`] and
//!    [`Session::advance_one_step`] for manual control.
//! 4. Inspect [`Session::snapshot`] and [`Session::policy_grid`] for rendering.

pub mod config;
pub mod metrics;
pub mod stats;
pub mod view;


use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use config::SessionConfig;
pub use metrics::{GreedyEvaluation, RolloutOutcome};
pub use stats::{EpisodeStats, HistorySummary};
pub use view::{CellKind, CellView, SessionSnapshot};

use crate::error::Result;
use crate::gridworld::{Action, Environment, Position, StateKey, StepResult, WorldLayout};
use crate::learning::{Greedy, HyperParams, HyperParamsUpdate, QLearningAgent, QTable};
use crate::{generate_id, Id};

/// Delay between automatic ticks while training mode is on.
pub const TRAINING_TICK_DELAY: Duration = Duration::ZERO;

/// Seed for the rollout RNG of [`Session::evaluate_greedy`].
const EVALUATION_SEED: u64 = 0;

/// Whether automatic ticks run cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RunState {
    Running,
    Paused,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running => write!(f, "running"),
            RunState::Paused => write!(f, "paused"),
        }
    }
}

/// What happened during one simulation cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// State the action was chosen in.
    pub state: StateKey,
    /// Chosen action.
    pub action: Action,
    /// Environment response.
    pub step: StepResult,
    /// Set when the cycle ended an episode; holds the number of the
    /// episode that just finished.
    pub finished_episode: Option<u64>,
}

/// One learning session: environment, agent, position and statistics.
///
/// The agent is read-only from outside. Its table and hyperparameters change
/// only through cycles, [`Session::set_config`] and [`Session::full_reset`]:
///
/// ```compile_fail
/// let mut session = qgrid::Session::default();
/// session.agent_mut().reset();
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    id: Id,
    env: Environment,
    agent: QLearningAgent,
    config: HyperParams,
    position: Position,
    stats: EpisodeStats,
    state: RunState,
    step_delay_ms: u64,
}

impl Session {
    /// Validates `config` and builds a running session at episode 1, step 0.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: SessionConfig) -> Self {
        let SessionConfig {
            layout,
            rewards,
            hyper_params,
            step_delay_ms,
            seed,
        } = config;

        let agent = QLearningAgent::new(hyper_params);
        let agent = match seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        };
        let position = layout.start();

        Self {
            id: generate_id(),
            env: Environment::new(layout, rewards),
            agent,
            config: hyper_params,
            position,
            stats: EpisodeStats::new(),
            state: RunState::Running,
            step_delay_ms,
        }
    }

    // --- Read side ---

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current agent position.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn layout(&self) -> &WorldLayout {
        self.env.layout()
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    /// Hyperparameters as last set on the session.
    pub fn config(&self) -> &HyperParams {
        &self.config
    }

    /// Read-only view of the agent's action-value table.
    pub fn q_table(&self) -> &QTable {
        self.agent.q_table()
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    #[cfg(test)]
    pub(crate) fn agent_mut(&mut self) -> &mut QLearningAgent {
        &mut self.agent
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn step_delay_ms(&self) -> u64 {
        self.step_delay_ms
    }

    /// Delay before the next automatic tick: zero in training mode,
    /// otherwise the configured step delay.
    pub fn tick_delay(&self) -> Duration {
        if self.config.training_mode {
            TRAINING_TICK_DELAY
        } else {
            Duration::from_millis(self.step_delay_ms)
        }
    }

    /// Copies everything a renderer needs.
    pub fn snapshot(&self) -> SessionSnapshot {
        let layout = self.env.layout();
        SessionSnapshot {
            session_id: self.id.clone(),
            position: self.position,
            grid_size: layout.grid_size(),
            start: layout.start(),
            goal: layout.goal(),
            hazards: layout.hazards().collect(),
            stats: self.stats.clone(),
            config: self.config,
            step_delay_ms: self.step_delay_ms,
            paused: self.is_paused(),
        }
    }

    /// Per-cell best action and value heat, row-major.
    pub fn policy_grid(&self) -> Vec<CellView> {
        view::policy_grid(self.env.layout(), self.agent.q_table())
    }

    /// Rolls out the current greedy policy without learning.
    ///
    /// Ties go to the lowest action code, so the result depends only on the
    /// table.
    pub fn evaluate_greedy(&self, max_steps: usize) -> GreedyEvaluation {
        let mut rng = StdRng::seed_from_u64(EVALUATION_SEED);
        GreedyEvaluation::run(&self.env, self.agent.q_table(), &Greedy, &mut rng, max_steps)
    }

    // --- Write side ---

    /// Stops automatic ticks. Manual steps stay available.
    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            debug!(session = %self.id, "paused");
        }
        self.state = RunState::Paused;
    }

    /// Re-enables automatic ticks.
    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            debug!(session = %self.id, "resumed");
        }
        self.state = RunState::Running;
    }

    /// Merges a partial hyperparameter change and pushes the result to the
    /// agent. Values are not validated.
    pub fn set_config(&mut self, update: HyperParamsUpdate) {
        self.config.apply(&update);
        self.agent.set_config(&HyperParamsUpdate::from(self.config));
        debug!(
            session = %self.id,
            alpha = self.config.alpha,
            gamma = self.config.gamma,
            epsilon = self.config.epsilon,
            training_mode = self.config.training_mode,
            "config updated"
        );
    }

    /// Sets the delay between automatic ticks, clamped to
    /// `[MIN_STEP_DELAY_MS, MAX_STEP_DELAY_MS]`.
    pub fn set_simulation_speed(&mut self, ms: u64) {
        let clamped = config::clamp_step_delay(ms);
        if clamped != ms {
            debug!(session = %self.id, requested = ms, applied = clamped, "step delay clamped");
        }
        self.step_delay_ms = clamped;
    }

    /// Clears learned values and statistics, returns to the start cell and
    /// resumes.
    pub fn full_reset(&mut self) {
        self.agent.reset();
        self.stats.reset();
        self.position = self.env.layout().start();
        self.state = RunState::Running;
        info!(session = %self.id, "full reset");
    }

    /// Automatic trigger: runs one cycle if the session is running.
    pub fn tick(&mut self) -> Option<CycleReport> {
        match self.state {
            RunState::Running => Some(self.run_cycle()),
            RunState::Paused => None,
        }
    }

    /// Manual trigger: runs exactly one cycle in any state.
    pub fn advance_one_step(&mut self) -> CycleReport {
        self.run_cycle()
    }

    fn run_cycle(&mut self) -> CycleReport {
        let grid_size = self.env.layout().grid_size();
        assert!(
            self.position.in_bounds(grid_size),
            "session position {} outside {grid_size}x{grid_size} grid",
            self.position
        );

        let state = self.position.key();
        let action = self.agent.select_action(state);
        let step = self.env.step(self.position, action);
        self.agent.update(state, action, step.reward, step.next.key());

        self.position = step.next;
        self.stats.record_step(step.reward, step.is_win());
        trace!(
            session = %self.id,
            %state,
            %action,
            next = %step.next,
            reward = step.reward,
            "cycle"
        );

        let finished_episode = if step.terminal() {
            let episode = self.stats.episode;
            debug!(
                session = %self.id,
                episode,
                steps = self.stats.step,
                reward = self.stats.cumulative_reward,
                win = step.is_win(),
                "episode finished"
            );
            self.stats.finish_episode();
            self.position = self.env.layout().start();
            Some(episode)
        } else {
            None
        };

        CycleReport {
            state,
            action,
            step,
            finished_episode,
        }
    }
}

impl Default for Session {
    /// A session on the shipped level with default hyperparameters.
    fn default() -> Self {
        Self::from_config(SessionConfig::default())
    }
}
