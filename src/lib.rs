//! qgrid - tabular Q-learning on a 2D grid world.
//!
//! An agent learns, over repeated episodes, to walk from a start cell to a
//! goal cell while avoiding hazards. The crate provides the environment
//! model, the learning agent and an episode/step scheduler with pause,
//! single-step and training-mode controls. Rendering is left to callers,
//! which read [`session::SessionSnapshot`]s and per-cell policy views.

pub mod error;
pub mod gridworld;
pub mod learning;
#[cfg(feature = "runtime")]
pub mod runner;
pub mod session;

pub use error::{Error, Result};
pub use gridworld::{Action, Environment, Position, RewardScheme, StateKey, WorldLayout};
pub use learning::{HyperParams, HyperParamsUpdate, QLearningAgent, QTable};
#[cfg(feature = "runtime")]
pub use runner::{SessionHandle, SimulationRunner};
pub use session::{EpisodeStats, RunState, Session, SessionConfig, SessionSnapshot};

/// Identifier type used for sessions.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
