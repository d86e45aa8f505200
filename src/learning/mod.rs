//! Learning agent: action-value table, hyperparameters and policies.

pub mod agent;
pub mod config;
pub mod policy;
pub mod q_table;

pub use agent::QLearningAgent;
pub use config::{HyperParams, HyperParamsUpdate};
pub use policy::{EpsilonGreedy, Greedy, Policy, RandomPolicy};
pub use q_table::QTable;
