//! Grid-world environment model.
//!
//! Geometry, actions and the reward scheme of the navigation task. Nothing
//! here mutates after construction.

pub mod environment;
pub mod layout;
pub mod reward;
pub mod types;

pub use environment::{Environment, StepResult};
pub use layout::WorldLayout;
pub use reward::{RewardScheme, StepOutcome};
pub use types::{Action, ActionValues, Position, StateKey, ACTION_COUNT};
