//! Error types for the grid-world engine.

use thiserror::Error;

use crate::gridworld::Position;

/// Main error type for the crate.
///
/// Only construction and parsing paths return errors. Broken runtime
/// invariants (an out-of-grid position, a non-finite action value) are
/// programming defects and are asserted instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("grid size must be at least 2, got {size}")]
    InvalidGridSize { size: usize },

    #[error("{what} {position} lies outside a {grid_size}x{grid_size} grid")]
    OutOfBounds {
        what: &'static str,
        position: Position,
        grid_size: usize,
    },

    #[error("invalid layout: {reason}")]
    InvalidLayout { reason: String },

    #[error("invalid action code {0} (expected 0..=3)")]
    InvalidActionCode(u8),

    #[error("invalid state key '{0}' (expected \"row,col\")")]
    InvalidStateKey(String),

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[cfg(feature = "runtime")]
    #[error("simulation task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Convenience alias for results using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
