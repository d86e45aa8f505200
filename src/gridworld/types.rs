//! Core grid-world types.
//!
//! Defines grid positions, the four movement actions, and the state key
//! used to index the action-value table.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of discrete actions available in every state.
pub const ACTION_COUNT: usize = 4;

/// One action value per [`Action`], indexed by [`Action::index`].
pub type ActionValues = [f64; ACTION_COUNT];

/// A movement direction.
///
/// The numeric codes are a stable contract shared with renderers and must
/// not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    /// Code 0: decrease row.
    Up,
    /// Code 1: increase column.
    Right,
    /// Code 2: increase row.
    Down,
    /// Code 3: decrease column.
    Left,
}

impl Action {
    /// All actions in code order.
    pub const ALL: [Action; ACTION_COUNT] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// Returns the stable integer code of this action.
    pub fn code(self) -> u8 {
        match self {
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
        }
    }

    /// Returns the code as an index into an [`ActionValues`] row.
    pub fn index(self) -> usize {
        self.code() as usize
    }

    /// Looks up an action by its integer code.
    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(Error::InvalidActionCode(code))
    }

    /// Row and column deltas applied by this action.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Action::from_code(code)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Up => write!(f, "up"),
            Action::Right => write!(f, "right"),
            Action::Down => write!(f, "down"),
            Action::Left => write!(f, "left"),
        }
    }
}

/// A cell on the square grid, addressed by `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Top-left corner `(0, 0)`.
    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Returns true if both coordinates lie in `[0, grid_size - 1]`.
    pub fn in_bounds(&self, grid_size: usize) -> bool {
        self.row < grid_size && self.col < grid_size
    }

    /// Applies `action`, clamping each axis independently to the grid.
    ///
    /// Moving into a wall leaves that coordinate unchanged.
    pub fn moved(self, action: Action, grid_size: usize) -> Self {
        let max = grid_size.saturating_sub(1);
        let (dr, dc) = action.delta();
        Self {
            row: self.row.saturating_add_signed(dr).min(max),
            col: self.col.saturating_add_signed(dc).min(max),
        }
    }

    /// The table key for this position.
    pub fn key(&self) -> StateKey {
        StateKey::from(*self)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Canonical action-value table key derived from a [`Position`].
///
/// Renders as `"row,col"` and parses back from the same text. Serialized
/// in the same text form so tables can be written as JSON objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct StateKey {
    row: usize,
    col: usize,
}

impl StateKey {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position this key was derived from.
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

impl From<Position> for StateKey {
    fn from(p: Position) -> Self {
        Self {
            row: p.row,
            col: p.col,
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for StateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidStateKey(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse().map_err(|_| invalid())?;
        let col = col.trim().parse().map_err(|_| invalid())?;
        Ok(Self { row, col })
    }
}

impl From<StateKey> for String {
    fn from(key: StateKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for StateKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
