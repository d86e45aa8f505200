//! Action-value table.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::gridworld::{ActionValues, StateKey, ACTION_COUNT};

/// Zero row handed out for states that have never been visited.
const ZERO_ROW: ActionValues = [0.0; ACTION_COUNT];

/// Mapping from [`StateKey`] to one value per action.
///
/// Rows are created on first access through [`QTable::row`] or
/// [`QTable::row_mut`] and are only ever removed by [`QTable::clear`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QTable {
    rows: HashMap<StateKey, ActionValues>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the row for `state`, inserting a zero row if absent.
    pub fn row(&mut self, state: StateKey) -> ActionValues {
        *self.row_mut(state)
    }

    /// Mutable access to the row for `state`, inserting a zero row if absent.
    pub fn row_mut(&mut self, state: StateKey) -> &mut ActionValues {
        self.rows.entry(state).or_insert(ZERO_ROW)
    }

    /// Looks up a row without inserting.
    pub fn get(&self, state: &StateKey) -> Option<&ActionValues> {
        self.rows.get(state)
    }

    /// Returns the row for `state`, or zeros if it was never visited.
    /// Never inserts.
    pub fn peek(&self, state: &StateKey) -> ActionValues {
        self.rows.get(state).copied().unwrap_or(ZERO_ROW)
    }

    /// Maximum action value of `state`, inserting a zero row if absent.
    pub fn max_value(&mut self, state: StateKey) -> f64 {
        max_of(&self.row(state))
    }

    pub fn contains(&self, state: &StateKey) -> bool {
        self.rows.contains_key(state)
    }

    /// Number of states with a row.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Iterates over all rows in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &ActionValues)> {
        self.rows.iter()
    }
}

/// Largest value in a row.
pub fn max_of(values: &ActionValues) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Indices of every action attaining the row maximum, in code order.
pub fn argmax_all(values: &ActionValues) -> Vec<usize> {
    let max = max_of(values);
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v == max)
        .map(|(i, _)| i)
        .collect()
}
