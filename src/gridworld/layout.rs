//! World layout: grid geometry plus start, goal and hazard cells.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::Position;
use crate::error::{Error, Result};

/// Side length of the shipped level.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Hazard cells of the shipped level, as `(row, col)`.
pub const DEFAULT_HAZARDS: [(usize, usize); 9] = [
    (2, 2),
    (2, 3),
    (2, 4),
    (5, 5),
    (5, 6),
    (4, 6),
    (7, 1),
    (7, 2),
    (8, 2),
];

/// Immutable geometry of one session's world.
///
/// A layout is validated once at construction; every position it holds is
/// inside the grid and the start, goal and hazard cells are disjoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLayout"))]
pub struct WorldLayout {
    grid_size: usize,
    start: Position,
    goal: Position,
    hazards: BTreeSet<Position>,
}

impl WorldLayout {
    /// Builds and validates a layout.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidGridSize`] if `grid_size < 2`
    /// - [`Error::OutOfBounds`] if any cell lies outside the grid
    /// - [`Error::InvalidLayout`] if start, goal and hazards overlap
    pub fn new(
        grid_size: usize,
        start: Position,
        goal: Position,
        hazards: impl IntoIterator<Item = Position>,
    ) -> Result<Self> {
        if grid_size < 2 {
            return Err(Error::InvalidGridSize { size: grid_size });
        }
        let hazards: BTreeSet<Position> = hazards.into_iter().collect();

        let check = |what: &'static str, position: Position| {
            if position.in_bounds(grid_size) {
                Ok(())
            } else {
                Err(Error::OutOfBounds {
                    what,
                    position,
                    grid_size,
                })
            }
        };
        check("start", start)?;
        check("goal", goal)?;
        for hazard in &hazards {
            check("hazard", *hazard)?;
        }

        if start == goal {
            return Err(Error::InvalidLayout {
                reason: format!("start and goal share cell {start}"),
            });
        }
        if hazards.contains(&goal) {
            return Err(Error::InvalidLayout {
                reason: format!("goal {goal} is also a hazard"),
            });
        }
        if hazards.contains(&start) {
            return Err(Error::InvalidLayout {
                reason: format!("start {start} is also a hazard"),
            });
        }

        Ok(Self {
            grid_size,
            start,
            goal,
            hazards,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    /// Hazard cells in row-major order.
    pub fn hazards(&self) -> impl Iterator<Item = Position> + '_ {
        self.hazards.iter().copied()
    }

    pub fn hazard_count(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_goal(&self, position: Position) -> bool {
        position == self.goal
    }

    pub fn is_hazard(&self, position: Position) -> bool {
        self.hazards.contains(&position)
    }

    /// Total number of cells on the grid.
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.grid_size)
            .flat_map(move |row| (0..self.grid_size).map(move |col| Position::new(row, col)))
    }
}

/// Wire form of a layout; only becomes a [`WorldLayout`] through
/// [`WorldLayout::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawLayout {
    grid_size: usize,
    start: Position,
    goal: Position,
    hazards: BTreeSet<Position>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLayout> for WorldLayout {
    type Error = Error;

    fn try_from(raw: RawLayout) -> Result<Self> {
        Self::new(raw.grid_size, raw.start, raw.goal, raw.hazards)
    }
}

impl Default for WorldLayout {
    /// The shipped 10x10 level: start top-left, goal bottom-right, three
    /// hazard clusters in between.
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            start: Position::origin(),
            goal: Position::new(DEFAULT_GRID_SIZE - 1, DEFAULT_GRID_SIZE - 1),
            hazards: DEFAULT_HAZARDS
                .iter()
                .map(|&(row, col)| Position::new(row, col))
                .collect(),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn default_layout_round_trips() {
        let layout = WorldLayout::default();
        let json = serde_json::to_string(&layout).unwrap();
        let back: WorldLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn deserialize_rejects_zero_grid() {
        let mut json = serde_json::to_value(WorldLayout::default()).unwrap();
        json["grid_size"] = serde_json::json!(0);
        let err = serde_json::from_value::<WorldLayout>(json).unwrap_err();
        assert!(err.to_string().contains("grid size"), "{err}");
    }

    #[test]
    fn deserialize_rejects_hazard_on_goal() {
        let mut json = serde_json::to_value(WorldLayout::default()).unwrap();
        json["hazards"] = serde_json::json!([{ "row": 9, "col": 9 }]);
        assert!(serde_json::from_value::<WorldLayout>(json).is_err());
    }
}
