//! Read-only views handed to renderers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::stats::EpisodeStats;
use crate::gridworld::{Action, Position, WorldLayout};
use crate::learning::q_table::{argmax_all, max_of};
use crate::learning::{HyperParams, QTable};

/// Action value at which a cell's heat saturates.
pub const HEAT_SCALE: f64 = 10.0;

/// Point-in-time copy of everything a renderer reads from a session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionSnapshot {
    pub session_id: String,
    pub position: Position,
    pub grid_size: usize,
    pub start: Position,
    pub goal: Position,
    pub hazards: Vec<Position>,
    pub stats: EpisodeStats,
    pub config: HyperParams,
    pub step_delay_ms: u64,
    pub paused: bool,
}

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellKind {
    Start,
    Goal,
    Hazard,
    Open,
}

/// Learned policy and value heat for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellView {
    pub position: Position,
    pub kind: CellKind,
    /// Maximum action value, if the state has a table row.
    pub max_value: Option<f64>,
    /// The single best action. `None` for terminal cells, unvisited or
    /// all-zero rows, and rows whose maximum is tied.
    pub best_action: Option<Action>,
    /// `sign(max) * min(|max| / HEAT_SCALE, 1)`, or 0 without a row.
    pub heat: f64,
}

/// Builds one [`CellView`] per grid cell in row-major order.
pub fn policy_grid(layout: &WorldLayout, table: &QTable) -> Vec<CellView> {
    layout
        .cells()
        .map(|position| {
            let kind = if layout.is_goal(position) {
                CellKind::Goal
            } else if layout.is_hazard(position) {
                CellKind::Hazard
            } else if position == layout.start() {
                CellKind::Start
            } else {
                CellKind::Open
            };
            let row = table.get(&position.key());
            let max_value = row.map(max_of);
            let terminal = matches!(kind, CellKind::Goal | CellKind::Hazard);

            let best_action = match row {
                Some(values) if !terminal && values.iter().any(|&v| v != 0.0) => {
                    match argmax_all(values).as_slice() {
                        [only] => Some(Action::ALL[*only]),
                        _ => None,
                    }
                }
                _ => None,
            };
            let heat = max_value
                .map(|m| m.signum() * (m.abs() / HEAT_SCALE).min(1.0))
                .filter(|h| !h.is_nan())
                .unwrap_or(0.0);

            CellView {
                position,
                kind,
                max_value,
                best_action,
                heat,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(grid: &[CellView], layout: &WorldLayout, row: usize, col: usize) -> CellView {
        grid[row * layout.grid_size() + col]
    }

    #[test]
    fn empty_table_has_no_arrows_or_heat() {
        let layout = WorldLayout::default();
        let grid = policy_grid(&layout, &QTable::new());
        assert_eq!(grid.len(), layout.cell_count());
        assert!(grid.iter().all(|c| c.best_action.is_none() && c.heat == 0.0));
        assert_eq!(cell(&grid, &layout, 0, 0).kind, CellKind::Start);
        assert_eq!(cell(&grid, &layout, 9, 9).kind, CellKind::Goal);
        assert_eq!(cell(&grid, &layout, 2, 3).kind, CellKind::Hazard);
        assert_eq!(cell(&grid, &layout, 0, 5).kind, CellKind::Open);
    }

    #[test]
    fn unique_max_shows_arrow() {
        let layout = WorldLayout::default();
        let mut table = QTable::new();
        *table.row_mut(Position::new(0, 1).key()) = [0.0, 4.0, 1.0, 0.0];
        let grid = policy_grid(&layout, &table);
        let c = cell(&grid, &layout, 0, 1);
        assert_eq!(c.best_action, Some(Action::Right));
        assert_eq!(c.max_value, Some(4.0));
        assert!((c.heat - 0.4).abs() < 1e-12);
    }

    #[test]
    fn tied_max_hides_arrow() {
        let layout = WorldLayout::default();
        let mut table = QTable::new();
        *table.row_mut(Position::new(1, 1).key()) = [-0.5, -0.5, -1.0, -2.0];
        let c = cell(&policy_grid(&layout, &table), &layout, 1, 1);
        assert_eq!(c.best_action, None);
        assert!((c.heat + 0.05).abs() < 1e-12);
    }

    #[test]
    fn heat_saturates() {
        let layout = WorldLayout::default();
        let mut table = QTable::new();
        *table.row_mut(Position::new(3, 3).key()) = [-80.0, -90.0, -95.0, -99.0];
        let c = cell(&policy_grid(&layout, &table), &layout, 3, 3);
        assert_eq!(c.heat, -1.0);
        assert_eq!(c.best_action, Some(Action::Up));
    }

    #[test]
    fn terminal_cells_never_show_arrow() {
        let layout = WorldLayout::default();
        let mut table = QTable::new();
        *table.row_mut(layout.goal().key()) = [1.0, 0.0, 0.0, 0.0];
        let c = cell(&policy_grid(&layout, &table), &layout, 9, 9);
        assert_eq!(c.best_action, None);
    }
}
