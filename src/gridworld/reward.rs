//! Reward scheme for grid navigation.
//!
//! Rewards are evaluated against the cell the agent lands on, in priority
//! order: goal, then hazard, then the per-step living penalty.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::layout::WorldLayout;
use super::types::Position;

/// How a single transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepOutcome {
    /// Landed on the goal. Terminal, counts as a win.
    Goal,
    /// Landed on a hazard. Terminal.
    Hazard,
    /// Any other cell. The episode continues.
    Continue,
}

impl StepOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, StepOutcome::Continue)
    }

    pub fn is_win(self) -> bool {
        matches!(self, StepOutcome::Goal)
    }
}

/// Numeric reward coefficients.
///
/// Defaults use the engine scale: `+100` for the goal, `-100` for a hazard
/// and `-0.1` for every other step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewardScheme {
    /// Reward for reaching the goal.
    pub goal_reward: f64,
    /// Reward (negative) for stepping on a hazard.
    pub hazard_penalty: f64,
    /// Reward (negative) for every non-terminal step.
    pub living_penalty: f64,
}

impl RewardScheme {
    /// Classifies the landing cell and returns its reward.
    pub fn evaluate(&self, landed: Position, layout: &WorldLayout) -> (f64, StepOutcome) {
        if layout.is_goal(landed) {
            (self.goal_reward, StepOutcome::Goal)
        } else if layout.is_hazard(landed) {
            (self.hazard_penalty, StepOutcome::Hazard)
        } else {
            (self.living_penalty, StepOutcome::Continue)
        }
    }

    /// Returns true if every coefficient is a finite number.
    pub fn is_finite(&self) -> bool {
        self.goal_reward.is_finite()
            && self.hazard_penalty.is_finite()
            && self.living_penalty.is_finite()
    }
}

impl Default for RewardScheme {
    fn default() -> Self {
        Self {
            goal_reward: 100.0,
            hazard_penalty: -100.0,
            living_penalty: -0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_has_priority() {
        let layout = WorldLayout::default();
        let (reward, outcome) = RewardScheme::default().evaluate(layout.goal(), &layout);
        assert_eq!(reward, 100.0);
        assert_eq!(outcome, StepOutcome::Goal);
        assert!(outcome.is_terminal());
        assert!(outcome.is_win());
    }

    #[test]
    fn hazard_is_terminal_loss() {
        let layout = WorldLayout::default();
        let (reward, outcome) = RewardScheme::default().evaluate(Position::new(2, 3), &layout);
        assert_eq!(reward, -100.0);
        assert!(outcome.is_terminal());
        assert!(!outcome.is_win());
    }

    #[test]
    fn open_cell_pays_living_penalty() {
        let layout = WorldLayout::default();
        let (reward, outcome) = RewardScheme::default().evaluate(Position::new(0, 1), &layout);
        assert!((reward + 0.1).abs() < 1e-12);
        assert!(!outcome.is_terminal());
    }

    #[test]
    fn custom_coefficients_apply() {
        let scheme = RewardScheme {
            goal_reward: 10.0,
            hazard_penalty: -10.0,
            living_penalty: -0.01,
        };
        let layout = WorldLayout::default();
        assert_eq!(scheme.evaluate(layout.goal(), &layout).0, 10.0);
        assert!(scheme.is_finite());
        assert!(!RewardScheme {
            goal_reward: f64::NAN,
            ..scheme
        }
        .is_finite());
    }
}
