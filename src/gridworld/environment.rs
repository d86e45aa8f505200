//! Grid-world transition model.
//!
//! The environment is a pure function of the layout, the reward scheme, a
//! position and an action. It holds no per-episode state, so one instance
//! can serve any number of sessions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::layout::WorldLayout;
use super::reward::{RewardScheme, StepOutcome};
use super::types::{Action, Position};

/// Result of a single environment step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepResult {
    /// Position after the (clamped) move.
    pub next: Position,
    /// Reward for landing on `next`.
    pub reward: f64,
    /// How the transition ended.
    pub outcome: StepOutcome,
}

impl StepResult {
    /// Whether the episode ends with this transition.
    pub fn terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Whether the transition reached the goal.
    pub fn is_win(&self) -> bool {
        self.outcome.is_win()
    }
}

/// Deterministic grid-world environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    layout: WorldLayout,
    rewards: RewardScheme,
}

impl Environment {
    /// Creates an environment over a validated layout.
    pub fn new(layout: WorldLayout, rewards: RewardScheme) -> Self {
        Self { layout, rewards }
    }

    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    pub fn rewards(&self) -> &RewardScheme {
        &self.rewards
    }

    /// Applies `action` at `position`.
    ///
    /// Moves that would leave the grid are clamped per axis, so walking into
    /// a wall costs a living penalty and leaves the agent in place.
    ///
    /// # Panics
    ///
    /// Panics if `position` lies outside the grid.
    pub fn step(&self, position: Position, action: Action) -> StepResult {
        let grid_size = self.layout.grid_size();
        assert!(
            position.in_bounds(grid_size),
            "position {position} outside {grid_size}x{grid_size} grid"
        );

        let next = position.moved(action, grid_size);
        let (reward, outcome) = self.rewards.evaluate(next, &self.layout);
        StepResult {
            next,
            reward,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn open_env(size: usize) -> Environment {
        let layout = WorldLayout::new(
            size,
            Position::origin(),
            Position::new(size - 1, size - 1),
            [],
        )
        .unwrap();
        Environment::new(layout, RewardScheme::default())
    }

    #[test]
    fn random_walk_stays_in_bounds() {
        let env = Environment::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut pos = env.layout().start();
        for _ in 0..10_000 {
            let action = Action::ALL[rng.gen_range(0..Action::ALL.len())];
            let result = env.step(pos, action);
            assert!(result.next.in_bounds(env.layout().grid_size()));
            pos = if result.terminal() {
                env.layout().start()
            } else {
                result.next
            };
        }
    }

    #[test]
    fn wall_bump_is_a_living_step() {
        let env = open_env(5);
        let result = env.step(Position::origin(), Action::Up);
        assert_eq!(result.next, Position::origin());
        assert!(!result.terminal());
        assert!((result.reward + 0.1).abs() < 1e-12);
    }

    #[test]
    fn stepping_onto_goal_wins() {
        let env = open_env(3);
        let result = env.step(Position::new(2, 1), Action::Right);
        assert_eq!(result.next, Position::new(2, 2));
        assert!(result.terminal());
        assert!(result.is_win());
        assert_eq!(result.reward, 100.0);
    }

    #[test]
    fn stepping_onto_hazard_loses() {
        let env = Environment::default();
        let result = env.step(Position::new(1, 2), Action::Down);
        assert_eq!(result.next, Position::new(2, 2));
        assert!(result.terminal());
        assert!(!result.is_win());
        assert_eq!(result.reward, -100.0);
    }

    #[test]
    fn step_is_deterministic() {
        let env = Environment::default();
        let a = env.step(Position::new(4, 4), Action::Right);
        let b = env.step(Position::new(4, 4), Action::Right);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_input_panics() {
        let env = open_env(3);
        env.step(Position::new(3, 0), Action::Up);
    }
}
