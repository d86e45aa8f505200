//! Rollout evaluation of a learned table.
//!
//! Follows a policy from the start cell against a read-only table, without
//! learning, to check what the agent would do right now.

use std::fmt;

use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::gridworld::{Environment, Position, StepOutcome};
use crate::learning::{Policy, QTable};

/// How an evaluation rollout ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RolloutOutcome {
    ReachedGoal,
    HitHazard,
    /// Ran out of steps, usually a loop between cells.
    StepLimit,
}

/// Result of one evaluation rollout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GreedyEvaluation {
    pub outcome: RolloutOutcome,
    pub steps: usize,
    pub total_reward: f64,
    /// Visited cells, starting with the start cell.
    pub path: Vec<Position>,
}

impl GreedyEvaluation {
    /// Rolls out `policy` for at most `max_steps` steps.
    ///
    /// Unvisited states read as zero rows; the table is never modified.
    pub fn run(
        env: &Environment,
        table: &QTable,
        policy: &dyn Policy,
        rng: &mut dyn RngCore,
        max_steps: usize,
    ) -> Self {
        let mut position = env.layout().start();
        let mut path = vec![position];
        let mut total_reward = 0.0;

        for step in 1..=max_steps {
            let values = table.peek(&position.key());
            let action = policy.select_action(&values, rng);
            let result = env.step(position, action);
            total_reward += result.reward;
            position = result.next;
            path.push(position);

            let outcome = match result.outcome {
                StepOutcome::Goal => RolloutOutcome::ReachedGoal,
                StepOutcome::Hazard => RolloutOutcome::HitHazard,
                StepOutcome::Continue => continue,
            };
            return Self {
                outcome,
                steps: step,
                total_reward,
                path,
            };
        }

        Self {
            outcome: RolloutOutcome::StepLimit,
            steps: max_steps,
            total_reward,
            path,
        }
    }

    pub fn reached_goal(&self) -> bool {
        self.outcome == RolloutOutcome::ReachedGoal
    }
}

impl fmt::Display for GreedyEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            RolloutOutcome::ReachedGoal => "reached goal",
            RolloutOutcome::HitHazard => "hit hazard",
            RolloutOutcome::StepLimit => "step limit",
        };
        write!(
            f,
            "{outcome} after {} steps (reward {:.1})",
            self.steps, self.total_reward
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridworld::{Action, RewardScheme, WorldLayout};
    use crate::learning::{Greedy, RandomPolicy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn corridor() -> Environment {
        // 3x3, goal at (0,2), hazard directly below the start
        let layout = WorldLayout::new(
            3,
            Position::origin(),
            Position::new(0, 2),
            [Position::new(1, 0)],
        )
        .unwrap();
        Environment::new(layout, RewardScheme::default())
    }

    #[test]
    fn greedy_follows_learned_route() {
        let env = corridor();
        let mut table = QTable::new();
        table.row_mut(Position::new(0, 0).key())[Action::Right.index()] = 1.0;
        table.row_mut(Position::new(0, 1).key())[Action::Right.index()] = 1.0;

        let mut rng = StdRng::seed_from_u64(0);
        let eval = GreedyEvaluation::run(&env, &table, &Greedy, &mut rng, 10);
        assert!(eval.reached_goal());
        assert_eq!(eval.steps, 2);
        assert_eq!(
            eval.path,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
        assert!((eval.total_reward - 99.9).abs() < 1e-9);
    }

    #[test]
    fn empty_table_greedy_loops_until_limit() {
        // all-zero rows always pick Up, which bumps the top wall
        let env = corridor();
        let table = QTable::new();
        let mut rng = StdRng::seed_from_u64(0);
        let eval = GreedyEvaluation::run(&env, &table, &Greedy, &mut rng, 25);
        assert_eq!(eval.outcome, RolloutOutcome::StepLimit);
        assert_eq!(eval.steps, 25);
        assert_eq!(eval.path.len(), 26);
        assert!(table.is_empty());
    }

    #[test]
    fn learned_hazard_move_is_reported() {
        let env = corridor();
        let mut table = QTable::new();
        table.row_mut(Position::new(0, 0).key())[Action::Down.index()] = 3.0;
        let mut rng = StdRng::seed_from_u64(0);
        let eval = GreedyEvaluation::run(&env, &table, &Greedy, &mut rng, 10);
        assert_eq!(eval.outcome, RolloutOutcome::HitHazard);
        assert_eq!(eval.to_string(), "hit hazard after 1 steps (reward -100.0)");
    }

    #[test]
    fn random_baseline_terminates_or_hits_limit() {
        let env = corridor();
        let mut rng = StdRng::seed_from_u64(11);
        let eval = GreedyEvaluation::run(&env, &QTable::new(), &RandomPolicy, &mut rng, 200);
        assert!(eval.steps <= 200);
        assert_eq!(eval.path.len(), eval.steps + 1);
    }
}
