//! Action-selection policies over a row of action values.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::q_table::argmax_all;
use crate::gridworld::{Action, ActionValues};

/// Picks an action from a state's action values.
pub trait Policy {
    /// Selects one action given the values of the current state.
    fn select_action(&self, values: &ActionValues, rng: &mut dyn RngCore) -> Action;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}

/// Epsilon-greedy selection with uniform tie-breaking.
///
/// With probability `epsilon` a uniformly random action is returned.
/// Otherwise one of the actions attaining the maximum value is returned,
/// chosen uniformly among the ties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    pub epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }
}

impl Policy for EpsilonGreedy {
    fn select_action(&self, values: &ActionValues, rng: &mut dyn RngCore) -> Action {
        if rng.gen::<f64>() < self.epsilon {
            return RandomPolicy.select_action(values, rng);
        }
        let best = argmax_all(values);
        let index = best.choose(rng).copied().unwrap_or(0);
        Action::ALL[index]
    }

    fn name(&self) -> &str {
        "epsilon_greedy"
    }
}

/// Deterministic greedy selection; ties go to the lowest action code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Greedy;

impl Policy for Greedy {
    fn select_action(&self, values: &ActionValues, _rng: &mut dyn RngCore) -> Action {
        let index = argmax_all(values).first().copied().unwrap_or(0);
        Action::ALL[index]
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

/// Uniformly random action, ignoring values. Used as a baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn select_action(&self, _values: &ActionValues, rng: &mut dyn RngCore) -> Action {
        Action::ALL[rng.gen_range(0..Action::ALL.len())]
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn epsilon_zero_picks_unique_max() {
        let mut rng = StdRng::seed_from_u64(1);
        let policy = EpsilonGreedy::new(0.0);
        for _ in 0..100 {
            let a = policy.select_action(&[0.0, 0.0, 100.0, 0.0], &mut rng);
            assert_eq!(a, Action::Down);
        }
    }

    #[test]
    fn epsilon_zero_breaks_ties_among_maxima_only() {
        let mut rng = StdRng::seed_from_u64(2);
        let policy = EpsilonGreedy::new(0.0);
        let seen: HashSet<_> = (0..200)
            .map(|_| policy.select_action(&[5.0, -1.0, 5.0, 0.0], &mut rng))
            .collect();
        assert_eq!(seen, HashSet::from([Action::Up, Action::Down]));
    }

    #[test]
    fn epsilon_one_explores_every_action() {
        let mut rng = StdRng::seed_from_u64(3);
        let policy = EpsilonGreedy::new(1.0);
        let seen: HashSet<_> = (0..500)
            .map(|_| policy.select_action(&[0.0, 0.0, 100.0, 0.0], &mut rng))
            .collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn greedy_prefers_lowest_code_on_tie() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(Greedy.select_action(&[0.0; 4], &mut rng), Action::Up);
        assert_eq!(
            Greedy.select_action(&[1.0, 2.0, 2.0, 0.0], &mut rng),
            Action::Right
        );
    }

    #[test]
    fn random_policy_covers_actions() {
        let mut rng = StdRng::seed_from_u64(5);
        let seen: HashSet<_> = (0..500)
            .map(|_| RandomPolicy.select_action(&[0.0; 4], &mut rng))
            .collect();
        assert_eq!(seen.len(), 4);
        assert_eq!(RandomPolicy.name(), "random");
    }
}
