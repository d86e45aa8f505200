//! Configuration for a simulation session.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gridworld::{RewardScheme, WorldLayout};
use crate::learning::HyperParams;

/// Shortest accepted delay between automatic ticks, in milliseconds.
pub const MIN_STEP_DELAY_MS: u64 = 10;
/// Longest accepted delay between automatic ticks, in milliseconds.
pub const MAX_STEP_DELAY_MS: u64 = 1000;
/// Delay used when none is configured.
pub const DEFAULT_STEP_DELAY_MS: u64 = 100;

/// Clamps a requested step delay into the accepted range.
pub fn clamp_step_delay(ms: u64) -> u64 {
    ms.clamp(MIN_STEP_DELAY_MS, MAX_STEP_DELAY_MS)
}

/// Everything needed to start a [`Session`](super::Session).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    // --- World ---
    /// Grid geometry with start, goal and hazards.
    pub layout: WorldLayout,
    /// Reward coefficients.
    pub rewards: RewardScheme,

    // --- Learning ---
    /// Initial hyperparameters.
    pub hyper_params: HyperParams,

    // --- Timing ---
    /// Delay between automatic ticks outside training mode.
    pub step_delay_ms: u64,

    // --- Reproducibility ---
    /// Seed for the agent's RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Checks initial values: hyperparameters in `[0, 1]`, finite rewards,
    /// step delay within bounds.
    pub fn validate(&self) -> Result<()> {
        self.hyper_params.validate()?;
        if !self.rewards.is_finite() {
            return Err(Error::InvalidConfig {
                message: format!("reward coefficients must be finite: {:?}", self.rewards),
            });
        }
        if !(MIN_STEP_DELAY_MS..=MAX_STEP_DELAY_MS).contains(&self.step_delay_ms) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "step delay must be in [{MIN_STEP_DELAY_MS}, {MAX_STEP_DELAY_MS}] ms, got {}",
                    self.step_delay_ms
                ),
            });
        }
        Ok(())
    }

    /// Configured delay as a [`Duration`].
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: WorldLayout::default(),
            rewards: RewardScheme::default(),
            hyper_params: HyperParams::default(),
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SessionConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.step_delay(), Duration::from_millis(100));
    }

    #[test]
    fn rejects_out_of_range_delay() {
        let cfg = SessionConfig {
            step_delay_ms: 5,
            ..SessionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_rewards() {
        let cfg = SessionConfig {
            rewards: RewardScheme {
                living_penalty: f64::INFINITY,
                ..RewardScheme::default()
            },
            ..SessionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn clamp_step_delay_bounds() {
        assert_eq!(clamp_step_delay(0), MIN_STEP_DELAY_MS);
        assert_eq!(clamp_step_delay(250), 250);
        assert_eq!(clamp_step_delay(5000), MAX_STEP_DELAY_MS);
    }
}
