//! Hyperparameters for the Q-learning agent.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Learning hyperparameters.
///
/// Values are expected in `[0, 1]` but are not clamped here; callers
/// constrain their inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HyperParams {
    /// Learning rate α.
    pub alpha: f64,
    /// Discount factor γ.
    pub gamma: f64,
    /// Exploration rate ε.
    pub epsilon: f64,
    /// Run cycles as fast as possible instead of at the configured delay.
    /// Read by the scheduler; the agent ignores it.
    pub training_mode: bool,
}

impl HyperParams {
    /// Merges the fields set in `update`, keeping the rest.
    pub fn apply(&mut self, update: &HyperParamsUpdate) {
        if let Some(alpha) = update.alpha {
            self.alpha = alpha;
        }
        if let Some(gamma) = update.gamma {
            self.gamma = gamma;
        }
        if let Some(epsilon) = update.epsilon {
            self.epsilon = epsilon;
        }
        if let Some(training_mode) = update.training_mode {
            self.training_mode = training_mode;
        }
    }

    /// Returns a copy with `update` merged in.
    pub fn merged(mut self, update: &HyperParamsUpdate) -> Self {
        self.apply(update);
        self
    }

    /// Checks that α, γ and ε lie in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be in [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for HyperParams {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            training_mode: false,
        }
    }
}

/// A partial [`HyperParams`] change. Unset fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HyperParamsUpdate {
    pub alpha: Option<f64>,
    pub gamma: Option<f64>,
    pub epsilon: Option<f64>,
    pub training_mode: Option<bool>,
}

impl HyperParamsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    pub fn training_mode(mut self, on: bool) -> Self {
        self.training_mode = Some(on);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<HyperParams> for HyperParamsUpdate {
    /// A full update that overwrites every field.
    fn from(p: HyperParams) -> Self {
        Self {
            alpha: Some(p.alpha),
            gamma: Some(p.gamma),
            epsilon: Some(p.epsilon),
            training_mode: Some(p.training_mode),
        }
    }
}
