//! Running episode statistics.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Statistics for the current session.
///
/// `history` holds the final cumulative reward of every completed episode,
/// so `history.len() == episode - 1` between cycles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpisodeStats {
    /// 1-based number of the episode in progress.
    pub episode: u64,
    /// Steps taken in the episode in progress.
    pub step: u64,
    /// Reward accumulated in the episode in progress.
    pub cumulative_reward: f64,
    /// Episodes that ended on the goal.
    pub wins: u64,
    /// Final cumulative reward per completed episode.
    pub history: Vec<f64>,
    /// Cycles executed since the last full reset.
    pub total_steps: u64,
}

/// Summary of the reward history.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistorySummary {
    pub len: usize,
    pub min: f64,
    pub max: f64,
    pub last: f64,
    pub mean: f64,
}

impl EpisodeStats {
    pub fn new() -> Self {
        Self {
            episode: 1,
            step: 0,
            cumulative_reward: 0.0,
            wins: 0,
            history: Vec::new(),
            total_steps: 0,
        }
    }

    /// Commits one cycle's reward.
    pub(crate) fn record_step(&mut self, reward: f64, is_win: bool) {
        self.step += 1;
        self.total_steps += 1;
        self.cumulative_reward += reward;
        if is_win {
            self.wins += 1;
        }
    }

    /// Closes the episode in progress and opens the next one.
    pub(crate) fn finish_episode(&mut self) {
        self.history.push(self.cumulative_reward);
        self.episode += 1;
        self.step = 0;
        self.cumulative_reward = 0.0;
    }

    /// Back to the initial `{episode: 1, step: 0, ...}` state.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of completed episodes.
    pub fn completed_episodes(&self) -> usize {
        self.history.len()
    }

    /// Fraction of completed episodes that reached the goal.
    pub fn win_rate(&self) -> Option<f64> {
        match self.history.len() {
            0 => None,
            n => Some(self.wins as f64 / n as f64),
        }
    }

    /// Mean reward over the last `window` completed episodes.
    pub fn moving_average(&self, window: usize) -> Option<f64> {
        if window == 0 || self.history.is_empty() {
            return None;
        }
        let tail = &self.history[self.history.len().saturating_sub(window)..];
        Some(tail.iter().sum::<f64>() / tail.len() as f64)
    }

    /// Min, max, last and mean of the reward history.
    pub fn history_summary(&self) -> Option<HistorySummary> {
        let last = *self.history.last()?;
        let (min, max) = self
            .history
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                (lo.min(r), hi.max(r))
            });
        Some(HistorySummary {
            len: self.history.len(),
            min,
            max,
            last,
            mean: self.history.iter().sum::<f64>() / self.history.len() as f64,
        })
    }
}

impl Default for EpisodeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EpisodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "episode {} | step {} | reward {:.1} | wins {}",
            self.episode, self.step, self.cumulative_reward, self.wins
        )?;
        if let Some(rate) = self.win_rate() {
            write!(f, " ({:.1}%)", rate * 100.0)?;
        }
        Ok(())
    }
}
