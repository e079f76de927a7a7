//! Environment configuration.
//!
//! Drivers configure an `Environment` at construction by providing an
//! `EnvConfig`: episode length, reward shaping, observation depth and the
//! seed used for random rollouts. The grid engine itself has no knobs.

use serde::{Deserialize, Serialize};

use super::error::{Result, SimError};

/// Configuration for an `Environment`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Episode is truncated after this many steps. `None` for unlimited.
    pub max_steps: Option<u32>,

    /// How many stacked instances per cell the observation tensor records.
    pub max_objects_per_cell: usize,

    /// Reward for the step that wins.
    pub win_reward: f32,

    /// Reward for the step that loses.
    pub lose_reward: f32,

    /// Reward for every other step.
    pub step_reward: f32,

    /// Seed for the environment's action sampler.
    pub seed: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            max_objects_per_cell: 3,
            win_reward: 1.0,
            lose_reward: -1.0,
            step_reward: 0.0,
            seed: 42,
        }
    }
}

impl EnvConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncate episodes after `steps` steps.
    #[must_use]
    pub fn with_max_steps(mut self, steps: u32) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Set the observation depth.
    #[must_use]
    pub fn with_max_objects_per_cell(mut self, depth: usize) -> Self {
        self.max_objects_per_cell = depth;
        self
    }

    /// Set win, lose and per-step rewards.
    #[must_use]
    pub fn with_rewards(mut self, win: f32, lose: f32, step: f32) -> Self {
        self.win_reward = win;
        self.lose_reward = lose;
        self.step_reward = step;
        self
    }

    /// Set the sampler seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations the environment cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_objects_per_cell == 0 {
            return Err(SimError::InvalidConfig(
                "max_objects_per_cell must be at least 1".into(),
            ));
        }
        if self.max_steps == Some(0) {
            return Err(SimError::InvalidConfig("max_steps must be positive".into()));
        }
        let rewards = [self.win_reward, self.lose_reward, self.step_reward];
        if rewards.iter().any(|r| !r.is_finite()) {
            return Err(SimError::InvalidConfig("rewards must be finite".into()));
        }
        Ok(())
    }
}
