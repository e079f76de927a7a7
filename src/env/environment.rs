//! Episode driver around a `Grid`.
//!
//! An `Environment` owns the registry, a level source and the live grid. It
//! turns `(won, lost)` into rewards, enforces the optional step limit and
//! rebuilds the grid from the level source on `reset`.

use std::sync::Arc;

use tracing::debug;

use crate::core::{Action, EnvConfig, GameRng, Result};
use crate::grid::{Grid, Snapshot};
use crate::levels::{fallback_level, parse_level};
use crate::objects::Registry;

use super::observation::Observation;

/// Builds a fresh, rule-ready grid for each episode.
pub type LevelSource = Box<dyn Fn(&Arc<Registry>) -> Grid + Send + Sync>;

/// Result of one `Environment::step`.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub reward: f32,
    /// `won || lost || truncated`.
    pub done: bool,
    pub won: bool,
    pub lost: bool,
    pub steps: u32,
    /// The step limit was reached.
    pub truncated: bool,
    /// Active rules after the step, e.g. `"BABA IS YOU"`.
    pub rules: Vec<String>,
}

/// Reset/step loop over a level.
///
/// ## Example
///
/// ```
/// use baba_sim::core::{Action, EnvConfig};
/// use baba_sim::env::Environment;
///
/// let mut env = Environment::from_ascii(EnvConfig::new(), "biy\nB.F\nfin").unwrap();
/// let outcome = env.step(Action::Right);
/// assert!(!outcome.done);
///
/// let outcome = env.step(Action::Right);
/// assert!(outcome.won);
/// assert_eq!(outcome.reward, 1.0);
/// ```
pub struct Environment {
    config: EnvConfig,
    registry: Arc<Registry>,
    level: LevelSource,
    grid: Grid,
    episode_return: f32,
}

impl Environment {
    /// Create an environment over the default catalog.
    pub fn new(config: EnvConfig, level: LevelSource) -> Result<Self> {
        Self::with_registry(config, Arc::new(Registry::with_defaults()), level)
    }

    /// Create an environment over a custom registry.
    pub fn with_registry(
        config: EnvConfig,
        registry: Arc<Registry>,
        level: LevelSource,
    ) -> Result<Self> {
        config.validate()?;
        let grid = level(&registry);
        Ok(Self {
            config,
            registry,
            level,
            grid,
            episode_return: 0.0,
        })
    }

    /// Environment over a text level.
    pub fn from_ascii(config: EnvConfig, source: &str) -> Result<Self> {
        let registry = Arc::new(Registry::with_defaults());
        let initial = parse_level(source, Arc::clone(&registry))?;
        Self::with_registry(config, registry, Box::new(move |_: &Arc<Registry>| initial.copy()))
    }

    /// Environment over the built-in fallback puzzle.
    pub fn fallback(config: EnvConfig) -> Result<Self> {
        Self::new(config, Box::new(|registry: &Arc<Registry>| fallback_level(Arc::clone(registry))))
    }

    /// Start a new episode from the level source.
    pub fn reset(&mut self) -> &Grid {
        self.grid = (self.level)(&self.registry);
        self.episode_return = 0.0;
        debug!(
            width = self.grid.width(),
            height = self.grid.height(),
            objects = self.grid.object_count(),
            "Episode reset"
        );
        &self.grid
    }

    /// Advance one turn.
    ///
    /// Terminal flags are sticky, so stepping a finished episode keeps
    /// reporting the terminal reward.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        let (won, lost) = self.grid.step(action);
        let steps = self.grid.steps();
        let truncated = self.config.max_steps.is_some_and(|max| steps >= max);

        let reward = if won {
            self.config.win_reward
        } else if lost {
            self.config.lose_reward
        } else {
            self.config.step_reward
        };
        self.episode_return += reward;

        let done = won || lost || truncated;
        if done {
            debug!(
                steps,
                won,
                lost,
                truncated,
                episode_return = self.episode_return,
                "Episode done"
            );
        }

        StepOutcome {
            reward,
            done,
            won,
            lost,
            steps,
            truncated,
            rules: self
                .grid
                .rule_manager()
                .rules()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Step with a textual action; unrecognized words wait.
    pub fn step_str(&mut self, action: &str) -> StepOutcome {
        self.step(Action::parse(action))
    }

    /// Save the current grid.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.grid.snapshot()
    }

    /// Replace the current grid with a saved one. The episode return is kept.
    ///
    /// On error the current grid is left untouched.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.grid = Grid::from_snapshot(snapshot, Arc::clone(&self.registry))?;
        Ok(())
    }

    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation::encode(&self.grid, self.config.max_objects_per_cell)
    }

    /// Every action is always legal; blocked moves are waits.
    #[must_use]
    pub fn valid_actions(&self) -> &'static [Action] {
        &Action::ALL
    }

    /// Uniformly random action.
    pub fn sample_action(&self, rng: &mut GameRng) -> Action {
        rng.choose(self.valid_actions()).copied().unwrap_or_default()
    }

    /// Sampler seeded from the configuration.
    #[must_use]
    pub fn make_rng(&self) -> GameRng {
        GameRng::new(self.config.seed)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Sum of rewards since the last reset.
    #[must_use]
    pub fn episode_return(&self) -> f32 {
        self.episode_return
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("config", &self.config)
            .field("grid", &self.grid)
            .field("episode_return", &self.episode_return)
            .finish_non_exhaustive()
    }
}
