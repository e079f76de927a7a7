//! Core type bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{EnvConfig, SimError};

/// Map a simulator error onto `ValueError`.
pub(crate) fn to_py_err(err: SimError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for EnvConfig.
#[pyclass(name = "EnvConfig")]
#[derive(Clone, Debug)]
pub struct PyEnvConfig(pub EnvConfig);

#[pymethods]
impl PyEnvConfig {
    /// Create a configuration.
    ///
    /// # Arguments
    /// - max_steps: Truncate episodes after this many steps (None = unlimited)
    /// - max_objects_per_cell: Observation depth
    /// - win_reward, lose_reward, step_reward: Reward shaping
    /// - seed: Seed for `sample_action`
    #[new]
    #[pyo3(signature = (
        max_steps = None,
        max_objects_per_cell = 3,
        win_reward = 1.0,
        lose_reward = -1.0,
        step_reward = 0.0,
        seed = 42
    ))]
    fn new(
        max_steps: Option<u32>,
        max_objects_per_cell: usize,
        win_reward: f32,
        lose_reward: f32,
        step_reward: f32,
        seed: u64,
    ) -> PyResult<Self> {
        let mut config = EnvConfig::new()
            .with_max_objects_per_cell(max_objects_per_cell)
            .with_rewards(win_reward, lose_reward, step_reward)
            .with_seed(seed);
        config.max_steps = max_steps;
        config.validate().map_err(to_py_err)?;
        Ok(Self(config))
    }

    #[getter]
    fn max_steps(&self) -> Option<u32> {
        self.0.max_steps
    }

    #[getter]
    fn max_objects_per_cell(&self) -> usize {
        self.0.max_objects_per_cell
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    fn __repr__(&self) -> String {
        format!(
            "EnvConfig(max_steps={:?}, max_objects_per_cell={}, rewards=({}, {}, {}), seed={})",
            self.0.max_steps,
            self.0.max_objects_per_cell,
            self.0.win_reward,
            self.0.lose_reward,
            self.0.step_reward,
            self.0.seed
        )
    }
}
