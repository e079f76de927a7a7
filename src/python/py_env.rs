//! Environment bindings for Python.

use numpy::{PyArray1, PyArray3, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Action, GameRng};
use crate::env::{Environment, StepOutcome};
use crate::grid::Snapshot;
use crate::levels::export_level;

use super::py_core::{to_py_err, PyEnvConfig};

/// Python wrapper for StepOutcome.
#[pyclass(name = "StepOutcome")]
#[derive(Clone, Debug)]
pub struct PyStepOutcome(pub StepOutcome);

#[pymethods]
impl PyStepOutcome {
    #[getter]
    fn reward(&self) -> f32 {
        self.0.reward
    }

    #[getter]
    fn done(&self) -> bool {
        self.0.done
    }

    #[getter]
    fn won(&self) -> bool {
        self.0.won
    }

    #[getter]
    fn lost(&self) -> bool {
        self.0.lost
    }

    #[getter]
    fn steps(&self) -> u32 {
        self.0.steps
    }

    #[getter]
    fn truncated(&self) -> bool {
        self.0.truncated
    }

    #[getter]
    fn rules(&self) -> Vec<String> {
        self.0.rules.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "StepOutcome(reward={}, done={}, won={}, lost={}, steps={})",
            self.0.reward, self.0.done, self.0.won, self.0.lost, self.0.steps
        )
    }
}

/// Python wrapper for Environment.
///
/// Plays a text level, or the built-in fallback puzzle when no level is
/// given. Observations are `int32` arrays of shape
/// `(height, width, max_objects_per_cell)`.
#[pyclass(name = "Environment")]
pub struct PyEnvironment {
    inner: Environment,
    rng: GameRng,
}

impl PyEnvironment {
    fn observation_array<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray3<i32>>> {
        let observation = self.inner.observation();
        PyArray1::from_vec_bound(py, observation.tensor)
            .reshape(observation.shape)
            .map_err(|e| PyErr::new::<PyValueError, _>(format!("{}", e)))
    }
}

#[pymethods]
impl PyEnvironment {
    /// Create an environment.
    ///
    /// # Arguments
    /// - level: Text level, one character per square (None = fallback puzzle)
    /// - config: Environment configuration (None = defaults)
    #[new]
    #[pyo3(signature = (level = None, config = None))]
    fn new(level: Option<&str>, config: Option<PyEnvConfig>) -> PyResult<Self> {
        let config = config.map(|c| c.0).unwrap_or_default();
        let inner = match level {
            Some(source) => Environment::from_ascii(config, source),
            None => Environment::fallback(config),
        }
        .map_err(to_py_err)?;
        let rng = inner.make_rng();
        Ok(Self { inner, rng })
    }

    /// Start a new episode and return the first observation.
    fn reset<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyArray3<i32>>> {
        self.inner.reset();
        self.observation_array(py)
    }

    /// Take an action (`"up"`, `"down"`, `"left"`, `"right"`, `"wait"`).
    ///
    /// Returns `(observation, reward, done, outcome)`.
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: &str,
    ) -> PyResult<(Bound<'py, PyArray3<i32>>, f32, bool, PyStepOutcome)> {
        let outcome = self.inner.step_str(action);
        let observation = self.observation_array(py)?;
        Ok((observation, outcome.reward, outcome.done, PyStepOutcome(outcome)))
    }

    /// Current observation.
    fn observation<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray3<i32>>> {
        self.observation_array(py)
    }

    fn valid_actions(&self) -> Vec<&'static str> {
        self.inner.valid_actions().iter().map(|a| a.name()).collect()
    }

    /// Random action from the environment's own seeded sampler.
    fn sample_action(&mut self) -> &'static str {
        self.inner.sample_action(&mut self.rng).name()
    }

    /// Active rules, e.g. `["BABA IS YOU"]`.
    fn rules(&self) -> Vec<String> {
        self.inner
            .grid()
            .rule_manager()
            .rules()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// One glyph per square using the catalog glyphs.
    fn render_text(&self) -> String {
        self.inner.grid().render_text()
    }

    /// The current board in the level text format.
    fn export_level(&self) -> String {
        export_level(self.inner.grid())
    }

    /// Serialize the current grid.
    fn save_state(&self) -> PyResult<Vec<u8>> {
        self.inner.snapshot().to_bytes().map_err(to_py_err)
    }

    /// Restore a grid saved by `save_state`.
    fn load_state(&mut self, state: Vec<u8>) -> PyResult<()> {
        let snapshot = Snapshot::from_bytes(&state).map_err(to_py_err)?;
        self.inner.restore(&snapshot).map_err(to_py_err)
    }

    #[getter]
    fn width(&self) -> usize {
        self.inner.grid().width()
    }

    #[getter]
    fn height(&self) -> usize {
        self.inner.grid().height()
    }

    #[getter]
    fn steps(&self) -> u32 {
        self.inner.grid().steps()
    }

    #[getter]
    fn won(&self) -> bool {
        self.inner.grid().won()
    }

    #[getter]
    fn lost(&self) -> bool {
        self.inner.grid().lost()
    }

    fn __repr__(&self) -> String {
        let grid = self.inner.grid();
        format!(
            "Environment({}x{}, steps={}, won={}, lost={})",
            grid.width(),
            grid.height(),
            grid.steps(),
            grid.won(),
            grid.lost()
        )
    }
}

/// Parse an action word the way `Environment.step` does.
#[pyfunction]
pub fn parse_action(word: &str) -> &'static str {
    Action::parse(word).name()
}
