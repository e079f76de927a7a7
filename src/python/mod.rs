//! Python bindings for the baba-sim rule-driven grid simulator.
//!
//! This module provides PyO3 bindings for driving episodes from Python.
//!
//! # Quick Start
//!
//! ```python
//! import baba_sim
//!
//! env = baba_sim.Environment("biy\nB.F\nfin")
//! obs = env.reset()
//!
//! obs, reward, done, outcome = env.step("right")
//! print(outcome.rules)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_env;

pub use py_core::*;
pub use py_env::*;

/// baba-sim: rule-driven grid puzzles for agents.
///
/// This module provides:
/// - `Environment`: reset/step loop with numpy observations
/// - `EnvConfig`: episode length, rewards and observation depth
/// - `StepOutcome`: per-step result with the active rules
#[pymodule]
fn baba_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEnvConfig>()?;
    m.add_class::<PyEnvironment>()?;
    m.add_class::<PyStepOutcome>()?;
    m.add_function(wrap_pyfunction!(parse_action, m)?)?;
    Ok(())
}
