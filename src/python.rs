use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Parameter, Phase, Session, SimulationConfig};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-facing wrapper around a solubility [`Session`].
///
/// The host toolkit owns the timer and the drawing; it calls `tick()` every ~16 ms and then
/// reads `get_positions()` / `get_phases()` and the two counts.
#[pyclass]
pub struct SolubilitySim {
    session: Session,
}

#[pymethods]
impl SolubilitySim {
    /// Create a simulation.
    ///
    /// Parameters
    /// - target_population: particles maintained in the box (int, > 0)
    /// - seed: RNG seed for reproducibility; None for nondeterministic
    /// - config_path: optional JSON config; `target_population`/`seed` override its values
    ///
    /// Errors: raises ValueError on invalid configuration.
    #[new]
    #[pyo3(signature = (target_population=None, seed=None, config_path=None))]
    fn new(
        target_population: Option<usize>,
        seed: Option<u64>,
        config_path: Option<String>,
    ) -> PyResult<Self> {
        let mut config = match config_path {
            Some(path) => SimulationConfig::from_json_file(path).map_err(py_err)?,
            None => SimulationConfig::default(),
        };
        if let Some(n) = target_population {
            config.target_population = n;
        }
        if seed.is_some() {
            config.rng_seed = seed;
        }
        let session = Session::new(config).map_err(py_err)?;
        Ok(Self { session })
    }

    /// Advance by the wall-clock time since the previous tick. Returns (gas_count, dissolved_count).
    fn tick(&mut self, py: Python<'_>) -> PyResult<(usize, usize)> {
        let report = py.detach(|| self.session.tick()).map_err(py_err)?;
        Ok((report.counts.gas, report.counts.dissolved))
    }

    /// Advance by an explicit delta time (1.0 ≈ one 60 Hz frame). Returns (gas_count, dissolved_count).
    fn step(&mut self, py: Python<'_>, delta_time: f64) -> PyResult<(usize, usize)> {
        let report = py
            .detach(|| self.session.step(delta_time))
            .map_err(py_err)?;
        Ok((report.counts.gas, report.counts.dissolved))
    }

    /// Restore default parameters and an all-gas population.
    fn reset(&mut self) {
        self.session.reset();
    }

    /// Set a control by name (temperature, pressure, solubility_constant, polarity_match).
    fn set_parameter(&mut self, name: &str, value: f64) -> PyResult<()> {
        let param: Parameter = name.parse().map_err(py_err)?;
        self.session.set_parameter(param, value).map_err(py_err)
    }

    fn get_parameter(&self, name: &str) -> PyResult<f64> {
        let param: Parameter = name.parse().map_err(py_err)?;
        Ok(self.session.parameters().get(param))
    }

    /// Return (min, max) for a named control, for building sliders.
    #[staticmethod]
    fn parameter_range(name: &str) -> PyResult<(f64, f64)> {
        let param: Parameter = name.parse().map_err(py_err)?;
        let range = param.range();
        Ok((*range.start(), *range.end()))
    }

    #[getter]
    fn temperature(&self) -> f64 {
        self.session.parameters().temperature()
    }

    #[setter]
    fn set_temperature(&mut self, value: f64) -> PyResult<()> {
        self.session
            .set_parameter(Parameter::Temperature, value)
            .map_err(py_err)
    }

    #[getter]
    fn pressure(&self) -> f64 {
        self.session.parameters().pressure()
    }

    #[setter]
    fn set_pressure(&mut self, value: f64) -> PyResult<()> {
        self.session
            .set_parameter(Parameter::Pressure, value)
            .map_err(py_err)
    }

    #[getter]
    fn solubility_constant(&self) -> f64 {
        self.session.parameters().solubility_constant()
    }

    #[setter]
    fn set_solubility_constant(&mut self, value: f64) -> PyResult<()> {
        self.session
            .set_parameter(Parameter::SolubilityConstant, value)
            .map_err(py_err)
    }

    #[getter]
    fn polarity_match(&self) -> f64 {
        self.session.parameters().polarity_match()
    }

    #[setter]
    fn set_polarity_match(&mut self, value: f64) -> PyResult<()> {
        self.session
            .set_parameter(Parameter::PolarityMatch, value)
            .map_err(py_err)
    }

    #[getter]
    fn reaction_enabled(&self) -> bool {
        self.session.parameters().reaction_enabled()
    }

    #[setter]
    fn set_reaction_enabled(&mut self, enabled: bool) {
        self.session.set_reaction_enabled(enabled);
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        let particles = self.session.simulation().particles();
        let mut arr = Array2::<f64>::zeros((particles.len(), 2));
        for (i, p) in particles.iter().enumerate() {
            arr[[i, 0]] = p.r[0];
            arr[[i, 1]] = p.r[1];
        }
        arr.into_pyarray(py)
    }

    /// Return phases as a NumPy array of shape (N,), dtype=uint8 (0 = gas, 1 = dissolved).
    fn get_phases<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<u8>> {
        self.session
            .simulation()
            .particles()
            .iter()
            .map(|p| match p.phase {
                Phase::Gas => 0u8,
                Phase::Dissolved => 1u8,
            })
            .collect::<Vec<u8>>()
            .into_pyarray(py)
    }

    #[getter]
    fn gas_count(&self) -> usize {
        self.session.counts().gas
    }

    #[getter]
    fn dissolved_count(&self) -> usize {
        self.session.counts().dissolved
    }

    #[getter]
    fn liquid_level(&self) -> f64 {
        self.session.simulation().liquid_level()
    }

    #[getter]
    fn particle_radius(&self) -> f64 {
        self.session.simulation().geometry().radius
    }

    /// (width, height) of the canvas in drawing units.
    #[getter]
    fn canvas_size(&self) -> (f64, f64) {
        let g = self.session.simulation().geometry();
        (g.width, g.height)
    }
}

/// The gassol Python module entry point.
#[pymodule]
fn gassol(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<SolubilitySim>()?;
    Ok(())
}
