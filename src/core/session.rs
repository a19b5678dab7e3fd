use crate::core::config::SimulationConfig;
use crate::core::event::{PhaseCounts, TickReport};
use crate::core::params::{Parameter, Parameters};
use crate::core::sim::{Simulation, Snapshot};
use crate::error::Result;
use std::time::Instant;
use tracing::{info, warn};

/// A simulation paired with the parameter store its controls write to.
///
/// This is the surface a presentation layer drives: validated parameter writes, the reset
/// command, one tick per timer callback, and read-only queries for drawing.
#[derive(Debug)]
pub struct Session {
    sim: Simulation,
    params: Parameters,
}

impl Session {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_parameters(config, Parameters::default())
    }

    /// Start from a non-default parameter set (validated).
    pub fn with_parameters(config: SimulationConfig, params: Parameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            sim: Simulation::new(config)?,
            params,
        })
    }

    /// Restore default parameters and an all-gas population at the target size.
    pub fn reset(&mut self) {
        self.params.reset();
        self.sim.reset();
        info!("session reset to defaults");
    }

    /// One wall-clock tick.
    pub fn tick(&mut self) -> Result<TickReport> {
        self.sim.update(&self.params)
    }

    /// One tick at an explicit instant.
    pub fn tick_at(&mut self, now: Instant) -> Result<TickReport> {
        self.sim.update_at(now, &self.params)
    }

    /// One tick with an explicit `delta_time`, independent of the wall clock.
    pub fn step(&mut self, delta_time: f64) -> Result<TickReport> {
        self.sim.step(delta_time, &self.params)
    }

    /// Write one control. Out-of-range writes are rejected and leave the store unchanged.
    pub fn set_parameter(&mut self, param: Parameter, value: f64) -> Result<()> {
        self.params.set(param, value).inspect_err(|err| {
            warn!(parameter = %param, value, %err, "rejected parameter write");
        })
    }

    pub fn set_reaction_enabled(&mut self, enabled: bool) {
        self.params.set_reaction_enabled(enabled);
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn counts(&self) -> PhaseCounts {
        self.sim.counts()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sim.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particle::Phase;

    fn config() -> SimulationConfig {
        SimulationConfig {
            target_population: 80,
            rng_seed: Some(99),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn rejected_write_keeps_previous_value() -> Result<()> {
        let mut s = Session::new(config())?;
        s.set_parameter(Parameter::Pressure, 1.7)?;
        assert!(s.set_parameter(Parameter::Pressure, 0.0).is_err());
        assert_eq!(s.parameters().pressure(), 1.7);
        Ok(())
    }

    #[test]
    fn reset_restores_parameters_and_population() -> Result<()> {
        let mut s = Session::new(config())?;
        s.set_parameter(Parameter::Temperature, 0.2)?;
        s.set_parameter(Parameter::PolarityMatch, 1.0)?;
        s.set_reaction_enabled(true);
        for p in s.simulation_mut().particles_mut().iter_mut().take(30) {
            p.phase = Phase::Dissolved;
        }
        s.step(1.0)?;

        s.reset();
        assert_eq!(*s.parameters(), Parameters::default());
        assert_eq!(s.counts(), PhaseCounts { gas: 80, dissolved: 0 });
        Ok(())
    }

    #[test]
    fn invalid_initial_parameters_rejected() {
        let bad: Parameters = serde_json::from_str(
            r#"{"temperature":1.0,"pressure":1.0,"solubility_constant":0.0,"polarity_match":0.5,"reaction_enabled":false}"#,
        )
        .expect("well-formed json");
        assert!(Session::with_parameters(config(), bad).is_err());
    }
}
