use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static configuration for a solubility simulation.
///
/// Defaults reproduce the reference layout: an 800×500 canvas whose bottom half is liquid,
/// 500 particles of radius 3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Canvas width in drawing units.
    pub canvas_width: f64,
    /// Canvas height in drawing units (y grows downward).
    pub canvas_height: f64,
    /// Fraction of the canvas height occupied by liquid, measured from the bottom.
    pub liquid_height_ratio: f64,
    /// Total particle count maintained after reaction removals.
    pub target_population: usize,
    /// Radius shared by every particle.
    pub particle_radius: f64,
    /// Update rate that one unit of `delta_time` corresponds to.
    pub reference_rate_hz: f64,
    /// Optional upper bound on a single tick's `delta_time`. `None` applies the scaled
    /// elapsed time as is.
    pub max_delta_time: Option<f64>,
    /// Scale factor shared by the dissolve and escape probabilities.
    pub interface_rate: f64,
    /// Removal probability per unit of `delta_time` for dissolved particles while reacting.
    pub reaction_rate: f64,
    /// Optional RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 500.0,
            liquid_height_ratio: 0.5,
            target_population: 500,
            particle_radius: 3.0,
            reference_rate_hz: 60.0,
            max_delta_time: None,
            interface_rate: 0.02,
            reaction_rate: 0.005,
            rng_seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file and validate it.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field and the derived region sizes.
    ///
    /// Errors: `Error::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("particle_radius", self.particle_radius),
            ("reference_rate_hz", self.reference_rate_hz),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if let Some(cap) = self.max_delta_time {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(Error::InvalidConfig(
                    "max_delta_time must be finite and > 0 when set".into(),
                ));
            }
        }
        for (name, value) in [
            ("interface_rate", self.interface_rate),
            ("reaction_rate", self.reaction_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !(self.liquid_height_ratio > 0.0 && self.liquid_height_ratio < 1.0) {
            return Err(Error::InvalidConfig(
                "liquid_height_ratio must lie strictly between 0 and 1".into(),
            ));
        }
        if self.target_population == 0 {
            return Err(Error::InvalidConfig("target_population must be > 0".into()));
        }

        let diameter = 2.0 * self.particle_radius;
        if self.canvas_width < diameter {
            return Err(Error::InvalidConfig(
                "canvas_width must fit at least one particle diameter".into(),
            ));
        }
        let geometry = self.geometry();
        if geometry.liquid_level < diameter {
            return Err(Error::InvalidConfig(
                "headspace above the liquid must fit at least one particle diameter".into(),
            ));
        }
        if self.canvas_height - geometry.liquid_level < diameter {
            return Err(Error::InvalidConfig(
                "liquid region must fit at least one particle diameter".into(),
            ));
        }
        Ok(())
    }

    /// Canvas bounds and liquid level derived from this configuration.
    pub fn geometry(&self) -> Geometry {
        Geometry {
            width: self.canvas_width,
            height: self.canvas_height,
            liquid_level: self.canvas_height * (1.0 - self.liquid_height_ratio),
            radius: self.particle_radius,
        }
    }

    /// Returns the configured RNG, seeding from entropy when no seed is set.
    pub(crate) fn seeded_rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rng().random()),
        }
    }
}

/// Fixed layout consumed by spawn and boundary logic.
///
/// Passed by value into particle operations; nothing reads canvas dimensions from shared state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    /// y coordinate of the gas/liquid interface. Gas lives above it (smaller y).
    pub liquid_level: f64,
    pub radius: f64,
}
