use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// The four numeric controls exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Temperature,
    Pressure,
    /// Henry's-law analog; lower means more soluble.
    SolubilityConstant,
    /// How well solute and solvent polarity agree; higher means a better match.
    PolarityMatch,
}

impl Parameter {
    pub const ALL: [Parameter; 4] = [
        Parameter::Temperature,
        Parameter::Pressure,
        Parameter::SolubilityConstant,
        Parameter::PolarityMatch,
    ];

    /// Inclusive range a control may take.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Parameter::Temperature | Parameter::Pressure | Parameter::SolubilityConstant => {
                0.1..=2.0
            }
            Parameter::PolarityMatch => 0.1..=1.0,
        }
    }

    /// Value the control takes after a reset.
    pub fn default_value(self) -> f64 {
        match self {
            Parameter::PolarityMatch => 0.5,
            _ => 1.0,
        }
    }

    /// Snake-case name used in errors and by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Parameter::Temperature => "temperature",
            Parameter::Pressure => "pressure",
            Parameter::SolubilityConstant => "solubility_constant",
            Parameter::PolarityMatch => "polarity_match",
        }
    }

    /// Check a candidate value against this control's range.
    pub fn check(self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(Error::InvalidParam(format!(
                "{} must be finite, got {value}",
                self.name()
            )));
        }
        let range = self.range();
        if !range.contains(&value) {
            return Err(Error::OutOfRange {
                name: self.name(),
                value,
                min: *range.start(),
                max: *range.end(),
            });
        }
        Ok(value)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temperature" | "temp" | "t" => Ok(Parameter::Temperature),
            "pressure" | "p" => Ok(Parameter::Pressure),
            "solubility_constant" | "kh" | "kh_value" => Ok(Parameter::SolubilityConstant),
            "polarity_match" | "polarity" => Ok(Parameter::PolarityMatch),
            other => Err(Error::UnknownParameter(other.to_string())),
        }
    }
}

/// Current control values read by the engine each tick.
///
/// Fields are private so every write goes through range validation; a rejected write leaves the
/// store unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    temperature: f64,
    pressure: f64,
    solubility_constant: f64,
    polarity_match: f64,
    reaction_enabled: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            temperature: Parameter::Temperature.default_value(),
            pressure: Parameter::Pressure.default_value(),
            solubility_constant: Parameter::SolubilityConstant.default_value(),
            polarity_match: Parameter::PolarityMatch.default_value(),
            reaction_enabled: false,
        }
    }
}

impl Parameters {
    /// Build a validated parameter set.
    pub fn new(
        temperature: f64,
        pressure: f64,
        solubility_constant: f64,
        polarity_match: f64,
        reaction_enabled: bool,
    ) -> Result<Self> {
        let params = Self {
            temperature,
            pressure,
            solubility_constant,
            polarity_match,
            reaction_enabled,
        };
        params.validate()?;
        Ok(params)
    }

    /// Re-check every range; used after deserialising an untrusted store.
    pub fn validate(&self) -> Result<()> {
        for p in Parameter::ALL {
            p.check(self.get(p))?;
        }
        Ok(())
    }

    /// Current temperature.
    #[inline]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Current pressure.
    #[inline]
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Current Henry's-law style constant.
    #[inline]
    pub fn solubility_constant(&self) -> f64 {
        self.solubility_constant
    }

    /// Current polarity match.
    #[inline]
    pub fn polarity_match(&self) -> f64 {
        self.polarity_match
    }

    /// Whether the reaction consumes dissolved particles.
    #[inline]
    pub fn reaction_enabled(&self) -> bool {
        self.reaction_enabled
    }

    /// Read one control.
    pub fn get(&self, param: Parameter) -> f64 {
        match param {
            Parameter::Temperature => self.temperature,
            Parameter::Pressure => self.pressure,
            Parameter::SolubilityConstant => self.solubility_constant,
            Parameter::PolarityMatch => self.polarity_match,
        }
    }

    /// Write one control after range validation.
    pub fn set(&mut self, param: Parameter, value: f64) -> Result<()> {
        let value = param.check(value)?;
        let slot = match param {
            Parameter::Temperature => &mut self.temperature,
            Parameter::Pressure => &mut self.pressure,
            Parameter::SolubilityConstant => &mut self.solubility_constant,
            Parameter::PolarityMatch => &mut self.polarity_match,
        };
        *slot = value;
        Ok(())
    }

    /// Set temperature, rejecting values outside [0.1, 2.0].
    pub fn set_temperature(&mut self, value: f64) -> Result<()> {
        self.set(Parameter::Temperature, value)
    }

    /// Set pressure, rejecting values outside [0.1, 2.0].
    pub fn set_pressure(&mut self, value: f64) -> Result<()> {
        self.set(Parameter::Pressure, value)
    }

    /// Set the solubility constant, rejecting values outside [0.1, 2.0].
    pub fn set_solubility_constant(&mut self, value: f64) -> Result<()> {
        self.set(Parameter::SolubilityConstant, value)
    }

    /// Set polarity match, rejecting values outside [0.1, 1.0].
    pub fn set_polarity_match(&mut self, value: f64) -> Result<()> {
        self.set(Parameter::PolarityMatch, value)
    }

    /// Toggle the reaction.
    pub fn set_reaction_enabled(&mut self, enabled: bool) {
        self.reaction_enabled = enabled;
    }

    /// Restore every control to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
