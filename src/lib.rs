//! gassol: a stochastic 2D model of gas dissolving into, and escaping from, a liquid.
//!
//! Gas particles drift in a headspace above a liquid. When one touches the surface it may
//! dissolve; a dissolved particle touching the surface from below may escape. Both chances depend
//! on temperature, pressure, a Henry's-law style solubility constant and a polarity match. An
//! optional reaction consumes dissolved particles, and fresh gas keeps the population at its target.
//!
//! ```no_run
//! use gassol::core::{Parameter, Session, SimulationConfig};
//!
//! # fn main() -> gassol::error::Result<()> {
//! let mut session = Session::new(SimulationConfig::default())?;
//! session.set_parameter(Parameter::Pressure, 1.8)?;
//! let report = session.step(1.0)?;
//! println!("gas={} dissolved={}", report.counts.gas, report.counts.dissolved);
//! # Ok(())
//! # }
//! ```
//!
//! With the `python` feature the crate also builds a `gassol` extension module exposing
//! `SolubilitySim` for a Python front end to drive and draw.

pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;
