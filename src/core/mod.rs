//! Simulation core: particles, the parameter store, transition kinetics, and the tick engine.
//!
//! Nothing in here knows about windows, widgets, or drawing. A presentation layer owns a
//! [`Session`], calls one of its tick methods on a timer, and reads back a [`Snapshot`].

pub mod config;
pub mod event;
pub mod kinetics;
pub mod params;
pub mod particle;
pub mod session;
pub mod sim;

pub use config::{Geometry, SimulationConfig};
pub use event::{EventKind, PhaseCounts, TickReport};
pub use params::{Parameter, Parameters};
pub use particle::{Particle, Phase};
pub use session::Session;
pub use sim::{ParticleView, Simulation, Snapshot};
