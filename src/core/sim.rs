use crate::core::config::{Geometry, SimulationConfig};
use crate::core::event::{EventKind, PhaseCounts, TickReport};
use crate::core::kinetics::{dissolve_probability, escape_probability, reaction_probability, sample};
use crate::core::params::Parameters;
use crate::core::particle::{Particle, Phase};
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Gas/liquid solubility engine.
///
/// Owns the particle population and the liquid geometry. Parameters are supplied by the caller on
/// every tick and never stored here.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    geometry: Geometry,
    particles: Vec<Particle>,
    rng: StdRng,
    next_id: u64,
    tick: u64,
    last_tick: Instant,
}

impl Simulation {
    /// Create a simulation with `target_population` gas particles spread over the headspace.
    ///
    /// Errors: `Error::InvalidConfig` if the configuration cannot host a particle in either region.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let geometry = config.geometry();
        let rng = config.seeded_rng();
        let mut sim = Self {
            particles: Vec::with_capacity(config.target_population),
            config,
            geometry,
            rng,
            next_id: 0,
            tick: 0,
            last_tick: Instant::now(),
        };
        sim.populate();
        info!(
            particles = sim.particles.len(),
            liquid_level = sim.geometry.liquid_level,
            seed = ?sim.config.rng_seed,
            "solubility simulation initialised"
        );
        Ok(sim)
    }

    /// Replace the population with `target_population` fresh gas particles.
    ///
    /// The RNG stream continues; resetting does not reseed. The wall-clock anchor moves to now,
    /// so the next `update` only sees time elapsed after the reset.
    pub fn reset(&mut self) {
        self.populate();
        self.tick = 0;
        self.last_tick = Instant::now();
        info!(particles = self.particles.len(), "population reset");
    }

    /// Advance using the wall-clock time elapsed since the previous tick.
    pub fn update(&mut self, params: &Parameters) -> Result<TickReport> {
        self.update_at(Instant::now(), params)
    }

    /// Advance using the time elapsed between the previous tick and `now`.
    ///
    /// Elapsed seconds are scaled by `reference_rate_hz`, so a 16 ms gap at 60 Hz is
    /// roughly one unit of `delta_time`. An instant earlier than the previous tick counts as zero.
    pub fn update_at(&mut self, now: Instant, params: &Parameters) -> Result<TickReport> {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.step(elapsed.as_secs_f64() * self.config.reference_rate_hz, params)
    }

    /// Run one tick with an explicit `delta_time` (in reference-rate units).
    ///
    /// Per particle: integrate, test the interface transition for its phase, then test reaction
    /// removal. Removed particles are compacted out once the pass ends and fresh gas particles top
    /// the population back up to the target.
    ///
    /// Errors: `Error::InvalidParam` if `delta_time` is negative or non-finite, or if `params`
    /// holds an out-of-range value.
    pub fn step(&mut self, delta_time: f64, params: &Parameters) -> Result<TickReport> {
        if !delta_time.is_finite() || delta_time < 0.0 {
            return Err(Error::InvalidParam(format!(
                "delta_time must be finite and >= 0, got {delta_time}"
            )));
        }
        params.validate()?;

        let dt = match self.config.max_delta_time {
            Some(cap) if delta_time > cap => {
                warn!(requested = delta_time, applied = cap, "tick delta clamped");
                cap
            }
            _ => delta_time,
        };

        let Self {
            config,
            geometry,
            particles,
            rng,
            next_id,
            tick,
            ..
        } = self;
        let geometry = *geometry;
        let liquid_level = geometry.liquid_level;
        let temperature = params.temperature();
        let reacting = params.reaction_enabled();
        let p_dissolve = dissolve_probability(params, config.interface_rate);
        let p_escape = escape_probability(params, config.interface_rate);
        let p_react = reaction_probability(config.reaction_rate, dt);

        *tick += 1;
        let mut report = TickReport::new(*tick, dt);

        particles.retain_mut(|p| {
            p.integrate(dt, temperature, geometry);

            let phase = p.phase;
            match phase {
                Phase::Gas if p.touches_surface_from_above(liquid_level) => {
                    if sample(rng, p_dissolve) {
                        p.transition(Phase::Dissolved, geometry, rng);
                        report.record(EventKind::Dissolved);
                    }
                }
                Phase::Dissolved if p.touches_surface_from_below(liquid_level) => {
                    if sample(rng, p_escape) {
                        p.transition(Phase::Gas, geometry, rng);
                        report.record(EventKind::Escaped);
                    }
                }
                _ => {}
            }

            if reacting && p.phase == Phase::Dissolved && sample(rng, p_react) {
                report.record(EventKind::Reacted);
                return false;
            }
            true
        });

        while particles.len() < config.target_population {
            particles.push(Particle::spawn_new(*next_id, Phase::Gas, geometry, rng));
            *next_id += 1;
            report.record(EventKind::Replenished);
        }

        report.counts = self.counts();
        debug!(
            tick = report.tick,
            dt = report.delta_time,
            dissolved = report.dissolved,
            escaped = report.escaped,
            reacted = report.reacted,
            replenished = report.replenished,
            gas = report.counts.gas,
            in_liquid = report.counts.dissolved,
            "tick complete"
        );
        Ok(report)
    }

    // ============ Queries ============

    /// Current particles in iteration order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to particle state. The population size cannot be changed through it.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Number of particles currently alive.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Gas and dissolved tallies for the current population.
    pub fn counts(&self) -> PhaseCounts {
        PhaseCounts::tally(self.particles.iter().map(|p| &p.phase))
    }

    /// Number of particles in the gas phase.
    pub fn gas_count(&self) -> usize {
        self.counts().gas
    }

    /// Number of particles dissolved in the liquid.
    pub fn dissolved_count(&self) -> usize {
        self.counts().dissolved
    }

    /// Canvas bounds, liquid level and particle radius.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// y coordinate of the gas/liquid interface.
    pub fn liquid_level(&self) -> f64 {
        self.geometry.liquid_level
    }

    /// Configuration this simulation was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Ticks completed since construction or the last reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Owned copy of the completed tick, safe to hand to a renderer on another thread.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    id: p.id,
                    x: p.r[0],
                    y: p.r[1],
                    phase: p.phase,
                })
                .collect(),
            counts: self.counts(),
        }
    }

    // ============ Internal helpers ============

    fn populate(&mut self) {
        self.particles.clear();
        for _ in 0..self.config.target_population {
            self.particles.push(Particle::spawn_new(
                self.next_id,
                Phase::Gas,
                self.geometry,
                &mut self.rng,
            ));
            self.next_id += 1;
        }
    }
}

/// What a renderer needs to draw one particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub phase: Phase,
}

/// Read-only view of a completed tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub particles: Vec<ParticleView>,
    pub counts: PhaseCounts,
}
