use crate::core::config::Geometry;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Lowest spawn speed; the actual speed is drawn from `[MIN_SPEED, MIN_SPEED + SPEED_SPREAD)`.
pub const MIN_SPEED: f64 = 1.5;
/// Width of the spawn speed interval.
pub const SPEED_SPREAD: f64 = 0.5;

/// Which side of the interface a particle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Free gas in the headspace above the liquid.
    Gas,
    /// Dissolved in the liquid below the interface.
    Dissolved,
}

/// A single 2D particle.
///
/// Fields:
/// - `id`: stable identifier assigned by the engine
/// - `r`: position [x, y], y grows downward
/// - `v`: velocity [vx, vy] in units per unit of `delta_time`
/// - `radius`: drawing and wall-contact extent
/// - `phase`: region the particle belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Stable particle identifier.
    pub id: u64,
    /// Position (x, y).
    pub r: [f64; 2],
    /// Velocity (vx, vy).
    pub v: [f64; 2],
    /// Radius (> 0).
    pub radius: f64,
    /// Current phase.
    pub phase: Phase,
}

impl Particle {
    /// Create a particle spawned uniformly inside `phase`'s region of `geometry`.
    pub fn spawn_new<R: Rng + ?Sized>(
        id: u64,
        phase: Phase,
        geometry: Geometry,
        rng: &mut R,
    ) -> Self {
        let mut p = Self {
            id,
            r: [0.0; 2],
            v: [0.0; 2],
            radius: geometry.radius,
            phase,
        };
        p.spawn(geometry, rng);
        p
    }

    /// Re-initialise position and velocity inside the region of the current phase.
    ///
    /// Gas: x ∈ [r, W−r], y ∈ [r, L−r]. Dissolved: x ∈ [r, W−r], y ∈ [L+r, H−r].
    /// Speed is drawn from [1.5, 2.0) with a uniform heading.
    pub fn spawn<R: Rng + ?Sized>(&mut self, geometry: Geometry, rng: &mut R) {
        let r = self.radius;
        let (y_lo, y_hi) = match self.phase {
            Phase::Gas => (r, geometry.liquid_level - r),
            Phase::Dissolved => (geometry.liquid_level + r, geometry.height - r),
        };
        self.r = [
            rng.random_range(r..=geometry.width - r),
            rng.random_range(y_lo..=y_hi),
        ];

        let angle = rng.random_range(0.0..TAU);
        let speed = MIN_SPEED + rng.random_range(0.0..SPEED_SPREAD);
        self.v = [speed * angle.cos(), speed * angle.sin()];
    }

    /// Advance one step and reflect off the hard walls of the current phase.
    ///
    /// Motion is scaled by `temperature * 0.5 + 0.5`. The liquid surface is not a wall for either
    /// phase; crossing it is resolved by the engine's transition checks.
    pub fn integrate(&mut self, delta_time: f64, temperature: f64, geometry: Geometry) {
        let temp_factor = temperature * 0.5 + 0.5;
        self.r[0] += self.v[0] * temp_factor * delta_time;
        self.r[1] += self.v[1] * temp_factor * delta_time;
        self.reflect(geometry);
    }

    /// Mirror any wall overshoot back inside and negate the matching velocity component.
    pub fn reflect(&mut self, geometry: Geometry) {
        let lo = self.radius;
        let hi_x = geometry.width - self.radius;
        let hi_y = geometry.height - self.radius;

        if self.r[0] < lo {
            self.r[0] = lo + (lo - self.r[0]);
            self.v[0] = -self.v[0];
        } else if self.r[0] > hi_x {
            self.r[0] = hi_x - (self.r[0] - hi_x);
            self.v[0] = -self.v[0];
        }

        match self.phase {
            Phase::Gas => {
                if self.r[1] < lo {
                    self.r[1] = lo + (lo - self.r[1]);
                    self.v[1] = -self.v[1];
                }
            }
            Phase::Dissolved => {
                if self.r[1] > hi_y {
                    self.r[1] = hi_y - (self.r[1] - hi_y);
                    self.v[1] = -self.v[1];
                }
            }
        }
    }

    /// Lower edge of a gas particle has reached the liquid surface.
    #[inline]
    pub fn touches_surface_from_above(&self, liquid_level: f64) -> bool {
        self.r[1] + self.radius >= liquid_level
    }

    /// Upper edge of a dissolved particle has reached the liquid surface.
    #[inline]
    pub fn touches_surface_from_below(&self, liquid_level: f64) -> bool {
        self.r[1] - self.radius <= liquid_level
    }

    /// Switch phase in place and respawn inside the new region so the particle
    /// does not linger at the interface.
    pub fn transition<R: Rng + ?Sized>(&mut self, to: Phase, geometry: Geometry, rng: &mut R) {
        self.phase = to;
        self.spawn(geometry, rng);
    }

    /// Magnitude of the velocity.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.v[0].hypot(self.v[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn geometry() -> Geometry {
        Geometry {
            width: 800.0,
            height: 500.0,
            liquid_level: 250.0,
            radius: 3.0,
        }
    }

    fn at(phase: Phase, r: [f64; 2], v: [f64; 2]) -> Particle {
        Particle {
            id: 0,
            r,
            v,
            radius: 3.0,
            phase,
        }
    }

    #[test]
    fn spawn_stays_in_phase_region() {
        let g = geometry();
        let mut rng = StdRng::seed_from_u64(11);
        for i in 0..2_000 {
            let gas = Particle::spawn_new(i, Phase::Gas, g, &mut rng);
            assert!(gas.r[0] >= 3.0 && gas.r[0] <= 797.0);
            assert!(gas.r[1] >= 3.0 && gas.r[1] <= 247.0);

            let dis = Particle::spawn_new(i, Phase::Dissolved, g, &mut rng);
            assert!(dis.r[0] >= 3.0 && dis.r[0] <= 797.0);
            assert!(dis.r[1] >= 253.0 && dis.r[1] <= 497.0);

            for p in [&gas, &dis] {
                let s = p.speed();
                assert!(s >= MIN_SPEED - 1e-12 && s < MIN_SPEED + SPEED_SPREAD + 1e-12);
            }
        }
    }

    #[test]
    fn left_wall_mirrors_overshoot() {
        // x = -2 is 5 units past the contact line at x = r = 3.
        let mut p = at(Phase::Gas, [-2.0, 100.0], [-1.0, 0.0]);
        p.integrate(0.0, 1.0, geometry());
        assert_eq!(p.r[0], 8.0);
        assert_eq!(p.v[0], 1.0);
    }

    #[test]
    fn right_wall_mirrors_overshoot() {
        let mut p = at(Phase::Dissolved, [799.0, 400.0], [1.5, 0.0]);
        p.reflect(geometry());
        // hi = 797, overshoot 2 => 795
        assert_eq!(p.r[0], 795.0);
        assert_eq!(p.v[0], -1.5);
    }

    #[test]
    fn integrate_scales_with_temperature() {
        let mut p = at(Phase::Gas, [100.0, 100.0], [1.0, 2.0]);
        // temperature 2.0 => factor 1.5
        p.integrate(2.0, 2.0, geometry());
        assert!((p.r[0] - 103.0).abs() < 1e-12);
        assert!((p.r[1] - 106.0).abs() < 1e-12);
    }

    #[test]
    fn gas_reflects_off_top_but_not_liquid_surface() {
        let g = geometry();
        let mut top = at(Phase::Gas, [100.0, 4.0], [0.0, -2.0]);
        top.integrate(1.0, 1.0, g);
        assert_eq!(top.r[1], 4.0);
        assert_eq!(top.v[1], 2.0);

        let mut sinking = at(Phase::Gas, [100.0, 496.0], [0.0, 2.0]);
        sinking.integrate(1.0, 1.0, g);
        assert_eq!(sinking.r[1], 498.0);
        assert_eq!(sinking.v[1], 2.0);
    }

    #[test]
    fn dissolved_reflects_off_bottom_but_not_top() {
        let g = geometry();
        let mut bottom = at(Phase::Dissolved, [100.0, 496.0], [0.0, 2.0]);
        bottom.integrate(1.0, 1.0, g);
        assert_eq!(bottom.r[1], 496.0);
        assert_eq!(bottom.v[1], -2.0);

        let mut rising = at(Phase::Dissolved, [100.0, 4.0], [0.0, -2.0]);
        rising.integrate(1.0, 1.0, g);
        assert_eq!(rising.r[1], 2.0);
        assert_eq!(rising.v[1], -2.0);
    }

    #[test]
    fn surface_contact_uses_particle_edges() {
        let p = at(Phase::Gas, [10.0, 247.0], [0.0, 0.0]);
        assert!(p.touches_surface_from_above(250.0));
        let p = at(Phase::Gas, [10.0, 246.9], [0.0, 0.0]);
        assert!(!p.touches_surface_from_above(250.0));

        let d = at(Phase::Dissolved, [10.0, 253.0], [0.0, 0.0]);
        assert!(d.touches_surface_from_below(250.0));
        let d = at(Phase::Dissolved, [10.0, 253.1], [0.0, 0.0]);
        assert!(!d.touches_surface_from_below(250.0));
    }

    #[test]
    fn transition_respawns_in_new_region() {
        let g = geometry();
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = at(Phase::Gas, [10.0, 249.0], [0.0, 1.0]);
        p.transition(Phase::Dissolved, g, &mut rng);
        assert_eq!(p.phase, Phase::Dissolved);
        assert!(p.r[1] >= g.liquid_level + p.radius);
        assert_eq!(p.id, 0);
    }
}
