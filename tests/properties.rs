use gassol::core::kinetics::{dissolve_probability, escape_probability, reaction_probability};
use gassol::core::{Parameters, Particle, Phase, SimulationConfig};
use proptest::prelude::*;

fn params() -> impl Strategy<Value = Parameters> {
    (
        0.1f64..=2.0,
        0.1f64..=2.0,
        0.1f64..=2.0,
        0.1f64..=1.0,
        any::<bool>(),
    )
        .prop_map(|(t, p, k, pol, reaction)| {
            Parameters::new(t, p, k, pol, reaction).expect("strategy stays in range")
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: transition probabilities are finite and inside [0, 1] for every legal control
    /// setting, even with interface rates far above the default.
    #[test]
    fn transition_probabilities_are_bounded(params in params(), rate in 0.0f64..=50.0) {
        for p in [dissolve_probability(&params, rate), escape_probability(&params, rate)] {
            prop_assert!(p.is_finite());
            prop_assert!((0.0..=1.0).contains(&p), "probability {} out of range", p);
        }
    }

    #[test]
    fn reaction_probability_is_bounded(rate in 0.0f64..=1.0, dt in 0.0f64..=1_000.0) {
        let p = reaction_probability(rate, dt);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    /// Property: one integration step from inside a phase region never leaves that phase's
    /// hard walls, for any heading, legal temperature, and delta time up to ten reference frames.
    #[test]
    fn integrate_respects_hard_walls(
        fx in 0.0f64..=1.0,
        fy in 0.0f64..=1.0,
        angle in 0.0f64..std::f64::consts::TAU,
        speed in 1.5f64..2.0,
        temperature in 0.1f64..=2.0,
        dt in 0.0f64..=10.0,
        dissolved in any::<bool>(),
    ) {
        let g = SimulationConfig::default().geometry();
        let r = g.radius;
        let (phase, y_lo, y_hi) = if dissolved {
            (Phase::Dissolved, g.liquid_level + r, g.height - r)
        } else {
            (Phase::Gas, r, g.liquid_level - r)
        };
        let mut p = Particle {
            id: 0,
            r: [r + fx * (g.width - 2.0 * r), y_lo + fy * (y_hi - y_lo)],
            v: [speed * angle.cos(), speed * angle.sin()],
            radius: r,
            phase,
        };
        let speed_before = p.speed();
        p.integrate(dt, temperature, g);

        prop_assert!(p.r[0] >= r && p.r[0] <= g.width - r, "x = {}", p.r[0]);
        match phase {
            Phase::Gas => prop_assert!(p.r[1] >= r),
            Phase::Dissolved => prop_assert!(p.r[1] <= g.height - r),
        }
        prop_assert!((p.speed() - speed_before).abs() < 1e-12, "reflection must not change speed");
    }
}
