//! Interface transition and reaction probabilities.
//!
//! Every function returns a value in `[0, 1]` for any finite input. Denominators are floored at
//! [`MIN_DENOMINATOR`] so a degenerate store can never feed NaN or infinity into sampling.

use crate::core::params::Parameters;
use rand::Rng;

/// Smallest value a divisor may take in the probability formulas.
pub const MIN_DENOMINATOR: f64 = 1e-6;

#[inline]
fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Chance that a gas particle touching the surface dissolves this tick.
///
/// `pressure * polarity / K * (1 - temperature/2) * rate`, clamped to [0, 1].
pub fn dissolve_probability(params: &Parameters, interface_rate: f64) -> f64 {
    let k = params.solubility_constant().max(MIN_DENOMINATOR);
    let raw = params.pressure() * params.polarity_match() / k
        * (1.0 - params.temperature() * 0.5)
        * interface_rate;
    clamp_probability(raw)
}

/// Chance that a dissolved particle touching the surface escapes to gas this tick.
///
/// `(temperature / pressure) * (1 / polarity) * K * rate`, clamped to [0, 1].
pub fn escape_probability(params: &Parameters, interface_rate: f64) -> f64 {
    let pressure = params.pressure().max(MIN_DENOMINATOR);
    let polarity = params.polarity_match().max(MIN_DENOMINATOR);
    let raw = (params.temperature() / pressure)
        * (1.0 / polarity)
        * params.solubility_constant()
        * interface_rate;
    clamp_probability(raw)
}

/// Chance that a dissolved particle is consumed by the reaction during a step of `delta_time`.
pub fn reaction_probability(reaction_rate: f64, delta_time: f64) -> f64 {
    clamp_probability(reaction_rate * delta_time)
}

/// Bernoulli draw: succeeds when a uniform sample in [0, 1) falls below `p`.
#[inline]
pub fn sample<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random::<f64>() < p
}
