use crate::error::{EvidenceError, Result};
use crate::hypothesis::{check_interval, check_probability, Observation};
use crate::quadrature::{integrate, QuadratureConfig};
use log::warn;
use serde::Serialize;
use statrs::function::factorial::ln_binomial;

/// Log-probability of the observation given a precomputed `ln C(n, k)`.
///
/// `p` is clamped into [0, 1].
fn ln_pmf(ln_coefficient: f64, obs: &Observation, p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    // 0 * ln(0) is taken as 0 so the endpoints stay exact
    let success_term = match obs.successes() {
        0 => 0.0,
        k => k as f64 * p.ln(),
    };
    let failure_term = match obs.failures() {
        0 => 0.0,
        failures => failures as f64 * (-p).ln_1p(),
    };
    ln_coefficient + success_term + failure_term
}

/// Natural log of the binomial probability of `k` successes in `n` trials.
pub fn log_point_likelihood(n: u64, k: u64, p: f64) -> Result<f64> {
    let obs = Observation::new(n, k)?;
    let p = check_probability("p", p)?;
    Ok(ln_pmf(ln_binomial(n, k), &obs, p))
}

/// Probability of exactly `k` successes in `n` trials with success probability `p`.
pub fn point_likelihood(n: u64, k: u64, p: f64) -> Result<f64> {
    Ok(log_point_likelihood(n, k, p)?.exp())
}

/// Maximum-likelihood success probability, `k / n`.
pub fn mle_point_hypothesis(n: u64, k: u64) -> Result<f64> {
    let obs = Observation::new(n, k)?;
    Ok(obs.successes() as f64 / obs.trials() as f64)
}

/// Largest likelihood any point hypothesis can assign to the observation.
///
/// An upper bound for reference, not a prior-justified alternative.
pub fn best_point_likelihood(n: u64, k: u64) -> Result<f64> {
    point_likelihood(n, k, mle_point_hypothesis(n, k)?)
}

/// Marginal likelihood under a uniform prior on an interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntervalLikelihood {
    pub value: f64,
    /// Estimated absolute quadrature error of `value`.
    pub abs_error: f64,
    pub converged: bool,
}

impl IntervalLikelihood {
    pub fn is_degraded(&self) -> bool {
        !self.converged
    }
}

pub fn interval_likelihood(n: u64, k: u64, lower: f64, upper: f64) -> Result<IntervalLikelihood> {
    interval_likelihood_with(n, k, lower, upper, &QuadratureConfig::default())
}

// Multiples of the local width at which the peak is pinned with breakpoints
const PEAK_BREAKPOINTS: [f64; 11] = [
    -32.0, -16.0, -8.0, -4.0, -2.0, 0.0, 2.0, 4.0, 8.0, 16.0, 32.0,
];

/// Maximizer of the likelihood on `[lower, upper]` and the width of the
/// region around it that carries the mass.
fn likelihood_peak(obs: &Observation, lower: f64, upper: f64) -> (f64, f64) {
    let n = obs.trials() as f64;
    let mode = obs.successes() as f64 / n;
    let peak = mode.clamp(lower, upper);
    // The 1/n term keeps the width positive when k = 0 or k = n
    let spread = ((mode * (1.0 - mode) + 1.0 / n) / n).sqrt();
    if peak == mode {
        return (peak, spread);
    }
    // Peak sits on a bound: the likelihood decays at the log-slope there
    let slope = (obs.successes() as f64 / peak - obs.failures() as f64 / (1.0 - peak)).abs();
    (peak, spread.min(1.0 / slope))
}

/// Average of the point likelihood over `p ~ U[lower, upper]`.
///
/// The integrand is scaled by the likelihood at its maximum on the interval,
/// so tolerances are relative to the peak whatever the magnitude of the
/// result.
pub fn interval_likelihood_with(
    n: u64,
    k: u64,
    lower: f64,
    upper: f64,
    config: &QuadratureConfig,
) -> Result<IntervalLikelihood> {
    let obs = Observation::new(n, k)?;
    let (lower, upper) = check_interval(lower, upper)?;
    let ln_coefficient = ln_binomial(n, k);
    let (peak, spread) = likelihood_peak(&obs, lower, upper);
    let ln_peak = ln_pmf(ln_coefficient, &obs, peak);
    let integrand = |p: f64| (ln_pmf(ln_coefficient, &obs, p) - ln_peak).exp();
    let breakpoints: Vec<f64> = PEAK_BREAKPOINTS
        .iter()
        .map(|c| peak + c * spread)
        .collect();

    let result = integrate(integrand, lower, upper, &breakpoints, config);
    if !result.converged {
        if config.require_convergence {
            return Err(EvidenceError::QuadratureDidNotConverge {
                abs_error: result.abs_error,
                tolerance: result.tolerance,
                subdivisions: result.subdivisions,
            });
        }
        warn!(
            "Degraded precision for n={}, k={} over [{}, {}]: relative error bound {:.3e} exceeds {:.3e}",
            n,
            k,
            lower,
            upper,
            result.abs_error / result.value,
            result.tolerance / result.value
        );
    }
    let scale = ln_peak.exp() / (upper - lower);
    Ok(IntervalLikelihood {
        value: result.value * scale,
        abs_error: result.abs_error * scale,
        converged: result.converged,
    })
}
