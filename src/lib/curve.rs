use crate::error::{EvidenceError, Result};
use crate::likelihood::point_likelihood;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub trials: u64,
    pub probability: f64,
}

/// Inclusive sequence `start, start + step, ..` up to `stop`.
pub fn even_trial_counts(start: u64, stop: u64, step: u64) -> Result<Vec<u64>> {
    if start == 0 || start % 2 != 0 {
        return Err(EvidenceError::OddTrialCount(start));
    }
    if step == 0 || step % 2 != 0 {
        return Err(EvidenceError::OddTrialCount(step));
    }
    Ok((start..=stop).step_by(step as usize).collect())
}

/// Probability of the most likely outcome, exactly `n/2` heads with a fair
/// coin, for each even trial count.
pub fn most_likely_outcome_curve(trial_counts: &[u64]) -> Result<Vec<CurvePoint>> {
    trial_counts
        .iter()
        .map(|&n| {
            if n == 0 || n % 2 != 0 {
                return Err(EvidenceError::OddTrialCount(n));
            }
            Ok(CurvePoint {
                trials: n,
                probability: point_likelihood(n, n / 2, 0.5)?,
            })
        })
        .collect()
}
