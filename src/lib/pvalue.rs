use crate::error::{EvidenceError, Result};
use crate::hypothesis::{check_probability, Observation};
use crate::likelihood::log_point_likelihood;
use serde::Serialize;
use statrs::distribution::{Binomial, DiscreteCDF};
use strum_macros::{Display, EnumIter, EnumString};

/// Which outcomes count as "at least as extreme" as the observed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Tail {
    /// `k` or fewer successes.
    Lower,
    /// `k` or more successes.
    Upper,
    /// Every outcome no more probable than the observed one.
    TwoSided,
}

// Relative slack when comparing outcome probabilities in the two-sided test
const TWO_SIDED_RTOL: f64 = 1e-7;

fn null_distribution(n: u64, k: u64, p0: f64) -> Result<(Observation, Binomial)> {
    let obs = Observation::new(n, k)?;
    let p0 = check_probability("p0", p0)?;
    let distribution =
        Binomial::new(p0, n).map_err(|e| EvidenceError::Distribution(e.to_string()))?;
    Ok((obs, distribution))
}

/// P(X <= k) for X ~ Binomial(n, p0).
pub fn lower_tail_pvalue(n: u64, k: u64, p0: f64) -> Result<f64> {
    let (obs, distribution) = null_distribution(n, k, p0)?;
    if obs.successes() == obs.trials() {
        return Ok(1.0);
    }
    Ok(distribution.cdf(obs.successes()).clamp(0.0, 1.0))
}

/// P(X >= k) for X ~ Binomial(n, p0).
pub fn upper_tail_pvalue(n: u64, k: u64, p0: f64) -> Result<f64> {
    let (obs, distribution) = null_distribution(n, k, p0)?;
    if obs.successes() == 0 {
        return Ok(1.0);
    }
    Ok(distribution.sf(obs.successes() - 1).clamp(0.0, 1.0))
}

/// Sum of the probabilities of all outcomes no more likely than `k`.
pub fn two_sided_pvalue(n: u64, k: u64, p0: f64) -> Result<f64> {
    let (obs, _) = null_distribution(n, k, p0)?;
    let observed = log_point_likelihood(n, obs.successes(), p0)?;
    let threshold = observed + TWO_SIDED_RTOL.ln_1p();
    let mut total = 0.0;
    for i in 0..=n {
        let log_prob = log_point_likelihood(n, i, p0)?;
        if log_prob <= threshold {
            total += log_prob.exp();
        }
    }
    Ok(total.min(1.0))
}

pub fn pvalue(n: u64, k: u64, p0: f64, tail: Tail) -> Result<f64> {
    match tail {
        Tail::Lower => lower_tail_pvalue(n, k, p0),
        Tail::Upper => upper_tail_pvalue(n, k, p0),
        Tail::TwoSided => two_sided_pvalue(n, k, p0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::likelihood::point_likelihood;
    use itertools::Itertools;
    use strum::IntoEnumIterator;

    #[test]
    fn test_coin_example() {
        let p = lower_tail_pvalue(250, 110, 0.5).unwrap();
        assert!((p - 0.03321).abs() < 5e-5, "p={}", p);
    }

    #[test]
    fn test_edges() {
        assert!((lower_tail_pvalue(20, 0, 0.3).unwrap() - 0.7f64.powi(20)).abs() < 1e-14);
        assert_eq!(lower_tail_pvalue(20, 20, 0.3).unwrap(), 1.0);
        assert_eq!(upper_tail_pvalue(20, 0, 0.3).unwrap(), 1.0);
        assert!((upper_tail_pvalue(20, 20, 0.3).unwrap() - 0.3f64.powi(20)).abs() < 1e-18);
    }

    #[test]
    fn test_lower_tail_monotone() {
        let values: Vec<f64> = (0..=250)
            .map(|k| lower_tail_pvalue(250, k, 0.5).unwrap())
            .collect();
        // statrs switches continued-fraction branch mid-range; allow rounding
        for (a, b) in values.iter().tuple_windows() {
            assert!(*b >= *a - 1e-15, "{} then {}", a, b);
        }
    }

    #[test]
    fn test_tails_overlap_at_k() {
        // P(X <= k) + P(X >= k) = 1 + P(X = k)
        let lower = lower_tail_pvalue(40, 13, 0.4).unwrap();
        let upper = upper_tail_pvalue(40, 13, 0.4).unwrap();
        let pmf = point_likelihood(40, 13, 0.4).unwrap();
        assert!((lower + upper - 1.0 - pmf).abs() < 1e-12);
    }

    #[test]
    fn test_two_sided_fair_coin() {
        // Symmetric null: two-sided is twice the lower tail
        let lower = lower_tail_pvalue(250, 110, 0.5).unwrap();
        let two = two_sided_pvalue(250, 110, 0.5).unwrap();
        assert!((two - 2.0 * lower).abs() < 1e-10);
        assert!((two_sided_pvalue(10, 5, 0.5).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(lower_tail_pvalue(0, 0, 0.5).is_err());
        assert!(lower_tail_pvalue(10, 11, 0.5).is_err());
        assert!(lower_tail_pvalue(10, 5, 1.5).is_err());
        assert!(upper_tail_pvalue(10, 5, f64::NAN).is_err());
    }

    #[test]
    fn test_tail_from_str() {
        for tail in Tail::iter() {
            assert_eq!(tail.to_string().parse::<Tail>().unwrap(), tail);
        }
        assert_eq!("two_sided".parse::<Tail>().unwrap(), Tail::TwoSided);
        assert_eq!("LOWER".parse::<Tail>().unwrap(), Tail::Lower);
        assert!("middle".parse::<Tail>().is_err());
        for tail in Tail::iter() {
            assert!(pvalue(30, 12, 0.5, tail).unwrap() <= 1.0);
        }
    }
}
