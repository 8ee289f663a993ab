use crate::error::{EvidenceError, Result};
use serde::Serialize;
use std::{fmt, str::FromStr};

/// Outcome of an experiment: `successes` out of `trials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Observation {
    trials: u64,
    successes: u64,
}

impl Observation {
    pub fn new(trials: u64, successes: u64) -> Result<Self> {
        if trials == 0 {
            return Err(EvidenceError::InvalidTrials(trials));
        }
        if successes > trials {
            return Err(EvidenceError::InvalidSuccesses { trials, successes });
        }
        Ok(Self { trials, successes })
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn failures(&self) -> u64 {
        self.trials - self.successes
    }
}

pub(crate) fn check_probability(field: &'static str, value: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EvidenceError::InvalidProbability { field, value });
    }
    Ok(value)
}

pub(crate) fn check_interval(lower: f64, upper: f64) -> Result<(f64, f64)> {
    // NaN fails every comparison, so it is rejected here too
    if !(lower >= 0.0 && upper <= 1.0 && lower < upper) {
        return Err(EvidenceError::InvalidInterval { lower, upper });
    }
    Ok((lower, upper))
}

/// Hypothesis about the success probability of a binomial experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Hypothesis {
    /// Success probability is exactly `p`.
    Point { p: f64 },
    /// Success probability is uniformly distributed on `[lower, upper]`.
    Interval { lower: f64, upper: f64 },
}

impl Hypothesis {
    pub fn point(p: f64) -> Result<Self> {
        Ok(Hypothesis::Point {
            p: check_probability("p", p)?,
        })
    }

    pub fn interval(lower: f64, upper: f64) -> Result<Self> {
        let (lower, upper) = check_interval(lower, upper)?;
        Ok(Hypothesis::Interval { lower, upper })
    }

    /// Uniform prior over the whole of [0, 1].
    pub fn agnostic() -> Self {
        Hypothesis::Interval {
            lower: 0.0,
            upper: 1.0,
        }
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Hypothesis::Point { p } => write!(f, "p={}", p),
            Hypothesis::Interval { lower, upper } => write!(f, "p~U[{},{}]", lower, upper),
        }
    }
}

impl FromStr for Hypothesis {
    type Err = EvidenceError;

    /// Parses `"0.5"` as a point and `"0:0.5"` as an interval.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| EvidenceError::InvalidHypothesis(s.to_string()))
        };
        match s.split_once(':') {
            Some((lower, upper)) => Hypothesis::interval(parse(lower)?, parse(upper)?),
            None => Hypothesis::point(parse(s)?),
        }
    }
}
