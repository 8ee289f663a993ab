use thiserror::Error;

pub type Result<T, E = EvidenceError> = std::result::Result<T, E>;

/// Errors raised while evaluating binomial evidence.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvidenceError {
    #[error("Number of trials must be positive, got {0}")]
    InvalidTrials(u64),
    #[error("Successes k={successes} outside [0, {trials}]")]
    InvalidSuccesses { trials: u64, successes: u64 },
    #[error("Probability {field}={value} outside [0, 1]")]
    InvalidProbability { field: &'static str, value: f64 },
    #[error("Invalid interval [{lower}, {upper}]: bounds must satisfy 0 <= lower < upper <= 1")]
    InvalidInterval { lower: f64, upper: f64 },
    #[error("Likelihood {field}={value} outside [0, 1]")]
    InvalidLikelihood { field: &'static str, value: f64 },
    #[error("Likelihood ratio 0/0 is undefined")]
    UndefinedRatio,
    #[error("Trial count {0} is not a positive even number")]
    OddTrialCount(u64),
    #[error("Quadrature did not converge: error bound {abs_error:e} exceeds tolerance {tolerance:e} after {subdivisions} subdivisions")]
    QuadratureDidNotConverge {
        abs_error: f64,
        tolerance: f64,
        subdivisions: usize,
    },
    #[error("Invalid hypothesis: {0}")]
    InvalidHypothesis(String),
    #[error("Distribution error: {0}")]
    Distribution(String),
}
