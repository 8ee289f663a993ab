pub mod curve;
pub mod error;
pub mod evaluator;
pub mod hypothesis;
pub mod likelihood;
pub mod pvalue;
pub mod quadrature;
pub mod ratio;

pub use curve::{even_trial_counts, most_likely_outcome_curve, CurvePoint};
pub use error::{EvidenceError, Result};
pub use evaluator::{BinomialEvidenceEvaluator, EvidenceReport};
pub use hypothesis::{Hypothesis, Observation};
pub use likelihood::{
    best_point_likelihood, interval_likelihood, interval_likelihood_with, log_point_likelihood,
    mle_point_hypothesis, point_likelihood, IntervalLikelihood,
};
pub use pvalue::{lower_tail_pvalue, pvalue, two_sided_pvalue, upper_tail_pvalue, Tail};
pub use quadrature::QuadratureConfig;
pub use ratio::{likelihood_ratio, likelihood_ratio_or_undefined};

/// Success probability of a fair coin, the default null hypothesis.
pub const DEFAULT_NULL_PROBABILITY: f64 = 0.5;
