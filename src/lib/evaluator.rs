use crate::error::Result;
use crate::hypothesis::{check_probability, Hypothesis, Observation};
use crate::likelihood::{interval_likelihood_with, mle_point_hypothesis, point_likelihood};
use crate::pvalue::{pvalue, Tail};
use crate::quadrature::QuadratureConfig;
use crate::ratio::{
    likelihood_ratio, likelihood_ratio_or_undefined, serialize_ratio, serialize_ratio_value,
};
use crate::DEFAULT_NULL_PROBABILITY;
use log::debug;
use serde::Serialize;

/// Likelihood of the observation under one hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HypothesisLikelihood {
    pub hypothesis: Hypothesis,
    pub likelihood: f64,
    /// Quadrature error bound; zero for point hypotheses.
    pub abs_error: f64,
    pub converged: bool,
}

/// An alternative hypothesis compared against the null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlternativeEvidence {
    #[serde(flatten)]
    pub likelihood: HypothesisLikelihood,
    /// Null likelihood divided by this alternative's likelihood; `None` when
    /// both are zero.
    #[serde(serialize_with = "serialize_ratio")]
    pub null_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceReport {
    pub observation: Observation,
    pub null: HypothesisLikelihood,
    pub tail: Tail,
    pub p_value: f64,
    pub mle: HypothesisLikelihood,
    /// Always defined: the maximum likelihood is positive.
    #[serde(serialize_with = "serialize_ratio_value")]
    pub null_mle_ratio: f64,
    pub alternatives: Vec<AlternativeEvidence>,
}

/// Compares a point null hypothesis against alternatives for one observation.
#[derive(Debug, Clone)]
pub struct BinomialEvidenceEvaluator {
    observation: Observation,
    null_probability: f64,
    quadrature: QuadratureConfig,
}

impl BinomialEvidenceEvaluator {
    pub fn new(trials: u64, successes: u64) -> Result<Self> {
        Ok(Self {
            observation: Observation::new(trials, successes)?,
            null_probability: DEFAULT_NULL_PROBABILITY,
            quadrature: QuadratureConfig::default(),
        })
    }

    pub fn with_null_probability(mut self, p0: f64) -> Result<Self> {
        self.null_probability = check_probability("p0", p0)?;
        Ok(self)
    }

    pub fn with_quadrature(mut self, config: QuadratureConfig) -> Self {
        self.quadrature = config;
        self
    }

    pub fn observation(&self) -> Observation {
        self.observation
    }

    pub fn null_probability(&self) -> f64 {
        self.null_probability
    }

    pub fn p_value(&self, tail: Tail) -> Result<f64> {
        pvalue(
            self.observation.trials(),
            self.observation.successes(),
            self.null_probability,
            tail,
        )
    }

    pub fn likelihood(&self, hypothesis: &Hypothesis) -> Result<HypothesisLikelihood> {
        let n = self.observation.trials();
        let k = self.observation.successes();
        match *hypothesis {
            Hypothesis::Point { p } => Ok(HypothesisLikelihood {
                hypothesis: *hypothesis,
                likelihood: point_likelihood(n, k, p)?,
                abs_error: 0.0,
                converged: true,
            }),
            Hypothesis::Interval { lower, upper } => {
                let result = interval_likelihood_with(n, k, lower, upper, &self.quadrature)?;
                Ok(HypothesisLikelihood {
                    hypothesis: *hypothesis,
                    likelihood: result.value,
                    abs_error: result.abs_error,
                    converged: result.converged,
                })
            }
        }
    }

    pub fn null_likelihood(&self) -> Result<HypothesisLikelihood> {
        self.likelihood(&Hypothesis::Point {
            p: self.null_probability,
        })
    }

    /// The maximum-likelihood point hypothesis and its likelihood.
    pub fn best_point(&self) -> Result<HypothesisLikelihood> {
        let p = mle_point_hypothesis(self.observation.trials(), self.observation.successes())?;
        self.likelihood(&Hypothesis::Point { p })
    }

    pub fn evaluate(&self, alternatives: &[Hypothesis], tail: Tail) -> Result<EvidenceReport> {
        let null = self.null_likelihood()?;
        let mle = self.best_point()?;
        let alternatives = alternatives
            .iter()
            .map(|hypothesis| {
                let likelihood = self.likelihood(hypothesis)?;
                let null_ratio =
                    likelihood_ratio_or_undefined(null.likelihood, likelihood.likelihood)?;
                debug!(
                    "{} vs {}: likelihood {:.6e}, ratio {:?}",
                    null.hypothesis, hypothesis, likelihood.likelihood, null_ratio
                );
                Ok(AlternativeEvidence {
                    likelihood,
                    null_ratio,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EvidenceReport {
            observation: self.observation,
            null,
            tail,
            p_value: self.p_value(tail)?,
            null_mle_ratio: likelihood_ratio(null.likelihood, mle.likelihood)?,
            mle,
            alternatives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin_report() -> EvidenceReport {
        let evaluator = BinomialEvidenceEvaluator::new(250, 110).unwrap();
        let alternatives = vec![
            Hypothesis::agnostic(),
            Hypothesis::interval(0.0, 0.5).unwrap(),
        ];
        evaluator.evaluate(&alternatives, Tail::Lower).unwrap()
    }

    #[test]
    fn test_coin_example() {
        let report = coin_report();
        assert!((report.p_value - 0.03321).abs() < 5e-5);
        assert_eq!(report.mle.hypothesis, Hypothesis::Point { p: 0.44 });
        assert!((report.null_mle_ratio - 0.1646).abs() < 5e-4);
        assert_eq!(report.alternatives.len(), 2);
        let ratios: Vec<f64> = report
            .alternatives
            .iter()
            .map(|a| a.null_ratio.unwrap())
            .collect();
        assert!((ratios[0] - 2.098).abs() < 5e-3);
        assert!((ratios[1] - 1.080).abs() < 5e-3);
        assert!((report.alternatives[0].likelihood.likelihood - 1.0 / 251.0).abs() < 1e-10);
        assert!(report.alternatives.iter().all(|a| a.likelihood.converged));
    }

    #[test]
    fn test_point_alternative() {
        let evaluator = BinomialEvidenceEvaluator::new(250, 110).unwrap();
        let null = evaluator.null_likelihood().unwrap();
        let report = evaluator
            .evaluate(&[Hypothesis::Point { p: 0.5 }], Tail::TwoSided)
            .unwrap();
        assert_eq!(report.alternatives[0].null_ratio, Some(1.0));
        assert_eq!(report.null, null);
        assert_eq!(null.abs_error, 0.0);
    }

    #[test]
    fn test_null_probability() {
        let evaluator = BinomialEvidenceEvaluator::new(10, 3).unwrap();
        assert_eq!(evaluator.null_probability(), DEFAULT_NULL_PROBABILITY);
        let evaluator = evaluator.with_null_probability(0.3).unwrap();
        assert_eq!(evaluator.null_probability(), 0.3);
        assert!(evaluator.clone().with_null_probability(1.3).is_err());
        assert!(BinomialEvidenceEvaluator::new(10, 11).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(coin_report()).unwrap();
        assert_eq!(json["observation"]["trials"], 250);
        assert_eq!(json["tail"], "lower");
        assert_eq!(json["alternatives"][1]["hypothesis"]["kind"], "interval");
        assert_eq!(json["alternatives"][1]["hypothesis"]["upper"], 0.5);
        assert!(json["alternatives"][0]["null_ratio"].is_number());
    }

    #[test]
    fn test_infinite_ratio_survives_json() {
        let report = BinomialEvidenceEvaluator::new(10, 3)
            .unwrap()
            .evaluate(&[Hypothesis::Point { p: 0.0 }], Tail::Lower)
            .unwrap();
        assert_eq!(report.alternatives[0].null_ratio, Some(f64::INFINITY));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["alternatives"][0]["null_ratio"], "inf");
    }

    #[test]
    fn test_undefined_ratio_keeps_report() {
        // Null p0 = 0 and alternative p = 1 both give zero likelihood to 3/10
        let report = BinomialEvidenceEvaluator::new(10, 3)
            .unwrap()
            .with_null_probability(0.0)
            .unwrap()
            .evaluate(&[Hypothesis::Point { p: 1.0 }, Hypothesis::agnostic()], Tail::Lower)
            .unwrap();
        assert_eq!(report.null.likelihood, 0.0);
        assert!((report.p_value - 1.0).abs() < 1e-12);
        assert_eq!(report.alternatives.len(), 2);
        assert_eq!(report.alternatives[0].null_ratio, None);
        assert_eq!(report.alternatives[1].null_ratio, Some(0.0));
        assert!((report.alternatives[1].likelihood.likelihood - 1.0 / 11.0).abs() < 1e-12);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["alternatives"][0]["null_ratio"], "undefined");
        assert_eq!(json["alternatives"][1]["null_ratio"], 0.0);
    }
}
