use crate::error::{EvidenceError, Result};
use log::warn;
use serde::Serializer;

fn check_likelihood(field: &'static str, value: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EvidenceError::InvalidLikelihood { field, value });
    }
    Ok(value)
}

/// Ratio `l1 / l2` of two likelihoods of the same observation.
///
/// Values above 1 favor the first hypothesis, values below 1 the second.
/// A zero denominator gives `+inf` when `l1 > 0` and `UndefinedRatio` when
/// both are zero.
pub fn likelihood_ratio(l1: f64, l2: f64) -> Result<f64> {
    let l1 = check_likelihood("l1", l1)?;
    let l2 = check_likelihood("l2", l2)?;
    if l2 == 0.0 {
        if l1 == 0.0 {
            return Err(EvidenceError::UndefinedRatio);
        }
        warn!("Likelihood ratio with zero denominator (l1={:e}), returning infinity", l1);
        return Ok(f64::INFINITY);
    }
    Ok(l1 / l2)
}

/// Like [`likelihood_ratio`], but a 0/0 ratio becomes `None` instead of an
/// error so one degenerate comparison does not discard the others.
pub fn likelihood_ratio_or_undefined(l1: f64, l2: f64) -> Result<Option<f64>> {
    match likelihood_ratio(l1, l2) {
        Ok(ratio) => Ok(Some(ratio)),
        Err(EvidenceError::UndefinedRatio) => {
            warn!("Both likelihoods are zero, ratio is undefined");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Writes a ratio as a number, `"inf"` when infinite.
///
/// JSON has no infinity and serde_json would otherwise emit `null`.
pub fn serialize_ratio_value<S>(ratio: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match *ratio {
        r if r.is_finite() => serializer.serialize_f64(r),
        r if r > 0.0 => serializer.serialize_str("inf"),
        _ => serializer.serialize_str("undefined"),
    }
}

/// Writes a possibly undefined ratio; `None` becomes `"undefined"`.
pub fn serialize_ratio<S>(ratio: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match ratio {
        Some(r) => serialize_ratio_value(r, serializer),
        None => serializer.serialize_str("undefined"),
    }
}

/// Human-readable ratio for tables.
pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) if r.is_infinite() => "inf".to_string(),
        Some(r) => format!("{:.4}", r),
        None => "undefined".to_string(),
    }
}
