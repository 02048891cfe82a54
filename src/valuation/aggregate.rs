use super::catalog::MethodKind;
use super::error::ValuationError;
use super::types::{MethodEvaluation, ValuationRange};

/// Fixed ±25% band around the weighted estimate.
pub const VALUATION_VARIANCE: f64 = 0.25;

/// Blended figures produced from a set of method evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub range: ValuationRange,
    pub primary_method: MethodKind,
    pub confidence: f64,
}

/// Combine method evaluations into a range, primary method and confidence.
///
/// Fails with [`ValuationError::NoApplicableMethods`] on an empty slice
/// instead of dividing by a zero total weight, and with
/// [`ValuationError::NonFiniteEstimate`] when the weighted sum overflows.
pub fn aggregate(evaluations: &[MethodEvaluation]) -> Result<Aggregate, ValuationError> {
    let Some(first) = evaluations.first() else {
        return Err(ValuationError::NoApplicableMethods { stage: None });
    };

    let total_weight: f64 = evaluations.iter().map(|e| e.weight).sum();
    if total_weight <= 0.0 {
        return Err(ValuationError::NoApplicableMethods { stage: None });
    }

    let weighted_value: f64 = evaluations.iter().map(|e| e.value * e.weight).sum::<f64>() / total_weight;
    let weighted_confidence: f64 =
        evaluations.iter().map(|e| e.confidence * e.weight).sum::<f64>() / total_weight;

    // Max by confidence x weight; only a strictly greater score replaces the
    // current best, so the earliest method wins ties.
    let primary = evaluations.iter().skip(1).fold(first, |best, current| {
        if current.confidence * current.weight > best.confidence * best.weight {
            current
        } else {
            best
        }
    });

    let range = ValuationRange {
        min: (weighted_value * (1.0 - VALUATION_VARIANCE)).round(),
        max: (weighted_value * (1.0 + VALUATION_VARIANCE)).round(),
        primary: weighted_value.round(),
    };

    // The upper band can overflow even when the weighted value does not.
    if !range.max.is_finite() || !weighted_confidence.is_finite() {
        return Err(ValuationError::NonFiniteEstimate {
            primary_method: primary.method,
        });
    }

    Ok(Aggregate {
        range,
        primary_method: primary.method,
        confidence: round_to_cents(weighted_confidence),
    })
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
