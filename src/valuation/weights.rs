use crate::request::{Stage, ValuationInput};
use super::catalog::{MethodDescriptor, MethodKind};

/// Multiplier reflecting how well the input's data suits `kind`.
pub fn weight_multiplier(kind: MethodKind, input: &ValuationInput) -> f64 {
    match kind {
        MethodKind::DiscountedCashFlow => {
            if input.revenue.is_some_and(|r| r > 100_000.0) {
                1.5
            } else {
                0.5
            }
        }
        MethodKind::VentureCapital => {
            if input.reported_projection().is_some() {
                1.3
            } else {
                0.8
            }
        }
        MethodKind::Berkus => {
            if input.stage == Stage::Idea {
                1.5
            } else {
                0.7
            }
        }
        MethodKind::Scorecard => {
            if input.team_size >= 3 {
                1.2
            } else {
                1.0
            }
        }
        MethodKind::RiskFactorSummation | MethodKind::Comparable => 1.0,
    }
}

/// Weight of a method for this input: multiplier times base confidence.
pub fn method_weight(method: &MethodDescriptor, input: &ValuationInput) -> f64 {
    weight_multiplier(method.kind, input) * method.base_confidence
}
