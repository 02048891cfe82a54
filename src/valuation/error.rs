use thiserror::Error;

use super::catalog::MethodKind;
use crate::request::Stage;

/// Failures inside the valuation engine.
///
/// All of these are deterministic for a given input; retrying with the same
/// input yields the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// No catalog method covers the stage, so there is nothing to weight.
    #[error("no applicable valuation methods for stage '{}'", stage_label(.stage))]
    NoApplicableMethods { stage: Option<Stage> },

    /// An evaluator produced NaN or infinity (e.g. from absurdly large inputs).
    #[error("{method} produced a non-finite value")]
    NonFiniteValue { method: MethodKind },

    /// Every method value was finite but the weighted blend overflowed.
    #[error("weighted estimate is not finite (primary method {primary_method})")]
    NonFiniteEstimate { primary_method: MethodKind },
}

fn stage_label(stage: &Option<Stage>) -> &'static str {
    stage.as_ref().map_or("unknown", Stage::as_str)
}
