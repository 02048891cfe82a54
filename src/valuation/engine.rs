use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::aggregate::aggregate;
use super::catalog::{methods_for, MethodDescriptor, CATALOG};
use super::error::ValuationError;
use super::methods::evaluate;
use super::types::{MethodEvaluation, ValuationResult};
use super::weights::method_weight;
use crate::request::{Stage, ValuationInput};

/// Stateless valuation service over an immutable method catalog.
///
/// Cheap to copy and safe to share across threads; every call is an
/// independent pure computation.
#[derive(Debug, Clone, Copy)]
pub struct ValuationEngine {
    catalog: &'static [MethodDescriptor],
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValuationEngine {
    /// Engine over the built-in six-method catalog.
    pub fn new() -> Self {
        Self { catalog: &CATALOG }
    }

    pub fn with_catalog(catalog: &'static [MethodDescriptor]) -> Self {
        Self { catalog }
    }

    /// Methods that apply to `stage`, in catalog order.
    pub fn applicable_methods(&self, stage: Stage) -> Vec<&'static MethodDescriptor> {
        methods_for(self.catalog, stage)
    }

    /// Evaluate and weight every applicable method without aggregating.
    pub fn evaluate_methods(&self, input: &ValuationInput) -> Result<Vec<MethodEvaluation>, ValuationError> {
        let mut evaluations = Vec::new();

        for method in self.applicable_methods(input.stage) {
            let value = evaluate(method.kind, input);
            if !value.is_finite() {
                return Err(ValuationError::NonFiniteValue { method: method.kind });
            }
            let weight = method_weight(method, input);

            debug!(method = %method.kind, value, weight, "evaluated method");

            evaluations.push(MethodEvaluation {
                method: method.kind,
                value,
                confidence: method.base_confidence,
                weight,
            });
        }

        Ok(evaluations)
    }

    /// Run a full valuation for `input` on behalf of `owner_id`.
    ///
    /// The returned result is not persisted; saving it is up to the caller.
    pub fn calculate(&self, input: &ValuationInput, owner_id: &str) -> Result<ValuationResult, ValuationError> {
        let evaluations = self.evaluate_methods(input)?;
        if evaluations.is_empty() {
            return Err(ValuationError::NoApplicableMethods {
                stage: Some(input.stage),
            });
        }

        let blended = aggregate(&evaluations)?;

        let result = ValuationResult {
            id: Uuid::new_v4(),
            user_id: owner_id.to_string(),
            company_name: input.company_name.clone(),
            estimated_valuation: blended.range,
            methods: evaluations,
            primary_method: blended.primary_method,
            confidence: blended.confidence,
            created_at: Utc::now(),
            report_url: None,
        };

        info!(
            id = %result.id,
            company = %result.company_name,
            stage = %input.stage,
            primary = result.estimated_valuation.primary,
            primary_method = %result.primary_method,
            confidence = result.confidence,
            "valuation calculated"
        );

        Ok(result)
    }
}

/// Methods applicable to `stage` in the built-in catalog.
pub fn get_applicable_methods(stage: Stage) -> Vec<&'static MethodDescriptor> {
    ValuationEngine::new().applicable_methods(stage)
}

/// Run a valuation with the built-in catalog.
pub fn calculate_valuation(input: &ValuationInput, owner_id: &str) -> Result<ValuationResult, ValuationError> {
    ValuationEngine::new().calculate(input, owner_id)
}
