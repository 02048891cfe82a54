use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::MethodKind;

/// One method's contribution to a valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodEvaluation {
    #[serde(rename = "name")]
    pub method: MethodKind,
    pub value: f64,
    /// Base confidence copied from the catalog.
    pub confidence: f64,
    pub weight: f64,
}

/// Valuation band in whole USD. `min <= primary <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationRange {
    pub min: f64,
    pub max: f64,
    pub primary: f64,
}

/// Output of one engine run. Immutable; the caller owns persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub id: Uuid,
    pub user_id: String,
    pub company_name: String,
    pub estimated_valuation: ValuationRange,
    pub methods: Vec<MethodEvaluation>,
    pub primary_method: MethodKind,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
}

impl ValuationResult {
    /// The evaluation belonging to the primary method.
    pub fn primary_evaluation(&self) -> Option<&MethodEvaluation> {
        self.methods.iter().find(|m| m.method == self.primary_method)
    }

    /// Short id prefix for display ("3f2a9c1e").
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}
