use serde::{Deserialize, Serialize};
use std::fmt;

use crate::request::Stage;

/// The six valuation methodologies the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodKind {
    #[serde(rename = "Berkus Method")]
    Berkus,
    #[serde(rename = "Scorecard Method")]
    Scorecard,
    #[serde(rename = "Risk Factor Summation")]
    RiskFactorSummation,
    #[serde(rename = "VC Method")]
    VentureCapital,
    #[serde(rename = "DCF Analysis")]
    DiscountedCashFlow,
    #[serde(rename = "Comparable Analysis")]
    Comparable,
}

impl MethodKind {
    pub fn name(&self) -> &'static str {
        match self {
            MethodKind::Berkus => "Berkus Method",
            MethodKind::Scorecard => "Scorecard Method",
            MethodKind::RiskFactorSummation => "Risk Factor Summation",
            MethodKind::VentureCapital => "VC Method",
            MethodKind::DiscountedCashFlow => "DCF Analysis",
            MethodKind::Comparable => "Comparable Analysis",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of a valuation method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    #[serde(rename = "name")]
    pub kind: MethodKind,
    #[serde(rename = "confidence")]
    pub base_confidence: f64,
    pub applicable_stages: &'static [Stage],
    pub description: &'static str,
}

impl MethodDescriptor {
    pub fn applies_to(&self, stage: Stage) -> bool {
        self.applicable_stages.contains(&stage)
    }
}

/// Fixed method catalog. Order matters: it is the evaluation order and the
/// tie-break order for primary method selection.
pub static CATALOG: [MethodDescriptor; 6] = [
    MethodDescriptor {
        kind: MethodKind::Berkus,
        base_confidence: 0.7,
        applicable_stages: &[Stage::Idea, Stage::PreRevenue],
        description: "Pre-revenue valuation based on five key success factors",
    },
    MethodDescriptor {
        kind: MethodKind::Scorecard,
        base_confidence: 0.8,
        applicable_stages: &[Stage::PreRevenue, Stage::EarlyRevenue],
        description: "Comparative analysis with similar funded companies",
    },
    MethodDescriptor {
        kind: MethodKind::RiskFactorSummation,
        base_confidence: 0.75,
        applicable_stages: &[Stage::PreRevenue, Stage::EarlyRevenue, Stage::Growth],
        description: "Adjusts pre-money valuation based on risk assessment",
    },
    MethodDescriptor {
        kind: MethodKind::VentureCapital,
        base_confidence: 0.85,
        applicable_stages: &[Stage::EarlyRevenue, Stage::Growth],
        description: "Backward calculation from expected exit value",
    },
    MethodDescriptor {
        kind: MethodKind::DiscountedCashFlow,
        base_confidence: 0.9,
        applicable_stages: &[Stage::EarlyRevenue, Stage::Growth],
        description: "Discounted cash flow for revenue-generating businesses",
    },
    MethodDescriptor {
        kind: MethodKind::Comparable,
        base_confidence: 0.8,
        applicable_stages: &[Stage::PreRevenue, Stage::EarlyRevenue, Stage::Growth],
        description: "Market-based valuation using industry multiples",
    },
];

/// Methods applicable to `stage`, in catalog order.
pub fn applicable_methods(stage: Stage) -> Vec<&'static MethodDescriptor> {
    methods_for(&CATALOG, stage)
}

pub(crate) fn methods_for(catalog: &'static [MethodDescriptor], stage: Stage) -> Vec<&'static MethodDescriptor> {
    catalog.iter().filter(|m| m.applies_to(stage)).collect()
}
