use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business stage. Determines which valuation methods apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Idea,
    PreRevenue,
    EarlyRevenue,
    Growth,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Idea,
        Stage::PreRevenue,
        Stage::EarlyRevenue,
        Stage::Growth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idea => "idea",
            Stage::PreRevenue => "pre-revenue",
            Stage::EarlyRevenue => "early-revenue",
            Stage::Growth => "growth",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown stage '{}' (expected one of: idea, pre-revenue, early-revenue, growth)",
                    s
                )
            })
    }
}

/// Industry category. Anything unlisted is treated as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Technology,
    Healthcare,
    Fintech,
    Ecommerce,
    Saas,
    Biotech,
    #[serde(other)]
    Other,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::Healthcare => "healthcare",
            Industry::Fintech => "fintech",
            Industry::Ecommerce => "ecommerce",
            Industry::Saas => "saas",
            Industry::Biotech => "biotech",
            Industry::Other => "other",
        }
    }

    /// Parse leniently: unknown names map to `Other` rather than failing.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "technology" => Industry::Technology,
            "healthcare" => Industry::Healthcare,
            "fintech" => Industry::Fintech,
            "ecommerce" => Industry::Ecommerce,
            "saas" => Industry::Saas,
            "biotech" => Industry::Biotech,
            _ => Industry::Other,
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Valuation request as it arrives from a file or a client.
///
/// Every field is optional here so that missing values can be reported
/// together by [`super::validate_request`] instead of failing on the first
/// serde error.
///
/// Example YAML:
/// ```yaml
/// companyName: Acme Analytics
/// industry: saas
/// stage: growth
/// description: Usage-based analytics for logistics fleets
/// revenue: 2000000
/// expenses: 1200000
/// teamSize: 10
/// marketSize: "$5B"
/// fundingGoal: 3000000
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub expenses: Option<f64>,
    #[serde(default)]
    pub team_size: Option<i64>,
    #[serde(default)]
    pub market_size: Option<String>,
    #[serde(default)]
    pub funding_goal: Option<f64>,
    #[serde(default)]
    pub business_model: Option<String>,
    #[serde(default)]
    pub projected_revenue: Option<f64>,
    #[serde(default)]
    pub burn_rate: Option<f64>,
    #[serde(default)]
    pub runway: Option<f64>,
    #[serde(default)]
    pub previous_funding: Option<String>,
    #[serde(default)]
    pub geographic_market: Option<String>,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default)]
    pub use_of_funds: Option<String>,
}

/// Validated company facts consumed by the valuation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInput {
    pub company_name: String,
    pub industry: Industry,
    pub stage: Stage,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<f64>,
    pub team_size: u32,
    pub market_size: String,
    pub funding_goal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runway: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_funding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic_market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_of_funds: Option<String>,
}

impl ValuationInput {
    /// Revenue when it is reported and non-zero.
    pub fn reported_revenue(&self) -> Option<f64> {
        self.revenue.filter(|r| *r != 0.0)
    }

    /// Projected revenue when it is supplied and non-zero.
    pub fn reported_projection(&self) -> Option<f64> {
        self.projected_revenue.filter(|p| *p != 0.0)
    }
}
