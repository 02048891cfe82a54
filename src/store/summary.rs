use serde::Serialize;

use crate::valuation::ValuationResult;

/// How many results the dashboard shows in full.
pub const RECENT_LIMIT: usize = 5;

/// Portfolio overview for one owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_valuations: usize,
    pub average_valuation: f64,
    /// Percent change from the oldest to the newest primary valuation.
    pub portfolio_growth: f64,
    pub recent_valuations: Vec<ValuationResult>,
}

/// Summarize an owner's results. `results` must be most recent first.
pub fn summarize(results: &[&ValuationResult]) -> DashboardSummary {
    let total = results.len();

    let average = if total > 0 {
        results
            .iter()
            .map(|r| r.estimated_valuation.primary)
            .sum::<f64>()
            / total as f64
    } else {
        0.0
    };

    let growth = match (results.first(), results.last()) {
        (Some(newest), Some(oldest)) if total > 1 && oldest.estimated_valuation.primary != 0.0 => {
            let first = oldest.estimated_valuation.primary;
            (newest.estimated_valuation.primary - first) / first * 100.0
        }
        _ => 0.0,
    };

    DashboardSummary {
        total_valuations: total,
        average_valuation: average.round(),
        portfolio_growth: (growth * 100.0).round() / 100.0,
        recent_valuations: results
            .iter()
            .take(RECENT_LIMIT)
            .map(|r| (*r).clone())
            .collect(),
    }
}
