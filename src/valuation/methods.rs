//! Method evaluators.
//!
//! Each evaluator is a pure function of the validated input and returns a
//! USD value. Caps and floors are part of the methods themselves.

use serde::Serialize;

use crate::request::{Industry, Stage, ValuationInput};
use super::catalog::MethodKind;
use super::market::parse_market_size;

/// Minimum value reported by Risk Factor Summation, VC Method and DCF.
pub const VALUATION_FLOOR: f64 = 500_000.0;

const BERKUS_INCREMENT: f64 = 500_000.0;
const BERKUS_RELATIONSHIPS: f64 = 250_000.0;
const BERKUS_CAP: f64 = 2_500_000.0;

const SCORECARD_BASE: f64 = 2_000_000.0;

const RISK_STEP_USD: f64 = 250_000.0;
const LUCID_DESCRIPTION_CHARS: usize = 200;
const LARGE_FUNDING_GOAL: f64 = 5_000_000.0;

const VC_GROWTH_MULTIPLE: f64 = 10.0;

const DCF_GROWTH_RATE: f64 = 0.3;
const DCF_TERMINAL_GROWTH: f64 = 0.03;
const DCF_DISCOUNT_RATE: f64 = 0.12;
const DCF_YEARS: i32 = 5;
const DCF_EXPENSE_RATIO: f64 = 0.7;
const DCF_TERMINAL_MARGIN: f64 = 0.3;

/// Run the evaluator for `kind`.
pub fn evaluate(kind: MethodKind, input: &ValuationInput) -> f64 {
    match kind {
        MethodKind::Berkus => berkus(input),
        MethodKind::Scorecard => scorecard(input),
        MethodKind::RiskFactorSummation => risk_factor_summation(input),
        MethodKind::VentureCapital => venture_capital(input),
        MethodKind::DiscountedCashFlow => discounted_cash_flow(input),
        MethodKind::Comparable => comparable(input),
    }
}

/// Revenue multiple used by the VC and Comparable methods.
pub fn industry_multiple(industry: Industry) -> f64 {
    match industry {
        Industry::Technology => 8.0,
        Industry::Saas => 10.0,
        Industry::Healthcare => 6.0,
        Industry::Fintech => 9.0,
        Industry::Biotech => 15.0,
        Industry::Ecommerce => 4.0,
        Industry::Other => 5.0,
    }
}

fn scorecard_industry_multiplier(industry: Industry) -> f64 {
    match industry {
        Industry::Technology => 1.3,
        Industry::Saas => 1.4,
        Industry::Healthcare => 1.2,
        Industry::Fintech => 1.35,
        Industry::Biotech => 1.5,
        Industry::Ecommerce => 1.1,
        Industry::Other => 1.0,
    }
}

/// Berkus: fixed increments for five checkpoints, capped at $2.5M.
pub fn berkus(input: &ValuationInput) -> f64 {
    // Sound idea
    let mut value = BERKUS_INCREMENT;

    // Prototype
    if input.stage != Stage::Idea {
        value += BERKUS_INCREMENT;
    }

    // Management team
    if input.team_size >= 3 {
        value += BERKUS_INCREMENT;
    }

    // Strategic relationships
    if matches!(input.industry, Industry::Technology | Industry::Saas) {
        value += BERKUS_RELATIONSHIPS;
    }

    // Product rollout
    if input.revenue.is_some_and(|r| r > 0.0) {
        value += BERKUS_INCREMENT;
    }

    value.min(BERKUS_CAP)
}

/// Scorecard: $2M regional baseline scaled by successive multipliers.
pub fn scorecard(input: &ValuationInput) -> f64 {
    let mut value = SCORECARD_BASE * scorecard_industry_multiplier(input.industry);

    if input.team_size >= 5 {
        value *= 1.2;
    } else if input.team_size >= 3 {
        value *= 1.1;
    }

    let market = parse_market_size(&input.market_size);
    if market > 10_000_000_000.0 {
        value *= 1.3;
    } else if market > 1_000_000_000.0 {
        value *= 1.2;
    }

    let revenue = input.revenue.unwrap_or(0.0);
    if revenue > 100_000.0 {
        value *= 1.4;
    } else if revenue > 10_000.0 {
        value *= 1.2;
    }

    value
}

/// One named risk factor and its step adjustment (negative lowers risk).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAdjustment {
    pub factor: &'static str,
    pub steps: i32,
}

/// The twelve risk factors of the Risk Factor Summation method.
pub fn risk_adjustments(input: &ValuationInput) -> Vec<RiskAdjustment> {
    let is_technology = input.industry == Industry::Technology;
    let factor = |factor, steps| RiskAdjustment { factor, steps };

    vec![
        factor("Management", if input.team_size >= 3 { 0 } else { 1 }),
        factor(
            "Stage of business",
            match input.stage {
                Stage::Growth => -1,
                Stage::Idea => 2,
                _ => 0,
            },
        ),
        factor("Legislation/Political", 0),
        factor("Manufacturing", if is_technology { -1 } else { 0 }),
        factor(
            "Sales channels",
            if input.reported_revenue().is_some() { -1 } else { 1 },
        ),
        factor(
            "Funding/Capital",
            if input.funding_goal > LARGE_FUNDING_GOAL { 1 } else { 0 },
        ),
        factor("Competition", 1),
        factor("Technology", if is_technology { -1 } else { 0 }),
        factor("Litigation", 0),
        factor(
            "International",
            if input.geographic_market.as_deref() == Some("global") { 1 } else { 0 },
        ),
        factor("Reputation", 0),
        factor(
            "Lucidity/Focus",
            if description_length(&input.description) > LUCID_DESCRIPTION_CHARS { -1 } else { 0 },
        ),
    ]
}

/// Length in UTF-16 code units, the unit pitch limits are counted in.
fn description_length(description: &str) -> usize {
    description.encode_utf16().count()
}

/// Risk Factor Summation: Scorecard value less $250k per net risk step.
pub fn risk_factor_summation(input: &ValuationInput) -> f64 {
    let steps: i32 = risk_adjustments(input).iter().map(|r| r.steps).sum();
    let penalty = f64::from(steps) * RISK_STEP_USD;
    (scorecard(input) - penalty).max(VALUATION_FLOOR)
}

/// VC Method: exit value over expected return, less the raise.
///
/// Without a projection the growth base is ten times current revenue; a
/// missing revenue counts as zero, which lands on the floor.
pub fn venture_capital(input: &ValuationInput) -> f64 {
    let projected = match input.reported_projection() {
        Some(p) => p,
        None => {
            if input.revenue.is_none() {
                tracing::warn!(
                    company = %input.company_name,
                    "VC Method has neither revenue nor projected revenue; using zero growth base"
                );
            }
            input.revenue.unwrap_or(0.0) * VC_GROWTH_MULTIPLE
        }
    };

    let terminal_value = projected * industry_multiple(input.industry);
    let expected_return = if input.stage == Stage::EarlyRevenue { 10.0 } else { 5.0 };

    let post_money = terminal_value / expected_return;
    let pre_money = post_money - input.funding_goal;

    pre_money.max(VALUATION_FLOOR)
}

/// DCF: five years at 30% growth discounted at 12%, plus a Gordon terminal
/// value. Falls back to Scorecard without revenue.
pub fn discounted_cash_flow(input: &ValuationInput) -> f64 {
    let Some(revenue) = input.reported_revenue() else {
        return scorecard(input);
    };

    let fixed_expenses = input.expenses.filter(|e| *e != 0.0);
    let mut current_revenue = revenue;
    let mut present_value = 0.0;

    for year in 1..=DCF_YEARS {
        current_revenue *= 1.0 + DCF_GROWTH_RATE;
        let expenses = fixed_expenses.unwrap_or(current_revenue * DCF_EXPENSE_RATIO);
        let cash_flow = current_revenue - expenses;
        present_value += cash_flow / (1.0 + DCF_DISCOUNT_RATE).powi(year);
    }

    let terminal_cash_flow = current_revenue * (1.0 + DCF_TERMINAL_GROWTH) * DCF_TERMINAL_MARGIN;
    let terminal_value = terminal_cash_flow / (DCF_DISCOUNT_RATE - DCF_TERMINAL_GROWTH);
    let discounted_terminal = terminal_value / (1.0 + DCF_DISCOUNT_RATE).powi(DCF_YEARS);

    (present_value + discounted_terminal).max(VALUATION_FLOOR)
}

/// Comparable: revenue multiple, or market penetration before revenue.
pub fn comparable(input: &ValuationInput) -> f64 {
    if let Some(revenue) = input.revenue.filter(|r| *r > 0.0) {
        return revenue * industry_multiple(input.industry);
    }

    let penetration = match input.stage {
        Stage::Growth => 0.001,
        Stage::EarlyRevenue => 0.0005,
        _ => 0.0001,
    };

    parse_market_size(&input.market_size) * penetration
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    pub(crate) fn sample_input(stage: Stage, industry: Industry) -> ValuationInput {
        ValuationInput {
            company_name: "Acme".to_string(),
            industry,
            stage,
            description: "A short pitch".to_string(),
            revenue: None,
            expenses: None,
            team_size: 2,
            market_size: "$1B".to_string(),
            funding_goal: 50_000.0,
            business_model: None,
            projected_revenue: None,
            burn_rate: None,
            runway: None,
            previous_funding: None,
            geographic_market: None,
            competition: None,
            use_of_funds: None,
        }
    }

    #[test]
    fn test_berkus_idea_minimum() {
        let input = sample_input(Stage::Idea, Industry::Other);
        assert_eq!(berkus(&input), 500_000.0);
    }

    #[test]
    fn test_berkus_all_checkpoints() {
        let mut input = sample_input(Stage::EarlyRevenue, Industry::Saas);
        input.team_size = 4;
        input.revenue = Some(50_000.0);
        // 500k + 500k + 500k + 250k + 500k = 2.25M, under the cap
        assert_eq!(berkus(&input), 2_250_000.0);
    }

    #[test]
    fn test_berkus_zero_revenue_not_counted() {
        let mut input = sample_input(Stage::PreRevenue, Industry::Other);
        input.revenue = Some(0.0);
        assert_eq!(berkus(&input), 1_000_000.0);
    }

    #[test]
    fn test_scorecard_multipliers_compound() {
        let mut input = sample_input(Stage::Growth, Industry::Saas);
        input.team_size = 10;
        input.market_size = "$5B".to_string();
        input.revenue = Some(2_000_000.0);
        // 2M * 1.4 * 1.2 * 1.2 * 1.4
        assert_relative_eq!(scorecard(&input), 5_644_800.0, max_relative = 1e-12);
    }

    #[test]
    fn test_scorecard_baseline() {
        // $1B is not strictly greater than $1B, team of 2, no revenue
        let input = sample_input(Stage::PreRevenue, Industry::Other);
        assert_eq!(scorecard(&input), 2_000_000.0);
    }

    #[test]
    fn test_scorecard_large_market_and_small_traction() {
        let mut input = sample_input(Stage::PreRevenue, Industry::Biotech);
        input.team_size = 3;
        input.market_size = "$20B".to_string();
        input.revenue = Some(20_000.0);
        // 2M * 1.5 * 1.1 * 1.3 * 1.2
        assert_relative_eq!(scorecard(&input), 5_148_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_risk_adjustments_has_twelve_factors() {
        let input = sample_input(Stage::PreRevenue, Industry::Other);
        assert_eq!(risk_adjustments(&input).len(), 12);
    }

    #[test]
    fn test_risk_factor_penalty() {
        // Management +1, stage 0, sales +1, competition +1 => 3 steps = 750k
        let input = sample_input(Stage::PreRevenue, Industry::Other);
        assert_eq!(risk_factor_summation(&input), 2_000_000.0 - 750_000.0);
    }

    #[test]
    fn test_risk_factor_reduces_risk_for_long_description_and_tech() {
        let mut input = sample_input(Stage::Growth, Industry::Technology);
        input.team_size = 3;
        input.revenue = Some(5_000.0);
        input.description = "x".repeat(201);
        let steps: i32 = risk_adjustments(&input).iter().map(|r| r.steps).sum();
        // stage -1, manufacturing -1, sales -1, competition +1, technology -1, lucidity -1
        assert_eq!(steps, -4);
        assert_eq!(risk_factor_summation(&input), scorecard(&input) + 1_000_000.0);
    }

    #[test]
    fn test_lucidity_counts_utf16_units() {
        let lucidity = |input: &ValuationInput| {
            risk_adjustments(input)
                .into_iter()
                .find(|r| r.factor == "Lucidity/Focus")
                .map(|r| r.steps)
        };
        let mut input = sample_input(Stage::PreRevenue, Industry::Other);

        // 100 emoji are 200 code units
        input.description = "\u{1F680}".repeat(100);
        assert_eq!(lucidity(&input), Some(0));

        // 101 scalars but 202 code units
        input.description = "\u{1F680}".repeat(101);
        assert_eq!(lucidity(&input), Some(-1));
    }

    #[test]
    fn test_risk_factor_floor() {
        let mut input = sample_input(Stage::Idea, Industry::Other);
        input.funding_goal = 10_000_000.0;
        input.geographic_market = Some("global".to_string());
        // 1 + 2 + 1 + 1 + 1 + 1 = 7 steps = 1.75M penalty against 2M
        assert_eq!(risk_factor_summation(&input), VALUATION_FLOOR);
    }

    #[test]
    fn test_vc_method_from_revenue() {
        let mut input = sample_input(Stage::Growth, Industry::Saas);
        input.revenue = Some(2_000_000.0);
        input.funding_goal = 3_000_000.0;
        // 2M * 10 * 10 / 5 - 3M
        assert_eq!(venture_capital(&input), 37_000_000.0);
    }

    #[test]
    fn test_vc_method_prefers_projection() {
        let mut input = sample_input(Stage::EarlyRevenue, Industry::Fintech);
        input.revenue = Some(100_000.0);
        input.projected_revenue = Some(20_000_000.0);
        input.funding_goal = 1_000_000.0;
        // 20M * 9 / 10 - 1M
        assert_eq!(venture_capital(&input), 17_000_000.0);
    }

    #[test]
    fn test_vc_method_without_revenue_hits_floor() {
        let input = sample_input(Stage::EarlyRevenue, Industry::Biotech);
        assert_eq!(venture_capital(&input), VALUATION_FLOOR);
    }

    #[test]
    fn test_dcf_without_revenue_falls_back_to_scorecard() {
        let input = sample_input(Stage::EarlyRevenue, Industry::Healthcare);
        assert_eq!(discounted_cash_flow(&input), scorecard(&input));
    }

    #[test]
    fn test_dcf_with_fixed_expenses() {
        let mut input = sample_input(Stage::Growth, Industry::Saas);
        input.revenue = Some(2_000_000.0);
        input.expenses = Some(1_200_000.0);

        let mut revenue = 2_000_000.0_f64;
        let mut expected = 0.0;
        for year in 1..=5 {
            revenue *= 1.3;
            expected += (revenue - 1_200_000.0) / 1.12_f64.powi(year);
        }
        expected += revenue * 1.03 * 0.3 / 0.09 / 1.12_f64.powi(5);

        assert_relative_eq!(discounted_cash_flow(&input), expected, max_relative = 1e-12);
        assert!(discounted_cash_flow(&input) > 26_000_000.0);
    }

    #[test]
    fn test_dcf_default_expense_ratio() {
        let mut input = sample_input(Stage::Growth, Industry::Other);
        input.revenue = Some(5_000_000.0);

        // 30% margin on each year's grown revenue
        let expected: f64 = (1..=5)
            .map(|year| 0.3 * 5_000_000.0 * 1.3_f64.powi(year) / 1.12_f64.powi(year))
            .sum::<f64>()
            + 5_000_000.0 * 1.3_f64.powi(5) * 1.03 * 0.3 / 0.09 / 1.12_f64.powi(5);

        assert_relative_eq!(discounted_cash_flow(&input), expected, max_relative = 1e-12);
        assert_relative_eq!(discounted_cash_flow(&input), 48_157_520.14, max_relative = 1e-9);

        input.expenses = Some(0.0);
        assert_relative_eq!(discounted_cash_flow(&input), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_dcf_small_revenue_hits_floor() {
        let mut input = sample_input(Stage::EarlyRevenue, Industry::Other);
        input.revenue = Some(10_000.0);
        assert_eq!(discounted_cash_flow(&input), VALUATION_FLOOR);
    }

    #[test]
    fn test_comparable_revenue_multiple() {
        let mut input = sample_input(Stage::EarlyRevenue, Industry::Ecommerce);
        input.revenue = Some(300_000.0);
        assert_eq!(comparable(&input), 1_200_000.0);
    }

    #[test]
    fn test_comparable_market_penetration() {
        let mut input = sample_input(Stage::Growth, Industry::Other);
        input.market_size = "500M".to_string();
        assert_relative_eq!(comparable(&input), 500_000.0, max_relative = 1e-12);

        input.stage = Stage::PreRevenue;
        assert_relative_eq!(comparable(&input), 50_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_evaluate_dispatches() {
        let input = sample_input(Stage::PreRevenue, Industry::Other);
        assert_eq!(evaluate(MethodKind::Berkus, &input), berkus(&input));
        assert_eq!(evaluate(MethodKind::Comparable, &input), comparable(&input));
    }
}
