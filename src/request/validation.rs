use super::types::{Industry, Stage, ValuationInput, ValuationRequest};

pub const MIN_TEAM_SIZE: i64 = 1;
pub const MIN_FUNDING_GOAL: f64 = 1000.0;

/// Validate a raw request before it reaches the engine.
/// Returns all validation errors at once (not just the first).
pub fn validate_request(request: &ValuationRequest) -> Result<ValuationInput, Vec<String>> {
    let mut errors = Vec::new();

    let company_name = required_text(&request.company_name, "companyName", &mut errors);
    let industry = required_text(&request.industry, "industry", &mut errors).map(|s| Industry::parse(&s));
    let description = required_text(&request.description, "description", &mut errors);
    let market_size = required_text(&request.market_size, "marketSize", &mut errors);

    let stage = match request.stage.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push("stage: required field is missing".to_string());
            None
        }
        Some(s) => match s.parse::<Stage>() {
            Ok(stage) => Some(stage),
            Err(e) => {
                errors.push(format!("stage: {}", e));
                None
            }
        },
    };

    let team_size = match request.team_size {
        None => {
            errors.push("teamSize: required field is missing".to_string());
            None
        }
        Some(n) if n < MIN_TEAM_SIZE => {
            errors.push(format!("teamSize: must be at least {}, got {}", MIN_TEAM_SIZE, n));
            None
        }
        Some(n) => match u32::try_from(n) {
            Ok(n) => Some(n),
            Err(_) => {
                errors.push(format!("teamSize: {} is out of range", n));
                None
            }
        },
    };

    let funding_goal = match request.funding_goal {
        None => {
            errors.push("fundingGoal: required field is missing".to_string());
            None
        }
        Some(g) if !g.is_finite() || g < MIN_FUNDING_GOAL => {
            errors.push(format!("fundingGoal: must be at least $1,000, got {}", g));
            None
        }
        Some(g) => Some(g),
    };

    check_non_negative(request.revenue, "revenue", &mut errors);
    check_non_negative(request.expenses, "expenses", &mut errors);
    check_non_negative(request.projected_revenue, "projectedRevenue", &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    // Every required field was checked above, so the matches below only
    // fail if a check was missed.
    match (company_name, industry, stage, description, team_size, market_size, funding_goal) {
        (
            Some(company_name),
            Some(industry),
            Some(stage),
            Some(description),
            Some(team_size),
            Some(market_size),
            Some(funding_goal),
        ) => Ok(ValuationInput {
            company_name,
            industry,
            stage,
            description,
            revenue: request.revenue,
            expenses: request.expenses,
            team_size,
            market_size,
            funding_goal,
            business_model: request.business_model.clone(),
            projected_revenue: request.projected_revenue,
            burn_rate: request.burn_rate,
            runway: request.runway,
            previous_funding: request.previous_funding.clone(),
            geographic_market: request.geographic_market.clone(),
            competition: request.competition.clone(),
            use_of_funds: request.use_of_funds.clone(),
        }),
        _ => Err(vec!["request: incomplete after validation".to_string()]),
    }
}

/// Blank values count as missing; non-blank values pass through untrimmed
/// since description length feeds the risk factors.
fn required_text(value: &Option<String>, field: &str, errors: &mut Vec<String>) -> Option<String> {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        _ => {
            errors.push(format!("{}: required field is missing", field));
            None
        }
    }
}

fn check_non_negative(value: Option<f64>, field: &str, errors: &mut Vec<String>) {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            errors.push(format!("{}: must be a non-negative number, got {}", field, v));
        }
    }
}
