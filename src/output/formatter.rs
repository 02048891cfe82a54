use std::io::IsTerminal;
use chrono::{Duration, Utc};
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::store::DashboardSummary;
use crate::valuation::{MethodDescriptor, RiskAdjustment, ValuationResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a USD amount in compact notation ($1.5k, $2.3M, $1.2B, $847)
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let formatted = if abs >= 1_000_000_000.0 {
        format!("{:.1}B", abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", abs / 1_000.0)
    } else {
        format!("{:.0}", abs)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    let trimmed = formatted
        .replace(".0B", "B")
        .replace(".0M", "M")
        .replace(".0k", "k");

    format!("{}${}", sign, trimmed)
}

/// Format a confidence in [0, 1] as a percentage ("76%")
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a full valuation result with per-method breakdown
pub fn format_result_detail(result: &ValuationResult, use_colors: bool) -> String {
    let range = &result.estimated_valuation;
    let mut lines = Vec::new();

    let headline = format!(
        "{}  {} (range {} - {})",
        result.company_name,
        format_usd(range.primary),
        format_usd(range.min),
        format_usd(range.max)
    );
    lines.push(if use_colors {
        headline.bold().to_string()
    } else {
        headline
    });
    lines.push(format!("  Id: {}", result.id));
    lines.push(format!("  Primary method: {}", result.primary_method));
    lines.push(format!("  Confidence: {}", format_confidence(result.confidence)));
    lines.push(format!(
        "  Created: {} ({} ago)",
        result.created_at.format("%Y-%m-%d %H:%M UTC"),
        format_age(Utc::now() - result.created_at)
    ));
    lines.push("  Methods:".to_string());

    for evaluation in &result.methods {
        let marker = if evaluation.method == result.primary_method { "*" } else { " " };
        let line = format!(
            "  {} {:<22} {:>9}  weight {:.2}  confidence {}",
            marker,
            evaluation.method.name(),
            format_usd(evaluation.value),
            evaluation.weight,
            format_confidence(evaluation.confidence)
        );
        if use_colors && evaluation.method == result.primary_method {
            lines.push(line.green().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Format the Risk Factor Summation breakdown, one named factor per line.
/// Positive steps add risk and lower the value by $250k each.
pub fn format_risk_factors(adjustments: &[RiskAdjustment], use_colors: bool) -> String {
    let mut lines = vec!["  Risk factors:".to_string()];

    for adjustment in adjustments {
        let line = format!("    {:<22} {:+}", adjustment.factor, adjustment.steps);
        let line = match adjustment.steps {
            s if use_colors && s > 0 => line.red().to_string(),
            s if use_colors && s < 0 => line.green().to_string(),
            _ => line,
        };
        lines.push(line);
    }

    let net: i32 = adjustments.iter().map(|a| a.steps).sum();
    lines.push(format!("    {:<22} {:+}", "Net", net));
    lines.join("\n")
}

/// Format the methods applicable to a stage, one per line
pub fn format_methods(methods: &[&MethodDescriptor], use_colors: bool) -> String {
    if methods.is_empty() {
        return "No valuation methods apply to this stage.".to_string();
    }

    methods
        .iter()
        .map(|m| {
            let name = format!("{:<22}", m.kind.name());
            let confidence = format_confidence(m.base_confidence);
            if use_colors {
                format!("{} {:>4}  {}", name.bold(), confidence, m.description.dimmed())
            } else {
                format!("{} {:>4}  {}", name, confidence, m.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format saved results as a table with columns: Index, Primary, Company, Age, Id
/// Index column: 3 chars (fits "99."), right-aligned
/// Primary column is right-aligned, 8 chars wide (fits "$999.9M")
pub fn format_history_table(results: &[&ValuationResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No saved valuations.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let value_width = 8;
    let age_width = 4;
    let id_width = 8;
    let separator = "  ";

    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let index_str = format!("{:>2}.", idx + 1);
            let value_str = format!(
                "{:>width$}",
                format_usd(result.estimated_valuation.primary),
                width = value_width
            );
            let age_str = format!(
                "{:>width$}",
                format_age(Utc::now() - result.created_at),
                width = age_width
            );

            let fixed_width =
                index_width + 1 + value_width + age_width + id_width + separator.len() * 3;
            let company = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(&result.company_name, width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate_text(&result.company_name, 20),
                // No terminal (pipe), don't truncate
                None => result.company_name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    value_str.bold(),
                    separator,
                    company,
                    separator,
                    age_str.dimmed(),
                    separator,
                    result.short_id().underline()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str,
                    value_str,
                    separator,
                    company,
                    separator,
                    age_str,
                    separator,
                    result.short_id()
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format results as tab-separated values for scripting
/// Columns: id, company, primary, min, max, primary method, confidence (no headers, no colors)
pub fn format_tsv(results: &[&ValuationResult]) -> String {
    results
        .iter()
        .map(|r| {
            let range = &r.estimated_valuation;
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{:.2}",
                r.id,
                r.company_name,
                range.primary.round() as i64,
                range.min.round() as i64,
                range.max.round() as i64,
                r.primary_method,
                r.confidence
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the dashboard overview followed by the most recent results
pub fn format_dashboard(summary: &DashboardSummary, use_colors: bool) -> String {
    let growth = format!("{:+.2}%", summary.portfolio_growth);
    let growth = if !use_colors {
        growth
    } else if summary.portfolio_growth < 0.0 {
        growth.red().to_string()
    } else {
        growth.green().to_string()
    };

    let mut out = format!(
        "Valuations: {}\nAverage: {}\nGrowth: {}",
        summary.total_valuations,
        format_usd(summary.average_valuation),
        growth
    );

    if !summary.recent_valuations.is_empty() {
        let recent: Vec<&ValuationResult> = summary.recent_valuations.iter().collect();
        out.push_str("\n\nRecent:\n");
        out.push_str(&format_history_table(&recent, use_colors));
    }

    out
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Stage;
    use crate::store::summarize;
    use crate::store::types::tests::sample_result;
    use crate::valuation::get_applicable_methods;

    #[test]
    fn test_format_usd_small() {
        assert_eq!(format_usd(500.0), "$500");
    }

    #[test]
    fn test_format_usd_zero() {
        assert_eq!(format_usd(0.0), "$0");
    }

    #[test]
    fn test_format_usd_thousands() {
        assert_eq!(format_usd(750_000.0), "$750k");
        assert_eq!(format_usd(1_500.0), "$1.5k");
    }

    #[test]
    fn test_format_usd_millions() {
        assert_eq!(format_usd(2_500_000.0), "$2.5M");
        assert_eq!(format_usd(37_000_000.0), "$37M");
    }

    #[test]
    fn test_format_usd_billions() {
        assert_eq!(format_usd(1_000_000_000.0), "$1B");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(-250_000.0), "-$250k");
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(0.76), "76%");
        assert_eq!(format_confidence(1.0), "100%");
    }

    #[test]
    fn test_truncate_text_short() {
        assert_eq!(truncate_text("Short name", 20), "Short name");
    }

    #[test]
    fn test_truncate_text_long() {
        assert_eq!(truncate_text("This is a very long name", 15), "This is a ve...");
    }

    #[test]
    fn test_truncate_text_very_narrow() {
        assert_eq!(truncate_text("Hello world", 3), "Hel");
    }

    #[test]
    fn test_format_result_detail() {
        let result = sample_result("alice", 2_500_000.0, 5);
        let output = format_result_detail(&result, false);
        assert!(output.starts_with("Acme  $2.5M (range $1.9M - $3.1M)"));
        assert!(output.contains("Primary method: Berkus Method"));
        assert!(output.contains("Confidence: 70%"));
        assert!(output.contains("(5h ago)"));
        assert!(output.contains("* Berkus Method"));
    }

    #[test]
    fn test_format_methods() {
        let methods = get_applicable_methods(Stage::Idea);
        let output = format_methods(&methods, false);
        assert!(output.contains("Berkus Method"));
        assert!(output.contains("70%"));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_format_methods_empty() {
        assert_eq!(
            format_methods(&[], false),
            "No valuation methods apply to this stage."
        );
    }

    #[test]
    fn test_format_history_table_empty() {
        assert_eq!(format_history_table(&[], false), "No saved valuations.");
    }

    #[test]
    fn test_format_history_table_rows() {
        let first = sample_result("alice", 2_000_000.0, 0);
        let second = sample_result("alice", 500_000.0, 72);
        let output = format_history_table(&[&first, &second], false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("$2M"));
        assert!(lines[0].contains(&first.short_id()));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].contains("$500k"));
        assert!(lines[1].contains("3d"));
    }

    #[test]
    fn test_format_tsv() {
        let result = sample_result("alice", 1_500_000.0, 0);
        let output = format_tsv(&[&result]);
        assert_eq!(
            output,
            format!(
                "{}\tAcme\t1500000\t1125000\t1875000\tBerkus Method\t0.70",
                result.id
            )
        );
    }

    #[test]
    fn test_format_tsv_empty() {
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_dashboard() {
        let newest = sample_result("alice", 3_000_000.0, 0);
        let oldest = sample_result("alice", 2_000_000.0, 48);
        let summary = summarize(&[&newest, &oldest]);
        let output = format_dashboard(&summary, false);
        assert!(output.contains("Valuations: 2"));
        assert!(output.contains("Average: $2.5M"));
        assert!(output.contains("Growth: +50.00%"));
        assert!(output.contains("Recent:"));
    }

    #[test]
    fn test_format_age_hours() {
        assert_eq!(format_age(Duration::hours(3)), "3h");
    }

    #[test]
    fn test_format_age_days() {
        assert_eq!(format_age(Duration::days(2)), "2d");
    }

    #[test]
    fn test_format_age_weeks() {
        assert_eq!(format_age(Duration::weeks(2)), "2w");
    }

    #[test]
    fn test_format_age_now() {
        assert_eq!(format_age(Duration::seconds(30)), "now");
    }

    #[test]
    fn test_format_risk_factors_names_each_step() {
        let input = crate::valuation::methods::tests::sample_input(
            Stage::PreRevenue,
            crate::request::Industry::Other,
        );
        let adjustments = crate::valuation::risk_adjustments(&input);
        let output = format_risk_factors(&adjustments, false);
        let lines: Vec<&str> = output.lines().collect();

        // header, twelve factors, net
        assert_eq!(lines.len(), 14);
        assert!(lines[1].contains("Management") && lines[1].ends_with("+1"));
        assert!(output.contains("Lucidity/Focus"));
        assert!(lines[13].contains("Net") && lines[13].ends_with("+3"));
    }
}
