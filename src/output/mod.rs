pub mod formatter;

pub use formatter::{
    format_age, format_confidence, format_dashboard, format_history_table, format_methods,
    format_result_detail, format_risk_factors, format_tsv, format_usd, should_use_colors,
};
