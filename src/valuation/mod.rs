pub mod aggregate;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod market;
pub mod methods;
pub mod types;
pub mod weights;

pub use aggregate::{aggregate, Aggregate, VALUATION_VARIANCE};
pub use catalog::{applicable_methods, MethodDescriptor, MethodKind, CATALOG};
pub use engine::{calculate_valuation, get_applicable_methods, ValuationEngine};
pub use error::ValuationError;
pub use market::parse_market_size;
pub use methods::{risk_adjustments, RiskAdjustment};
pub use types::{MethodEvaluation, ValuationRange, ValuationResult};
pub use weights::method_weight;
