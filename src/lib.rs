//! Multi-method valuation engine for early-stage companies.
//!
//! The [`valuation`] module holds the engine: a fixed catalog of six
//! methods, their evaluators, the weight policy and the aggregator. It is
//! pure and storage-agnostic. [`request`] validates raw input before it
//! reaches the engine, and [`store`] persists results for callers that want
//! history.

pub mod config;
pub mod output;
pub mod request;
pub mod store;
pub mod valuation;

pub use request::{validate_request, Industry, Stage, ValuationInput, ValuationRequest};
pub use valuation::{
    calculate_valuation, get_applicable_methods, MethodDescriptor, MethodEvaluation, MethodKind,
    ValuationEngine, ValuationError, ValuationRange, ValuationResult,
};
