//! # cinder-aggregate
//!
//! Footprint aggregation. Sums calculated results into organization
//! (CFO) and product (CFP) totals, sliced by scope and, within scope 3,
//! by category.
//!
//! Aggregation is idempotent and recomputed wholesale on every call —
//! it never reads a previous aggregate as a starting point, so partial
//! updates cannot drift.
//!
//! ## Modules
//!
//! - [`footprint`] — the aggregation algorithm

pub mod footprint;

pub use footprint::aggregate;

/// Error types for aggregation.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// CFP aggregation requires a production quantity/unit context.
    #[error("CFP aggregation requires a production context")]
    MissingProductionContext,

    /// The production quantity must be positive to form an intensity.
    #[error("production quantity must be a positive finite number, got {0}")]
    InvalidProductionQuantity(f64),
}

/// Convenience result type for aggregation.
pub type Result<T> = std::result::Result<T, AggregateError>;
