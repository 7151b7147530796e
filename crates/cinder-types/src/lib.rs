//! # cinder-types
//!
//! Shared domain types used across the Cinder workspace: activities,
//! emission factors, calculation results, aggregates, reports, and
//! signatures. All enums serialize as snake_case strings, which is the
//! canonical spelling at every boundary (store, report payloads).

pub mod activity;
pub mod aggregate;
pub mod calculation;
pub mod factor;
pub mod report;

pub use activity::{
    Activity, ActivityType, CalculationStatus, DataQualityTier, Scope, Scope3Category,
    TierDirection, TierLevel,
};
pub use aggregate::{AggregateKind, AggregateResult, CategoryTotal, Intensity, ProductionContext, ScopeTotals};
pub use calculation::CalculationResult;
pub use factor::{EmissionFactor, EnergyMix, FactorCategory, FactorOverride, FactorProvenance};
pub use report::{
    Report, ReportStatus, Signature, SignatureStatus, SignerRole, StandardId,
};

/// Common identifier aliases. Identifiers are opaque strings assigned by
/// the importing layer (typically ULIDs).
pub type ActivityId = String;
pub type ProjectId = String;
pub type ReportId = String;
pub type SignatureId = String;

/// 256-bit content hash of a signed report payload.
pub type ContentHash = [u8; 32];

/// Tolerance for energy-mix percentage sums (must equal 100 within this).
pub const ENERGY_MIX_TOLERANCE: f64 = 0.01;

/// Floating tolerance for CO2e comparisons in invariant checks.
pub const CO2E_TOLERANCE: f64 = 1e-9;

/// Failure type for the external store collaborators. Every store trait
/// in the engine crates returns this; engine error enums wrap it with
/// `#[from]`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying backend failure (SQL error, I/O, ...).
    #[error("store backend error: {0}")]
    Backend(String),

    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A write violated a store constraint.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// A stored value could not be decoded into its domain shape.
    #[error("serialization error: {0}")]
    Serialization(String),
}
