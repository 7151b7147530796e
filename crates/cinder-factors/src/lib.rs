//! # cinder-factors
//!
//! Emission factor resolution. Given a category, key, and year, returns
//! the single applicable factor and its provenance, applying the tiered
//! priority chain:
//!
//! 1. an active project [`FactorOverride`](cinder_types::FactorOverride)
//! 2. the active global factor for the exact year
//! 3. the nearest **prior** year's active factor (last-known fallback;
//!    never extrapolated forward)
//! 4. the external lookup collaborator, whose result is persisted as a
//!    new global factor before use
//! 5. [`FactorError::NotFound`]
//!
//! ## Modules
//!
//! - [`store`] — the `FactorStore` and `ExternalLookup` collaborator traits
//! - [`resolve`] — the resolution chain and override write-time validation

pub mod resolve;
pub mod store;

use cinder_types::{FactorCategory, StoreError};

pub use resolve::{resolve, validate_override, ResolvedFactor};
pub use store::{ExternalLookup, FactorStore, LookupCandidate};

/// Error types for factor resolution.
#[derive(Debug, thiserror::Error)]
pub enum FactorError {
    /// No factor could be resolved after the full fallback chain.
    /// The message is retained verbatim on the failed activity so an
    /// operator can remediate (e.g. add an override).
    #[error("no emission factor found for {category}/{key} in year {year}")]
    NotFound {
        category: FactorCategory,
        key: String,
        year: u16,
    },

    /// An override was rejected at write time.
    #[error("invalid factor override: {0}")]
    InvalidOverride(String),

    /// An override energy mix does not sum to 100.
    #[error("energy mix percentages must sum to 100, got {total}")]
    UnbalancedEnergyMix { total: f64 },

    /// Store collaborator failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience result type for factor operations.
pub type Result<T> = std::result::Result<T, FactorError>;
