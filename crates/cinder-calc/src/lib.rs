//! # cinder-calc
//!
//! The activity calculator: converts one activity record plus its
//! resolved emission factor into a CO2-equivalent result in kilograms.
//!
//! Batch calculation commits one result per activity as it is produced,
//! so an interrupted batch is resumable; recalculation always overwrites
//! the prior result, never appends. Validation failures are per-row
//! errors collected alongside partial successes, never batch aborts.
//!
//! Callers must not run more than one calculation batch per project at
//! a time (single-writer discipline per project id); the engine does
//! not lock.
//!
//! ## Modules
//!
//! - [`store`] — the `ActivityStore` collaborator trait
//! - [`formula`] — per-activity-type formula dispatch
//! - [`batch`] — `calculate_all` over a project

pub mod batch;
pub mod formula;
pub mod store;

use cinder_factors::FactorError;
use cinder_types::StoreError;

pub use batch::{calculate_all, BatchOutcome, RowError};
pub use formula::calculate;
pub use store::ActivityStore;

/// Error types for activity calculation.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    /// Malformed or missing activity fields. Per-row: collected into
    /// [`BatchOutcome::errors`], never aborts a batch.
    #[error("validation error: {0}")]
    Validation(String),

    /// Factor resolution failed for this activity.
    #[error(transparent)]
    Factor(#[from] FactorError),

    /// Store collaborator failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience result type for calculation operations.
pub type Result<T> = std::result::Result<T, CalcError>;
