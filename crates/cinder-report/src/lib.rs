//! # cinder-report
//!
//! Report assembly and the signature gate. Assembly maps an aggregate
//! onto one standard's field names and surfaces missing required fields
//! softly (callers decide whether to proceed — signing an incomplete
//! report is permitted). Signing hashes the canonical payload with
//! BLAKE3 and is gated on the standard's authorized-role list;
//! verification recomputes the hash, so any post-signature edit to the
//! payload invalidates it.
//!
//! ## Modules
//!
//! - [`store`] — the `ReportStore` collaborator trait
//! - [`assemble`] — aggregate → standard-shaped payload
//! - [`signing`] — sign, verify, revoke

pub mod assemble;
pub mod signing;
pub mod store;

use cinder_standards::StandardError;
use cinder_types::{SignerRole, StandardId, StoreError};

pub use assemble::{assemble, ReportContext};
pub use signing::{content_hash, revoke, sign, verify};
pub use store::ReportStore;

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Unknown standard id.
    #[error(transparent)]
    Standard(#[from] StandardError),

    /// The signer's role is not in the standard's authorized list.
    /// Fatal to the sign attempt.
    #[error("role {role} is not authorized to sign {standard} reports")]
    UnauthorizedRole {
        role: SignerRole,
        standard: StandardId,
    },

    /// The payload could not be canonically serialized for hashing.
    #[error("payload serialization failed: {0}")]
    Payload(String),

    /// Store collaborator failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
