//! # cinder-standards
//!
//! The reporting-standard requirement registry. One immutable record per
//! standard declares its required/optional/standard-unique field names,
//! report sections, supported scopes, and signature policy. The registry
//! is a closed enum: adding a standard is a compile-checked variant
//! addition, never a runtime dictionary mutation.
//!
//! ## Modules
//!
//! - [`registry`] — per-standard requirement records
//! - [`overlap`] — field overlap between two standards

pub mod overlap;
pub mod registry;

pub use overlap::{overlap, StandardOverlap};
pub use registry::{parse_standard, requirements, StandardRequirements, BASE_SECTIONS};

/// Error types for standard lookups.
#[derive(Debug, thiserror::Error)]
pub enum StandardError {
    /// Unknown standard id at the string boundary. Fatal to the single
    /// call; never retried automatically.
    #[error("unknown reporting standard: {0}")]
    Unknown(String),
}

/// Convenience result type for standard operations.
pub type Result<T> = std::result::Result<T, StandardError>;
