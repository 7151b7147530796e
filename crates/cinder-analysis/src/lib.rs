//! # cinder-analysis
//!
//! Hotspot ranking and data-quality scoring over a project's calculated
//! results. Both computations exclude activities without a calculated
//! result — they are left out, never treated as zero.
//!
//! ## Modules
//!
//! - [`hotspot`] — emission sources ranked by share of total
//! - [`quality`] — emissions-weighted data-quality score

pub mod hotspot;
pub mod quality;

pub use hotspot::{hotspots, Hotspot};
pub use quality::{data_quality, DataQualityScore};
