//! Integration test crate for the Cinder engine.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise end-to-end calculation and reporting flows across the
//! workspace crates, backed by an in-memory SQLite database.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p cinder-integration-tests
//! ```
