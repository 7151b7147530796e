//! Factor store collaborator traits.
//!
//! The engine holds no factor data of its own; it reads through these
//! traits and treats every call as a synchronous round trip with
//! caller-supplied timeouts.

use cinder_types::{EmissionFactor, FactorCategory, FactorOverride, StoreError};

/// Read/write access to the factor tables.
pub trait FactorStore {
    /// The active global factor for (category, key, year), if any.
    /// At most one factor is active per triple.
    fn active_factor(
        &self,
        category: FactorCategory,
        key: &str,
        year: u16,
    ) -> Result<Option<EmissionFactor>, StoreError>;

    /// The active override for (project, category, key), if any.
    fn override_for(
        &self,
        project_id: &str,
        category: FactorCategory,
        key: &str,
    ) -> Result<Option<FactorOverride>, StoreError>;

    /// All active factors for (category, key) across years, any order.
    /// Backing query for the prior-year fallback search.
    fn historical_factors(
        &self,
        category: FactorCategory,
        key: &str,
    ) -> Result<Vec<EmissionFactor>, StoreError>;

    /// Persist a factor (used to store external lookup results so they
    /// are never consumed transiently).
    fn insert_factor(&self, factor: &EmissionFactor) -> Result<(), StoreError>;
}

/// Candidate factor returned by the external lookup collaborator.
#[derive(Clone, Debug)]
pub struct LookupCandidate {
    pub value: f64,
    pub unit: String,
    pub source: String,
}

/// Optional external factor lookup (e.g. a licensed LCA database).
/// Consulted only when no internal factor exists; results are persisted
/// before being consumed by the resolver.
pub trait ExternalLookup {
    fn lookup_factor(
        &self,
        category: FactorCategory,
        key: &str,
        region: Option<&str>,
    ) -> Result<Option<LookupCandidate>, StoreError>;
}
