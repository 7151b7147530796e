//! The resolution chain and override write-time validation.

use cinder_types::{EmissionFactor, FactorCategory, FactorOverride, FactorProvenance};
use serde::{Deserialize, Serialize};

use crate::store::{ExternalLookup, FactorStore};
use crate::{FactorError, Result};

/// A resolved factor, ready to multiply into a calculation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolvedFactor {
    pub value: f64,
    pub unit: String,
    /// Publication or override label.
    pub source: String,
    pub provenance: FactorProvenance,
    /// The year the factor actually belongs to; differs from the
    /// requested year when the prior-year fallback was taken.
    pub year: u16,
}

/// Resolve the single applicable factor for (category, key, year).
///
/// Pure lookup apart from step 4, which persists the external candidate
/// as a new global factor before consuming it.
///
/// # Errors
///
/// - [`FactorError::NotFound`] when the full chain yields nothing
/// - [`FactorError::Store`] on collaborator failure
pub fn resolve(
    store: &dyn FactorStore,
    external: Option<&dyn ExternalLookup>,
    category: FactorCategory,
    key: &str,
    year: u16,
    project_id: Option<&str>,
) -> Result<ResolvedFactor> {
    // 1. Project override. Overrides were validated when written, so no
    //    energy-mix re-check happens here.
    if let Some(project) = project_id {
        if let Some(ov) = store.override_for(project, category, key)? {
            if ov.active {
                tracing::debug!(%category, key, project, "factor resolved from override");
                return Ok(ResolvedFactor {
                    value: ov.value,
                    unit: ov.unit,
                    source: ov.source,
                    provenance: FactorProvenance::Override,
                    year,
                });
            }
        }
    }

    // 2. Active global factor for the exact year.
    if let Some(factor) = store.active_factor(category, key, year)? {
        return Ok(ResolvedFactor {
            value: factor.value,
            unit: factor.unit,
            source: factor.source,
            provenance: FactorProvenance::Standard,
            year: factor.year,
        });
    }

    // 3. Nearest prior year. Forward years are never used: a 2023
    //    activity must not pick up a 2025 factor.
    let mut prior: Option<EmissionFactor> = None;
    for factor in store.historical_factors(category, key)? {
        if !factor.active || factor.year >= year {
            continue;
        }
        match &prior {
            Some(best) if best.year >= factor.year => {}
            _ => prior = Some(factor),
        }
    }
    if let Some(factor) = prior {
        tracing::debug!(
            %category,
            key,
            requested = year,
            used = factor.year,
            "factor resolved from prior year"
        );
        return Ok(ResolvedFactor {
            value: factor.value,
            unit: factor.unit,
            source: factor.source,
            provenance: FactorProvenance::Standard,
            year: factor.year,
        });
    }

    // 4. External lookup, persisted before use.
    if let Some(external) = external {
        if let Some(candidate) = external.lookup_factor(category, key, None)? {
            let factor = EmissionFactor {
                category,
                key: key.to_string(),
                year,
                value: candidate.value,
                unit: candidate.unit.clone(),
                source: candidate.source.clone(),
                active: true,
            };
            store.insert_factor(&factor)?;
            tracing::info!(%category, key, year, source = %candidate.source,
                "external factor persisted");
            return Ok(ResolvedFactor {
                value: candidate.value,
                unit: candidate.unit,
                source: candidate.source,
                provenance: FactorProvenance::ExternalLookup,
                year,
            });
        }
    }

    Err(FactorError::NotFound {
        category,
        key: key.to_string(),
        year,
    })
}

/// Validate an override before it is written.
///
/// Rejection happens here, at write time; [`resolve`] trusts stored
/// overrides.
///
/// # Errors
///
/// - [`FactorError::InvalidOverride`] on a non-positive or non-finite value
/// - [`FactorError::UnbalancedEnergyMix`] when the mix does not sum to
///   100 within tolerance
pub fn validate_override(ov: &FactorOverride) -> Result<()> {
    if !ov.value.is_finite() || ov.value <= 0.0 {
        return Err(FactorError::InvalidOverride(format!(
            "factor value must be a positive finite number, got {}",
            ov.value
        )));
    }
    if ov.key.trim().is_empty() {
        return Err(FactorError::InvalidOverride(
            "factor key must be present".to_string(),
        ));
    }
    if let Some(mix) = &ov.energy_mix {
        if !mix.is_balanced() {
            tracing::warn!(
                project = %ov.project_id,
                key = %ov.key,
                total = mix.total(),
                "rejecting override with unbalanced energy mix"
            );
            return Err(FactorError::UnbalancedEnergyMix { total: mix.total() });
        }
    }
    Ok(())
}
