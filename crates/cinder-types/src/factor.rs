//! Emission factors, project overrides, and provenance.

use serde::{Deserialize, Serialize};

use crate::{ProjectId, ENERGY_MIX_TOLERANCE};

/// Factor table category.
///
/// Transport mode factors live under `fuel` with mode keys
/// (`road_freight`, `rail_freight`, ...), matching how fuel-burn-derived
/// mode factors are published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    Grid,
    Fuel,
    Material,
    Precursor,
}

impl std::fmt::Display for FactorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FactorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Fuel => "fuel",
            Self::Material => "material",
            Self::Precursor => "precursor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "grid" => Some(Self::Grid),
            "fuel" => Some(Self::Fuel),
            "material" => Some(Self::Material),
            "precursor" => Some(Self::Precursor),
            _ => None,
        }
    }
}

/// Where a resolved factor came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorProvenance {
    /// Project-scoped [`FactorOverride`].
    Override,
    /// Active global [`EmissionFactor`] (exact year or prior-year
    /// fallback).
    Standard,
    /// Persisted result of the external lookup collaborator.
    ExternalLookup,
}

impl FactorProvenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Standard => "standard",
            Self::ExternalLookup => "external_lookup",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "override" => Some(Self::Override),
            "standard" => Some(Self::Standard),
            "external_lookup" => Some(Self::ExternalLookup),
            _ => None,
        }
    }
}

/// One global emission factor.
///
/// Multiple rows may exist for the same key across years; exactly one is
/// active per (category, key, year).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmissionFactor {
    pub category: FactorCategory,
    /// Country code, fuel name, material (optionally with production
    /// route suffix), or transport mode.
    pub key: String,
    pub year: u16,
    /// Factor value, kgCO2e per declared unit.
    pub value: f64,
    /// Declared denominator unit (e.g. `kgCO2e/kWh`).
    pub unit: String,
    /// Publication label (e.g. `IPCC 2021`, `IEA 2023`).
    pub source: String,
    pub active: bool,
}

/// Grid energy-mix percentages attached to an override.
///
/// Must sum to 100 within [`ENERGY_MIX_TOLERANCE`]; enforced when the
/// override is written, never re-checked at resolution time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergyMix {
    pub renewable_pct: f64,
    pub fossil_pct: f64,
    pub nuclear_pct: f64,
}

impl EnergyMix {
    pub fn total(&self) -> f64 {
        self.renewable_pct + self.fossil_pct + self.nuclear_pct
    }

    pub fn is_balanced(&self) -> bool {
        (self.total() - 100.0).abs() <= ENERGY_MIX_TOLERANCE
    }
}

/// Project-scoped replacement for one factor key. Shadows the global
/// table for the owning project only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FactorOverride {
    pub project_id: ProjectId,
    pub category: FactorCategory,
    pub key: String,
    pub value: f64,
    pub unit: String,
    /// Why the override exists (supplier contract, on-site metering, ...).
    pub source: String,
    pub energy_mix: Option<EnergyMix>,
    pub active: bool,
}
