//! Organization (CFO) and product (CFP) footprint aggregates.

use serde::{Deserialize, Serialize};

use crate::{ProjectId, Scope3Category};

/// Which footprint an aggregate describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    /// Carbon Footprint of Organization.
    Cfo,
    /// Carbon Footprint of Product (carries a per-unit intensity).
    Cfp,
}

impl std::fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AggregateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cfo => "cfo",
            Self::Cfp => "cfp",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cfo" => Some(Self::Cfo),
            "cfp" => Some(Self::Cfp),
            _ => None,
        }
    }
}

/// Per-scope emission totals in kgCO2e.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeTotals {
    pub scope1_kg: f64,
    pub scope2_kg: f64,
    pub scope3_kg: f64,
}

impl ScopeTotals {
    pub fn total(&self) -> f64 {
        self.scope1_kg + self.scope2_kg + self.scope3_kg
    }
}

/// One scope-3 category subtotal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Scope3Category,
    pub co2e_kg: f64,
}

/// Production context required for CFP intensity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductionContext {
    /// Units of product produced in the reporting period.
    pub quantity: f64,
    pub unit: String,
}

/// Per-unit-of-product intensity figure (CFP only).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intensity {
    pub co2e_kg_per_unit: f64,
    pub production_quantity: f64,
    pub production_unit: String,
}

/// A complete footprint aggregate.
///
/// Always recomputed wholesale from the current calculation results;
/// never patched incrementally, so repeated runs cannot drift.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AggregateResult {
    pub project_id: ProjectId,
    pub kind: AggregateKind,
    pub scope_totals: ScopeTotals,
    /// Scope-3 subtotals, ordered by category code.
    pub category_totals: Vec<CategoryTotal>,
    pub total_co2e_kg: f64,
    pub intensity: Option<Intensity>,
    pub computed_at: u64,
}
