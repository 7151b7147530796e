//! Activity records and their classification enums.
//!
//! An [`Activity`] is one recorded business activity (fuel burned,
//! electricity purchased, goods bought, ...). Activities arrive from the
//! import boundary already normalized to this shape; the engine never
//! sees raw spreadsheet rows.

use serde::{Deserialize, Serialize};

use crate::{ActivityId, ProjectId};

/// GHG Protocol emission scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Scope1,
    Scope2,
    Scope3,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scope1 => "scope1",
            Self::Scope2 => "scope2",
            Self::Scope3 => "scope3",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scope1" => Some(Self::Scope1),
            "scope2" => Some(Self::Scope2),
            "scope3" => Some(Self::Scope3),
            _ => None,
        }
    }
}

/// The 15 GHG Protocol scope-3 value-chain categories.
///
/// Stored by numeric code (1-15), displayed by label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope3Category {
    PurchasedGoodsAndServices,
    CapitalGoods,
    FuelAndEnergyRelated,
    UpstreamTransport,
    WasteGenerated,
    BusinessTravel,
    EmployeeCommuting,
    UpstreamLeasedAssets,
    DownstreamTransport,
    ProcessingOfSoldProducts,
    UseOfSoldProducts,
    EndOfLifeTreatment,
    DownstreamLeasedAssets,
    Franchises,
    Investments,
}

impl Scope3Category {
    /// GHG Protocol category number (1-15).
    pub fn code(self) -> u8 {
        match self {
            Self::PurchasedGoodsAndServices => 1,
            Self::CapitalGoods => 2,
            Self::FuelAndEnergyRelated => 3,
            Self::UpstreamTransport => 4,
            Self::WasteGenerated => 5,
            Self::BusinessTravel => 6,
            Self::EmployeeCommuting => 7,
            Self::UpstreamLeasedAssets => 8,
            Self::DownstreamTransport => 9,
            Self::ProcessingOfSoldProducts => 10,
            Self::UseOfSoldProducts => 11,
            Self::EndOfLifeTreatment => 12,
            Self::DownstreamLeasedAssets => 13,
            Self::Franchises => 14,
            Self::Investments => 15,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::PurchasedGoodsAndServices),
            2 => Some(Self::CapitalGoods),
            3 => Some(Self::FuelAndEnergyRelated),
            4 => Some(Self::UpstreamTransport),
            5 => Some(Self::WasteGenerated),
            6 => Some(Self::BusinessTravel),
            7 => Some(Self::EmployeeCommuting),
            8 => Some(Self::UpstreamLeasedAssets),
            9 => Some(Self::DownstreamTransport),
            10 => Some(Self::ProcessingOfSoldProducts),
            11 => Some(Self::UseOfSoldProducts),
            12 => Some(Self::EndOfLifeTreatment),
            13 => Some(Self::DownstreamLeasedAssets),
            14 => Some(Self::Franchises),
            15 => Some(Self::Investments),
            _ => None,
        }
    }

    /// Snake_case label used in hotspot groupings and report payloads.
    pub fn label(self) -> &'static str {
        match self {
            Self::PurchasedGoodsAndServices => "purchased_goods_and_services",
            Self::CapitalGoods => "capital_goods",
            Self::FuelAndEnergyRelated => "fuel_and_energy_related",
            Self::UpstreamTransport => "upstream_transport",
            Self::WasteGenerated => "waste_generated",
            Self::BusinessTravel => "business_travel",
            Self::EmployeeCommuting => "employee_commuting",
            Self::UpstreamLeasedAssets => "upstream_leased_assets",
            Self::DownstreamTransport => "downstream_transport",
            Self::ProcessingOfSoldProducts => "processing_of_sold_products",
            Self::UseOfSoldProducts => "use_of_sold_products",
            Self::EndOfLifeTreatment => "end_of_life_treatment",
            Self::DownstreamLeasedAssets => "downstream_leased_assets",
            Self::Franchises => "franchises",
            Self::Investments => "investments",
        }
    }
}

/// Activity type. The importing boundary maps all accepted source
/// spellings onto exactly these variants; the engine dispatches its
/// calculation formulas on this enum alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    StationaryCombustion,
    MobileCombustion,
    PurchasedElectricity,
    PurchasedHeatSteam,
    TransportDistribution,
    PurchasedGoods,
    PrecursorMaterial,
    WasteTreatment,
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StationaryCombustion => "stationary_combustion",
            Self::MobileCombustion => "mobile_combustion",
            Self::PurchasedElectricity => "purchased_electricity",
            Self::PurchasedHeatSteam => "purchased_heat_steam",
            Self::TransportDistribution => "transport_distribution",
            Self::PurchasedGoods => "purchased_goods",
            Self::PrecursorMaterial => "precursor_material",
            Self::WasteTreatment => "waste_treatment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stationary_combustion" => Some(Self::StationaryCombustion),
            "mobile_combustion" => Some(Self::MobileCombustion),
            "purchased_electricity" => Some(Self::PurchasedElectricity),
            "purchased_heat_steam" => Some(Self::PurchasedHeatSteam),
            "transport_distribution" => Some(Self::TransportDistribution),
            "purchased_goods" => Some(Self::PurchasedGoods),
            "precursor_material" => Some(Self::PrecursorMaterial),
            "waste_treatment" => Some(Self::WasteTreatment),
            _ => None,
        }
    }
}

/// Calculation method precision grade (GHG Protocol tiers).
///
/// Canonical three-value enumeration. Source systems spell these
/// inconsistently (`tier2plus`, `tier3`, ...); the boundary normalizes
/// before the engine is involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierLevel {
    Tier1,
    Tier2,
    Tier2Plus,
}

impl TierLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tier1 => "tier1",
            Self::Tier2 => "tier2",
            Self::Tier2Plus => "tier2_plus",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tier1" => Some(Self::Tier1),
            "tier2" => Some(Self::Tier2),
            "tier2_plus" => Some(Self::Tier2Plus),
            _ => None,
        }
    }
}

/// Value-chain direction of an activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierDirection {
    Upstream,
    Downstream,
    Both,
}

impl TierDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upstream => "upstream",
            Self::Downstream => "downstream",
            Self::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upstream" => Some(Self::Upstream),
            "downstream" => Some(Self::Downstream),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Per-activity data-quality grade, weighted into the project score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQualityTier {
    High,
    Medium,
    Low,
}

impl DataQualityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Lifecycle state of an activity's calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStatus {
    Pending,
    Calculated,
    Error,
}

impl CalculationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Calculated => "calculated",
            Self::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "calculated" => Some(Self::Calculated),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// One recorded business activity.
///
/// Invariants: `quantity > 0` and finite; `scope3_category` is `Some`
/// exactly when `scope == Scope3`. Violations are per-row calculation
/// errors, never batch aborts. Activities are soft-retired via
/// `retired`, never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub project_id: ProjectId,
    /// Display name, also the deterministic tie-break key in hotspot
    /// ranking.
    pub name: String,
    pub scope: Scope,
    pub scope3_category: Option<Scope3Category>,
    pub activity_type: ActivityType,
    /// Activity quantity in `unit` (litres, kWh, tonnes, ...).
    pub quantity: f64,
    pub unit: String,
    /// Reporting year, also the factor-resolution year.
    pub year: u16,
    /// Grid/country key for electricity and heat.
    pub country: Option<String>,
    /// Material key for purchased goods / precursors.
    pub material: Option<String>,
    /// Production route qualifier for material factors (e.g. `bf_bof`).
    pub production_route: Option<String>,
    /// Fuel key for combustion, or transport mode key for
    /// transport/distribution rows.
    pub fuel_type: Option<String>,
    /// Transport or mobile-combustion distance in km.
    pub distance_km: Option<f64>,
    /// Fuel efficiency (km per unit fuel) when distance is recorded
    /// instead of fuel quantity.
    pub fuel_efficiency: Option<f64>,
    /// Market-based supplier factor (kgCO2e/kWh). Always an explicit
    /// input; never resolved from the grid table.
    pub supplier_factor: Option<f64>,
    pub tier_level: TierLevel,
    pub tier_direction: TierDirection,
    /// Provenance tag for the recorded data (invoice, meter, estimate).
    pub data_source: String,
    pub data_quality: DataQualityTier,
    pub status: CalculationStatus,
    /// Human-readable cause of the last failed calculation.
    pub error_message: Option<String>,
    pub retired: bool,
}

impl Activity {
    /// Check the structural invariants. Returns the human-readable cause
    /// on violation; callers wrap it into their per-row error type.
    pub fn validate(&self) -> Result<(), String> {
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(format!(
                "quantity must be a positive finite number, got {}",
                self.quantity
            ));
        }
        if self.unit.trim().is_empty() {
            return Err("unit must be present".to_string());
        }
        match (self.scope, &self.scope3_category) {
            (Scope::Scope3, None) => {
                Err("scope3 activity requires a scope3 category".to_string())
            }
            (Scope::Scope1 | Scope::Scope2, Some(_)) => Err(format!(
                "{} activity must not carry a scope3 category",
                self.scope.as_str()
            )),
            _ => Ok(()),
        }
    }
}
