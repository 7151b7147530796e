//! Per-activity-type calculation formulas.
//!
//! Every formula outputs a single CO2e scalar in kilograms. No unit
//! conversion happens beyond what the factor's declared unit implies;
//! unit normalization is an import-boundary responsibility.

use cinder_factors::{resolve, ExternalLookup, FactorStore, ResolvedFactor};
use cinder_types::{
    Activity, ActivityType, CalculationResult, FactorCategory, FactorProvenance,
};

use crate::{CalcError, Result};

/// Calculate one activity into a [`CalculationResult`].
///
/// Validation runs first and produces [`CalcError::Validation`] on any
/// malformed input; factor resolution failures surface as
/// [`CalcError::Factor`]. Callers (the batch runner) turn both into
/// per-row errors.
pub fn calculate(
    factors: &dyn FactorStore,
    external: Option<&dyn ExternalLookup>,
    activity: &Activity,
    now: u64,
) -> Result<CalculationResult> {
    activity.validate().map_err(CalcError::Validation)?;

    let (factor, co2e_kg) = match activity.activity_type {
        ActivityType::StationaryCombustion => {
            let fuel = require(activity, &activity.fuel_type, "fuel_type")?;
            let factor = resolve_for(factors, external, activity, FactorCategory::Fuel, fuel)?;
            let co2e = activity.quantity * factor.value;
            (factor, co2e)
        }
        ActivityType::MobileCombustion => {
            let fuel = require(activity, &activity.fuel_type, "fuel_type")?;
            let factor = resolve_for(factors, external, activity, FactorCategory::Fuel, fuel)?;
            // When an efficiency is recorded instead of raw fuel
            // quantity, fuel used = distance / efficiency.
            let fuel_quantity = match activity.fuel_efficiency {
                Some(efficiency) => {
                    let distance = require_positive(
                        activity.distance_km,
                        "distance_km (required with fuel_efficiency)",
                    )?;
                    let efficiency = require_positive(Some(efficiency), "fuel_efficiency")?;
                    distance / efficiency
                }
                None => activity.quantity,
            };
            let co2e = fuel_quantity * factor.value;
            (factor, co2e)
        }
        ActivityType::PurchasedElectricity => match activity.supplier_factor {
            // Market-based: the supplier factor is always an explicit
            // input, never resolved from the grid table.
            Some(supplier) => {
                let supplier = require_positive(Some(supplier), "supplier_factor")?;
                let factor = ResolvedFactor {
                    value: supplier,
                    unit: "kgCO2e/kWh".to_string(),
                    source: "supplier_specific".to_string(),
                    provenance: FactorProvenance::Override,
                    year: activity.year,
                };
                let co2e = activity.quantity * supplier;
                (factor, co2e)
            }
            // Location-based: grid factor for (country, year).
            None => {
                let country = require(activity, &activity.country, "country")?;
                let factor =
                    resolve_for(factors, external, activity, FactorCategory::Grid, country)?;
                let co2e = activity.quantity * factor.value;
                (factor, co2e)
            }
        },
        ActivityType::PurchasedHeatSteam => {
            let country = require(activity, &activity.country, "country")?;
            let factor = resolve_for(factors, external, activity, FactorCategory::Grid, country)?;
            let co2e = activity.quantity * factor.value;
            (factor, co2e)
        }
        ActivityType::TransportDistribution => {
            let mode = require(activity, &activity.fuel_type, "fuel_type (transport mode)")?;
            let distance = require_positive(activity.distance_km, "distance_km")?;
            let factor = resolve_for(factors, external, activity, FactorCategory::Fuel, mode)?;
            // weight × distance × mode factor
            let co2e = activity.quantity * distance * factor.value;
            (factor, co2e)
        }
        ActivityType::PurchasedGoods => {
            let key = material_key(activity)?;
            let factor =
                resolve_for(factors, external, activity, FactorCategory::Material, &key)?;
            let co2e = activity.quantity * factor.value;
            (factor, co2e)
        }
        ActivityType::PrecursorMaterial => {
            let key = material_key(activity)?;
            let factor =
                resolve_for(factors, external, activity, FactorCategory::Precursor, &key)?;
            let co2e = activity.quantity * factor.value;
            (factor, co2e)
        }
        ActivityType::WasteTreatment => {
            let method = require(activity, &activity.material, "material (treatment method)")?;
            let factor =
                resolve_for(factors, external, activity, FactorCategory::Material, method)?;
            let co2e = activity.quantity * factor.value;
            (factor, co2e)
        }
    };

    tracing::trace!(
        activity = %activity.id,
        activity_type = %activity.activity_type,
        co2e_kg,
        provenance = factor.provenance.as_str(),
        "activity calculated"
    );

    Ok(CalculationResult {
        activity_id: activity.id.clone(),
        project_id: activity.project_id.clone(),
        provenance: factor.provenance,
        factor_value: factor.value,
        factor_unit: factor.unit,
        factor_source: factor.source,
        co2e_kg,
        calculated_at: now,
        error: None,
    })
}

/// Material factor key: material, with the production route appended
/// when recorded (`steel:bf_bof`).
fn material_key(activity: &Activity) -> Result<String> {
    let material = require(activity, &activity.material, "material")?;
    Ok(match &activity.production_route {
        Some(route) if !route.trim().is_empty() => format!("{material}:{route}"),
        _ => material.to_string(),
    })
}

fn resolve_for(
    factors: &dyn FactorStore,
    external: Option<&dyn ExternalLookup>,
    activity: &Activity,
    category: FactorCategory,
    key: &str,
) -> Result<ResolvedFactor> {
    Ok(resolve(
        factors,
        external,
        category,
        key,
        activity.year,
        Some(&activity.project_id),
    )?)
}

fn require<'a>(
    activity: &Activity,
    field: &'a Option<String>,
    name: &str,
) -> Result<&'a str> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CalcError::Validation(format!(
            "{} activity requires {name}",
            activity.activity_type
        ))),
    }
}

fn require_positive(value: Option<f64>, name: &str) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => Err(CalcError::Validation(format!(
            "{name} must be a positive finite number, got {v}"
        ))),
        None => Err(CalcError::Validation(format!("{name} is required"))),
    }
}
