//! The aggregation algorithm.

use std::collections::BTreeMap;

use cinder_types::{
    Activity, AggregateKind, AggregateResult, CalculationResult, CalculationStatus,
    CategoryTotal, Intensity, ProductionContext, Scope, Scope3Category, ScopeTotals,
};

use crate::{AggregateError, Result};

/// Aggregate a project's calculated results into a footprint.
///
/// Only activities with status `calculated`, a successful result, and no
/// retire flag contribute. Scope totals are sums of the contributing
/// results; the grand total is the sum of scope totals; scope-3
/// contributions are additionally sliced per category, so the category
/// subtotals sum to the scope-3 total by construction.
///
/// CFP aggregation divides the grand total by the production quantity to
/// report a per-unit intensity alongside the absolute totals.
///
/// # Errors
///
/// - [`AggregateError::MissingProductionContext`] for CFP without a context
/// - [`AggregateError::InvalidProductionQuantity`] for a non-positive one
pub fn aggregate(
    project_id: &str,
    activities: &[Activity],
    results: &[CalculationResult],
    kind: AggregateKind,
    production: Option<&ProductionContext>,
    now: u64,
) -> Result<AggregateResult> {
    let mut totals = ScopeTotals::default();
    let mut categories: BTreeMap<Scope3Category, f64> = BTreeMap::new();

    for activity in activities {
        if activity.retired || activity.status != CalculationStatus::Calculated {
            continue;
        }
        let Some(result) = results
            .iter()
            .find(|r| r.activity_id == activity.id && r.is_success())
        else {
            // Uncalculated rows are excluded, never treated as zero.
            continue;
        };

        match activity.scope {
            Scope::Scope1 => totals.scope1_kg += result.co2e_kg,
            Scope::Scope2 => totals.scope2_kg += result.co2e_kg,
            Scope::Scope3 => {
                totals.scope3_kg += result.co2e_kg;
                if let Some(category) = activity.scope3_category {
                    *categories.entry(category).or_insert(0.0) += result.co2e_kg;
                }
            }
        }
    }

    let total_co2e_kg = totals.total();

    let intensity = match kind {
        AggregateKind::Cfo => None,
        AggregateKind::Cfp => {
            let context = production.ok_or(AggregateError::MissingProductionContext)?;
            if !context.quantity.is_finite() || context.quantity <= 0.0 {
                return Err(AggregateError::InvalidProductionQuantity(context.quantity));
            }
            Some(Intensity {
                co2e_kg_per_unit: total_co2e_kg / context.quantity,
                production_quantity: context.quantity,
                production_unit: context.unit.clone(),
            })
        }
    };

    tracing::debug!(
        project = project_id,
        kind = kind.as_str(),
        total_co2e_kg,
        "footprint aggregated"
    );

    Ok(AggregateResult {
        project_id: project_id.to_string(),
        kind,
        scope_totals: totals,
        category_totals: categories
            .into_iter()
            .map(|(category, co2e_kg)| CategoryTotal { category, co2e_kg })
            .collect(),
        total_co2e_kg,
        intensity,
        computed_at: now,
    })
}

#[cfg(test)]
mod tests {
    use cinder_types::{
        ActivityType, DataQualityTier, FactorProvenance, TierDirection, TierLevel,
    };

    use super::*;

    fn activity(id: &str, scope: Scope, category: Option<Scope3Category>) -> Activity {
        Activity {
            id: id.into(),
            project_id: "proj-1".into(),
            name: format!("activity {id}"),
            scope,
            scope3_category: category,
            activity_type: ActivityType::StationaryCombustion,
            quantity: 1.0,
            unit: "unit".into(),
            year: 2024,
            country: None,
            material: None,
            production_route: None,
            fuel_type: Some("natural_gas".into()),
            distance_km: None,
            fuel_efficiency: None,
            supplier_factor: None,
            tier_level: TierLevel::Tier1,
            tier_direction: TierDirection::Upstream,
            data_source: "invoice".into(),
            data_quality: DataQualityTier::Medium,
            status: CalculationStatus::Calculated,
            error_message: None,
            retired: false,
        }
    }

    fn result(id: &str, co2e_kg: f64) -> CalculationResult {
        CalculationResult {
            activity_id: id.into(),
            project_id: "proj-1".into(),
            provenance: FactorProvenance::Standard,
            factor_value: 1.0,
            factor_unit: "kgCO2e/unit".into(),
            factor_source: "test".into(),
            co2e_kg,
            calculated_at: 0,
            error: None,
        }
    }

    fn three_scope_fixture() -> (Vec<Activity>, Vec<CalculationResult>) {
        let activities = vec![
            activity("s1", Scope::Scope1, None),
            activity("s2", Scope::Scope2, None),
            activity("s3a", Scope::Scope3, Some(Scope3Category::UpstreamTransport)),
            activity("s3b", Scope::Scope3, Some(Scope3Category::BusinessTravel)),
        ];
        let results = vec![
            result("s1", 100.0),
            result("s2", 200.0),
            result("s3a", 120.0),
            result("s3b", 180.0),
        ];
        (activities, results)
    }

    #[test]
    fn test_cfo_grand_total_600() {
        let (activities, results) = three_scope_fixture();
        let agg = aggregate("proj-1", &activities, &results, AggregateKind::Cfo, None, 0)
            .expect("aggregate");

        assert!((agg.total_co2e_kg - 600.0).abs() < 1e-9);
        assert!((agg.scope_totals.scope1_kg - 100.0).abs() < 1e-9);
        assert!((agg.scope_totals.scope2_kg - 200.0).abs() < 1e-9);
        assert!((agg.scope_totals.scope3_kg - 300.0).abs() < 1e-9);

        // scope1 share of total = 16.67%
        let share = agg.scope_totals.scope1_kg / agg.total_co2e_kg * 100.0;
        assert!((share - 16.67).abs() < 0.005);
    }

    #[test]
    fn test_category_totals_sum_to_scope3() {
        let (activities, results) = three_scope_fixture();
        let agg = aggregate("proj-1", &activities, &results, AggregateKind::Cfo, None, 0)
            .expect("aggregate");

        let category_sum: f64 = agg.category_totals.iter().map(|c| c.co2e_kg).sum();
        assert!((category_sum - agg.scope_totals.scope3_kg).abs() < 1e-9);
        // Ordered by category code.
        assert_eq!(agg.category_totals[0].category, Scope3Category::UpstreamTransport);
        assert_eq!(agg.category_totals[1].category, Scope3Category::BusinessTravel);
    }

    #[test]
    fn test_idempotent() {
        let (activities, results) = three_scope_fixture();
        let a = aggregate("proj-1", &activities, &results, AggregateKind::Cfo, None, 0)
            .expect("first");
        let b = aggregate("proj-1", &activities, &results, AggregateKind::Cfo, None, 0)
            .expect("second");
        assert!((a.total_co2e_kg - b.total_co2e_kg).abs() < 1e-9);
        assert_eq!(a.category_totals.len(), b.category_totals.len());
    }

    #[test]
    fn test_cfp_intensity() {
        let (activities, results) = three_scope_fixture();
        let production = ProductionContext {
            quantity: 1200.0,
            unit: "tonne".into(),
        };
        let agg = aggregate(
            "proj-1",
            &activities,
            &results,
            AggregateKind::Cfp,
            Some(&production),
            0,
        )
        .expect("aggregate");

        let intensity = agg.intensity.expect("intensity");
        assert!((intensity.co2e_kg_per_unit - 0.5).abs() < 1e-9);
        assert_eq!(intensity.production_unit, "tonne");
        // Absolute totals are still reported.
        assert!((agg.total_co2e_kg - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_cfp_requires_production_context() {
        let (activities, results) = three_scope_fixture();
        let err = aggregate("proj-1", &activities, &results, AggregateKind::Cfp, None, 0)
            .expect_err("missing context");
        assert!(matches!(err, AggregateError::MissingProductionContext));
    }

    #[test]
    fn test_cfp_rejects_zero_production() {
        let (activities, results) = three_scope_fixture();
        let production = ProductionContext {
            quantity: 0.0,
            unit: "tonne".into(),
        };
        assert!(aggregate(
            "proj-1",
            &activities,
            &results,
            AggregateKind::Cfp,
            Some(&production),
            0
        )
        .is_err());
    }

    #[test]
    fn test_uncalculated_and_retired_excluded() {
        let (mut activities, mut results) = three_scope_fixture();

        // A pending activity with no result.
        let mut pending = activity("p1", Scope::Scope1, None);
        pending.status = CalculationStatus::Pending;
        activities.push(pending);

        // A retired activity that still has a stale result row.
        let mut retired = activity("r1", Scope::Scope1, None);
        retired.retired = true;
        activities.push(retired);
        results.push(result("r1", 9999.0));

        // An errored activity with a failed result row.
        let mut errored = activity("e1", Scope::Scope2, None);
        errored.status = CalculationStatus::Error;
        activities.push(errored);
        let mut failed = result("e1", 0.0);
        failed.error = Some("no factor".into());
        results.push(failed);

        let agg = aggregate("proj-1", &activities, &results, AggregateKind::Cfo, None, 0)
            .expect("aggregate");
        assert!((agg.total_co2e_kg - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_project_is_zero() {
        let agg = aggregate("proj-1", &[], &[], AggregateKind::Cfo, None, 0).expect("aggregate");
        assert_eq!(agg.total_co2e_kg, 0.0);
        assert!(agg.category_totals.is_empty());
    }
}
