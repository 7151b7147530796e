//! Hotspot ranking.

use std::collections::BTreeMap;

use cinder_types::{Activity, CalculationResult, CalculationStatus, Scope};
use serde::{Deserialize, Serialize};

/// One ranked emission source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hotspot {
    /// Group label: the activity type, or the scope-3 category for
    /// scope-3 rows.
    pub source: String,
    pub co2e_kg: f64,
    pub percent_of_total: f64,
}

/// Rank emission sources by their share of the total footprint.
///
/// Calculated results are grouped by activity type (scope-3 rows by
/// category instead), sorted descending by absolute emissions; ties
/// break by source name ascending so the order is deterministic.
/// Percentages across all groups sum to 100 (± float rounding).
pub fn hotspots(activities: &[Activity], results: &[CalculationResult]) -> Vec<Hotspot> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    let mut total = 0.0;

    for activity in activities {
        if activity.retired || activity.status != CalculationStatus::Calculated {
            continue;
        }
        let Some(result) = results
            .iter()
            .find(|r| r.activity_id == activity.id && r.is_success())
        else {
            continue;
        };

        let source = match (activity.scope, activity.scope3_category) {
            (Scope::Scope3, Some(category)) => category.label(),
            _ => activity.activity_type.as_str(),
        };
        *groups.entry(source).or_insert(0.0) += result.co2e_kg;
        total += result.co2e_kg;
    }

    let mut ranked: Vec<Hotspot> = groups
        .into_iter()
        .map(|(source, co2e_kg)| Hotspot {
            source: source.to_string(),
            co2e_kg,
            percent_of_total: if total > 0.0 {
                co2e_kg / total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    // Descending by emissions; the BTreeMap already yields sources in
    // ascending name order, and the stable sort keeps that for ties.
    ranked.sort_by(|a, b| {
        b.co2e_kg
            .partial_cmp(&a.co2e_kg)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    tracing::debug!(groups = ranked.len(), total_kg = total, "hotspots ranked");

    ranked
}

#[cfg(test)]
mod tests {
    use cinder_types::{
        ActivityType, DataQualityTier, FactorProvenance, Scope3Category, TierDirection,
        TierLevel,
    };

    use super::*;

    fn activity(
        id: &str,
        activity_type: ActivityType,
        scope: Scope,
        category: Option<Scope3Category>,
    ) -> Activity {
        Activity {
            id: id.into(),
            project_id: "proj-1".into(),
            name: format!("activity {id}"),
            scope,
            scope3_category: category,
            activity_type,
            quantity: 1.0,
            unit: "unit".into(),
            year: 2024,
            country: None,
            material: None,
            production_route: None,
            fuel_type: None,
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

    #[test]
    fn test_ranking_descending_with_grouping() {
        let activities = vec![
            activity("a1", ActivityType::StationaryCombustion, Scope::Scope1, None),
            activity("a2", ActivityType::StationaryCombustion, Scope::Scope1, None),
            activity("a3", ActivityType::PurchasedElectricity, Scope::Scope2, None),
            activity(
                "a4",
                ActivityType::TransportDistribution,
                Scope::Scope3,
                Some(Scope3Category::UpstreamTransport),
            ),
        ];
        let results = vec![
            result("a1", 100.0),
            result("a2", 50.0),
            result("a3", 400.0),
            result("a4", 250.0),
        ];

        let ranked = hotspots(&activities, &results);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].source, "purchased_electricity");
        assert_eq!(ranked[1].source, "upstream_transport");
        assert_eq!(ranked[2].source, "stationary_combustion");
        assert!((ranked[2].co2e_kg - 150.0).abs() < 1e-9);
        assert!((ranked[0].percent_of_total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let activities = vec![
            activity("a1", ActivityType::StationaryCombustion, Scope::Scope1, None),
            activity("a2", ActivityType::PurchasedElectricity, Scope::Scope2, None),
            activity("a3", ActivityType::MobileCombustion, Scope::Scope1, None),
        ];
        let results = vec![
            result("a1", 33.3),
            result("a2", 123.456),
            result("a3", 0.001),
        ];

        let ranked = hotspots(&activities, &results);
        let sum: f64 = ranked.iter().map(|h| h.percent_of_total).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_break_by_source_name_ascending() {
        let activities = vec![
            activity("a1", ActivityType::WasteTreatment, Scope::Scope1, None),
            activity("a2", ActivityType::MobileCombustion, Scope::Scope1, None),
        ];
        let results = vec![result("a1", 100.0), result("a2", 100.0)];

        let ranked = hotspots(&activities, &results);
        assert_eq!(ranked[0].source, "mobile_combustion");
        assert_eq!(ranked[1].source, "waste_treatment");
    }

    #[test]
    fn test_uncalculated_excluded() {
        let mut pending = activity("p1", ActivityType::StationaryCombustion, Scope::Scope1, None);
        pending.status = CalculationStatus::Pending;
        let activities = vec![
            pending,
            activity("a1", ActivityType::PurchasedElectricity, Scope::Scope2, None),
        ];
        let results = vec![result("a1", 10.0)];

        let ranked = hotspots(&activities, &results);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].percent_of_total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        assert!(hotspots(&[], &[]).is_empty());
    }
}
