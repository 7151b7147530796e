//! Report assembly: aggregate → standard-shaped payload.

use std::collections::BTreeMap;

use cinder_standards::requirements;
use cinder_types::{
    AggregateResult, Report, ReportStatus, Scope3Category, StandardId,
};
use serde_json::{json, Value};

/// Project metadata supplied by the caller at assembly time.
///
/// `extra` carries values for standard-specific fields the engine cannot
/// derive from an aggregate (installation ids, transition plans, ...),
/// keyed by the standard's field names.
#[derive(Clone, Debug, Default)]
pub struct ReportContext {
    pub organization_name: Option<String>,
    pub reporting_period: Option<String>,
    pub deadline: Option<u64>,
    pub extra: BTreeMap<String, Value>,
}

/// Assemble a draft report for one standard.
///
/// Every field declared by the standard that resolves to a value lands
/// in the payload under the standard's exact field name. Required fields
/// with no value are listed in `missing_fields` and flagged via
/// `incomplete` — a soft outcome, not an error; the caller decides
/// whether to complete or proceed.
pub fn assemble(
    report_id: &str,
    aggregate: &AggregateResult,
    context: &ReportContext,
    standard: StandardId,
    now: u64,
) -> Report {
    let req = requirements(standard);
    let mut payload = BTreeMap::new();
    let mut missing = Vec::new();

    for field in req.required_fields.iter().chain(req.optional_fields) {
        match field_value(field, aggregate, context) {
            Some(value) => {
                payload.insert((*field).to_string(), value);
            }
            None => {
                if req.required_fields.contains(field) {
                    missing.push((*field).to_string());
                }
            }
        }
    }

    missing.sort();
    let incomplete = !missing.is_empty();

    if incomplete {
        tracing::debug!(
            report = report_id,
            standard = standard.as_str(),
            missing = missing.len(),
            "report assembled incomplete"
        );
    }

    Report {
        id: report_id.to_string(),
        project_id: aggregate.project_id.clone(),
        standard,
        payload,
        missing_fields: missing,
        incomplete,
        status: ReportStatus::Draft,
        deadline: context.deadline,
        generated_at: now,
    }
}

/// Resolve one field name to a value, if the engine has one.
fn field_value(field: &str, aggregate: &AggregateResult, context: &ReportContext) -> Option<Value> {
    let totals = &aggregate.scope_totals;
    match field {
        "organization_name" => context.organization_name.clone().map(Value::from),
        "reporting_period" => context.reporting_period.clone().map(Value::from),

        "scope1_emissions" | "direct_emissions" => Some(json!(totals.scope1_kg)),
        "scope2_emissions" | "indirect_emissions" => Some(json!(totals.scope2_kg)),
        "scope3_emissions" => Some(json!(totals.scope3_kg)),
        "total_emissions" => Some(json!(aggregate.total_co2e_kg)),

        "scope3_categories" => {
            let map: BTreeMap<&str, f64> = aggregate
                .category_totals
                .iter()
                .map(|c| (c.category.label(), c.co2e_kg))
                .collect();
            Some(json!(map))
        }

        // Embedded emissions of precursor materials (scope-3 category 1).
        "precursor_emissions" => aggregate
            .category_totals
            .iter()
            .find(|c| c.category == Scope3Category::PurchasedGoodsAndServices)
            .map(|c| json!(c.co2e_kg)),

        "intensity_metric" | "product_intensity" | "ghg_intensity" => aggregate
            .intensity
            .as_ref()
            .map(|i| json!(i.co2e_kg_per_unit)),
        "production_quantity" => aggregate
            .intensity
            .as_ref()
            .map(|i| json!(i.production_quantity)),

        // Standard-specific fields come from the caller.
        other => context.extra.get(other).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use cinder_types::{AggregateKind, CategoryTotal, Intensity, ScopeTotals};

    use super::*;

    fn aggregate_fixture() -> AggregateResult {
        AggregateResult {
            project_id: "proj-1".into(),
            kind: AggregateKind::Cfo,
            scope_totals: ScopeTotals {
                scope1_kg: 100.0,
                scope2_kg: 200.0,
                scope3_kg: 300.0,
            },
            category_totals: vec![CategoryTotal {
                category: Scope3Category::PurchasedGoodsAndServices,
                co2e_kg: 300.0,
            }],
            total_co2e_kg: 600.0,
            intensity: None,
            computed_at: 0,
        }
    }

    fn context() -> ReportContext {
        ReportContext {
            organization_name: Some("Acme Steel".into()),
            reporting_period: Some("2024".into()),
            deadline: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_complete_ghg_protocol_report() {
        let mut ctx = context();
        ctx.extra
            .insert("consolidation_approach".into(), json!("operational_control"));

        let report = assemble("rep-1", &aggregate_fixture(), &ctx, StandardId::GhgProtocol, 9);
        assert!(!report.incomplete);
        assert!(report.missing_fields.is_empty());
        assert_eq!(report.status, ReportStatus::Draft);
        assert_eq!(report.payload["total_emissions"], json!(600.0));
        assert_eq!(report.payload["scope1_emissions"], json!(100.0));
        assert_eq!(
            report.payload["scope3_categories"]["purchased_goods_and_services"],
            json!(300.0)
        );
        assert_eq!(report.generated_at, 9);
    }

    #[test]
    fn test_missing_required_field_is_soft() {
        // No consolidation_approach supplied.
        let report = assemble(
            "rep-1",
            &aggregate_fixture(),
            &context(),
            StandardId::GhgProtocol,
            0,
        );
        assert!(report.incomplete);
        assert_eq!(report.missing_fields, vec!["consolidation_approach"]);
        // Resolved fields are still present.
        assert_eq!(report.payload["total_emissions"], json!(600.0));
    }

    #[test]
    fn test_cbam_field_names() {
        let mut ctx = context();
        for (field, value) in [
            ("installation_id", json!("INST-0042")),
            ("goods_category", json!("iron_steel")),
            ("cn_code", json!("7208 51")),
            ("country_of_origin", json!("KR")),
        ] {
            ctx.extra.insert(field.into(), value);
        }

        let report = assemble("rep-1", &aggregate_fixture(), &ctx, StandardId::Cbam, 0);
        // CBAM names scopes 1/2 direct/indirect.
        assert_eq!(report.payload["direct_emissions"], json!(100.0));
        assert_eq!(report.payload["indirect_emissions"], json!(200.0));
        assert_eq!(report.payload["precursor_emissions"], json!(300.0));
        // production_quantity needs a CFP intensity; still missing.
        assert!(report
            .missing_fields
            .contains(&"production_quantity".to_string()));
    }

    #[test]
    fn test_intensity_fields_from_cfp() {
        let mut agg = aggregate_fixture();
        agg.kind = AggregateKind::Cfp;
        agg.intensity = Some(Intensity {
            co2e_kg_per_unit: 0.5,
            production_quantity: 1200.0,
            production_unit: "tonne".into(),
        });

        let mut ctx = context();
        for (field, value) in [
            ("product_name", json!("hot-rolled coil")),
            ("functional_unit", json!("1 tonne")),
            ("system_boundary", json!("cradle_to_gate")),
        ] {
            ctx.extra.insert(field.into(), value);
        }

        let report = assemble("rep-1", &agg, &ctx, StandardId::Iso14067, 0);
        assert!(!report.incomplete, "missing: {:?}", report.missing_fields);
        assert_eq!(report.payload["product_intensity"], json!(0.5));
        assert_eq!(report.payload["production_quantity"], json!(1200.0));
    }

    #[test]
    fn test_missing_fields_sorted() {
        let report = assemble(
            "rep-1",
            &aggregate_fixture(),
            &ReportContext::default(),
            StandardId::Cbam,
            0,
        );
        let mut sorted = report.missing_fields.clone();
        sorted.sort();
        assert_eq!(report.missing_fields, sorted);
    }

    #[test]
    fn test_deadline_carried_through() {
        let mut ctx = context();
        ctx.deadline = Some(1_750_000_000);
        let report = assemble("rep-1", &aggregate_fixture(), &ctx, StandardId::KEsg, 0);
        assert_eq!(report.deadline, Some(1_750_000_000));
    }
}
