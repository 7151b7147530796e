//! Integration test: product footprint and multi-signature reporting.
//!
//! 1. Calculate a product line and aggregate a CFP with intensity
//! 2. Assemble an ISO 14067 product report from the stored snapshot
//! 3. Walk an ISO 14064 report through its two-signature completion
//! 4. Revoke a signature and watch the report demote

use cinder_db::Db;
use cinder_engine::Engine;
use cinder_factors::FactorStore;
use cinder_report::{ReportContext, ReportStore};
use cinder_types::{
    Activity, ActivityType, AggregateKind, CalculationStatus, DataQualityTier, EmissionFactor,
    FactorCategory, ProductionContext, ReportStatus, Scope, SignatureStatus, SignerRole,
    StandardId, TierDirection, TierLevel,
};
use serde_json::json;

const NOW: u64 = 1_700_000_000;

fn seed_product_line(db: &Db) {
    db.insert_factor(&EmissionFactor {
        category: FactorCategory::Fuel,
        key: "natural_gas".into(),
        year: 2024,
        value: 2.0,
        unit: "kgCO2e/m3".into(),
        source: "IPCC 2021".into(),
        active: true,
    })
    .expect("seed factor");

    db.insert_activity(&Activity {
        id: "act-1".into(),
        project_id: "line-7".into(),
        name: "Furnace".into(),
        scope: Scope::Scope1,
        scope3_category: None,
        activity_type: ActivityType::StationaryCombustion,
        quantity: 500.0,
        unit: "m3".into(),
        year: 2024,
        country: None,
        material: None,
        production_route: None,
        fuel_type: Some("natural_gas".into()),
        distance_km: None,
        fuel_efficiency: None,
        supplier_factor: None,
        tier_level: TierLevel::Tier2Plus,
        tier_direction: TierDirection::Upstream,
        data_source: "meter".into(),
        data_quality: DataQualityTier::High,
        status: CalculationStatus::Pending,
        error_message: None,
        retired: false,
    })
    .expect("insert");
}

#[test]
fn cfp_intensity_flows_into_product_report() {
    let db = Db::open_memory().expect("open db");
    seed_product_line(&db);
    let engine = Engine::new(&db);

    engine.calculate_all("line-7", false, NOW).expect("batch");

    // 500 m3 x 2.0 = 1000 kg over 250 units -> 4 kg/unit.
    let production = ProductionContext {
        quantity: 250.0,
        unit: "unit".into(),
    };
    let aggregate = engine
        .totals("line-7", AggregateKind::Cfp, Some(&production), NOW)
        .expect("aggregate");
    let intensity = aggregate.intensity.as_ref().expect("CFP carries intensity");
    assert!((intensity.co2e_kg_per_unit - 4.0).abs() < 1e-9);

    let context = ReportContext {
        organization_name: Some("Hyundai Forge Co.".into()),
        reporting_period: Some("2024".into()),
        deadline: Some(NOW + 90 * 86_400),
        extra: [
            ("product_name".to_string(), json!("forged crankshaft")),
            ("functional_unit".to_string(), json!("1 unit")),
            ("system_boundary".to_string(), json!("cradle_to_gate")),
        ]
        .into_iter()
        .collect(),
    };
    let report = engine
        .assemble_report(
            "rep-cfp",
            "line-7",
            AggregateKind::Cfp,
            &context,
            StandardId::Iso14067,
            NOW,
        )
        .expect("assemble");

    assert!(!report.incomplete, "missing: {:?}", report.missing_fields);
    let intensity_field = report.payload["product_intensity"].as_f64().expect("number");
    assert!((intensity_field - 4.0).abs() < 1e-9);
    let quantity_field = report.payload["production_quantity"].as_f64().expect("number");
    assert!((quantity_field - 250.0).abs() < 1e-9);
    assert_eq!(report.deadline, Some(NOW + 90 * 86_400));
}

#[test]
fn two_signature_completion_and_revocation_demotion() {
    let db = Db::open_memory().expect("open db");
    seed_product_line(&db);
    let engine = Engine::new(&db);

    engine.calculate_all("line-7", false, NOW).expect("batch");
    engine
        .totals("line-7", AggregateKind::Cfo, None, NOW)
        .expect("aggregate");

    let context = ReportContext {
        organization_name: Some("Hyundai Forge Co.".into()),
        reporting_period: Some("2024".into()),
        deadline: None,
        extra: [
            ("inventory_boundary".to_string(), json!("operational_control")),
            ("uncertainty_assessment".to_string(), json!("qualitative")),
        ]
        .into_iter()
        .collect(),
    };
    engine
        .assemble_report(
            "rep-iso",
            "line-7",
            AggregateKind::Cfo,
            &context,
            StandardId::Iso14064,
            NOW,
        )
        .expect("assemble");

    // Site managers are not in the ISO 14064 authorized list.
    engine
        .sign_report("rep-iso", "K. Lee", SignerRole::SiteManager, NOW + 10)
        .expect_err("unauthorized role");

    engine
        .sign_report("rep-iso", "J. Park", SignerRole::Executive, NOW + 20)
        .expect("first signature");
    assert_eq!(
        db.report(&"rep-iso".to_string()).expect("report").status,
        ReportStatus::Draft,
        "one of two required signatures"
    );

    let auditor_sig = engine
        .sign_report("rep-iso", "S. Choi", SignerRole::Auditor, NOW + 30)
        .expect("second signature");
    assert_eq!(
        db.report(&"rep-iso".to_string()).expect("report").status,
        ReportStatus::Completed
    );
    assert!(engine.verify_signature("rep-iso").expect("verify"));

    // Revoking the auditor drops the count below two.
    engine.revoke_signature(&auditor_sig.id).expect("revoke");
    let report = db.report(&"rep-iso".to_string()).expect("report");
    assert_eq!(report.status, ReportStatus::PendingReview);

    // Nothing was deleted: both signatures remain on record.
    let signatures = db.signatures(&"rep-iso".to_string()).expect("signatures");
    assert_eq!(signatures.len(), 2);
    assert_eq!(
        signatures
            .iter()
            .filter(|s| s.status == SignatureStatus::Revoked)
            .count(),
        1
    );

    // The surviving executive signature still matches the payload.
    assert!(engine.verify_signature("rep-iso").expect("verify"));
}

#[test]
fn incomplete_report_is_a_soft_outcome() {
    let db = Db::open_memory().expect("open db");
    seed_product_line(&db);
    let engine = Engine::new(&db);

    engine.calculate_all("line-7", false, NOW).expect("batch");
    engine
        .totals("line-7", AggregateKind::Cfo, None, NOW)
        .expect("aggregate");

    // No context at all: organization fields cannot resolve.
    let report = engine
        .assemble_report(
            "rep-bare",
            "line-7",
            AggregateKind::Cfo,
            &ReportContext::default(),
            StandardId::KEsg,
            NOW,
        )
        .expect("assembly never hard-fails on missing fields");

    assert!(report.incomplete);
    assert_eq!(
        report.missing_fields,
        vec!["energy_consumption", "organization_name", "reporting_period"]
    );
    // Emission fields resolved from the aggregate regardless.
    assert!(report.payload.contains_key("scope1_emissions"));

    // Signing an incomplete report is a permitted business decision.
    engine
        .sign_report("rep-bare", "J. Park", SignerRole::Executive, NOW + 10)
        .expect("sign incomplete report");
    assert!(engine.verify_signature("rep-bare").expect("verify"));
}
