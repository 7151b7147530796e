//! # cinder-engine
//!
//! The facade over the calculation pipeline. One [`Engine`] borrows a
//! [`Db`] handle (and an optional external factor lookup) and exposes
//! the full operation set: per-activity and batch calculation, footprint
//! aggregation, hotspot and data-quality analysis, standard requirement
//! lookups and overlap, report assembly, and the signature gate.
//!
//! Concurrency discipline is the caller's: at most one in-flight batch
//! or aggregation per project id. The engine does not lock.

use cinder_aggregate::AggregateError;
use cinder_analysis::{DataQualityScore, Hotspot};
use cinder_calc::{ActivityStore, BatchOutcome, CalcError};
use cinder_db::{Db, DbError};
use cinder_factors::ExternalLookup;
use cinder_report::{ReportContext, ReportError, ReportStore};
use cinder_standards::{StandardError, StandardOverlap, StandardRequirements};
use cinder_types::{
    AggregateKind, AggregateResult, CalculationResult, ProductionContext, Report, Signature,
    SignerRole, StandardId, StoreError,
};

/// Error types for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Standard(#[from] StandardError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// Report assembly was requested before any aggregate existed.
    #[error("no {kind} aggregate computed for project {project_id}")]
    MissingAggregate {
        project_id: String,
        kind: AggregateKind,
    },
}

/// Convenience result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// The calculation and reporting facade.
pub struct Engine<'a> {
    db: &'a Db,
    external: Option<&'a dyn ExternalLookup>,
}

impl<'a> Engine<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db, external: None }
    }

    /// Attach an external factor lookup, consulted only after the
    /// internal factor tables are exhausted.
    pub fn with_external_lookup(db: &'a Db, external: &'a dyn ExternalLookup) -> Self {
        Self {
            db,
            external: Some(external),
        }
    }

    /// Calculate one activity and persist the outcome.
    ///
    /// A formula or validation failure is persisted on the activity
    /// (status `error`, message retained) before being returned, so the
    /// cause survives for display and retry.
    pub fn calculate_one(&self, activity_id: &str, now: u64) -> Result<CalculationResult> {
        let activity = self.db.activity(&activity_id.to_string())?;
        match cinder_calc::calculate(self.db, self.external, &activity, now) {
            Ok(result) => {
                self.db.save_result(&result)?;
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(activity = activity_id, error = %err, "calculation failed");
                self.db
                    .mark_error(&activity.id, &err.to_string(), now)?;
                Err(err.into())
            }
        }
    }

    /// Calculate all of a project's activities. Per-row failures are
    /// collected in the outcome; only store failures propagate.
    pub fn calculate_all(
        &self,
        project_id: &str,
        pending_only: bool,
        now: u64,
    ) -> Result<BatchOutcome> {
        Ok(cinder_calc::calculate_all(
            self.db,
            self.db,
            self.external,
            project_id,
            pending_only,
            now,
        )?)
    }

    /// Aggregate the project's calculated results into a footprint and
    /// persist the snapshot, replacing any prior one of the same kind.
    pub fn totals(
        &self,
        project_id: &str,
        kind: AggregateKind,
        production: Option<&ProductionContext>,
        now: u64,
    ) -> Result<AggregateResult> {
        let activities = self.db.activities(project_id, None)?;
        let results = self.db.results(project_id)?;
        let aggregate =
            cinder_aggregate::aggregate(project_id, &activities, &results, kind, production, now)?;
        self.db.save_aggregate(&aggregate)?;
        Ok(aggregate)
    }

    /// Emission sources ranked by share of the project total.
    pub fn hotspots(&self, project_id: &str) -> Result<Vec<Hotspot>> {
        let activities = self.db.activities(project_id, None)?;
        let results = self.db.results(project_id)?;
        Ok(cinder_analysis::hotspots(&activities, &results))
    }

    /// The project's emissions-weighted data-quality score. `None` until
    /// something has been calculated.
    pub fn data_quality(&self, project_id: &str) -> Result<Option<DataQualityScore>> {
        let activities = self.db.activities(project_id, None)?;
        let results = self.db.results(project_id)?;
        Ok(cinder_analysis::data_quality(&activities, &results))
    }

    /// Requirement record for a standard named at the string boundary.
    pub fn standard_requirements(&self, standard: &str) -> Result<&'static StandardRequirements> {
        let id = cinder_standards::parse_standard(standard)?;
        Ok(cinder_standards::requirements(id))
    }

    /// Field overlap between two standards named at the string boundary.
    pub fn standard_overlap(&self, a: &str, b: &str) -> Result<StandardOverlap> {
        let a = cinder_standards::parse_standard(a)?;
        let b = cinder_standards::parse_standard(b)?;
        Ok(cinder_standards::overlap(a, b))
    }

    /// Assemble a draft report from the stored aggregate snapshot and
    /// persist it. Missing required fields are a soft outcome on the
    /// report, not an error.
    pub fn assemble_report(
        &self,
        report_id: &str,
        project_id: &str,
        kind: AggregateKind,
        context: &ReportContext,
        standard: StandardId,
        now: u64,
    ) -> Result<Report> {
        let aggregate =
            self.db
                .aggregate(project_id, kind)?
                .ok_or_else(|| EngineError::MissingAggregate {
                    project_id: project_id.to_string(),
                    kind,
                })?;
        let report = cinder_report::assemble(report_id, &aggregate, context, standard, now);
        self.db.save_report(&report)?;
        Ok(report)
    }

    /// Sign a report. Role-gated per the standard's signature policy;
    /// reaching the required valid-signature count completes the report.
    pub fn sign_report(
        &self,
        report_id: &str,
        signer: &str,
        role: SignerRole,
        now: u64,
    ) -> Result<Signature> {
        Ok(cinder_report::sign(self.db, report_id, signer, role, now)?)
    }

    /// Verify every valid signature over a report against its stored
    /// payload. `false` means no valid signature exists or the payload
    /// was edited after signing.
    pub fn verify_signature(&self, report_id: &str) -> Result<bool> {
        Ok(cinder_report::verify(self.db, report_id)?)
    }

    /// Revoke one signature. May demote a completed report back to
    /// pending review.
    pub fn revoke_signature(&self, signature_id: &str) -> Result<()> {
        Ok(cinder_report::revoke(self.db, signature_id)?)
    }
}
