//! Store trait implementations over [`Db`].
//!
//! The engine crates talk to `FactorStore`, `ActivityStore`, and
//! `ReportStore`; this module wires those traits to the query layer so
//! one `Db` handle serves the whole pipeline.

use cinder_calc::ActivityStore;
use cinder_factors::FactorStore;
use cinder_report::ReportStore;
use cinder_types::{
    Activity, ActivityId, AggregateKind, AggregateResult, CalculationResult, CalculationStatus,
    EmissionFactor, FactorCategory, FactorOverride, Report, ReportId, ReportStatus, Signature,
    SignatureId, SignatureStatus, StoreError,
};

use crate::{queries, Db, DbError, Result};

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(what) => StoreError::NotFound(what),
            DbError::Constraint(what) => StoreError::Constraint(what),
            DbError::Serialization(what) => StoreError::Serialization(what),
            DbError::Sqlite(rusqlite::Error::SqliteFailure(err, msg))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Constraint(msg.unwrap_or_else(|| err.to_string()))
            }
            other => StoreError::Backend(other.to_string()),
        }
    }
}

impl FactorStore for Db {
    fn active_factor(
        &self,
        category: FactorCategory,
        key: &str,
        year: u16,
    ) -> std::result::Result<Option<EmissionFactor>, StoreError> {
        Ok(queries::factors::active(self.conn(), category, key, year)?)
    }

    fn override_for(
        &self,
        project_id: &str,
        category: FactorCategory,
        key: &str,
    ) -> std::result::Result<Option<FactorOverride>, StoreError> {
        Ok(queries::factors::override_for(
            self.conn(),
            project_id,
            category,
            key,
        )?)
    }

    fn historical_factors(
        &self,
        category: FactorCategory,
        key: &str,
    ) -> std::result::Result<Vec<EmissionFactor>, StoreError> {
        Ok(queries::factors::historical(self.conn(), category, key)?)
    }

    fn insert_factor(&self, factor: &EmissionFactor) -> std::result::Result<(), StoreError> {
        Ok(queries::factors::insert(self.conn(), factor)?)
    }
}

impl ActivityStore for Db {
    fn activities(
        &self,
        project_id: &str,
        status: Option<CalculationStatus>,
    ) -> std::result::Result<Vec<Activity>, StoreError> {
        Ok(queries::activities::list(self.conn(), project_id, status)?)
    }

    fn activity(&self, id: &ActivityId) -> std::result::Result<Activity, StoreError> {
        Ok(queries::activities::get(self.conn(), id)?)
    }

    fn save_result(&self, result: &CalculationResult) -> std::result::Result<(), StoreError> {
        queries::results::upsert(self.conn(), result)?;
        queries::activities::mark_calculated(self.conn(), &result.activity_id)?;
        Ok(())
    }

    fn mark_error(
        &self,
        id: &ActivityId,
        message: &str,
        _now: u64,
    ) -> std::result::Result<(), StoreError> {
        queries::results::delete(self.conn(), id)?;
        queries::activities::mark_error(self.conn(), id, message)?;
        Ok(())
    }

    fn results(&self, project_id: &str) -> std::result::Result<Vec<CalculationResult>, StoreError> {
        Ok(queries::results::list(self.conn(), project_id)?)
    }
}

impl ReportStore for Db {
    fn save_report(&self, report: &Report) -> std::result::Result<(), StoreError> {
        Ok(queries::reports::upsert(self.conn(), report)?)
    }

    fn report(&self, id: &ReportId) -> std::result::Result<Report, StoreError> {
        Ok(queries::reports::get(self.conn(), id)?)
    }

    fn set_report_status(
        &self,
        id: &ReportId,
        status: ReportStatus,
    ) -> std::result::Result<(), StoreError> {
        Ok(queries::reports::set_status(self.conn(), id, status)?)
    }

    fn save_signature(&self, signature: &Signature) -> std::result::Result<(), StoreError> {
        Ok(queries::signatures::insert(self.conn(), signature)?)
    }

    fn signature(&self, id: &SignatureId) -> std::result::Result<Signature, StoreError> {
        Ok(queries::signatures::get(self.conn(), id)?)
    }

    fn signatures(&self, report_id: &ReportId) -> std::result::Result<Vec<Signature>, StoreError> {
        Ok(queries::signatures::list(self.conn(), report_id)?)
    }

    fn set_signature_status(
        &self,
        id: &SignatureId,
        status: SignatureStatus,
    ) -> std::result::Result<(), StoreError> {
        Ok(queries::signatures::set_status(self.conn(), id, status)?)
    }
}

impl Db {
    /// Insert or replace an activity.
    pub fn insert_activity(&self, activity: &Activity) -> Result<()> {
        queries::activities::upsert(self.conn(), activity)
    }

    /// Soft-retire an activity.
    pub fn retire_activity(&self, id: &str) -> Result<()> {
        queries::activities::retire(self.conn(), id)
    }

    /// Write a project factor override. Invalid overrides (non-positive
    /// value, unbalanced energy mix) are rejected here, at write time;
    /// resolution trusts what is stored.
    pub fn insert_override(&self, ov: &FactorOverride) -> Result<()> {
        cinder_factors::validate_override(ov)
            .map_err(|e| DbError::Constraint(e.to_string()))?;
        queries::factors::upsert_override(self.conn(), ov)
    }

    /// Persist a footprint snapshot, replacing any prior one of the same
    /// kind.
    pub fn save_aggregate(&self, aggregate: &AggregateResult) -> Result<()> {
        queries::aggregates::upsert(self.conn(), aggregate)
    }

    /// The stored footprint snapshot for (project, kind), if any.
    pub fn aggregate(
        &self,
        project_id: &str,
        kind: AggregateKind,
    ) -> Result<Option<AggregateResult>> {
        queries::aggregates::get(self.conn(), project_id, kind)
    }
}
