//! Activity store collaborator trait.

use cinder_types::{
    Activity, ActivityId, CalculationResult, CalculationStatus, StoreError,
};

/// Read/write access to activities and their calculation results.
///
/// `save_result` and `mark_error` both supersede any prior result for
/// the activity — results are overwritten per run, never appended — and
/// move the activity's status to `calculated` / `error` respectively.
pub trait ActivityStore {
    /// Non-retired activities of a project, optionally filtered by
    /// calculation status.
    fn activities(
        &self,
        project_id: &str,
        status: Option<CalculationStatus>,
    ) -> Result<Vec<Activity>, StoreError>;

    /// Fetch one activity by id.
    fn activity(&self, id: &ActivityId) -> Result<Activity, StoreError>;

    /// Persist a successful result, set status `calculated`, clear any
    /// retained error message.
    fn save_result(&self, result: &CalculationResult) -> Result<(), StoreError>;

    /// Record a failed calculation: status `error`, message retained
    /// verbatim for display and retry, prior result superseded.
    fn mark_error(&self, id: &ActivityId, message: &str, now: u64) -> Result<(), StoreError>;

    /// Current results for a project (successful and failed rows).
    fn results(&self, project_id: &str) -> Result<Vec<CalculationResult>, StoreError>;
}
