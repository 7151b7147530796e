//! Batch calculation over a project's activities.

use cinder_factors::{ExternalLookup, FactorStore};
use cinder_types::{ActivityId, CalculationStatus};
use serde::{Deserialize, Serialize};

use crate::formula::calculate;
use crate::store::ActivityStore;
use crate::Result;

/// One per-row failure inside a batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RowError {
    pub activity_id: ActivityId,
    pub message: String,
}

/// Outcome of a batch run: partial successes plus accumulated per-row
/// errors. Errors are never lost and never abort the batch.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Activities selected for this run.
    pub requested: usize,
    pub calculated: usize,
    pub failed: usize,
    pub errors: Vec<RowError>,
}

/// Calculate all of a project's activities sequentially.
///
/// With `pending_only` set, previously calculated activities are
/// skipped; otherwise every non-retired activity is recalculated and
/// its prior result overwritten. Each result commits as it is produced,
/// so an interrupted batch resumes cleanly on the next call with no
/// double counting.
///
/// Precondition (caller-enforced): at most one in-flight batch or
/// aggregation per project id.
///
/// # Errors
///
/// Only store failures propagate; calculation and validation failures
/// are recorded per row.
pub fn calculate_all(
    activities: &dyn ActivityStore,
    factors: &dyn FactorStore,
    external: Option<&dyn ExternalLookup>,
    project_id: &str,
    pending_only: bool,
    now: u64,
) -> Result<BatchOutcome> {
    let selected = if pending_only {
        activities.activities(project_id, Some(CalculationStatus::Pending))?
    } else {
        activities.activities(project_id, None)?
    };

    let mut outcome = BatchOutcome {
        requested: selected.len(),
        ..BatchOutcome::default()
    };

    for activity in &selected {
        match calculate(factors, external, activity, now) {
            Ok(result) => {
                activities.save_result(&result)?;
                outcome.calculated += 1;
            }
            Err(err) => {
                let message = err.to_string();
                activities.mark_error(&activity.id, &message, now)?;
                outcome.failed += 1;
                outcome.errors.push(RowError {
                    activity_id: activity.id.clone(),
                    message,
                });
            }
        }
    }

    tracing::info!(
        project = project_id,
        requested = outcome.requested,
        calculated = outcome.calculated,
        failed = outcome.failed,
        "calculation batch finished"
    );

    Ok(outcome)
}
