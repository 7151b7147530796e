//! Emissions-weighted data-quality scoring.

use cinder_types::{Activity, CalculationResult, CalculationStatus, DataQualityTier};
use serde::{Deserialize, Serialize};

/// Numeric weight per quality tier.
pub const WEIGHT_HIGH: f64 = 3.0;
pub const WEIGHT_MEDIUM: f64 = 2.0;
pub const WEIGHT_LOW: f64 = 1.0;

/// Rating cut points over the weighted average.
pub const HIGH_CUTOFF: f64 = 2.5;
pub const MEDIUM_CUTOFF: f64 = 1.5;

/// The project-level data-quality score.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataQualityScore {
    /// Emissions-weighted average in [1, 3].
    pub average: f64,
    /// Qualitative bucket derived from the average.
    pub rating: DataQualityTier,
    /// Calculated activities that contributed to the score.
    pub activity_count: usize,
}

fn weight(tier: DataQualityTier) -> f64 {
    match tier {
        DataQualityTier::High => WEIGHT_HIGH,
        DataQualityTier::Medium => WEIGHT_MEDIUM,
        DataQualityTier::Low => WEIGHT_LOW,
    }
}

fn rating(average: f64) -> DataQualityTier {
    if average >= HIGH_CUTOFF {
        DataQualityTier::High
    } else if average >= MEDIUM_CUTOFF {
        DataQualityTier::Medium
    } else {
        DataQualityTier::Low
    }
}

/// Compute the emissions-weighted data-quality score for a project.
///
/// Activities with greater emissions contribute proportionally more:
/// `average = Σ(weight_i × co2e_i) / Σ(co2e_i)`. Activities without a
/// calculated result are excluded, never zero-weighted. When all
/// contributing emissions are zero the plain mean of the weights is
/// used. Returns `None` when nothing has been calculated.
pub fn data_quality(
    activities: &[Activity],
    results: &[CalculationResult],
) -> Option<DataQualityScore> {
    let mut weighted_sum = 0.0;
    let mut emission_sum = 0.0;
    let mut weight_sum = 0.0;
    let mut count = 0usize;

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

        let w = weight(activity.data_quality);
        weighted_sum += w * result.co2e_kg;
        emission_sum += result.co2e_kg;
        weight_sum += w;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let average = if emission_sum > 0.0 {
        weighted_sum / emission_sum
    } else {
        weight_sum / count as f64
    };

    Some(DataQualityScore {
        average,
        rating: rating(average),
        activity_count: count,
    })
}
