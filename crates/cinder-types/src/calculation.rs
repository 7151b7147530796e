//! Calculation results.

use serde::{Deserialize, Serialize};

use crate::{ActivityId, FactorProvenance, ProjectId};

/// The outcome of calculating one activity.
///
/// One result exists per activity per calculation run; recalculation
/// overwrites the previous result wholesale, it never appends.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalculationResult {
    pub activity_id: ActivityId,
    pub project_id: ProjectId,
    /// Provenance of the factor that produced this result.
    pub provenance: FactorProvenance,
    /// The resolved factor value that was multiplied in.
    pub factor_value: f64,
    /// The factor's declared unit.
    pub factor_unit: String,
    /// Publication or override label of the factor.
    pub factor_source: String,
    /// Computed emissions in kilograms CO2-equivalent.
    pub co2e_kg: f64,
    /// Unix timestamp of the calculation.
    pub calculated_at: u64,
    /// Human-readable cause when the calculation failed. Stores do not
    /// keep failed result rows; the cause survives on the activity's
    /// `error_message` instead, and any prior result is superseded.
    /// Consumers filter rows through [`is_success`](Self::is_success).
    pub error: Option<String>,
}

impl CalculationResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_flag() {
        let ok = CalculationResult {
            activity_id: "a".into(),
            project_id: "p".into(),
            provenance: FactorProvenance::Standard,
            factor_value: 0.5,
            factor_unit: "kgCO2e/kWh".into(),
            factor_source: "IEA 2023".into(),
            co2e_kg: 50.0,
            calculated_at: 0,
            error: None,
        };
        assert!(ok.is_success());

        let failed = CalculationResult {
            error: Some("no factor".into()),
            ..ok
        };
        assert!(!failed.is_success());
    }
}
