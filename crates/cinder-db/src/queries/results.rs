//! Calculation result query functions.

use cinder_types::{CalculationResult, FactorProvenance};
use rusqlite::{Connection, Row};

use crate::queries::bad_column;
use crate::Result;

/// Insert or replace the result for an activity. One row per activity;
/// recalculation overwrites.
pub fn upsert(conn: &Connection, result: &CalculationResult) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO calculation_results
             (activity_id, project_id, provenance, factor_value, factor_unit,
              factor_source, co2e_kg, calculated_at, error)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            result.activity_id,
            result.project_id,
            result.provenance.as_str(),
            result.factor_value,
            result.factor_unit,
            result.factor_source,
            result.co2e_kg,
            result.calculated_at as i64,
            result.error,
        ],
    )?;
    Ok(())
}

/// Current results for a project.
pub fn list(conn: &Connection, project_id: &str) -> Result<Vec<CalculationResult>> {
    let mut stmt = conn.prepare(
        "SELECT activity_id, project_id, provenance, factor_value, factor_unit,
                factor_source, co2e_kg, calculated_at, error
         FROM calculation_results WHERE project_id = ?1 ORDER BY activity_id",
    )?;
    let rows = stmt
        .query_map([project_id], from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Drop the result row for an activity, if any. Used when a
/// recalculation fails and only the error marker should remain.
pub fn delete(conn: &Connection, activity_id: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM calculation_results WHERE activity_id = ?1",
        [activity_id],
    )?;
    Ok(())
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<CalculationResult> {
    let provenance: String = row.get(2)?;
    let provenance = FactorProvenance::parse(&provenance)
        .ok_or_else(|| bad_column(2, "provenance", &provenance))?;
    Ok(CalculationResult {
        activity_id: row.get(0)?,
        project_id: row.get(1)?,
        provenance,
        factor_value: row.get(3)?,
        factor_unit: row.get(4)?,
        factor_source: row.get(5)?,
        co2e_kg: row.get(6)?,
        calculated_at: row.get::<_, i64>(7)? as u64,
        error: row.get(8)?,
    })
}
