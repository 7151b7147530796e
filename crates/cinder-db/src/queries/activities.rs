//! Activity query functions.

use cinder_types::{
    Activity, ActivityType, CalculationStatus, DataQualityTier, Scope, Scope3Category,
    TierDirection, TierLevel,
};
use rusqlite::{Connection, Row};

use crate::queries::bad_column;
use crate::{DbError, Result};

const COLUMNS: &str = "id, project_id, name, scope, scope3_category, activity_type, quantity, \
                       unit, year, country, material, production_route, fuel_type, distance_km, \
                       fuel_efficiency, supplier_factor, tier_level, tier_direction, data_source, \
                       data_quality, status, error_message, retired";

/// Insert or replace an activity.
pub fn upsert(conn: &Connection, activity: &Activity) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO activities (id, project_id, name, scope, scope3_category,
             activity_type, quantity, unit, year, country, material, production_route,
             fuel_type, distance_km, fuel_efficiency, supplier_factor, tier_level,
             tier_direction, data_source, data_quality, status, error_message, retired)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                 ?17, ?18, ?19, ?20, ?21, ?22, ?23)",
        rusqlite::params![
            activity.id,
            activity.project_id,
            activity.name,
            activity.scope.as_str(),
            activity.scope3_category.map(|c| c.code()),
            activity.activity_type.as_str(),
            activity.quantity,
            activity.unit,
            activity.year,
            activity.country,
            activity.material,
            activity.production_route,
            activity.fuel_type,
            activity.distance_km,
            activity.fuel_efficiency,
            activity.supplier_factor,
            activity.tier_level.as_str(),
            activity.tier_direction.as_str(),
            activity.data_source,
            activity.data_quality.as_str(),
            activity.status.as_str(),
            activity.error_message,
            activity.retired,
        ],
    )?;
    Ok(())
}

/// Get an activity by id.
pub fn get(conn: &Connection, id: &str) -> Result<Activity> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM activities WHERE id = ?1"),
        [id],
        from_row,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("activity {id}")),
        other => DbError::Sqlite(other),
    })
}

/// Non-retired activities of a project, optionally filtered by status,
/// ordered by name for deterministic iteration.
pub fn list(
    conn: &Connection,
    project_id: &str,
    status: Option<CalculationStatus>,
) -> Result<Vec<Activity>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM activities
         WHERE project_id = ?1 AND retired = 0
           AND (?2 IS NULL OR status = ?2)
         ORDER BY name, id"
    ))?;

    let rows = stmt
        .query_map(
            rusqlite::params![project_id, status.map(CalculationStatus::as_str)],
            from_row,
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Move an activity to `calculated` and clear any retained error.
pub fn mark_calculated(conn: &Connection, id: &str) -> Result<()> {
    set_status(conn, id, CalculationStatus::Calculated, None)
}

/// Move an activity to `error`, retaining the cause verbatim.
pub fn mark_error(conn: &Connection, id: &str, message: &str) -> Result<()> {
    set_status(conn, id, CalculationStatus::Error, Some(message))
}

fn set_status(
    conn: &Connection,
    id: &str,
    status: CalculationStatus,
    message: Option<&str>,
) -> Result<()> {
    let changed = conn.execute(
        "UPDATE activities SET status = ?2, error_message = ?3 WHERE id = ?1",
        rusqlite::params![id, status.as_str(), message],
    )?;
    if changed == 0 {
        return Err(DbError::NotFound(format!("activity {id}")));
    }
    Ok(())
}

/// Soft-retire an activity. Its history stays queryable; it is excluded
/// from batches and aggregates.
pub fn retire(conn: &Connection, id: &str) -> Result<()> {
    let changed = conn.execute("UPDATE activities SET retired = 1 WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(DbError::NotFound(format!("activity {id}")));
    }
    Ok(())
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Activity> {
    let scope: String = row.get(3)?;
    let scope = Scope::parse(&scope).ok_or_else(|| bad_column(3, "scope", &scope))?;
    let scope3_category = match row.get::<_, Option<u8>>(4)? {
        Some(code) => Some(
            Scope3Category::from_code(code)
                .ok_or_else(|| bad_column(4, "scope3 category code", &code.to_string()))?,
        ),
        None => None,
    };
    let activity_type: String = row.get(5)?;
    let activity_type = ActivityType::parse(&activity_type)
        .ok_or_else(|| bad_column(5, "activity type", &activity_type))?;
    let tier_level: String = row.get(16)?;
    let tier_level =
        TierLevel::parse(&tier_level).ok_or_else(|| bad_column(16, "tier level", &tier_level))?;
    let tier_direction: String = row.get(17)?;
    let tier_direction = TierDirection::parse(&tier_direction)
        .ok_or_else(|| bad_column(17, "tier direction", &tier_direction))?;
    let data_quality: String = row.get(19)?;
    let data_quality = DataQualityTier::parse(&data_quality)
        .ok_or_else(|| bad_column(19, "data quality", &data_quality))?;
    let status: String = row.get(20)?;
    let status =
        CalculationStatus::parse(&status).ok_or_else(|| bad_column(20, "status", &status))?;

    Ok(Activity {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        scope,
        scope3_category,
        activity_type,
        quantity: row.get(6)?,
        unit: row.get(7)?,
        year: row.get(8)?,
        country: row.get(9)?,
        material: row.get(10)?,
        production_route: row.get(11)?,
        fuel_type: row.get(12)?,
        distance_km: row.get(13)?,
        fuel_efficiency: row.get(14)?,
        supplier_factor: row.get(15)?,
        tier_level,
        tier_direction,
        data_source: row.get(18)?,
        data_quality,
        status,
        error_message: row.get(21)?,
        retired: row.get(22)?,
    })
}
