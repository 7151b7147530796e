//! Report query functions.
//!
//! The payload and missing-fields list are stored as JSON text. The
//! payload round-trips through `BTreeMap`, so the stored JSON is the
//! canonical form the content hash is computed over.

use std::collections::BTreeMap;

use cinder_types::{Report, ReportStatus, StandardId};
use rusqlite::{Connection, Row};

use crate::queries::bad_column;
use crate::{DbError, Result};

/// Insert or replace a report.
pub fn upsert(conn: &Connection, report: &Report) -> Result<()> {
    let payload = serde_json::to_string(&report.payload)
        .map_err(|e| DbError::Serialization(e.to_string()))?;
    let missing = serde_json::to_string(&report.missing_fields)
        .map_err(|e| DbError::Serialization(e.to_string()))?;
    conn.execute(
        "INSERT OR REPLACE INTO reports
             (id, project_id, standard, payload, missing_fields, incomplete,
              status, deadline, generated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            report.id,
            report.project_id,
            report.standard.as_str(),
            payload,
            missing,
            report.incomplete,
            report.status.as_str(),
            report.deadline.map(|d| d as i64),
            report.generated_at as i64,
        ],
    )?;
    Ok(())
}

/// Get a report by id.
pub fn get(conn: &Connection, id: &str) -> Result<Report> {
    conn.query_row(
        "SELECT id, project_id, standard, payload, missing_fields, incomplete,
                status, deadline, generated_at
         FROM reports WHERE id = ?1",
        [id],
        from_row,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("report {id}")),
        other => DbError::Sqlite(other),
    })
}

/// Update a report's lifecycle status.
pub fn set_status(conn: &Connection, id: &str, status: ReportStatus) -> Result<()> {
    let changed = conn.execute(
        "UPDATE reports SET status = ?2 WHERE id = ?1",
        rusqlite::params![id, status.as_str()],
    )?;
    if changed == 0 {
        return Err(DbError::NotFound(format!("report {id}")));
    }
    Ok(())
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Report> {
    let standard: String = row.get(2)?;
    let standard =
        StandardId::parse(&standard).ok_or_else(|| bad_column(2, "standard", &standard))?;
    let payload: String = row.get(3)?;
    let payload: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(&payload).map_err(|e| bad_column(3, "payload", &e.to_string()))?;
    let missing: String = row.get(4)?;
    let missing_fields: Vec<String> = serde_json::from_str(&missing)
        .map_err(|e| bad_column(4, "missing fields", &e.to_string()))?;
    let status: String = row.get(6)?;
    let status = ReportStatus::parse(&status).ok_or_else(|| bad_column(6, "status", &status))?;

    Ok(Report {
        id: row.get(0)?,
        project_id: row.get(1)?,
        standard,
        payload,
        missing_fields,
        incomplete: row.get(5)?,
        status,
        deadline: row.get::<_, Option<i64>>(7)?.map(|d| d as u64),
        generated_at: row.get::<_, i64>(8)? as u64,
    })
}
