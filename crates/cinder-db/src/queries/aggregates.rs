//! Aggregate snapshot query functions.
//!
//! One snapshot is kept per (project, kind); recomputation replaces it
//! wholesale. The snapshot body is stored as JSON text.

use cinder_types::{AggregateKind, AggregateResult};
use rusqlite::Connection;

use crate::{DbError, Result};

/// Insert or replace the snapshot for (project, kind).
pub fn upsert(conn: &Connection, aggregate: &AggregateResult) -> Result<()> {
    let payload = serde_json::to_string(aggregate)
        .map_err(|e| DbError::Serialization(e.to_string()))?;
    conn.execute(
        "INSERT OR REPLACE INTO aggregate_results (project_id, kind, payload, computed_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            aggregate.project_id,
            aggregate.kind.as_str(),
            payload,
            aggregate.computed_at as i64,
        ],
    )?;
    Ok(())
}

/// The latest snapshot for (project, kind), if any.
pub fn get(
    conn: &Connection,
    project_id: &str,
    kind: AggregateKind,
) -> Result<Option<AggregateResult>> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT payload FROM aggregate_results WHERE project_id = ?1 AND kind = ?2",
            rusqlite::params![project_id, kind.as_str()],
            |row| row.get(0),
        )
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(DbError::Sqlite(other)),
        })?;

    payload
        .map(|p| serde_json::from_str(&p).map_err(|e| DbError::Serialization(e.to_string())))
        .transpose()
}

#[cfg(test)]
mod tests {
    use cinder_types::{CategoryTotal, Scope3Category, ScopeTotals};

    use super::*;
    use crate::Db;

    fn snapshot(total: f64) -> AggregateResult {
        AggregateResult {
            project_id: "proj-1".into(),
            kind: AggregateKind::Cfo,
            scope_totals: ScopeTotals {
                scope1_kg: total / 2.0,
                scope2_kg: total / 4.0,
                scope3_kg: total / 4.0,
            },
            category_totals: vec![CategoryTotal {
                category: Scope3Category::PurchasedGoodsAndServices,
                co2e_kg: total / 4.0,
            }],
            total_co2e_kg: total,
            intensity: None,
            computed_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_roundtrip() {
        let db = Db::open_memory().expect("open");
        upsert(db.conn(), &snapshot(600.0)).expect("upsert");

        let back = get(db.conn(), "proj-1", AggregateKind::Cfo)
            .expect("query")
            .expect("present");
        assert!((back.total_co2e_kg - 600.0).abs() < 1e-12);
        assert_eq!(back.category_totals.len(), 1);
    }

    #[test]
    fn test_recompute_replaces() {
        let db = Db::open_memory().expect("open");
        upsert(db.conn(), &snapshot(600.0)).expect("first");
        upsert(db.conn(), &snapshot(800.0)).expect("replace");

        let back = get(db.conn(), "proj-1", AggregateKind::Cfo)
            .expect("query")
            .expect("present");
        assert!((back.total_co2e_kg - 800.0).abs() < 1e-12);
    }

    #[test]
    fn test_absent_snapshot_is_none() {
        let db = Db::open_memory().expect("open");
        assert!(get(db.conn(), "proj-1", AggregateKind::Cfp)
            .expect("query")
            .is_none());
    }
}
