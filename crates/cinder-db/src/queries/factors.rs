//! Emission factor and override query functions.

use cinder_types::{EmissionFactor, EnergyMix, FactorCategory, FactorOverride};
use rusqlite::{Connection, Row};

use crate::queries::bad_column;
use crate::Result;

/// Insert a factor. When it is active, any previously active row for the
/// same (category, key, year) is deactivated first so the partial unique
/// index holds.
pub fn insert(conn: &Connection, factor: &EmissionFactor) -> Result<()> {
    if factor.active {
        conn.execute(
            "UPDATE emission_factors SET active = 0
             WHERE category = ?1 AND key = ?2 AND year = ?3 AND active = 1",
            rusqlite::params![factor.category.as_str(), factor.key, factor.year],
        )?;
    }
    conn.execute(
        "INSERT INTO emission_factors (category, key, year, value, unit, source, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            factor.category.as_str(),
            factor.key,
            factor.year,
            factor.value,
            factor.unit,
            factor.source,
            factor.active,
        ],
    )?;
    Ok(())
}

/// The active factor for (category, key, year), if any.
pub fn active(
    conn: &Connection,
    category: FactorCategory,
    key: &str,
    year: u16,
) -> Result<Option<EmissionFactor>> {
    let mut stmt = conn.prepare(
        "SELECT category, key, year, value, unit, source, active
         FROM emission_factors
         WHERE category = ?1 AND key = ?2 AND year = ?3 AND active = 1",
    )?;
    let mut rows = stmt.query_map(
        rusqlite::params![category.as_str(), key, year],
        factor_from_row,
    )?;
    rows.next().transpose().map_err(Into::into)
}

/// All active factors for (category, key) across years.
pub fn historical(
    conn: &Connection,
    category: FactorCategory,
    key: &str,
) -> Result<Vec<EmissionFactor>> {
    let mut stmt = conn.prepare(
        "SELECT category, key, year, value, unit, source, active
         FROM emission_factors
         WHERE category = ?1 AND key = ?2 AND active = 1
         ORDER BY year DESC",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![category.as_str(), key], factor_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Insert or replace a project override. Callers validate the override
/// before writing; this function is raw storage.
pub fn upsert_override(conn: &Connection, ov: &FactorOverride) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO factor_overrides
             (project_id, category, key, value, unit, source,
              renewable_pct, fossil_pct, nuclear_pct, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            ov.project_id,
            ov.category.as_str(),
            ov.key,
            ov.value,
            ov.unit,
            ov.source,
            ov.energy_mix.as_ref().map(|m| m.renewable_pct),
            ov.energy_mix.as_ref().map(|m| m.fossil_pct),
            ov.energy_mix.as_ref().map(|m| m.nuclear_pct),
            ov.active,
        ],
    )?;
    Ok(())
}

/// The active override for (project, category, key), if any.
pub fn override_for(
    conn: &Connection,
    project_id: &str,
    category: FactorCategory,
    key: &str,
) -> Result<Option<FactorOverride>> {
    let mut stmt = conn.prepare(
        "SELECT project_id, category, key, value, unit, source,
                renewable_pct, fossil_pct, nuclear_pct, active
         FROM factor_overrides
         WHERE project_id = ?1 AND category = ?2 AND key = ?3 AND active = 1",
    )?;
    let mut rows = stmt.query_map(
        rusqlite::params![project_id, category.as_str(), key],
        override_from_row,
    )?;
    rows.next().transpose().map_err(Into::into)
}

fn factor_from_row(row: &Row<'_>) -> rusqlite::Result<EmissionFactor> {
    let category: String = row.get(0)?;
    let category =
        FactorCategory::parse(&category).ok_or_else(|| bad_column(0, "factor category", &category))?;
    Ok(EmissionFactor {
        category,
        key: row.get(1)?,
        year: row.get(2)?,
        value: row.get(3)?,
        unit: row.get(4)?,
        source: row.get(5)?,
        active: row.get(6)?,
    })
}

fn override_from_row(row: &Row<'_>) -> rusqlite::Result<FactorOverride> {
    let category: String = row.get(1)?;
    let category =
        FactorCategory::parse(&category).ok_or_else(|| bad_column(1, "factor category", &category))?;
    let energy_mix = match (
        row.get::<_, Option<f64>>(6)?,
        row.get::<_, Option<f64>>(7)?,
        row.get::<_, Option<f64>>(8)?,
    ) {
        (Some(renewable_pct), Some(fossil_pct), Some(nuclear_pct)) => Some(EnergyMix {
            renewable_pct,
            fossil_pct,
            nuclear_pct,
        }),
        _ => None,
    };
    Ok(FactorOverride {
        project_id: row.get(0)?,
        category,
        key: row.get(2)?,
        value: row.get(3)?,
        unit: row.get(4)?,
        source: row.get(5)?,
        energy_mix,
        active: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Db;

    fn factor(key: &str, year: u16, value: f64) -> EmissionFactor {
        EmissionFactor {
            category: FactorCategory::Fuel,
            key: key.into(),
            year,
            value,
            unit: "kgCO2e/l".into(),
            source: "IPCC 2021".into(),
            active: true,
        }
    }

    #[test]
    fn test_insert_and_active_lookup() {
        let db = Db::open_memory().expect("open");
        insert(db.conn(), &factor("diesel", 2024, 2.68)).expect("insert");

        let found = active(db.conn(), FactorCategory::Fuel, "diesel", 2024).expect("query");
        let found = found.expect("factor present");
        assert!((found.value - 2.68).abs() < 1e-12);

        assert!(active(db.conn(), FactorCategory::Fuel, "diesel", 2025)
            .expect("query")
            .is_none());
    }

    #[test]
    fn test_reinsert_replaces_active_row() {
        let db = Db::open_memory().expect("open");
        insert(db.conn(), &factor("diesel", 2024, 2.68)).expect("first");
        insert(db.conn(), &factor("diesel", 2024, 2.70)).expect("revision");

        let found = active(db.conn(), FactorCategory::Fuel, "diesel", 2024)
            .expect("query")
            .expect("present");
        assert!((found.value - 2.70).abs() < 1e-12);
        // The superseded row is inactive, not deleted.
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM emission_factors", [], |r| r.get(0))
            .expect("count");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_historical_ordered_by_year_desc() {
        let db = Db::open_memory().expect("open");
        insert(db.conn(), &factor("diesel", 2022, 2.60)).expect("insert");
        insert(db.conn(), &factor("diesel", 2024, 2.68)).expect("insert");
        insert(db.conn(), &factor("diesel", 2023, 2.65)).expect("insert");

        let years: Vec<u16> = historical(db.conn(), FactorCategory::Fuel, "diesel")
            .expect("query")
            .iter()
            .map(|f| f.year)
            .collect();
        assert_eq!(years, vec![2024, 2023, 2022]);
    }

    #[test]
    fn test_override_roundtrip_with_mix() {
        let db = Db::open_memory().expect("open");
        let ov = FactorOverride {
            project_id: "proj-1".into(),
            category: FactorCategory::Grid,
            key: "KR".into(),
            value: 0.31,
            unit: "kgCO2e/kWh".into(),
            source: "PPA contract".into(),
            energy_mix: Some(EnergyMix {
                renewable_pct: 40.0,
                fossil_pct: 50.0,
                nuclear_pct: 10.0,
            }),
            active: true,
        };
        upsert_override(db.conn(), &ov).expect("upsert");

        let back = override_for(db.conn(), "proj-1", FactorCategory::Grid, "KR")
            .expect("query")
            .expect("present");
        assert_eq!(back.energy_mix, ov.energy_mix);

        // Scoped to the owning project.
        assert!(override_for(db.conn(), "proj-2", FactorCategory::Grid, "KR")
            .expect("query")
            .is_none());
    }
}
