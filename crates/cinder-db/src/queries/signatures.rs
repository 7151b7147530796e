//! Signature query functions.

use cinder_types::{Signature, SignatureStatus, SignerRole};
use rusqlite::{Connection, Row};

use crate::queries::bad_column;
use crate::{DbError, Result};

/// Insert a signature. Signatures are append-only; revocation flips the
/// status, it never deletes.
pub fn insert(conn: &Connection, signature: &Signature) -> Result<()> {
    conn.execute(
        "INSERT INTO signatures (id, report_id, signer, role, signed_at, content_hash, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            signature.id,
            signature.report_id,
            signature.signer,
            signature.role.as_str(),
            signature.signed_at as i64,
            signature.content_hash.as_slice(),
            signature.status.as_str(),
        ],
    )?;
    Ok(())
}

/// Get a signature by id.
pub fn get(conn: &Connection, id: &str) -> Result<Signature> {
    conn.query_row(
        "SELECT id, report_id, signer, role, signed_at, content_hash, status
         FROM signatures WHERE id = ?1",
        [id],
        from_row,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("signature {id}")),
        other => DbError::Sqlite(other),
    })
}

/// All signatures over a report, oldest first.
pub fn list(conn: &Connection, report_id: &str) -> Result<Vec<Signature>> {
    let mut stmt = conn.prepare(
        "SELECT id, report_id, signer, role, signed_at, content_hash, status
         FROM signatures WHERE report_id = ?1 ORDER BY signed_at, id",
    )?;
    let rows = stmt
        .query_map([report_id], from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Update a signature's validity status.
pub fn set_status(conn: &Connection, id: &str, status: SignatureStatus) -> Result<()> {
    let changed = conn.execute(
        "UPDATE signatures SET status = ?2 WHERE id = ?1",
        rusqlite::params![id, status.as_str()],
    )?;
    if changed == 0 {
        return Err(DbError::NotFound(format!("signature {id}")));
    }
    Ok(())
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Signature> {
    let role: String = row.get(3)?;
    let role = SignerRole::parse(&role).ok_or_else(|| bad_column(3, "signer role", &role))?;
    let hash: Vec<u8> = row.get(5)?;
    let content_hash: [u8; 32] = hash
        .as_slice()
        .try_into()
        .map_err(|_| bad_column(5, "content hash length", &hash.len().to_string()))?;
    let status: String = row.get(6)?;
    let status =
        SignatureStatus::parse(&status).ok_or_else(|| bad_column(6, "status", &status))?;

    Ok(Signature {
        id: row.get(0)?,
        report_id: row.get(1)?,
        signer: row.get(2)?,
        role,
        signed_at: row.get::<_, i64>(4)? as u64,
        content_hash,
        status,
    })
}
