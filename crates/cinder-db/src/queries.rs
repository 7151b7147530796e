//! Database query functions organized by domain.

pub mod activities;
pub mod aggregates;
pub mod factors;
pub mod reports;
pub mod results;
pub mod signatures;

/// Conversion failure for a stored enum spelling or encoded column.
pub(crate) fn bad_column(idx: usize, what: &str, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        format!("invalid {what}: {value}").into(),
    )
}
