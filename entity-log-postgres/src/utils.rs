use entity_log_api::{LogError, LogResult};
use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Row};
use std::str::FromStr;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> LogResult<Self>;
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> LogResult<HeaplessString<N>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s).map_err(|_| {
        LogError::DatabaseError(format!(
            "Value for column '{col_name}' is too long (max {N} chars)"
        ))
    })
}

/// Converts a count or offset for a `BIGINT` parameter, saturating at `i64::MAX`.
pub(crate) fn to_bigint(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub(crate) fn transaction_consumed() -> LogError {
    LogError::DatabaseError("Transaction has been consumed".to_string())
}
