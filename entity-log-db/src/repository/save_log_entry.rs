use async_trait::async_trait;
use entity_log_api::LogResult;
use sqlx::Database;

use crate::models::log::LogEntryModel;
use crate::models::loggable::Loggable;

/// Repository trait persisting log entries of the target type `T`
///
/// Implementations must enforce immutability:
/// - an entry without a stored row is sealed (see [`LogEntryModel::seal`]) and inserted;
/// - an entry with a stored row is compared against it with
///   [`LogEntryModel::ensure_matches`]; any difference fails with
///   `LogError::ImmutableLogEntry` before anything is written;
/// - saving an unchanged stored entry writes nothing and returns the stored entry.
#[async_trait]
pub trait SaveLogEntry<DB: Database, T: Loggable>: Send + Sync {
    async fn save(&self, entry: LogEntryModel) -> LogResult<LogEntryModel>;
}
