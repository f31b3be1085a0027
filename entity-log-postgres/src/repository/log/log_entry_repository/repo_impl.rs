use async_trait::async_trait;
use entity_log_api::{LogError, LogResult};
use entity_log_db::models::log::{KindRegistry, LogEntryModel, LogModelSchema};
use entity_log_db::models::loggable::Loggable;
use crate::utils::{get_heapless_string, TryFromRow};
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Row};
use std::marker::PhantomData;
use std::sync::Arc;

pub(crate) const LOG_ENTRY_COLUMNS: &str = "id, target_id, kind, message, user_id, created_at, hash";

/// Repository over the log table generated for the target type `T`
pub struct LogEntryRepositoryImpl<T: Loggable> {
    pub executor: Executor,
    pub(crate) schema: Arc<LogModelSchema>,
    pub(crate) kinds: Arc<KindRegistry>,
    _target: PhantomData<fn() -> T>,
}

impl<T: Loggable> LogEntryRepositoryImpl<T> {
    /// Fails when `schema` was generated for a different target type.
    pub fn new(
        executor: Executor,
        schema: Arc<LogModelSchema>,
        kinds: Arc<KindRegistry>,
    ) -> LogResult<Self> {
        if !schema.targets::<T>() {
            return Err(LogError::Validation(format!(
                "log model {} does not target {}",
                schema.model_path(),
                T::type_path()
            )));
        }
        Ok(Self {
            executor,
            schema,
            kinds,
            _target: PhantomData,
        })
    }

    pub fn schema(&self) -> &LogModelSchema {
        &self.schema
    }

    pub(crate) fn table(&self) -> &str {
        &self.schema.table_name
    }
}

impl TryFromRow<PgRow> for LogEntryModel {
    fn try_from_row(row: &PgRow) -> LogResult<Self> {
        Ok(LogEntryModel {
            id: row.try_get("id")?,
            target_id: row.try_get("target_id")?,
            kind: row.try_get("kind")?,
            message: get_heapless_string(row, "message")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            hash: row.try_get("hash")?,
        })
    }
}

#[async_trait]
impl<T: Loggable + Sync + 'static> TransactionAware for LogEntryRepositoryImpl<T> {
    async fn on_commit(&self) -> TransactionResult<()> {
        tracing::debug!(table = %self.table(), "log entries committed");
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        tracing::debug!(table = %self.table(), "log entries rolled back");
        Ok(())
    }
}
