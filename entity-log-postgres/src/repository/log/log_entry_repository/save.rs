use async_trait::async_trait;
use entity_log_api::LogResult;
use entity_log_db::models::log::{KindRegistry, LogEntryModel};
use entity_log_db::models::loggable::Loggable;
use entity_log_db::repository::append_log_entry::AppendLogEntry;
use entity_log_db::repository::save_log_entry::SaveLogEntry;
use crate::utils::{transaction_consumed, TryFromRow};
use sqlx::Postgres;

use super::repo_impl::{LogEntryRepositoryImpl, LOG_ENTRY_COLUMNS};

impl<T: Loggable + Sync> LogEntryRepositoryImpl<T> {
    pub(super) async fn save_impl(
        repo: &LogEntryRepositoryImpl<T>,
        mut entry: LogEntryModel,
    ) -> LogResult<LogEntryModel> {
        let table = repo.table();
        let select_query = format!("SELECT {LOG_ENTRY_COLUMNS} FROM {table} WHERE id = $1");

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or_else(transaction_consumed)?;

        // 1. An existing row may only be saved again unchanged
        let stored_row = sqlx::query(&select_query)
            .bind(entry.id)
            .fetch_optional(&mut **transaction)
            .await?;
        if let Some(row) = stored_row {
            let stored = LogEntryModel::try_from_row(&row)?;
            if let Err(err) = entry.ensure_matches(&stored) {
                tracing::warn!(table = %table, id = %entry.id, error = %err, "rejected modification of log entry");
                return Err(err);
            }
            tracing::debug!(table = %table, id = %entry.id, "log entry unchanged, nothing to save");
            return Ok(stored);
        }

        // 2. First save: the kind may have been edited since the entry was built
        repo.kinds.check_code(entry.kind)?;
        entry.seal()?;

        let insert_query = format!(
            r#"
            INSERT INTO {table} ({LOG_ENTRY_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#
        );
        sqlx::query(&insert_query)
            .bind(entry.id)
            .bind(entry.target_id)
            .bind(entry.kind)
            .bind(entry.message.as_str())
            .bind(entry.user_id)
            .bind(entry.created_at)
            .bind(entry.hash)
            .execute(&mut **transaction)
            .await?;

        tracing::debug!(table = %table, id = %entry.id, target_id = %entry.target_id, kind = entry.kind, "log entry created");
        Ok(entry)
    }
}

#[async_trait]
impl<T: Loggable + Sync> SaveLogEntry<Postgres, T> for LogEntryRepositoryImpl<T> {
    async fn save(&self, entry: LogEntryModel) -> LogResult<LogEntryModel> {
        Self::save_impl(self, entry).await
    }
}

#[async_trait]
impl<T: Loggable + Sync> AppendLogEntry<Postgres, T> for LogEntryRepositoryImpl<T> {
    fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }
}
