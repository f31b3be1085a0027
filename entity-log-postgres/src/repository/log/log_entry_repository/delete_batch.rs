use async_trait::async_trait;
use entity_log_api::LogResult;
use entity_log_db::models::loggable::Loggable;
use entity_log_db::repository::delete_batch::DeleteBatch;
use crate::utils::transaction_consumed;
use sqlx::Postgres;
use uuid::Uuid;

use super::repo_impl::LogEntryRepositoryImpl;

impl<T: Loggable + Sync> LogEntryRepositoryImpl<T> {
    pub(super) async fn delete_batch_impl(
        repo: &LogEntryRepositoryImpl<T>,
        ids: &[Uuid],
    ) -> LogResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let query = format!("DELETE FROM {} WHERE id = ANY($1)", repo.table());
        let result = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or_else(transaction_consumed)?;
            sqlx::query(&query).bind(ids).execute(&mut **transaction).await?
        };

        let deleted = result.rows_affected() as usize;
        tracing::debug!(table = %repo.table(), requested = ids.len(), deleted, "log entries deleted");
        Ok(deleted)
    }
}

#[async_trait]
impl<T: Loggable + Sync> DeleteBatch<Postgres> for LogEntryRepositoryImpl<T> {
    async fn delete_batch(&self, ids: &[Uuid]) -> LogResult<usize> {
        Self::delete_batch_impl(self, ids).await
    }
}
