use async_trait::async_trait;
use entity_log_api::LogResult;
use entity_log_db::models::log::LogEntryModel;
use entity_log_db::models::loggable::Loggable;
use entity_log_db::repository::load_batch::LoadBatch;
use crate::utils::{transaction_consumed, TryFromRow};
use sqlx::Postgres;
use std::collections::HashMap;
use uuid::Uuid;

use super::repo_impl::{LogEntryRepositoryImpl, LOG_ENTRY_COLUMNS};

impl<T: Loggable + Sync> LogEntryRepositoryImpl<T> {
    pub(super) async fn load_batch_impl(
        repo: &LogEntryRepositoryImpl<T>,
        ids: &[Uuid],
    ) -> LogResult<Vec<Option<LogEntryModel>>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!("SELECT {LOG_ENTRY_COLUMNS} FROM {} WHERE id = ANY($1)", repo.table());
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or_else(transaction_consumed)?;
            sqlx::query(&query).bind(ids).fetch_all(&mut **transaction).await?
        };

        let mut item_map = HashMap::new();
        for row in rows {
            let item = LogEntryModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl<T: Loggable + Sync> LoadBatch<Postgres, LogEntryModel> for LogEntryRepositoryImpl<T> {
    async fn load_batch(&self, ids: &[Uuid]) -> LogResult<Vec<Option<LogEntryModel>>> {
        Self::load_batch_impl(self, ids).await
    }
}
