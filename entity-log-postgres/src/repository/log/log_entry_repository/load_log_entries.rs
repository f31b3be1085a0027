use async_trait::async_trait;
use entity_log_api::LogResult;
use entity_log_db::models::log::LogEntryModel;
use entity_log_db::models::loggable::Loggable;
use entity_log_db::repository::load_log_entries::LoadLogEntries;
use entity_log_db::repository::pagination::{Page, PageRequest};
use crate::utils::{to_bigint, transaction_consumed, TryFromRow};
use sqlx::Postgres;
use uuid::Uuid;

use super::repo_impl::{LogEntryRepositoryImpl, LOG_ENTRY_COLUMNS};

impl<T: Loggable + Sync> LogEntryRepositoryImpl<T> {
    pub(super) async fn count_log_entries_impl(
        repo: &LogEntryRepositoryImpl<T>,
        target_id: Uuid,
    ) -> LogResult<usize> {
        let query = format!("SELECT COUNT(*) FROM {} WHERE target_id = $1", repo.table());
        let total: i64 = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or_else(transaction_consumed)?;
            sqlx::query_scalar(&query)
                .bind(target_id)
                .fetch_one(&mut **transaction)
                .await?
        };
        Ok(total as usize)
    }

    pub(super) async fn log_entries_impl(
        repo: &LogEntryRepositoryImpl<T>,
        target_id: Uuid,
        page: PageRequest,
    ) -> LogResult<Page<LogEntryModel>> {
        let total = Self::count_log_entries_impl(repo, target_id).await?;

        // Oldest first; v7 ids keep entries created in the same microsecond in order
        let query = format!(
            r#"
            SELECT {LOG_ENTRY_COLUMNS} FROM {}
            WHERE target_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
            repo.table()
        );
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or_else(transaction_consumed)?;
            sqlx::query(&query)
                .bind(target_id)
                .bind(to_bigint(page.limit))
                .bind(to_bigint(page.offset))
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(LogEntryModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total, page.limit, page.offset))
    }

    pub(super) async fn last_log_entry_impl(
        repo: &LogEntryRepositoryImpl<T>,
        target_id: Uuid,
    ) -> LogResult<Option<LogEntryModel>> {
        let query = format!(
            r#"
            SELECT {LOG_ENTRY_COLUMNS} FROM {}
            WHERE target_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
            repo.table()
        );
        let row = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or_else(transaction_consumed)?;
            sqlx::query(&query)
                .bind(target_id)
                .fetch_optional(&mut **transaction)
                .await?
        };
        row.map(|row| LogEntryModel::try_from_row(&row)).transpose()
    }
}

#[async_trait]
impl<T: Loggable + Sync> LoadLogEntries<Postgres, T> for LogEntryRepositoryImpl<T> {
    async fn log_entries(&self, target_id: Uuid, page: PageRequest) -> LogResult<Page<LogEntryModel>> {
        Self::log_entries_impl(self, target_id, page).await
    }

    async fn count_log_entries(&self, target_id: Uuid) -> LogResult<usize> {
        Self::count_log_entries_impl(self, target_id).await
    }

    async fn last_log_entry(&self, target_id: Uuid) -> LogResult<Option<LogEntryModel>> {
        Self::last_log_entry_impl(self, target_id).await
    }
}
