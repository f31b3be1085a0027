//! In-memory log repository used to exercise the repository contracts without a database.

use async_trait::async_trait;
use entity_log_api::LogResult;
use parking_lot::Mutex;
use sqlx::Postgres;
use std::marker::PhantomData;
use uuid::Uuid;

use crate::models::log::{KindRegistry, LogEntryModel};
use crate::models::loggable::Loggable;
use crate::repository::{
    AppendLogEntry, DeleteBatch, LoadBatch, LoadLogEntries, Page, PageRequest, SaveLogEntry,
};

pub(crate) struct MemoryLogStore<T> {
    rows: Mutex<Vec<LogEntryModel>>,
    kinds: KindRegistry,
    _target: PhantomData<fn() -> T>,
}

impl<T> MemoryLogStore<T> {
    pub(crate) fn new(kinds: KindRegistry) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            kinds,
            _target: PhantomData,
        }
    }

    fn rows_for(&self, target_id: Uuid) -> Vec<LogEntryModel> {
        let mut rows: Vec<LogEntryModel> = self
            .rows
            .lock()
            .iter()
            .filter(|row| row.target_id == target_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        rows
    }
}

#[async_trait]
impl<T: Loggable + Sync> SaveLogEntry<Postgres, T> for MemoryLogStore<T> {
    async fn save(&self, mut entry: LogEntryModel) -> LogResult<LogEntryModel> {
        let mut rows = self.rows.lock();
        if let Some(stored) = rows.iter().find(|row| row.id == entry.id) {
            entry.ensure_matches(stored)?;
            return Ok(stored.clone());
        }
        self.kinds.check_code(entry.kind)?;
        entry.seal()?;
        rows.push(entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl<T: Loggable + Sync> AppendLogEntry<Postgres, T> for MemoryLogStore<T> {
    fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }
}

#[async_trait]
impl<T: Loggable + Sync> LoadLogEntries<Postgres, T> for MemoryLogStore<T> {
    async fn log_entries(&self, target_id: Uuid, page: PageRequest) -> LogResult<Page<LogEntryModel>> {
        let rows = self.rows_for(target_id);
        let total = rows.len();
        let items = rows.into_iter().skip(page.offset).take(page.limit).collect();
        Ok(Page::new(items, total, page.limit, page.offset))
    }

    async fn count_log_entries(&self, target_id: Uuid) -> LogResult<usize> {
        Ok(self.rows_for(target_id).len())
    }

    async fn last_log_entry(&self, target_id: Uuid) -> LogResult<Option<LogEntryModel>> {
        Ok(self.rows_for(target_id).pop())
    }
}

#[async_trait]
impl<T> LoadBatch<Postgres, LogEntryModel> for MemoryLogStore<T> {
    async fn load_batch(&self, ids: &[Uuid]) -> LogResult<Vec<Option<LogEntryModel>>> {
        let rows = self.rows.lock();
        Ok(ids
            .iter()
            .map(|id| rows.iter().find(|row| row.id == *id).cloned())
            .collect())
    }
}

#[async_trait]
impl<T> DeleteBatch<Postgres> for MemoryLogStore<T> {
    async fn delete_batch(&self, ids: &[Uuid]) -> LogResult<usize> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|row| !ids.contains(&row.id));
        Ok(before - rows.len())
    }
}
