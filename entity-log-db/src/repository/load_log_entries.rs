use async_trait::async_trait;
use entity_log_api::LogResult;
use sqlx::Database;
use uuid::Uuid;

use crate::models::log::LogEntryModel;
use crate::models::loggable::Loggable;
use crate::repository::pagination::{Page, PageRequest};

/// Reverse relation from a target record of type `T` to its log entries
///
/// Entries are ordered by creation time, oldest first, with the entry id
/// breaking ties.
///
/// # Example
/// ```ignore
/// let page = repo.log_entries(order.id, PageRequest::new(20, 0)).await?;
/// println!("{} entries on page {}", page.items.len(), page.page_number());
/// ```
#[async_trait]
pub trait LoadLogEntries<DB: Database, T: Loggable>: Send + Sync {
    async fn log_entries(&self, target_id: Uuid, page: PageRequest) -> LogResult<Page<LogEntryModel>>;

    async fn count_log_entries(&self, target_id: Uuid) -> LogResult<usize>;

    /// Most recently created entry of the target, if any.
    async fn last_log_entry(&self, target_id: Uuid) -> LogResult<Option<LogEntryModel>>;
}
