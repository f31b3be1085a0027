use async_trait::async_trait;
use entity_log_api::LogResult;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for deleting multiple entities in a batch
///
/// This is the only way log entries leave their table apart from the cascade
/// triggered by deleting the owning record.
///
/// # Example
/// ```ignore
/// let deleted = repo.delete_batch(&[entry.id]).await?;
/// assert_eq!(deleted, 1);
/// ```
#[async_trait]
pub trait DeleteBatch<DB: Database>: Send + Sync {
    /// Delete multiple items by their IDs
    ///
    /// # Returns
    /// * `Ok(usize)` - The number of items actually deleted
    /// * `Err` - An error if the statement could not be executed
    async fn delete_batch(&self, ids: &[Uuid]) -> LogResult<usize>;
}
