use async_trait::async_trait;
use entity_log_api::{AddLogEntryRequest, LogEntryKind, LogResult};
use sqlx::Database;
use validator::Validate;

use crate::models::log::{KindRegistry, LogEntryModel};
use crate::models::loggable::Loggable;
use crate::repository::load_log_entries::LoadLogEntries;
use crate::repository::pagination::{Page, PageRequest};
use crate::repository::save_log_entry::SaveLogEntry;

/// Repository trait appending new entries to the log of a target record
///
/// The provided [`add_log_entry`](Self::add_log_entry) validates the request,
/// resolves the kind through [`kinds`](Self::kinds) (defaulting to
/// [`LogEntryKind::Other`]), builds the entry bound to the target and saves it
/// unless the request asks for an unsaved entry.
#[async_trait]
pub trait AppendLogEntry<DB: Database, T: Loggable + Sync>: SaveLogEntry<DB, T> {
    fn kinds(&self) -> &KindRegistry;

    async fn add_log_entry(&self, target: &T, request: AddLogEntryRequest) -> LogResult<LogEntryModel> {
        request.validate()?;
        let kind = match &request.kind {
            Some(kind) => self.kinds().resolve(kind)?,
            None => LogEntryKind::default().code(),
        };
        let entry = LogEntryModel::new(target.get_id(), kind, &request.message, request.user_id)?;
        if request.save {
            self.save(entry).await
        } else {
            Ok(entry)
        }
    }
}

/// Log operations available on every [`Loggable`] record
///
/// # Example
/// ```ignore
/// order.add_log_entry(&repo, "shipped").await?;
/// order
///     .add_log_entry(&repo, AddLogEntryRequest::new("edited").kind(LogEntryKind::Edit))
///     .await?;
/// let last = order.last_log_entry(&repo).await?;
/// ```
#[async_trait]
pub trait LogTarget: Loggable + Sized + Sync {
    async fn add_log_entry<DB, R, M>(&self, repo: &R, request: M) -> LogResult<LogEntryModel>
    where
        DB: Database,
        R: AppendLogEntry<DB, Self> + Sync + ?Sized,
        M: Into<AddLogEntryRequest> + Send,
    {
        repo.add_log_entry(self, request.into()).await
    }

    /// The reverse collection of this record's entries.
    async fn log_entries<DB, R>(&self, repo: &R, page: PageRequest) -> LogResult<Page<LogEntryModel>>
    where
        DB: Database,
        R: LoadLogEntries<DB, Self> + Sync + ?Sized,
    {
        repo.log_entries(self.get_id(), page).await
    }

    async fn log_entry_count<DB, R>(&self, repo: &R) -> LogResult<usize>
    where
        DB: Database,
        R: LoadLogEntries<DB, Self> + Sync + ?Sized,
    {
        repo.count_log_entries(self.get_id()).await
    }

    async fn last_log_entry<DB, R>(&self, repo: &R) -> LogResult<Option<LogEntryModel>>
    where
        DB: Database,
        R: LoadLogEntries<DB, Self> + Sync + ?Sized,
    {
        repo.last_log_entry(self.get_id()).await
    }
}

impl<T: Loggable + Sync> LogTarget for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::identifiable::Identifiable;
    use crate::models::log::CustomKind;
    use crate::repository::delete_batch::DeleteBatch;
    use crate::repository::load_batch::LoadBatch;
    use crate::repository::memory::MemoryLogStore;
    use entity_log_api::LogError;
    use uuid::Uuid;

    struct LoggedModel {
        id: Uuid,
    }

    impl Identifiable for LoggedModel {
        fn get_id(&self) -> Uuid {
            self.id
        }
    }

    impl Loggable for LoggedModel {
        const TABLE_NAME: &'static str = "logged_model";
    }

    fn new_model() -> LoggedModel {
        LoggedModel { id: Uuid::new_v4() }
    }

    fn new_store() -> MemoryLogStore<LoggedModel> {
        let kinds = KindRegistry::builder()
            .register(CustomKind::new("custom_kind", 3010, "very custom"))
            .unwrap()
            .build();
        MemoryLogStore::new(kinds)
    }

    #[tokio::test]
    async fn test_add_log_entry() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();

        let entry = lm.add_log_entry(&store, "hello, world").await?;

        assert_eq!(lm.log_entry_count(&store).await?, 1);
        let last = lm.last_log_entry(&store).await?.expect("entry was saved");
        assert_eq!(last.id, entry.id);
        assert_eq!(last.target_id, lm.id);
        assert_eq!(last.kind, LogEntryKind::Other.code());
        assert!(last.is_sealed());
        Ok(())
    }

    #[tokio::test]
    async fn test_log_entry_kind() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();

        lm.add_log_entry(&store, AddLogEntryRequest::new("edited").kind(LogEntryKind::Edit))
            .await?;

        let last = lm.last_log_entry(&store).await?.expect("entry was saved");
        assert_eq!(last.kind_display(store.kinds())?, "edit");
        Ok(())
    }

    #[tokio::test]
    async fn test_log_mutation() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();
        lm.add_log_entry(&store, AddLogEntryRequest::new("benign action").kind(LogEntryKind::Edit))
            .await?;

        let mut entry = lm.last_log_entry(&store).await?.expect("entry was saved");
        entry.set_message("sneak")?;
        let err = store.save(entry.clone()).await.unwrap_err();
        assert!(err.is_value_error());
        assert!(matches!(err, LogError::ImmutableLogEntry { field: "message", .. }));

        let stored = store.load_batch(&[entry.id]).await?;
        assert_eq!(stored[0].as_ref().unwrap().message.as_str(), "benign action");
        Ok(())
    }

    #[tokio::test]
    async fn test_resave_unchanged_is_noop() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();
        let entry = lm.add_log_entry(&store, "once").await?;

        let again = store.save(entry.clone()).await?;
        assert_eq!(again, entry);
        assert_eq!(lm.log_entry_count(&store).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_user_logging() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();
        let admin_id = Uuid::new_v4();

        lm.add_log_entry(
            &store,
            AddLogEntryRequest::new("audit").kind(LogEntryKind::Audit).user(admin_id),
        )
        .await?;

        let last = lm.last_log_entry(&store).await?.expect("entry was saved");
        assert_eq!(last.user_id, Some(admin_id));
        assert_eq!(last.kind, LogEntryKind::Audit.code());
        Ok(())
    }

    #[tokio::test]
    async fn test_modify_before_save() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();

        let mut entry = lm
            .add_log_entry(&store, AddLogEntryRequest::new("hi").unsaved())
            .await?;
        assert!(!entry.is_sealed());
        assert_eq!(lm.log_entry_count(&store).await?, 0);

        entry.set_message("hey")?;
        store.save(entry).await?;

        let last = lm.last_log_entry(&store).await?.expect("entry was saved");
        assert_eq!(last.message.as_str(), "hey");
        Ok(())
    }

    #[tokio::test]
    async fn test_custom_kind() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();

        let entry = lm
            .add_log_entry(&store, AddLogEntryRequest::new("custom").kind("custom_kind"))
            .await?;

        assert_eq!(entry.kind, 3010);
        assert_eq!(entry.kind_display(store.kinds())?, "very custom");
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_kinds() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();

        let err = lm
            .add_log_entry(&store, AddLogEntryRequest::new("custom").kind("is0wdfjgwr"))
            .await
            .unwrap_err();
        assert!(err.is_unknown_kind());

        let err = lm
            .add_log_entry(&store, AddLogEntryRequest::new("custom").kind(43524))
            .await
            .unwrap_err();
        assert!(err.is_unknown_kind());

        assert_eq!(lm.log_entry_count(&store).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();
        let err = lm.add_log_entry(&store, "").await.unwrap_err();
        assert!(matches!(err, LogError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_non_ascii_message() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();
        let message = "é".repeat(entity_log_api::MESSAGE_MAX_CHARS);

        lm.add_log_entry(&store, message.as_str()).await?;

        let last = lm.last_log_entry(&store).await?.expect("entry was saved");
        assert_eq!(last.message.as_str(), message);
        Ok(())
    }

    #[tokio::test]
    async fn test_unregistered_code_is_rejected_on_first_save() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();

        let mut entry = lm
            .add_log_entry(&store, AddLogEntryRequest::new("hi").unsaved())
            .await?;
        entry.kind = 43524;
        let err = store.save(entry).await.unwrap_err();
        assert!(err.is_unknown_kind());
        assert_eq!(lm.log_entry_count(&store).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_reverse_collection_is_scoped_and_paged() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();
        let other = new_model();

        for i in 0..5 {
            lm.add_log_entry(&store, format!("entry {i}")).await?;
        }
        other.add_log_entry(&store, "elsewhere").await?;

        let page = lm.log_entries(&store, PageRequest::new(2, 0)).await?;
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].message.as_str(), "entry 0");
        assert!(page.has_more());

        let page = lm.log_entries(&store, PageRequest::for_page(2, 3)).await?;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].message.as_str(), "entry 4");
        assert!(!page.has_more());

        assert_eq!(other.log_entry_count(&store).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_batch() -> LogResult<()> {
        let store = new_store();
        let lm = new_model();
        let first = lm.add_log_entry(&store, "first").await?;
        lm.add_log_entry(&store, "second").await?;

        let deleted = store.delete_batch(&[first.id, Uuid::new_v4()]).await?;
        assert_eq!(deleted, 1);
        assert_eq!(lm.log_entry_count(&store).await?, 1);
        Ok(())
    }
}
