use std::sync::Arc;
use entity_log_api::LogResult;
use entity_log_db::models::log::{KindRegistry, LogModelRegistry};
use entity_log_db::models::loggable::Loggable;
use postgres_unit_of_work::{Executor, UnitOfWorkSession};
use super::LogEntryRepositoryImpl;

/// Factory for creating log entry repositories
///
/// Holds the log models defined at startup and the frozen kind registry, and
/// builds repositories bound to a session's executor. Use it as a singleton.
pub struct LogRepoFactory {
    models: Arc<LogModelRegistry>,
    kinds: Arc<KindRegistry>,
}

impl LogRepoFactory {
    pub fn new(models: Arc<LogModelRegistry>, kinds: Arc<KindRegistry>) -> Arc<Self> {
        Arc::new(Self { models, kinds })
    }

    pub fn models(&self) -> &LogModelRegistry {
        &self.models
    }

    pub fn kinds(&self) -> &Arc<KindRegistry> {
        &self.kinds
    }

    /// Build the log entry repository of `T` on the given executor
    ///
    /// Fails with `LogModelNotDefined` unless the log model of `T` was defined.
    pub fn build_with_executor<T: Loggable>(&self, executor: Executor) -> LogResult<LogEntryRepositoryImpl<T>> {
        let schema = self.models.related::<T>()?;
        LogEntryRepositoryImpl::new(executor, schema, self.kinds.clone())
    }

    /// Build the log entry repository of `T` for a unit of work session
    pub fn build_log_entry_repo<T: Loggable + Sync + 'static>(
        &self,
        session: &impl UnitOfWorkSession,
    ) -> LogResult<Arc<LogEntryRepositoryImpl<T>>> {
        let repo = Arc::new(self.build_with_executor::<T>(session.executor().clone())?);
        session.register_transaction_aware(repo.clone());
        Ok(repo)
    }
}
