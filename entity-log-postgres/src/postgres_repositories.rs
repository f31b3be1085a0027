use entity_log_api::LogResult;
use entity_log_db::models::log::{KindRegistry, LogModelRegistry};
use entity_log_db::models::loggable::Loggable;
use postgres_unit_of_work::Executor;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::LogConfig;
use crate::repository::db_init::init_log_tables;
use crate::repository::log::{LogEntryRepositoryImpl, LogRepoFactory};
use crate::utils::transaction_consumed;

/// Entry point owning the pool and the startup registries
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
    factory: Arc<LogRepoFactory>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>, models: Arc<LogModelRegistry>, kinds: Arc<KindRegistry>) -> Self {
        Self {
            pool,
            factory: LogRepoFactory::new(models, kinds),
        }
    }

    /// Connect with `config` and freeze its custom kinds.
    pub async fn connect(config: &LogConfig, models: Arc<LogModelRegistry>) -> LogResult<Self> {
        let kinds = Arc::new(config.kind_registry()?);
        let pool = config.connect().await?;
        tracing::info!(models = models.len(), kinds = kinds.len(), "log repositories connected");
        Ok(Self::new(Arc::new(pool), models, kinds))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn factory(&self) -> &Arc<LogRepoFactory> {
        &self.factory
    }

    /// Create the tables of all defined log models.
    pub async fn init_tables(&self) -> LogResult<()> {
        init_log_tables(&self.pool, self.factory.models()).await
    }

    /// Start a transaction shared by the repositories built on the returned executor
    pub async fn begin(&self) -> LogResult<Executor> {
        let tx = self.pool.begin().await?;
        Ok(Executor::new(tx))
    }

    pub fn log_entry_repository<T: Loggable>(
        &self,
        executor: &Executor,
    ) -> LogResult<Arc<LogEntryRepositoryImpl<T>>> {
        Ok(Arc::new(self.factory.build_with_executor::<T>(executor.clone())?))
    }

    /// Commit the executor's transaction; later use of the executor fails.
    pub async fn commit(executor: &Executor) -> LogResult<()> {
        let tx = executor
            .tx
            .lock()
            .await
            .take()
            .ok_or_else(transaction_consumed)?;
        tx.commit().await?;
        Ok(())
    }
}
