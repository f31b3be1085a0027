//! Test helper module for transaction-based test isolation
//!
//! Tests run inside a transaction that is rolled back when the
//! [`TestContext`] is dropped, so no cleanup is needed. The host tables
//! (`logged_model`, `app_user`) come from the fixtures in `migrations/`; the
//! log table is generated from the log model of [`LoggedModel`].

use crate::config::LogConfig;
use crate::repository::db_init::init_log_tables;
use crate::repository::log::LogEntryRepositoryImpl;
use entity_log_db::models::identifiable::Identifiable;
use entity_log_db::models::log::{CustomKind, KindRegistry, LogModelRegistry};
use entity_log_db::models::loggable::Loggable;
use postgres_unit_of_work::Executor;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Target model of the repository tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedModel {
    pub id: Uuid,
}

impl Identifiable for LoggedModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Loggable for LoggedModel {
    const TABLE_NAME: &'static str = "logged_model";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUser {
    pub id: Uuid,
    pub username: String,
    pub is_superuser: bool,
}

/// Test context holding a transactional log entry repository
pub struct TestContext {
    pub executor: Executor,
    pub kinds: Arc<KindRegistry>,
    pub log_entry_repository: Arc<LogEntryRepositoryImpl<LoggedModel>>,
}

impl TestContext {
    pub async fn create_logged_model(&self) -> TestResult<LoggedModel> {
        let model = LoggedModel { id: Uuid::new_v4() };
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        sqlx::query("INSERT INTO logged_model (id) VALUES ($1)")
            .bind(model.id)
            .execute(&mut **transaction)
            .await?;
        Ok(model)
    }

    pub async fn delete_logged_model(&self, id: Uuid) -> TestResult<()> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        sqlx::query("DELETE FROM logged_model WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;
        Ok(())
    }

    pub async fn create_admin_user(&self) -> TestResult<AppUser> {
        let user = AppUser {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            is_superuser: true,
        };
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        sqlx::query("INSERT INTO app_user (id, username, is_superuser) VALUES ($1, $2, $3)")
            .bind(user.id)
            .bind(&user.username)
            .bind(user.is_superuser)
            .execute(&mut **transaction)
            .await?;
        Ok(user)
    }

    pub async fn is_superuser(&self, user_id: Uuid) -> TestResult<bool> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let is_superuser: bool = sqlx::query_scalar("SELECT is_superuser FROM app_user WHERE id = $1")
            .bind(user_id)
            .fetch_one(&mut **transaction)
            .await?;
        Ok(is_superuser)
    }
}

/// Connect to the test database and apply the fixture migrations
pub async fn connect_test_pool() -> TestResult<PgPool> {
    let config = LogConfig {
        max_connections: 1,
        ..LogConfig::from_env()?
    };
    let pool = config.connect().await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

/// Setup a test context with a transactional database session
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await?;
///     let lm = ctx.create_logged_model().await?;
///     lm.add_log_entry(ctx.log_entry_repository.as_ref(), "hello").await?;
///     // rolled back when ctx is dropped
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> TestResult<TestContext> {
    let pool = connect_test_pool().await?;

    let models = LogModelRegistry::new();
    let schema = models.define_with_user::<LoggedModel>("app_user")?;
    init_log_tables(&pool, &models).await?;

    let kinds = Arc::new(
        KindRegistry::builder()
            .register(CustomKind::new("custom_kind", 3010, "very custom"))?
            .build(),
    );

    let tx = pool.begin().await?;
    let executor = Executor::new(tx);
    let log_entry_repository = Arc::new(LogEntryRepositoryImpl::new(
        executor.clone(),
        schema,
        kinds.clone(),
    )?);

    Ok(TestContext {
        executor,
        kinds,
        log_entry_repository,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_log_db::repository::append_log_entry::LogTarget;

    #[tokio::test]
    #[serial_test::serial]
    async fn test_transaction_rollback() -> TestResult<()> {
        let lm = {
            let ctx = setup_test_context().await?;
            let lm = ctx.create_logged_model().await?;
            lm.add_log_entry(ctx.log_entry_repository.as_ref(), "rolled back").await?;
            assert_eq!(lm.log_entry_count(ctx.log_entry_repository.as_ref()).await?, 1);
            lm
        };

        let ctx = setup_test_context().await?;
        assert_eq!(lm.log_entry_count(ctx.log_entry_repository.as_ref()).await?, 0);

        Ok(())
    }
}
