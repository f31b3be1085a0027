//! Creation and removal of the generated log tables
//!
//! The host application owns its own schema; these helpers only manage the
//! `<target>_log_entry` tables of the log models defined at startup.

use entity_log_api::LogResult;
use entity_log_db::models::log::LogModelRegistry;
use sqlx::PgPool;

/// Create the table of every defined log model, in definition order
///
/// Target (and user) tables must already exist. Running it again is harmless.
///
/// # Example
///
/// ```rust,no_run
/// use entity_log_db::models::log::LogModelRegistry;
/// use entity_log_postgres::repository::db_init::init_log_tables;
/// use sqlx::PgPool;
///
/// # async fn example(pool: &PgPool, models: &LogModelRegistry) -> entity_log_api::LogResult<()> {
/// init_log_tables(pool, models).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_log_tables(pool: &PgPool, models: &LogModelRegistry) -> LogResult<()> {
    for schema in models.schemas() {
        sqlx::raw_sql(&schema.create_table_sql()).execute(pool).await?;
        tracing::debug!(table = %schema.table_name, model = %schema.model_path(), "log table ready");
    }
    Ok(())
}

/// Drop the table of every defined log model, in reverse definition order
pub async fn drop_log_tables(pool: &PgPool, models: &LogModelRegistry) -> LogResult<()> {
    for schema in models.schemas().iter().rev() {
        sqlx::raw_sql(&schema.drop_table_sql()).execute(pool).await?;
        tracing::debug!(table = %schema.table_name, "log table dropped");
    }
    Ok(())
}
