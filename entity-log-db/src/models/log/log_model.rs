use entity_log_api::{LogError, LogResult, MESSAGE_MAX_CHARS};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use crate::models::loggable::Loggable;
use crate::utils::is_sql_identifier;

/// Name of the reverse accessor from a target record to its entries
pub const RELATED_NAME: &str = "log_entries";

const TABLE_SUFFIX: &str = "_log_entry";
const MODEL_SUFFIX: &str = "LogEntry";
const INDEX_SUFFIX: &str = "_target_idx";

/// The log entry model generated for one target type.
///
/// Describes the companion table holding the entries of the target and the
/// relation back to it. Produced by [`LogModelRegistry::define`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogModelSchema {
    /// Full type path of the target model
    pub target_type: &'static str,
    /// Module of the target model; the log model is reported as living next to it
    pub module_path: String,
    /// `<Target>LogEntry`
    pub model_name: String,
    pub target_table: &'static str,
    /// `<target_table>_log_entry`
    pub table_name: String,
    /// Table referenced by `user_id`, if the user reference is bound
    pub user_table: Option<String>,
    pub related_name: &'static str,
}

impl LogModelSchema {
    pub fn for_target<T: Loggable>(user_table: Option<&str>) -> LogResult<Self> {
        let target_type = T::type_path();
        let (module_path, type_name) = split_type_path(target_type);

        if !is_sql_identifier(T::TABLE_NAME) {
            return Err(LogError::Validation(format!(
                "'{}' is not a valid table name for {target_type}",
                T::TABLE_NAME
            )));
        }
        let table_name = format!("{}{TABLE_SUFFIX}", T::TABLE_NAME);
        if !is_sql_identifier(&table_name) {
            return Err(LogError::Validation(format!(
                "log table name '{table_name}' is not a valid identifier"
            )));
        }
        // postgres truncates longer names, which could make two indexes collide
        let index_name = format!("{table_name}{INDEX_SUFFIX}");
        if !is_sql_identifier(&index_name) {
            return Err(LogError::Validation(format!(
                "log index name '{index_name}' is not a valid identifier"
            )));
        }
        if let Some(user_table) = user_table {
            if !is_sql_identifier(user_table) {
                return Err(LogError::Validation(format!(
                    "'{user_table}' is not a valid user table name"
                )));
            }
        }

        Ok(Self {
            target_type,
            module_path: module_path.to_string(),
            model_name: format!("{type_name}{MODEL_SUFFIX}"),
            target_table: T::TABLE_NAME,
            table_name,
            user_table: user_table.map(str::to_string),
            related_name: RELATED_NAME,
        })
    }

    /// Whether the owning-record reference of this model points at `T`.
    pub fn targets<T: Loggable>(&self) -> bool {
        self.target_type == T::type_path()
    }

    /// Full path under which the generated model is reported.
    pub fn model_path(&self) -> String {
        if self.module_path.is_empty() {
            self.model_name.clone()
        } else {
            format!("{}::{}", self.module_path, self.model_name)
        }
    }

    pub fn index_name(&self) -> String {
        format!("{}{INDEX_SUFFIX}", self.table_name)
    }

    /// DDL creating the log table and its lookup index. Safe to run repeatedly.
    pub fn create_table_sql(&self) -> String {
        let table = &self.table_name;
        let index = self.index_name();
        let user_reference = match &self.user_table {
            Some(user_table) => format!(" REFERENCES {user_table}(id) ON DELETE SET NULL"),
            None => String::new(),
        };
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id UUID PRIMARY KEY,
                target_id UUID NOT NULL REFERENCES {target}(id) ON DELETE CASCADE,
                kind INTEGER NOT NULL,
                message VARCHAR({MESSAGE_MAX_CHARS}) NOT NULL,
                user_id UUID{user_reference},
                created_at TIMESTAMPTZ NOT NULL,
                hash BIGINT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS {index} ON {table} (target_id, created_at);
            "#,
            target = self.target_table,
        )
    }

    pub fn drop_table_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {} CASCADE;", self.table_name)
    }
}

fn split_type_path(path: &'static str) -> (&'static str, &'static str) {
    let base = path.split('<').next().unwrap_or(path);
    base.rsplit_once("::").unwrap_or(("", base))
}

/// Startup registry of generated log models, one per target type.
///
/// Written while the application wires its models, read afterwards by the
/// repositories and table initialization.
#[derive(Debug, Default)]
pub struct LogModelRegistry {
    models: RwLock<Vec<Arc<LogModelSchema>>>,
}

impl LogModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the log model of `T` and record its reverse relation.
    ///
    /// Defining a model twice for the same target, or for two targets sharing
    /// a table, is an error.
    pub fn define<T: Loggable>(&self) -> LogResult<Arc<LogModelSchema>> {
        self.insert(LogModelSchema::for_target::<T>(None)?)
    }

    /// Like [`define`](Self::define), with `user_id` referencing `user_table`.
    pub fn define_with_user<T: Loggable>(&self, user_table: &str) -> LogResult<Arc<LogModelSchema>> {
        self.insert(LogModelSchema::for_target::<T>(Some(user_table))?)
    }

    fn insert(&self, schema: LogModelSchema) -> LogResult<Arc<LogModelSchema>> {
        let mut models = self.models.write();
        if let Some(existing) = models
            .iter()
            .find(|m| m.target_type == schema.target_type || m.table_name == schema.table_name)
        {
            return Err(LogError::LogModelAlreadyDefined(format!(
                "{} (table {})",
                schema.target_type, existing.table_name
            )));
        }
        let schema = Arc::new(schema);
        models.push(schema.clone());
        Ok(schema)
    }

    /// The log model whose entries reference `T`.
    pub fn related<T: Loggable>(&self) -> LogResult<Arc<LogModelSchema>> {
        self.models
            .read()
            .iter()
            .find(|m| m.targets::<T>())
            .cloned()
            .ok_or_else(|| LogError::LogModelNotDefined(T::type_path().to_string()))
    }

    /// All defined models, in definition order.
    pub fn schemas(&self) -> Vec<Arc<LogModelSchema>> {
        self.models.read().clone()
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }
}
