use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Unknown log kind: {0}")]
    UnknownLogKind(String),

    /// Raised when an already persisted log entry is saved with a modified field.
    #[error("Log entry {id} is immutable: field `{field}` was modified")]
    ImmutableLogEntry { id: Uuid, field: &'static str },

    #[error("Log kind label '{label}' is already registered with code {existing_code}")]
    DuplicateKindLabel { label: String, existing_code: i32 },

    #[error("Log kind code {code} is already registered as '{existing_label}'")]
    KindCodeCollision { code: i32, existing_label: String },

    #[error("A global kind registry has already been installed")]
    RegistryAlreadyInstalled,

    #[error("Log model already defined for {0}")]
    LogModelAlreadyDefined(String),

    #[error("No log model defined for {0}")]
    LogModelNotDefined(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl LogError {
    /// True for the error raised on an attempt to rewrite an existing log entry.
    pub fn is_value_error(&self) -> bool {
        matches!(self, LogError::ImmutableLogEntry { .. })
    }

    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, LogError::UnknownLogKind(_))
    }
}

impl From<validator::ValidationErrors> for LogError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LogError::Validation(errors.to_string())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for LogError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => LogError::NotFound("row not found".to_string()),
            other => LogError::DatabaseError(other.to_string()),
        }
    }
}

pub type LogResult<T> = Result<T, LogError>;
