use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::kind::LogKind;

/// Longest accepted log message, in characters
pub const MESSAGE_MAX_CHARS: usize = 256;

/// Arguments of the append-log-entry operation.
///
/// `kind` falls back to the default built-in kind when absent. With `save`
/// set to false the entry is built but not written, so the caller may still
/// adjust it before saving it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AddLogEntryRequest {
    #[validate(length(min = 1, max = 256))]
    pub message: String,

    #[serde(default)]
    pub kind: Option<LogKind>,

    #[serde(default)]
    pub user_id: Option<Uuid>,

    #[serde(default = "default_save")]
    pub save: bool,
}

fn default_save() -> bool {
    true
}

impl AddLogEntryRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: None,
            user_id: None,
            save: true,
        }
    }

    pub fn kind(mut self, kind: impl Into<LogKind>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Build the entry without persisting it.
    pub fn unsaved(mut self) -> Self {
        self.save = false;
        self
    }
}

impl From<&str> for AddLogEntryRequest {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for AddLogEntryRequest {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
