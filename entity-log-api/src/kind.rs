use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in log entry kinds.
///
/// The discriminants are persisted as the `kind` column of every log table
/// and must never be renumbered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEntryKind {
    #[default]
    Other = 0,
    Edit = 1,
    Deletion = 2,
    Note = 3,
    Email = 4,
    Warning = 5,
    Error = 6,
    Audit = 7,
}

impl LogEntryKind {
    pub const ALL: [LogEntryKind; 8] = [
        LogEntryKind::Other,
        LogEntryKind::Edit,
        LogEntryKind::Deletion,
        LogEntryKind::Note,
        LogEntryKind::Email,
        LogEntryKind::Warning,
        LogEntryKind::Error,
        LogEntryKind::Audit,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        self.into()
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl From<LogEntryKind> for &str {
    fn from(val: LogEntryKind) -> Self {
        match val {
            LogEntryKind::Other => "other",
            LogEntryKind::Edit => "edit",
            LogEntryKind::Deletion => "deletion",
            LogEntryKind::Note => "note",
            LogEntryKind::Email => "email",
            LogEntryKind::Warning => "warning",
            LogEntryKind::Error => "error",
            LogEntryKind::Audit => "audit",
        }
    }
}

impl FromStr for LogEntryKind {
    type Err = ();

    /// Matches built-in labels case-insensitively, so `"edit"` and `"EDIT"` are equivalent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for LogEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every shape a caller may use to name a kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Builtin(LogEntryKind),
    Label(String),
    Code(i32),
}

impl Default for LogKind {
    fn default() -> Self {
        LogKind::Builtin(LogEntryKind::default())
    }
}

impl From<LogEntryKind> for LogKind {
    fn from(kind: LogEntryKind) -> Self {
        LogKind::Builtin(kind)
    }
}

impl From<&str> for LogKind {
    fn from(label: &str) -> Self {
        LogKind::Label(label.to_string())
    }
}

impl From<String> for LogKind {
    fn from(label: String) -> Self {
        LogKind::Label(label)
    }
}

impl From<i32> for LogKind {
    fn from(code: i32) -> Self {
        LogKind::Code(code)
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogKind::Builtin(kind) => write!(f, "{kind}"),
            LogKind::Label(label) => write!(f, "'{label}'"),
            LogKind::Code(code) => write!(f, "{code}"),
        }
    }
}
