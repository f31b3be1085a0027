use chrono::{DateTime, SubsecRound, Utc};
use entity_log_api::{LogError, LogResult, MESSAGE_MAX_CHARS};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::kind_registry::KindRegistry;
use crate::models::identifiable::Identifiable;
use crate::utils::hash_as_i64;

/// Buffer size of a message: every accepted character fits in at most 4 UTF-8 bytes
pub const MESSAGE_MAX_BYTES: usize = 4 * MESSAGE_MAX_CHARS;

/// # Documentation
/// - One immutable entry in the log of a target record.
/// - Lives in the `<target_table>_log_entry` table generated for the target type.
/// - Created through the append operation, never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntryModel {
    pub id: Uuid,

    /// Owning record in the target table
    pub target_id: Uuid,

    /// Registered kind code, see [`KindRegistry`]
    pub kind: i32,

    pub message: HeaplessString<MESSAGE_MAX_BYTES>,

    /// Acting principal, if any
    pub user_id: Option<Uuid>,

    /// Truncated to microseconds so the value survives a round trip through `TIMESTAMPTZ`
    pub created_at: DateTime<Utc>,

    /// Hash of the entry with this field set to 0
    /// - 0: not yet persisted
    /// - Non-zero: sealed on first save; every later save must reproduce it
    pub hash: i64,
}

impl LogEntryModel {
    pub fn new(
        target_id: Uuid,
        kind: i32,
        message: &str,
        user_id: Option<Uuid>,
    ) -> LogResult<Self> {
        Ok(Self {
            // time-ordered, breaks created_at ties
            id: Uuid::now_v7(),
            target_id,
            kind,
            message: Self::message_from_str(message)?,
            user_id,
            created_at: Utc::now().trunc_subsecs(6),
            hash: 0,
        })
    }

    fn message_from_str(message: &str) -> LogResult<HeaplessString<MESSAGE_MAX_BYTES>> {
        let too_long = || {
            LogError::Validation(format!(
                "log message is too long (max {MESSAGE_MAX_CHARS} characters)"
            ))
        };
        if message.chars().count() > MESSAGE_MAX_CHARS {
            return Err(too_long());
        }
        HeaplessString::try_from(message).map_err(|_| too_long())
    }

    pub fn set_message(&mut self, message: &str) -> LogResult<()> {
        self.message = Self::message_from_str(message)?;
        Ok(())
    }

    pub fn is_sealed(&self) -> bool {
        self.hash != 0
    }

    pub fn compute_hash(&self) -> LogResult<i64> {
        let mut for_hashing = self.clone();
        for_hashing.hash = 0;
        hash_as_i64(&for_hashing).map_err(LogError::Validation)
    }

    /// Fix the current contents; called right before the first write.
    pub fn seal(&mut self) -> LogResult<()> {
        self.hash = self.compute_hash()?;
        Ok(())
    }

    /// Names of the fields that differ from the persisted version of this entry.
    ///
    /// The hash is only compared once this copy has been sealed.
    pub fn changed_fields(&self, stored: &LogEntryModel) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.target_id != stored.target_id {
            changed.push("target_id");
        }
        if self.kind != stored.kind {
            changed.push("kind");
        }
        if self.message != stored.message {
            changed.push("message");
        }
        if self.user_id != stored.user_id {
            changed.push("user_id");
        }
        if self.created_at != stored.created_at {
            changed.push("created_at");
        }
        if self.is_sealed() && self.hash != stored.hash {
            changed.push("hash");
        }
        changed
    }

    /// Fails with the value error when this copy no longer matches `stored`.
    pub fn ensure_matches(&self, stored: &LogEntryModel) -> LogResult<()> {
        match self.changed_fields(stored).first().copied() {
            Some(field) => Err(LogError::ImmutableLogEntry {
                id: self.id,
                field,
            }),
            None => Ok(()),
        }
    }

    pub fn kind_display<'r>(&self, kinds: &'r KindRegistry) -> LogResult<&'r str> {
        kinds.display(self.kind)
    }
}

impl Identifiable for LogEntryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl fmt::Display for LogEntryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.created_at.format("%Y-%m-%d %H:%M:%S"),
            self.kind,
            self.message
        )
    }
}
