use entity_log_api::LogEntryKind;
use entity_log_db::models::log::LogEntryModel;
use uuid::Uuid;

pub fn create_test_log_entry(target_id: Uuid, message: &str) -> LogEntryModel {
    LogEntryModel::new(target_id, LogEntryKind::Note.code(), message, None).unwrap()
}

pub fn create_test_log_entry_with_kind(
    target_id: Uuid,
    kind: LogEntryKind,
    message: &str,
) -> LogEntryModel {
    LogEntryModel::new(target_id, kind.code(), message, None).unwrap()
}
