use uuid::Uuid;

/// Entities addressed by a UUID primary key
pub trait Identifiable {
    fn get_id(&self) -> Uuid;
}
