use super::identifiable::Identifiable;

/// Trait for data models that carry an immutable log of entries
///
/// Implementing this trait is all a model needs to be passed to
/// [`LogModelRegistry::define`](crate::models::log::LogModelRegistry::define);
/// every implementor also gets the [`LogTarget`](crate::repository::LogTarget)
/// operations.
pub trait Loggable: Identifiable {
    /// Name of the table holding the model's rows; the log table references its `id` column
    const TABLE_NAME: &'static str;

    /// Full path of the model type, used to bind a log model to exactly one target
    fn type_path() -> &'static str {
        std::any::type_name::<Self>()
    }
}
