pub mod append_log_entry;
pub mod delete_batch;
pub mod load_batch;
pub mod load_log_entries;
pub mod pagination;
pub mod save_log_entry;

#[cfg(test)]
pub(crate) mod memory;

// Re-exports
pub use append_log_entry::*;
pub use delete_batch::*;
pub use load_batch::*;
pub use load_log_entries::*;
pub use pagination::*;
pub use save_log_entry::*;
