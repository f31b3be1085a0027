pub mod repo_impl;
pub mod save;
pub mod load_batch;
pub mod load_log_entries;
pub mod delete_batch;
#[cfg(test)]
pub mod test_utils;

pub use repo_impl::LogEntryRepositoryImpl;
