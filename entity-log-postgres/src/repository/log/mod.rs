pub mod factory;
pub mod log_entry_repository;

pub use factory::LogRepoFactory;
pub use log_entry_repository::LogEntryRepositoryImpl;
