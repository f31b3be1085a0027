pub mod config;
pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use config::LogConfig;
pub use postgres_repositories::PostgresRepositories;
pub use repository::log::{LogEntryRepositoryImpl, LogRepoFactory};

#[cfg(test)]
pub mod test_helper;
