pub mod kind_registry;
pub mod log_entry;
pub mod log_model;

pub use kind_registry::*;
pub use log_entry::*;
pub use log_model::*;
