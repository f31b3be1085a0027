pub mod identifiable;
pub mod loggable;
pub mod log;

// Re-exports
pub use identifiable::*;
pub use loggable::*;
pub use log::*;
