pub mod error;
pub mod kind;
pub mod request;

pub use error::*;
pub use kind::*;
pub use request::*;
