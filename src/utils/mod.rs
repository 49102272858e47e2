// src/utils/mod.rs

pub mod error;
pub mod time;

// Re-export commonly used items
pub use error::{ErrorDetails, ErrorKind, TabError, TabResult};
