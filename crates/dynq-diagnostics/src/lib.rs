//! dynq diagnostics and error handling
//!
//! This crate provides the error infrastructure shared by the dynq crates:
//! structured error codes and the [`QueryError`] type returned when an
//! expression tree cannot be constructed.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for dynq operations
pub type Result<T> = std::result::Result<T, QueryError>;
