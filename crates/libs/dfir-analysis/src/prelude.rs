//! Common types and utilities.

/// Orchestration error type.
pub use crate::error::Error;

/// Orchestration result type.
pub type Result<T> = core::result::Result<T, Error>;
