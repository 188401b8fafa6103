//! Common types and utilities.

/// Artifact access error type.
pub use crate::error::Error;

/// Artifact access result type.
pub type Result<T> = core::result::Result<T, Error>;
