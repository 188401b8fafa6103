//! Artifact access for the DFIR workbench.
//!
//! Everything the external analysis tools write lands on a shared volume
//! that outlives the serving process. This crate owns the two concerns that
//! make serving those artifacts safe:
//!
//! - [`guard`] - traversal-safe resolution of client-supplied paths against
//!   a fixed root. Every path segment a client sends passes through here
//!   before any filesystem operation.
//! - [`store`] - enumeration, JSON-Lines decoding, recursive listing, and
//!   idempotent cleanup of on-disk outputs.

pub mod error;
pub mod guard;
pub mod prelude;
pub mod store;
