//! opsgate core: transport-agnostic operations, authorization, and errors.
//!
//! The gateway and emitter crates build on the types here. This crate carries
//! no HTTP or runtime dependencies; it only sees strings, bytes, and form
//! values extracted by the transport.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `OpsGateError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod auth;
pub mod error;
pub mod form;
pub mod ops;

/// Shared result type.
pub use error::{ClientCode, OpsGateError, Result};
pub use form::FormValues;
