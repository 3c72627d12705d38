//! opsgate gateway library entry.
//!
//! Wires config, route handlers, and the axum router into the HTTP service.
//! Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod router;
pub mod routes;

pub use app_state::AppState;
pub use router::build_router;
