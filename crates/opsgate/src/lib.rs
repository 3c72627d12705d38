//! Top-level facade crate for opsgate.
//!
//! Re-exports the core types, the gateway library, and the metric emitter so
//! users can depend on a single crate.

pub mod core {
    pub use opsgate_core::*;
}

pub mod gateway {
    pub use opsgate_gateway::*;
}

pub mod emitter {
    pub use opsgate_emitter::*;
}
