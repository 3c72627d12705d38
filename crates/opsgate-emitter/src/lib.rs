//! Periodic JSON metric emitter.
//!
//! A single cooperative loop: wait for the next tick or a shutdown signal,
//! sample a random metric on each tick, write it as one JSON line.

pub mod config;
pub mod emitter;
pub mod sample;
pub mod signal;

pub use config::EmitterConfig;
pub use emitter::{Emitter, EmitterState};
pub use sample::MetricSample;
