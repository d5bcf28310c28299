//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod http_backend;
pub mod ports;
pub mod resilience;
pub mod settings;
pub mod telemetry;
