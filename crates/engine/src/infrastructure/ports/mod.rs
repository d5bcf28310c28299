//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - The text-generation backend (could swap HTTP -> in-process model)
//! - Telemetry sinks (could swap tracing -> metrics pipeline)
//! - Clock (for testing)

mod backend;
mod error;
mod telemetry;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use backend::DialogueBackendPort;
pub use telemetry::{TelemetryEvent, TelemetryPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use backend::MockDialogueBackendPort;

#[cfg(test)]
pub use telemetry::MockTelemetryPort;

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::BackendError;
