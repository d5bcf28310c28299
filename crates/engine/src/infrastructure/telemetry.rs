//! Telemetry adapters.

use crate::infrastructure::ports::{TelemetryEvent, TelemetryPort};

/// Writes every event to the tracing pipeline under the `telemetry` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetry;

impl TelemetryPort for TracingTelemetry {
    fn emit(&self, event: TelemetryEvent) {
        match event {
            TelemetryEvent::BackendUnavailable { status, message } => {
                tracing::warn!(
                    target: "telemetry",
                    event = "backend_unavailable",
                    status = ?status,
                    message = %message,
                    "Dialogue backend unavailable"
                );
            }
            TelemetryEvent::ValidationRejected {
                signature,
                code,
                issues,
            } => {
                tracing::warn!(
                    target: "telemetry",
                    event = "validation_rejected",
                    signature = %signature,
                    code = ?code,
                    issues = ?issues,
                    "Dialogue backend rejected request"
                );
            }
            TelemetryEvent::Truncated {
                character,
                original_chars,
                clamped_chars,
            } => {
                tracing::info!(
                    target: "telemetry",
                    event = "truncated",
                    character = %character,
                    original_chars,
                    clamped_chars,
                    "Generated reply clamped to persona budget"
                );
            }
        }
    }
}

/// Keeps every event in memory for assertions.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingTelemetry(std::sync::Mutex<Vec<TelemetryEvent>>);

#[cfg(test)]
impl RecordingTelemetry {
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.name() == name)
            .count()
    }
}

#[cfg(test)]
impl TelemetryPort for RecordingTelemetry {
    fn emit(&self, event: TelemetryEvent) {
        self.0.lock().unwrap().push(event);
    }
}
