//! Fire-and-forget telemetry signals.

use parley_domain::CharacterId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    /// Backend degraded. Emitted once per outage.
    BackendUnavailable {
        status: Option<u16>,
        message: String,
    },
    /// Backend rejected a request. Emitted once per distinct signature.
    ValidationRejected {
        signature: String,
        code: Option<String>,
        issues: Vec<String>,
    },
    /// A generated reply was cut to fit the persona budget.
    Truncated {
        character: CharacterId,
        original_chars: usize,
        clamped_chars: usize,
    },
}

impl TelemetryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BackendUnavailable { .. } => "backend_unavailable",
            Self::ValidationRejected { .. } => "validation_rejected",
            Self::Truncated { .. } => "truncated",
        }
    }
}

/// Sink for telemetry. Implementations must not block or fail.
#[cfg_attr(test, mockall::automock)]
pub trait TelemetryPort: Send + Sync {
    fn emit(&self, event: TelemetryEvent);
}
