//! Error types for port operations.

/// Failure of one outbound generation call.
///
/// Only the class matters to the circuit: [`BackendError::is_degradation`]
/// separates backend trouble (opens the circuit) from caller-contract
/// problems (never opens it).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Connection refused, timeout, DNS, TLS.
    #[error("Backend request failed: {0}")]
    Network(String),

    /// 5xx (or any other non-success, non-4xx status).
    #[error("Backend server error: HTTP {status}")]
    Server { status: u16 },

    /// 4xx: the request itself was malformed.
    #[error("Backend rejected request: HTTP {status}")]
    Rejected {
        status: u16,
        code: Option<String>,
        issues: Vec<String>,
    },

    /// 2xx with a body that does not parse.
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    pub fn network(message: impl ToString) -> Self {
        Self::Network(message.to_string())
    }

    pub fn invalid_response(message: impl ToString) -> Self {
        Self::InvalidResponse(message.to_string())
    }

    /// Whether this failure means the backend is degraded.
    pub fn is_degradation(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    /// HTTP status, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status } | Self::Rejected { status, .. } => Some(*status),
            Self::Network(_) | Self::InvalidResponse(_) => None,
        }
    }
}
