//! Text-generation backend port.

use async_trait::async_trait;

use super::error::BackendError;
use crate::dialogue_context::{GenerationReply, GenerationRequest};

/// One request, one reply. Implementations must not retry; the caller owns
/// retry policy through the circuit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogueBackendPort: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationReply, BackendError>;
}
