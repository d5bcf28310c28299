//! HTTP client for the NPC reply service.
//!
//! `POST {base_url}/v1/npc/reply` with a JSON [`GenerationRequest`]. Status
//! classification:
//!
//! - 2xx: body must parse as [`GenerationReply`], otherwise `InvalidResponse`
//! - 4xx: `Rejected`, with `{code, issues}` when the body carries them
//! - anything else: `Server`
//! - no response at all: `Network`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::dialogue_context::{GenerationReply, GenerationRequest, RejectionBody};
use crate::infrastructure::ports::{BackendError, DialogueBackendPort};

/// Default reply service base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8787";

const REPLY_PATH: &str = "/v1/npc/reply";

#[derive(Clone)]
pub struct HttpDialogueBackend {
    client: Client,
    base_url: String,
}

impl HttpDialogueBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, REPLY_PATH)
    }
}

impl Default for HttpDialogueBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL, Duration::from_secs(8))
    }
}

#[async_trait]
impl DialogueBackendPort for HttpDialogueBackend {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationReply, BackendError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(BackendError::network)?;

        let status = response.status();

        if status.is_client_error() {
            // The body is optional; an unparseable one still counts as a rejection.
            let body = response
                .json::<RejectionBody>()
                .await
                .unwrap_or_default();
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                code: body.code,
                issues: body.issues,
            });
        }

        if !status.is_success() {
            return Err(BackendError::Server {
                status: status.as_u16(),
            });
        }

        response
            .json::<GenerationReply>()
            .await
            .map_err(BackendError::invalid_response)
    }
}
