//! Generative responder: one backend call per turn, guarded by a circuit.
//!
//! Always computes the fallback line first so every exit path has something
//! to say. Degradation (network, 5xx, unparseable 2xx) opens the circuit for
//! the cooldown and reports once per outage. Rejections (4xx) never touch the
//! circuit and are reported once per distinct signature.

use std::sync::Arc;

use parley_domain::{
    persona, CharacterId, DialogueRequest, DialogueResponse, Intent, ResponseSource,
};

use super::clamp::{clamp_reply, compact_whitespace};
use super::{context, fallback};
use crate::dialogue_context::{GenerationReply, GenerationRequest};
use crate::infrastructure::ports::{
    BackendError, ClockPort, DialogueBackendPort, TelemetryEvent, TelemetryPort,
};
use crate::infrastructure::resilience::{validation_signature, ResilienceState};

pub struct GenerativeResponder {
    backend: Arc<dyn DialogueBackendPort>,
    telemetry: Arc<dyn TelemetryPort>,
    clock: Arc<dyn ClockPort>,
    resilience: Arc<ResilienceState>,
    history_window: usize,
}

impl GenerativeResponder {
    pub fn new(
        backend: Arc<dyn DialogueBackendPort>,
        telemetry: Arc<dyn TelemetryPort>,
        clock: Arc<dyn ClockPort>,
        resilience: Arc<ResilienceState>,
        history_window: usize,
    ) -> Self {
        Self {
            backend,
            telemetry,
            clock,
            resilience,
            history_window,
        }
    }

    pub fn resilience(&self) -> &ResilienceState {
        &self.resilience
    }

    pub async fn generate(
        &self,
        request: &DialogueRequest<'_>,
        intent: &Intent,
    ) -> DialogueResponse {
        let character = request.character;
        let world = request.world;
        let fallback_text = fallback::pick(character, world, intent.id);

        if self.resilience.is_open(self.clock.now()) {
            tracing::debug!(character = %character, "Dialogue circuit open, skipping backend");
            return DialogueResponse::new(fallback_text, ResponseSource::Cooldown, intent.id);
        }

        let generation = GenerationRequest {
            character_id: character,
            player_input: request.input.to_string(),
            fallback_text: fallback_text.clone(),
            intent: intent.clone(),
            persona: persona(character),
            context: context::assemble(character, request.input, world),
            history: context::history(character, world, self.history_window),
        };

        match self.backend.generate(generation).await {
            Ok(reply) => self.accept(character, intent, reply, fallback_text),
            Err(error) => self.degrade(character, intent, error, fallback_text),
        }
    }

    fn accept(
        &self,
        character: CharacterId,
        intent: &Intent,
        reply: GenerationReply,
        fallback_text: String,
    ) -> DialogueResponse {
        self.resilience.record_success();

        if let Some(echo) = reply.intent.as_deref() {
            if echo != intent.id.as_str() {
                tracing::debug!(
                    character = %character,
                    expected = %intent.id,
                    echoed = echo,
                    "Backend answered a different intent"
                );
            }
        }

        let (raw, source) = if reply.text.trim().is_empty() {
            tracing::debug!(character = %character, "Backend returned empty text, using fallback");
            (fallback_text, ResponseSource::Fallback)
        } else {
            (reply.text, ResponseSource::from_label(reply.source.as_deref()))
        };

        let budget = persona(character);
        let clamped = clamp_reply(&raw, budget.max_sentences, budget.max_chars);
        if clamped.truncated {
            self.telemetry.emit(TelemetryEvent::Truncated {
                character,
                original_chars: compact_whitespace(&raw).chars().count(),
                clamped_chars: clamped.text.chars().count(),
            });
        }

        DialogueResponse::new(clamped.text, source, intent.id).with_display_name(reply.display_name)
    }

    fn degrade(
        &self,
        character: CharacterId,
        intent: &Intent,
        error: BackendError,
        fallback_text: String,
    ) -> DialogueResponse {
        if error.is_degradation() {
            tracing::warn!(character = %character, error = %error, "Dialogue backend degraded");
            if self.resilience.record_failure(self.clock.now()) {
                self.telemetry.emit(TelemetryEvent::BackendUnavailable {
                    status: error.status(),
                    message: error.to_string(),
                });
            }
        } else if let BackendError::Rejected {
            status,
            code,
            issues,
        } = error
        {
            let signature = validation_signature(code.as_deref(), &issues);
            if self.resilience.note_signature(&signature) {
                tracing::warn!(
                    character = %character,
                    status,
                    code = ?code,
                    signature = %signature,
                    "Dialogue backend rejected request"
                );
                self.telemetry.emit(TelemetryEvent::ValidationRejected {
                    signature,
                    code,
                    issues,
                });
            } else {
                tracing::debug!(signature = %signature, "Repeated backend rejection");
            }
        }
        DialogueResponse::new(fallback_text, ResponseSource::Fallback, intent.id)
    }
}
