//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    http_backend::HttpDialogueBackend,
    ports::{ClockPort, DialogueBackendPort, TelemetryPort},
    resilience::ResilienceState,
    settings::DialogueSettings,
    telemetry::TracingTelemetry,
};
use crate::use_cases::dialogue::{DialogueGateway, GenerativeResponder, SafetyFilter};

/// Main application state.
///
/// Holds the dialogue gateway and the settings it was built from.
pub struct App {
    pub dialogue: DialogueGateway,
    pub settings: DialogueSettings,
}

impl App {
    /// Wire the pipeline around the given ports.
    pub fn new(
        settings: DialogueSettings,
        backend: Arc<dyn DialogueBackendPort>,
        telemetry: Arc<dyn TelemetryPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let safety = Arc::new(SafetyFilter::new(
            &settings.block_list,
            settings.abort_text.clone(),
        ));
        let resilience = Arc::new(ResilienceState::new(settings.cooldown()));
        let generative = GenerativeResponder::new(
            backend,
            telemetry,
            clock,
            resilience,
            settings.history_window,
        );
        let dialogue = DialogueGateway::new(safety, settings.hint_min_time_secs, generative);

        Self { dialogue, settings }
    }

    /// Production wiring: HTTP backend, tracing telemetry, system clock.
    pub fn from_settings(settings: DialogueSettings) -> Self {
        let backend = Arc::new(HttpDialogueBackend::new(
            &settings.backend_url,
            settings.backend_timeout(),
        ));
        tracing::info!(backend_url = %settings.backend_url, "Dialogue backend configured");
        Self::new(
            settings,
            backend,
            Arc::new(TracingTelemetry),
            Arc::new(SystemClock::new()),
        )
    }
}
