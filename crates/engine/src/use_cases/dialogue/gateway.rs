//! Dialogue gateway: the single entry point for a player turn.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use parley_domain::{
    variety, CharacterId, DialogueRequest, DialogueResponse, Greeting, ResponseSource, RouteClass,
    WorldContext,
};

use super::canonical::CanonicalResponder;
use super::classifier::IntentClassifier;
use super::fallback;
use super::finalize::finalize;
use super::generative::GenerativeResponder;
use super::router::TurnRouter;
use super::safety::SafetyFilter;

pub struct DialogueGateway {
    safety: Arc<SafetyFilter>,
    classifier: IntentClassifier,
    router: TurnRouter,
    canonical: CanonicalResponder,
    generative: GenerativeResponder,
    /// Latest turn number handed out per character.
    epochs: Mutex<HashMap<CharacterId, u64>>,
}

impl DialogueGateway {
    pub fn new(
        safety: Arc<SafetyFilter>,
        hint_min_time_secs: u32,
        generative: GenerativeResponder,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(safety.clone()),
            router: TurnRouter::new(safety.clone(), hint_min_time_secs),
            canonical: CanonicalResponder::new(),
            safety,
            generative,
            epochs: Mutex::new(HashMap::new()),
        }
    }

    /// Answer one player turn. Never fails and never returns empty text.
    ///
    /// Scripted turns may mutate `world`; generated turns only read it.
    pub async fn reply(
        &self,
        character: CharacterId,
        input: &str,
        world: &mut WorldContext,
    ) -> DialogueResponse {
        let epoch = self.next_epoch(character);

        if self.safety.should_abort(input) {
            tracing::warn!(character = %character, epoch, "Blocked input, aborting turn");
            return self.abort(epoch);
        }

        let intent = self.classifier.resolve(character, input, world);
        let decision = self
            .router
            .decide(&DialogueRequest::new(character, input, world), &intent);

        tracing::debug!(
            character = %character,
            intent = %intent.id,
            route = %decision.class,
            reason = %decision.reason,
            epoch,
            "Routed dialogue turn"
        );

        if decision.class == RouteClass::SystemSafety {
            return self.abort(epoch);
        }
        let response = if decision.class.is_scripted() {
            let reply = self.canonical.respond(character, input, world, intent.id);
            DialogueResponse::new(reply.text, ResponseSource::Scripted, intent.id)
                .with_display_name(reply.display_name)
        } else {
            let request = DialogueRequest::new(character, input, world);
            self.generative.generate(&request, &intent).await
        };

        let seed = variety::turn_seed(character, world, input.chars().count(), "finalize");
        let mut text = finalize(character, &response.text, &seed);
        if text.is_empty() {
            tracing::warn!(
                character = %character,
                intent = %intent.id,
                "Empty reply, using fallback"
            );
            text = fallback::pick(character, world, intent.id);
        }

        tracing::info!(
            character = %character,
            intent = %intent.id,
            source = %response.source,
            epoch,
            "Dialogue reply"
        );

        DialogueResponse {
            text,
            epoch,
            ..response
        }
    }

    /// Opening line for an encounter.
    pub fn greeting(
        &self,
        character: CharacterId,
        encounter_count: u32,
        seed_key: &str,
    ) -> Greeting {
        let greeting = self.canonical.greeting(character, encounter_count, seed_key);
        Greeting {
            text: finalize(character, &greeting.text, &format!("{seed_key}|greeting")),
            ..greeting
        }
    }

    /// Whether `epoch` is still the newest turn for `character`. Callers use
    /// this to drop replies that finished after a newer turn started.
    pub fn is_latest(&self, character: CharacterId, epoch: u64) -> bool {
        self.lock_epochs().get(&character).copied() == Some(epoch)
    }

    fn next_epoch(&self, character: CharacterId) -> u64 {
        let mut epochs = self.lock_epochs();
        let epoch = epochs.entry(character).or_insert(0);
        *epoch += 1;
        *epoch
    }

    fn lock_epochs(&self) -> std::sync::MutexGuard<'_, HashMap<CharacterId, u64>> {
        self.epochs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn abort(&self, epoch: u64) -> DialogueResponse {
        DialogueResponse {
            epoch,
            ..DialogueResponse::safety_abort(self.safety.abort_text())
        }
    }
}
