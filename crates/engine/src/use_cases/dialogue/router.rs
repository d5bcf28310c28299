//! Turn triage: scripted or generated.

use std::sync::Arc;

use parley_domain::{
    CharacterId, ConversationStage, DialogueRequest, FunctionTag, Intent, IntentId, IntentMode,
    RouteClass, RouteDecision,
};

use super::safety::SafetyFilter;

pub struct TurnRouter {
    safety: Arc<SafetyFilter>,
    /// Archivist hints stay scripted while at least this much time remains.
    hint_min_time_secs: u32,
}

impl TurnRouter {
    pub fn new(safety: Arc<SafetyFilter>, hint_min_time_secs: u32) -> Self {
        Self {
            safety,
            hint_min_time_secs,
        }
    }

    pub fn decide(&self, request: &DialogueRequest<'_>, intent: &Intent) -> RouteDecision {
        if intent.is_safety_abort() || self.safety.should_abort(request.input) {
            return RouteDecision::new(RouteClass::SystemSafety, "blocked input");
        }

        if let Some(reason) = hard_gate(request, intent) {
            return RouteDecision::new(RouteClass::CriticalScripted, reason);
        }

        if request.character == CharacterId::Archivist
            && intent.id == IntentId::ArchivistHint
            && request.world.time_remaining_secs >= self.hint_min_time_secs
        {
            return RouteDecision::new(RouteClass::HintPriority, "hint with time to spare");
        }

        RouteDecision::new(RouteClass::DynamicFlavor, "flavor")
    }
}

/// Why this turn must be scripted, if it must.
fn hard_gate(request: &DialogueRequest<'_>, intent: &Intent) -> Option<&'static str> {
    let world = request.world;
    let character = request.character;

    if intent.mode == IntentMode::CanonicalGate {
        return Some("canonical intent");
    }
    if world.is_run_failed() {
        return Some("run already failed");
    }
    if world.is_banned_by(character) {
        return Some("player banned");
    }
    if world.warnings(character).total() > 0 && intent.function != FunctionTag::Banter {
        return Some("escalation in progress");
    }
    if character == CharacterId::Warden
        && !matches!(world.warden_stage, ConversationStage::DismissMode)
    {
        return Some("warden onboarding");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_domain::WorldContext;

    fn router() -> TurnRouter {
        TurnRouter::new(Arc::new(SafetyFilter::new(["kill myself"], "stop")), 180)
    }

    fn dynamic(id: IntentId, function: FunctionTag) -> Intent {
        Intent::new(id, IntentMode::Dynamic, function, "goal")
    }

    #[test]
    fn blocked_input_is_system_safety_even_with_a_dynamic_intent() {
        let world = WorldContext::new("gate", 600);
        let request = DialogueRequest::new(CharacterId::Broker, "i will KILL MYSELF", &world);
        let decision = router().decide(
            &request,
            &dynamic(IntentId::BrokerGeneric, FunctionTag::Banter),
        );
        assert_eq!(decision.class, RouteClass::SystemSafety);
    }

    #[test]
    fn canonical_intents_are_scripted() {
        let world = WorldContext::new("market", 600);
        let request = DialogueRequest::new(CharacterId::Broker, "sell me a map", &world);
        let intent = Intent::new(
            IntentId::BrokerTrade,
            IntentMode::CanonicalGate,
            FunctionTag::Trade,
            "trade",
        );
        assert_eq!(router().decide(&request, &intent).class, RouteClass::CriticalScripted);
    }

    #[test]
    fn warnings_gate_everything_but_banter() {
        let mut world = WorldContext::new("docks", 600);
        world.warnings_mut(CharacterId::Courier).disrespect = 1;
        let request = DialogueRequest::new(CharacterId::Courier, "where is it", &world);
        let locate = dynamic(IntentId::LocateCourier, FunctionTag::Inform);
        assert_eq!(
            router().decide(&request, &locate).class,
            RouteClass::CriticalScripted
        );
        let banter = dynamic(IntentId::CourierGeneric, FunctionTag::Banter);
        assert_eq!(
            router().decide(&request, &banter).class,
            RouteClass::DynamicFlavor
        );
    }

    #[test]
    fn failed_run_scripts_everyone() {
        let mut world = WorldContext::new("docks", 600);
        world.fail_run("expelled");
        let request = DialogueRequest::new(CharacterId::Rival, "hey", &world);
        assert_eq!(
            router().decide(&request, &dynamic(IntentId::RivalGeneric, FunctionTag::Banter)).class,
            RouteClass::CriticalScripted
        );
    }

    #[test]
    fn warden_is_scripted_until_dismissed() {
        let mut world = WorldContext::new("gate", 600);
        world.warden_stage = ConversationStage::MissionGiven;
        let intent = dynamic(IntentId::LocateCourier, FunctionTag::Inform);
        let request = DialogueRequest::new(CharacterId::Warden, "where is the courier", &world);
        assert_eq!(router().decide(&request, &intent).class, RouteClass::CriticalScripted);

        world.warden_stage = ConversationStage::DismissMode;
        let request = DialogueRequest::new(CharacterId::Warden, "where is the courier", &world);
        assert_eq!(router().decide(&request, &intent).class, RouteClass::DynamicFlavor);
    }

    #[test]
    fn archivist_hint_priority_depends_on_time_pressure() {
        let hint = dynamic(IntentId::ArchivistHint, FunctionTag::Hint);

        let relaxed = WorldContext::new("archive", 180);
        let request = DialogueRequest::new(CharacterId::Archivist, "hint", &relaxed);
        assert_eq!(router().decide(&request, &hint).class, RouteClass::HintPriority);

        let rushed = WorldContext::new("archive", 179);
        let request = DialogueRequest::new(CharacterId::Archivist, "hint", &rushed);
        assert_eq!(router().decide(&request, &hint).class, RouteClass::DynamicFlavor);
    }
}
