//! Topic/intent classification.
//!
//! Priority order:
//! 1. safety re-check
//! 2. cross-character rules (asking where the Courier is)
//! 3. per-character keyword rules
//! 4. the character's generic intent
//!
//! The result is then checked against the persona's allowed function tags;
//! an intent the persona may not perform degrades to its generic intent.

use std::sync::{Arc, LazyLock};

use regex_lite::Regex;

use parley_domain::{
    items, persona, CharacterId, ConversationStage, FunctionTag, Intent, IntentId, IntentMode,
    WorldContext,
};

use super::safety::SafetyFilter;

static LOCATE_COURIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(where(?:'s| is| did| can i find)|find|seen|looking for|locate)\b.*\bcourier\b",
    )
    .expect("valid regex")
});

static DISRESPECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(idiot|moron|stupid|dumb|shut up|get lost|screw you|useless|loser|fool|pathetic)\b",
    )
    .expect("valid regex")
});

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:my name is|my name's|name's|call me)\s+([a-z][a-z'-]{0,23})")
        .expect("valid regex")
});

/// "I'm X" is as often a state ("I'm tired") as a name.
static SELF_INTRO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:i am|i'm)\s+([a-z][a-z'-]{0,23})").expect("valid regex")
});

static MISSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(mission|task|objective|assignment|orders|job|dispatch)\b")
        .expect("valid regex")
});

static TRADE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(buy|sell|trade|price|cost|deal|maps?|how much|purchase|wares)\b")
        .expect("valid regex")
});

static HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(hint|help|stuck|clue|lost|next step|what now|what (?:should|do) i do)\b")
        .expect("valid regex")
});

static QUIZ_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(quiz|riddle|test me|puzzle)\b").expect("valid regex")
});

static HANDOFF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(dispatch|package|parcel|deliver|delivery|handoff|hand it over|badge|sent me)\b",
    )
    .expect("valid regex")
});

static TAUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(beat you|race|slow|faster|going down|lose|coward)\b").expect("valid regex")
});

/// Words that are never taken as a name: fillers, states and interjections.
const NOT_NAMES: &[&str] = &[
    // fillers
    "a", "an", "the", "here", "there", "not", "just", "so", "very", "really", "from", "with",
    "in", "at", "on", "your", "going", "trying", "looking", "back", "new", "still", "also",
    // states
    "lost", "sorry", "ready", "fine", "ok", "okay", "busy", "good", "great", "tired",
    "confused", "hungry", "scared", "afraid", "late", "sure", "unsure", "done", "bored",
    "curious", "nervous", "early", "alone", "ill", "sick", "well", "happy", "sad",
    "angry", "cold", "hot", "stuck", "nobody", "someone", "somebody", "nothing", "what",
    // interjections and short replies
    "hi", "hello", "hey", "yo", "yes", "yeah", "yep", "yup", "no", "nope", "nah", "maybe",
    "perhaps", "huh", "hmm", "hm", "um", "uh", "er", "eh", "oh", "ah", "wow", "why", "who",
    "how", "thanks", "please", "help", "bye", "whatever", "later", "pass", "never",
];

fn is_name_like(word: &str) -> bool {
    let len = word.chars().count();
    (2..=24).contains(&len)
        && word.chars().next().is_some_and(char::is_alphabetic)
        && word.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-')
        && !NOT_NAMES.contains(&word.to_lowercase().as_str())
}

pub(crate) fn is_disrespectful(text: &str) -> bool {
    DISRESPECT_RE.is_match(text)
}

pub(crate) fn mentions_mission(text: &str) -> bool {
    MISSION_RE.is_match(text)
}

/// Pulls a player name out of an introduction.
///
/// `name_requested` is set once the Warden has asked for a name. Only then
/// does a lone word ("Rook.") or a lowercase "i'm rook" count; before that an
/// "I'm X" needs a capitalised X.
pub(crate) fn extract_name(text: &str, name_requested: bool) -> Option<String> {
    if let Some(raw) = NAME_RE.captures(text).and_then(|c| c.get(1)) {
        if is_name_like(raw.as_str()) {
            return Some(capitalize(raw.as_str()));
        }
    }
    if let Some(raw) = SELF_INTRO_RE.captures(text).and_then(|c| c.get(1)) {
        let raw = raw.as_str();
        let capitalised = raw.chars().next().is_some_and(char::is_uppercase);
        if is_name_like(raw) && (capitalised || name_requested) {
            return Some(capitalize(raw));
        }
    }
    if !name_requested {
        return None;
    }

    let word = text.trim().trim_end_matches(['.', '!', '?', ',']);
    is_name_like(word).then(|| capitalize(word))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct IntentClassifier {
    safety: Arc<SafetyFilter>,
}

impl IntentClassifier {
    pub fn new(safety: Arc<SafetyFilter>) -> Self {
        Self { safety }
    }

    /// Resolve the intent for one turn. Pure and total.
    pub fn resolve(&self, character: CharacterId, text: &str, world: &WorldContext) -> Intent {
        if self.safety.should_abort(text) {
            return Intent::new(
                IntentId::SafetyAbort,
                IntentMode::SafetyAbort,
                FunctionTag::Safety,
                "Stop the scene and surface support resources",
            );
        }

        let intent = if LOCATE_COURIER_RE.is_match(text) {
            locate_courier(world)
        } else {
            match character {
                CharacterId::Warden => warden(text, world),
                CharacterId::Broker => broker(text, world),
                CharacterId::Archivist => archivist(text, world),
                CharacterId::Courier => courier(text),
                CharacterId::Rival => rival(text),
            }
        };

        self.validate(character, intent, world)
    }

    fn validate(&self, character: CharacterId, intent: Intent, world: &WorldContext) -> Intent {
        if intent.is_safety_abort() || persona(character).allows(intent.function) {
            return intent;
        }
        tracing::debug!(
            character = %character,
            intent = %intent.id,
            function = ?intent.function,
            "Persona may not perform intent function, using generic intent"
        );
        generic(character, world)
    }
}

fn locate_courier(world: &WorldContext) -> Intent {
    let intent = Intent::new(
        IntentId::LocateCourier,
        IntentMode::Dynamic,
        FunctionTag::Inform,
        "Tell the player where the Courier was last seen",
    );
    match &world.courier_location {
        Some(location) => intent.with_must_include(location.clone()),
        None => intent,
    }
}

fn warden(text: &str, world: &WorldContext) -> Intent {
    let stage = world.warden_stage;

    if is_disrespectful(text) {
        return Intent::new(
            IntentId::WardenDisrespect,
            IntentMode::CanonicalGate,
            FunctionTag::Warn,
            "Warn the player about disrespect",
        );
    }
    if world.has_item(items::LOCKPICK) {
        return Intent::new(
            IntentId::WardenContraband,
            IntentMode::CanonicalGate,
            FunctionTag::Warn,
            "Confiscate restricted tools",
        );
    }
    if stage.is_onboarding()
        && extract_name(text, stage == ConversationStage::NamePending).is_some()
    {
        return Intent::new(
            IntentId::WardenIntroduce,
            IntentMode::CanonicalGate,
            FunctionTag::Assign,
            "Register the player and hand out the mission",
        );
    }
    if mentions_mission(text) {
        return if stage == ConversationStage::DismissMode {
            let intent = Intent::new(
                IntentId::WardenMission,
                IntentMode::Dynamic,
                FunctionTag::Inform,
                "Remind the player of their orders",
            );
            match &world.mission.objective {
                Some(objective) => intent.with_must_include(objective.clone()),
                None => intent,
            }
        } else {
            Intent::new(
                IntentId::WardenMission,
                IntentMode::CanonicalGate,
                FunctionTag::Assign,
                "Restate the mission",
            )
        };
    }
    generic(CharacterId::Warden, world)
}

fn broker(text: &str, world: &WorldContext) -> Intent {
    if world.is_banned_by(CharacterId::Broker) {
        return generic(CharacterId::Broker, world);
    }
    if is_disrespectful(text) {
        return Intent::new(
            IntentId::BrokerDisrespect,
            IntentMode::CanonicalGate,
            FunctionTag::Warn,
            "Warn the player; ban on repeat",
        );
    }
    if TRADE_RE.is_match(text) {
        return Intent::new(
            IntentId::BrokerTrade,
            IntentMode::CanonicalGate,
            FunctionTag::Trade,
            "Trade the harbor map for coin",
        );
    }
    generic(CharacterId::Broker, world)
}

fn archivist(text: &str, world: &WorldContext) -> Intent {
    if QUIZ_RE.is_match(text) {
        return Intent::new(
            IntentId::ArchivistQuiz,
            IntentMode::CanonicalGate,
            FunctionTag::Quiz,
            "Pose a riddle",
        );
    }
    if HINT_RE.is_match(text) {
        return Intent::new(
            IntentId::ArchivistHint,
            IntentMode::Dynamic,
            FunctionTag::Hint,
            "Give the player their next step",
        )
        .with_must_include(world.quest_step().describe());
    }
    if mentions_mission(text) {
        let intent = Intent::new(
            IntentId::ArchivistMission,
            IntentMode::Dynamic,
            FunctionTag::Inform,
            "Explain what the mission asks of the player",
        );
        return match &world.mission.objective {
            Some(objective) => intent.with_must_include(objective.clone()),
            None => intent,
        };
    }
    generic(CharacterId::Archivist, world)
}

fn courier(text: &str) -> Intent {
    if HANDOFF_RE.is_match(text) {
        return Intent::new(
            IntentId::CourierHandoff,
            IntentMode::CanonicalGate,
            FunctionTag::Handoff,
            "Hand over the dispatch to a badged player",
        );
    }
    Intent::new(
        IntentId::CourierGeneric,
        IntentMode::Dynamic,
        FunctionTag::Banter,
        "Make hurried small talk",
    )
    .with_avoid("who sent the dispatch")
}

fn rival(text: &str) -> Intent {
    if is_disrespectful(text) || TAUNT_RE.is_match(text) {
        return Intent::new(
            IntentId::RivalTaunt,
            IntentMode::Dynamic,
            FunctionTag::Banter,
            "Answer the taunt with a rhyming boast",
        )
        .with_avoid("real directions");
    }
    Intent::new(
        IntentId::RivalGeneric,
        IntentMode::Dynamic,
        FunctionTag::Banter,
        "Boast about winning the race",
    )
    .with_avoid("real directions")
}

/// The catch-all intent for a character in the current world.
fn generic(character: CharacterId, world: &WorldContext) -> Intent {
    let id = IntentId::generic_for(character);
    match character {
        CharacterId::Warden => {
            if world.warden_stage == ConversationStage::DismissMode {
                Intent::new(
                    id,
                    IntentMode::Dynamic,
                    FunctionTag::Redirect,
                    "Wave the registered player along",
                )
            } else {
                Intent::new(
                    id,
                    IntentMode::CanonicalGate,
                    FunctionTag::Gatekeep,
                    "Keep the player at the gate",
                )
            }
        }
        CharacterId::Broker if world.is_banned_by(CharacterId::Broker) => Intent::new(
            id,
            IntentMode::CanonicalGate,
            FunctionTag::Warn,
            "Refuse service",
        ),
        CharacterId::Broker => Intent::new(
            id,
            IntentMode::Dynamic,
            FunctionTag::Banter,
            "Make mercenary small talk",
        )
        .with_avoid("the dispatch contents"),
        CharacterId::Archivist => Intent::new(
            id,
            IntentMode::Dynamic,
            FunctionTag::Banter,
            "Chat about the archive",
        ),
        CharacterId::Courier => courier(""),
        CharacterId::Rival => rival(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(Arc::new(SafetyFilter::new(["kill myself"], "stop")))
    }

    #[test]
    fn safety_wins_over_everything() {
        let world = WorldContext::new("gate", 600);
        for character in CharacterId::ALL {
            let intent = classifier().resolve(
                character,
                "Where is the courier? I want to KILL MYSELF",
                &world,
            );
            assert_eq!(intent.id, IntentId::SafetyAbort);
            assert!(intent.is_safety_abort());
        }
    }

    #[test]
    fn locate_courier_is_cross_character() {
        let mut world = WorldContext::new("docks", 600);
        world.courier_location = Some("the north pier".to_string());
        let intent =
            classifier().resolve(CharacterId::Archivist, "Have you seen the Courier?", &world);
        assert_eq!(intent.id, IntentId::LocateCourier);
        assert_eq!(intent.must_include, vec!["the north pier".to_string()]);
    }

    #[test]
    fn rival_may_not_inform_so_falls_back_to_generic() {
        let world = WorldContext::new("docks", 600);
        let intent = classifier().resolve(CharacterId::Rival, "where is the courier", &world);
        assert_eq!(intent.id, IntentId::RivalGeneric);
        assert_eq!(intent.function, FunctionTag::Banter);
    }

    #[test]
    fn warden_priority_disrespect_then_contraband_then_name() {
        let mut world = WorldContext::new("gate", 600);
        world.warden_stage = ConversationStage::NamePending;
        world.grant_item(items::LOCKPICK);

        let c = classifier();
        assert_eq!(
            c.resolve(CharacterId::Warden, "My name is Rook, you idiot", &world).id,
            IntentId::WardenDisrespect
        );
        assert_eq!(
            c.resolve(CharacterId::Warden, "My name is Rook", &world).id,
            IntentId::WardenContraband
        );
        world.remove_item(items::LOCKPICK);
        let intent = c.resolve(CharacterId::Warden, "My name is Rook", &world);
        assert_eq!(intent.id, IntentId::WardenIntroduce);
        assert_eq!(intent.mode, IntentMode::CanonicalGate);
    }

    #[test]
    fn warden_generic_is_scripted_until_dismissed() {
        let mut world = WorldContext::new("gate", 600);
        let c = classifier();
        assert_eq!(
            c.resolve(CharacterId::Warden, "nice weather", &world).mode,
            IntentMode::CanonicalGate
        );
        world.warden_stage = ConversationStage::DismissMode;
        let intent = c.resolve(CharacterId::Warden, "nice weather", &world);
        assert_eq!(intent.id, IntentId::WardenGeneric);
        assert_eq!(intent.mode, IntentMode::Dynamic);
    }

    #[test]
    fn broker_rules() {
        let mut world = WorldContext::new("market", 600);
        let c = classifier();
        assert_eq!(
            c.resolve(CharacterId::Broker, "How much for a map?", &world).id,
            IntentId::BrokerTrade
        );
        assert_eq!(
            c.resolve(CharacterId::Broker, "You're useless", &world).id,
            IntentId::BrokerDisrespect
        );
        assert_eq!(
            c.resolve(CharacterId::Broker, "Lovely hat", &world).mode,
            IntentMode::Dynamic
        );

        world.bans.insert(CharacterId::Broker);
        let banned = c.resolve(CharacterId::Broker, "How much for a map?", &world);
        assert_eq!(banned.id, IntentId::BrokerGeneric);
        assert_eq!(banned.mode, IntentMode::CanonicalGate);
    }

    #[test]
    fn archivist_hint_carries_next_step() {
        let mut world = WorldContext::new("archive", 600);
        world.mission.assigned = true;
        let intent = classifier().resolve(CharacterId::Archivist, "I'm stuck, any hint?", &world);
        assert_eq!(intent.id, IntentId::ArchivistHint);
        assert_eq!(intent.must_include, vec!["collect the dispatch from the Courier".to_string()]);
        assert_eq!(
            classifier().resolve(CharacterId::Archivist, "Give me a riddle", &world).id,
            IntentId::ArchivistQuiz
        );
    }

    #[test]
    fn courier_and_rival_rules() {
        let world = WorldContext::new("docks", 600);
        let c = classifier();
        assert_eq!(
            c.resolve(CharacterId::Courier, "I'm here for the dispatch", &world).id,
            IntentId::CourierHandoff
        );
        assert_eq!(
            c.resolve(CharacterId::Courier, "Nice boat", &world).id,
            IntentId::CourierGeneric
        );
        assert_eq!(
            c.resolve(CharacterId::Rival, "You're so slow", &world).id,
            IntentId::RivalTaunt
        );
        assert_eq!(
            c.resolve(CharacterId::Rival, "Hello there", &world).id,
            IntentId::RivalGeneric
        );
    }

    #[test]
    fn every_resolved_intent_is_allowed_by_its_persona() {
        let world = WorldContext::new("docks", 600);
        let inputs = [
            "where is the courier",
            "hint please",
            "sell me a map",
            "dispatch",
            "idiot",
            "hi",
        ];
        for character in CharacterId::ALL {
            for input in inputs {
                let intent = classifier().resolve(character, input, &world);
                assert!(persona(character).allows(intent.function), "{character} / {input}");
            }
        }
    }

    #[test]
    fn name_extraction() {
        assert_eq!(extract_name("My name is rook", false).as_deref(), Some("Rook"));
        assert_eq!(extract_name("call me Ash.", false).as_deref(), Some("Ash"));
        assert_eq!(extract_name("I'm looking around", false), None);
        assert_eq!(extract_name("Rook.", false), None);
        assert_eq!(extract_name("Rook.", true).as_deref(), Some("Rook"));
        assert_eq!(extract_name("hello", true), None);
        assert_eq!(extract_name("what do you want", true), None);
    }

    #[test]
    fn self_introduction_needs_a_capitalised_name_until_asked() {
        assert_eq!(extract_name("I'm Rook", false).as_deref(), Some("Rook"));
        assert_eq!(extract_name("i'm rook", false), None);
        assert_eq!(extract_name("i'm rook", true).as_deref(), Some("Rook"));
        assert_eq!(extract_name("I'm tired", false), None);
        assert_eq!(extract_name("I am confused", true), None);
        assert_eq!(extract_name("I'm Tired", false), None);
        assert_eq!(extract_name("I'm here for the dispatch", true), None);
    }

    #[test]
    fn interjections_are_not_bare_names() {
        for input in ["Huh?", "Nope", "Maybe", "hmm", "Yeah!"] {
            assert_eq!(extract_name(input, true), None, "{input}");
        }
        assert_eq!(extract_name("Ash!", true).as_deref(), Some("Ash"));
    }

    #[test]
    fn warden_does_not_introduce_on_moods() {
        let world = WorldContext::new("gate", 600);
        let c = classifier();
        for input in ["I'm tired", "I am confused"] {
            assert_eq!(
                c.resolve(CharacterId::Warden, input, &world).id,
                IntentId::WardenGeneric
            );
        }
        assert_eq!(
            c.resolve(CharacterId::Warden, "I'm Rook", &world).id,
            IntentId::WardenIntroduce
        );
    }
}
