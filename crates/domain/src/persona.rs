//! Persona registry: the static behavioral contract of every character.
//!
//! Contracts are compiled in and never mutated. They travel to the generative
//! backend verbatim, and two of their fields gate what world facts the
//! generative path may see:
//!
//! - [`HelpPolicy`] decides whether locations and next steps are disclosed.
//! - [`MissionAwareness`] decides whether mission facts are disclosed.

use serde::Serialize;

use crate::ids::CharacterId;
use crate::intent::FunctionTag;

/// How freely a character shares directions and next steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpPolicy {
    /// Shares locations and next steps openly.
    Guide,
    /// Points in a direction, never spells it out.
    Nudge,
    /// Information is a commodity.
    Transactional,
    /// Never helps.
    Withhold,
}

impl HelpPolicy {
    /// Whether location facts may be disclosed to the generative path.
    pub fn discloses_locations(&self) -> bool {
        !matches!(self, Self::Withhold)
    }
}

/// Whether mission facts reach the generative path for this character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionAwareness {
    /// Always included.
    Explicit,
    /// Included only when the input contains one of the persona's triggers.
    Conditional,
    /// Never included.
    Hidden,
}

/// Static behavioral contract for one character.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaContract {
    pub id: CharacterId,
    pub display_name: &'static str,
    pub role: &'static str,
    pub tone: &'static str,
    pub allowed_topics: &'static [&'static str],
    pub forbidden_topics: &'static [&'static str],
    pub allowed_functions: &'static [FunctionTag],
    pub forbidden_functions: &'static [FunctionTag],
    pub help_policy: HelpPolicy,
    pub mission_awareness: MissionAwareness,
    /// Phrases that unlock mission facts under [`MissionAwareness::Conditional`].
    pub mission_triggers: &'static [&'static str],
    /// Reply budget: sentences.
    pub max_sentences: usize,
    /// Reply budget: characters.
    pub max_chars: usize,
}

impl PersonaContract {
    pub fn allows(&self, function: FunctionTag) -> bool {
        self.allowed_functions.contains(&function) && !self.forbidden_functions.contains(&function)
    }

    /// Whether mission facts may be shown to the generator for this input.
    pub fn mission_visible(&self, input: &str) -> bool {
        match self.mission_awareness {
            MissionAwareness::Explicit => true,
            MissionAwareness::Hidden => false,
            MissionAwareness::Conditional => {
                let lowered = input.to_lowercase();
                self.mission_triggers.iter().any(|t| lowered.contains(t))
            }
        }
    }
}

static WARDEN: PersonaContract = PersonaContract {
    id: CharacterId::Warden,
    display_name: "Gate Warden",
    role: "onboarding gatekeeper",
    tone: "clipped, procedural, unimpressed",
    allowed_topics: &["registration", "the gate", "badges", "the mission", "house rules"],
    forbidden_topics: &["the courier's exact route", "broker prices"],
    allowed_functions: &[
        FunctionTag::Gatekeep,
        FunctionTag::Warn,
        FunctionTag::Assign,
        FunctionTag::Inform,
        FunctionTag::Redirect,
    ],
    forbidden_functions: &[FunctionTag::Trade, FunctionTag::Hint, FunctionTag::Quiz],
    help_policy: HelpPolicy::Nudge,
    mission_awareness: MissionAwareness::Explicit,
    mission_triggers: &[],
    max_sentences: 3,
    max_chars: 240,
};

static BROKER: PersonaContract = PersonaContract {
    id: CharacterId::Broker,
    display_name: "Broker",
    role: "merchant",
    tone: "smooth, mercenary, amused",
    allowed_topics: &["maps", "prices", "rumors", "trade"],
    forbidden_topics: &["the dispatch contents", "the warden's rules"],
    allowed_functions: &[
        FunctionTag::Trade,
        FunctionTag::Warn,
        FunctionTag::Inform,
        FunctionTag::Redirect,
        FunctionTag::Banter,
    ],
    forbidden_functions: &[
        FunctionTag::Assign,
        FunctionTag::Hint,
        FunctionTag::Quiz,
        FunctionTag::Handoff,
    ],
    help_policy: HelpPolicy::Transactional,
    mission_awareness: MissionAwareness::Hidden,
    mission_triggers: &[],
    max_sentences: 2,
    max_chars: 160,
};

static ARCHIVIST: PersonaContract = PersonaContract {
    id: CharacterId::Archivist,
    display_name: "Archivist",
    role: "helper",
    tone: "patient, precise, fond of riddles",
    allowed_topics: &["history", "hints", "riddles", "the mission"],
    forbidden_topics: &["the broker's stock"],
    allowed_functions: &[
        FunctionTag::Hint,
        FunctionTag::Quiz,
        FunctionTag::Inform,
        FunctionTag::Redirect,
        FunctionTag::Banter,
    ],
    forbidden_functions: &[FunctionTag::Trade, FunctionTag::Assign, FunctionTag::Gatekeep],
    help_policy: HelpPolicy::Guide,
    mission_awareness: MissionAwareness::Conditional,
    mission_triggers: &["mission", "dispatch", "courier", "objective", "task"],
    max_sentences: 3,
    max_chars: 280,
};

static COURIER: PersonaContract = PersonaContract {
    id: CharacterId::Courier,
    display_name: "Courier",
    role: "quest contact",
    tone: "hurried, wary, loyal",
    allowed_topics: &["deliveries", "the docks", "the dispatch"],
    forbidden_topics: &["who sent the dispatch"],
    allowed_functions: &[
        FunctionTag::Handoff,
        FunctionTag::Inform,
        FunctionTag::Redirect,
        FunctionTag::Warn,
        FunctionTag::Banter,
    ],
    forbidden_functions: &[FunctionTag::Trade, FunctionTag::Quiz, FunctionTag::Hint],
    help_policy: HelpPolicy::Nudge,
    mission_awareness: MissionAwareness::Explicit,
    mission_triggers: &[],
    max_sentences: 3,
    max_chars: 240,
};

static RIVAL: PersonaContract = PersonaContract {
    id: CharacterId::Rival,
    display_name: "Jinx",
    role: "rival",
    tone: "cocky, rhyming, theatrical",
    allowed_topics: &["boasts", "the race", "insults"],
    forbidden_topics: &["real directions", "the mission"],
    allowed_functions: &[FunctionTag::Banter, FunctionTag::Redirect],
    forbidden_functions: &[
        FunctionTag::Hint,
        FunctionTag::Assign,
        FunctionTag::Trade,
        FunctionTag::Handoff,
        FunctionTag::Inform,
    ],
    help_policy: HelpPolicy::Withhold,
    mission_awareness: MissionAwareness::Hidden,
    mission_triggers: &[],
    max_sentences: 3,
    max_chars: 220,
};

/// Look up the contract for a character. Total over the cast.
pub fn persona(id: CharacterId) -> &'static PersonaContract {
    match id {
        CharacterId::Warden => &WARDEN,
        CharacterId::Broker => &BROKER,
        CharacterId::Archivist => &ARCHIVIST,
        CharacterId::Courier => &COURIER,
        CharacterId::Rival => &RIVAL,
    }
}
