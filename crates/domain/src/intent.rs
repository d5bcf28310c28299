//! Structured classification of what a reply must accomplish.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;

/// How an intent must be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentMode {
    /// Input hit the block-list; nothing else may answer.
    SafetyAbort,
    /// Must be answered by a scripted line (may mutate state).
    CanonicalGate,
    /// May be answered by the generative backend.
    Dynamic,
}

/// Conversational function a reply performs. Personas declare which of these
/// they may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionTag {
    Safety,
    Gatekeep,
    Warn,
    Assign,
    Trade,
    Hint,
    Quiz,
    Handoff,
    Inform,
    Redirect,
    Banter,
}

/// Identifier of a resolved intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentId {
    SafetyAbort,
    LocateCourier,
    WardenIntroduce,
    WardenDisrespect,
    WardenContraband,
    WardenMission,
    WardenGeneric,
    BrokerDisrespect,
    BrokerTrade,
    BrokerGeneric,
    ArchivistHint,
    ArchivistQuiz,
    ArchivistMission,
    ArchivistGeneric,
    CourierHandoff,
    CourierGeneric,
    RivalTaunt,
    RivalGeneric,
}

impl IntentId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SafetyAbort => "safety_abort",
            Self::LocateCourier => "locate_courier",
            Self::WardenIntroduce => "warden_introduce",
            Self::WardenDisrespect => "warden_disrespect",
            Self::WardenContraband => "warden_contraband",
            Self::WardenMission => "warden_mission",
            Self::WardenGeneric => "warden_generic",
            Self::BrokerDisrespect => "broker_disrespect",
            Self::BrokerTrade => "broker_trade",
            Self::BrokerGeneric => "broker_generic",
            Self::ArchivistHint => "archivist_hint",
            Self::ArchivistQuiz => "archivist_quiz",
            Self::ArchivistMission => "archivist_mission",
            Self::ArchivistGeneric => "archivist_generic",
            Self::CourierHandoff => "courier_handoff",
            Self::CourierGeneric => "courier_generic",
            Self::RivalTaunt => "rival_taunt",
            Self::RivalGeneric => "rival_generic",
        }
    }

    /// The catch-all intent for a character.
    pub fn generic_for(character: CharacterId) -> Self {
        match character {
            CharacterId::Warden => Self::WardenGeneric,
            CharacterId::Broker => Self::BrokerGeneric,
            CharacterId::Archivist => Self::ArchivistGeneric,
            CharacterId::Courier => Self::CourierGeneric,
            CharacterId::Rival => Self::RivalGeneric,
        }
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the reply to this turn must accomplish. One per turn, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub id: IntentId,
    pub mode: IntentMode,
    pub function: FunctionTag,
    /// Free-text goal handed to the generator.
    pub goal: String,
    #[serde(default)]
    pub must_include: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
}

impl Intent {
    pub fn new(
        id: IntentId,
        mode: IntentMode,
        function: FunctionTag,
        goal: impl Into<String>,
    ) -> Self {
        Self {
            id,
            mode,
            function,
            goal: goal.into(),
            must_include: Vec::new(),
            avoid: Vec::new(),
        }
    }

    pub fn with_must_include(mut self, topic: impl Into<String>) -> Self {
        self.must_include.push(topic.into());
        self
    }

    pub fn with_avoid(mut self, topic: impl Into<String>) -> Self {
        self.avoid.push(topic.into());
        self
    }

    pub fn is_safety_abort(&self) -> bool {
        self.mode == IntentMode::SafetyAbort
    }
}
