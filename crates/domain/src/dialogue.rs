//! Per-turn request, routing and response types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::intent::IntentId;
use crate::world::WorldContext;

/// One player turn addressed to one character. Built fresh per turn.
#[derive(Debug, Clone, Copy)]
pub struct DialogueRequest<'a> {
    pub character: CharacterId,
    pub input: &'a str,
    pub world: &'a WorldContext,
}

impl<'a> DialogueRequest<'a> {
    pub fn new(character: CharacterId, input: &'a str, world: &'a WorldContext) -> Self {
        Self {
            character,
            input,
            world,
        }
    }
}

/// Where the reply text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    Scripted,
    Generated,
    Fallback,
    Cache,
    Cooldown,
}

impl ResponseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scripted => "scripted",
            Self::Generated => "generated",
            Self::Fallback => "fallback",
            Self::Cache => "cache",
            Self::Cooldown => "cooldown",
        }
    }

    /// Parses a backend-declared label. Absent or unknown labels are fallback.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("generated") => Self::Generated,
            Some("cache") => Self::Cache,
            Some("scripted") => Self::Scripted,
            Some("cooldown") => Self::Cooldown,
            _ => Self::Fallback,
        }
    }
}

impl fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The reply handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueResponse {
    pub text: String,
    pub source: ResponseSource,
    pub safety_abort: bool,
    pub intent_id: IntentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Per-character turn counter; see `DialogueGateway::is_latest`.
    #[serde(default)]
    pub epoch: u64,
}

impl DialogueResponse {
    pub fn new(text: impl Into<String>, source: ResponseSource, intent_id: IntentId) -> Self {
        Self {
            text: text.into(),
            source,
            safety_abort: false,
            intent_id,
            display_name: None,
            epoch: 0,
        }
    }

    pub fn safety_abort(text: impl Into<String>) -> Self {
        Self {
            safety_abort: true,
            ..Self::new(text, ResponseSource::Scripted, IntentId::SafetyAbort)
        }
    }

    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        self.display_name = name;
        self
    }
}

/// Coarse triage class of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteClass {
    SystemSafety,
    CriticalScripted,
    HintPriority,
    DynamicFlavor,
}

impl RouteClass {
    /// Whether the scripted responder answers this class.
    pub fn is_scripted(&self) -> bool {
        matches!(self, Self::CriticalScripted | Self::HintPriority)
    }
}

impl fmt::Display for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SystemSafety => "SYSTEM_SAFETY",
            Self::CriticalScripted => "CRITICAL_SCRIPTED",
            Self::HintPriority => "HINT_PRIORITY",
            Self::DynamicFlavor => "DYNAMIC_FLAVOR",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub class: RouteClass,
    pub reason: String,
}

impl RouteDecision {
    pub fn new(class: RouteClass, reason: impl Into<String>) -> Self {
        Self {
            class,
            reason: reason.into(),
        }
    }
}

/// Opening line for an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub text: String,
    pub source: ResponseSource,
}
