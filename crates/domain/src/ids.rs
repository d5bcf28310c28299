use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a non-player character in the cast.
///
/// The cast is closed: every id here has a persona contract, a fallback pool
/// and a scripted decision tree, so lookups by id can never miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterId {
    /// Onboarding gatekeeper. Owns the conversation stage machine.
    Warden,
    /// Merchant behind the map trade.
    Broker,
    /// Designated helper; the only character with hint priority.
    Archivist,
    /// Quest NPC the player is sent to find.
    Courier,
    /// Rhyming rival.
    Rival,
}

impl CharacterId {
    pub const ALL: [CharacterId; 5] = [
        CharacterId::Warden,
        CharacterId::Broker,
        CharacterId::Archivist,
        CharacterId::Courier,
        CharacterId::Rival,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warden => "warden",
            Self::Broker => "broker",
            Self::Archivist => "archivist",
            Self::Courier => "courier",
            Self::Rival => "rival",
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warden" => Ok(Self::Warden),
            "broker" => Ok(Self::Broker),
            "archivist" => Ok(Self::Archivist),
            "courier" => Ok(Self::Courier),
            "rival" => Ok(Self::Rival),
            other => Err(DomainError::unknown_character(other)),
        }
    }
}
