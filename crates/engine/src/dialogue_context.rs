//! Dialogue context types - what the generative backend sees for one turn.
//!
//! These DTOs are serialized to JSON for outbound generation requests and are
//! owned by the engine (not the domain) to keep the domain free of wire shapes.
//! Which world facts make it in here is decided by the persona's help policy
//! and mission awareness; see `use_cases::dialogue::context`.

use serde::{Deserialize, Serialize};

use parley_domain::{CharacterId, Intent, MemoryCard, PersonaContract, TurnRecord};

/// Outbound request for one generated reply.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub character_id: CharacterId,
    pub player_input: String,
    /// What the pipeline will say if the backend cannot.
    pub fallback_text: String,
    pub intent: Intent,
    /// Full behavioral contract of the responding character.
    pub persona: &'static PersonaContract,
    pub context: GenerationContext,
    /// Recent turns with this character, oldest first.
    pub history: Vec<TurnRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationContext {
    pub world: WorldFacts,
    /// Present only when the persona may know about the mission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<MissionFacts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldFacts {
    pub location: String,
    pub time_remaining_secs: u32,
    pub route_progress: u8,
    pub inventory: InventoryFlags,
    #[serde(default)]
    pub nearby: Vec<CharacterId>,
    /// Withheld from personas that never give directions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    /// Warnings this character has issued so far.
    #[serde(default)]
    pub warnings_issued: u32,
}

/// Key items the player holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryFlags {
    pub id_badge: bool,
    pub coin_pouch: bool,
    pub harbor_map: bool,
    pub dispatch: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionFacts {
    pub assigned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    pub dispatch_collected: bool,
}

/// Successful backend reply. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReply {
    #[serde(default)]
    pub text: String,
    /// Backend-declared origin label ("generated", "cache", ...).
    #[serde(default)]
    pub source: Option<String>,
    /// Intent id the backend believes it answered.
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Body of a 4xx rejection, when the backend sends one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub issues: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_reply_parses() {
        let reply: GenerationReply = serde_json::from_str(r#"{"text":"Hi."}"#).unwrap();
        assert_eq!(reply.text, "Hi.");
        assert_eq!(reply.source, None);

        let empty: GenerationReply = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, GenerationReply::default());
    }

    #[test]
    fn hidden_facts_are_not_serialized() {
        let context = GenerationContext::default();
        let json = serde_json::to_value(&context).unwrap();
        assert!(json.get("mission").is_none());
        assert!(json["world"].get("courier_location").is_none());
    }
}
