//! Parley domain: pure types for the NPC dialogue pipeline.
//!
//! Nothing in this crate performs I/O. The engine crate owns the pipeline,
//! ports and adapters.

pub mod dialogue;
pub mod error;
pub mod ids;
pub mod intent;
pub mod persona;
pub mod variety;
pub mod world;

pub use dialogue::{
    DialogueRequest, DialogueResponse, Greeting, ResponseSource, RouteClass, RouteDecision,
};
pub use error::DomainError;
pub use ids::CharacterId;
pub use intent::{FunctionTag, Intent, IntentId, IntentMode};
pub use persona::{persona, HelpPolicy, MissionAwareness, PersonaContract};
pub use world::{
    items, ConversationStage, MemoryCard, MissionState, QuestStep, RunFailure, TurnRecord,
    WarningCounters, WorldContext,
};
