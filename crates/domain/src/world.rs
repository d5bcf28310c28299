//! World-context snapshot handed to the dialogue pipeline for one turn.
//!
//! The snapshot is owned by the caller's game-state store. The pipeline reads
//! it everywhere and writes it only from the scripted responder, which takes it
//! by `&mut` for the duration of the call.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CharacterId;

/// Item ids the pipeline knows about.
pub mod items {
    pub const ID_BADGE: &str = "id_badge";
    pub const COIN_POUCH: &str = "coin_pouch";
    pub const HARBOR_MAP: &str = "harbor_map";
    pub const DISPATCH: &str = "dispatch";
    /// Restricted at the gate.
    pub const LOCKPICK: &str = "lockpick";
}

/// Onboarding stage of the Warden conversation.
///
/// `IntroPending -> NamePending -> MissionGiven -> DismissMode`, forward only.
/// `Expelled` is terminal and reachable from every other stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    #[default]
    IntroPending,
    NamePending,
    MissionGiven,
    DismissMode,
    Expelled,
}

impl ConversationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntroPending => "intro_pending",
            Self::NamePending => "name_pending",
            Self::MissionGiven => "mission_given",
            Self::DismissMode => "dismiss_mode",
            Self::Expelled => "expelled",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::IntroPending => 0,
            Self::NamePending => 1,
            Self::MissionGiven => 2,
            Self::DismissMode => 3,
            Self::Expelled => u8::MAX,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expelled)
    }

    /// Whether onboarding is still in progress (mission not yet handed out).
    pub fn is_onboarding(&self) -> bool {
        matches!(self, Self::IntroPending | Self::NamePending)
    }

    pub fn can_transition_to(&self, next: ConversationStage) -> bool {
        if self.is_terminal() {
            return false;
        }
        next == Self::Expelled || next.rank() > self.rank()
    }
}

/// Escalation counters a character keeps about the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WarningCounters {
    #[serde(default)]
    pub disrespect: u32,
    #[serde(default)]
    pub contraband: u32,
}

impl WarningCounters {
    pub fn total(&self) -> u32 {
        self.disrespect + self.contraband
    }
}

/// Mission facts. Only disclosed to the generator per persona policy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissionState {
    #[serde(default)]
    pub assigned: bool,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub dispatch_collected: bool,
}

/// Where the player stands on the main quest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStep {
    Register,
    CollectDispatch,
    ReturnDispatch,
}

impl QuestStep {
    /// Imperative description of the step.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Register => "register with the Gate Warden",
            Self::CollectDispatch => "collect the dispatch from the Courier",
            Self::ReturnDispatch => "bring the dispatch back to the gate",
        }
    }
}

/// Terminal "run failed" marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    pub reason: String,
}

/// What a character remembers about its last exchanges with the player.
/// Written by the caller after each reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemoryCard {
    #[serde(default)]
    pub last_advice: Option<String>,
    /// `last_advice` was about the mission.
    #[serde(default)]
    pub advice_is_mission: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// One exchange in the recent-turn log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub character: CharacterId,
    pub player: String,
    pub reply: String,
}

/// Snapshot of the game world as the dialogue pipeline sees it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldContext {
    pub location: String,
    pub time_remaining_secs: u32,
    /// 0..=100
    pub route_progress: u8,
    #[serde(default)]
    pub inventory: BTreeSet<String>,
    #[serde(default)]
    pub nearby: Vec<CharacterId>,
    #[serde(default)]
    pub courier_location: Option<String>,
    #[serde(default)]
    pub warnings: BTreeMap<CharacterId, WarningCounters>,
    #[serde(default)]
    pub bans: BTreeSet<CharacterId>,
    #[serde(default)]
    pub warden_stage: ConversationStage,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub mission: MissionState,
    #[serde(default)]
    pub run_failure: Option<RunFailure>,
    #[serde(default)]
    pub memory: BTreeMap<CharacterId, MemoryCard>,
    #[serde(default)]
    pub encounters: BTreeMap<CharacterId, u32>,
    #[serde(default)]
    pub recent_turns: Vec<TurnRecord>,
}

impl WorldContext {
    pub fn new(location: impl Into<String>, time_remaining_secs: u32) -> Self {
        Self {
            location: location.into(),
            time_remaining_secs,
            ..Self::default()
        }
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.contains(item)
    }

    /// Returns `true` if the item was not already held.
    pub fn grant_item(&mut self, item: &str) -> bool {
        self.inventory.insert(item.to_string())
    }

    /// Returns `true` if the item was held.
    pub fn remove_item(&mut self, item: &str) -> bool {
        self.inventory.remove(item)
    }

    pub fn warnings(&self, character: CharacterId) -> WarningCounters {
        self.warnings.get(&character).copied().unwrap_or_default()
    }

    pub fn warnings_mut(&mut self, character: CharacterId) -> &mut WarningCounters {
        self.warnings.entry(character).or_default()
    }

    pub fn is_banned_by(&self, character: CharacterId) -> bool {
        self.bans.contains(&character)
    }

    pub fn is_run_failed(&self) -> bool {
        self.run_failure.is_some()
    }

    /// Marks the run as failed. The first reason wins.
    pub fn fail_run(&mut self, reason: impl Into<String>) {
        if self.run_failure.is_none() {
            self.run_failure = Some(RunFailure {
                reason: reason.into(),
            });
        }
    }

    pub fn set_warden_stage(&mut self, next: ConversationStage) -> Result<(), DomainError> {
        if !self.warden_stage.can_transition_to(next) {
            return Err(DomainError::invalid_transition(
                self.warden_stage.as_str(),
                next.as_str(),
            ));
        }
        self.warden_stage = next;
        Ok(())
    }

    pub fn quest_step(&self) -> QuestStep {
        if !self.mission.assigned {
            QuestStep::Register
        } else if !self.mission.dispatch_collected {
            QuestStep::CollectDispatch
        } else {
            QuestStep::ReturnDispatch
        }
    }

    pub fn memory_card(&self, character: CharacterId) -> Option<&MemoryCard> {
        self.memory.get(&character)
    }

    pub fn encounter_count(&self, character: CharacterId) -> u32 {
        self.encounters.get(&character).copied().unwrap_or(0)
    }

    /// Bumps and returns the encounter counter.
    pub fn record_encounter(&mut self, character: CharacterId) -> u32 {
        let count = self.encounters.entry(character).or_insert(0);
        *count += 1;
        *count
    }

    /// Appends a turn, keeping at most `window` entries.
    pub fn record_turn(&mut self, turn: TurnRecord, window: usize) {
        self.recent_turns.push(turn);
        if self.recent_turns.len() > window {
            let excess = self.recent_turns.len() - window;
            self.recent_turns.drain(..excess);
        }
    }
}
