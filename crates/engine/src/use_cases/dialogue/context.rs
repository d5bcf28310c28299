//! Context assembly for the generative path.
//!
//! Decides which world facts the backend may see. The persona's help policy
//! gates locations, its mission awareness gates mission facts, and the
//! Archivist forgets stale mission advice unless the player asks about it.

use parley_domain::{items, persona, CharacterId, MemoryCard, TurnRecord, WorldContext};

use super::classifier::mentions_mission;
use crate::dialogue_context::{GenerationContext, InventoryFlags, MissionFacts, WorldFacts};

pub fn assemble(character: CharacterId, input: &str, world: &WorldContext) -> GenerationContext {
    let contract = persona(character);

    let courier_location = if contract.help_policy.discloses_locations() {
        world.courier_location.clone()
    } else {
        None
    };

    let mission = contract.mission_visible(input).then(|| MissionFacts {
        assigned: world.mission.assigned,
        objective: world.mission.objective.clone(),
        dispatch_collected: world.mission.dispatch_collected,
    });

    let memory = world
        .memory_card(character)
        .map(|card| scrub_memory(character, card, input));

    GenerationContext {
        world: WorldFacts {
            location: world.location.clone(),
            time_remaining_secs: world.time_remaining_secs,
            route_progress: world.route_progress,
            inventory: InventoryFlags {
                id_badge: world.has_item(items::ID_BADGE),
                coin_pouch: world.has_item(items::COIN_POUCH),
                harbor_map: world.has_item(items::HARBOR_MAP),
                dispatch: world.has_item(items::DISPATCH),
            },
            nearby: world.nearby.clone(),
            courier_location,
            player_name: world.player_name.clone(),
            warnings_issued: world.warnings(character).total(),
        },
        mission,
        memory,
    }
}

/// Recent turns with `character`, oldest first, at most `window` of them.
pub fn history(character: CharacterId, world: &WorldContext, window: usize) -> Vec<TurnRecord> {
    let mut turns: Vec<TurnRecord> = world
        .recent_turns
        .iter()
        .rev()
        .filter(|t| t.character == character)
        .take(window)
        .cloned()
        .collect();
    turns.reverse();
    turns
}

/// The Archivist drops mission advice the player has moved on from, so the
/// generator does not keep steering back to it.
pub fn scrub_memory(character: CharacterId, card: &MemoryCard, input: &str) -> MemoryCard {
    let mut card = card.clone();
    if character == CharacterId::Archivist && card.advice_is_mission && !mentions_mission(input) {
        card.last_advice = None;
        card.advice_is_mission = false;
    }
    card
}
