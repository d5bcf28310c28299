//! Deterministic fallback lines.
//!
//! Used whenever the generative path cannot produce a reply, and sent to the
//! backend as the line it should beat. Pure: the same character, world and
//! intent always give the same line, and every character has a non-empty
//! generic pool to land on.

use parley_domain::{
    items, persona, variety, CharacterId, ConversationStage, HelpPolicy, IntentId, QuestStep,
    WorldContext,
};

/// Used only if a pool somehow comes up empty.
const LAST_RESORT: &str = "Not now.";

const RUN_OVER: &[&str] = &[
    "It's over for you, friend.",
    "Word travels fast. You're finished here.",
];

const LOCATE_SELF: &[&str] = &[
    "You're looking at them. Keep your voice down.",
    "You found me. Speak quickly.",
];
const LOCATE_WITHHELD: &[&str] = &["Find them yourself, slowpoke.", "Directions? Not from me."];
const LOCATE_PAID: &[&str] = &[
    "For you, a freebie: try {loc}. Next one costs.",
    "Rumor says {loc}. Rumors aren't free forever.",
];
const LOCATE_KNOWN: &[&str] = &[
    "Last I heard, the Courier was near {loc}.",
    "Try {loc}. The Courier never stays put long.",
];
const LOCATE_UNKNOWN: &[&str] = &[
    "Nobody's seen the Courier lately. Ask around the docks.",
    "The Courier moves around. Keep your ears open.",
];

const WARDEN_EXPELLED: &[&str] = &["You're finished here. Leave.", "Out. Now."];
const WARDEN_ONBOARDING: &[&str] = &[
    "Register first. Name?",
    "Nobody passes unregistered. State your name.",
];
const WARDEN_ON_MISSION: &[&str] = &[
    "The Courier has your dispatch, {name}. Move.",
    "Badge on, eyes open, {name}.",
];
const WARDEN_RETURNING: &[&str] = &[
    "Bring that dispatch straight here.",
    "Good. Now back to the gate with it.",
];
const WARDEN_GENERIC: &[&str] = &[
    "Move along.",
    "Keep your badge visible.",
    "The gate closes at the bell.",
];

const BROKER_BANNED: &[&str] = &["We're done. Walk away.", "No business with you. Ever."];
const BROKER_WARY: &[&str] = &[
    "Careful. I remember slights.",
    "Mind your tongue and we'll talk.",
];
const BROKER_SOLD: &[&str] = &[
    "Enjoy the map. Don't say where you got it.",
    "You already have my best map.",
];
const BROKER_BROKE: &[&str] = &["Come back with coin.", "No coin, no conversation."];
const BROKER_GENERIC: &[&str] = &[
    "Everything has a price.",
    "Looking to buy, or just looking?",
];

const ARCHIVIST_REGISTER: &[&str] = &[
    "Start at the gate. The Warden registers newcomers.",
    "Nothing opens up until the Warden knows your name.",
];
const ARCHIVIST_COLLECT: &[&str] = &[
    "The Courier holds what you need.",
    "Find the Courier before the bell.",
];
const ARCHIVIST_RETURN: &[&str] = &[
    "Take the dispatch back to the gate, quickly.",
    "The Warden is waiting on that dispatch.",
];
const ARCHIVIST_GENERIC: &[&str] = &[
    "The archive is quiet today.",
    "Every shelf here has a story.",
];

const COURIER_DONE: &[&str] = &["Go. Don't look back.", "You have it. Now move."];
const COURIER_UNBADGED: &[&str] = &[
    "I don't talk to unbadged strangers.",
    "No badge, no business.",
];
const COURIER_GENERIC: &[&str] = &[
    "Keep it short, I'm on a schedule.",
    "Eyes everywhere around here.",
];

const RIVAL_AHEAD: &[&str] = &[
    "Halfway there? I scheme while you dream.",
    "Still crawling? I dash, you clash.",
];
const RIVAL_GENERIC: &[&str] = &[
    "I spin and I win.",
    "You sway while I play.",
    "I creep, then I leap.",
];

/// Pick a fallback line. Never empty.
pub fn pick(character: CharacterId, world: &WorldContext, intent: IntentId) -> String {
    let (branch, pool) = select(character, world, intent);
    let seed = variety::turn_seed(character, world, 0, branch);
    let line = match variety::pick(&seed, pool) {
        "" => LAST_RESORT,
        line => line,
    };
    fill(line, world)
}

fn select(
    character: CharacterId,
    world: &WorldContext,
    intent: IntentId,
) -> (&'static str, &'static [&'static str]) {
    if character == CharacterId::Warden
        && (world.warden_stage == ConversationStage::Expelled || world.is_run_failed())
    {
        return ("warden_expelled", WARDEN_EXPELLED);
    }
    if world.is_run_failed() {
        return ("run_over", RUN_OVER);
    }
    if intent == IntentId::LocateCourier {
        return locate(character, world);
    }

    match character {
        CharacterId::Warden => match world.warden_stage {
            ConversationStage::IntroPending | ConversationStage::NamePending => {
                ("warden_onboarding", WARDEN_ONBOARDING)
            }
            _ if world.mission.dispatch_collected => ("warden_returning", WARDEN_RETURNING),
            ConversationStage::MissionGiven => ("warden_on_mission", WARDEN_ON_MISSION),
            _ => ("warden_generic", WARDEN_GENERIC),
        },
        CharacterId::Broker => {
            if world.is_banned_by(CharacterId::Broker) {
                ("broker_banned", BROKER_BANNED)
            } else if world.warnings(CharacterId::Broker).total() > 0 {
                ("broker_wary", BROKER_WARY)
            } else if world.has_item(items::HARBOR_MAP) {
                ("broker_sold", BROKER_SOLD)
            } else if intent == IntentId::BrokerTrade && !world.has_item(items::COIN_POUCH) {
                ("broker_broke", BROKER_BROKE)
            } else {
                ("broker_generic", BROKER_GENERIC)
            }
        }
        CharacterId::Archivist => match intent {
            IntentId::ArchivistHint | IntentId::ArchivistMission => match world.quest_step() {
                QuestStep::Register => ("archivist_register", ARCHIVIST_REGISTER),
                QuestStep::CollectDispatch => ("archivist_collect", ARCHIVIST_COLLECT),
                QuestStep::ReturnDispatch => ("archivist_return", ARCHIVIST_RETURN),
            },
            _ => ("archivist_generic", ARCHIVIST_GENERIC),
        },
        CharacterId::Courier => {
            if world.mission.dispatch_collected {
                ("courier_done", COURIER_DONE)
            } else if !world.has_item(items::ID_BADGE) {
                ("courier_unbadged", COURIER_UNBADGED)
            } else {
                ("courier_generic", COURIER_GENERIC)
            }
        }
        CharacterId::Rival => {
            if world.route_progress >= 50 {
                ("rival_ahead", RIVAL_AHEAD)
            } else {
                ("rival_generic", RIVAL_GENERIC)
            }
        }
    }
}

fn locate(character: CharacterId, world: &WorldContext) -> (&'static str, &'static [&'static str]) {
    if character == CharacterId::Courier {
        return ("locate_self", LOCATE_SELF);
    }
    let policy = persona(character).help_policy;
    match (&world.courier_location, policy) {
        (_, HelpPolicy::Withhold) => ("locate_withheld", LOCATE_WITHHELD),
        (None, _) => ("locate_unknown", LOCATE_UNKNOWN),
        (Some(_), HelpPolicy::Transactional) => ("locate_paid", LOCATE_PAID),
        (Some(_), _) => ("locate_known", LOCATE_KNOWN),
    }
}

fn fill(line: &str, world: &WorldContext) -> String {
    line.replace(
        "{loc}",
        world.courier_location.as_deref().unwrap_or("the docks"),
    )
    .replace("{name}", world.player_name.as_deref().unwrap_or("stranger"))
}
