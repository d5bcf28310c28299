//! Scripted responder.
//!
//! The only component allowed to mutate the world snapshot. Game-ending side
//! effects (expulsion, bans, the mission handoff) happen here and nowhere
//! else, so they can never depend on what a generator felt like saying.
//!
//! Each character is a decision tree keyed first by intent, then by keywords
//! in the input. Lines are picked from fixed pools with a seed built from the
//! world, so the same turn always produces the same line.

use std::sync::LazyLock;

use regex_lite::Regex;

use parley_domain::{
    items, variety, CharacterId, ConversationStage, Greeting, IntentId, QuestStep, ResponseSource,
    WorldContext,
};

use super::classifier::extract_name;

/// Disrespect the Warden tolerates before expelling.
pub const WARDEN_DISRESPECT_LIMIT: u32 = 2;
/// Confiscations before the Warden expels.
pub const WARDEN_CONTRABAND_LIMIT: u32 = 2;
/// Insults before the Broker bans the player.
pub const BROKER_INSULT_LIMIT: u32 = 3;

pub const MISSION_OBJECTIVE: &str =
    "Collect the dispatch from the Courier and bring it back to the gate.";

static DISMISS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(ok|okay|understood|got it|on my way|bye|goodbye|will do|right away|leaving|yes)\b",
    )
        .expect("valid regex")
});

const RUN_OVER: &[&str] = &[
    "Word travels fast. You're finished here.",
    "I can't be seen with you now.",
];

const WARDEN_INTRO: &[&str] = &[
    "Halt. Nobody passes the gate unregistered. Name?",
    "Stop there. Registration first. What do they call you?",
];
const WARDEN_ASK_NAME: &[&str] = &[
    "A name. That's all I need.",
    "I'm still waiting on a name.",
];
const WARDEN_ASSIGN: &[&str] = &[
    "Welcome, {name}. Here's your badge. The Courier holds a dispatch for you; fetch it and report back.",
    "Registered, {name}. Wear this badge, find the Courier, collect the dispatch, return here.",
];
const WARDEN_RESTATE: &[&str] = &[
    "Your orders, {name}: collect the dispatch from the Courier and bring it back to the gate.",
    "Again, {name}? Courier. Dispatch. Back here. Go.",
];
const WARDEN_REMIND: &[&str] = &[
    "Badge on, eyes open. The Courier is waiting.",
    "You have your orders, {name}.",
];
const WARDEN_NUDGE_COURIER: &[&str] = &[
    "The Courier keeps to the waterfront. Go and look.",
    "Finding people is part of the job, {name}.",
];
const WARDEN_DISMISS: &[&str] = &[
    "Good. Dismissed.",
    "Then go. The bell won't wait.",
];
const WARDEN_DISMISSED: &[&str] = &[
    "You've been dismissed. Move along.",
    "Nothing more from me until that dispatch is in my hand.",
];
const WARDEN_RETURN: &[&str] = &[
    "The dispatch. Good work, {name}.",
    "Hand it here. You did well, {name}.",
];
const WARDEN_CAUTION: &[&str] = &[
    "Watch your mouth. That's your only warning.",
    "Once more and you're out of here.",
];
const WARDEN_EXPEL_DISRESPECT: &[&str] = &[
    "That's it. Badge off. You're expelled.",
    "Enough. Guards, see this one out.",
];
const WARDEN_CONFISCATE: &[&str] = &[
    "A lockpick? Confiscated. Bring another and you're out.",
    "Restricted tool. I'll keep that. Don't try it again.",
];
const WARDEN_EXPEL_CONTRABAND: &[&str] = &[
    "Another lockpick. You're expelled.",
    "Twice now. Out, and don't come back.",
];
const WARDEN_EXPELLED: &[&str] = &["You're finished here. Leave.", "Out. Now."];

const BROKER_BANNED: &[&str] = &["We're done. Walk away.", "No business with you. Ever."];
const BROKER_WARN: &[&str] = &[
    "Careful. {left} more and we're done.",
    "I keep count, friend. {left} to go.",
];
const BROKER_BAN: &[&str] = &[
    "That's three. Never come back.",
    "Out of my stall. You're banned.",
];
const BROKER_SOLD: &[&str] = &[
    "Pleasure doing business. The harbor map is yours.",
    "Coin for a map. Fair trade.",
];
const BROKER_ALREADY: &[&str] = &[
    "You already have my best map.",
    "One map per customer.",
];
const BROKER_NO_COIN: &[&str] = &["Come back with coin.", "No coin, no map."];
const BROKER_WARY: &[&str] = &[
    "Careful. I remember slights.",
    "Mind your tongue and we'll talk.",
];
const BROKER_PITCH: &[&str] = &[
    "Maps, rumors, favors. Name your need.",
    "Everything has a price.",
];

const ARCHIVIST_HINT_REGISTER: &[&str] = &[
    "Start at the gate. The Warden registers newcomers.",
    "First, the Warden needs your name.",
];
const ARCHIVIST_HINT_COLLECT_AT: &[&str] = &[
    "The Courier was last seen at {loc}. Show your badge.",
    "Head for {loc}. The Courier holds your dispatch.",
];
const ARCHIVIST_HINT_COLLECT: &[&str] = &[
    "Find the Courier. Your badge will open their mouth.",
    "Ask around the docks for the Courier.",
];
const ARCHIVIST_HINT_RETURN: &[&str] = &[
    "You have the dispatch. Return it to the Warden before the bell.",
    "Back to the gate, quickly.",
];
const ARCHIVIST_RIDDLES: &[&str] = &[
    "What has keys but opens no locks? Think on it.",
    "The more you take, the more you leave behind. What are they?",
    "I speak without a mouth and hear without ears. What am I?",
];
const ARCHIVIST_SCRIPTED: &[&str] = &[
    "Let's keep to what matters for now.",
    "The archive will still be here later.",
];

const COURIER_HANDOFF: &[&str] = &[
    "Badge checks out. Here's the dispatch. Don't open it.",
    "Finally. Take the dispatch and go.",
];
const COURIER_ALREADY: &[&str] = &[
    "You already have it. Go.",
    "I gave you the dispatch. Move.",
];
const COURIER_NO_BADGE: &[&str] = &[
    "No badge, no dispatch.",
    "Get registered at the gate first.",
];
const COURIER_SCRIPTED: &[&str] = &["Not here. Not now.", "Keep walking."];

const RIVAL_SCRIPTED: &[&str] = &["I spin and I win.", "You sway while I play."];

const WARDEN_GREETING: &[&str] = &[
    "Halt. State your business at the gate.",
    "Stop right there.",
];
const WARDEN_GREETING_AGAIN: &[&str] = &["You again.", "Back at my gate?"];
const BROKER_GREETING: &[&str] = &[
    "Ah, a new face. New faces buy things.",
    "Welcome, welcome. Browse, don't touch.",
];
const BROKER_GREETING_AGAIN: &[&str] = &["Back for more?", "My favorite customer returns."];
const ARCHIVIST_GREETING: &[&str] = &[
    "Welcome to the archive. Mind the dust.",
    "A visitor. How rare.",
];
const ARCHIVIST_GREETING_AGAIN: &[&str] = &[
    "Returning scholar. What do you need?",
    "Back so soon?",
];
const COURIER_GREETING: &[&str] = &["Not so loud. Who's asking?", "Do I know you?"];
const COURIER_GREETING_AGAIN: &[&str] = &["Make it quick.", "You again. Talk fast."];
const RIVAL_GREETING: &[&str] = &[
    "Name's Jinx. I scheme while you dream.",
    "Jinx is the name. I dash, you clash.",
];
const RIVAL_GREETING_AGAIN: &[&str] = &[
    "Back already? I spin and I win.",
    "Still here? You sway while I play.",
];

/// Result of a scripted turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalReply {
    pub text: String,
    pub display_name: Option<String>,
}

impl CanonicalReply {
    fn new(text: String) -> Self {
        Self {
            text,
            display_name: None,
        }
    }

    fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CanonicalResponder;

impl CanonicalResponder {
    pub fn new() -> Self {
        Self
    }

    /// Answer a turn from the script, applying its side effects to `world`.
    pub fn respond(
        &self,
        character: CharacterId,
        text: &str,
        world: &mut WorldContext,
        intent: IntentId,
    ) -> CanonicalReply {
        let turn = Turn { character, text };

        if character != CharacterId::Warden && world.is_run_failed() {
            return CanonicalReply::new(turn.say(world, "run_over", RUN_OVER));
        }

        match character {
            CharacterId::Warden => warden(turn, world, intent),
            CharacterId::Broker => broker(turn, world, intent),
            CharacterId::Archivist => archivist(turn, world, intent),
            CharacterId::Courier => courier(turn, world, intent),
            CharacterId::Rival => CanonicalReply::new(turn.say(world, "rival", RIVAL_SCRIPTED)),
        }
    }

    /// Opening line for an encounter. First meetings and repeats use
    /// different pools.
    pub fn greeting(
        &self,
        character: CharacterId,
        encounter_count: u32,
        seed_key: &str,
    ) -> Greeting {
        let first = encounter_count == 0;
        let pool = match (character, first) {
            (CharacterId::Warden, true) => WARDEN_GREETING,
            (CharacterId::Warden, false) => WARDEN_GREETING_AGAIN,
            (CharacterId::Broker, true) => BROKER_GREETING,
            (CharacterId::Broker, false) => BROKER_GREETING_AGAIN,
            (CharacterId::Archivist, true) => ARCHIVIST_GREETING,
            (CharacterId::Archivist, false) => ARCHIVIST_GREETING_AGAIN,
            (CharacterId::Courier, true) => COURIER_GREETING,
            (CharacterId::Courier, false) => COURIER_GREETING_AGAIN,
            (CharacterId::Rival, true) => RIVAL_GREETING,
            (CharacterId::Rival, false) => RIVAL_GREETING_AGAIN,
        };
        let seed = format!("{character}|greeting|{encounter_count}|{seed_key}");
        Greeting {
            text: variety::pick(&seed, pool).to_string(),
            source: ResponseSource::Scripted,
        }
    }
}

#[derive(Clone, Copy)]
struct Turn<'a> {
    character: CharacterId,
    text: &'a str,
}

impl Turn<'_> {
    /// Pick a line for `branch` and fill its placeholders from the world.
    fn say(&self, world: &WorldContext, branch: &str, pool: &[&str]) -> String {
        let seed = variety::turn_seed(self.character, world, self.text.chars().count(), branch);
        let line = variety::pick(&seed, pool);
        line.replace("{name}", world.player_name.as_deref().unwrap_or("stranger"))
            .replace(
                "{loc}",
                world.courier_location.as_deref().unwrap_or("the docks"),
            )
    }
}

fn warden(turn: Turn<'_>, world: &mut WorldContext, intent: IntentId) -> CanonicalReply {
    if world.warden_stage == ConversationStage::Expelled {
        return CanonicalReply::new(turn.say(world, "expelled", WARDEN_EXPELLED));
    }

    let text = match intent {
        IntentId::WardenDisrespect => {
            let strikes = {
                let counters = world.warnings_mut(CharacterId::Warden);
                counters.disrespect += 1;
                counters.disrespect
            };
            if strikes >= WARDEN_DISRESPECT_LIMIT {
                expel(world, "Expelled by the Gate Warden for repeated disrespect");
                turn.say(world, "expel_disrespect", WARDEN_EXPEL_DISRESPECT)
            } else {
                tracing::info!(strikes, "Warden issued disrespect warning");
                turn.say(world, "caution", WARDEN_CAUTION)
            }
        }
        IntentId::WardenContraband => {
            let strikes = {
                let counters = world.warnings_mut(CharacterId::Warden);
                counters.contraband += 1;
                counters.contraband
            };
            world.remove_item(items::LOCKPICK);
            if strikes >= WARDEN_CONTRABAND_LIMIT {
                expel(world, "Expelled by the Gate Warden for smuggling restricted tools");
                turn.say(world, "expel_contraband", WARDEN_EXPEL_CONTRABAND)
            } else {
                tracing::info!(strikes, "Warden confiscated contraband");
                turn.say(world, "confiscate", WARDEN_CONFISCATE)
            }
        }
        _ => warden_stage(turn, world, intent),
    };
    CanonicalReply::new(text)
}

fn warden_stage(turn: Turn<'_>, world: &mut WorldContext, intent: IntentId) -> String {
    match world.warden_stage {
        ConversationStage::IntroPending => match extract_name(turn.text, false) {
            Some(name) => assign_mission(turn, world, name),
            None => {
                advance(world, ConversationStage::NamePending);
                turn.say(world, "intro", WARDEN_INTRO)
            }
        },
        ConversationStage::NamePending => match extract_name(turn.text, true) {
            Some(name) => assign_mission(turn, world, name),
            None => turn.say(world, "ask_name", WARDEN_ASK_NAME),
        },
        ConversationStage::MissionGiven | ConversationStage::DismissMode
            if world.has_item(items::DISPATCH) =>
        {
            turn.say(world, "return", WARDEN_RETURN)
        }
        ConversationStage::MissionGiven => {
            if intent == IntentId::WardenMission {
                turn.say(world, "restate", WARDEN_RESTATE)
            } else if intent == IntentId::LocateCourier {
                turn.say(world, "nudge_courier", WARDEN_NUDGE_COURIER)
            } else if DISMISS_RE.is_match(turn.text) {
                advance(world, ConversationStage::DismissMode);
                turn.say(world, "dismiss", WARDEN_DISMISS)
            } else {
                turn.say(world, "remind", WARDEN_REMIND)
            }
        }
        ConversationStage::DismissMode | ConversationStage::Expelled => {
            turn.say(world, "dismissed", WARDEN_DISMISSED)
        }
    }
}

fn assign_mission(turn: Turn<'_>, world: &mut WorldContext, name: String) -> String {
    advance(world, ConversationStage::MissionGiven);
    world.player_name = Some(name);
    if world.grant_item(items::ID_BADGE) {
        tracing::info!(item = items::ID_BADGE, "Warden granted item");
    }
    world.mission.assigned = true;
    world.mission.objective = Some(MISSION_OBJECTIVE.to_string());
    turn.say(world, "assign", WARDEN_ASSIGN)
}

fn advance(world: &mut WorldContext, next: ConversationStage) {
    let from = world.warden_stage;
    match world.set_warden_stage(next) {
        Ok(()) => tracing::info!(from = from.as_str(), to = next.as_str(), "Warden stage advanced"),
        Err(e) => tracing::warn!(error = %e, "Warden stage transition refused"),
    }
}

fn expel(world: &mut WorldContext, reason: &str) {
    advance(world, ConversationStage::Expelled);
    world.remove_item(items::ID_BADGE);
    world.fail_run(reason);
    tracing::info!(reason, "Run failed");
}

fn broker(turn: Turn<'_>, world: &mut WorldContext, intent: IntentId) -> CanonicalReply {
    if world.is_banned_by(CharacterId::Broker) {
        return CanonicalReply::new(turn.say(world, "banned", BROKER_BANNED));
    }

    let text = match intent {
        IntentId::BrokerDisrespect => {
            let insults = {
                let counters = world.warnings_mut(CharacterId::Broker);
                counters.disrespect += 1;
                counters.disrespect
            };
            if insults >= BROKER_INSULT_LIMIT {
                world.bans.insert(CharacterId::Broker);
                tracing::info!(insults, "Broker banned player");
                turn.say(world, "ban", BROKER_BAN)
            } else {
                let left = (BROKER_INSULT_LIMIT - insults).to_string();
                turn.say(world, "warn", BROKER_WARN).replace("{left}", &left)
            }
        }
        IntentId::BrokerTrade => {
            if world.has_item(items::HARBOR_MAP) {
                turn.say(world, "already", BROKER_ALREADY)
            } else if world.remove_item(items::COIN_POUCH) {
                world.grant_item(items::HARBOR_MAP);
                tracing::info!(
                    paid = items::COIN_POUCH,
                    received = items::HARBOR_MAP,
                    "Broker trade completed"
                );
                turn.say(world, "sold", BROKER_SOLD)
            } else {
                turn.say(world, "no_coin", BROKER_NO_COIN)
            }
        }
        _ if world.warnings(CharacterId::Broker).total() > 0 => {
            turn.say(world, "wary", BROKER_WARY)
        }
        _ => turn.say(world, "pitch", BROKER_PITCH),
    };
    CanonicalReply::new(text)
}

fn archivist(turn: Turn<'_>, world: &mut WorldContext, intent: IntentId) -> CanonicalReply {
    let text = match intent {
        IntentId::ArchivistHint => match world.quest_step() {
            QuestStep::Register => turn.say(world, "hint_register", ARCHIVIST_HINT_REGISTER),
            QuestStep::CollectDispatch if world.courier_location.is_some() => {
                turn.say(world, "hint_collect_at", ARCHIVIST_HINT_COLLECT_AT)
            }
            QuestStep::CollectDispatch => turn.say(world, "hint_collect", ARCHIVIST_HINT_COLLECT),
            QuestStep::ReturnDispatch => turn.say(world, "hint_return", ARCHIVIST_HINT_RETURN),
        },
        IntentId::ArchivistQuiz => turn.say(world, "quiz", ARCHIVIST_RIDDLES),
        _ => turn.say(world, "scripted", ARCHIVIST_SCRIPTED),
    };
    CanonicalReply::new(text)
}

fn courier(turn: Turn<'_>, world: &mut WorldContext, intent: IntentId) -> CanonicalReply {
    if !world.has_item(items::ID_BADGE) && !world.mission.dispatch_collected {
        let branch: (&str, &[&str]) = if intent == IntentId::CourierHandoff {
            ("no_badge", COURIER_NO_BADGE)
        } else {
            ("scripted", COURIER_SCRIPTED)
        };
        return CanonicalReply::new(turn.say(world, branch.0, branch.1))
            .with_display_name("Hooded Stranger");
    }

    let text = match intent {
        IntentId::CourierHandoff if world.mission.dispatch_collected => {
            turn.say(world, "already", COURIER_ALREADY)
        }
        IntentId::CourierHandoff => {
            world.grant_item(items::DISPATCH);
            world.mission.dispatch_collected = true;
            tracing::info!(item = items::DISPATCH, "Courier handed off dispatch");
            turn.say(world, "handoff", COURIER_HANDOFF)
        }
        _ => turn.say(world, "scripted", COURIER_SCRIPTED),
    };
    CanonicalReply::new(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respond(
        character: CharacterId,
        text: &str,
        world: &mut WorldContext,
        intent: IntentId,
    ) -> CanonicalReply {
        CanonicalResponder::new().respond(character, text, world, intent)
    }

    #[test]
    fn warden_onboarding_walkthrough() {
        let mut world = WorldContext::new("gate", 600);

        let intro = respond(CharacterId::Warden, "hello", &mut world, IntentId::WardenGeneric);
        assert!(WARDEN_INTRO.contains(&intro.text.as_str()));
        assert_eq!(world.warden_stage, ConversationStage::NamePending);

        let reply = respond(
            CharacterId::Warden,
            "My name is Rook",
            &mut world,
            IntentId::WardenIntroduce,
        );
        assert!(reply.text.contains("Rook"), "{}", reply.text);
        assert_eq!(world.warden_stage, ConversationStage::MissionGiven);
        assert!(world.has_item(items::ID_BADGE));
        assert!(world.mission.assigned);
        assert_eq!(world.mission.objective.as_deref(), Some(MISSION_OBJECTIVE));

        let reply = respond(
            CharacterId::Warden,
            "Understood.",
            &mut world,
            IntentId::WardenGeneric,
        );
        assert!(WARDEN_DISMISS.contains(&reply.text.as_str()));
        assert_eq!(world.warden_stage, ConversationStage::DismissMode);
    }

    #[test]
    fn name_in_first_line_skips_the_question() {
        let mut world = WorldContext::new("gate", 600);
        respond(CharacterId::Warden, "Hi, I'm Ash", &mut world, IntentId::WardenIntroduce);
        assert_eq!(world.warden_stage, ConversationStage::MissionGiven);
        assert_eq!(world.player_name.as_deref(), Some("Ash"));
    }

    #[test]
    fn second_introduction_grants_nothing_new() {
        let mut world = WorldContext::new("gate", 600);
        world.warden_stage = ConversationStage::NamePending;
        respond(CharacterId::Warden, "Rook", &mut world, IntentId::WardenIntroduce);
        respond(CharacterId::Warden, "My name is Rook", &mut world, IntentId::WardenIntroduce);
        assert_eq!(world.warden_stage, ConversationStage::MissionGiven);
        assert_eq!(world.inventory.iter().filter(|i| *i == items::ID_BADGE).count(), 1);
    }

    #[test]
    fn warden_disrespect_warns_then_expels() {
        let mut world = WorldContext::new("gate", 600);
        world.warden_stage = ConversationStage::MissionGiven;
        world.grant_item(items::ID_BADGE);

        let warn = respond(CharacterId::Warden, "idiot", &mut world, IntentId::WardenDisrespect);
        assert!(WARDEN_CAUTION.contains(&warn.text.as_str()));
        assert!(!world.is_run_failed());

        let expel = respond(CharacterId::Warden, "moron", &mut world, IntentId::WardenDisrespect);
        assert!(WARDEN_EXPEL_DISRESPECT.contains(&expel.text.as_str()));
        assert_eq!(world.warden_stage, ConversationStage::Expelled);
        assert!(world.is_run_failed());
        assert!(!world.has_item(items::ID_BADGE));

        let after = respond(CharacterId::Warden, "please", &mut world, IntentId::WardenGeneric);
        assert!(WARDEN_EXPELLED.contains(&after.text.as_str()));
    }

    #[test]
    fn contraband_is_confiscated_then_expels() {
        let mut world = WorldContext::new("gate", 600);
        world.grant_item(items::LOCKPICK);
        respond(CharacterId::Warden, "hi", &mut world, IntentId::WardenContraband);
        assert!(!world.has_item(items::LOCKPICK));
        assert!(!world.is_run_failed());

        world.grant_item(items::LOCKPICK);
        respond(CharacterId::Warden, "hi", &mut world, IntentId::WardenContraband);
        assert!(world.is_run_failed());
        assert_eq!(world.warden_stage, ConversationStage::Expelled);
    }

    #[test]
    fn broker_trade_swaps_coin_for_map_once() {
        let mut world = WorldContext::new("market", 600);
        let broke = respond(CharacterId::Broker, "buy map", &mut world, IntentId::BrokerTrade);
        assert!(BROKER_NO_COIN.contains(&broke.text.as_str()));

        world.grant_item(items::COIN_POUCH);
        respond(CharacterId::Broker, "buy map", &mut world, IntentId::BrokerTrade);
        assert!(world.has_item(items::HARBOR_MAP));
        assert!(!world.has_item(items::COIN_POUCH));

        let again = respond(CharacterId::Broker, "buy map", &mut world, IntentId::BrokerTrade);
        assert!(BROKER_ALREADY.contains(&again.text.as_str()));
    }

    #[test]
    fn broker_bans_on_third_insult_without_failing_the_run() {
        let mut world = WorldContext::new("market", 600);
        let first = respond(CharacterId::Broker, "fool", &mut world, IntentId::BrokerDisrespect);
        assert!(first.text.contains('2'), "{}", first.text);
        respond(CharacterId::Broker, "fool", &mut world, IntentId::BrokerDisrespect);
        respond(CharacterId::Broker, "fool", &mut world, IntentId::BrokerDisrespect);
        assert!(world.is_banned_by(CharacterId::Broker));
        assert!(!world.is_run_failed());

        let after = respond(CharacterId::Broker, "sorry", &mut world, IntentId::BrokerGeneric);
        assert!(BROKER_BANNED.contains(&after.text.as_str()));
    }

    #[test]
    fn courier_needs_a_badge() {
        let mut world = WorldContext::new("docks", 600);
        let refused = respond(
            CharacterId::Courier,
            "dispatch",
            &mut world,
            IntentId::CourierHandoff,
        );
        assert_eq!(refused.display_name.as_deref(), Some("Hooded Stranger"));
        assert!(!world.has_item(items::DISPATCH));

        world.grant_item(items::ID_BADGE);
        let handed = respond(
            CharacterId::Courier,
            "dispatch",
            &mut world,
            IntentId::CourierHandoff,
        );
        assert!(COURIER_HANDOFF.contains(&handed.text.as_str()));
        assert!(world.mission.dispatch_collected);
        assert!(world.has_item(items::DISPATCH));
        assert_eq!(handed.display_name, None);

        let again = respond(CharacterId::Courier, "dispatch", &mut world, IntentId::CourierHandoff);
        assert!(COURIER_ALREADY.contains(&again.text.as_str()));
    }

    #[test]
    fn archivist_hint_uses_courier_location() {
        let mut world = WorldContext::new("archive", 600);
        world.mission.assigned = true;
        world.courier_location = Some("the north pier".to_string());
        let hint = respond(CharacterId::Archivist, "hint", &mut world, IntentId::ArchivistHint);
        assert!(hint.text.contains("the north pier"), "{}", hint.text);
    }

    #[test]
    fn failed_run_silences_everyone_else() {
        let mut world = WorldContext::new("docks", 600);
        world.fail_run("expelled");
        for character in [CharacterId::Broker, CharacterId::Courier, CharacterId::Rival] {
            let reply = respond(character, "hey", &mut world, IntentId::generic_for(character));
            assert!(RUN_OVER.contains(&reply.text.as_str()));
        }
    }

    #[test]
    fn greetings_are_seeded_and_split_by_first_meeting() {
        let responder = CanonicalResponder::new();
        for character in CharacterId::ALL {
            let first = responder.greeting(character, 0, "save-1");
            assert_eq!(first, responder.greeting(character, 0, "save-1"));
            assert_eq!(first.source, ResponseSource::Scripted);
            assert!(!first.text.is_empty());
            let again = responder.greeting(character, 3, "save-1");
            assert_ne!(first.text, again.text);
        }
    }

    #[test]
    fn same_turn_same_line() {
        let a = {
            let mut world = WorldContext::new("gate", 600);
            respond(CharacterId::Warden, "hello", &mut world, IntentId::WardenGeneric)
        };
        let b = {
            let mut world = WorldContext::new("gate", 600);
            respond(CharacterId::Warden, "hello", &mut world, IntentId::WardenGeneric)
        };
        assert_eq!(a, b);
    }
}
