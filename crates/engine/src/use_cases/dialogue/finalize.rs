//! Last pass over every non-safety reply.
//!
//! Whitespace is compacted for everyone. Jinx (the Rival) must speak in
//! exactly one rhyming verb pair per reply: extra pairs are cut back to the
//! first sentence, and a reply with none gets a seeded couplet up front.

use std::collections::HashSet;

use parley_domain::{persona, variety, CharacterId};

use super::clamp::{clamp_reply, compact_whitespace, ends_with_terminal, split_sentences};

/// Rhyming verb pairs the Rival uses.
pub const RHYME_PAIRS: &[(&str, &str)] = &[
    ("scheme", "dream"),
    ("dash", "clash"),
    ("spin", "win"),
    ("creep", "leap"),
    ("sway", "play"),
    ("boast", "roast"),
];

/// Each couplet holds exactly one pair.
const COUPLETS: &[&str] = &[
    "I scheme while you dream.",
    "I dash, you clash.",
    "I spin and I win.",
    "I creep, then I leap.",
    "You sway while I play.",
    "I boast while you roast.",
];

/// Number of distinct rhyme pairs fully present in `text`.
pub fn rhyme_pairs_in(text: &str) -> usize {
    let words: HashSet<String> = text
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    RHYME_PAIRS
        .iter()
        .filter(|(a, b)| words.contains(*a) && words.contains(*b))
        .count()
}

pub fn finalize(character: CharacterId, text: &str, seed: &str) -> String {
    let text = compact_whitespace(text);
    if character != CharacterId::Rival || text.is_empty() {
        return text;
    }
    rival_rule(text, seed)
}

fn rival_rule(text: String, seed: &str) -> String {
    let mut text = text;

    if rhyme_pairs_in(&text) > 1 {
        let mut first = split_sentences(&text)
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default();
        if !ends_with_terminal(&first) {
            first.push('.');
        }
        tracing::debug!(
            kept = %first,
            "Rival reply had several rhyme pairs, keeping first sentence"
        );
        text = first;
    }

    match rhyme_pairs_in(&text) {
        1 => text,
        0 => {
            let budget = persona(CharacterId::Rival);
            let couplet = variety::pick(seed, COUPLETS);
            clamp_reply(&format!("{couplet} {text}"), budget.max_sentences, budget.max_chars).text
        }
        // A single sentence stuffed with rhymes; the couplet alone is safe.
        _ => variety::pick(seed, COUPLETS).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn couplets_each_hold_one_pair() {
        for couplet in COUPLETS {
            assert_eq!(rhyme_pairs_in(couplet), 1, "{couplet}");
        }
    }

    #[test]
    fn other_characters_only_get_whitespace_compaction() {
        assert_eq!(
            finalize(CharacterId::Broker, "  Coin   first.\n\nThen talk. ", "s"),
            "Coin first. Then talk."
        );
    }

    #[test]
    fn one_pair_is_left_alone() {
        let text = "I dash, you clash. See you at the finish.";
        assert_eq!(finalize(CharacterId::Rival, text, "s"), text);
    }

    #[test]
    fn extra_pairs_keep_first_sentence() {
        let text = "I spin and I win. You sway while I play.";
        let out = finalize(CharacterId::Rival, text, "s");
        assert_eq!(out, "I spin and I win.");
        assert_eq!(rhyme_pairs_in(&out), 1);
    }

    #[test]
    fn no_pair_gets_a_seeded_couplet() {
        let out = finalize(CharacterId::Rival, "Catch me if you can.", "seed-1");
        assert_eq!(out, finalize(CharacterId::Rival, "Catch me if you can.", "seed-1"));
        assert!(out.ends_with("Catch me if you can."), "{out}");
        assert!(COUPLETS.iter().any(|c| out.starts_with(c)), "{out}");
        assert_eq!(rhyme_pairs_in(&out), 1);
    }

    #[test]
    fn crowded_single_sentence_becomes_a_couplet() {
        let out = finalize(CharacterId::Rival, "I spin to win while you sway and play", "s");
        assert_eq!(rhyme_pairs_in(&out), 1);
        assert!(COUPLETS.contains(&out.as_str()));
    }

    #[test]
    fn words_must_match_whole() {
        assert_eq!(rhyme_pairs_in("spinning and winning"), 0);
        assert_eq!(rhyme_pairs_in("SPIN, then WIN!"), 1);
    }
}
