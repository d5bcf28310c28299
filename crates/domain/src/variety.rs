//! Seeded line selection.
//!
//! Lines are chosen by hashing a seed built from volatile world fields and
//! reducing it modulo the pool size. The same seed always yields the same
//! line, while small changes in the world (time, location, input length)
//! rotate through the pool. SHA-256 keeps the mapping stable across
//! platforms and toolchains so tests can pin exact lines.

use sha2::{Digest, Sha256};

use crate::ids::CharacterId;
use crate::world::WorldContext;

/// First eight bytes of SHA-256(seed), big-endian.
pub fn seed_hash(seed: &str) -> u64 {
    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Index into a pool of `len` entries. Zero for an empty pool.
pub fn pick_index(seed: &str, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (seed_hash(seed) % len as u64) as usize
}

/// Picks a line from a non-empty pool. Returns `""` for an empty pool.
pub fn pick<'a>(seed: &str, pool: &[&'a str]) -> &'a str {
    pool.get(pick_index(seed, pool.len())).copied().unwrap_or("")
}

/// Seed for a turn: character, time remaining, location, route progress,
/// input length and the decision-tree branch, joined with `|`.
pub fn turn_seed(
    character: CharacterId,
    world: &WorldContext,
    input_len: usize,
    branch: &str,
) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}",
        character,
        world.time_remaining_secs,
        world.location,
        world.route_progress,
        input_len,
        branch
    )
}
