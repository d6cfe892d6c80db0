use serde_json::{Map, Value, json};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};

use super::Block;

/// How many candidates to try between checks of the stop flag.
const STOP_CHECK_INTERVAL: u64 = 1 << 12;

/// Rebuild every object with its keys inserted in sorted order so the
/// rendering never depends on field insertion order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Canonical (sorted-key, compact) JSON rendering of a block.
pub fn canonical_block(block: &Block) -> String {
    let value = serde_json::to_value(block).expect("serialize block");
    sort_keys(value).to_string()
}

fn digest_canonical(block_json: &str, proof: u64) -> String {
    let preimage = json!({ "block": block_json, "proof": proof }).to_string();
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    hex::encode(hasher.finalize())
}

/// SHA-256 fingerprint (lowercase hex) of `block` combined with `proof`.
pub fn fingerprint(block: &Block, proof: u64) -> String {
    digest_canonical(&canonical_block(block), proof)
}

/// True iff the first `difficulty` hex characters of `digest` are `'0'`.
pub fn meets_difficulty(digest: &str, difficulty: usize) -> bool {
    digest.len() >= difficulty && digest.bytes().take(difficulty).all(|c| c == b'0')
}

/// Validate a candidate proof against `block`.
pub fn is_valid_proof(block: &Block, proof: u64, difficulty: usize) -> bool {
    meets_difficulty(&fingerprint(block, proof), difficulty)
}

/// Linear scan from 0 for the first proof accepted against `block`.
pub fn proof_of_work(block: &Block, difficulty: usize) -> u64 {
    let block_json = canonical_block(block);
    let mut proof: u64 = 0;
    while !meets_difficulty(&digest_canonical(&block_json, proof), difficulty) {
        proof = proof.wrapping_add(1);
    }
    proof
}

/// Same scan as [`proof_of_work`], but gives up with `None` once `stop` is set.
pub fn proof_of_work_until(block: &Block, difficulty: usize, stop: &AtomicBool) -> Option<u64> {
    let block_json = canonical_block(block);
    let mut proof: u64 = 0;
    loop {
        if proof % STOP_CHECK_INTERVAL == 0 && stop.load(Ordering::Relaxed) {
            return None;
        }
        if meets_difficulty(&digest_canonical(&block_json, proof), difficulty) {
            return Some(proof);
        }
        proof = proof.wrapping_add(1);
    }
}
