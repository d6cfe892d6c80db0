use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GENESIS_PROOF, SYSTEM_CREATOR};

/// A single block in the ledger. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC)
    /// Opaque pending payloads absorbed when the block was created.
    pub transactions: Vec<Value>,
    /// Proof that satisfied the difficulty against the previous block.
    pub previous_proof: u64,
    /// `fingerprint(previous block, previous_proof)`; `None` only for genesis.
    pub previous_hash: Option<String>,
    #[serde(rename = "created_by")]
    pub creator: String,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self {
            index: 0,
            timestamp: Utc::now().timestamp(),
            transactions: Vec::new(),
            previous_proof: GENESIS_PROOF,
            previous_hash: None,
            creator: SYSTEM_CREATOR.to_string(),
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash.is_none()
    }
}
