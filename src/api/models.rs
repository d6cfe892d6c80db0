use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blockchain::{Block, Blockchain};
use crate::coordinator::Coordinator;

/// Shared application state: the coordinator (sole ledger writer) and this node's id.
pub struct AppState {
    pub coordinator: Coordinator,
    pub node_id: String,
}

impl AppState {
    /// Wire the state in its required order: ledger with genesis, then coordinator.
    pub fn new(difficulty: usize) -> Self {
        Self {
            coordinator: Coordinator::new(Blockchain::new(difficulty)),
            node_id: uuid::Uuid::new_v4().simple().to_string(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::blockchain::DIFFICULTY)
    }
}

/* ---------- Mining API Models ---------- */

/// Both fields are optional so absence can be reported precisely.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub proof: Option<u64>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForgedResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Value>,
    pub previous_proof: u64,
    pub previous_hash: Option<String>,
    pub created_by: String,
}

impl ForgedResponse {
    pub const MESSAGE: &'static str = "New Block Forged";

    pub fn from_block(block: Block) -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
            index: block.index,
            transactions: block.transactions,
            previous_proof: block.previous_proof,
            previous_hash: block.previous_hash,
            created_by: block.creator,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Debug, Serialize, Deserialize)]
pub struct ChainResponse {
    pub length: usize,
    pub chain: Vec<Block>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/* ---------- TX API Models ---------- */

#[derive(Debug, Serialize, Deserialize)]
pub struct QueuedTxResponse {
    pub message: String,
    pub index: u64,
}

/* ---------- Node API Models ---------- */

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
}
