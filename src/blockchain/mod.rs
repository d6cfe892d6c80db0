pub mod block;
pub mod model;
pub mod pow;

pub use block::Block;
pub use model::{Blockchain, LedgerError};
pub use pow::{fingerprint, is_valid_proof, meets_difficulty, proof_of_work, proof_of_work_until};

/// Proof-of-Work difficulty: number of leading `'0'` hex characters.
pub const DIFFICULTY: usize = 4;

/// `previous_proof` carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Creator recorded when a block has no submitting worker.
pub const SYSTEM_CREATOR: &str = "System";
