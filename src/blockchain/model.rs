use chrono::Utc;
use serde_json::Value;
use thiserror::Error;

use super::{Block, GENESIS_PROOF, fingerprint, meets_difficulty};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The chain was read before the genesis block was appended.
    #[error("ledger has no blocks; genesis was never appended")]
    EmptyChain,
}

/// Append-only in-memory ledger with a pending-transaction buffer.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    pending: Vec<Value>,
    difficulty: usize,
}

impl Blockchain {
    /// Initialize a new ledger with the genesis block already appended.
    pub fn new(difficulty: usize) -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            difficulty,
        }
    }

    /// Ledger without a genesis block, for exercising the construction-order fault.
    #[cfg(test)]
    pub(crate) fn empty(difficulty: usize) -> Self {
        Self {
            chain: Vec::new(),
            pending: Vec::new(),
            difficulty,
        }
    }

    /// Most recently appended block.
    pub fn tip(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Seal the pending buffer into a new block at the end of the chain.
    /// The proof is NOT checked here; callers validate before appending.
    pub fn append(
        &mut self,
        previous_hash: String,
        previous_proof: u64,
        creator: String,
    ) -> &Block {
        let now = Utc::now().timestamp();
        let timestamp = self.chain.last().map_or(now, |b| now.max(b.timestamp));

        let block = Block {
            index: self.chain.len() as u64,
            timestamp,
            transactions: std::mem::take(&mut self.pending),
            previous_proof,
            previous_hash: Some(previous_hash),
            creator,
        };
        self.chain.push(block);
        &self.chain[self.chain.len() - 1]
    }

    /// Read-only copy of the whole chain.
    pub fn snapshot(&self) -> Vec<Block> {
        self.chain.clone()
    }

    /// Buffer an opaque payload; returns the index of the block that will absorb it.
    pub fn queue_transaction(&mut self, payload: Value) -> u64 {
        self.pending.push(payload);
        self.chain.len() as u64
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Validate the entire chain: genesis shape, ordinals, timestamps, linkage and PoW.
    pub fn is_valid_chain(&self) -> bool {
        let Some(genesis) = self.chain.first() else {
            return false;
        };
        if !genesis.is_genesis() || genesis.previous_proof != GENESIS_PROOF {
            return false;
        }

        for (i, pair) in self.chain.windows(2).enumerate() {
            let (prev, current) = (&pair[0], &pair[1]);

            if current.index != (i + 1) as u64 || current.timestamp < prev.timestamp {
                return false;
            }

            let expected = fingerprint(prev, current.previous_proof);
            if current.previous_hash.as_deref() != Some(expected.as_str()) {
                return false;
            }
            if !meets_difficulty(&expected, self.difficulty) {
                return false;
            }
        }

        true
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::proof_of_work;
    use serde_json::json;

    const TEST_DIFFICULTY: usize = 2;

    /// Mine and append one block on top of the current tip.
    fn mine_next(bc: &mut Blockchain, creator: &str) -> Block {
        let tip = bc.tip().unwrap().clone();
        let proof = proof_of_work(&tip, TEST_DIFFICULTY);
        let hash = fingerprint(&tip, proof);
        bc.append(hash, proof, creator.into()).clone()
    }

    #[test]
    fn starts_with_genesis() {
        let bc = Blockchain::new(TEST_DIFFICULTY);
        assert_eq!(bc.len(), 1);
        let tip = bc.tip().unwrap();
        assert_eq!(tip.index, 0);
        assert_eq!(tip.previous_proof, GENESIS_PROOF);
        assert!(tip.previous_hash.is_none());
        assert!(bc.is_valid_chain());
    }

    #[test]
    fn tip_on_empty_chain_is_an_error() {
        let bc = Blockchain::empty(TEST_DIFFICULTY);
        assert_eq!(bc.tip(), Err(LedgerError::EmptyChain));
        assert!(!bc.is_valid_chain());
    }

    #[test]
    fn append_links_and_indexes_blocks() {
        let mut bc = Blockchain::new(TEST_DIFFICULTY);
        let b1 = mine_next(&mut bc, "W1");
        let b2 = mine_next(&mut bc, "W2");

        assert_eq!(b1.index, 1);
        assert_eq!(b2.index, 2);
        assert_eq!(b2.creator, "W2");
        assert!(b2.timestamp >= b1.timestamp);

        let chain = bc.snapshot();
        for i in 1..chain.len() {
            let prev = &chain[i - 1];
            let cur = &chain[i];
            let expected = fingerprint(prev, cur.previous_proof);
            assert_eq!(cur.previous_hash.as_deref(), Some(expected.as_str()));
            assert!(meets_difficulty(&expected, TEST_DIFFICULTY));
        }
        assert!(bc.is_valid_chain());
    }

    #[test]
    fn pending_transactions_are_drained_into_next_block() {
        let mut bc = Blockchain::new(TEST_DIFFICULTY);
        assert_eq!(bc.queue_transaction(json!({ "memo": "a" })), 1);
        assert_eq!(bc.queue_transaction(json!({ "memo": "b" })), 1);
        assert_eq!(bc.pending_len(), 2);

        let b1 = mine_next(&mut bc, "W1");
        assert_eq!(b1.transactions.len(), 2);
        assert_eq!(b1.transactions[0]["memo"], "a");
        assert_eq!(bc.pending_len(), 0);

        let b2 = mine_next(&mut bc, "W1");
        assert!(b2.transactions.is_empty());
        assert!(bc.is_valid_chain());
    }

    #[test]
    fn snapshot_is_detached_from_ledger() {
        let mut bc = Blockchain::new(TEST_DIFFICULTY);
        let snap = bc.snapshot();
        mine_next(&mut bc, "W1");
        assert_eq!(snap.len(), 1);
        assert_eq!(bc.len(), 2);
    }

    #[test]
    fn tampering_invalidates_chain() {
        let mut bc = Blockchain::new(TEST_DIFFICULTY);
        mine_next(&mut bc, "W1");
        mine_next(&mut bc, "W1");
        assert!(bc.is_valid_chain());

        // Rewriting an earlier block breaks the link to its successor.
        bc.chain[1].creator = "mallory".into();
        assert!(!bc.is_valid_chain());
    }

    #[test]
    fn unvalidated_append_is_caught_by_audit() {
        let mut bc = Blockchain::new(TEST_DIFFICULTY);
        bc.append("ffff".into(), 1, "W1".into());
        assert_eq!(bc.len(), 2);
        assert!(!bc.is_valid_chain());
    }
}
