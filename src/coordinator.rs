//! Single writer of the ledger: re-validates submitted proofs and appends blocks.

use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Mutex;
use thiserror::Error;

use crate::blockchain::{Block, Blockchain, LedgerError, fingerprint, meets_difficulty};

/// Which required submission field(s) were absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Proof,
    Id,
    Both,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RejectReason {
    #[error("{}", missing_message(.0))]
    MissingField(MissingField),
    /// Also covers proofs computed against a tip that has since moved.
    #[error("Invalid Proof")]
    InvalidProof,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

fn missing_message(field: &MissingField) -> &'static str {
    match field {
        MissingField::Proof => "Missing proof, try again",
        MissingField::Id => "Missing ID, try again",
        MissingField::Both => "Missing information, please resend",
    }
}

impl RejectReason {
    /// Client errors are recoverable by resending; anything else is a server fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, RejectReason::Ledger(_))
    }
}

pub struct Coordinator {
    ledger: Mutex<Blockchain>,
}

impl Coordinator {
    pub fn new(ledger: Blockchain) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    pub fn tip(&self) -> Result<Block, LedgerError> {
        let bc = self.ledger.lock().expect("mutex poisoned");
        bc.tip().cloned()
    }

    pub fn snapshot(&self) -> Vec<Block> {
        let bc = self.ledger.lock().expect("mutex poisoned");
        bc.snapshot()
    }

    /// Run the whole-chain audit; returns `(valid, length)`.
    pub fn validate(&self) -> (bool, usize) {
        let bc = self.ledger.lock().expect("mutex poisoned");
        (bc.is_valid_chain(), bc.len())
    }

    /// Buffer an opaque transaction; returns the index of the block that will absorb it.
    pub fn queue_transaction(&self, payload: Value) -> u64 {
        let mut bc = self.ledger.lock().expect("mutex poisoned");
        let index = bc.queue_transaction(payload);
        debug!("queued transaction for block #{index} (pending={})", bc.pending_len());
        index
    }

    /// Accept `proof` from `creator` if it is valid against the current tip.
    ///
    /// Read-tip, validate and append happen under one lock, so two
    /// submissions for the same tip can never both extend the chain.
    pub fn submit(&self, proof: Option<u64>, creator: Option<&str>) -> Result<Block, RejectReason> {
        let creator = creator.map(str::trim).filter(|id| !id.is_empty());
        let (proof, creator) = match (proof, creator) {
            (Some(p), Some(c)) => (p, c),
            (None, Some(_)) => return Err(RejectReason::MissingField(MissingField::Proof)),
            (Some(_), None) => return Err(RejectReason::MissingField(MissingField::Id)),
            (None, None) => return Err(RejectReason::MissingField(MissingField::Both)),
        };

        let mut bc = self.ledger.lock().expect("mutex poisoned");
        let tip = bc.tip()?;
        let tip_index = tip.index;
        let digest = fingerprint(tip, proof);

        if !meets_difficulty(&digest, bc.difficulty()) {
            warn!("rejected proof {proof} from {creator} against block #{tip_index}");
            return Err(RejectReason::InvalidProof);
        }

        let block = bc.append(digest, proof, creator.to_string()).clone();
        info!(
            "FORGED block #{} by {} (proof={}, hash={})",
            block.index,
            block.creator,
            proof,
            block.previous_hash.as_deref().unwrap_or_default()
        );
        Ok(block)
    }
}
