use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use super::client::{NodeClient, SubmitOutcome, TransportError};
use crate::blockchain::proof_of_work_until;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("proof search task failed: {0}")]
    Search(#[from] tokio::task::JoinError),
}

/// One miner: searches independently of every other worker and submits under a fixed id.
pub struct Worker {
    client: NodeClient,
    id: String,
    difficulty: usize,
    mined: u64,
}

impl Worker {
    pub fn new(client: NodeClient, id: impl Into<String>, difficulty: usize) -> Self {
        Self {
            client,
            id: id.into(),
            difficulty,
            mined: 0,
        }
    }

    pub fn mined(&self) -> u64 {
        self.mined
    }

    /// Mine until `stop` is set or `max_blocks` blocks were forged; returns the mined count.
    /// Rejections are logged and retried against the new tip; transport errors end the run.
    pub async fn run(
        &mut self,
        max_blocks: Option<u64>,
        stop: Arc<AtomicBool>,
    ) -> Result<u64, WorkerError> {
        while !stop.load(Ordering::Relaxed) && max_blocks.is_none_or(|max| self.mined < max) {
            let tip = self.client.last_block().await?;
            let tip_index = tip.index;

            let difficulty = self.difficulty;
            let flag = Arc::clone(&stop);
            let found =
                tokio::task::spawn_blocking(move || proof_of_work_until(&tip, difficulty, &flag))
                    .await?;
            let Some(proof) = found else {
                break;
            };

            match self.client.submit(proof, &self.id).await? {
                SubmitOutcome::Forged(block) => {
                    self.mined += 1;
                    info!(
                        "Mined a new coin! block #{} (proof={proof} on #{tip_index}); total coins: {}",
                        block.index, self.mined
                    );
                }
                SubmitOutcome::Rejected(message) => warn!("{message}"),
            }
        }
        Ok(self.mined)
    }
}
