use anyhow::Context;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pow_ledger::blockchain::DIFFICULTY;
use pow_ledger::miner::{NodeClient, Worker, identity};

#[derive(Parser)]
#[command(name = "miner")]
#[command(about = "Proof-of-work miner for a pow_ledger node")]
struct Cli {
    /// Node base URL
    #[arg(default_value = "http://localhost:8000")]
    node: String,

    /// File holding this worker's id (created if absent)
    #[arg(long, default_value = "my_id.txt")]
    id_file: PathBuf,

    /// Stop after forging this many blocks
    #[arg(long)]
    max_blocks: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::init();
    let cli = Cli::parse();

    let id = identity::load_or_create(&cli.id_file)
        .with_context(|| format!("reading worker id from {}", cli.id_file.display()))?;
    info!("ID is {id}");

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, finishing current search");
                stop.store(true, Ordering::Relaxed);
            }
        });
    }

    let mut worker = Worker::new(NodeClient::new(cli.node), id, DIFFICULTY);
    match worker.run(cli.max_blocks, stop).await {
        Ok(mined) => {
            info!("Total coins: {mined}");
            Ok(())
        }
        Err(e) => {
            error!("Error: {e}");
            info!("Total coins: {}", worker.mined());
            Err(e.into())
        }
    }
}
