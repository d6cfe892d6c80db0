//! Worker side: fetch the tip, search for a proof locally, submit it back.

pub mod client;
pub mod identity;
pub mod worker;

pub use client::{NodeClient, SubmitOutcome, TransportError};
pub use worker::{Worker, WorkerError};
