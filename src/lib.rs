//! Minimal proof-of-work ledger: a coordinating node that owns an append-only
//! chain, plus the miner worker that searches for proofs and submits them.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod coordinator;
pub mod miner;
