//! Scarab Service - node-side plumbing around the contract layer
//!
//! This crate provides:
//! - The decrypt authorization step: a per-node, out-of-consensus
//!   request/response operation that cross-checks a committed Read against
//!   a committed Write before producing a partial re-encryption share
//! - LTS setup: accepting and storing the `(LtsId, X)` pairs a DKG
//!   ceremony produces, plus the dealer-based generation entry point
//! - Node configuration
//! - A deterministic in-memory ledger host for single-node operation and
//!   tests: serializes instruction application through the contract
//!   registry and persists state changes keyed by instance identifier

pub mod config;
pub mod decrypt;
pub mod error;
pub mod ledger;
pub mod lts;

pub use config::NodeConfig;
pub use decrypt::{combine, recover, DecryptReply, DecryptRequest, DecryptService};
pub use error::{Result, ServiceError};
pub use ledger::{InMemoryLedger, InstanceExtract};
pub use lts::{setup_dealer, LtsRegistry, LtsSetupReply, LtsSetupRequest};
