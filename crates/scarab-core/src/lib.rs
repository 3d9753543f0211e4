//! Scarab Core - Data model and contract state machines
//!
//! This crate implements the ledger-side half of the scarab on-chain
//! secrets protocol: the Write record (an encrypted-secret deposit with a
//! proof of correct encryption), the Read record (an access grant bound to
//! one Write and an aggregated reader key), and the two contract state
//! machines that validate spawn instructions against a ledger view and
//! produce state changes for the host to commit.
//!
//! The crate is host-agnostic: contracts are pure functions of an
//! instruction and a [`LedgerView`], dispatched through a
//! [`ContractRegistry`] built from the contract identifier constants.

pub mod contract;
pub mod error;
pub mod instruction;
pub mod record;
pub mod types;

pub use contract::{
    Contract, ContractRegistry, ReadContract, WriteContract, CONTRACT_READ_ID, CONTRACT_WRITE_ID,
};
pub use error::{Result, ScarabError};
pub use instruction::{
    Argument, Arguments, Instruction, InstructionSignature, LedgerView, Spawn, StateChange,
    StateChangeOp,
};
pub use record::{ReadRecord, WriteRecord};
pub use types::{InstanceId, PolicyId, PublicKey};

// The LTS shapes come from the crypto crate but are part of this crate's
// public data model.
pub use scarab_ocs::{LtsId, LtsPublic, LtsShare};

/// Argument name carrying an encoded Write record in a spawn instruction
pub const ARG_WRITE: &str = "write";

/// Argument name carrying an encoded Read record in a spawn instruction
pub const ARG_READ: &str = "read";
