//! Contract state machines and dispatch registry
//!
//! The host dispatches each spawn instruction through a [`ContractRegistry`]
//! keyed by the contract identifier the spawn names. Handlers are pure
//! functions of `(instruction, ledger view)`: they validate, and either
//! reject the instruction outright or return the state changes to commit.
//! Nothing is ever partially applied.

use std::collections::HashMap;

use curve25519_dalek::{ristretto::RistrettoPoint, traits::Identity};
use tracing::{debug, warn};

use crate::error::{Result, ScarabError};
use crate::instruction::{Instruction, LedgerView, Spawn, StateChange};
use crate::record::{ReadRecord, WriteRecord};
use crate::{ARG_READ, ARG_WRITE};

/// Contract identifier of write instances, system-wide.
pub const CONTRACT_WRITE_ID: &str = "scarabWrite";

/// Contract identifier of read instances, system-wide.
pub const CONTRACT_READ_ID: &str = "scarabRead";

/// A contract state machine: validate a spawn instruction against the
/// ledger view, produce the state changes to commit.
pub trait Contract {
    fn spawn(&self, view: &dyn LedgerView, inst: &Instruction) -> Result<Vec<StateChange>>;
}

/// Registry mapping contract identifiers to their handlers, built at
/// startup from the identifier constants.
#[derive(Default)]
pub struct ContractRegistry {
    handlers: HashMap<&'static str, Box<dyn Contract>>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the two scarab contracts registered.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(CONTRACT_WRITE_ID, Box::new(WriteContract));
        registry.register(CONTRACT_READ_ID, Box::new(ReadContract));
        registry
    }

    pub fn register(&mut self, contract_id: &'static str, handler: Box<dyn Contract>) {
        self.handlers.insert(contract_id, handler);
    }

    /// Dispatch an instruction to the handler its spawn names.
    pub fn execute(&self, view: &dyn LedgerView, inst: &Instruction) -> Result<Vec<StateChange>> {
        let spawn = inst.spawn.as_ref().ok_or_else(|| {
            ScarabError::UnsupportedContract("only spawn instructions are accepted".to_string())
        })?;
        let handler = self.handlers.get(spawn.contract_id.as_str()).ok_or_else(|| {
            ScarabError::UnsupportedContract(format!(
                "no contract registered for '{}'",
                spawn.contract_id
            ))
        })?;
        handler.spawn(view, inst)
    }
}

/// Stores a secret so that an authorized reader can later retrieve it by
/// spawning a read instance.
///
/// Accepted instructions:
///  - spawn:scarabWrite with an encoded [`WriteRecord`] in the `write`
///    argument. The record's correctness proof must verify against the
///    policy the instruction executes under.
pub struct WriteContract;

impl Contract for WriteContract {
    fn spawn(&self, _view: &dyn LedgerView, inst: &Instruction) -> Result<Vec<StateChange>> {
        let spawn = expect_spawn(inst, CONTRACT_WRITE_ID)?;
        let raw = spawn
            .args
            .search(ARG_WRITE)
            .filter(|v| !v.is_empty())
            .ok_or(ScarabError::MissingArgument(ARG_WRITE))?;
        let record = WriteRecord::decode(raw)?;
        record.check_proof(&inst.policy)?;

        let id = inst.derive_id("write");
        debug!(instance = %id.short(), lts = %record.lts_id.short(), "verified write request");
        Ok(vec![StateChange::create(
            id,
            CONTRACT_WRITE_ID,
            raw.to_vec(),
        )])
    }
}

/// Creates read instances proving a reader has been granted access to a
/// given write instance.
///
/// Accepted instructions:
///  - spawn:scarabRead with an encoded [`ReadRecord`] in the `read`
///    argument. The referenced write must exist and be a write instance.
///
/// The aggregated reader key is the sum of the signer public keys; see
/// [`ReadRecord`] for the caller obligation this implies.
pub struct ReadContract;

impl Contract for ReadContract {
    fn spawn(&self, view: &dyn LedgerView, inst: &Instruction) -> Result<Vec<StateChange>> {
        let spawn = expect_spawn(inst, CONTRACT_READ_ID)?;
        let raw = spawn
            .args
            .search(ARG_READ)
            .filter(|v| !v.is_empty())
            .ok_or(ScarabError::MissingArgument(ARG_READ))?;
        let record = ReadRecord::decode(raw)?;

        match view.get_values(&record.write) {
            None => {
                return Err(ScarabError::BadWriteReference(format!(
                    "no instance {}",
                    record.write.to_hex()
                )))
            }
            Some((_, contract_id)) if contract_id != CONTRACT_WRITE_ID => {
                return Err(ScarabError::BadWriteReference(format!(
                    "instance {} is a '{}' instance, not a write",
                    record.write.short(),
                    contract_id
                )))
            }
            Some(_) => {}
        }

        // The grant's authority derives from who actually signed, not from
        // client-declared data: recompute Xc as the signer-key sum. The
        // committed bytes stay exactly as submitted.
        let mut xc = RistrettoPoint::identity();
        for sig in &inst.signatures {
            xc += sig.signer.to_point()?;
        }
        if xc != record.xc {
            warn!(
                write = %record.write.short(),
                "declared Xc differs from the signer-key sum"
            );
        }

        let id = inst.derive_id("read");
        debug!(instance = %id.short(), write = %record.write.short(), "verified read request");
        Ok(vec![StateChange::create(id, CONTRACT_READ_ID, raw.to_vec())])
    }
}

fn expect_spawn<'a>(inst: &'a Instruction, contract_id: &str) -> Result<&'a Spawn> {
    let spawn = inst.spawn.as_ref().ok_or_else(|| {
        ScarabError::UnsupportedContract("not a spawn instruction".to_string())
    })?;
    if spawn.contract_id != contract_id {
        return Err(ScarabError::UnsupportedContract(format!(
            "can only spawn '{}' instances, got '{}'",
            contract_id, spawn.contract_id
        )));
    }
    Ok(spawn)
}
