//! In-memory ledger host
//!
//! A deterministic single-node stand-in for the distributed ledger: it
//! applies instructions one at a time through the contract registry,
//! persists the resulting state changes in a key-value view, and refuses
//! to commit the same instance identifier twice. Committed values are the
//! raw bytes the contracts emitted; `extract` hands them back for use as
//! evidence in a decrypt request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use scarab_core::{ContractRegistry, InstanceId, Instruction, LedgerView};

use crate::error::{Result, ServiceError};

/// A committed instance pulled out of the ledger: the evidence a decrypt
/// caller presents. In a distributed deployment this would carry an
/// inclusion proof against a known ledger root; verifying that proof is
/// the caller's precondition, not the decrypt step's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceExtract {
    pub instance_id: InstanceId,
    pub contract_id: String,
    pub value: Vec<u8>,
}

/// Single-node ledger host.
pub struct InMemoryLedger {
    registry: ContractRegistry,
    store: HashMap<InstanceId, (Vec<u8>, String)>,
}

impl InMemoryLedger {
    pub fn new(registry: ContractRegistry) -> Self {
        Self {
            registry,
            store: HashMap::new(),
        }
    }

    /// Host with the two scarab contracts registered.
    pub fn standard() -> Self {
        Self::new(ContractRegistry::standard())
    }

    /// Apply one instruction: dispatch, validate, commit. Returns the
    /// instance identifiers created. On any error nothing is committed.
    pub fn apply(&mut self, inst: &Instruction) -> Result<Vec<InstanceId>> {
        let changes = self.registry.execute(&*self, inst)?;
        // Duplicate detection before any insertion so a rejected
        // instruction leaves no partial state behind.
        for sc in &changes {
            if self.store.contains_key(&sc.instance_id) {
                return Err(ServiceError::DuplicateInstance(sc.instance_id));
            }
        }
        let ids = changes.iter().map(|sc| sc.instance_id).collect();
        for sc in changes {
            info!(
                instance = %sc.instance_id.short(),
                contract = %sc.contract_id,
                "committing state change"
            );
            self.store
                .insert(sc.instance_id, (sc.value, sc.contract_id));
        }
        Ok(ids)
    }

    /// Produce a committed-state extract for an instance, if it exists.
    pub fn extract(&self, id: &InstanceId) -> Option<InstanceExtract> {
        self.store.get(id).map(|(value, contract_id)| InstanceExtract {
            instance_id: *id,
            contract_id: contract_id.clone(),
            value: value.clone(),
        })
    }
}

impl LedgerView for InMemoryLedger {
    fn get_values(&self, id: &InstanceId) -> Option<(Vec<u8>, String)> {
        self.store.get(id).cloned()
    }
}
