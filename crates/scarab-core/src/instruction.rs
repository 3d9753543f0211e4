//! Ledger instruction, state change, and ledger view types
//!
//! The host orders instructions into blocks and dispatches them to the
//! contract state machines; the state machines read prior state through
//! [`LedgerView`] and return [`StateChange`]s for the host to commit.
//! Instance identifiers are content-derived from the spawning instruction
//! and a tag, so clients can predict them before confirmation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{InstanceId, PolicyId, PublicKey};

/// One named byte-value argument of a spawn instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: Vec<u8>,
}

/// Ordered set of named arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments(pub Vec<Argument>);

impl Arguments {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Return the value of the first argument with the given name.
    pub fn search(&self, name: &str) -> Option<&[u8]> {
        self.0
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_slice())
    }

    pub fn push(&mut self, name: impl Into<String>, value: Vec<u8>) {
        self.0.push(Argument {
            name: name.into(),
            value,
        });
    }
}

/// Spawn payload: which contract to instantiate, with which arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub contract_id: String,
    pub args: Arguments,
}

/// One signature over an instruction. The contract layer only consumes the
/// signer public key; signature verification is the host's policy check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionSignature {
    pub signer: PublicKey,
    pub signature: Vec<u8>,
}

/// A signed ledger instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The access-policy object this instruction executes under
    pub policy: PolicyId,
    /// Spawn payload; the only instruction kind the scarab contracts accept
    pub spawn: Option<Spawn>,
    /// Signatures authorizing the instruction
    pub signatures: Vec<InstructionSignature>,
}

impl Instruction {
    /// Build a spawn instruction.
    pub fn spawn(
        policy: PolicyId,
        contract_id: impl Into<String>,
        args: Arguments,
        signatures: Vec<InstructionSignature>,
    ) -> Self {
        Self {
            policy,
            spawn: Some(Spawn {
                contract_id: contract_id.into(),
                args,
            }),
            signatures,
        }
    }

    /// Content digest of the instruction. Length-prefixed field hashing so
    /// distinct instructions cannot collide by field reshuffling.
    pub fn digest(&self) -> [u8; 32] {
        let mut h = Sha256::new();
        h.update(self.policy.as_bytes());
        match &self.spawn {
            Some(spawn) => {
                h.update([1u8]);
                h.update((spawn.contract_id.len() as u64).to_le_bytes());
                h.update(spawn.contract_id.as_bytes());
                h.update((spawn.args.0.len() as u64).to_le_bytes());
                for arg in &spawn.args.0 {
                    h.update((arg.name.len() as u64).to_le_bytes());
                    h.update(arg.name.as_bytes());
                    h.update((arg.value.len() as u64).to_le_bytes());
                    h.update(&arg.value);
                }
            }
            None => h.update([0u8]),
        }
        h.update((self.signatures.len() as u64).to_le_bytes());
        for sig in &self.signatures {
            h.update(sig.signer.as_bytes());
            h.update((sig.signature.len() as u64).to_le_bytes());
            h.update(&sig.signature);
        }
        h.finalize().into()
    }

    /// Derive the instance identifier this instruction creates for `tag`
    /// (`"write"` or `"read"`). Stable and collision-resistant.
    pub fn derive_id(&self, tag: &str) -> InstanceId {
        let mut h = Sha256::new();
        h.update(self.digest());
        h.update(tag.as_bytes());
        InstanceId::new(h.finalize().into())
    }
}

/// Operation kind of a state change. The scarab contracts only ever create
/// instances; committed records are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChangeOp {
    Create,
}

/// A single state mutation produced by a contract, persisted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub op: StateChangeOp,
    pub instance_id: InstanceId,
    pub contract_id: String,
    /// Raw record bytes exactly as submitted; never re-serialized
    pub value: Vec<u8>,
}

impl StateChange {
    pub fn create(
        instance_id: InstanceId,
        contract_id: impl Into<String>,
        value: Vec<u8>,
    ) -> Self {
        Self {
            op: StateChangeOp::Create,
            instance_id,
            contract_id: contract_id.into(),
            value,
        }
    }
}

/// Read-only view of committed ledger state, consistent as of the block
/// being built.
pub trait LedgerView {
    /// Look up an instance: returns its stored value bytes and the
    /// identifier of the contract that created it, or `None`.
    fn get_values(&self, id: &InstanceId) -> Option<(Vec<u8>, String)>;
}
