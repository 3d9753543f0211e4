//! Write and Read records
//!
//! A Write record is a deposited secret encrypted under the collective key
//! `X`, together with a DLEQ proof that the encryption is correct and
//! bound to the policy it was minted under. A Read record is a grant of
//! access to exactly one Write, addressed to an aggregated reader key.
//!
//! Both are immutable once committed, and the ledger stores the encoded
//! bytes exactly as submitted: decode then encode is not guaranteed to be
//! the identity, so committed values are never re-serialized.

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use scarab_ocs::{dleq, elgamal, LtsId, LtsPublic};

use crate::error::{Result, ScarabError};
use crate::types::{InstanceId, PolicyId};

/// The data stored in a write instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteRecord {
    /// Ciphertext component `U = r*G`
    pub u: RistrettoPoint,
    /// Proof commitment `r*Gbar` under the LTS-derived second base
    pub ubar: RistrettoPoint,
    /// Proof challenge
    pub e: Scalar,
    /// Proof response
    pub f: Scalar,
    /// Secret blinded under the shared point `r*X`
    pub data: Vec<u8>,
    /// The long-term secret this deposit is encrypted against
    pub lts_id: LtsId,
    /// The access policy this deposit is bound to
    pub policy: PolicyId,
}

impl WriteRecord {
    /// Encrypt `secret` under the collective key and attach the
    /// correctness proof, bound to `policy`.
    pub fn seal<R: RngCore + CryptoRng>(
        lts: &LtsPublic,
        policy: PolicyId,
        secret: &[u8],
        rng: &mut R,
    ) -> Self {
        let enc = elgamal::encrypt(&lts.x, secret, rng);
        let gbar = dleq::second_base(lts.id.as_bytes());
        let context = proof_context(&lts.id, &policy, &enc.data);
        let proof = dleq::prove(rng, &enc.r, &gbar, &context);
        Self {
            u: enc.u,
            ubar: proof.ubar,
            e: proof.e,
            f: proof.f,
            data: enc.data,
            lts_id: lts.id,
            policy,
        }
    }

    /// Verify the correctness proof against the policy the spawning
    /// instruction executed under. A proof minted under a different
    /// policy, or a record whose declared binding differs from the
    /// executing policy, is rejected.
    pub fn check_proof(&self, policy: &PolicyId) -> Result<()> {
        if self.policy != *policy {
            return Err(ScarabError::ProofInvalid(format!(
                "record is bound to policy {}, instruction ran under {}",
                self.policy.to_hex(),
                policy.to_hex()
            )));
        }
        let gbar = dleq::second_base(self.lts_id.as_bytes());
        let context = proof_context(&self.lts_id, policy, &self.data);
        if dleq::verify(&self.u, &self.ubar, &self.e, &self.f, &gbar, &context) {
            Ok(())
        } else {
            Err(ScarabError::ProofInvalid(
                "recreated proof does not match".to_string(),
            ))
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ScarabError::MalformedRecord(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| ScarabError::MalformedRecord(e.to_string()))
    }
}

/// The data stored in a read instance.
///
/// `xc` is the aggregated reader key: the group sum of the public keys of
/// every signer of the spawning instruction. Note that the contract sums
/// raw points without proof of private-key possession; callers relying on
/// multi-party access must ensure the signers jointly, and only jointly,
/// can reconstruct the scalar for `xc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadRecord {
    /// Instance identifier of the write this grant refers to
    pub write: InstanceId,
    /// Aggregated reader public key
    pub xc: RistrettoPoint,
}

impl ReadRecord {
    pub fn new(write: InstanceId, xc: RistrettoPoint) -> Self {
        Self { write, xc }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ScarabError::MalformedRecord(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| ScarabError::MalformedRecord(e.to_string()))
    }
}

fn proof_context(lts_id: &LtsId, policy: &PolicyId, data: &[u8]) -> Vec<u8> {
    let mut context = Vec::with_capacity(96);
    context.extend_from_slice(lts_id.as_bytes());
    context.extend_from_slice(policy.as_bytes());
    context.extend_from_slice(&Sha256::digest(data));
    context
}
