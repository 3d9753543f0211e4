//! Decrypt authorization step
//!
//! Invoked out-of-band (not through ledger consensus) against any single
//! node holding a share of the LTS private key. The node cross-checks the
//! presented Read against the presented Write before touching its key
//! share: the Read's write reference must equal the Write extract's
//! instance identifier. That equality is the sole authorization check
//! linking "who was granted access" to "what they are trying to decrypt".
//!
//! A full answer needs a threshold of nodes' partial shares; combining
//! them and finishing the decryption locally are client-side steps
//! ([`combine`], [`recover`]).

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use scarab_core::{ReadRecord, Result, ScarabError, WriteRecord};
use scarab_ocs::{elgamal, reencrypt, LtsPublic, LtsShare, ReencryptShare};

use crate::ledger::InstanceExtract;

/// Decrypt request: committed-state extracts of one Read and one Write.
/// Verifying the extracts against a ledger root is the caller's
/// precondition; this step only checks their cryptographic binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptRequest {
    pub read: InstanceExtract,
    pub write: InstanceExtract,
}

/// Combined decrypt response, from which the holder of the scalar for the
/// Read's aggregated key `Xc` recovers the secret locally. No ledger
/// state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptReply {
    /// Collective public key the secret was deposited under
    pub x: RistrettoPoint,
    /// The write's blinded ciphertext bytes
    pub data: Vec<u8>,
    /// Threshold-combined re-encryption `x*(U + Xc)`
    pub xhat_enc: RistrettoPoint,
}

/// One node's side of the decrypt step: holds that node's share of a
/// single LTS. Requests for other LTS identifiers are refused. Immutable
/// after construction, so concurrent requests need no locking.
pub struct DecryptService {
    lts: LtsPublic,
    share: LtsShare,
}

impl DecryptService {
    pub fn new(lts: LtsPublic, share: LtsShare) -> Self {
        Self { lts, share }
    }

    pub fn lts(&self) -> &LtsPublic {
        &self.lts
    }

    /// Authorize the request and produce this node's partial
    /// re-encryption share.
    pub fn reencrypt(&self, req: &DecryptRequest) -> Result<ReencryptShare> {
        let read = ReadRecord::decode(&req.read.value)?;
        if read.write != req.write.instance_id {
            warn!(
                granted = %read.write.short(),
                presented = %req.write.instance_id.short(),
                "decrypt request denied"
            );
            return Err(ScarabError::Unauthorized);
        }
        let write = WriteRecord::decode(&req.write.value)?;
        if write.lts_id != self.lts.id {
            return Err(ScarabError::CryptoFailure(format!(
                "no share for LTS {}",
                write.lts_id.to_hex()
            )));
        }
        debug!(
            write = %req.write.instance_id.short(),
            node = self.share.index,
            "producing re-encryption share"
        );
        Ok(reencrypt::reencrypt_share(&self.share, &write.u, &read.xc))
    }
}

/// Combine a threshold of nodes' partial shares into the final reply.
pub fn combine(
    lts: &LtsPublic,
    write: &InstanceExtract,
    shares: &[ReencryptShare],
    threshold: u32,
) -> Result<DecryptReply> {
    let record = WriteRecord::decode(&write.value)?;
    let xhat_enc = reencrypt::combine_shares(shares, threshold)?;
    Ok(DecryptReply {
        x: lts.x,
        data: record.data,
        xhat_enc,
    })
}

/// Finish decryption locally with the private scalar matching the Read's
/// aggregated key.
pub fn recover(reply: &DecryptReply, xc: &Scalar) -> Vec<u8> {
    elgamal::recover_secret(xc, &reply.x, &reply.data, &reply.xhat_enc)
}
