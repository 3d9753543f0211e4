//! Long-term secret shares
//!
//! The LTS private scalar is never assembled in one place: it exists only
//! as Shamir shares held by the node set. `generate` is a trusted-dealer
//! stand-in for the DKG ceremony; it produces the public half `(LtsId, X)`
//! and one share per node. Everything downstream of the ceremony only sees
//! those two shapes.

use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT, ristretto::RistrettoPoint, scalar::Scalar,
};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{OcsError, Result};

/// Opaque identifier of a long-term secret (32 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LtsId(#[serde(with = "hex_bytes_32")] pub [u8; 32]);

impl LtsId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Short display format (first 4 bytes as hex)
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl AsRef<[u8]> for LtsId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Public half of a long-term secret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtsPublic {
    /// Identifier of the ceremony output
    pub id: LtsId,
    /// Collective public key `X`; the matching scalar exists only as shares
    pub x: RistrettoPoint,
}

/// One node's share of the LTS private scalar
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LtsShare {
    /// 1-based node index (the Shamir evaluation point)
    pub index: u32,
    /// `f(index)` for the dealer polynomial `f` with `f(0)` the secret
    pub scalar: Scalar,
}

impl LtsShare {
    pub fn new(index: u32, scalar: Scalar) -> Self {
        Self { index, scalar }
    }
}

impl std::fmt::Debug for LtsShare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LtsShare")
            .field("index", &self.index)
            .field("scalar", &"<redacted>")
            .finish()
    }
}

/// Dealer-based share generation over a `threshold`-of-`nodes` node set.
///
/// Returns the public half and one share per node, indexed 1..=nodes. The
/// identifier is derived from the collective key and the node-set shape so
/// the same ceremony output always names the same LTS.
pub fn generate<R: RngCore + CryptoRng>(
    threshold: u32,
    nodes: u32,
    rng: &mut R,
) -> Result<(LtsPublic, Vec<LtsShare>)> {
    if threshold == 0 || threshold > nodes {
        return Err(OcsError::InvalidThreshold { threshold, nodes });
    }

    let mut coeffs: Vec<Scalar> = (0..threshold).map(|_| Scalar::random(rng)).collect();
    let x = RISTRETTO_BASEPOINT_POINT * coeffs[0];

    let shares = (1..=nodes)
        .map(|i| {
            let at = Scalar::from(i as u64);
            // Horner evaluation of the dealer polynomial at i
            let eval = coeffs
                .iter()
                .rev()
                .fold(Scalar::ZERO, |acc, c| acc * at + c);
            LtsShare::new(i, eval)
        })
        .collect();
    coeffs.zeroize();

    let mut h = Sha256::new();
    h.update(b"scarab-lts-id");
    h.update(x.compress().as_bytes());
    h.update(threshold.to_le_bytes());
    h.update(nodes.to_le_bytes());
    let id = LtsId::new(h.finalize().into());

    Ok((LtsPublic { id, x }, shares))
}

/// Lagrange coefficients at zero for a set of 1-based share indices.
pub fn lagrange_coefficients(indices: &[u32]) -> Result<Vec<Scalar>> {
    if indices.is_empty() {
        return Err(OcsError::NotEnoughShares { got: 0, need: 1 });
    }
    for &i in indices {
        if i == 0 {
            return Err(OcsError::InvalidIndex);
        }
    }
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(OcsError::DuplicateIndex(pair[0]));
        }
    }

    let scalars: Vec<Scalar> = indices.iter().map(|&i| Scalar::from(i as u64)).collect();
    let coeffs = scalars
        .iter()
        .enumerate()
        .map(|(i, xi)| {
            let mut num = Scalar::ONE;
            let mut den = Scalar::ONE;
            for (j, xj) in scalars.iter().enumerate() {
                if i != j {
                    num *= xj;
                    den *= xj - xi;
                }
            }
            num * den.invert()
        })
        .collect();
    Ok(coeffs)
}

/// Serde helper for 32-byte arrays as hex strings
pub mod hex_bytes_32 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&s, &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(bytes)
    }
}
