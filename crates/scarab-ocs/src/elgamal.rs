//! Secret encryption under the collective key
//!
//! Hashed ElGamal over ristretto255: the writer picks a fresh `r`, derives
//! the shared point `C = r*X`, and blinds the secret with a keystream
//! expanded from `C`. The published ciphertext components are `U = r*G`
//! and the blinded bytes; `C` itself never leaves the writer. Any secret
//! length is supported.

use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT, ristretto::RistrettoPoint, scalar::Scalar,
};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};

/// A freshly produced ciphertext, together with the encryption randomness
/// the writer still needs for the correctness proof.
#[derive(Debug, Clone)]
pub struct Encryption {
    /// Encryption randomness `r`
    pub r: Scalar,
    /// `r*G`
    pub u: RistrettoPoint,
    /// Secret blinded under `r*X`
    pub data: Vec<u8>,
}

/// Encrypt `secret` under the collective public key `x`.
pub fn encrypt<R: RngCore + CryptoRng>(
    x: &RistrettoPoint,
    secret: &[u8],
    rng: &mut R,
) -> Encryption {
    let r = Scalar::random(rng);
    let u = RISTRETTO_BASEPOINT_POINT * r;
    let c = x * r;
    Encryption {
        r,
        u,
        data: blind(&c, secret),
    }
}

/// XOR `data` with the keystream derived from the shared point. Applying
/// it twice with the same point is the identity, so the same function
/// both blinds and unblinds.
pub fn blind(shared: &RistrettoPoint, data: &[u8]) -> Vec<u8> {
    keystream(shared, data.len())
        .iter()
        .zip(data)
        .map(|(k, b)| k ^ b)
        .collect()
}

/// Recover the deposited secret from a combined re-encryption.
///
/// `xhat_enc` is the threshold-combined value `x*(U + Xc)`; subtracting
/// `xc*X` leaves the original shared point `C = r*X`, which unblinds the
/// ciphertext bytes.
pub fn recover_secret(
    xc: &Scalar,
    x: &RistrettoPoint,
    data: &[u8],
    xhat_enc: &RistrettoPoint,
) -> Vec<u8> {
    let c = xhat_enc - x * xc;
    blind(&c, data)
}

fn keystream(shared: &RistrettoPoint, len: usize) -> Vec<u8> {
    let point = shared.compress();
    let mut out = Vec::with_capacity(len);
    let mut counter = 0u64;
    while out.len() < len {
        let mut h = Sha512::new();
        h.update(b"scarab-ocs-keystream");
        h.update(point.as_bytes());
        h.update(counter.to_le_bytes());
        let block = h.finalize();
        let take = (len - out.len()).min(block.len());
        out.extend_from_slice(&block[..take]);
        counter += 1;
    }
    out
}
