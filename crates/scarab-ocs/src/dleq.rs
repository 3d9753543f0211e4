//! DLEQ proof of correct encryption
//!
//! A writer encrypting a secret under the collective key publishes
//! `U = r*G` together with `Ubar = r*Gbar`, where `Gbar` is a second base
//! derived from the LTS identifier. The Chaum-Pedersen proof below shows
//! both points share the same discrete log without revealing `r`, and the
//! challenge is computed over a caller-supplied context so the proof is
//! cryptographically bound to the access policy it was minted under. A
//! proof minted for one policy does not verify under another.

use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT, ristretto::RistrettoPoint, scalar::Scalar,
};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};

/// Non-interactive proof that `log_G(U) == log_Gbar(Ubar)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DleqProof {
    /// `r*Gbar`, the witness commitment under the second base
    pub ubar: RistrettoPoint,
    /// Fiat-Shamir challenge
    pub e: Scalar,
    /// Response `v + e*r`
    pub f: Scalar,
}

/// Derive the second proof base from an opaque tag (the LTS identifier).
pub fn second_base(tag: &[u8]) -> RistrettoPoint {
    let mut input = Vec::with_capacity(16 + tag.len());
    input.extend_from_slice(b"scarab-dleq-base");
    input.extend_from_slice(tag);
    RistrettoPoint::hash_from_bytes::<Sha512>(&input)
}

fn challenge(
    u: &RistrettoPoint,
    ubar: &RistrettoPoint,
    w: &RistrettoPoint,
    wbar: &RistrettoPoint,
    context: &[u8],
) -> Scalar {
    let mut h = Sha512::new();
    h.update(b"scarab-dleq-challenge");
    h.update(u.compress().as_bytes());
    h.update(ubar.compress().as_bytes());
    h.update(w.compress().as_bytes());
    h.update(wbar.compress().as_bytes());
    h.update((context.len() as u64).to_le_bytes());
    h.update(context);
    Scalar::from_hash(h)
}

/// Prove knowledge of `witness` such that `U = witness*G` and
/// `Ubar = witness*gbar`, with the challenge bound to `context`.
pub fn prove<R: RngCore + CryptoRng>(
    rng: &mut R,
    witness: &Scalar,
    gbar: &RistrettoPoint,
    context: &[u8],
) -> DleqProof {
    let u = RISTRETTO_BASEPOINT_POINT * witness;
    let ubar = gbar * witness;
    let v = Scalar::random(rng);
    let w = RISTRETTO_BASEPOINT_POINT * v;
    let wbar = gbar * v;
    let e = challenge(&u, &ubar, &w, &wbar, context);
    let f = v + e * witness;
    DleqProof { ubar, e, f }
}

/// Verify a proof against the ciphertext component `u` and the same
/// second base and context it was minted with.
pub fn verify(
    u: &RistrettoPoint,
    ubar: &RistrettoPoint,
    e: &Scalar,
    f: &Scalar,
    gbar: &RistrettoPoint,
    context: &[u8],
) -> bool {
    // Reconstruct the commitments: w = f*G - e*U, wbar = f*Gbar - e*Ubar
    let w = RISTRETTO_BASEPOINT_POINT * f - u * e;
    let wbar = gbar * f - ubar * e;
    challenge(u, ubar, &w, &wbar, context) == *e
}
