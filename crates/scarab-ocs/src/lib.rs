//! Scarab OCS - On-chain secrets cryptographic primitives
//!
//! This crate provides the crypto underneath the scarab protocol:
//!
//! - ElGamal-style encryption of a secret under a collective public key,
//!   with a DLEQ proof that the ciphertext was produced correctly and is
//!   bound to a specific access-policy identifier.
//! - Long-term-secret (LTS) share generation. The collective private key
//!   exists only as Shamir shares; this crate ships a trusted-dealer
//!   generator standing in for a full DKG ceremony, the same way dealer
//!   keygen stands beside DKG in threshold signing stacks.
//! - Partial re-encryption: each share holder turns a ciphertext encrypted
//!   under the collective key into a share addressed to a reader key `Xc`;
//!   a threshold of shares Lagrange-combines into a value the holder of
//!   the scalar for `Xc` can decrypt locally.
//!
//! All group arithmetic is ristretto255 via `curve25519-dalek`.

pub mod dleq;
pub mod elgamal;
pub mod error;
pub mod lts;
pub mod reencrypt;

pub use dleq::DleqProof;
pub use elgamal::Encryption;
pub use error::{OcsError, Result};
pub use lts::{LtsId, LtsPublic, LtsShare};
pub use reencrypt::ReencryptShare;
