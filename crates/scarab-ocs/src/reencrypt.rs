//! Threshold re-encryption
//!
//! Each share holder turns the ciphertext component `U` into a partial
//! share addressed to the reader key `Xc`:
//!
//! `U_i = x_i * (U + Xc)`
//!
//! Combining a threshold of partials with Lagrange coefficients yields
//! `XhatEnc = x*(U + Xc) = C + xc*X`, from which the holder of `xc`
//! recovers the shared point `C` locally (see [`crate::elgamal`]). The
//! collective scalar `x` is never reconstructed anywhere.

use curve25519_dalek::ristretto::RistrettoPoint;
use serde::{Deserialize, Serialize};

use crate::error::{OcsError, Result};
use crate::lts::{lagrange_coefficients, LtsShare};

/// One node's partial re-encryption of a ciphertext towards a reader key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReencryptShare {
    /// Index of the contributing share
    pub index: u32,
    /// `x_i * (U + Xc)`
    pub point: RistrettoPoint,
}

/// Produce this node's partial re-encryption share.
pub fn reencrypt_share(
    share: &LtsShare,
    u: &RistrettoPoint,
    xc: &RistrettoPoint,
) -> ReencryptShare {
    ReencryptShare {
        index: share.index,
        point: share.scalar * (u + xc),
    }
}

/// Lagrange-combine a threshold of partial shares into `XhatEnc`.
pub fn combine_shares(shares: &[ReencryptShare], threshold: u32) -> Result<RistrettoPoint> {
    if shares.len() < threshold as usize {
        return Err(OcsError::NotEnoughShares {
            got: shares.len(),
            need: threshold as usize,
        });
    }
    let indices: Vec<u32> = shares.iter().map(|s| s.index).collect();
    let lambdas = lagrange_coefficients(&indices)?;
    Ok(shares
        .iter()
        .zip(lambdas)
        .map(|(s, l)| s.point * l)
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elgamal::{encrypt, recover_secret};
    use crate::lts::generate;
    use curve25519_dalek::{constants::RISTRETTO_BASEPOINT_POINT, scalar::Scalar};
    use proptest::prelude::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_reencrypt_roundtrip() {
        let mut rng = OsRng;
        let (lts, shares) = generate(2, 3, &mut rng).unwrap();

        let enc = encrypt(&lts.x, b"secret key 1", &mut rng);

        // Reader key pair
        let xc = Scalar::random(&mut rng);
        let big_xc = RISTRETTO_BASEPOINT_POINT * xc;

        let partials: Vec<ReencryptShare> = shares[..2]
            .iter()
            .map(|s| reencrypt_share(s, &enc.u, &big_xc))
            .collect();
        let xhat_enc = combine_shares(&partials, 2).unwrap();

        let recovered = recover_secret(&xc, &lts.x, &enc.data, &xhat_enc);
        assert_eq!(recovered, b"secret key 1".to_vec());
    }

    #[test]
    fn test_any_threshold_subset_works() {
        let mut rng = OsRng;
        let (lts, shares) = generate(2, 3, &mut rng).unwrap();
        let enc = encrypt(&lts.x, b"subset", &mut rng);

        let xc = Scalar::random(&mut rng);
        let big_xc = RISTRETTO_BASEPOINT_POINT * xc;

        // Nodes 2 and 3 instead of 1 and 2.
        let partials: Vec<ReencryptShare> = [&shares[1], &shares[2]]
            .iter()
            .map(|s| reencrypt_share(s, &enc.u, &big_xc))
            .collect();
        let xhat_enc = combine_shares(&partials, 2).unwrap();

        assert_eq!(
            recover_secret(&xc, &lts.x, &enc.data, &xhat_enc),
            b"subset".to_vec()
        );
    }

    #[test]
    fn test_not_enough_shares() {
        let mut rng = OsRng;
        let (lts, shares) = generate(2, 3, &mut rng).unwrap();
        let enc = encrypt(&lts.x, b"s", &mut rng);
        let big_xc = RISTRETTO_BASEPOINT_POINT * Scalar::random(&mut rng);

        let partials = vec![reencrypt_share(&shares[0], &enc.u, &big_xc)];
        assert!(matches!(
            combine_shares(&partials, 2),
            Err(OcsError::NotEnoughShares { got: 1, need: 2 })
        ));
    }

    #[test]
    fn test_wrong_reader_key_recovers_garbage() {
        let mut rng = OsRng;
        let (lts, shares) = generate(2, 3, &mut rng).unwrap();
        let enc = encrypt(&lts.x, b"secret key 1", &mut rng);

        let xc = Scalar::random(&mut rng);
        let big_xc = RISTRETTO_BASEPOINT_POINT * xc;

        let partials: Vec<ReencryptShare> = shares[..2]
            .iter()
            .map(|s| reencrypt_share(s, &enc.u, &big_xc))
            .collect();
        let xhat_enc = combine_shares(&partials, 2).unwrap();

        let wrong = Scalar::random(&mut rng);
        let recovered = recover_secret(&wrong, &lts.x, &enc.data, &xhat_enc);
        assert_ne!(recovered, b"secret key 1".to_vec());
    }

    proptest! {
        // Round-trip holds for every secret length the encoding supports.
        #[test]
        fn prop_roundtrip_any_length(secret in proptest::collection::vec(any::<u8>(), 0..200)) {
            let mut rng = OsRng;
            let (lts, shares) = generate(3, 4, &mut rng).unwrap();
            let enc = encrypt(&lts.x, &secret, &mut rng);

            let xc = Scalar::random(&mut rng);
            let big_xc = RISTRETTO_BASEPOINT_POINT * xc;

            let partials: Vec<ReencryptShare> = shares[..3]
                .iter()
                .map(|s| reencrypt_share(s, &enc.u, &big_xc))
                .collect();
            let xhat_enc = combine_shares(&partials, 3).unwrap();

            prop_assert_eq!(recover_secret(&xc, &lts.x, &enc.data, &xhat_enc), secret);
        }
    }
}
