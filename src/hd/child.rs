//! Single-step private child key derivation (BIP-32 `CKDpriv`).

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, FieldBytes, ProjectivePoint, Scalar, U256};
use tracing::trace;

use super::master::{hmac_sha512, split_digest};
use super::{KeyMaterial, HARDENED_OFFSET};

/// Derive the child of `(parent_key, parent_chain_code)` at `index`.
///
/// A hardened step (`hardened`, or `index` already carrying the top bit)
/// hashes `0x00 || parent_key || ser32(index | 2^31)`. A normal step hashes
/// the compressed parent public key followed by `ser32(index)`. The HMAC key
/// is the parent chain code in both cases.
///
/// The child key is `parent_key + I_L mod n`. Out-of-range inputs are reduced
/// modulo the curve order instead of rejected, so this never fails.
#[must_use]
pub fn derive_child(
    parent_key: &[u8; 32],
    parent_chain_code: &[u8; 32],
    index: u32,
    hardened: bool,
) -> KeyMaterial {
    let index = if hardened { index | HARDENED_OFFSET } else { index };
    let index_bytes = index.to_be_bytes();

    let digest = if index >= HARDENED_OFFSET {
        hmac_sha512(
            parent_chain_code,
            &[[0u8].as_slice(), parent_key.as_slice(), index_bytes.as_slice()],
        )
    } else {
        let public_key = compressed_public_key(parent_key);
        hmac_sha512(parent_chain_code, &[public_key.as_slice(), index_bytes.as_slice()])
    };
    let tweak = split_digest(digest);

    let child = to_scalar(parent_key) + to_scalar(tweak.key());
    let mut key = [0u8; 32];
    key.copy_from_slice(&child.to_bytes());

    trace!(index, hardened = index >= HARDENED_OFFSET, "derived child key");
    KeyMaterial::new(key, *tweak.chain_code())
}

fn to_scalar(bytes: &[u8; 32]) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(bytes))
}

// SEC1 compressed point; a zero key maps to the single-byte identity encoding.
fn compressed_public_key(key: &[u8; 32]) -> Vec<u8> {
    let point = AffinePoint::from(ProjectivePoint::GENERATOR * to_scalar(key));
    point.to_encoded_point(true).as_bytes().to_vec()
}
