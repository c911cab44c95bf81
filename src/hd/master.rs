//! Root of the key tree.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::KeyMaterial;

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for the master node, fixed by BIP-32 for secp256k1
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Compute the master key and chain code for a seed.
///
/// `I = HMAC-SHA512(key = "Bitcoin seed", data = seed)`; the left half of `I`
/// is the master key, the right half the master chain code. Any seed is
/// accepted, including ones whose left half is not a valid scalar.
#[must_use]
pub fn compute_master(seed: &[u8]) -> KeyMaterial {
    split_digest(hmac_sha512(MASTER_HMAC_KEY, &[seed]))
}

pub(super) fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC can take key of any size");
    for part in parts {
        mac.update(part);
    }
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

pub(super) fn split_digest(digest: [u8; 64]) -> KeyMaterial {
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&digest[..32]);
    chain_code.copy_from_slice(&digest[32..]);
    KeyMaterial::new(key, chain_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_deterministic() {
        let seed = b"some seed bytes";
        assert_eq!(compute_master(seed), compute_master(seed));
    }

    #[test]
    fn test_master_differs_per_seed() {
        let a = compute_master(&[0u8; 64]);
        let b = compute_master(&[1u8; 64]);
        assert_ne!(a.key(), b.key());
        assert_ne!(a.chain_code(), b.chain_code());
    }

    #[test]
    fn test_bip32_vector_1_master() {
        // BIP-32 test vector 1, chain m
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let master = compute_master(&seed);
        assert_eq!(
            hex::encode(master.key()),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(master.chain_code()),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
    }

    #[test]
    fn test_single_byte_seed() {
        let master = compute_master(&[0x00]);
        assert_eq!(master.key().len(), 32);
    }
}
