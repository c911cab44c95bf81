//! Seed input for the key tree.
//!
//! The derivation core treats a seed as opaque bytes. [`Seed::from_mnemonic`]
//! is the standard BIP-39 way of producing one from a phrase and passphrase.

use bip39::{Language, Mnemonic};
use thiserror::Error;
use zeroize::Zeroizing;

/// Seed provider errors
#[derive(Debug, Error)]
pub enum SeedError {
    /// Invalid mnemonic phrase
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    /// Seed with no bytes
    #[error("seed must not be empty")]
    Empty,
}

/// Root secret of a key tree, wiped on drop
///
/// SECURITY: This type intentionally does not implement Clone or Debug
/// to prevent accidental key leakage.
pub struct Seed(Zeroizing<Vec<u8>>);

impl Seed {
    /// Wrap raw seed bytes
    ///
    /// # Errors
    /// Returns error if `bytes` is empty
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SeedError> {
        if bytes.is_empty() {
            return Err(SeedError::Empty);
        }
        Ok(Self(Zeroizing::new(bytes)))
    }

    /// Stretch an English BIP-39 mnemonic into its 64-byte seed.
    ///
    /// # Arguments
    /// * `phrase` - The mnemonic words, separated by whitespace
    /// * `passphrase` - Optional passphrase (empty string if none)
    ///
    /// # Errors
    /// Returns error if the phrase is invalid (wrong words, checksum, etc.)
    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self, SeedError> {
        let mnemonic = Mnemonic::parse_in(Language::English, phrase)
            .map_err(|e| SeedError::InvalidMnemonic(e.to_string()))?;
        let seed = Zeroizing::new(mnemonic.to_seed(passphrase));
        Ok(Self(Zeroizing::new(seed.to_vec())))
    }

    /// Get the seed bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
