//! Hierarchical deterministic key derivation (BIP-32 over secp256k1).
//!
//! Two separate path surfaces live here:
//! - [`Bip44Params`] is the strict, 5-field BIP-44 grammar. Anything that is
//!   not canonical is rejected with a [`PathError`].
//! - [`derive_for_path`] walks free-form path text and never fails. Segments
//!   it cannot read are skipped.
//!
//! The derivation itself is split into [`compute_master`] (seed to root) and
//! [`derive_child`] (one step down the tree).

mod child;
mod master;
mod params;
mod walker;

pub use child::derive_child;
pub use master::compute_master;
pub use params::{Bip44Params, BIP44_PURPOSE, BNB_COIN_TYPE, FULL_FUNDRAISER_PATH};
pub use walker::{derive_for_path, derive_private_key_for_path, segments, Segment};

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bit set on an index to mark a hardened step.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A private key together with its chain code.
///
/// SECURITY: key bytes are wiped on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    key: [u8; 32],
    chain_code: [u8; 32],
}

impl KeyMaterial {
    /// Create from raw key and chain code bytes
    #[must_use]
    pub const fn new(key: [u8; 32], chain_code: [u8; 32]) -> Self {
        Self { key, chain_code }
    }

    /// The 32-byte private key
    #[must_use]
    pub const fn key(&self) -> &[u8; 32] {
        &self.key
    }

    /// The 32-byte chain code
    #[must_use]
    pub const fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Derive the child at `index` (see [`derive_child`])
    #[must_use]
    pub fn child(&self, index: u32, hardened: bool) -> Self {
        derive_child(&self.key, &self.chain_code, index, hardened)
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial").finish_non_exhaustive()
    }
}

/// Errors from the strict BIP-44 path grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Not exactly five `/`-separated fields
    #[error("path must have 5 fields, got {0}")]
    FieldCount(usize),
    /// Purpose field is not `44'`
    #[error("first field must be 44', got {0:?}")]
    InvalidPurpose(String),
    /// Field that must be hardened has no `'`
    #[error("{0} field must be hardened")]
    NotHardened(&'static str),
    /// Field that must not be hardened carries a `'`
    #[error("{0} field must not be hardened")]
    UnexpectedHardened(&'static str),
    /// Change field is not `0` or `1`
    #[error("change field must be 0 or 1, got {0:?}")]
    InvalidChange(String),
    /// Field holds a negative number
    #[error("{field} field must not be negative, got {value:?}")]
    Negative {
        /// Field name
        field: &'static str,
        /// Offending text
        value: String,
    },
    /// Field is not a plain decimal integer
    #[error("{field} field is not a valid integer: {value:?}")]
    NotANumber {
        /// Field name
        field: &'static str,
        /// Offending text
        value: String,
    },
    /// Field has a redundant leading zero
    #[error("{field} field is not in canonical form: {value:?}")]
    NotCanonical {
        /// Field name
        field: &'static str,
        /// Offending text
        value: String,
    },
    /// Field does not fit in 32 bits, or in 31 bits when hardened
    #[error("{field} field out of range: {value:?}")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// Offending text
        value: String,
    },
}
