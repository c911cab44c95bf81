//! # hdkeys
//!
//! Hierarchical deterministic key derivation for secp256k1 wallets and
//! validator tooling.
//!
//! ## Architecture
//!
//! - **Seed**: opaque root secret, usually stretched from a BIP-39 mnemonic
//! - **Master key**: `HMAC-SHA512("Bitcoin seed", seed)` split into key and chain code
//! - **Child derivation**: BIP-32 `CKDpriv`, hardened or normal
//! - **Paths**: strict BIP-44 parameters, or lenient free-form path text
//!
//! ## Example
//!
//! ```
//! use hdkeys::{compute_master, derive_private_key_for_path, Seed, FULL_FUNDRAISER_PATH};
//!
//! let seed = Seed::from_mnemonic(
//!     "barrel original fuel morning among eternal filter ball stove pluck matrix mechanic",
//!     "",
//! )?;
//! let master = compute_master(seed.as_bytes());
//! let key = derive_private_key_for_path(master.key(), master.chain_code(), FULL_FUNDRAISER_PATH);
//! assert_eq!(
//!     hex::encode(key),
//!     "01dcb36acfd5de52ac1f00daf231e64637388202f1fce7bdc64f6bb3199d270d"
//! );
//! # Ok::<(), hdkeys::SeedError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rust_2018_idioms
)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod hd;
pub mod seed;

pub use config::{ConfigError, DerivationConfig};
pub use hd::{
    compute_master, derive_child, derive_for_path, derive_private_key_for_path, Bip44Params,
    KeyMaterial, PathError, Segment, FULL_FUNDRAISER_PATH, HARDENED_OFFSET,
};
pub use seed::{Seed, SeedError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
