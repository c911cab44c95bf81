//! Strict BIP-44 path parameters.
//!
//! The canonical form is `purpose'/coin_type'/account'/change/address_index`,
//! with `purpose` fixed to 44 and `change` either 0 or 1.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{PathError, HARDENED_OFFSET};

/// BIP-44 purpose constant
pub const BIP44_PURPOSE: u32 = 44;

/// SLIP-44 coin type for BNB Beacon Chain
pub const BNB_COIN_TYPE: u32 = 714;

/// Path of the first address of the first fundraiser account
pub const FULL_FUNDRAISER_PATH: &str = "44'/714'/0'/0/0";

const PURPOSE: &str = "purpose";
const COIN_TYPE: &str = "coin type";
const ACCOUNT: &str = "account";
const CHANGE: &str = "change";
const ADDRESS_INDEX: &str = "address index";

/// Parameters of a BIP-44 derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bip44Params {
    /// Purpose, always 44 for paths accepted by the parser
    pub purpose: u32,
    /// SLIP-44 coin type
    pub coin_type: u32,
    /// Account index
    pub account: u32,
    /// Internal (`true`) or external (`false`) chain
    pub change: bool,
    /// Address index within the chain
    pub address_index: u32,
}

impl Bip44Params {
    /// Create parameters from their parts
    #[must_use]
    pub const fn new(
        purpose: u32,
        coin_type: u32,
        account: u32,
        change: bool,
        address_index: u32,
    ) -> Self {
        Self {
            purpose,
            coin_type,
            account,
            change,
            address_index,
        }
    }

    /// Parameters for a fundraiser-style account: purpose 44, external chain
    #[must_use]
    pub const fn fundraiser(coin_type: u32, account: u32, address_index: u32) -> Self {
        Self::new(BIP44_PURPOSE, coin_type, account, false, address_index)
    }

    /// Raw BIP-32 indices, hardened bit set on the first three levels.
    ///
    /// The first three fields are expected below `2^31`, which [`Self::parse`]
    /// enforces. Larger values built by hand lose their top bit to the
    /// hardening marker.
    #[must_use]
    pub fn derivation_path(&self) -> [u32; 5] {
        [
            self.purpose | HARDENED_OFFSET,
            self.coin_type | HARDENED_OFFSET,
            self.account | HARDENED_OFFSET,
            u32::from(self.change),
            self.address_index,
        ]
    }

    /// Parse the canonical textual form
    ///
    /// # Errors
    /// Returns the first grammar violation found, scanning fields left to right
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let fields: Vec<&str> = path.split('/').collect();
        if fields.len() != 5 {
            return Err(PathError::FieldCount(fields.len()));
        }

        let (purpose_text, purpose_hardened) = split_marker(fields[0]);
        let purpose = parse_index(PURPOSE, purpose_text)?;
        if purpose != BIP44_PURPOSE {
            return Err(PathError::InvalidPurpose(fields[0].to_string()));
        }
        if !purpose_hardened {
            return Err(PathError::NotHardened(PURPOSE));
        }

        let coin_type = hardened_field(COIN_TYPE, fields[1])?;
        let account = hardened_field(ACCOUNT, fields[2])?;

        let change = match plain_field(CHANGE, fields[3])? {
            0 => false,
            1 => true,
            _ => return Err(PathError::InvalidChange(fields[3].to_string())),
        };

        let address_index = plain_field(ADDRESS_INDEX, fields[4])?;

        Ok(Self::new(purpose, coin_type, account, change, address_index))
    }
}

impl fmt::Display for Bip44Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}'/{}'/{}'/{}/{}",
            self.purpose,
            self.coin_type,
            self.account,
            u8::from(self.change),
            self.address_index
        )
    }
}

impl FromStr for Bip44Params {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn split_marker(field: &str) -> (&str, bool) {
    field
        .strip_suffix('\'')
        .map_or((field, false), |stripped| (stripped, true))
}

fn hardened_field(name: &'static str, field: &str) -> Result<u32, PathError> {
    let (text, hardened) = split_marker(field);
    if !hardened {
        return Err(PathError::NotHardened(name));
    }
    let index = parse_index(name, text)?;
    if index >= HARDENED_OFFSET {
        return Err(PathError::OutOfRange {
            field: name,
            value: text.to_string(),
        });
    }
    Ok(index)
}

fn plain_field(name: &'static str, field: &str) -> Result<u32, PathError> {
    let (text, hardened) = split_marker(field);
    if hardened {
        return Err(PathError::UnexpectedHardened(name));
    }
    parse_index(name, text)
}

// Plain decimal digits only: no sign, no whitespace, no radix prefix, no
// leading zeros.
fn parse_index(name: &'static str, text: &str) -> Result<u32, PathError> {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if text.strip_prefix('-').is_some_and(all_digits) {
        return Err(PathError::Negative {
            field: name,
            value: text.to_string(),
        });
    }
    if !all_digits(text) {
        return Err(PathError::NotANumber {
            field: name,
            value: text.to_string(),
        });
    }
    if text.len() > 1 && text.starts_with('0') {
        return Err(PathError::NotCanonical {
            field: name,
            value: text.to_string(),
        });
    }
    text.parse().map_err(|_| PathError::OutOfRange {
        field: name,
        value: text.to_string(),
    })
}
