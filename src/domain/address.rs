//! Type-safe account identity.
//!
//! [`Address`] is a 20-byte account identifier rendered as `0x` followed by
//! 40 lowercase hex digits. Participants, voters and the administrator are
//! all keyed by it; the ledger never hands out references into its storage,
//! only these opaque keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Account identity used as the key of every ledger map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; ADDRESS_LEN]);

/// Reasons an address string can fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    /// The string does not start with `0x`.
    #[error("address must start with 0x")]
    MissingPrefix,
    /// The hex body is not exactly 40 digits long.
    #[error("address must have 40 hex digits, got {0}")]
    InvalidLength(usize),
    /// The hex body contains a non-hex character.
    #[error("invalid hex digit {0:?} in address")]
    InvalidDigit(char),
}

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AddressParseError::MissingPrefix)?;

        if body.len() != ADDRESS_LEN * 2 {
            return Err(AddressParseError::InvalidLength(body.len()));
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(body, &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, .. } => AddressParseError::InvalidDigit(c),
            hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                AddressParseError::InvalidLength(body.len())
            }
        })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
