//! Native currency amounts.
//!
//! Amounts are plain `u128` values in the smallest currency unit. JSON
//! numbers lose precision past 2^53, so every amount leaving the crate is
//! written as a decimal string. Use this module with
//! `#[serde(with = "crate::domain::amount")]`.

use serde::{Deserialize, Deserializer, Serializer};

/// Amount in the ledger's smallest native currency unit.
pub type Amount = u128;

/// Serializes an amount as a decimal string.
///
/// # Errors
///
/// Propagates any error from the underlying serializer.
pub fn serialize<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(amount)
}

/// Deserializes an amount from a decimal string.
///
/// # Errors
///
/// Fails if the input is not a string of decimal digits that fits in `u128`.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}
