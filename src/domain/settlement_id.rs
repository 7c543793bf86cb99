//! Type-safe settlement identifier.
//!
//! [`SettlementId`] wraps a [`uuid::Uuid`] (v4) so settlement receipts and
//! events can be correlated without being confused with other UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of one settlement run.
///
/// Generated when [`super::PoolLedger::end_of_bola1`] succeeds and carried
/// by both the returned [`super::Settlement`] and the emitted
/// [`super::LedgerEvent::Settled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementId(uuid::Uuid);

impl SettlementId {
    /// Creates a new random `SettlementId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for SettlementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SettlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for SettlementId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(SettlementId::new(), SettlementId::new());
    }

    #[test]
    fn display_is_uuid_format() {
        let s = SettlementId::new().to_string();
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }

    #[test]
    fn from_uuid_keeps_value() {
        let uuid = uuid::Uuid::new_v4();
        assert_eq!(*SettlementId::from(uuid).as_uuid(), uuid);
    }
}
