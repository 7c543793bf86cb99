//! Settlement receipts and the remainder policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Address, Amount, SettlementId};

/// Where the truncation remainder of a settlement goes.
///
/// Each voter receives `floor(pool * count / total)`. Whatever the floor
/// drops is handled according to this policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Credit the remainder to the administrator's balance.
    #[default]
    ReturnToAdministrator,
    /// Remove the remainder from the funds the ledger holds.
    Burn,
    /// Leave the remainder in the winner's pool for the next settlement.
    CarryForward,
}

impl RemainderPolicy {
    /// Returns the policy as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReturnToAdministrator => "return_to_administrator",
            Self::Burn => "burn",
            Self::CarryForward => "carry_forward",
        }
    }
}

impl fmt::Display for RemainderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a remainder policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown remainder policy: {0}")]
pub struct UnknownRemainderPolicy(pub String);

impl FromStr for RemainderPolicy {
    type Err = UnknownRemainderPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "return_to_administrator" | "return" => Ok(Self::ReturnToAdministrator),
            "burn" => Ok(Self::Burn),
            "carry_forward" | "carry" => Ok(Self::CarryForward),
            _ => Err(UnknownRemainderPolicy(s.to_string())),
        }
    }
}

/// One voter's share of a settled pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Payout {
    /// Voter credited.
    pub voter: Address,
    /// Amount added to the voter's balance.
    #[serde(with = "crate::domain::amount")]
    pub amount: Amount,
}

/// Receipt of a successful [`super::PoolLedger::end_of_bola1`].
///
/// `payouts` sum to `pool - remainder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    /// Identifier of this settlement run.
    pub id: SettlementId,
    /// Winning participant.
    pub winner: Address,
    /// Pool value consumed by the settlement.
    #[serde(with = "crate::domain::amount")]
    pub pool: Amount,
    /// Winner's vote count at settlement time.
    pub total_votes: u64,
    /// Per-voter credits, in the order the votes were cast.
    pub payouts: Vec<Payout>,
    /// Value left over by integer division.
    #[serde(with = "crate::domain::amount")]
    pub remainder: Amount,
    /// How `remainder` was handled.
    pub remainder_policy: RemainderPolicy,
}

impl Settlement {
    /// Returns the total credited to voters.
    #[must_use]
    pub fn distributed(&self) -> Amount {
        self.pool.saturating_sub(self.remainder)
    }
}
