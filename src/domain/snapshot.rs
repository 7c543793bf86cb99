//! Serializable point-in-time view of the whole ledger.

use serde::Serialize;

use super::{Address, Amount, PoolLedger, RemainderPolicy};

/// One participant row of a [`LedgerSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantSummary {
    /// Participant identity.
    pub participant: Address,
    /// Participant name.
    pub name: String,
    /// Votes received.
    pub number_of_votes: u64,
    /// Value currently escrowed for the participant.
    #[serde(with = "crate::domain::amount")]
    pub pool: Amount,
}

/// One balance row of a [`LedgerSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    /// Account holding the balance.
    pub account: Address,
    /// Withdrawable amount.
    #[serde(with = "crate::domain::amount")]
    pub balance: Amount,
}

/// Read-only copy of the ledger state, sorted by address so two snapshots
/// of the same state serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    /// Ledger administrator.
    pub administrator: Address,
    /// Current entrance fee.
    #[serde(with = "crate::domain::amount")]
    pub entrance_fee: Amount,
    /// Remainder policy in force.
    pub remainder_policy: RemainderPolicy,
    /// Total value held by the ledger.
    #[serde(with = "crate::domain::amount")]
    pub total_held: Amount,
    /// Registered participants.
    pub participants: Vec<ParticipantSummary>,
    /// Non-zero balances.
    pub balances: Vec<BalanceSummary>,
}

impl From<&PoolLedger> for LedgerSnapshot {
    fn from(ledger: &PoolLedger) -> Self {
        let mut participants: Vec<ParticipantSummary> = ledger
            .participants()
            .map(|(identity, participant)| ParticipantSummary {
                participant: *identity,
                name: participant.name.clone(),
                number_of_votes: participant.number_of_votes,
                pool: ledger.pool_of(identity),
            })
            .collect();
        participants.sort_by_key(|p| p.participant);

        let mut balances: Vec<BalanceSummary> = ledger
            .balances()
            .filter(|(_, balance)| **balance > 0)
            .map(|(account, balance)| BalanceSummary {
                account: *account,
                balance: *balance,
            })
            .collect();
        balances.sort_by_key(|b| b.account);

        Self {
            administrator: ledger.administrator(),
            entrance_fee: ledger.entrance_fee(),
            remainder_policy: ledger.remainder_policy(),
            total_held: ledger.total_held(),
            participants,
            balances,
        }
    }
}
