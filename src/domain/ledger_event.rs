//! Domain events reflecting ledger state mutations.
//!
//! Every successful operation emits exactly one [`LedgerEvent`] through the
//! [`super::EventBus`]. Rejected operations emit nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Address, SettlementId};

/// Domain event emitted after every state mutation.
///
/// Amounts are stored as `String` to preserve u128 precision when
/// serialized to JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Emitted when the administrator changes the entrance fee.
    EntranceFeeUpdated {
        /// Administrator that made the change.
        administrator: Address,
        /// New fee (string-encoded u128).
        entrance_fee: String,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a participant is registered.
    ParticipantAdded {
        /// Participant identity.
        participant: Address,
        /// Participant name.
        name: String,
        /// Registration timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a vote is recorded.
    VoteCast {
        /// Participant voted for.
        participant: Address,
        /// Voter identity.
        voter: Address,
        /// Value escrowed with the vote (string-encoded u128).
        value: String,
        /// Participant's vote count after this vote.
        number_of_votes: u64,
        /// Vote timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a winner's pool is distributed.
    Settled {
        /// Settlement identifier.
        settlement_id: SettlementId,
        /// Winning participant.
        winner: Address,
        /// Pool consumed (string-encoded u128).
        pool: String,
        /// Number of voters credited.
        voters: usize,
        /// Truncation remainder (string-encoded u128).
        remainder: String,
        /// Settlement timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a balance is withdrawn.
    Withdrawn {
        /// Account whose balance was released.
        account: Address,
        /// Amount released (string-encoded u128).
        amount: String,
        /// Withdrawal timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// Returns the identity the event is about: the administrator, the
    /// participant, the winner or the withdrawing account.
    #[must_use]
    pub fn subject(&self) -> Address {
        match self {
            Self::EntranceFeeUpdated { administrator, .. } => *administrator,
            Self::ParticipantAdded { participant, .. } | Self::VoteCast { participant, .. } => {
                *participant
            }
            Self::Settled { winner, .. } => *winner,
            Self::Withdrawn { account, .. } => *account,
        }
    }

    /// Returns `true` if `identity` is the subject of the event or, for a
    /// vote, the voter.
    #[must_use]
    pub fn involves(&self, identity: &Address) -> bool {
        match self {
            Self::VoteCast { voter, .. } if voter == identity => true,
            _ => self.subject() == *identity,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::EntranceFeeUpdated { .. } => "entrance_fee_updated",
            Self::ParticipantAdded { .. } => "participant_added",
            Self::VoteCast { .. } => "vote_cast",
            Self::Settled { .. } => "settled",
            Self::Withdrawn { .. } => "withdrawn",
        }
    }
}
