//! Participant and vote records held by the ledger.

use serde::Serialize;

use super::Amount;

/// A named entity that can receive votes and be chosen as winner.
///
/// Created by [`super::PoolLedger::add_participant`] and never deleted.
/// The name is fixed at creation; only the vote counter moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    /// Display name, never empty.
    pub name: String,

    /// Number of votes received. Always equals the sum of
    /// [`VoteRecord::count`] over this participant's voters.
    pub number_of_votes: u64,
}

impl Participant {
    /// Creates a participant with no votes.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            number_of_votes: 0,
        }
    }
}

/// Per-(participant, voter) tally.
///
/// The duplicate-vote rule keeps `count` at 1 once a vote lands, but the
/// settlement split is computed from it so the record stays a counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteRecord {
    /// Number of votes this voter cast for the participant.
    pub count: u64,

    /// Cumulative value this voter contributed to the participant's pool.
    #[serde(with = "crate::domain::amount")]
    pub value: Amount,
}
