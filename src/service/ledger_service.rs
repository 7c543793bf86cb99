//! Ledger service: serializes operations and emits events.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{
    Address, Amount, EventBus, LedgerEvent, LedgerSnapshot, Participant, PoolLedger, Settlement,
    VoteRecord,
};
use crate::error::LedgerError;

/// Orchestration layer for all ledger operations.
///
/// Owns the [`PoolLedger`] behind a single [`RwLock`] and an [`EventBus`]
/// for event emission. Every mutation method follows the pattern: acquire
/// the write lock → run the ledger operation → release the lock → emit the
/// event → return the result. Holding the write lock for the whole
/// operation is what makes operations atomic and serializable.
#[derive(Debug, Clone)]
pub struct LedgerService {
    ledger: Arc<RwLock<PoolLedger>>,
    event_bus: EventBus,
}

impl LedgerService {
    /// Creates a new `LedgerService` around `ledger`.
    #[must_use]
    pub fn new(ledger: PoolLedger, event_bus: EventBus) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Sets the entrance fee on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] if `caller` is not the
    /// administrator.
    pub async fn set_entrance_fee(&self, caller: Address, amount: Amount) -> Result<(), LedgerError> {
        let mut ledger = self.ledger.write().await;
        if let Err(err) = ledger.set_entrance_fee(&caller, amount) {
            tracing::debug!(%caller, error = %err, "entrance fee update rejected");
            return Err(err);
        }
        drop(ledger);

        let _ = self.event_bus.publish(LedgerEvent::EntranceFeeUpdated {
            administrator: caller,
            entrance_fee: amount.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(entrance_fee = %amount, "entrance fee updated");
        Ok(())
    }

    /// Registers a participant.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidArgument`] for an empty name or
    /// [`LedgerError::AlreadyExists`] for a known identity.
    pub async fn add_participant(&self, identity: Address, name: &str) -> Result<(), LedgerError> {
        let mut ledger = self.ledger.write().await;
        if let Err(err) = ledger.add_participant(identity, name) {
            tracing::debug!(participant = %identity, error = %err, "registration rejected");
            return Err(err);
        }
        drop(ledger);

        let _ = self.event_bus.publish(LedgerEvent::ParticipantAdded {
            participant: identity,
            name: name.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(participant = %identity, name, "participant added");
        Ok(())
    }

    /// Records a vote by `voter` for `participant`.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the fee is too low, the participant is
    /// unknown, the vote is a duplicate, or an amount would overflow.
    pub async fn add_vote(
        &self,
        voter: Address,
        participant: Address,
        value: Amount,
    ) -> Result<VoteRecord, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let record = match ledger.add_vote(voter, participant, value) {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(%voter, %participant, error = %err, "vote rejected");
                return Err(err);
            }
        };
        let number_of_votes = ledger
            .participant(&participant)
            .map_or(0, |p| p.number_of_votes);
        drop(ledger);

        let _ = self.event_bus.publish(LedgerEvent::VoteCast {
            participant,
            voter,
            value: value.to_string(),
            number_of_votes,
            timestamp: Utc::now(),
        });

        tracing::info!(%voter, %participant, %value, number_of_votes, "vote recorded");
        Ok(record)
    }

    /// Settles `winner`'s pool among the voters no earlier settlement paid.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if `winner` is not registered, or
    /// [`LedgerError::ArithmeticOverflow`] if a credit would overflow.
    pub async fn end_of_bola1(&self, winner: Address) -> Result<Settlement, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let settlement = match ledger.end_of_bola1(winner) {
            Ok(settlement) => settlement,
            Err(err) => {
                tracing::debug!(%winner, error = %err, "settlement rejected");
                return Err(err);
            }
        };
        drop(ledger);

        let _ = self.event_bus.publish(LedgerEvent::Settled {
            settlement_id: settlement.id,
            winner,
            pool: settlement.pool.to_string(),
            voters: settlement.payouts.len(),
            remainder: settlement.remainder.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(
            settlement_id = %settlement.id,
            %winner,
            pool = %settlement.pool,
            remainder = %settlement.remainder,
            policy = %settlement.remainder_policy,
            "pool settled"
        );
        Ok(settlement)
    }

    /// Releases the balance of `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] if there is nothing to
    /// withdraw.
    pub async fn withdraw(&self, identity: Address) -> Result<Amount, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let amount = match ledger.withdraw(&identity) {
            Ok(amount) => amount,
            Err(err) => {
                tracing::debug!(account = %identity, error = %err, "withdrawal rejected");
                return Err(err);
            }
        };
        drop(ledger);

        let _ = self.event_bus.publish(LedgerEvent::Withdrawn {
            account: identity,
            amount: amount.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(account = %identity, %amount, "balance withdrawn");
        Ok(amount)
    }

    /// Returns the current entrance fee.
    pub async fn entrance_fee(&self) -> Amount {
        self.ledger.read().await.entrance_fee()
    }

    /// Returns a copy of the participant registered under `identity`.
    pub async fn participant(&self, identity: Address) -> Option<Participant> {
        self.ledger.read().await.participant(&identity).cloned()
    }

    /// Returns the withdrawable balance of `identity`.
    pub async fn balance_of(&self, identity: Address) -> Amount {
        self.ledger.read().await.balance_of(&identity)
    }

    /// Returns the value escrowed for `participant`.
    pub async fn pool_of(&self, participant: Address) -> Amount {
        self.ledger.read().await.pool_of(&participant)
    }

    /// Returns a sorted copy of the whole ledger state.
    pub async fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::from(&*self.ledger.read().await)
    }
}
