//! The pool ledger: fees, participants, votes and settlement.
//!
//! [`PoolLedger`] is a plain synchronous state object. Every operation
//! validates first and mutates last, so a rejected call leaves the ledger
//! exactly as it was. Serializing calls is the caller's job; see
//! [`crate::service::LedgerService`] for the async wrapper that does it.

use std::collections::HashMap;

use super::participant::{Participant, VoteRecord};
use super::settlement::{Payout, RemainderPolicy, Settlement};
use super::{Address, Amount, SettlementId};
use crate::error::LedgerError;

/// Pooled-stake voting ledger.
///
/// # Accounting
///
/// - `participants[p].number_of_votes` equals the sum of vote record counts
///   for `p`.
/// - `pools[p]` equals the value cast for `p` since its last settlement
///   (plus any carried-forward remainder).
/// - `voters[p][settled[p]..]` are exactly the voters whose value is still
///   in `pools[p]`; each settlement pays only them.
/// - `total_held` equals the sum of all pools and all balances.
#[derive(Debug, Clone)]
pub struct PoolLedger {
    administrator: Address,
    entrance_fee: Amount,
    remainder_policy: RemainderPolicy,
    participants: HashMap<Address, Participant>,
    vote_records: HashMap<(Address, Address), VoteRecord>,
    /// Voters per participant, in the order their first vote landed.
    voters: HashMap<Address, Vec<Address>>,
    /// Number of leading `voters` entries already paid out.
    settled: HashMap<Address, usize>,
    pools: HashMap<Address, Amount>,
    balances: HashMap<Address, Amount>,
    total_held: Amount,
}

impl PoolLedger {
    /// Creates an empty ledger owned by `administrator`, with a zero
    /// entrance fee.
    #[must_use]
    pub fn new(administrator: Address, remainder_policy: RemainderPolicy) -> Self {
        Self {
            administrator,
            entrance_fee: 0,
            remainder_policy,
            participants: HashMap::new(),
            vote_records: HashMap::new(),
            voters: HashMap::new(),
            settled: HashMap::new(),
            pools: HashMap::new(),
            balances: HashMap::new(),
            total_held: 0,
        }
    }

    /// Identity allowed to change the entrance fee.
    #[must_use]
    pub const fn administrator(&self) -> Address {
        self.administrator
    }

    /// Minimum value a vote must carry.
    #[must_use]
    pub const fn entrance_fee(&self) -> Amount {
        self.entrance_fee
    }

    /// Policy applied to settlement remainders.
    #[must_use]
    pub const fn remainder_policy(&self) -> RemainderPolicy {
        self.remainder_policy
    }

    /// Looks up a participant by identity.
    #[must_use]
    pub fn participant(&self, identity: &Address) -> Option<&Participant> {
        self.participants.get(identity)
    }

    /// Iterates over all registered participants, in no particular order.
    pub fn participants(&self) -> impl Iterator<Item = (&Address, &Participant)> {
        self.participants.iter()
    }

    /// Number of registered participants.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Withdrawable balance of `identity` (zero when absent).
    #[must_use]
    pub fn balance_of(&self, identity: &Address) -> Amount {
        self.balances.get(identity).copied().unwrap_or(0)
    }

    /// Iterates over all non-zero balances, in no particular order.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    /// Value currently escrowed for `participant` (zero when absent).
    #[must_use]
    pub fn pool_of(&self, participant: &Address) -> Amount {
        self.pools.get(participant).copied().unwrap_or(0)
    }

    /// The vote record of `voter` for `participant`, if any.
    #[must_use]
    pub fn vote_record(&self, participant: &Address, voter: &Address) -> Option<VoteRecord> {
        self.vote_records.get(&(*participant, *voter)).copied()
    }

    /// Voters of `participant`, in the order they first voted.
    #[must_use]
    pub fn voters_of(&self, participant: &Address) -> &[Address] {
        self.voters.get(participant).map(Vec::as_slice).unwrap_or_default()
    }

    /// Voters of `participant` not yet paid by a settlement, in vote order.
    #[must_use]
    pub fn unsettled_voters_of(&self, participant: &Address) -> &[Address] {
        let paid = self.settled.get(participant).copied().unwrap_or(0);
        self.voters_of(participant).get(paid..).unwrap_or_default()
    }

    /// Total value the ledger holds: escrowed pools plus unwithdrawn
    /// balances.
    #[must_use]
    pub const fn total_held(&self) -> Amount {
        self.total_held
    }

    /// Sets the entrance fee. Administrator only.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] if `caller` is not the
    /// administrator.
    pub fn set_entrance_fee(&mut self, caller: &Address, amount: Amount) -> Result<(), LedgerError> {
        if *caller != self.administrator {
            return Err(LedgerError::Unauthorized);
        }
        self.entrance_fee = amount;
        Ok(())
    }

    /// Registers a participant under `identity`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidArgument`] if `name` is empty.
    /// - [`LedgerError::AlreadyExists`] if `identity` is already registered.
    pub fn add_participant(&mut self, identity: Address, name: &str) -> Result<(), LedgerError> {
        if name.is_empty() {
            return Err(LedgerError::InvalidArgument);
        }
        if self.participants.contains_key(&identity) {
            return Err(LedgerError::AlreadyExists);
        }
        self.participants
            .insert(identity, Participant::new(name.to_string()));
        Ok(())
    }

    /// Records a vote by `voter` for `participant`, escrowing `value`.
    ///
    /// Checks run in a fixed order: fee, then participant existence, then
    /// duplicate vote. Callers can tell the failures apart, so the order
    /// must not change.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientFee`] if `value` is below the fee.
    /// - [`LedgerError::NotFound`] if `participant` is not registered.
    /// - [`LedgerError::DuplicateVote`] if `voter` already voted for it.
    /// - [`LedgerError::ArithmeticOverflow`] if a counter would overflow.
    pub fn add_vote(
        &mut self,
        voter: Address,
        participant: Address,
        value: Amount,
    ) -> Result<VoteRecord, LedgerError> {
        if value < self.entrance_fee {
            return Err(LedgerError::InsufficientFee);
        }
        let current_votes = self
            .participants
            .get(&participant)
            .map(|p| p.number_of_votes)
            .ok_or(LedgerError::NotFound)?;
        let key = (participant, voter);
        if self.vote_records.get(&key).is_some_and(|r| r.count > 0) {
            return Err(LedgerError::DuplicateVote);
        }

        let number_of_votes = current_votes
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let pool = self
            .pool_of(&participant)
            .checked_add(value)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let total_held = self
            .total_held
            .checked_add(value)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        let record = VoteRecord { count: 1, value };
        if self.vote_records.insert(key, record).is_none() {
            self.voters.entry(participant).or_default().push(voter);
        }
        if let Some(entry) = self.participants.get_mut(&participant) {
            entry.number_of_votes = number_of_votes;
        }
        self.pools.insert(participant, pool);
        self.total_held = total_held;
        Ok(record)
    }

    /// Distributes the winner's pool to its voters in proportion to their
    /// vote counts.
    ///
    /// Only voters not paid by an earlier settlement of `winner` take part.
    /// Each of them with count `c` receives `floor(pool * c / total)`, where
    /// `total` sums their counts. On a first settlement that is every voter
    /// and `total` is the participant's vote count. Afterwards the pool is
    /// emptied and those voters are marked paid, so votes cast later are
    /// settled among the later voters alone. The truncation remainder
    /// follows the ledger's [`RemainderPolicy`].
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if `winner` is not registered.
    /// - [`LedgerError::ArithmeticOverflow`] if a share or a balance credit
    ///   would overflow. Nothing is credited in that case.
    pub fn end_of_bola1(&mut self, winner: Address) -> Result<Settlement, LedgerError> {
        if !self.participants.contains_key(&winner) {
            return Err(LedgerError::NotFound);
        }
        let pool = self.pool_of(&winner);
        let round = self.unsettled_voters_of(&winner);

        let mut total_votes: u64 = 0;
        for voter in round {
            let count = self.vote_record(&winner, voter).map_or(0, |r| r.count);
            total_votes = total_votes
                .checked_add(count)
                .ok_or(LedgerError::ArithmeticOverflow)?;
        }

        let mut payouts = Vec::with_capacity(round.len());
        let mut distributed: Amount = 0;
        if total_votes > 0 {
            for voter in round {
                let count = self.vote_record(&winner, voter).map_or(0, |r| r.count);
                let amount = pool
                    .checked_mul(Amount::from(count))
                    .and_then(|x| x.checked_div(Amount::from(total_votes)))
                    .ok_or(LedgerError::ArithmeticOverflow)?;
                distributed = distributed
                    .checked_add(amount)
                    .ok_or(LedgerError::ArithmeticOverflow)?;
                payouts.push(Payout {
                    voter: *voter,
                    amount,
                });
            }
        }
        let remainder = pool
            .checked_sub(distributed)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        // Stage every balance change before touching state. Each credit is
        // bounded by `total_held`, which already counts both the balance and
        // the pool it comes from, so the checked adds below cannot fail
        // while that bound holds.
        let mut credits: HashMap<Address, Amount> = HashMap::new();
        let mut credit = |who: Address, amount: Amount| -> Result<(), LedgerError> {
            if amount == 0 {
                return Ok(());
            }
            let base = match credits.get(&who) {
                Some(staged) => *staged,
                None => self.balance_of(&who),
            };
            let updated = base
                .checked_add(amount)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            credits.insert(who, updated);
            Ok(())
        };
        for payout in &payouts {
            credit(payout.voter, payout.amount)?;
        }
        if self.remainder_policy == RemainderPolicy::ReturnToAdministrator {
            credit(self.administrator, remainder)?;
        }

        let (pool_after, total_held) = match self.remainder_policy {
            RemainderPolicy::CarryForward => (remainder, self.total_held),
            RemainderPolicy::Burn => (
                0,
                self.total_held
                    .checked_sub(remainder)
                    .ok_or(LedgerError::ArithmeticOverflow)?,
            ),
            RemainderPolicy::ReturnToAdministrator => (0, self.total_held),
        };

        let paid = self.voters_of(&winner).len();
        self.balances.extend(credits);
        self.settled.insert(winner, paid);
        self.pools.insert(winner, pool_after);
        self.total_held = total_held;

        Ok(Settlement {
            id: SettlementId::new(),
            winner,
            pool,
            total_votes,
            payouts,
            remainder,
            remainder_policy: self.remainder_policy,
        })
    }

    /// Releases the whole balance of `identity` and zeroes it.
    ///
    /// Returns the amount released. Moving the funds out is the host's job.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] if the balance is zero
    /// or absent.
    pub fn withdraw(&mut self, identity: &Address) -> Result<Amount, LedgerError> {
        let amount = self.balance_of(identity);
        if amount == 0 {
            return Err(LedgerError::InsufficientBalance);
        }
        let total_held = self
            .total_held
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.balances.remove(identity);
        self.total_held = total_held;
        Ok(amount)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const ETHER: Amount = 1_000_000_000_000_000_000;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    fn owner() -> Address {
        addr(0xA0)
    }

    fn make_ledger() -> PoolLedger {
        PoolLedger::new(owner(), RemainderPolicy::default())
    }

    fn ledger_with(policy: RemainderPolicy) -> PoolLedger {
        PoolLedger::new(owner(), policy)
    }

    #[test]
    fn entrance_fee_starts_at_zero() {
        assert_eq!(make_ledger().entrance_fee(), 0);
    }

    #[test]
    fn administrator_updates_entrance_fee() {
        let mut ledger = make_ledger();
        assert!(ledger.set_entrance_fee(&owner(), 2 * ETHER).is_ok());
        assert_eq!(ledger.entrance_fee(), 2 * ETHER);

        assert!(ledger.set_entrance_fee(&owner(), 0).is_ok());
        assert_eq!(ledger.entrance_fee(), 0);
    }

    #[test]
    fn non_administrator_cannot_set_fee() {
        let mut ledger = make_ledger();
        let result = ledger.set_entrance_fee(&addr(1), 5);
        assert_eq!(result, Err(LedgerError::Unauthorized));
        assert_eq!(ledger.entrance_fee(), 0);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut ledger = make_ledger();
        let result = ledger.add_participant(addr(1), "");
        assert_eq!(result, Err(LedgerError::InvalidArgument));
        assert!(ledger.participant(&addr(1)).is_none());
    }

    #[test]
    fn added_participant_has_name_and_no_votes() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());

        let Some(participant) = ledger.participant(&addr(1)) else {
            panic!("participant should exist");
        };
        assert_eq!(participant.name, "Bituca");
        assert_eq!(participant.number_of_votes, 0);
    }

    #[test]
    fn re_registration_is_rejected_and_keeps_original() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        assert_eq!(
            ledger.add_participant(addr(1), "Richard"),
            Err(LedgerError::AlreadyExists)
        );
        assert_eq!(
            ledger.participant(&addr(1)).map(|p| p.name.as_str()),
            Some("Bituca")
        );
    }

    #[test]
    fn vote_below_fee_is_rejected_before_existence_check() {
        let mut ledger = make_ledger();
        assert!(ledger.set_entrance_fee(&owner(), 2 * ETHER).is_ok());
        // No participant registered: the fee failure must still win.
        assert_eq!(
            ledger.add_vote(owner(), addr(1), 0),
            Err(LedgerError::InsufficientFee)
        );
    }

    #[test]
    fn vote_on_unknown_participant_is_rejected() {
        let mut ledger = make_ledger();
        assert!(ledger.set_entrance_fee(&owner(), 2 * ETHER).is_ok());
        assert_eq!(
            ledger.add_vote(owner(), addr(1), 2 * ETHER),
            Err(LedgerError::NotFound)
        );
        assert_eq!(ledger.total_held(), 0);
    }

    #[test]
    fn vote_increments_count_pool_and_record() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        let Ok(record) = ledger.add_vote(owner(), addr(1), 2 * ETHER) else {
            panic!("vote should succeed");
        };
        assert_eq!(record.count, 1);
        assert_eq!(record.value, 2 * ETHER);
        assert_eq!(ledger.participant(&addr(1)).map(|p| p.number_of_votes), Some(1));
        assert_eq!(ledger.pool_of(&addr(1)), 2 * ETHER);
        assert_eq!(ledger.voters_of(&addr(1)), &[owner()]);
        assert_eq!(ledger.total_held(), 2 * ETHER);
    }

    #[test]
    fn duplicate_vote_is_rejected_without_side_effects() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Richard").is_ok());
        assert!(ledger.add_vote(owner(), addr(1), 2 * ETHER).is_ok());

        assert_eq!(
            ledger.add_vote(owner(), addr(1), 2 * ETHER),
            Err(LedgerError::DuplicateVote)
        );
        assert_eq!(ledger.participant(&addr(1)).map(|p| p.number_of_votes), Some(1));
        assert_eq!(ledger.pool_of(&addr(1)), 2 * ETHER);
    }

    #[test]
    fn same_voter_may_vote_for_different_participants() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        assert!(ledger.add_participant(addr(2), "Richard").is_ok());
        assert!(ledger.add_vote(owner(), addr(1), 1).is_ok());
        assert!(ledger.add_vote(owner(), addr(2), 1).is_ok());
        assert_eq!(ledger.total_held(), 2);
    }

    #[test]
    fn settling_unknown_winner_is_rejected() {
        let mut ledger = make_ledger();
        assert_eq!(ledger.end_of_bola1(addr(1)), Err(LedgerError::NotFound));
    }

    #[test]
    fn single_voter_receives_entire_pool() {
        let mut ledger = make_ledger();
        assert!(ledger.set_entrance_fee(&owner(), 2 * ETHER).is_ok());
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        assert!(ledger.add_vote(owner(), addr(1), 2 * ETHER).is_ok());

        let Ok(settlement) = ledger.end_of_bola1(addr(1)) else {
            panic!("settlement should succeed");
        };
        assert_eq!(settlement.pool, 2 * ETHER);
        assert_eq!(settlement.remainder, 0);
        assert_eq!(ledger.balance_of(&owner()), 2 * ETHER);
        assert_eq!(ledger.pool_of(&addr(1)), 0);
    }

    #[test]
    fn prize_splits_between_voters() {
        let mut ledger = make_ledger();
        let bituca = addr(1);
        assert!(ledger.set_entrance_fee(&owner(), 2 * ETHER).is_ok());
        assert!(ledger.add_participant(bituca, "Bituca").is_ok());
        assert!(ledger.add_vote(owner(), bituca, 2 * ETHER).is_ok());
        assert!(ledger.add_vote(bituca, bituca, 2 * ETHER).is_ok());
        assert_eq!(ledger.participant(&bituca).map(|p| p.number_of_votes), Some(2));

        assert!(ledger.end_of_bola1(bituca).is_ok());
        assert_eq!(ledger.balance_of(&owner()), 2 * ETHER);
        assert_eq!(ledger.balance_of(&bituca), 2 * ETHER);
        assert_eq!(ledger.total_held(), 4 * ETHER);
    }

    #[test]
    fn second_settlement_pays_nothing_more() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        assert!(ledger.add_vote(addr(2), addr(1), 10).is_ok());
        assert!(ledger.end_of_bola1(addr(1)).is_ok());

        let Ok(again) = ledger.end_of_bola1(addr(1)) else {
            panic!("repeat settlement should succeed");
        };
        assert_eq!(again.pool, 0);
        assert_eq!(ledger.balance_of(&addr(2)), 10);
    }

    #[test]
    fn votes_after_settlement_pay_only_later_voters() {
        let mut ledger = make_ledger();
        let bituca = addr(1);
        assert!(ledger.add_participant(bituca, "Bituca").is_ok());
        assert!(ledger.add_vote(addr(2), bituca, 2).is_ok());
        assert!(ledger.end_of_bola1(bituca).is_ok());
        assert!(ledger.unsettled_voters_of(&bituca).is_empty());

        assert!(ledger.add_vote(addr(3), bituca, 2).is_ok());
        assert_eq!(ledger.unsettled_voters_of(&bituca), &[addr(3)]);
        let Ok(second) = ledger.end_of_bola1(bituca) else {
            panic!("second settlement should succeed");
        };
        assert_eq!(second.pool, 2);
        assert_eq!(second.total_votes, 1);
        assert_eq!(second.payouts, vec![Payout { voter: addr(3), amount: 2 }]);
        assert_eq!(second.remainder, 0);

        assert_eq!(ledger.balance_of(&addr(2)), 2);
        assert_eq!(ledger.balance_of(&addr(3)), 2);
        assert_eq!(ledger.balance_of(&owner()), 0);
        assert_eq!(ledger.participant(&bituca).map(|p| p.number_of_votes), Some(2));
        assert_eq!(ledger.total_held(), 4);
    }

    #[test]
    fn carried_remainder_goes_to_next_round() {
        let (mut ledger, _) = three_voters_with_remainder(RemainderPolicy::CarryForward);
        assert!(ledger.add_vote(addr(5), addr(1), 5).is_ok());
        let Ok(next) = ledger.end_of_bola1(addr(1)) else {
            panic!("settlement should succeed");
        };
        assert_eq!(next.pool, 6);
        assert_eq!(next.payouts, vec![Payout { voter: addr(5), amount: 6 }]);
        assert_eq!(ledger.balance_of(&addr(2)), 3);
        assert_eq!(ledger.pool_of(&addr(1)), 0);
    }

    #[test]
    fn credits_up_to_the_held_total_do_not_overflow() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        assert!(ledger.add_participant(addr(5), "Richard").is_ok());
        assert!(ledger.add_vote(addr(2), addr(1), Amount::MAX / 2 + 1).is_ok());
        assert!(ledger.add_vote(addr(2), addr(5), Amount::MAX / 2).is_ok());
        assert_eq!(ledger.total_held(), Amount::MAX);

        assert!(ledger.end_of_bola1(addr(1)).is_ok());
        assert!(ledger.end_of_bola1(addr(5)).is_ok());
        assert_eq!(ledger.balance_of(&addr(2)), Amount::MAX);
        assert_eq!(ledger.total_held(), Amount::MAX);
    }

    #[test]
    fn held_total_matches_pools_and_balances() {
        for policy in [
            RemainderPolicy::ReturnToAdministrator,
            RemainderPolicy::Burn,
            RemainderPolicy::CarryForward,
        ] {
            let mut ledger = ledger_with(policy);
            assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
            assert!(ledger.add_participant(addr(5), "Richard").is_ok());
            assert!(ledger.add_vote(addr(2), addr(1), 7).is_ok());
            assert!(ledger.add_vote(addr(3), addr(1), 4).is_ok());
            assert!(ledger.add_vote(addr(4), addr(1), 9).is_ok());
            assert!(ledger.add_vote(addr(2), addr(5), 5).is_ok());
            assert!(ledger.end_of_bola1(addr(1)).is_ok());
            assert!(ledger.add_vote(addr(6), addr(1), 8).is_ok());
            assert!(ledger.withdraw(&addr(3)).is_ok());
            assert!(ledger.end_of_bola1(addr(1)).is_ok());
            assert!(ledger.end_of_bola1(addr(1)).is_ok());

            let pools = ledger.pool_of(&addr(1)) + ledger.pool_of(&addr(5));
            let balances: Amount = ledger.balances().map(|(_, amount)| *amount).sum();
            assert_eq!(ledger.total_held(), pools + balances, "{policy}");
        }
    }

    #[test]
    fn winner_without_votes_settles_empty() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        let Ok(settlement) = ledger.end_of_bola1(addr(1)) else {
            panic!("settlement should succeed");
        };
        assert!(settlement.payouts.is_empty());
        assert_eq!(settlement.total_votes, 0);
        assert_eq!(ledger.balance_of(&owner()), 0);
    }

    fn three_voters_with_remainder(policy: RemainderPolicy) -> (PoolLedger, Settlement) {
        let mut ledger = ledger_with(policy);
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        assert!(ledger.add_vote(addr(2), addr(1), 3).is_ok());
        assert!(ledger.add_vote(addr(3), addr(1), 3).is_ok());
        assert!(ledger.add_vote(addr(4), addr(1), 4).is_ok());
        let Ok(settlement) = ledger.end_of_bola1(addr(1)) else {
            panic!("settlement should succeed");
        };
        (ledger, settlement)
    }

    #[test]
    fn remainder_returns_to_administrator() {
        let (ledger, settlement) =
            three_voters_with_remainder(RemainderPolicy::ReturnToAdministrator);
        // pool 10 over 3 votes: 3 each, 1 left over
        assert_eq!(settlement.remainder, 1);
        assert_eq!(ledger.balance_of(&addr(2)), 3);
        assert_eq!(ledger.balance_of(&addr(4)), 3);
        assert_eq!(ledger.balance_of(&owner()), 1);
        assert_eq!(ledger.pool_of(&addr(1)), 0);
        assert_eq!(ledger.total_held(), 10);
    }

    #[test]
    fn remainder_burn_reduces_held_funds() {
        let (ledger, settlement) = three_voters_with_remainder(RemainderPolicy::Burn);
        assert_eq!(settlement.distributed(), 9);
        assert_eq!(ledger.balance_of(&owner()), 0);
        assert_eq!(ledger.pool_of(&addr(1)), 0);
        assert_eq!(ledger.total_held(), 9);
    }

    #[test]
    fn remainder_carries_forward_into_pool() {
        let (ledger, _) = three_voters_with_remainder(RemainderPolicy::CarryForward);
        assert_eq!(ledger.pool_of(&addr(1)), 1);
        assert_eq!(ledger.balance_of(&owner()), 0);
        assert_eq!(ledger.total_held(), 10);
    }

    #[test]
    fn overflowing_pool_leaves_state_untouched() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        assert!(ledger.add_vote(addr(2), addr(1), Amount::MAX / 2 + 1).is_ok());
        assert!(ledger.add_vote(addr(3), addr(1), Amount::MAX / 2).is_ok());
        assert_eq!(ledger.pool_of(&addr(1)), Amount::MAX);

        let before = ledger.total_held();
        assert_eq!(
            ledger.add_vote(addr(4), addr(1), 1),
            Err(LedgerError::ArithmeticOverflow)
        );
        assert_eq!(ledger.total_held(), before);
        assert_eq!(ledger.participant(&addr(1)).map(|p| p.number_of_votes), Some(2));
    }

    #[test]
    fn withdraw_releases_and_zeroes_balance() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        assert!(ledger.add_vote(addr(2), addr(1), 7).is_ok());
        assert!(ledger.end_of_bola1(addr(1)).is_ok());

        assert_eq!(ledger.withdraw(&addr(2)), Ok(7));
        assert_eq!(ledger.balance_of(&addr(2)), 0);
        assert_eq!(ledger.total_held(), 0);
        assert_eq!(
            ledger.withdraw(&addr(2)),
            Err(LedgerError::InsufficientBalance)
        );
    }

    #[test]
    fn withdraw_without_balance_is_rejected() {
        let mut ledger = make_ledger();
        assert_eq!(
            ledger.withdraw(&addr(9)),
            Err(LedgerError::InsufficientBalance)
        );
    }

    #[test]
    fn balances_accumulate_across_settlements() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        assert!(ledger.add_participant(addr(5), "Richard").is_ok());
        assert!(ledger.add_vote(addr(2), addr(1), 4).is_ok());
        assert!(ledger.add_vote(addr(2), addr(5), 6).is_ok());
        assert!(ledger.end_of_bola1(addr(1)).is_ok());
        assert!(ledger.end_of_bola1(addr(5)).is_ok());
        assert_eq!(ledger.balance_of(&addr(2)), 10);
    }

    #[test]
    fn reads_do_not_mutate() {
        let mut ledger = make_ledger();
        assert!(ledger.add_participant(addr(1), "Bituca").is_ok());
        assert!(ledger.add_vote(addr(2), addr(1), 3).is_ok());
        let before = format!("{ledger:?}");

        let _ = ledger.entrance_fee();
        let _ = ledger.participant(&addr(1));
        let _ = ledger.balance_of(&addr(2));
        let _ = ledger.pool_of(&addr(1));
        let _ = ledger.vote_record(&addr(1), &addr(2));

        assert_eq!(format!("{ledger:?}"), before);
    }
}
