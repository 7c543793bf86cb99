//! Domain layer: identities, amounts, the pool ledger and its events.
//!
//! [`PoolLedger`] holds all ledger state and implements every operation
//! synchronously. The remaining types describe what it stores and what it
//! reports.

pub mod address;
pub mod amount;
pub mod event_bus;
pub mod ledger;
pub mod ledger_event;
pub mod participant;
pub mod settlement;
pub mod settlement_id;
pub mod snapshot;

pub use address::Address;
pub use amount::Amount;
pub use event_bus::{EventBus, MAX_EVENT_BUS_CAPACITY, Watch};
pub use ledger::PoolLedger;
pub use ledger_event::LedgerEvent;
pub use participant::{Participant, VoteRecord};
pub use settlement::{Payout, RemainderPolicy, Settlement};
pub use settlement_id::SettlementId;
pub use snapshot::LedgerSnapshot;
