//! Service layer: operation serialization and event emission.
//!
//! [`LedgerService`] guards the [`super::domain::PoolLedger`] with a single
//! lock and publishes a [`super::domain::LedgerEvent`] for every successful
//! mutation.

pub mod ledger_service;

pub use ledger_service::LedgerService;
