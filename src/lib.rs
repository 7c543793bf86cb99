//! # bola-ledger
//!
//! Pooled-stake voting ledger. Voters pay an entrance fee to vote for a
//! registered participant; when a winner is declared, the value cast for
//! that participant is split among its voters in proportion to their votes
//! and credited to withdrawable balances.
//!
//! ## Architecture
//!
//! ```text
//! stdin (JSON lines)
//!     │
//!     ├── Host dispatch (host/)
//!     │
//!     ├── LedgerService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     └── PoolLedger (domain/)
//! ```
//!
//! ## Example
//!
//! ```
//! use bola_ledger::domain::{Address, PoolLedger, RemainderPolicy};
//!
//! let owner = Address::from_bytes([0xA0; 20]);
//! let bituca = Address::from_bytes([0x01; 20]);
//!
//! let mut ledger = PoolLedger::new(owner, RemainderPolicy::default());
//! ledger.set_entrance_fee(&owner, 2)?;
//! ledger.add_participant(bituca, "Bituca")?;
//! ledger.add_vote(owner, bituca, 2)?;
//! ledger.end_of_bola1(bituca)?;
//!
//! assert_eq!(ledger.balance_of(&owner), 2);
//! # Ok::<(), bola_ledger::error::LedgerError>(())
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod host;
pub mod service;
