//! Host protocol: JSON-line commands driving a [`crate::service::LedgerService`].
//!
//! The binary reads commands from stdin and writes one response per line to
//! stdout. This is a local harness for whatever environment hosts the
//! ledger, not a network transport.

pub mod command;
pub mod dispatch;

pub use command::{CommandResponse, LedgerCommand};
pub use dispatch::{dispatch, handle_line};
