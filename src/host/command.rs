//! Host protocol message types: commands in, responses out.
//!
//! One JSON object per line in each direction. Amounts travel as decimal
//! strings.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount};
use crate::error::ErrorResponse;

/// Error code for lines that do not parse as a [`LedgerCommand`].
pub const MALFORMED_COMMAND: u32 = 1000;

/// Error code for results that fail to serialize.
pub const INTERNAL_ERROR: u32 = 3000;

/// Commands the host loop accepts, tagged by `"op"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerCommand {
    /// Change the entrance fee.
    SetEntranceFee {
        /// Identity issuing the change.
        caller: Address,
        /// New fee.
        #[serde(with = "crate::domain::amount")]
        amount: Amount,
    },
    /// Register a participant.
    AddParticipant {
        /// Participant identity.
        participant: Address,
        /// Participant name.
        name: String,
    },
    /// Cast a vote carrying `value`.
    AddVote {
        /// Voter identity.
        voter: Address,
        /// Participant voted for.
        participant: Address,
        /// Value sent with the vote.
        #[serde(with = "crate::domain::amount")]
        value: Amount,
    },
    /// Settle a winner's pool.
    #[serde(rename = "end_of_bola1")]
    EndOfBola1 {
        /// Winning participant.
        winner: Address,
    },
    /// Withdraw an account's balance.
    Withdraw {
        /// Account to release.
        account: Address,
    },
    /// Read the entrance fee.
    EntranceFee,
    /// Read a participant.
    Participant {
        /// Participant identity.
        participant: Address,
    },
    /// Read an account balance.
    Balance {
        /// Account to read.
        account: Address,
    },
    /// Read a participant's escrowed pool.
    Pool {
        /// Participant identity.
        participant: Address,
    },
    /// Read the whole ledger.
    Snapshot,
}

/// Response line written for every command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResponse {
    /// Whether the command succeeded.
    pub ok: bool,
    /// Result payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error payload on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl CommandResponse {
    /// Builds a success response.
    #[must_use]
    pub fn success(result: serde_json::Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    /// Builds a failure response.
    #[must_use]
    pub fn failure(error: ErrorResponse) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

/// Parses one input line into a command.
///
/// # Errors
///
/// Returns an [`ErrorResponse`] with code [`MALFORMED_COMMAND`] if the line
/// is not a valid command.
pub fn parse_command(line: &str) -> Result<LedgerCommand, ErrorResponse> {
    serde_json::from_str(line).map_err(|e| ErrorResponse {
        code: MALFORMED_COMMAND,
        message: format!("malformed command: {e}"),
    })
}
