//! Ledger error types with stable numeric codes.
//!
//! [`LedgerError`] is the central error type of the crate. The `Display`
//! output of every variant is the exact reason string callers observe, so
//! the messages below are part of the external contract and must not be
//! reworded.

use serde::Serialize;

/// Structured JSON error payload written by the host loop.
///
/// ```json
/// { "code": 2001, "message": "Participant not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Numeric error code (see [`LedgerError::error_code`]).
    pub code: u32,
    /// Human-readable reason string.
    pub message: String,
}

/// Every way a ledger operation can be rejected.
///
/// A failed operation never leaves partial effects behind.
///
/// # Error Code Ranges
///
/// | Range     | Category      |
/// |-----------|---------------|
/// | 1000–1999 | Validation    |
/// | 2000–2999 | State         |
/// | 3000–3999 | Internal      |
/// | 4000–4999 | Authorization |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A participant was registered with an empty name.
    #[error("Name is required")]
    InvalidArgument,

    /// The value sent with a vote is below the entrance fee.
    #[error("Insufficient entrance fee")]
    InsufficientFee,

    /// No participant is registered under the given identity.
    #[error("Participant not found")]
    NotFound,

    /// The caller already voted for this participant.
    #[error("Duplicated vote")]
    DuplicateVote,

    /// A participant is already registered under the given identity.
    #[error("Participant already exists")]
    AlreadyExists,

    /// Withdrawal requested with a zero or absent balance.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// The caller is not the ledger administrator.
    #[error("Caller is not the administrator")]
    Unauthorized,

    /// An amount computation exceeded the range of `u128`.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

impl LedgerError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidArgument => 1001,
            Self::InsufficientFee => 1002,
            Self::NotFound => 2001,
            Self::AlreadyExists => 2002,
            Self::DuplicateVote => 2003,
            Self::InsufficientBalance => 2004,
            Self::ArithmeticOverflow => 3001,
            Self::Unauthorized => 4001,
        }
    }

    /// Builds the serializable payload for this error.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code(),
            message: self.to_string(),
        }
    }
}

impl From<LedgerError> for ErrorResponse {
    fn from(err: LedgerError) -> Self {
        err.to_response()
    }
}
