//! Purchase error model.

use thiserror::Error;

/// Result type used across the purchasing layer.
pub type PurchaseResult<T> = Result<T, PurchaseError>;

/// Reason a purchase was rejected by the eligibility rules.
///
/// Every variant is reported as the same kind of failure ("invalid purchase");
/// the variant only selects the human-readable reason shown to the caller.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InvalidPurchase {
    /// The account identifier is not strictly positive.
    #[error("Account ID is invalid.")]
    InvalidAccount,

    /// The aggregated ticket total is zero or above the per-purchase maximum.
    #[error("Number of tickets purchased is invalid.")]
    InvalidTicketCount,

    /// Tickets were requested but none of them is an adult ticket.
    #[error("No adult tickets purchased.")]
    NoAdultTicket,

    /// More infant tickets than adult tickets were requested.
    #[error("1 adult ticket must be purchased for every infant ticket purchased.")]
    TooManyInfants,
}

/// Failure of a purchase call.
///
/// Rule violations abort before any collaborator is invoked. Collaborator
/// failures are carried through as text, without retry or compensation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// The request violated a purchase-eligibility rule.
    #[error("invalid purchase: {0}")]
    InvalidPurchase(#[from] InvalidPurchase),

    /// The payment collaborator reported a failure.
    #[error("payment failed: {0}")]
    Payment(String),

    /// The seat reservation collaborator reported a failure.
    #[error("seat reservation failed: {0}")]
    Reservation(String),
}

impl PurchaseError {
    pub fn payment(msg: impl Into<String>) -> Self {
        Self::Payment(msg.into())
    }

    pub fn reservation(msg: impl Into<String>) -> Self {
        Self::Reservation(msg.into())
    }

    /// The rejected rule, if this error came from validation.
    pub fn rejection(&self) -> Option<InvalidPurchase> {
        match self {
            Self::InvalidPurchase(reason) => Some(*reason),
            _ => None,
        }
    }
}
