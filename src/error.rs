//! Error types shared across the crate

use thiserror::Error;

/// Errors raised at the engine and data-loading boundaries
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A date string could not be parsed. `context` names the transaction id
    /// or profile field that carried the bad value.
    #[error("unparseable date {value:?} in {context}")]
    DateParse { context: String, value: String },

    /// A transaction carried a non-positive or non-finite amount.
    #[error("transaction {id}: amount must be positive, got {amount}")]
    InvalidAmount { id: String, amount: f64 },

    /// The profile is inconsistent (e.g. end date before joining date).
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// A transaction record carried a type tag outside the closed set.
    #[error("transaction {id}: unknown transaction type {value:?}")]
    UnknownTransactionType { id: String, value: String },

    /// An interest-rate table key was not a financial-year start year.
    #[error("interest rate table: invalid financial year key {0:?}")]
    InvalidRateKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
