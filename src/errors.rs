//! Unified error types for the billing core.
//!
//! `Error::DataAccess` wraps every failure of the external data store and is
//! always surfaced to the caller - an empty result set is never substituted for
//! a failed query, so a database outage can't masquerade as "no purchases".
//! Validation variants are produced before any remote call is made.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error type covering data access, validation, and configuration failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file missing, unreadable, or malformed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// The external data store failed or returned an error payload
    #[error("Data access error: {0}")]
    DataAccess(#[from] sea_orm::DbErr),

    /// I/O error (configuration loading)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Referenced card does not exist or is not usable for the operation
    #[error("Card not found: {id}")]
    CardNotFound {
        /// The card id that failed to resolve
        id: i64,
    },

    /// Referenced installment does not exist
    #[error("Installment not found: {id}")]
    InstallmentNotFound {
        /// The installment id that failed to resolve
        id: i64,
    },

    /// Purchase amount must be strictly positive
    #[error("Invalid purchase amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Installment count outside the supported 1..=36 range
    #[error("Invalid installment count: {count} (must be between 1 and 36)")]
    InvalidInstallmentCount {
        /// The rejected count
        count: i32,
    },

    /// Card reference must be a positive id
    #[error("Invalid card reference: {card_id}")]
    InvalidCardReference {
        /// The rejected card id
        card_id: i64,
    },

    /// Projection horizon must be a non-negative number of months
    #[error("Invalid projection horizon: {horizon} (must be non-negative)")]
    InvalidHorizon {
        /// The rejected horizon
        horizon: i32,
    },
}

// Convenience `Result` type
/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
