//! Crate-wide error types.

use thiserror::Error;

/// Domain-level error taxonomy.
///
/// Every variant is an ordinary operation outcome: the facility stays valid
/// and queryable after any of them, and a failed operation has not mutated
/// anything.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An identifier the caller supplied does not resolve (unknown gate,
    /// no active ticket for a vehicle, unknown slot).
    #[error("{entity} not found: {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// The operation conflicts with current state, e.g. the vehicle already
    /// holds an active ticket.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No compatible slot exists for the request right now.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The payment step declined the bill.
    #[error("payment failed: {0}")]
    PaymentFailed(String),

    /// Internal consistency violation; never a caller error.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised while loading or validating a facility configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
