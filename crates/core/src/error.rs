//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// lookups, stock shortfalls, lifecycle violations). Infrastructure concerns
/// belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An entity with the same identity is already registered.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// A purchase asked for more units than a product has in stock.
    #[error(
        "insufficient stock for {product}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// The operation is not allowed in the entity's current lifecycle state.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::AlreadyExists(what.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn insufficient_stock(product: impl Into<String>, available: i64, requested: i64) -> Self {
        Self::InsufficientStock {
            product: product.into(),
            available,
            requested,
        }
    }
}
