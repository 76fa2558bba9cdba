//! Domain error taxonomy.
//!
//! Every service operation fails with exactly one `DomainError` kind. The HTTP
//! adapter maps each kind to its own status and error code.

use thiserror::Error;

/// Failures raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness rule (active participation, pending invitation) was violated.
    #[error("Conflicting record: {0}")]
    Conflict(String),

    /// The backend failed (connection, query, decoding).
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Errors returned by domain services.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("The match is full")]
    MatchFull,

    #[error("This match is private and requires a password")]
    MissingCredential,

    #[error("Incorrect password")]
    InvalidCredential,

    #[error("Capacity cannot be lower than the number of confirmed players ({confirmed})")]
    InvalidCapacity { confirmed: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn not_found(what: &str) -> Self {
        DomainError::NotFound(format!("{what} not found"))
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        DomainError::InvalidState(message.into())
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        DomainError::PermissionDenied(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("Match");
        assert_eq!(err.to_string(), "Match not found");
    }

    #[test]
    fn test_invalid_capacity_mentions_confirmed() {
        let err = DomainError::InvalidCapacity { confirmed: 7 };
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_store_error_converts() {
        let err: DomainError = StoreError::Conflict("duplicate".into()).into();
        assert!(matches!(err, DomainError::Store(StoreError::Conflict(_))));
    }
}
