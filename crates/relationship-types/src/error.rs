//! Error types for the relationship chaincode.
//!
//! All errors use the `RS_ERR_` prefix convention for easy grepping in peer
//! logs. Error codes are grouped by class:
//! - 1xx: Caller errors (rejected before any state access)
//! - 2xx: State store errors
//! - 3xx: Cross-contract dependency errors
//! - 4xx: Ledger data inconsistencies
//! - 5xx: Identity errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::constants;

/// Central error enum for all chaincode operations.
///
/// Every variant rejects the whole transaction. Nothing is retried
/// internally.
#[derive(Debug, Error)]
pub enum RelationshipError {
    // =================================================================
    // Caller Errors (1xx)
    // =================================================================
    /// Wrong arity, unknown function, unknown side, or a field the
    /// composite key cannot carry.
    #[error("RS_ERR_100: Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // =================================================================
    // State Store Errors (2xx)
    // =================================================================
    /// A state read, write or range scan failed. The message from the
    /// store is carried verbatim.
    #[error("RS_ERR_200: State store error: {0}")]
    Storage(String),

    // =================================================================
    // Dependency Errors (3xx)
    // =================================================================
    /// The reference contract call failed or returned a non-success status.
    #[error("RS_ERR_300: Dependency error: {reason}")]
    Dependency { reason: String },

    // =================================================================
    // Ledger Data Errors (4xx)
    // =================================================================
    /// A stored key does not decode into the expected namespace and arity.
    #[error("RS_ERR_400: Malformed key: {reason}")]
    MalformedKey { reason: String },

    /// A stored value is not a recognised order status.
    #[error("RS_ERR_401: Malformed value: {reason}")]
    MalformedValue { reason: String },

    // =================================================================
    // Identity Errors (5xx)
    // =================================================================
    /// The caller's identity blob could not be turned into an organization.
    #[error("RS_ERR_500: Identity parse error: {reason}")]
    IdentityParse { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("RS_ERR_900: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, bad namespace, etc.).
    #[error("RS_ERR_901: Configuration error: {0}")]
    Configuration(String),
}

impl RelationshipError {
    /// Shorthand for [`RelationshipError::InvalidArgument`].
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`RelationshipError::Dependency`].
    pub fn dependency(reason: impl Into<String>) -> Self {
        Self::Dependency {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`RelationshipError::MalformedKey`].
    pub fn malformed_key(reason: impl Into<String>) -> Self {
        Self::MalformedKey {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`RelationshipError::IdentityParse`].
    pub fn identity(reason: impl Into<String>) -> Self {
        Self::IdentityParse {
            reason: reason.into(),
        }
    }

    /// Peer response status for this error.
    #[must_use]
    pub fn status(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => constants::STATUS_BAD_REQUEST,
            Self::Storage(_)
            | Self::Dependency { .. }
            | Self::MalformedKey { .. }
            | Self::MalformedValue { .. }
            | Self::IdentityParse { .. }
            | Self::Serialization(_)
            | Self::Configuration(_) => constants::STATUS_ERROR,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, RelationshipError>;

impl From<serde_json::Error> for RelationshipError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_is_bad_request() {
        let err = RelationshipError::invalid_argument("incorrect number of arguments");
        assert_eq!(err.status(), 400);
        let msg = format!("{err}");
        assert!(msg.starts_with("RS_ERR_100"), "Got: {msg}");
        assert!(msg.contains("incorrect number of arguments"));
    }

    #[test]
    fn storage_message_is_verbatim() {
        let err = RelationshipError::Storage("disk on fire".into());
        assert_eq!(err.status(), 500);
        assert!(format!("{err}").ends_with("disk on fire"));
    }

    #[test]
    fn all_errors_have_rs_err_prefix() {
        let errors: Vec<RelationshipError> = vec![
            RelationshipError::invalid_argument("x"),
            RelationshipError::Storage("x".into()),
            RelationshipError::dependency("x"),
            RelationshipError::malformed_key("x"),
            RelationshipError::MalformedValue { reason: "x".into() },
            RelationshipError::identity("x"),
            RelationshipError::Serialization("x".into()),
            RelationshipError::Configuration("x".into()),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("RS_ERR_"),
                "Error missing RS_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn serde_json_error_converts() {
        let err: RelationshipError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, RelationshipError::Serialization(_)));
    }
}
