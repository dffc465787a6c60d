//! Peer-style invocation response.

use serde::{Deserialize, Serialize};

use crate::{RelationshipError, constants};

/// Uniform result of every invocation: a status code, a caller-visible
/// message on failure and a payload on success. There is no partial
/// success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: i32,
    pub message: String,
    pub payload: Vec<u8>,
}

impl Response {
    #[must_use]
    pub fn success(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status: constants::STATUS_OK,
            message: String::new(),
            payload: payload.into(),
        }
    }

    #[must_use]
    pub fn error(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == constants::STATUS_OK
    }

    /// Payload as UTF-8 text, lossily.
    #[must_use]
    pub fn payload_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

impl From<RelationshipError> for Response {
    fn from(err: RelationshipError) -> Self {
        Self::error(err.status(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_carries_payload() {
        let resp = Response::success(&b"initiated"[..]);
        assert!(resp.is_ok());
        assert_eq!(resp.payload_str(), "initiated");
        assert!(resp.message.is_empty());
    }

    #[test]
    fn error_from_relationship_error() {
        let resp = Response::from(RelationshipError::invalid_argument("incorrect number of arguments"));
        assert!(!resp.is_ok());
        assert_eq!(resp.status, 400);
        assert!(resp.payload.is_empty());
        assert!(resp.message.contains("incorrect number of arguments"));
    }
}
