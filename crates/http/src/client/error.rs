//! Client error types

use crate::storage::StorageError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Input rejected before anything was sent
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Token persistence failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The session was torn down; the caller should send the operator to
    /// the login view. `source` is the 401 that could not be recovered, or
    /// the error returned by the refresh call.
    #[error("Session expired: {source}")]
    Unauthenticated {
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Wrap the failure that ended the session
    pub fn unauthenticated(source: Self) -> Self {
        Self::Unauthenticated {
            source: Box::new(source),
        }
    }

    /// Whether the session is gone and the operator must log in again
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }

    /// Whether this is a 401, recovered from or not
    pub fn is_auth_expired(&self) -> bool {
        match self {
            Self::AuthenticationFailed(_) | Self::Unauthenticated { .. } => true,
            Self::Request(e) => e.status() == Some(reqwest::StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Unauthenticated { source } => source.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        let error = ClientError::from_status(reqwest::StatusCode::UNAUTHORIZED, "expired".into());
        assert!(matches!(error, ClientError::AuthenticationFailed(ref m) if m == "expired"));
        assert!(error.is_auth_expired());
        assert!(!error.is_unauthenticated());

        let error = ClientError::from_status(reqwest::StatusCode::BAD_GATEWAY, "down".into());
        assert_eq!(error.status(), Some(502));
        assert!(!error.is_auth_expired());
    }

    #[test]
    fn test_unauthenticated_keeps_cause() {
        let error = ClientError::unauthenticated(ClientError::AuthenticationFailed(
            "Token Expired!".into(),
        ));
        assert!(error.is_unauthenticated());
        assert_eq!(error.status(), Some(401));
        assert_eq!(
            error.to_string(),
            "Session expired: Authentication failed: Token Expired!"
        );
    }
}
