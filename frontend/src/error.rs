//! Failure model for the API layer.
//!
//! Every call resolves to [`ApiResult`]. Validation failures never show up
//! here: forms reject locally before a request is ever built.

use std::fmt;

/// Failure of a single API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure; no HTTP status was received.
    Network,
    /// The server rejected the stored token (401/403). The session store
    /// has already been cleared by the time this is returned.
    AuthExpired,
    /// Any other non-2xx status, with the message extracted from the body.
    Server { status: u16, message: String },
    /// A 2xx response whose body could not be decoded as the expected type.
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network => f.write_str("Network error. Please check your connection."),
            ApiError::AuthExpired => f.write_str("Session expired. Please login again."),
            ApiError::Server { message, .. } => f.write_str(message),
            ApiError::Decode(detail) => write!(f, "Unexpected response from server: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failure_has_the_fixed_message() {
        assert_eq!(
            ApiError::Network.to_string(),
            "Network error. Please check your connection."
        );
    }

    #[test]
    fn auth_expiry_has_the_fixed_message() {
        assert_eq!(
            ApiError::AuthExpired.to_string(),
            "Session expired. Please login again."
        );
    }

    #[test]
    fn server_errors_surface_the_extracted_message_verbatim() {
        let err = ApiError::Server {
            status: 409,
            message: "Sweet already exists".into(),
        };
        assert_eq!(err.to_string(), "Sweet already exists");
    }
}
