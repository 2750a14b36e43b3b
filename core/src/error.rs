//! Error types for the fixture API client.
//!
//! # Design
//! The split that matters to callers is whether a response came back at all.
//! `Network` means nothing was received (connect, DNS, timeout); `HttpStatus`
//! means the server answered with a status of 400 or above and carries the
//! status and raw body so 4xx and 5xx can be told apart. The remaining
//! variants cover JSON encoding of payloads on either side of the exchange.

use thiserror::Error;

/// Errors returned by `ApiClient` verbs and the resource services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received.
    #[error("network error: {message}")]
    Network { message: String, timed_out: bool },

    /// The server answered with a status of 400 or above.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A 2xx response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The HTTP client could not be constructed. Nothing was sent.
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl ApiError {
    /// Status code of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Network { timed_out: true, .. })
    }
}

/// Failure raised by a `Transport` when no response was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport failure: {0}")]
    Other(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        let timed_out = matches!(err, TransportError::Timeout(_));
        ApiError::Network {
            message: err.to_string(),
            timed_out,
        }
    }
}

/// Errors raised while reading `ClientConfig` from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TIMEOUT must be a whole number of milliseconds, got {value:?}")]
    InvalidTimeout { value: String },

    #[error("LOG_LEVEL must be one of off, error, warn, info, debug, trace (or verbose, http, silly), got {value:?}")]
    InvalidLogLevel { value: String },

    #[error("invalid default header: {0}")]
    InvalidHeader(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_helpers_split_client_and_server_faults() {
        let not_found = ApiError::HttpStatus {
            status: 404,
            body: "{}".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());

        let unavailable = ApiError::HttpStatus {
            status: 503,
            body: String::new(),
        };
        assert!(unavailable.is_server_error());
        assert_eq!(unavailable.status(), Some(503));
    }

    #[test]
    fn timeout_maps_to_network_error() {
        let err: ApiError = TransportError::Timeout("30s elapsed".to_string()).into();
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);

        let err: ApiError = TransportError::Connect("refused".to_string()).into();
        assert!(matches!(err, ApiError::Network { timed_out: false, .. }));
    }

    #[test]
    fn build_failure_is_not_a_network_error() {
        let err = ApiError::Build("no TLS backend".to_string());
        assert!(!err.is_timeout());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "failed to build HTTP client: no TLS backend");
    }
}
