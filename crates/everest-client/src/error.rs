//! Everest error types and the non-2xx response translation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everest result type alias.
pub type EverestResult<T> = Result<T, EverestError>;

/// Errors that can occur when talking to an Everest server.
#[derive(Debug, Error)]
pub enum EverestError {
    /// Network or protocol failure before or during the HTTP exchange.
    /// Surfaced unchanged, including timeouts and canceled requests.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A 2xx response carried a body that was not valid JSON for the
    /// expected type.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// The server explicitly rejected the request and said why.
    ///
    /// This is the variant callers match on to implement business-specific
    /// handling (e.g. treat a rejection as "not found").
    #[error("{message} (status {status})")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Message text supplied by the server.
        message: String,
    },

    /// The server rejected the request but its error body carried no
    /// message.
    #[error("unknown error (status {status})")]
    UnknownResponse {
        /// HTTP status code of the response.
        status: u16,
    },

    /// The server rejected the request and its error body was not a valid
    /// error envelope.
    #[error("could not decode everest error response (status {status})")]
    DecodeErrorResponse {
        /// HTTP status code of the response.
        status: u16,
        /// The envelope decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// Safety net for an error response that fits none of the branches
    /// above.
    #[error("generic response error")]
    GenericResponse,

    /// The underlying API client could not be constructed.
    #[error("could not initialize everest client")]
    ClientInit {
        /// The URL parse failure that prevented construction.
        #[source]
        source: url::ParseError,
    },

    /// The Kubernetes API host in the supplied config is not a usable URL.
    #[error("invalid kubernetes api host")]
    KubeHost {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An HTTP transport could not be derived from the supplied kubeconfig.
    #[error("could not build kubernetes transport")]
    KubeTransport {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl EverestError {
    /// Returns true when the failure is an explicit server-side rejection
    /// (the server answered with an error envelope carrying a message).
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// HTTP status code of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. }
            | Self::UnknownResponse { status }
            | Self::DecodeErrorResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body an Everest server returns on failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable description of what went wrong, when the server
    /// provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Translates a non-2xx response body into one descriptive error.
///
/// A non-empty server message wins over everything else; the status code is
/// always part of the text.
pub(crate) fn translate(status: u16, body: &[u8]) -> EverestError {
    let envelope: ErrorEnvelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(source) => return EverestError::DecodeErrorResponse { status, source },
    };

    match envelope.message {
        Some(message) if !message.is_empty() => EverestError::Server { status, message },
        None => EverestError::UnknownResponse { status },
        Some(_) => EverestError::GenericResponse,
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_translate_server_message() {
        let err = translate(404, br#"{"message":"cluster not found"}"#);
        assert!(err.is_server());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "cluster not found (status 404)");
    }

    #[test]
    fn test_translate_empty_envelope() {
        let err = translate(500, b"{}");
        assert!(!err.is_server());
        assert_eq!(err.to_string(), "unknown error (status 500)");
        assert!(matches!(err, EverestError::UnknownResponse { status: 500 }));
    }

    #[test]
    fn test_translate_undecodable_body() {
        let err = translate(502, b"<html>bad gateway</html>");
        assert!(!err.is_server());
        assert_eq!(
            err.to_string(),
            "could not decode everest error response (status 502)"
        );
        // The decode failure stays reachable as the cause.
        assert!(err.source().is_some());
    }

    #[test]
    fn test_translate_empty_message_falls_back() {
        let err = translate(500, br#"{"message":""}"#);
        assert!(!err.is_server());
        assert_eq!(err.to_string(), "generic response error");
    }

    #[test]
    fn test_translate_ignores_extra_envelope_fields() {
        let err = translate(409, br#"{"message":"already exists","code":7}"#);
        assert_eq!(err.to_string(), "already exists (status 409)");
    }

    #[test]
    fn test_status_absent_for_transport_family() {
        let err = EverestError::GenericResponse;
        assert_eq!(err.status(), None);
    }
}
