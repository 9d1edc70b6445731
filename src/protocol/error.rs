//! Error types for GraphQL request decoding, encoding and execution

use thiserror::Error;

use crate::codec::TokenKind;

/// Errors raised while decoding a single request or a batch of requests
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The top-level value is neither a request object nor a batch array
    #[error("expected a request object or an array of requests, found {}", describe(.found))]
    MalformedTopLevelValue {
        /// The token the value started with, `None` for empty input
        found: Option<TokenKind>,
    },

    /// The input ended before the batch array was closed
    #[error("unexpected end of input inside a request batch")]
    UnterminatedBatch,

    /// A batch element could not be decoded as a request
    #[error("invalid request: {0}")]
    Element(#[source] serde_json::Error),

    /// The input is not well-formed JSON
    #[error("malformed JSON at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// Non-whitespace data follows the top-level value
    #[error("trailing data at byte {offset}")]
    TrailingData { offset: usize },
}

fn describe(found: &Option<TokenKind>) -> String {
    match found {
        Some(kind) => kind.to_string(),
        None => "end of input".to_string(),
    }
}

/// Errors raised while writing requests or results to a sink
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The sink rejected a write
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An element could not be serialized
    #[error("serialization error: {0}")]
    Element(#[from] serde_json::Error),
}

/// Main error type for the GraphQL endpoint
#[derive(Debug, Error)]
pub enum GraphQLServerError {
    /// The request body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A response could not be encoded
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// The request was well-formed but not admissible (batch limits, disabled batching)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The endpoint was assembled without a required collaborator
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error outside the batch codec
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

impl GraphQLServerError {
    /// Whether this error was caused by the caller's input
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            GraphQLServerError::Decode(_) | GraphQLServerError::Validation(_)
        )
    }
}

/// Result type alias for endpoint operations
pub type GraphQLResult<T> = Result<T, GraphQLServerError>;

impl From<&str> for GraphQLServerError {
    fn from(s: &str) -> Self {
        GraphQLServerError::Other(s.to_string())
    }
}

impl From<String> for GraphQLServerError {
    fn from(s: String) -> Self {
        GraphQLServerError::Other(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_token() {
        let err = DecodeError::MalformedTopLevelValue {
            found: Some(TokenKind::String),
        };
        assert_eq!(
            err.to_string(),
            "expected a request object or an array of requests, found string"
        );

        let err = DecodeError::MalformedTopLevelValue { found: None };
        assert!(err.to_string().ends_with("found end of input"));
    }

    #[test]
    fn test_bad_request_classification() {
        assert!(GraphQLServerError::from(DecodeError::UnterminatedBatch).is_bad_request());
        assert!(GraphQLServerError::Validation("too many".into()).is_bad_request());
        assert!(!GraphQLServerError::Configuration("missing".into()).is_bad_request());
        assert!(!GraphQLServerError::from("boom").is_bad_request());
    }
}
