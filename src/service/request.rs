//! Decoded endpoint requests

use crate::{
    codec::{json::RequestBatchCodec, JsonCursor, TokenKind, TokenStream},
    protocol::{error::DecodeError, request::GraphQLRequest, shape::TargetShape},
};

/// The requests carried by one endpoint call
///
/// Remembers whether the caller sent a batch array so results can be written
/// back in the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    /// Requests in wire order
    pub requests: Vec<GraphQLRequest>,

    /// Whether the body was an array rather than a single object
    pub is_batch: bool,
}

impl BatchRequest {
    /// A request made of one bare object
    pub fn single(request: GraphQLRequest) -> Self {
        Self {
            requests: vec![request],
            is_batch: false,
        }
    }

    /// A request made of a batch array
    pub fn batch(requests: Vec<GraphQLRequest>) -> Self {
        Self {
            requests,
            is_batch: true,
        }
    }

    /// Decode a complete request body
    pub fn from_body(body: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = JsonCursor::new(body)?;
        let is_batch = cursor.peek() == Some(TokenKind::StartArray);

        let requests = RequestBatchCodec::json()
            .decode(&mut cursor, TargetShape::MutableList)?
            .into_vec();
        cursor.finish()?;

        tracing::debug!(count = requests.len(), is_batch, "decoded request body");
        Ok(Self { requests, is_batch })
    }

    /// Number of requests
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Check if there are no requests (an empty batch array)
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_body() {
        let request = BatchRequest::from_body(br#"{"query":"{ a }"}"#).unwrap();
        assert_eq!(request, BatchRequest::single(GraphQLRequest::new("{ a }")));
    }

    #[test]
    fn test_batch_body() {
        let request =
            BatchRequest::from_body(br#"[{"query":"{ a }"},{"query":"{ b }"}]"#).unwrap();
        assert!(request.is_batch);
        assert_eq!(request.len(), 2);
        assert_eq!(request.requests[1].query.as_deref(), Some("{ b }"));

        let request = BatchRequest::from_body(b"[]").unwrap();
        assert!(request.is_batch);
        assert!(request.is_empty());
    }

    #[test]
    fn test_invalid_bodies() {
        assert!(matches!(
            BatchRequest::from_body(b""),
            Err(DecodeError::MalformedTopLevelValue { found: None })
        ));
        assert!(matches!(
            BatchRequest::from_body(b"\"query\""),
            Err(DecodeError::MalformedTopLevelValue { .. })
        ));
        assert!(matches!(
            BatchRequest::from_body(b"[{}"),
            Err(DecodeError::UnterminatedBatch)
        ));
        assert!(matches!(
            BatchRequest::from_body(b"{} {}"),
            Err(DecodeError::TrailingData { .. })
        ));
    }
}
