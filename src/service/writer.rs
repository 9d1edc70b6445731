//! Result writers

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    codec::{BatchCodec, JsonElementCodec},
    protocol::{
        error::EncodeError,
        response::{ExecutionResult, GraphQLError},
    },
    service::BatchResponse,
};

/// Serializes endpoint results for the wire
pub trait ResultWriter: Send + Sync {
    /// Serialize results in the shape of the original call
    fn write(&self, response: &BatchResponse) -> Result<Bytes, EncodeError>;

    /// Serialize a request-level error payload
    fn write_errors(&self, errors: &[GraphQLError]) -> Result<Bytes, EncodeError>;

    /// Get the content type of the written bodies
    fn content_type(&self) -> &str;
}

/// JSON result writer
///
/// A single-object call gets a single result object back; a batch call gets
/// an array, even when it held one request.
#[derive(Debug, Clone, Default)]
pub struct JsonResultWriter {
    codec: BatchCodec<JsonElementCodec<ExecutionResult>>,
}

impl JsonResultWriter {
    /// Create a new JSON result writer
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultWriter for JsonResultWriter {
    fn write(&self, response: &BatchResponse) -> Result<Bytes, EncodeError> {
        let mut sink = BytesMut::new().writer();

        match (response.is_batch, response.results.as_slice()) {
            (false, [single]) => serde_json::to_writer(&mut sink, single)?,
            (_, results) => self.codec.encode(results, &mut sink)?,
        }

        Ok(sink.into_inner().freeze())
    }

    fn write_errors(&self, errors: &[GraphQLError]) -> Result<Bytes, EncodeError> {
        let result = ExecutionResult::errors(errors.iter().cloned());
        let mut sink = BytesMut::new().writer();
        serde_json::to_writer(&mut sink, &result)?;
        Ok(sink.into_inner().freeze())
    }

    fn content_type(&self) -> &str {
        "application/graphql-response+json"
    }
}
