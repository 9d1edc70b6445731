//! serde_json element codec

use std::{fmt, io, marker::PhantomData};

use serde::{Deserialize, Serialize};

use crate::{
    codec::{BatchCodec, ElementDecoder, ElementEncoder, JsonCursor},
    protocol::{
        error::{DecodeError, EncodeError},
        request::GraphQLRequest,
        shape::{RequestBatch, TargetShape},
    },
};

/// Batch codec for GraphQL requests over JSON
pub type RequestBatchCodec = BatchCodec<JsonElementCodec<GraphQLRequest>>;

/// Element codec that reads and writes `T` with serde_json
pub struct JsonElementCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonElementCodec<T> {
    /// Create a new JSON element codec
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonElementCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonElementCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonElementCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonElementCodec")
            .field("element", &std::any::type_name::<T>())
            .finish()
    }
}

impl<'a, T> ElementDecoder<JsonCursor<'a>> for JsonElementCodec<T>
where
    T: Deserialize<'a>,
{
    type Item = T;

    fn decode_one(&self, stream: &mut JsonCursor<'a>) -> Result<T, DecodeError> {
        if !stream.at_value_start() {
            return Err(stream.syntax("expected a value"));
        }

        let mut values = serde_json::Deserializer::from_slice(stream.remaining()).into_iter::<T>();
        let value = values
            .next()
            .ok_or_else(|| stream.syntax("expected a value"))?
            .map_err(DecodeError::Element)?;

        stream.skip_value(values.byte_offset());
        Ok(value)
    }
}

impl<T: Serialize> ElementEncoder<T> for JsonElementCodec<T> {
    fn encode_one<W: io::Write>(&self, item: &T, sink: &mut W) -> Result<(), EncodeError> {
        serde_json::to_writer(sink, item)?;
        Ok(())
    }
}

impl<T> BatchCodec<JsonElementCodec<T>> {
    /// Create a batch codec over serde_json elements
    pub fn json() -> Self {
        Self::new(JsonElementCodec::new())
    }

    /// Decode a complete JSON document holding one request or a batch
    ///
    /// Unlike [`BatchCodec::decode`], trailing data after the value is an
    /// error.
    pub fn decode_slice<'a>(
        &self,
        input: &'a [u8],
        shape: TargetShape,
    ) -> Result<RequestBatch<T>, DecodeError>
    where
        T: Deserialize<'a>,
    {
        let mut cursor = JsonCursor::new(input)?;
        let batch = self.decode(&mut cursor, shape)?;
        cursor.finish()?;
        Ok(batch)
    }

    /// Encode `items` as a JSON array into a fresh buffer
    pub fn encode_to_vec<'a, I>(&self, items: I) -> Result<Vec<u8>, EncodeError>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut buffer = Vec::new();
        self.encode(items, &mut buffer)?;
        Ok(buffer)
    }
}
