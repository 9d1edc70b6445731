//! One-or-many request codec

use std::io;

use crate::{
    codec::{ElementDecoder, ElementEncoder, TokenKind, TokenStream},
    protocol::{
        error::{DecodeError, EncodeError},
        shape::{RequestBatch, TargetShape, TypeDescriptor},
    },
};

/// Codec that reads either one request object or an array of them, and
/// always writes an array
///
/// The codec holds no state besides its element strategy, so one instance
/// can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct BatchCodec<C> {
    element: C,
}

impl<C> BatchCodec<C> {
    /// Create a batch codec around an element codec
    pub fn new(element: C) -> Self {
        Self { element }
    }

    /// The element codec requests are delegated to
    pub fn element(&self) -> &C {
        &self.element
    }

    /// Check whether a requested container type can be produced and consumed
    pub fn can_convert(descriptor: TypeDescriptor) -> bool {
        descriptor.target_shape().is_some()
    }

    /// Decode a single request or a batch from `stream`
    ///
    /// The stream must be positioned on the first token of the value. On
    /// success it is left on the value's final token. On failure nothing
    /// decoded so far is returned.
    pub fn decode<S>(
        &self,
        stream: &mut S,
        shape: TargetShape,
    ) -> Result<RequestBatch<C::Item>, DecodeError>
    where
        S: TokenStream + ?Sized,
        C: ElementDecoder<S>,
    {
        match stream.peek() {
            Some(TokenKind::StartObject) => {
                let request = self.element.decode_one(stream)?;
                tracing::trace!(?shape, "decoded single request");
                Ok(shape.materialize_single(request))
            }
            Some(TokenKind::StartArray) => {
                let mut buffer = Vec::new();
                loop {
                    stream.advance()?;
                    match stream.peek() {
                        None => return Err(DecodeError::UnterminatedBatch),
                        Some(TokenKind::EndArray) => {
                            tracing::trace!(?shape, len = buffer.len(), "decoded request batch");
                            return Ok(shape.materialize_buffer(buffer));
                        }
                        Some(_) => buffer.push(self.element.decode_one(stream)?),
                    }
                }
            }
            found => Err(DecodeError::MalformedTopLevelValue { found }),
        }
    }

    /// Write `items` to `sink` as a JSON array, one element at a time
    pub fn encode<'a, T, I, W>(&self, items: I, sink: &mut W) -> Result<(), EncodeError>
    where
        T: 'a + ?Sized,
        I: IntoIterator<Item = &'a T>,
        C: ElementEncoder<T>,
        W: io::Write,
    {
        sink.write_all(b"[")?;
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                sink.write_all(b",")?;
            }
            self.element.encode_one(item, sink)?;
        }
        sink.write_all(b"]")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use serde::de::Error as _;

    use super::*;

    /// Scripted token stream
    struct Tokens(VecDeque<TokenKind>);

    impl Tokens {
        fn new(tokens: &[TokenKind]) -> Self {
            Self(tokens.iter().copied().collect())
        }
    }

    impl TokenStream for Tokens {
        fn peek(&self) -> Option<TokenKind> {
            self.0.front().copied()
        }

        fn advance(&mut self) -> Result<(), DecodeError> {
            self.0.pop_front();
            Ok(())
        }
    }

    /// Decodes `{ }` pairs into a running counter, rejects numbers
    #[derive(Default)]
    struct Counter(std::cell::Cell<u32>);

    impl ElementDecoder<Tokens> for Counter {
        type Item = u32;

        fn decode_one(&self, stream: &mut Tokens) -> Result<u32, DecodeError> {
            match stream.peek() {
                Some(TokenKind::StartObject) => {
                    stream.advance()?;
                    assert_eq!(stream.peek(), Some(TokenKind::EndObject));
                    let next = self.0.get() + 1;
                    self.0.set(next);
                    Ok(next)
                }
                _ => Err(DecodeError::Element(serde_json::Error::custom(
                    "expected object",
                ))),
            }
        }
    }

    impl ElementEncoder<u32> for Counter {
        fn encode_one<W: io::Write>(&self, item: &u32, sink: &mut W) -> Result<(), EncodeError> {
            write!(sink, "{item}")?;
            Ok(())
        }
    }

    use crate::codec::TokenKind::*;

    #[test]
    fn test_can_convert() {
        assert!(BatchCodec::<Counter>::can_convert(TypeDescriptor::FixedArray));
        assert!(BatchCodec::<Counter>::can_convert(TypeDescriptor::MutableList));
        assert!(BatchCodec::<Counter>::can_convert(TypeDescriptor::ReadOnlyCollection));
        assert!(BatchCodec::<Counter>::can_convert(
            TypeDescriptor::ReadOnlySizedCollection
        ));
        assert!(BatchCodec::<Counter>::can_convert(TypeDescriptor::ReadOnlyIndexable));
        assert!(!BatchCodec::<Counter>::can_convert(TypeDescriptor::Mapping));
        assert!(!BatchCodec::<Counter>::can_convert(TypeDescriptor::Set));
        assert!(!BatchCodec::<Counter>::can_convert(TypeDescriptor::Single));
    }

    #[test]
    fn test_decode_single_object() {
        let codec = BatchCodec::new(Counter::default());
        let mut stream = Tokens::new(&[StartObject, EndObject]);

        let batch = codec.decode(&mut stream, TargetShape::MutableList).unwrap();
        assert!(matches!(batch, RequestBatch::List(_)));
        assert_eq!(&*batch, &[1]);
        assert_eq!(stream.peek(), Some(EndObject));
    }

    #[test]
    fn test_decode_array_keeps_order() {
        let codec = BatchCodec::new(Counter::default());
        let mut stream = Tokens::new(&[
            StartArray,
            StartObject,
            EndObject,
            StartObject,
            EndObject,
            StartObject,
            EndObject,
            EndArray,
        ]);

        let batch = codec.decode(&mut stream, TargetShape::FixedArray).unwrap();
        assert!(matches!(batch, RequestBatch::Array(_)));
        assert_eq!(&*batch, &[1, 2, 3]);
        assert_eq!(stream.peek(), Some(EndArray));
    }

    #[test]
    fn test_decode_empty_array() {
        let codec = BatchCodec::new(Counter::default());
        let mut stream = Tokens::new(&[StartArray, EndArray]);

        let batch = codec
            .decode(&mut stream, TargetShape::ReadOnlyCollection)
            .unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_decode_malformed_top_level() {
        let codec = BatchCodec::new(Counter::default());

        let result = codec.decode(&mut Tokens::new(&[String]), TargetShape::MutableList);
        assert!(matches!(
            result,
            Err(DecodeError::MalformedTopLevelValue {
                found: Some(String)
            })
        ));

        let result = codec.decode(&mut Tokens::new(&[]), TargetShape::MutableList);
        assert!(matches!(
            result,
            Err(DecodeError::MalformedTopLevelValue { found: None })
        ));
    }

    #[test]
    fn test_decode_unterminated() {
        let codec = BatchCodec::new(Counter::default());
        let mut stream = Tokens::new(&[StartArray, StartObject, EndObject]);

        let result = codec.decode(&mut stream, TargetShape::MutableList);
        assert!(matches!(result, Err(DecodeError::UnterminatedBatch)));
    }

    #[test]
    fn test_decode_element_error_stops() {
        let codec = BatchCodec::new(Counter::default());
        let mut stream = Tokens::new(&[
            StartArray,
            StartObject,
            EndObject,
            Number,
            StartObject,
            EndObject,
            EndArray,
        ]);

        let result = codec.decode(&mut stream, TargetShape::MutableList);
        assert!(matches!(result, Err(DecodeError::Element(_))));
        // the third element was never decoded
        assert_eq!(codec.element().0.get(), 1);
    }

    #[test]
    fn test_encode() {
        let codec = BatchCodec::new(Counter::default());

        let mut sink = Vec::new();
        codec.encode(&[1u32, 2, 3], &mut sink).unwrap();
        assert_eq!(sink, b"[1,2,3]");

        let mut sink = Vec::new();
        codec.encode(&RequestBatch::<u32>::List(vec![]), &mut sink).unwrap();
        assert_eq!(sink, b"[]");
    }
}
