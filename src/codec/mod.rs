//! Codecs for single and batched GraphQL requests
//!
//! The [`BatchCodec`] only knows about array structure. It runs over any
//! [`TokenStream`] and hands every element to an [`ElementDecoder`] /
//! [`ElementEncoder`] strategy, so request field grammar never leaks into it.

pub mod batch;
pub mod cursor;
pub mod json;
pub mod serde_batch;

use std::{fmt, io};

pub use batch::BatchCodec;
pub use cursor::JsonCursor;
pub use json::JsonElementCodec;

use crate::protocol::error::{DecodeError, EncodeError};

/// Kind of the token a [`TokenStream`] is positioned on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    PropertyName,
    String,
    Number,
    True,
    False,
    Null,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::StartObject => "'{'",
            TokenKind::EndObject => "'}'",
            TokenKind::StartArray => "'['",
            TokenKind::EndArray => "']'",
            TokenKind::PropertyName => "property name",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// Forward-only token cursor
///
/// A stream is always positioned on a token, or past the last one. Element
/// decoders leave the stream on the final token of the value they consumed.
pub trait TokenStream {
    /// Kind of the current token, `None` once the input is exhausted
    fn peek(&self) -> Option<TokenKind>;

    /// Move to the next token
    fn advance(&mut self) -> Result<(), DecodeError>;

    /// Check if the input is exhausted
    fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }
}

/// Decodes one element value starting at the stream's current token
pub trait ElementDecoder<S: TokenStream + ?Sized> {
    type Item;

    fn decode_one(&self, stream: &mut S) -> Result<Self::Item, DecodeError>;
}

/// Encodes one element value to a sink
pub trait ElementEncoder<T: ?Sized> {
    fn encode_one<W: io::Write>(&self, item: &T, sink: &mut W) -> Result<(), EncodeError>;
}
