//! Forward-only JSON token cursor over an in-memory document

use crate::{
    codec::{TokenKind, TokenStream},
    protocol::error::DecodeError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object,
    Array,
}

/// Pull tokenizer over a JSON byte slice
///
/// The cursor validates structure as it goes (separators, bracket nesting,
/// literals, string and number lexing) but never materializes values.
/// String escapes are skipped, not decoded.
#[derive(Debug, Clone)]
pub struct JsonCursor<'a> {
    input: &'a [u8],
    /// Offset of the current token's first byte
    start: usize,
    /// Offset just past the current token
    pos: usize,
    current: Option<TokenKind>,
    frames: Vec<Frame>,
    /// A value just ended, so a separator or closer comes next
    after_value: bool,
}

impl<'a> JsonCursor<'a> {
    /// Create a cursor positioned on the first token of `input`
    pub fn new(input: &'a [u8]) -> Result<Self, DecodeError> {
        let mut cursor = Self {
            input,
            start: 0,
            pos: 0,
            current: None,
            frames: Vec::new(),
            after_value: false,
        };
        cursor.advance()?;
        Ok(cursor)
    }

    /// Byte offset of the current token
    pub fn offset(&self) -> usize {
        self.start
    }

    /// Nesting depth of the current position
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Ensure nothing but whitespace follows the current position
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(DecodeError::TrailingData { offset: self.pos });
        }
        Ok(())
    }

    /// Input from the current token onwards
    pub(crate) fn remaining(&self) -> &'a [u8] {
        &self.input[self.start..]
    }

    /// Whether the current token begins a value
    pub(crate) fn at_value_start(&self) -> bool {
        !matches!(
            self.current,
            None | Some(TokenKind::EndObject | TokenKind::EndArray | TokenKind::PropertyName)
        )
    }

    /// Skip the value starting at the current token, `len` bytes long,
    /// leaving the cursor on its final token
    pub(crate) fn skip_value(&mut self, len: usize) {
        match self.current {
            Some(TokenKind::StartObject) => {
                self.frames.pop();
                self.current = Some(TokenKind::EndObject);
            }
            Some(TokenKind::StartArray) => {
                self.frames.pop();
                self.current = Some(TokenKind::EndArray);
            }
            _ => {}
        }
        self.pos = self.start + len;
        self.after_value = true;
    }

    pub(crate) fn syntax(&self, message: &str) -> DecodeError {
        DecodeError::Syntax {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.input.get(self.pos) {
            self.pos += 1;
        }
    }

    fn close(&mut self, kind: TokenKind) {
        self.frames.pop();
        self.current = Some(kind);
        self.pos += 1;
        self.after_value = true;
    }

    fn open(&mut self, frame: Frame, kind: TokenKind) {
        self.frames.push(frame);
        self.current = Some(kind);
        self.pos += 1;
        self.after_value = false;
    }

    fn scalar(&mut self, kind: TokenKind) {
        self.current = Some(kind);
        self.after_value = true;
    }

    fn scan_string(&mut self) -> Result<(), DecodeError> {
        self.pos += 1;
        loop {
            match self.input.get(self.pos) {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(b'\\') => self.pos += 2,
                Some(&byte) if byte < 0x20 => {
                    return Err(self.syntax("control character in string"));
                }
                Some(_) => self.pos += 1,
                None => return Err(self.syntax("unterminated string")),
            }
        }
    }

    fn scan_digits(&mut self) -> Result<(), DecodeError> {
        let begin = self.pos;
        while let Some(b'0'..=b'9') = self.input.get(self.pos) {
            self.pos += 1;
        }
        if self.pos == begin {
            return Err(self.syntax("expected digit"));
        }
        Ok(())
    }

    fn scan_number(&mut self) -> Result<(), DecodeError> {
        if self.input.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        match self.input.get(self.pos) {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.scan_digits()?,
            _ => return Err(self.syntax("expected digit")),
        }
        if self.input.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            self.scan_digits()?;
        }
        if let Some(b'e' | b'E') = self.input.get(self.pos) {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.input.get(self.pos) {
                self.pos += 1;
            }
            self.scan_digits()?;
        }
        Ok(())
    }

    fn scan_literal(&mut self, literal: &[u8]) -> Result<(), DecodeError> {
        if !self.input[self.pos..].starts_with(literal) {
            return Err(self.syntax("invalid literal"));
        }
        self.pos += literal.len();
        Ok(())
    }

    fn read_property_name(&mut self) -> Result<(), DecodeError> {
        if self.input[self.pos] != b'"' {
            return Err(self.syntax("expected property name"));
        }
        self.scan_string()?;
        self.skip_whitespace();
        if self.input.get(self.pos) != Some(&b':') {
            return Err(self.syntax("expected ':'"));
        }
        self.pos += 1;
        self.current = Some(TokenKind::PropertyName);
        self.after_value = false;
        Ok(())
    }

    fn read_value(&mut self) -> Result<(), DecodeError> {
        match self.input[self.pos] {
            b'{' => self.open(Frame::Object, TokenKind::StartObject),
            b'[' => self.open(Frame::Array, TokenKind::StartArray),
            b'"' => {
                self.scan_string()?;
                self.scalar(TokenKind::String);
            }
            b'-' | b'0'..=b'9' => {
                self.scan_number()?;
                self.scalar(TokenKind::Number);
            }
            b't' => {
                self.scan_literal(b"true")?;
                self.scalar(TokenKind::True);
            }
            b'f' => {
                self.scan_literal(b"false")?;
                self.scalar(TokenKind::False);
            }
            b'n' => {
                self.scan_literal(b"null")?;
                self.scalar(TokenKind::Null);
            }
            _ => return Err(self.syntax("unexpected character")),
        }
        Ok(())
    }
}

impl TokenStream for JsonCursor<'_> {
    fn peek(&self) -> Option<TokenKind> {
        self.current
    }

    fn advance(&mut self) -> Result<(), DecodeError> {
        let previous = self.current;
        self.skip_whitespace();
        self.start = self.pos;

        let Some(&byte) = self.input.get(self.pos) else {
            self.current = None;
            return Ok(());
        };

        if self.after_value {
            match (byte, self.frames.last()) {
                (b']', Some(Frame::Array)) => {
                    self.close(TokenKind::EndArray);
                    return Ok(());
                }
                (b'}', Some(Frame::Object)) => {
                    self.close(TokenKind::EndObject);
                    return Ok(());
                }
                (b',', Some(_)) => {
                    self.pos += 1;
                    self.skip_whitespace();
                    self.start = self.pos;
                    match self.input.get(self.pos) {
                        None => {
                            self.current = None;
                            return Ok(());
                        }
                        Some(b']' | b'}') => return Err(self.syntax("trailing comma")),
                        Some(_) => {}
                    }
                }
                (_, None) => return Err(DecodeError::TrailingData { offset: self.pos }),
                _ => return Err(self.syntax("expected ',' or closing bracket")),
            }
        } else {
            match (byte, previous) {
                (b']', Some(TokenKind::StartArray)) => {
                    self.close(TokenKind::EndArray);
                    return Ok(());
                }
                (b'}', Some(TokenKind::StartObject)) => {
                    self.close(TokenKind::EndObject);
                    return Ok(());
                }
                _ => {}
            }
        }

        let expects_key = self.frames.last() == Some(&Frame::Object)
            && previous != Some(TokenKind::PropertyName);
        if expects_key {
            self.read_property_name()
        } else {
            self.read_value()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TokenKind::*;

    fn tokens(input: &str) -> Result<Vec<TokenKind>, DecodeError> {
        let mut cursor = JsonCursor::new(input.as_bytes())?;
        let mut out = Vec::new();
        while let Some(kind) = cursor.peek() {
            out.push(kind);
            cursor.advance()?;
        }
        Ok(out)
    }

    #[test]
    fn test_tokenize_document() {
        let kinds = tokens(r#" [{"query": "{ a }", "variables": {"n": -1.5e3, "b": [true, false, null]}}, {}] "#)
            .unwrap();
        assert_eq!(
            kinds,
            vec![
                StartArray,
                StartObject,
                PropertyName,
                String,
                PropertyName,
                StartObject,
                PropertyName,
                Number,
                PropertyName,
                StartArray,
                True,
                False,
                Null,
                EndArray,
                EndObject,
                EndObject,
                StartObject,
                EndObject,
                EndArray,
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let cursor = JsonCursor::new(b"  ").unwrap();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_escaped_strings() {
        let kinds = tokens(r#"["a\"b", "\\", "é"]"#).unwrap();
        assert_eq!(kinds, vec![StartArray, String, String, String, EndArray]);
    }

    #[test]
    fn test_truncated_array_ends_stream() {
        let kinds = tokens("[{}, ").unwrap();
        assert_eq!(kinds, vec![StartArray, StartObject, EndObject]);
    }

    #[test]
    fn test_syntax_errors() {
        for input in [
            r#"[{"a":1} {"b":2}]"#,
            "[1,]",
            "tru",
            r#"["abc"#,
            r#"{"a" 1}"#,
            "{1:2}",
            "[01x]",
            "[1.]",
            "[}",
        ] {
            assert!(
                matches!(tokens(input), Err(DecodeError::Syntax { .. })),
                "expected syntax error for {input}"
            );
        }
    }

    #[test]
    fn test_trailing_data() {
        assert!(matches!(
            tokens("{} {}"),
            Err(DecodeError::TrailingData { offset: 3 })
        ));

        let mut cursor = JsonCursor::new(b"[] x").unwrap();
        assert!(matches!(
            cursor.finish(),
            Err(DecodeError::TrailingData { offset: 1 })
        ));
        // finish is checked once the value has been consumed
        cursor.advance().unwrap();
        assert!(matches!(
            cursor.finish(),
            Err(DecodeError::TrailingData { offset: 3 })
        ));
    }

    #[test]
    fn test_skip_value() {
        let input = br#"[{"query":"{ a }"}, 2]"#;
        let mut cursor = JsonCursor::new(input).unwrap();
        cursor.advance().unwrap();
        assert_eq!(cursor.peek(), Some(StartObject));
        assert_eq!(cursor.depth(), 2);

        cursor.skip_value(17);
        assert_eq!(cursor.peek(), Some(EndObject));
        assert_eq!(cursor.depth(), 1);

        cursor.advance().unwrap();
        assert_eq!(cursor.peek(), Some(Number));
        assert_eq!(cursor.offset(), 20);
        cursor.advance().unwrap();
        assert_eq!(cursor.peek(), Some(EndArray));
        cursor.finish().unwrap();
    }
}
