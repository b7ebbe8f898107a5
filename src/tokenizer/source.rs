//! # Character Sources
//!
//! The tokenizer pulls its input one character at a time through the
//! [`CharSource`] trait. Two implementations are provided: [`StrSource`] for
//! text already in memory and [`ReaderSource`] for UTF-8 byte streams such as
//! files or standard input.
use std::io::{self, BufRead, ErrorKind};
use std::iter::Peekable;
use std::str::Chars;

use crate::tokenizer::TextPosition;

/// Interface for anything the tokenizer can read characters from.
pub trait CharSource {
    /// Whether another character is available. May block on I/O.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the source cannot be read.
    fn has_next(&mut self) -> io::Result<bool>;

    /// Consumes and returns the next character.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::UnexpectedEof`] error when called past the end
    /// of the input, or the underlying I/O error.
    fn next_char(&mut self) -> io::Result<char>;

    /// Position of the next character to be read.
    fn position(&self) -> TextPosition;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn has_next(&mut self) -> io::Result<bool> {
        (**self).has_next()
    }

    fn next_char(&mut self) -> io::Result<char> {
        (**self).next_char()
    }

    fn position(&self) -> TextPosition {
        (**self).position()
    }
}

fn exhausted() -> io::Error {
    io::Error::new(ErrorKind::UnexpectedEof, "character source is exhausted")
}

/// A [`CharSource`] over a string slice.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Peekable<Chars<'a>>,
    position: TextPosition,
}

impl<'a> StrSource<'a> {
    /// Creates a source reading `text` from the beginning.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            position: TextPosition::START,
        }
    }
}

impl CharSource for StrSource<'_> {
    fn has_next(&mut self) -> io::Result<bool> {
        Ok(self.chars.peek().is_some())
    }

    fn next_char(&mut self) -> io::Result<char> {
        let c = self.chars.next().ok_or_else(exhausted)?;
        self.position.advance(c);
        Ok(c)
    }

    fn position(&self) -> TextPosition {
        self.position
    }
}

/// A [`CharSource`] decoding UTF-8 from a buffered byte stream.
///
/// Bytes are taken from the reader only as characters are requested, so a
/// consumer that stops pulling leaves the rest of the stream unread (apart
/// from whatever the reader itself has buffered).
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    peeked: Option<char>,
    position: TextPosition,
}

impl<R: BufRead> ReaderSource<R> {
    /// Creates a source reading from `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            position: TextPosition::START,
        }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.reader.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if byte.is_some() {
                self.reader.consume(1);
            }
            return Ok(byte);
        }
    }

    /// Decodes one character, or `None` at a clean end of stream.
    fn decode_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(lead).ok_or_else(|| {
            invalid_data(format!("invalid UTF-8 lead byte 0x{lead:02x}"))
        })?;

        let mut bytes = [lead, 0, 0, 0];
        for slot in &mut bytes[1..width] {
            *slot = self
                .read_byte()?
                .ok_or_else(|| invalid_data("truncated UTF-8 sequence".to_string()))?;
        }

        let decoded = std::str::from_utf8(&bytes[..width])
            .map_err(|err| io::Error::new(ErrorKind::InvalidData, err))?;
        Ok(decoded.chars().next())
    }
}

/// Length of the UTF-8 sequence introduced by `lead`.
const fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, message)
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn has_next(&mut self) -> io::Result<bool> {
        if self.peeked.is_none() {
            self.peeked = self.decode_char()?;
        }
        Ok(self.peeked.is_some())
    }

    fn next_char(&mut self) -> io::Result<char> {
        if !self.has_next()? {
            return Err(exhausted());
        }
        let c = self.peeked.take().ok_or_else(exhausted)?;
        self.position.advance(c);
        Ok(c)
    }

    fn position(&self) -> TextPosition {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &mut impl CharSource) -> io::Result<String> {
        let mut out = String::new();
        while source.has_next()? {
            out.push(source.next_char()?);
        }
        Ok(out)
    }

    #[test]
    fn test_str_source_tracks_position() {
        let mut source = StrSource::new("{\n  1");
        assert_eq!(source.position(), TextPosition::START);
        assert_eq!(drain(&mut source).unwrap(), "{\n  1");
        assert_eq!(
            source.position(),
            TextPosition {
                line: 2,
                column: 4,
                offset: 5
            }
        );
    }

    #[test]
    fn test_next_char_past_end_fails() {
        let mut source = StrSource::new("");
        assert!(!source.has_next().unwrap());
        let err = source.next_char().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

        let mut source = ReaderSource::new(&b""[..]);
        let err = source.next_char().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_reader_source_decodes_multibyte() {
        let text = "[\"é中😀\"]";
        let mut source = ReaderSource::new(text.as_bytes());
        assert_eq!(drain(&mut source).unwrap(), text);
        // Offsets count characters, not bytes.
        assert_eq!(source.position().offset, text.chars().count());
    }

    #[test]
    fn test_reader_source_small_buffer() {
        let text = "{\"ключ\": 12}";
        let reader = io::BufReader::with_capacity(1, text.as_bytes());
        let mut source = ReaderSource::new(reader);
        assert_eq!(drain(&mut source).unwrap(), text);
    }

    #[test]
    fn test_reader_source_rejects_invalid_utf8() {
        let mut source = ReaderSource::new(&b"[\xff]"[..]);
        assert_eq!(source.next_char().unwrap(), '[');
        let err = source.has_next().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        // Lead byte of a two-byte sequence with nothing after it
        let mut source = ReaderSource::new(&b"\xc3"[..]);
        let err = source.has_next().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        // Encoded surrogate
        let mut source = ReaderSource::new(&b"\xed\xa0\x80"[..]);
        let err = source.has_next().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
