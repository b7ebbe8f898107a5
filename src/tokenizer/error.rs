//! # Tokenizer Errors
//!
//! Every failure is fatal to the scan that produced it: the stream never
//! retries, skips ahead, or hands out a partially scanned token.
use std::error::Error;
use std::fmt;
use std::io;

use crate::tokenizer::TextPosition;

/// Represents errors that can occur while tokenizing JSON text.
#[derive(Debug)]
pub enum LexError {
    /// A character that cannot start any token.
    UnexpectedCharacter {
        /// The offending character
        found: char,
        /// Where it was read
        position: TextPosition,
    },
    /// A backslash inside a string followed by anything but `"`.
    UnexpectedEscapedCharacter {
        /// The character after the backslash
        found: char,
        /// Where it was read
        position: TextPosition,
    },
    /// The input ended inside a string, number, or keyword.
    UnexpectedEndOfInput {
        /// Position just past the last character
        position: TextPosition,
        /// The lexeme left open, e.g. "string literal"
        unclosed: &'static str,
    },
    /// A keyword spelled differently from `null`, `true` or `false`.
    KeywordMismatch {
        /// The offending character
        found: char,
        /// The keyword selected by the lead character
        expected: &'static str,
        /// Where it was read
        position: TextPosition,
    },
    /// A token was requested after the stream ran out.
    IterationExhausted,
    /// The character source failed.
    Io(io::Error),
}

impl LexError {
    /// Where in the input the error was detected, if it is tied to one.
    #[must_use]
    pub const fn position(&self) -> Option<TextPosition> {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnexpectedEscapedCharacter { position, .. }
            | Self::UnexpectedEndOfInput { position, .. }
            | Self::KeywordMismatch { position, .. } => Some(*position),
            Self::IterationExhausted | Self::Io(_) => None,
        }
    }
}

impl Error for LexError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter { found, position } => {
                write!(f, "Unexpected character {found:?} at {position}")
            }
            Self::UnexpectedEscapedCharacter { found, position } => {
                write!(f, "Unexpected escaped character {found:?} at {position}")
            }
            Self::UnexpectedEndOfInput { position, unclosed } => {
                write!(
                    f,
                    "Unexpected end of the input at {position} (unclosed {unclosed})"
                )
            }
            Self::KeywordMismatch {
                found,
                expected,
                position,
            } => {
                write!(
                    f,
                    "Unexpected character {found:?} at {position} while reading `{expected}`"
                )
            }
            Self::IterationExhausted => write!(f, "No more tokens in the input"),
            Self::Io(err) => write!(f, "Failed to read input: {err}"),
        }
    }
}

impl From<io::Error> for LexError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let position = TextPosition {
            line: 3,
            column: 5,
            offset: 20,
        };
        let err = LexError::UnexpectedCharacter {
            found: '%',
            position,
        };
        assert_eq!(err.to_string(), "Unexpected character '%' at line 3, column 5");

        let err = LexError::KeywordMismatch {
            found: 'x',
            expected: "true",
            position,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected character 'x' at line 3, column 5 while reading `true`"
        );

        let err = LexError::UnexpectedEndOfInput {
            position,
            unclosed: "keyword `true`",
        };
        assert!(err.to_string().starts_with("Unexpected end of the input"));
    }

    #[test]
    fn test_io_source_is_exposed() {
        let err = LexError::from(io::Error::new(io::ErrorKind::InvalidData, "bad byte"));
        assert!(err.source().is_some());
        assert!(err.position().is_none());
    }
}
