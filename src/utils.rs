//! Miscellaneous utility functions.

use anyhow::Context as _;
use colored::{ColoredString, Colorize};
use std::io::{self, ErrorKind, Write};

use crate::tokenizer::{Spanned, TokenType};

/// How the `jt` binary prints tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `line:column`, type and value, tab separated
    Text,
    /// One `{"type", "value"}` object per line
    Json,
    /// Like [`OutputFormat::Json`] with the start position added
    JsonWithPositions,
}

/// Write a single token to `writer` in the given format.
///
/// Returns `Ok(false)` once the reader on the other end has gone away (broken
/// pipe), so piping to tools like `head` stops the scan quietly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails for any other reason.
pub fn write_token<W: Write>(
    writer: &mut W,
    spanned: &Spanned,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let result = match format {
        OutputFormat::Text => write_text(writer, spanned),
        OutputFormat::Json => write_json(writer, &spanned.token),
        OutputFormat::JsonWithPositions => write_json(writer, spanned),
    };

    match result {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(false),
        Err(err) => Err(err).context("write token to stdout"),
    }
}

fn write_json<W: Write, T: serde::Serialize>(
    writer: &mut W,
    value: &T,
) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)
}

fn write_text<W: Write>(writer: &mut W, spanned: &Spanned) -> io::Result<()> {
    let Spanned { token, start } = spanned;
    let position = format!("{}:{}", start.line, start.column);
    write!(writer, "{}\t{}", position.dimmed(), paint(token.kind()))?;

    match (token.kind(), token.value()) {
        (TokenType::String, Some(value)) => {
            // NOTE: Re-serialize to get proper JSON escaping and quoting.
            let quoted = serde_json::to_string(value)?;
            writeln!(writer, "\t{}", quoted.green())
        }
        (_, Some(value)) => writeln!(writer, "\t{}", value.yellow()),
        (_, None) => writeln!(writer),
    }
}

/// Colors a token type name by category.
fn paint(kind: TokenType) -> ColoredString {
    let name = kind.name();
    match kind {
        TokenType::String => name.green(),
        TokenType::Decimal => name.yellow(),
        TokenType::Null => name.red().dimmed(),
        TokenType::True | TokenType::False => name.yellow().bold(),
        TokenType::LeftCurlyBracket
        | TokenType::RightCurlyBracket
        | TokenType::LeftSquareBracket
        | TokenType::RightSquareBracket
        | TokenType::Colon
        | TokenType::Comma => name.cyan(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{TextPosition, Token};

    fn render(spanned: &Spanned, format: OutputFormat) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        assert!(write_token(&mut out, spanned, format).unwrap());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_format() {
        let spanned = Spanned {
            token: Token::string("a\"b"),
            start: TextPosition {
                line: 2,
                column: 3,
                offset: 9,
            },
        };
        assert_eq!(render(&spanned, OutputFormat::Text), "2:3\tstring\t\"a\\\"b\"\n");

        let spanned = Spanned {
            token: Token::COMMA,
            start: TextPosition::START,
        };
        assert_eq!(render(&spanned, OutputFormat::Text), "1:1\tcomma\n");
    }

    #[test]
    fn test_json_formats() {
        let spanned = Spanned {
            token: Token::decimal("10"),
            start: TextPosition::START,
        };
        assert_eq!(
            render(&spanned, OutputFormat::Json),
            "{\"type\":\"decimal\",\"value\":\"10\"}\n"
        );
        let with_positions = render(&spanned, OutputFormat::JsonWithPositions);
        let value: serde_json::Value = serde_json::from_str(&with_positions).unwrap();
        assert_eq!(value["start"]["line"], 1);
        assert_eq!(value["value"], "10");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_broken_pipe_stops_quietly() {
        let spanned = Spanned {
            token: Token::NULL,
            start: TextPosition::START,
        };
        assert!(!write_token(&mut BrokenPipe, &spanned, OutputFormat::Json).unwrap());
    }
}
