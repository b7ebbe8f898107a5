//! # Scanning State Machine
//!
//! A single-pass finite state machine fed one character at a time. Completed
//! tokens are queued in the order their characters were consumed; the
//! [`TokenStream`](crate::tokenizer::TokenStream) drains that queue.
//!
//! A digit run has no closing character of its own, so it only ends when a
//! non-digit arrives. Rather than pushing that character back into the source,
//! the scanner queues the finished `decimal` token and then hands the same
//! character to the initial-state handler (see
//! [`Scanner::replay_in_await_value`]), which may queue a second token.
use log::trace;
use std::collections::VecDeque;

use crate::tokenizer::{LexError, Spanned, TextPosition, Token};

/// One of the three keyword literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Null,
    True,
    False,
}

impl Keyword {
    /// Keyword selected by a lead character, if any.
    const fn from_lead(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Null),
            't' => Some(Self::True),
            'f' => Some(Self::False),
            _ => None,
        }
    }

    const fn text(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
        }
    }

    const fn token(self) -> Token {
        match self {
            Self::Null => Token::NULL,
            Self::True => Token::TRUE,
            Self::False => Token::FALSE,
        }
    }

    /// The character expected after `matched` characters, if any remain.
    fn expected_at(self, matched: usize) -> Option<char> {
        self.text().as_bytes().get(matched).copied().map(char::from)
    }
}

/// Current state of the [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    /// Between tokens. Initial state and the only valid final state.
    AwaitValue,
    /// After an opening quote.
    InString,
    /// After a backslash inside a string.
    InEscape,
    /// Inside a digit run.
    InNumber,
    /// Inside a keyword, `matched` characters of it already consumed.
    InKeyword { keyword: Keyword, matched: usize },
}

impl ScanState {
    /// Name of the lexeme left open in this state.
    const fn unclosed(self) -> &'static str {
        match self {
            Self::AwaitValue => "value",
            Self::InString => "string literal",
            Self::InEscape => "escape sequence",
            Self::InNumber => "decimal literal",
            Self::InKeyword { keyword, .. } => match keyword {
                Keyword::Null => "keyword `null`",
                Keyword::True => "keyword `true`",
                Keyword::False => "keyword `false`",
            },
        }
    }
}

/// Whitespace accepted between tokens.
const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{000C}')
}

/// Scanner context owned by a single token stream.
#[derive(Debug)]
pub(crate) struct Scanner {
    state: ScanState,
    /// Text of the string or digit run being read
    buffer: String,
    /// Position of the current lexeme's lead character
    lexeme_start: TextPosition,
    /// Completed tokens not yet handed out
    pending: VecDeque<Spanned>,
}

impl Scanner {
    pub(crate) fn new() -> Self {
        Self {
            state: ScanState::AwaitValue,
            buffer: String::new(),
            lexeme_start: TextPosition::START,
            pending: VecDeque::new(),
        }
    }

    pub(crate) const fn state(&self) -> ScanState {
        self.state
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Takes the oldest completed token.
    pub(crate) fn pop(&mut self) -> Option<Spanned> {
        self.pending.pop_front()
    }

    /// Drops every queued token.
    pub(crate) fn discard_pending(&mut self) {
        self.pending.clear();
    }

    /// Consumes `c`, read at position `at`.
    pub(crate) fn feed(&mut self, c: char, at: TextPosition) -> Result<(), LexError> {
        match self.state {
            ScanState::AwaitValue => self.await_value(c, at),
            ScanState::InString => {
                self.in_string(c);
                Ok(())
            }
            ScanState::InEscape => self.in_escape(c, at),
            ScanState::InNumber => self.in_number(c, at),
            ScanState::InKeyword { keyword, matched } => {
                self.in_keyword(keyword, matched, c, at)
            }
        }
    }

    /// Checks that nothing is left open once the input has ended at `at`.
    pub(crate) fn finish(&self, at: TextPosition) -> Result<(), LexError> {
        match self.state {
            ScanState::AwaitValue => Ok(()),
            open => Err(LexError::UnexpectedEndOfInput {
                position: at,
                unclosed: open.unclosed(),
            }),
        }
    }

    fn emit(&mut self, token: Token, start: TextPosition) {
        trace!("token {token} at {start}");
        self.pending.push_back(Spanned { token, start });
    }

    /// Starts a string or number lexeme at `at`.
    fn begin_lexeme(&mut self, at: TextPosition) {
        self.buffer.clear();
        self.lexeme_start = at;
    }

    fn await_value(&mut self, c: char, at: TextPosition) -> Result<(), LexError> {
        match c {
            '{' => self.emit(Token::LEFT_CURLY_BRACKET, at),
            '}' => self.emit(Token::RIGHT_CURLY_BRACKET, at),
            '[' => self.emit(Token::LEFT_SQUARE_BRACKET, at),
            ']' => self.emit(Token::RIGHT_SQUARE_BRACKET, at),
            ':' => self.emit(Token::COLON, at),
            ',' => self.emit(Token::COMMA, at),
            '"' => {
                self.begin_lexeme(at);
                self.state = ScanState::InString;
            }
            '0'..='9' => {
                self.begin_lexeme(at);
                self.buffer.push(c);
                self.state = ScanState::InNumber;
            }
            c if is_whitespace(c) => {}
            c => match Keyword::from_lead(c) {
                Some(keyword) => {
                    self.lexeme_start = at;
                    self.state = ScanState::InKeyword {
                        keyword,
                        matched: 1,
                    };
                }
                None => {
                    return Err(LexError::UnexpectedCharacter {
                        found: c,
                        position: at,
                    });
                }
            },
        }
        Ok(())
    }

    fn in_string(&mut self, c: char) {
        match c {
            '\\' => self.state = ScanState::InEscape,
            '"' => {
                let value = std::mem::take(&mut self.buffer);
                self.emit(Token::string(value), self.lexeme_start);
                self.state = ScanState::AwaitValue;
            }
            c => self.buffer.push(c),
        }
    }

    fn in_escape(&mut self, c: char, at: TextPosition) -> Result<(), LexError> {
        // NOTE: only the escaped quote is supported.
        if c != '"' {
            return Err(LexError::UnexpectedEscapedCharacter {
                found: c,
                position: at,
            });
        }
        self.buffer.push('"');
        self.state = ScanState::InString;
        Ok(())
    }

    fn in_number(&mut self, c: char, at: TextPosition) -> Result<(), LexError> {
        if c.is_ascii_digit() {
            self.buffer.push(c);
            return Ok(());
        }

        let digits = std::mem::take(&mut self.buffer);
        self.emit(Token::decimal(digits), self.lexeme_start);
        self.replay_in_await_value(c, at)
    }

    /// Re-dispatches the character that ended a digit run, so the run's
    /// terminator is scanned as the start of whatever follows it.
    fn replay_in_await_value(
        &mut self,
        c: char,
        at: TextPosition,
    ) -> Result<(), LexError> {
        self.state = ScanState::AwaitValue;
        self.await_value(c, at)
    }

    fn in_keyword(
        &mut self,
        keyword: Keyword,
        matched: usize,
        c: char,
        at: TextPosition,
    ) -> Result<(), LexError> {
        if keyword.expected_at(matched) != Some(c) {
            return Err(LexError::KeywordMismatch {
                found: c,
                expected: keyword.text(),
                position: at,
            });
        }

        let matched = matched + 1;
        if matched == keyword.text().len() {
            self.emit(keyword.token(), self.lexeme_start);
            self.state = ScanState::AwaitValue;
        } else {
            self.state = ScanState::InKeyword { keyword, matched };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds `text` and returns the queued tokens without their positions.
    fn scan(text: &str) -> Result<(Vec<Token>, ScanState), LexError> {
        let mut scanner = Scanner::new();
        let mut at = TextPosition::START;
        for c in text.chars() {
            scanner.feed(c, at)?;
            at.advance(c);
        }
        let mut tokens = vec![];
        while let Some(spanned) = scanner.pop() {
            tokens.push(spanned.token);
        }
        Ok((tokens, scanner.state()))
    }

    #[test]
    fn test_structural_tokens() {
        let (tokens, state) = scan("{}[]:,").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LEFT_CURLY_BRACKET,
                Token::RIGHT_CURLY_BRACKET,
                Token::LEFT_SQUARE_BRACKET,
                Token::RIGHT_SQUARE_BRACKET,
                Token::COLON,
                Token::COMMA,
            ]
        );
        assert_eq!(state, ScanState::AwaitValue);
    }

    #[test]
    fn test_digit_run_stays_open_until_terminated() {
        let (tokens, state) = scan("123").unwrap();
        assert!(tokens.is_empty());
        assert_eq!(state, ScanState::InNumber);

        let (tokens, state) = scan("123 ").unwrap();
        assert_eq!(tokens, vec![Token::decimal("123")]);
        assert_eq!(state, ScanState::AwaitValue);
    }

    #[test]
    fn test_replay_queues_both_tokens_in_order() {
        let mut scanner = Scanner::new();
        let mut at = TextPosition::START;
        for c in "7]".chars() {
            scanner.feed(c, at).unwrap();
            at.advance(c);
        }
        let first = scanner.pop().unwrap();
        let second = scanner.pop().unwrap();
        assert_eq!(first.token, Token::decimal("7"));
        assert_eq!(first.start.column, 1);
        assert_eq!(second.token, Token::RIGHT_SQUARE_BRACKET);
        assert_eq!(second.start.column, 2);
        assert!(scanner.pop().is_none());
    }

    #[test]
    fn test_replay_reports_bad_terminator() {
        let err = scan("12x").unwrap_err();
        assert!(matches!(
            err,
            LexError::UnexpectedCharacter { found: 'x', position } if position.column == 3
        ));
    }

    #[test]
    fn test_digit_run_into_string_and_keyword() {
        let (tokens, _) = scan("1\"a\"2null").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::decimal("1"),
                Token::string("a"),
                Token::decimal("2"),
                Token::NULL,
            ]
        );
    }

    #[test]
    fn test_buffer_does_not_leak_between_lexemes() {
        let (tokens, _) = scan("\"abc\" 42 \"\" 7,").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::string("abc"),
                Token::decimal("42"),
                Token::string(""),
                Token::decimal("7"),
                Token::COMMA,
            ]
        );
    }

    #[test]
    fn test_string_keeps_everything_but_escaped_quote() {
        let (tokens, _) = scan(r#""a\"b{1}, true /é""#).unwrap();
        assert_eq!(tokens, vec![Token::string("a\"b{1}, true /é")]);
    }

    #[test]
    fn test_unsupported_escape() {
        let err = scan(r#""\n""#).unwrap_err();
        assert!(matches!(
            err,
            LexError::UnexpectedEscapedCharacter { found: 'n', .. }
        ));
    }

    #[test]
    fn test_keyword_mismatch_does_not_backtrack() {
        // `f` commits to `false`, even though `null` would not match either
        let err = scan("fun").unwrap_err();
        assert!(matches!(
            err,
            LexError::KeywordMismatch { found: 'u', expected: "false", .. }
        ));
    }

    #[test]
    fn test_keywords_need_no_separator() {
        let (tokens, _) = scan("truefalsenull").unwrap();
        assert_eq!(tokens, vec![Token::TRUE, Token::FALSE, Token::NULL]);
    }

    #[test]
    fn test_finish_reports_open_lexeme() {
        for (text, unclosed) in [
            ("\"abc", "string literal"),
            ("\"abc\\", "escape sequence"),
            ("12", "decimal literal"),
            ("tru", "keyword `true`"),
        ] {
            let mut scanner = Scanner::new();
            let mut at = TextPosition::START;
            for c in text.chars() {
                scanner.feed(c, at).unwrap();
                at.advance(c);
            }
            let err = scanner.finish(at).unwrap_err();
            assert!(
                matches!(err, LexError::UnexpectedEndOfInput { unclosed: u, .. } if u == unclosed),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn test_unexpected_lead_characters() {
        for c in ['%', '-', '.', 'x', '\'', '\u{000B}', '\u{00A0}'] {
            let err = scan(&c.to_string()).unwrap_err();
            assert!(
                matches!(err, LexError::UnexpectedCharacter { found, .. } if found == c),
                "{c:?}"
            );
        }
    }
}
