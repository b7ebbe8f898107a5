//! # JSON Lexer
//!
//! Pull-based token stream over a [`CharSource`]. Characters are read only
//! when the caller asks for a token and none is queued, and only until one
//! becomes available, so the input is consumed lazily and exactly once.
//!
//! ```
//! use jsontok::tokenizer::{JsonTokenizer, StrSource, Token};
//!
//! let mut stream = JsonTokenizer.tokens(StrSource::new(r#"{"a":1}"#));
//! assert!(stream.has_next().unwrap());
//! assert_eq!(stream.next_token().unwrap(), Token::LEFT_CURLY_BRACKET);
//! assert_eq!(stream.next_token().unwrap(), Token::string("a"));
//! ```
//!
//! Malformed input stops the stream at the first bad character:
//!
//! ```
//! use jsontok::tokenizer::{tokenize, LexError};
//!
//! let result = tokenize("[1, %]");
//! assert!(matches!(result, Err(LexError::UnexpectedCharacter { found: '%', .. })));
//! ```
use log::debug;
use std::iter::FusedIterator;

use crate::tokenizer::scanner::Scanner;
use crate::tokenizer::{
    CharSource, LexError, Spanned, StrSource, Token, TokenType,
};

/// Lifecycle of a [`TokenStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    /// The source may still hold characters.
    Scanning,
    /// The source ended cleanly.
    Exhausted,
    /// A scan or read error was reported.
    Failed,
}

/// A lazy, forward-only sequence of tokens read from a [`CharSource`].
///
/// Not restartable: create a new stream for each input. Besides the explicit
/// [`has_next`](Self::has_next) / [`next_token`](Self::next_token) pair, the
/// stream is an [`Iterator`] of `Result<Token, LexError>` that ends after the
/// first error.
#[derive(Debug)]
pub struct TokenStream<S> {
    source: S,
    scanner: Scanner,
    status: Status,
}

impl<S: CharSource> TokenStream<S> {
    /// Creates a stream reading from `source`.
    pub fn new(source: S) -> Self {
        debug!("starting token stream");
        Self {
            source,
            scanner: Scanner::new(),
            status: Status::Scanning,
        }
    }

    /// Whether another token is available.
    ///
    /// Returns immediately if a token is already queued. Otherwise reads
    /// characters until one is completed or the source ends, in which case
    /// the input must not end inside a string, number or keyword. Once an
    /// error has been returned, always reports `false`.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for malformed input or a failing source.
    pub fn has_next(&mut self) -> Result<bool, LexError> {
        if self.scanner.has_pending() {
            return Ok(true);
        }
        if self.status != Status::Scanning {
            return Ok(false);
        }

        if let Err(err) = self.fill() {
            debug!("token stream failed in state {:?}: {err}", self.scanner.state());
            // A token queued just before the failure is never handed out.
            self.scanner.discard_pending();
            self.status = Status::Failed;
            return Err(err);
        }
        Ok(self.scanner.has_pending())
    }

    /// Reads characters until a token is queued or the source is exhausted.
    fn fill(&mut self) -> Result<(), LexError> {
        while !self.scanner.has_pending() {
            if !self.source.has_next()? {
                self.scanner.finish(self.source.position())?;
                debug!("token stream exhausted at {}", self.source.position());
                self.status = Status::Exhausted;
                return Ok(());
            }
            let at = self.source.position();
            let c = self.source.next_char()?;
            self.scanner.feed(c, at)?;
        }
        Ok(())
    }

    /// Returns the next token along with the position it starts at.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::IterationExhausted`] if no token is left, or any
    /// error raised by [`has_next`](Self::has_next).
    pub fn next_spanned(&mut self) -> Result<Spanned, LexError> {
        if !self.has_next()? {
            return Err(LexError::IterationExhausted);
        }
        self.scanner.pop().ok_or(LexError::IterationExhausted)
    }

    /// Returns the next token.
    ///
    /// # Errors
    ///
    /// See [`next_spanned`](Self::next_spanned).
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.next_spanned().map(|spanned| spanned.token)
    }

    /// Turns this stream into an iterator over positioned tokens.
    pub const fn spanned(self) -> SpannedTokens<S> {
        SpannedTokens(self)
    }

    /// Returns the underlying source, positioned after the last character
    /// read.
    pub fn into_source(self) -> S {
        self.source
    }

    fn next_item(&mut self) -> Option<Result<Spanned, LexError>> {
        match self.has_next() {
            Ok(true) => self.scanner.pop().map(Ok),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl<S: CharSource> Iterator for TokenStream<S> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_item().map(|item| item.map(|spanned| spanned.token))
    }
}

impl<S: CharSource> FusedIterator for TokenStream<S> {}

/// Iterator over the [`Spanned`] tokens of a [`TokenStream`].
#[derive(Debug)]
pub struct SpannedTokens<S>(TokenStream<S>);

impl<S: CharSource> Iterator for SpannedTokens<S> {
    type Item = Result<Spanned, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_item()
    }
}

impl<S: CharSource> FusedIterator for SpannedTokens<S> {}

/// The JSON tokenizer: declares its terminal alphabet and opens token streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonTokenizer;

impl JsonTokenizer {
    /// The token types this tokenizer can produce, for use as a grammar's
    /// terminal symbols.
    #[must_use]
    pub const fn token_types(&self) -> &'static [TokenType] {
        &TokenType::ALL
    }

    /// Opens a lazy token stream over `source`.
    pub fn tokens<S: CharSource>(&self, source: S) -> TokenStream<S> {
        TokenStream::new(source)
    }
}

/// Tokenize a complete JSON text.
///
/// # Errors
///
/// Returns the first [`LexError`] encountered.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    JsonTokenizer.tokens(StrSource::new(text)).collect()
}
