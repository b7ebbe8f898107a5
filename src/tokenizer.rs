//! # Tokenizer/ Lexer
//!
//! Turns a stream of characters from a JSON document into a lazily produced
//! stream of tokens.
pub mod error;
pub mod lexer;
pub(crate) mod scanner;
pub mod source;
pub mod token;

// Re-exports
pub use error::LexError;
pub use lexer::{JsonTokenizer, SpannedTokens, TokenStream, tokenize};
pub use source::{CharSource, ReaderSource, StrSource};
pub use token::{Spanned, TextPosition, Token, TokenType, UnknownTokenType};
