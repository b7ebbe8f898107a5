//! # JSON Token
//!
//! Defines the terminal alphabet produced by the tokenizer, the immutable
//! [`Token`] values carrying it, and the [`TextPosition`] each token starts at.
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display};
use std::str::FromStr;

/// The type tag of a [`Token`].
///
/// The kebab-case names (see [`TokenType::name`]) are the terminal symbols a
/// grammar references verbatim.
#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TokenType {
    /* Delimiters */
    /// Opening curly brace `{`
    LeftCurlyBracket,

    /// Closing curly brace `}`
    RightCurlyBracket,

    /// Opening square bracket `[`
    LeftSquareBracket,

    /// Closing square bracket `]`
    RightSquareBracket,

    /* Values */
    /// Quoted string, value is the unescaped content
    String,

    /// Unsigned digit run, value is the digits as written
    Decimal,

    /// The `null` literal
    Null,

    /// The `true` literal
    True,

    /// The `false` literal
    False,

    /* Separators */
    /// Colon character `:`
    Colon,

    /// Comma character `,`
    Comma,
}

impl TokenType {
    /// Every token type, in the order the tokenizer declares them.
    pub const ALL: [Self; 11] = [
        Self::LeftCurlyBracket,
        Self::RightCurlyBracket,
        Self::LeftSquareBracket,
        Self::RightSquareBracket,
        Self::String,
        Self::Decimal,
        Self::Null,
        Self::True,
        Self::False,
        Self::Colon,
        Self::Comma,
    ];

    /// Terminal name of this type, e.g. `left-curly-bracket`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftCurlyBracket => "left-curly-bracket",
            Self::RightCurlyBracket => "right-curly-bracket",
            Self::LeftSquareBracket => "left-square-bracket",
            Self::RightSquareBracket => "right-square-bracket",
            Self::String => "string",
            Self::Decimal => "decimal",
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
            Self::Colon => "colon",
            Self::Comma => "comma",
        }
    }

    /// The fixed source text of this type, or `None` for the value-bearing
    /// `string` and `decimal` types.
    #[must_use]
    pub const fn lexeme(self) -> Option<&'static str> {
        match self {
            Self::LeftCurlyBracket => Some("{"),
            Self::RightCurlyBracket => Some("}"),
            Self::LeftSquareBracket => Some("["),
            Self::RightSquareBracket => Some("]"),
            Self::Null => Some("null"),
            Self::True => Some("true"),
            Self::False => Some("false"),
            Self::Colon => Some(":"),
            Self::Comma => Some(","),
            Self::String | Self::Decimal => None,
        }
    }

    /// Whether tokens of this type carry a value.
    #[must_use]
    pub const fn is_value_bearing(self) -> bool {
        matches!(self, Self::String | Self::Decimal)
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known [`TokenType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTokenType(pub String);

impl Error for UnknownTokenType {}

impl Display for UnknownTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown token type: {}", self.0)
    }
}

impl FromStr for TokenType {
    type Err = UnknownTokenType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownTokenType(s.to_string()))
    }
}

/// A single token produced by the tokenizer.
///
/// Fixed tokens (structural characters and keywords) never carry a value;
/// `string` and `decimal` tokens always do. Tokens compare by content.
///
/// Serializes to the wire shape `{"type": ..., "value": ...}`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    kind: TokenType,
    value: Option<String>,
}

impl Token {
    /// `{`
    pub const LEFT_CURLY_BRACKET: Self = Self::fixed(TokenType::LeftCurlyBracket);
    /// `}`
    pub const RIGHT_CURLY_BRACKET: Self = Self::fixed(TokenType::RightCurlyBracket);
    /// `[`
    pub const LEFT_SQUARE_BRACKET: Self = Self::fixed(TokenType::LeftSquareBracket);
    /// `]`
    pub const RIGHT_SQUARE_BRACKET: Self = Self::fixed(TokenType::RightSquareBracket);
    /// `:`
    pub const COLON: Self = Self::fixed(TokenType::Colon);
    /// `,`
    pub const COMMA: Self = Self::fixed(TokenType::Comma);
    /// `null`
    pub const NULL: Self = Self::fixed(TokenType::Null);
    /// `true`
    pub const TRUE: Self = Self::fixed(TokenType::True);
    /// `false`
    pub const FALSE: Self = Self::fixed(TokenType::False);

    const fn fixed(kind: TokenType) -> Self {
        Self { kind, value: None }
    }

    /// A `string` token holding the already unescaped content.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            kind: TokenType::String,
            value: Some(value.into()),
        }
    }

    /// A `decimal` token holding the digit run as written.
    #[must_use]
    pub fn decimal(value: impl Into<String>) -> Self {
        Self {
            kind: TokenType::Decimal,
            value: Some(value.into()),
        }
    }

    /// The type tag.
    #[must_use]
    pub const fn kind(&self) -> TokenType {
        self.kind
    }

    /// The payload of a `string` or `decimal` token.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Consumes the token, returning its payload.
    #[must_use]
    pub fn into_value(self) -> Option<String> {
        self.value
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}({value:?})", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// A location in the input text.
///
/// `line` and `column` are 1-based; `offset` counts characters (not bytes)
/// from the start of the input.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct TextPosition {
    /// Line number, starting at 1
    pub line: usize,
    /// Column number, starting at 1
    pub column: usize,
    /// Characters consumed before this position
    pub offset: usize,
}

impl TextPosition {
    /// The position of the first character of any input.
    pub const START: Self = Self {
        line: 1,
        column: 1,
        offset: 0,
    };

    /// Moves past `c`, starting a new line after `\n`.
    pub const fn advance(&mut self, c: char) {
        self.offset += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::START
    }
}

impl Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A [`Token`] tagged with the position of its first character.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Spanned {
    /// The token itself
    #[serde(flatten)]
    pub token: Token,
    /// Where the token's lexeme starts
    pub start: TextPosition,
}
