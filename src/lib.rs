/*!
# `jsontok` Library

Incremental JSON tokenizer for grammar-driven parsers. Tokens are pulled one
at a time from a [`tokenizer::TokenStream`], which reads only as many
characters from its source as the next token needs.

```
use jsontok::tokenizer::{tokenize, Token};

let tokens = tokenize("[1,2]").expect("valid input");
assert_eq!(
    tokens,
    vec![
        Token::LEFT_SQUARE_BRACKET,
        Token::decimal("1"),
        Token::COMMA,
        Token::decimal("2"),
        Token::RIGHT_SQUARE_BRACKET,
    ]
);
```
*/

pub mod commands;
pub mod tokenizer;
pub mod utils;
