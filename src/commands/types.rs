//! `types` subcommand.
use std::io::{self, Write};

use crate::tokenizer::JsonTokenizer;

/// Writes the tokenizer's terminal alphabet to `writer`, one name per line.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_token_types<W: Write>(writer: &mut W) -> io::Result<()> {
    for kind in JsonTokenizer.token_types() {
        writeln!(writer, "{kind}")?;
    }
    Ok(())
}
