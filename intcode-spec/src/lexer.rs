//! # Lexer for Intcode program text

use logos::Logos;

/// Tokens of the comma-separated program format
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")] // Whitespace between words and the trailing newline
pub enum Token {
    /// Decimal integer, optionally negative. Parsed by the caller so that
    /// out-of-range literals can be reported separately.
    #[regex(r"-?[0-9]+")]
    Number,

    /// Word separator
    #[token(",")]
    Comma,
}
