//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the equation tokenizer.
//! CONTEXT: Tokens are the atomic units produced by the tokenizer and
//! consumed by the parser chain. Each token keeps its raw source text and
//! byte offsets so parse errors can point at the offending span.

use serde::{Deserialize, Serialize};

/// Classifies a token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// An unclassified span of source text: a number literal, a variable
    /// (including its escape delimiters), or a function name.
    Value,
    /// A registered operator symbol.
    Operator(char),
    /// Opening parenthesis.
    OpenParen,
    /// Closing parenthesis.
    CloseParen,
    /// Argument separator (comma).
    Separator,
}

/// One lexical unit of an equation string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text of the token, trimmed for value tokens.
    pub text: String,
    /// Byte offset of the first character within the source string.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Token {
    pub fn value(text: impl Into<String>, start: usize, end: usize) -> Self {
        Token {
            kind: TokenKind::Value,
            text: text.into(),
            start,
            end,
        }
    }

    pub fn operator(symbol: char, position: usize) -> Self {
        Token {
            kind: TokenKind::Operator(symbol),
            text: symbol.to_string(),
            start: position,
            end: position + symbol.len_utf8(),
        }
    }

    pub fn open_paren(position: usize) -> Self {
        Token {
            kind: TokenKind::OpenParen,
            text: "(".to_string(),
            start: position,
            end: position + 1,
        }
    }

    pub fn close_paren(position: usize) -> Self {
        Token {
            kind: TokenKind::CloseParen,
            text: ")".to_string(),
            start: position,
            end: position + 1,
        }
    }

    pub fn separator(position: usize) -> Self {
        Token {
            kind: TokenKind::Separator,
            text: ",".to_string(),
            start: position,
            end: position + 1,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
