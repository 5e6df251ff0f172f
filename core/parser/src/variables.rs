//! FILENAME: core/parser/src/variables.rs
//! PURPOSE: Variable patterns describing how variable names are delimited.
//! CONTEXT: A pattern decides whether "x" must be written as [x], {x}, $x$,
//! or plain x inside an equation string. Escaped patterns let variable names
//! contain characters that would otherwise be read as operators or
//! parentheses, e.g. "[profit (net)]".

use serde::{Deserialize, Serialize};

/// Describes how variable names are wrapped in equation text.
///
/// When `escaped` is false the opening/closing characters are unused and no
/// character is treated specially during tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariablePattern {
    pub escaped: bool,
    pub opening: char,
    pub closing: char,
}

/// Default pattern: variables written as [x].
pub const BRACKETS: VariablePattern = VariablePattern::escaped('[', ']');

/// Variables written as {x}.
pub const BRACES: VariablePattern = VariablePattern::escaped('{', '}');

/// Variables written as $x$. Opening and closing are the same character,
/// which makes the tokenizer toggle its escape depth instead of counting.
pub const DOLLARS: VariablePattern = VariablePattern::escaped('$', '$');

/// Variables written without any wrapping, e.g. "2+x".
pub const NONE: VariablePattern = VariablePattern::none();

impl VariablePattern {
    pub const fn escaped(opening: char, closing: char) -> Self {
        VariablePattern {
            escaped: true,
            opening,
            closing,
        }
    }

    pub const fn none() -> Self {
        VariablePattern {
            escaped: false,
            opening: '\0',
            closing: '\0',
        }
    }

    /// Wraps a variable name according to this pattern, for rendering.
    pub fn wrap(&self, name: &str) -> String {
        if self.escaped {
            format!("{}{}{}", self.opening, name, self.closing)
        } else {
            name.to_string()
        }
    }

    /// Strips the delimiters from an escaped variable span. Returns None if
    /// the span is not delimited by this pattern or the inner name is empty
    /// or contains further delimiter characters.
    pub fn strip<'a>(&self, text: &'a str) -> Option<&'a str> {
        if !self.escaped {
            return None;
        }
        let inner = text
            .strip_prefix(self.opening)
            .and_then(|rest| rest.strip_suffix(self.closing))?;
        if inner.trim().is_empty()
            || inner.contains(self.opening)
            || inner.contains(self.closing)
        {
            return None;
        }
        Some(inner)
    }
}

impl Default for VariablePattern {
    fn default() -> Self {
        BRACKETS
    }
}
