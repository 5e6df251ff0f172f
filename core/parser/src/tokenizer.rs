//! FILENAME: core/parser/src/tokenizer.rs
//! PURPOSE: Scans a raw equation string and produces a list of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. The scan walks
//! the string once, keeping a pending span. Registered tokenizers are looked
//! up per character through a delimiter map; a character nobody claims simply
//! extends the pending span. When a tokenizer claims its character the
//! pending span (if non-blank) becomes a value token and structural tokens
//! are appended.
//!
//! In the default configuration "12*([x]+3)^2" is turned into:
//!   "12", "*", "(", "[x]", "+", "3", ")", "^", "2"
//!
//! ESCAPING: while the scan is inside an escaped variable region (between
//! the pattern's opening and closing characters) operator and parenthesis
//! characters must not split. The variable tokenizer never splits itself; it
//! only maintains the escape depth that the other tokenizers consult. For
//! patterns whose opening and closing character are the same, the depth
//! toggles between 0 and 1 instead of counting.

use serde::{Deserialize, Serialize};

use crate::options::ParsingOptions;
use crate::token::Token;
use crate::variables::VariablePattern;

/// Tokenization errors with the byte position of the offending character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    pub message: String,
    pub position: usize,
}

impl TokenizeError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        TokenizeError {
            message: message.into(),
            position,
        }
    }
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tokenize error at {}: {}", self.position, self.message)
    }
}

impl std::error::Error for TokenizeError {}

pub type TokenizeResult<T> = Result<T, TokenizeError>;

/// The closed set of tokenizer behaviors. Which characters trigger which
/// behavior is decided by the delimiter map derived from the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenizerKind {
    /// Maintains the variable escape depth; never splits.
    Variable,
    /// Handles '(' ')' ',' and tracks parenthesis balance.
    Parenthesis,
    /// Splits on registered operator symbols.
    Operator,
}

/// Mutable state threaded through a single tokenize call. Never shared
/// across invocations.
#[derive(Debug, Default)]
struct TokenizerContext {
    /// Depth of escaped variable regions. Splitting is prohibited while > 0.
    variable_depth: usize,
    /// Open parenthesis count, for the balance check.
    paren_depth: usize,
}

impl TokenizerContext {
    fn split_prohibited(&self) -> bool {
        self.variable_depth > 0
    }
}

/// Tokenizes the given equation string using the tokenizers registered in
/// the options. The resulting tokens cover every non-blank part of the
/// input, in order, with no overlaps.
pub fn tokenize(equation: &str, options: &ParsingOptions) -> TokenizeResult<Vec<Token>> {
    let delimiter_map = options.delimiter_map();
    let pattern = options.variable_pattern();

    let mut tokens: Vec<Token> = Vec::with_capacity(32);
    let mut context = TokenizerContext::default();
    let mut begin = 0;

    for (index, character) in equation.char_indices() {
        let Some(kind) = delimiter_map.get(&character) else {
            continue;
        };

        let consumed = match kind {
            TokenizerKind::Variable => {
                handle_variable(character, index, &pattern, &mut context)?
            }
            TokenizerKind::Parenthesis => handle_parenthesis(
                character,
                index,
                equation,
                begin,
                &mut tokens,
                &mut context,
            )?,
            TokenizerKind::Operator => {
                handle_operator(character, index, equation, begin, &mut tokens, &mut context)
            }
        };

        if consumed {
            begin = index + character.len_utf8();
        }
    }

    if context.variable_depth != 0 {
        return Err(TokenizeError::new(
            format!("unterminated variable escape, missing '{}'", pattern.closing),
            equation.len(),
        ));
    }

    if context.paren_depth != 0 {
        return Err(TokenizeError::new(
            "unbalanced parentheses, missing ')'",
            equation.len(),
        ));
    }

    push_pending(&mut tokens, equation, begin, equation.len());

    Ok(tokens)
}

/// Emits the pending span [begin, end) as a value token if it is non-blank.
/// Offsets are adjusted so the token points at the trimmed text.
fn push_pending(tokens: &mut Vec<Token>, equation: &str, begin: usize, end: usize) {
    let raw = &equation[begin..end];
    let text = raw.trim();
    if text.is_empty() {
        return;
    }
    let start = begin + (raw.len() - raw.trim_start().len());
    tokens.push(Token::value(text, start, start + text.len()));
}

/// The variable tokenizer never splits; it only book-keeps the escape depth
/// so operators and parentheses between the delimiters stay part of the
/// pending span.
fn handle_variable(
    character: char,
    index: usize,
    pattern: &VariablePattern,
    context: &mut TokenizerContext,
) -> TokenizeResult<bool> {
    if pattern.opening == pattern.closing {
        // Ambiguous delimiter: toggle between "outside" and "inside".
        if context.split_prohibited() {
            context.variable_depth -= 1;
        } else {
            context.variable_depth += 1;
        }
    } else if character == pattern.opening {
        context.variable_depth += 1;
    } else {
        if context.variable_depth == 0 {
            return Err(TokenizeError::new(
                format!("'{}' without matching '{}'", character, pattern.opening),
                index,
            ));
        }
        context.variable_depth -= 1;
    }

    Ok(false)
}

/// Splits on '(' ')' ',' unless inside an escaped variable region, and
/// tracks parenthesis balance.
fn handle_parenthesis(
    character: char,
    index: usize,
    equation: &str,
    begin: usize,
    tokens: &mut Vec<Token>,
    context: &mut TokenizerContext,
) -> TokenizeResult<bool> {
    if context.split_prohibited() {
        return Ok(false);
    }

    push_pending(tokens, equation, begin, index);

    match character {
        '(' => {
            context.paren_depth += 1;
            tokens.push(Token::open_paren(index));
        }
        ')' => {
            if context.paren_depth == 0 {
                return Err(TokenizeError::new("')' without matching '('", index));
            }
            context.paren_depth -= 1;
            tokens.push(Token::close_paren(index));
        }
        _ => tokens.push(Token::separator(index)),
    }

    Ok(true)
}

/// Splits on a registered operator symbol unless inside an escaped variable
/// region.
fn handle_operator(
    character: char,
    index: usize,
    equation: &str,
    begin: usize,
    tokens: &mut Vec<Token>,
    context: &mut TokenizerContext,
) -> bool {
    if context.split_prohibited() {
        return false;
    }

    push_pending(tokens, equation, begin, index);
    tokens.push(Token::operator(character, index));

    true
}
