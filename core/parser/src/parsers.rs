//! FILENAME: core/parser/src/parsers.rs
//! PURPOSE: Parser chain that converts a token sequence into an AST.
//! CONTEXT: This is the second stage of the parsing pipeline. Parsers form a
//! closed set of strategies tried in the order registered in the options.
//! Each strategy either claims the span, declines it, or fails with an
//! error; the first claim wins.
//!
//! STRATEGY SHAPES:
//!   Parenthesis --> "(" span ")"  |  name "(" args ")"
//!   Operation   --> left op right | op operand        (split by precedence)
//!   Constant    --> numeric literal
//!   Variable    --> name matching the active variable pattern
//!
//! The operation parser does not scan precedence levels one by one. It finds
//! the loosest-binding operator occurrence at parenthesis depth 0 (rightmost
//! for left-associative operators, leftmost for right-associative ones),
//! splits there, and recurses through the whole chain on both operand spans.

use serde::{Deserialize, Serialize};

use crate::ast::Expression;
use crate::number::Number;
use crate::operators::{Associativity, Operator};
use crate::options::ParsingOptions;
use crate::token::{Token, TokenKind};
use crate::tokenizer::TokenizeError;

/// Maximum recursion depth of the parser chain. Bounds the stack for
/// pathological inputs like thousands of nested parentheses; the evaluator
/// inherits the same bound because it walks what the parser built.
pub const MAX_DEPTH: usize = 512;

/// Parse errors with descriptive messages.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
        }
    }

    /// Error pointing at a token span, quoting the source text it covers.
    fn at_span(message: impl Into<String>, source: &str, tokens: &[Token]) -> Self {
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => ParseError::new(format!(
                "{}: '{}' at {}..{}",
                message.into(),
                &source[first.start..last.end],
                first.start,
                last.end
            )),
            _ => ParseError::new(message),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<TokenizeError> for ParseError {
    fn from(error: TokenizeError) -> Self {
        ParseError::new(error.to_string())
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// The closed set of parser strategies. The registered order decides which
/// strategy gets the first look at a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParserKind {
    Parenthesis,
    Operation,
    Constant,
    Variable,
}

impl ParserKind {
    /// Attempts this strategy on the span. `Ok(None)` means "not mine, try
    /// the next one"; `Err` aborts the whole parse.
    fn try_parse(
        self,
        source: &str,
        tokens: &[Token],
        options: &ParsingOptions,
        depth: usize,
    ) -> ParseResult<Option<Expression>> {
        match self {
            ParserKind::Parenthesis => try_parse_parenthesis(source, tokens, options, depth),
            ParserKind::Operation => try_parse_operation(source, tokens, options, depth),
            ParserKind::Constant => Ok(try_parse_constant(tokens)),
            ParserKind::Variable => Ok(try_parse_variable(tokens, options)),
        }
    }
}

/// Runs the registered parser chain against a token span and returns the
/// AST node covering it, or the first error. The source string is carried
/// along so errors can quote the exact text a span covers.
pub fn parse_span(
    source: &str,
    tokens: &[Token],
    options: &ParsingOptions,
    depth: usize,
) -> ParseResult<Expression> {
    if depth > MAX_DEPTH {
        return Err(ParseError::new(format!(
            "expression nested deeper than {} levels",
            MAX_DEPTH
        )));
    }

    if tokens.is_empty() {
        return Err(ParseError::new("empty expression"));
    }

    for kind in options.parsers() {
        if let Some(expression) = kind.try_parse(source, tokens, options, depth)? {
            return Ok(expression);
        }
    }

    Err(ParseError::at_span("unrecognized expression", source, tokens))
}

/// True if the operator token at `index` sits in binary position: it needs
/// a completed operand to its left. A leading operator, or one right after
/// another operator, '(' or ',', is prefix context instead.
fn is_binary_position(tokens: &[Token], index: usize) -> bool {
    match index.checked_sub(1).and_then(|i| tokens.get(i)) {
        Some(previous) => matches!(
            previous.kind,
            TokenKind::Value | TokenKind::CloseParen
        ),
        None => false,
    }
}

fn try_parse_operation(
    source: &str,
    tokens: &[Token],
    options: &ParsingOptions,
    depth: usize,
) -> ParseResult<Option<Expression>> {
    let mut paren_depth = 0usize;
    let mut split: Option<(usize, Operator)> = None;

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::OpenParen => paren_depth += 1,
            TokenKind::CloseParen => paren_depth = paren_depth.saturating_sub(1),
            TokenKind::Operator(symbol) if paren_depth == 0 => {
                if !is_binary_position(tokens, index) {
                    continue;
                }
                let operator = options.operator(symbol).ok_or_else(|| {
                    ParseError::new(format!("unknown operator '{}'", symbol))
                })?;
                split = Some(match split {
                    None => (index, operator),
                    Some((best_index, best)) => {
                        if operator.precedence < best.precedence {
                            (index, operator)
                        } else if operator.precedence == best.precedence {
                            match operator.associativity {
                                // Left associative: rightmost occurrence wins.
                                Associativity::Left => (index, operator),
                                // Right associative: keep the leftmost.
                                Associativity::Right => (best_index, best),
                            }
                        } else {
                            (best_index, best)
                        }
                    }
                });
            }
            _ => {}
        }
    }

    if let Some((index, operator)) = split {
        let right = &tokens[index + 1..];
        if right.is_empty() {
            return Err(ParseError::at_span(
                format!("missing right operand for '{}'", operator.symbol),
                source,
                tokens,
            ));
        }
        let left = parse_span(source, &tokens[..index], options, depth + 1)?;
        let right = parse_span(source, right, options, depth + 1)?;
        return Ok(Some(Expression::Binary {
            left: Box::new(left),
            op: operator,
            right: Box::new(right),
        }));
    }

    // No binary split point. A leading operator symbol is a prefix use,
    // which binds tighter than any binary use of the same symbol.
    if let TokenKind::Operator(symbol) = tokens[0].kind {
        let operator = options
            .operator(symbol)
            .ok_or_else(|| ParseError::new(format!("unknown operator '{}'", symbol)))?;
        if !operator.supports_unary() {
            return Err(ParseError::at_span(
                format!("operator '{}' cannot be used as prefix", symbol),
                source,
                tokens,
            ));
        }
        let operand = parse_span(source, &tokens[1..], options, depth + 1)?;
        return Ok(Some(Expression::Unary {
            op: operator,
            operand: Box::new(operand),
        }));
    }

    Ok(None)
}

fn try_parse_parenthesis(
    source: &str,
    tokens: &[Token],
    options: &ParsingOptions,
    depth: usize,
) -> ParseResult<Option<Expression>> {
    // Optional single value token in front is a candidate function name.
    let (name, open_index) = match tokens.first().map(|token| token.kind) {
        Some(TokenKind::OpenParen) => (None, 0),
        Some(TokenKind::Value)
            if matches!(tokens.get(1).map(|t| t.kind), Some(TokenKind::OpenParen)) =>
        {
            (Some(&tokens[0]), 1)
        }
        _ => return Ok(None),
    };

    // The parenthesis opened at `open_index` must close exactly at the end
    // of the span, otherwise the wrapper does not cover the whole span.
    if closing_index(tokens, open_index) != Some(tokens.len() - 1) {
        return Ok(None);
    }

    let interior = &tokens[open_index + 1..tokens.len() - 1];

    let Some(name) = name else {
        if interior.is_empty() {
            return Err(ParseError::at_span("empty parentheses", source, tokens));
        }
        return parse_span(source, interior, options, depth + 1).map(Some);
    };

    let function = options.function(&name.text).ok_or_else(|| {
        ParseError::new(format!(
            "unknown function '{}' at {}..{}",
            name.text, name.start, name.end
        ))
    })?;

    let argument_spans = split_arguments(interior);
    if !function.arity().accepts(argument_spans.len()) {
        return Err(ParseError::new(format!(
            "function '{}' expects {} argument(s), found {}",
            function.name(),
            function.arity(),
            argument_spans.len()
        )));
    }

    let mut args = Vec::with_capacity(argument_spans.len());
    for span in argument_spans {
        if span.is_empty() {
            return Err(ParseError::new(format!(
                "missing argument in call to '{}'",
                function.name()
            )));
        }
        args.push(parse_span(source, span, options, depth + 1)?);
    }

    Ok(Some(Expression::FunctionCall {
        function: function.clone(),
        args,
    }))
}

/// Index of the close parenthesis matching the open at `open_index`.
fn closing_index(tokens: &[Token], open_index: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open_index) {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits a call interior on depth-0 separators. An empty interior is an
/// empty argument list.
fn split_arguments(interior: &[Token]) -> Vec<&[Token]> {
    if interior.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut begin = 0;

    for (index, token) in interior.iter().enumerate() {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => depth = depth.saturating_sub(1),
            TokenKind::Separator if depth == 0 => {
                spans.push(&interior[begin..index]);
                begin = index + 1;
            }
            _ => {}
        }
    }
    spans.push(&interior[begin..]);

    spans
}

fn try_parse_constant(tokens: &[Token]) -> Option<Expression> {
    match tokens {
        [token] if token.kind == TokenKind::Value => {
            Number::from_literal(&token.text).map(Expression::Constant)
        }
        _ => None,
    }
}

fn try_parse_variable(tokens: &[Token], options: &ParsingOptions) -> Option<Expression> {
    let [token] = tokens else {
        return None;
    };
    if token.kind != TokenKind::Value {
        return None;
    }

    let pattern = options.variable_pattern();
    if pattern.escaped {
        pattern
            .strip(&token.text)
            .map(|name| Expression::Variable(name.to_string()))
    } else {
        let name = token.text.trim();
        if name.is_empty() {
            None
        } else {
            Some(Expression::Variable(name.to_string()))
        }
    }
}
