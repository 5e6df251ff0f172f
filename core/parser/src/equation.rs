//! FILENAME: core/parser/src/equation.rs
//! PURPOSE: Parse entry points and the error-capture wrapper.
//! CONTEXT: Both entry points run the same tokenize-then-parse pipeline and
//! differ only in how a failure surfaces. `try_parse` returns a Result the
//! caller propagates with `?`; `parse` captures the failure inside a
//! `ParsedEquation` the caller inspects.

use crate::ast::Equation;
use crate::options::ParsingOptions;
use crate::parsers::{parse_span, ParseError, ParseResult};
use crate::tokenizer::tokenize;

impl Equation {
    /// Parses an equation string, surfacing failures at the call site.
    pub fn try_parse(text: &str, options: &ParsingOptions) -> ParseResult<Equation> {
        let tokens = tokenize(text, options)?;

        if tokens.is_empty() {
            return Err(ParseError::new("empty equation"));
        }

        let root = parse_span(text, &tokens, options, 0)?;

        Ok(Equation {
            root,
            source: text.to_string(),
        })
    }

    /// Parses an equation string, capturing any failure instead of
    /// returning it.
    pub fn parse(text: &str, options: &ParsingOptions) -> ParsedEquation {
        match Equation::try_parse(text, options) {
            Ok(equation) => ParsedEquation {
                equation: Some(equation),
                error: None,
            },
            Err(error) => ParsedEquation {
                equation: None,
                error: Some(error),
            },
        }
    }
}

/// Outcome of a capturing parse: either the equation or the error, never
/// both, never neither.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEquation {
    equation: Option<Equation>,
    error: Option<ParseError>,
}

impl ParsedEquation {
    pub fn is_present(&self) -> bool {
        self.equation.is_some()
    }

    pub fn equation(&self) -> Option<&Equation> {
        self.equation.as_ref()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Returns the equation or panics with the captured error message.
    /// Use [`ParsedEquation::into_result`] when the failure should be
    /// handled instead.
    pub fn get(&self) -> &Equation {
        match &self.equation {
            Some(equation) => equation,
            None => match &self.error {
                Some(error) => panic!("{}", error),
                None => unreachable!("ParsedEquation without equation or error"),
            },
        }
    }

    pub fn into_result(self) -> ParseResult<Equation> {
        match (self.equation, self.error) {
            (Some(equation), _) => Ok(equation),
            (None, Some(error)) => Err(error),
            (None, None) => Err(ParseError::new("empty parse outcome")),
        }
    }
}
