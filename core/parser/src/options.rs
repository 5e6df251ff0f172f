//! FILENAME: core/parser/src/options.rs
//! PURPOSE: Parsing options: active catalogs, variable pattern, and the
//! registered tokenizer/parser order.
//! CONTEXT: Options are assembly, not algorithm. The default configuration
//! is a process-wide immutable singleton; custom configurations start from a
//! mutable copy of it and swap catalogs or the variable pattern.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::functions::{MathFunction, STANDARD_FUNCTIONS};
use crate::operators::{Operator, STANDARD_OPERATORS};
use crate::parsers::ParserKind;
use crate::tokenizer::TokenizerKind;
use crate::variables::{VariablePattern, BRACKETS};

static DEFAULT_OPTIONS: Lazy<ParsingOptions> = Lazy::new(ParsingOptions::with_defaults);

/// Everything the tokenizer and parser chain need to know about the active
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsingOptions {
    variable_pattern: VariablePattern,
    operators: Vec<Operator>,
    functions: Vec<MathFunction>,
    parsers: Vec<ParserKind>,
    tokenizers: Vec<TokenizerKind>,
}

impl ParsingOptions {
    /// The shared default configuration: bracketed variables, standard
    /// operator and function catalogs, default tokenizer/parser order.
    pub fn default_options() -> &'static ParsingOptions {
        &DEFAULT_OPTIONS
    }

    /// An empty configuration with nothing registered. Tokenizing with it
    /// produces a single value token; parsing will reject everything but
    /// constants once parsers are registered.
    pub fn empty() -> Self {
        ParsingOptions {
            variable_pattern: BRACKETS,
            operators: Vec::new(),
            functions: Vec::new(),
            parsers: Vec::new(),
            tokenizers: Vec::new(),
        }
    }

    /// A mutable copy of the default configuration.
    pub fn with_defaults() -> Self {
        Self::default_with(
            STANDARD_OPERATORS.clone(),
            STANDARD_FUNCTIONS.clone(),
        )
    }

    /// Default configuration restricted to the given operators.
    pub fn default_with_operators(operators: Vec<Operator>) -> Self {
        Self::default_with(operators, STANDARD_FUNCTIONS.clone())
    }

    /// Default configuration restricted to the given functions. Useful both
    /// for limiting the standard set and for adding custom functions.
    pub fn default_with_functions(functions: Vec<MathFunction>) -> Self {
        Self::default_with(STANDARD_OPERATORS.clone(), functions)
    }

    /// Default tokenizer/parser order with the given catalogs.
    pub fn default_with(operators: Vec<Operator>, functions: Vec<MathFunction>) -> Self {
        let mut options = Self::empty();

        options.operators = operators;
        options.functions = functions;

        options.register_parser(ParserKind::Parenthesis);
        options.register_parser(ParserKind::Operation);
        options.register_parser(ParserKind::Constant);
        options.register_parser(ParserKind::Variable);

        options.register_tokenizer(TokenizerKind::Variable);
        options.register_tokenizer(TokenizerKind::Parenthesis);
        options.register_tokenizer(TokenizerKind::Operator);

        options
    }

    pub fn variable_pattern(&self) -> VariablePattern {
        self.variable_pattern
    }

    pub fn set_variable_pattern(&mut self, pattern: VariablePattern) {
        self.variable_pattern = pattern;
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn set_operators(&mut self, operators: Vec<Operator>) {
        self.operators = operators;
    }

    pub fn functions(&self) -> &[MathFunction] {
        &self.functions
    }

    pub fn set_functions(&mut self, functions: Vec<MathFunction>) {
        self.functions = functions;
    }

    pub fn parsers(&self) -> &[ParserKind] {
        &self.parsers
    }

    pub fn register_parser(&mut self, parser: ParserKind) {
        if !self.parsers.contains(&parser) {
            self.parsers.push(parser);
        }
    }

    pub fn unregister_parser(&mut self, parser: ParserKind) {
        self.parsers.retain(|registered| *registered != parser);
    }

    pub fn tokenizers(&self) -> &[TokenizerKind] {
        &self.tokenizers
    }

    pub fn register_tokenizer(&mut self, tokenizer: TokenizerKind) {
        if !self.tokenizers.contains(&tokenizer) {
            self.tokenizers.push(tokenizer);
        }
    }

    pub fn unregister_tokenizer(&mut self, tokenizer: TokenizerKind) {
        self.tokenizers.retain(|registered| *registered != tokenizer);
    }

    /// Looks up an operator by symbol.
    pub fn operator(&self, symbol: char) -> Option<Operator> {
        self.operators
            .iter()
            .find(|operator| operator.symbol == symbol)
            .copied()
    }

    /// Looks up a function by name, case-insensitively.
    pub fn function(&self, name: &str) -> Option<&MathFunction> {
        self.functions
            .iter()
            .find(|function| function.matches(name))
    }

    /// Derives the character-to-tokenizer dispatch map from the registered
    /// tokenizers. Registration order wins on conflicts: a character already
    /// claimed by an earlier tokenizer is not reassigned.
    pub fn delimiter_map(&self) -> HashMap<char, TokenizerKind> {
        let mut map = HashMap::new();

        for tokenizer in &self.tokenizers {
            match tokenizer {
                TokenizerKind::Variable => {
                    if self.variable_pattern.escaped {
                        map.entry(self.variable_pattern.opening)
                            .or_insert(TokenizerKind::Variable);
                        map.entry(self.variable_pattern.closing)
                            .or_insert(TokenizerKind::Variable);
                    }
                }
                TokenizerKind::Parenthesis => {
                    for character in ['(', ')', ','] {
                        map.entry(character).or_insert(TokenizerKind::Parenthesis);
                    }
                }
                TokenizerKind::Operator => {
                    for operator in &self.operators {
                        map.entry(operator.symbol).or_insert(TokenizerKind::Operator);
                    }
                }
            }
        }

        map
    }
}

impl Default for ParsingOptions {
    fn default() -> Self {
        Self::with_defaults()
    }
}
