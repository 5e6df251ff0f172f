//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the equation parser.
//! CONTEXT: This crate converts arithmetic equation strings into immutable
//! expression trees. The engine crate evaluates those trees against
//! variable storage.
//!
//! PIPELINE: Equation String --> Tokenizer --> Tokens --> Parser Chain --> AST
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, / and ^ (power), with configurable catalogs
//! - Unary prefix: -x, +x
//! - Integer/float literals with exact integer arithmetic where possible
//! - Variables: [x] (default), {x}, $x$, or unwrapped x
//! - Function calls: sqrt(2), min(1, [x], 3)
//! - Parentheses for grouping
//! - Parse-time validation of operator, function, and argument-count use

pub mod ast;
pub mod equation;
pub mod functions;
pub mod number;
pub mod operators;
pub mod options;
pub mod parsers;
pub mod token;
pub mod tokenizer;
pub mod variables;


// Re-export commonly used types for convenience
pub use ast::{Equation, Expression};
pub use equation::ParsedEquation;
pub use functions::{Arity, MathFunction, STANDARD_FUNCTIONS};
pub use number::{MathError, Number};
pub use operators::{Associativity, Operator, STANDARD_OPERATORS};
pub use options::ParsingOptions;
pub use parsers::{ParseError, ParseResult, ParserKind};
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, TokenizeError, TokenizerKind};
pub use variables::VariablePattern;
