//! FILENAME: core/parser/src/operators.rs
//! PURPOSE: Operator catalog consumed by the parser chain and evaluator.
//! CONTEXT: Operators are data, not parser logic. Each entry declares its
//! symbol, precedence, associativity, the binary implementation, and an
//! optional unary (prefix) implementation. The operation parser consults
//! precedence/associativity when choosing a split point; it never hard-codes
//! behavior per symbol.
//!
//! STANDARD CATALOG:
//! - "+" "-"  precedence 1, left associative, usable as prefix
//! - "*" "/"  precedence 2, left associative
//! - "^"      precedence 3, right associative

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::number::{MathError, Number};

/// Tie-breaking rule for operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Associativity {
    /// a-b-c groups as (a-b)-c: the split point is the rightmost occurrence.
    Left,
    /// a^b^c groups as a^(b^c): the split point is the leftmost occurrence.
    Right,
}

/// One entry of the operator catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operator {
    pub symbol: char,
    /// Lower binds looser; the operation parser splits at the lowest
    /// precedence present in a span.
    pub precedence: u8,
    pub associativity: Associativity,
    binary: fn(Number, Number) -> Result<Number, MathError>,
    unary: Option<fn(Number) -> Result<Number, MathError>>,
}

impl Operator {
    pub const fn new(
        symbol: char,
        precedence: u8,
        associativity: Associativity,
        binary: fn(Number, Number) -> Result<Number, MathError>,
    ) -> Self {
        Operator {
            symbol,
            precedence,
            associativity,
            binary,
            unary: None,
        }
    }

    pub const fn with_unary(
        symbol: char,
        precedence: u8,
        associativity: Associativity,
        binary: fn(Number, Number) -> Result<Number, MathError>,
        unary: fn(Number) -> Result<Number, MathError>,
    ) -> Self {
        Operator {
            symbol,
            precedence,
            associativity,
            binary,
            unary: Some(unary),
        }
    }

    /// True if the operator may appear in prefix position, like the minus
    /// in "-3".
    pub fn supports_unary(&self) -> bool {
        self.unary.is_some()
    }

    /// Applies the binary implementation.
    pub fn apply(&self, left: Number, right: Number) -> Result<Number, MathError> {
        (self.binary)(left, right)
    }

    /// Applies the unary implementation. The parser only builds unary nodes
    /// for operators that declare one, so Domain here means a hand-built AST.
    pub fn apply_unary(&self, operand: Number) -> Result<Number, MathError> {
        match self.unary {
            Some(unary) => unary(operand),
            None => Err(MathError::Domain),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

fn add(left: Number, right: Number) -> Result<Number, MathError> {
    left.add(right)
}

fn subtract(left: Number, right: Number) -> Result<Number, MathError> {
    left.sub(right)
}

fn multiply(left: Number, right: Number) -> Result<Number, MathError> {
    left.mul(right)
}

fn divide(left: Number, right: Number) -> Result<Number, MathError> {
    left.div(right)
}

fn power(left: Number, right: Number) -> Result<Number, MathError> {
    left.pow(right)
}

fn identity(operand: Number) -> Result<Number, MathError> {
    Ok(operand)
}

fn negate(operand: Number) -> Result<Number, MathError> {
    operand.neg()
}

/// Standard arithmetic operators, precedence 1 (loosest) to 3 (tightest).
pub const ADDITION: Operator = Operator::with_unary('+', 1, Associativity::Left, add, identity);
pub const SUBTRACTION: Operator =
    Operator::with_unary('-', 1, Associativity::Left, subtract, negate);
pub const MULTIPLICATION: Operator = Operator::new('*', 2, Associativity::Left, multiply);
pub const DIVISION: Operator = Operator::new('/', 2, Associativity::Left, divide);
pub const POWER: Operator = Operator::new('^', 3, Associativity::Right, power);

/// The default operator set, shared process-wide.
pub static STANDARD_OPERATORS: Lazy<Vec<Operator>> =
    Lazy::new(|| vec![ADDITION, SUBTRACTION, MULTIPLICATION, DIVISION, POWER]);
