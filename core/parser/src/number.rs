//! FILENAME: core/parser/src/number.rs
//! PURPOSE: Numeric domain shared by literals, operators, and functions.
//! CONTEXT: Equations compute over a single `Number` type that keeps
//! integer results exact for as long as possible and promotes to floating
//! point only when it has to.
//!
//! PROMOTION RULE (applies everywhere, so repeated evaluation is deterministic):
//! - A literal without '.' or an exponent parses as Int, otherwise Float.
//! - +, -, * on two Ints stay Int (checked); on overflow the operation is
//!   redone in f64.
//! - / on two Ints stays Int only when the division is exact.
//! - ^ on an Int base with a nonnegative Int exponent uses checked_pow;
//!   otherwise f64::powf.
//! - Any Float operand makes the whole operation evaluate in f64.
//! - A non-finite f64 result is never returned silently: NaN becomes a
//!   Domain error and +/-infinity an Overflow error.

use serde::{Deserialize, Serialize};

/// A numeric value, either exact integer or double-precision float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Numeric failures raised by operators and functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MathError {
    /// Division by zero, integer or float.
    DivisionByZero,
    /// The result does not fit the numeric domain (infinite float result).
    Overflow,
    /// The input is outside the domain of the operation (NaN result).
    Domain,
}

impl std::fmt::Display for MathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MathError::DivisionByZero => write!(f, "division by zero"),
            MathError::Overflow => write!(f, "numeric overflow"),
            MathError::Domain => write!(f, "argument outside domain"),
        }
    }
}

impl std::error::Error for MathError {}

impl Number {
    /// Parses a trimmed literal. Integers stay exact, everything else goes
    /// through f64. Non-finite spellings like "inf" or "NaN" are rejected.
    pub fn from_literal(text: &str) -> Option<Number> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number::Int(i));
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(Number::Float(v)),
            _ => None,
        }
    }

    /// Wraps an f64 result, rejecting NaN and infinity.
    pub fn from_checked(value: f64) -> Result<Number, MathError> {
        if value.is_nan() {
            Err(MathError::Domain)
        } else if value.is_infinite() {
            Err(MathError::Overflow)
        } else {
            Ok(Number::Float(value))
        }
    }

    /// Returns the value as f64, converting Ints lossily if above 2^53.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn add(self, rhs: Number) -> Result<Number, MathError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(v) => Ok(Number::Int(v)),
                None => Number::from_checked(a as f64 + b as f64),
            },
            _ => Number::from_checked(self.as_f64() + rhs.as_f64()),
        }
    }

    pub fn sub(self, rhs: Number) -> Result<Number, MathError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_sub(b) {
                Some(v) => Ok(Number::Int(v)),
                None => Number::from_checked(a as f64 - b as f64),
            },
            _ => Number::from_checked(self.as_f64() - rhs.as_f64()),
        }
    }

    pub fn mul(self, rhs: Number) -> Result<Number, MathError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_mul(b) {
                Some(v) => Ok(Number::Int(v)),
                None => Number::from_checked(a as f64 * b as f64),
            },
            _ => Number::from_checked(self.as_f64() * rhs.as_f64()),
        }
    }

    /// Division fails on a zero divisor instead of producing Inf/NaN.
    /// Exact integer divisions stay Int.
    pub fn div(self, rhs: Number) -> Result<Number, MathError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                if b == 0 {
                    return Err(MathError::DivisionByZero);
                }
                // checked_div/rem guard the i64::MIN / -1 edge
                match (a.checked_div(b), a.checked_rem(b)) {
                    (Some(q), Some(0)) => Ok(Number::Int(q)),
                    _ => Number::from_checked(a as f64 / b as f64),
                }
            }
            _ => {
                let divisor = rhs.as_f64();
                if divisor == 0.0 {
                    return Err(MathError::DivisionByZero);
                }
                Number::from_checked(self.as_f64() / divisor)
            }
        }
    }

    pub fn pow(self, rhs: Number) -> Result<Number, MathError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) if (0..=u32::MAX as i64).contains(&b) => {
                match a.checked_pow(b as u32) {
                    Some(v) => Ok(Number::Int(v)),
                    None => Number::from_checked((a as f64).powf(b as f64)),
                }
            }
            _ => Number::from_checked(self.as_f64().powf(rhs.as_f64())),
        }
    }

    pub fn neg(self) -> Result<Number, MathError> {
        match self {
            Number::Int(a) => match a.checked_neg() {
                Some(v) => Ok(Number::Int(v)),
                None => Number::from_checked(-(a as f64)),
            },
            Number::Float(f) => Ok(Number::Float(-f)),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value as i64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            // Debug formatting keeps the decimal point on integral floats,
            // so rendered text parses back to a Float rather than an Int.
            Number::Float(v) => write!(f, "{:?}", v),
        }
    }
}
