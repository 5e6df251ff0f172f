//! FILENAME: core/parser/src/functions.rs
//! PURPOSE: Function catalog consumed by the parenthesis parser and evaluator.
//! CONTEXT: Functions are looked up by name (case-insensitive) while parsing
//! "name(arg, ...)" spans. Argument counts are checked against the declared
//! arity at parse time, so evaluation never sees a call with the wrong shape.
//!
//! STANDARD CATALOG:
//! - Single argument: abs, sqrt, cbrt, exp, ln, log10, sin, cos, tan,
//!   asin, acos, atan, sinh, cosh, tanh, floor, ceil, round, signum
//! - Variadic (one or more arguments): min, max, sum

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::number::{MathError, Number};

/// Declared argument count of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// One entry of the function catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct MathFunction {
    /// Lowercase name used for case-insensitive lookup.
    name: String,
    arity: Arity,
    eval: fn(&[Number]) -> Result<Number, MathError>,
}

impl MathFunction {
    pub fn new(
        name: impl Into<String>,
        arity: Arity,
        eval: fn(&[Number]) -> Result<Number, MathError>,
    ) -> Self {
        MathFunction {
            name: name.into().to_lowercase(),
            arity,
            eval,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Applies the implementation to already-evaluated arguments.
    pub fn apply(&self, args: &[Number]) -> Result<Number, MathError> {
        (self.eval)(args)
    }
}

impl std::fmt::Display for MathFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Extracts the single argument of a one-argument function.
fn single(args: &[Number]) -> Result<Number, MathError> {
    match args {
        [value] => Ok(*value),
        _ => Err(MathError::Domain),
    }
}

/// Shared body for functions that compute in f64 and return Float.
fn float_unary(args: &[Number], f: fn(f64) -> f64) -> Result<Number, MathError> {
    let value = single(args)?;
    Number::from_checked(f(value.as_f64()))
}

fn eval_abs(args: &[Number]) -> Result<Number, MathError> {
    match single(args)? {
        Number::Int(i) => match i.checked_abs() {
            Some(v) => Ok(Number::Int(v)),
            None => Number::from_checked((i as f64).abs()),
        },
        Number::Float(f) => Ok(Number::Float(f.abs())),
    }
}

fn eval_sqrt(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::sqrt)
}

fn eval_cbrt(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::cbrt)
}

fn eval_exp(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::exp)
}

fn eval_ln(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::ln)
}

fn eval_log10(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::log10)
}

fn eval_sin(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::sin)
}

fn eval_cos(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::cos)
}

fn eval_tan(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::tan)
}

fn eval_asin(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::asin)
}

fn eval_acos(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::acos)
}

fn eval_atan(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::atan)
}

fn eval_sinh(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::sinh)
}

fn eval_cosh(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::cosh)
}

fn eval_tanh(args: &[Number]) -> Result<Number, MathError> {
    float_unary(args, f64::tanh)
}

fn eval_floor(args: &[Number]) -> Result<Number, MathError> {
    match single(args)? {
        Number::Int(i) => Ok(Number::Int(i)),
        Number::Float(f) => Ok(Number::Float(f.floor())),
    }
}

fn eval_ceil(args: &[Number]) -> Result<Number, MathError> {
    match single(args)? {
        Number::Int(i) => Ok(Number::Int(i)),
        Number::Float(f) => Ok(Number::Float(f.ceil())),
    }
}

fn eval_round(args: &[Number]) -> Result<Number, MathError> {
    match single(args)? {
        Number::Int(i) => Ok(Number::Int(i)),
        Number::Float(f) => Ok(Number::Float(f.round())),
    }
}

fn eval_signum(args: &[Number]) -> Result<Number, MathError> {
    match single(args)? {
        Number::Int(i) => Ok(Number::Int(i.signum())),
        Number::Float(f) => {
            if f == 0.0 {
                Ok(Number::Float(0.0))
            } else {
                Ok(Number::Float(f.signum()))
            }
        }
    }
}

fn at_least_one(args: &[Number]) -> Result<(), MathError> {
    if args.is_empty() {
        Err(MathError::Domain)
    } else {
        Ok(())
    }
}

fn eval_min(args: &[Number]) -> Result<Number, MathError> {
    at_least_one(args)?;
    let mut best = args[0];
    for value in &args[1..] {
        if value.as_f64() < best.as_f64() {
            best = *value;
        }
    }
    Ok(best)
}

fn eval_max(args: &[Number]) -> Result<Number, MathError> {
    at_least_one(args)?;
    let mut best = args[0];
    for value in &args[1..] {
        if value.as_f64() > best.as_f64() {
            best = *value;
        }
    }
    Ok(best)
}

fn eval_sum(args: &[Number]) -> Result<Number, MathError> {
    at_least_one(args)?;
    let mut total = args[0];
    for value in &args[1..] {
        total = total.add(*value)?;
    }
    Ok(total)
}

/// The default function set, shared process-wide.
pub static STANDARD_FUNCTIONS: Lazy<Vec<MathFunction>> = Lazy::new(|| {
    vec![
        MathFunction::new("abs", Arity::Exactly(1), eval_abs),
        MathFunction::new("sqrt", Arity::Exactly(1), eval_sqrt),
        MathFunction::new("cbrt", Arity::Exactly(1), eval_cbrt),
        MathFunction::new("exp", Arity::Exactly(1), eval_exp),
        MathFunction::new("ln", Arity::Exactly(1), eval_ln),
        MathFunction::new("log10", Arity::Exactly(1), eval_log10),
        MathFunction::new("sin", Arity::Exactly(1), eval_sin),
        MathFunction::new("cos", Arity::Exactly(1), eval_cos),
        MathFunction::new("tan", Arity::Exactly(1), eval_tan),
        MathFunction::new("asin", Arity::Exactly(1), eval_asin),
        MathFunction::new("acos", Arity::Exactly(1), eval_acos),
        MathFunction::new("atan", Arity::Exactly(1), eval_atan),
        MathFunction::new("sinh", Arity::Exactly(1), eval_sinh),
        MathFunction::new("cosh", Arity::Exactly(1), eval_cosh),
        MathFunction::new("tanh", Arity::Exactly(1), eval_tanh),
        MathFunction::new("floor", Arity::Exactly(1), eval_floor),
        MathFunction::new("ceil", Arity::Exactly(1), eval_ceil),
        MathFunction::new("round", Arity::Exactly(1), eval_round),
        MathFunction::new("signum", Arity::Exactly(1), eval_signum),
        MathFunction::new("min", Arity::AtLeast(1), eval_min),
        MathFunction::new("max", Arity::AtLeast(1), eval_max),
        MathFunction::new("sum", Arity::AtLeast(1), eval_sum),
    ]
});
