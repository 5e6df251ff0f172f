//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Evaluates parsed equations against variable storage.
//! CONTEXT: After an equation is parsed into an AST, this module walks the
//! tree post-order and computes the final Number. Operator and function
//! implementations were resolved at parse time and live inside the nodes;
//! the only late binding left is the variable lookup.
//!
//! Evaluation never mutates the tree, so one Equation can be evaluated
//! concurrently from several threads as long as the storage is read-safe.
//! Any operand failure short-circuits the parent and propagates unchanged.

use serde::{Deserialize, Serialize};

use parser::{Equation, Expression, MathError, Number};

use crate::storage::VariableStorage;

/// Evaluation failures. Parse-time validation leaves only late-bound
/// variable resolution and numeric failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvalError {
    /// The equation references a variable the storage does not contain.
    UnresolvedVariable(String),
    /// An operator or function failed numerically.
    Math(MathError),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::UnresolvedVariable(name) => {
                write!(f, "unresolved variable '{}'", name)
            }
            EvalError::Math(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<MathError> for EvalError {
    fn from(error: MathError) -> Self {
        EvalError::Math(error)
    }
}

pub type EvalResult = Result<Number, EvalError>;

/// Evaluates an equation against the given storage.
pub fn evaluate(equation: &Equation, storage: &dyn VariableStorage) -> EvalResult {
    log::debug!("evaluating '{}'", equation.source());

    let result = eval_node(equation.root(), storage);

    if let Err(error) = &result {
        log::debug!("evaluation of '{}' failed: {}", equation.source(), error);
    }

    result
}

/// Recursive post-order walk: children first, then the parent combines
/// them. Recursion depth is bounded by the parser's nesting limit.
fn eval_node(expression: &Expression, storage: &dyn VariableStorage) -> EvalResult {
    match expression {
        Expression::Constant(number) => Ok(*number),

        Expression::Variable(name) => storage
            .value_of(name)
            .ok_or_else(|| EvalError::UnresolvedVariable(name.clone())),

        Expression::Unary { op, operand } => {
            let value = eval_node(operand, storage)?;
            Ok(op.apply_unary(value)?)
        }

        Expression::Binary { left, op, right } => {
            let left = eval_node(left, storage)?;
            let right = eval_node(right, storage)?;
            Ok(op.apply(left, right)?)
        }

        Expression::FunctionCall { function, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_node(arg, storage)?);
            }
            Ok(function.apply(&values)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SimpleStorage;
    use parser::{variables, MathError, ParsingOptions};

    fn parse(text: &str) -> Equation {
        Equation::try_parse(text, ParsingOptions::default_options()).expect("parse")
    }

    fn parse_unescaped(text: &str) -> Equation {
        let mut options = ParsingOptions::with_defaults();
        options.set_variable_pattern(variables::NONE);
        Equation::try_parse(text, &options).expect("parse")
    }

    #[test]
    fn evaluates_constants_and_operators() {
        let storage = SimpleStorage::new();

        assert_eq!(evaluate(&parse("1+2*3"), &storage), Ok(Number::Int(7)));
        assert_eq!(evaluate(&parse("(1+2)*3"), &storage), Ok(Number::Int(9)));
        assert_eq!(evaluate(&parse("2^3^2"), &storage), Ok(Number::Int(512)));
        assert_eq!(evaluate(&parse("2-3-4"), &storage), Ok(Number::Int(-5)));
    }

    #[test]
    fn precedence_with_variable_substitution() {
        let equation = parse_unescaped("2*x^2+5");
        let mut storage = SimpleStorage::new();

        let expected = [5, 7, 13, 23, 37];
        for (i, expected) in expected.iter().enumerate() {
            storage.put("x", i as i64);
            assert_eq!(
                evaluate(&equation, &storage),
                Ok(Number::Int(*expected)),
                "x = {}",
                i
            );
        }
    }

    #[test]
    fn bracketed_variables_resolve_from_storage() {
        let equation = parse("12*([x]+3)^2");
        let mut storage = SimpleStorage::new();
        storage.put("x", -1);

        assert_eq!(evaluate(&equation, &storage), Ok(Number::Int(48)));
    }

    #[test]
    fn unresolved_variable_names_the_variable() {
        let equation = parse("2+[missing]");
        let storage = SimpleStorage::new();

        assert_eq!(
            evaluate(&equation, &storage),
            Err(EvalError::UnresolvedVariable("missing".to_string()))
        );
    }

    #[test]
    fn division_by_zero_fails_at_evaluation_time() {
        let storage = SimpleStorage::new();

        // Parsing succeeds; the failure is numeric, not syntactic.
        let equation = parse("5/0");
        assert_eq!(
            evaluate(&equation, &storage),
            Err(EvalError::Math(MathError::DivisionByZero))
        );

        let equation = parse("5/0.0");
        assert_eq!(
            evaluate(&equation, &storage),
            Err(EvalError::Math(MathError::DivisionByZero))
        );
    }

    #[test]
    fn integer_division_promotes_only_when_inexact() {
        let storage = SimpleStorage::new();

        assert_eq!(evaluate(&parse("6/2"), &storage), Ok(Number::Int(3)));
        assert_eq!(evaluate(&parse("7/2"), &storage), Ok(Number::Float(3.5)));
        assert_eq!(evaluate(&parse("7.0/2"), &storage), Ok(Number::Float(3.5)));
    }

    #[test]
    fn unary_minus_and_powers() {
        let storage = SimpleStorage::new();

        assert_eq!(evaluate(&parse("-3+5"), &storage), Ok(Number::Int(2)));
        assert_eq!(evaluate(&parse("2*-3"), &storage), Ok(Number::Int(-6)));
        assert_eq!(evaluate(&parse("2^-1"), &storage), Ok(Number::Float(0.5)));
    }

    #[test]
    fn functions_evaluate_arguments_left_to_right() {
        let storage = SimpleStorage::new();

        assert_eq!(evaluate(&parse("sqrt(16)"), &storage), Ok(Number::Float(4.0)));
        assert_eq!(
            evaluate(&parse("min(3, 1+1, 7)"), &storage),
            Ok(Number::Int(2))
        );
        assert_eq!(
            evaluate(&parse("sum(1, 2, 3, 4)"), &storage),
            Ok(Number::Int(10))
        );
        assert_eq!(evaluate(&parse("abs(-5)"), &storage), Ok(Number::Int(5)));
    }

    #[test]
    fn numeric_domain_failures_are_captured() {
        let storage = SimpleStorage::new();

        assert_eq!(
            evaluate(&parse("sqrt(-1)"), &storage),
            Err(EvalError::Math(MathError::Domain))
        );
        assert_eq!(
            evaluate(&parse("ln(0)"), &storage),
            Err(EvalError::Math(MathError::Overflow))
        );
    }

    #[test]
    fn operand_failure_short_circuits() {
        let equation = parse("1+[a]*(5/0)");
        let mut storage = SimpleStorage::new();
        storage.put("a", 2);

        // The innermost failure propagates unchanged.
        assert_eq!(
            evaluate(&equation, &storage),
            Err(EvalError::Math(MathError::DivisionByZero))
        );
    }

    #[test]
    fn repeated_evaluation_is_deterministic() {
        let equation = parse("([x]+0.1)*3");
        let mut storage = SimpleStorage::new();
        storage.put("x", 1.4);

        let first = evaluate(&equation, &storage);
        for _ in 0..10 {
            assert_eq!(evaluate(&equation, &storage), first);
        }
    }

    #[test]
    fn shared_equation_evaluates_concurrently() {
        let equation = parse("2*[x]^2+5");
        let mut storage = SimpleStorage::new();
        storage.put("x", 3);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| evaluate(&equation, &storage)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().expect("join"), Ok(Number::Int(23)));
            }
        });
    }
}
