//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for equations.
//! CONTEXT: After the tokenizer splits an equation string, the parser chain
//! converts the tokens into this tree structure. The engine crate then
//! traverses the tree to compute the final result.
//!
//! Nodes own their children exclusively (a tree, never a graph) and are
//! immutable after parsing, so a finished Equation can be evaluated
//! repeatedly and from several threads at once. Operator and function
//! entries are resolved against the active catalogs during parsing and
//! embedded in the nodes, which is why an unknown name is a parse error
//! rather than an evaluation error.

use crate::functions::MathFunction;
use crate::number::Number;
use crate::operators::Operator;
use crate::variables::VariablePattern;

/// A parsed equation node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A numeric literal: 12 or 3.5.
    Constant(Number),

    /// A variable reference by name, resolved late against storage.
    Variable(String),

    /// A prefix operation: -x or +3.
    Unary {
        op: Operator,
        operand: Box<Expression>,
    },

    /// A binary operation: left op right.
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// A function call like sqrt(2) or min(1, [x], 3).
    FunctionCall {
        function: MathFunction,
        args: Vec<Expression>,
    },
}

impl Expression {
    /// Renders the expression back to parseable text. Binary operations are
    /// fully parenthesized so the output never depends on precedence, and
    /// variables are wrapped according to the given pattern. Re-parsing the
    /// output under the same options yields an equivalent tree.
    pub fn render(&self, pattern: &VariablePattern) -> String {
        match self {
            Expression::Constant(number) => number.to_string(),
            Expression::Variable(name) => pattern.wrap(name),
            Expression::Unary { op, operand } => {
                format!("{}({})", op.symbol, operand.render(pattern))
            }
            Expression::Binary { left, op, right } => format!(
                "({}{}{})",
                left.render(pattern),
                op.symbol,
                right.render(pattern)
            ),
            Expression::FunctionCall { function, args } => {
                let rendered: Vec<String> =
                    args.iter().map(|arg| arg.render(pattern)).collect();
                format!("{}({})", function.name(), rendered.join(","))
            }
        }
    }
}

/// A successfully parsed equation: the root AST node plus the original
/// source text, retained for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub(crate) root: Expression,
    pub(crate) source: String,
}

impl Equation {
    pub fn root(&self) -> &Expression {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Re-renders the tree to parseable text, see [`Expression::render`].
    pub fn render(&self, pattern: &VariablePattern) -> String {
        self.root.render(pattern)
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}
