//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the equation engine.
//! CONTEXT: Re-exports the evaluator and storage types for use by other
//! crates. Parsing lives in the `parser` crate; this crate turns a parsed
//! Equation plus variable bindings into a Number.

pub mod evaluator;
pub mod storage;

// Re-export commonly used types at the crate root
pub use evaluator::{evaluate, EvalError, EvalResult};
pub use storage::{SimpleStorage, VariableStorage};
