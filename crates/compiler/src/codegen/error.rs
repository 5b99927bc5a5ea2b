//! Code generation error types.

use std::fmt;

/// Semantic failures detected while walking the AST.
///
/// The parser only accepts well-formed trees, so everything left to go
/// wrong at this stage is a name-resolution or placement problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeGenError {
    /// A variable reference with no enclosing declaration or parameter.
    UndefinedVariable(String),
    /// A function name used where a variable is required.
    NotAVariable(String),
    /// A variable name used as a call target.
    NotAFunction(String),
    /// `break` outside the dynamic extent of a loop.
    BreakOutsideLoop,
    /// `continue` outside the dynamic extent of a loop.
    ContinueOutsideLoop,
}

impl fmt::Display for CodeGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeGenError::UndefinedVariable(name) => {
                write!(f, "Undefined variable: {}", name)
            }
            CodeGenError::NotAVariable(name) => {
                write!(f, "'{}' is a function, not a variable", name)
            }
            CodeGenError::NotAFunction(name) => {
                write!(f, "'{}' is a variable, not a function", name)
            }
            CodeGenError::BreakOutsideLoop => write!(f, "Break statement outside of loop"),
            CodeGenError::ContinueOutsideLoop => {
                write!(f, "Continue statement outside of loop")
            }
        }
    }
}

impl std::error::Error for CodeGenError {}
