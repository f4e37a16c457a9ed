//! Error types for expression parsing and evaluation
//!
//! The two classes matter to callers: [`ExpressionError::Parse`] means the
//! expression text itself is malformed (a rule-definition problem), while
//! every other variant is raised while evaluating a well-formed expression
//! against a particular context.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type ExpressionResult<T> = Result<T, ExpressionError>;

/// Errors produced by the expression engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// The expression source is syntactically invalid.
    #[error("parse error at offset {offset}: {message}")]
    Parse {
        /// Byte offset into the source where the error was detected.
        offset: usize,
        /// Human-readable description of what went wrong.
        message: String,
    },

    /// A variable was not bound in the evaluation context.
    #[error("unknown variable '{0}'")]
    VariableNotFound(String),

    /// A function was not installed on the evaluation context.
    #[error("unknown function '{0}'")]
    FunctionNotFound(String),

    /// A property path stepped through a key that does not exist.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    /// An operator or access was applied to a value of the wrong type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// What the operation required.
        expected: String,
        /// What it was given.
        actual: String,
    },

    /// An array index fell outside the array.
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// The requested index.
        index: i64,
        /// The array length.
        len: usize,
    },

    /// Division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The expression nests deeper than the evaluator allows.
    #[error("maximum recursion depth ({0}) exceeded")]
    RecursionLimit(usize),
}

impl ExpressionError {
    /// Returns true for errors in the expression *text* (as opposed to
    /// errors raised while evaluating it against a context).
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_syntax() {
        assert!(ExpressionError::parse(3, "unexpected token").is_syntax());
        assert!(!ExpressionError::VariableNotFound("x".into()).is_syntax());
        assert!(!ExpressionError::DivisionByZero.is_syntax());
    }

    #[test]
    fn display_includes_offset() {
        let err = ExpressionError::parse(7, "expected ')'");
        assert_eq!(err.to_string(), "parse error at offset 7: expected ')'");
    }
}
