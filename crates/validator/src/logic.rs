//! The pluggable logic-expression seam
//!
//! Logic checks delegate to a [`LogicEvaluator`]. The default is
//! [`veridian_expression::ExpressionEngine`]; anything that can turn an
//! expression string plus a context into a boolean can be plugged in.
//!
//! The error split matters: a [`LogicErrorKind::Syntax`] failure means the
//! rule itself is broken and aborts the call, while a
//! [`LogicErrorKind::Evaluation`] failure is swallowed fail-open by the
//! rule evaluator (with a diagnostic).

use std::fmt;
use thiserror::Error;
use veridian_expression::{EvaluationContext, ExpressionEngine};

/// Evaluates a boolean logic expression against a context.
pub trait LogicEvaluator: Send + Sync {
    /// Evaluates `expression` against `context`.
    fn eval_bool(
        &self,
        expression: &str,
        context: &EvaluationContext,
    ) -> Result<bool, LogicError>;
}

/// What went wrong while running a logic expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicErrorKind {
    /// The expression text is malformed — a rule-definition problem.
    Syntax,
    /// The expression failed against this particular context.
    Evaluation,
}

impl fmt::Display for LogicErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Evaluation => write!(f, "evaluation"),
        }
    }
}

/// A failed logic-expression run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error in logic expression: {message}")]
pub struct LogicError {
    /// Whether the failure is in the text or in this evaluation.
    pub kind: LogicErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl LogicError {
    /// A malformed-expression error.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self {
            kind: LogicErrorKind::Syntax,
            message: message.into(),
        }
    }

    /// An evaluation failure.
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self {
            kind: LogicErrorKind::Evaluation,
            message: message.into(),
        }
    }

    /// Whether this is a rule-definition (syntax) problem.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        self.kind == LogicErrorKind::Syntax
    }
}

impl LogicEvaluator for ExpressionEngine {
    fn eval_bool(
        &self,
        expression: &str,
        context: &EvaluationContext,
    ) -> Result<bool, LogicError> {
        self.evaluate_bool(expression, context).map_err(|err| {
            if err.is_syntax() {
                LogicError::syntax(err.to_string())
            } else {
                LogicError::evaluation(err.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn engine_classifies_errors() {
        let engine = ExpressionEngine::new();
        let context = EvaluationContext::builder()
            .binding("age", json!(20))
            .build();

        assert_eq!(engine.eval_bool("age >= 18", &context), Ok(true));

        let syntax = engine.eval_bool("age >=", &context).unwrap_err();
        assert!(syntax.is_syntax());

        let eval = engine.eval_bool("missingFn(age)", &context).unwrap_err();
        assert_eq!(eval.kind, LogicErrorKind::Evaluation);
    }
}
