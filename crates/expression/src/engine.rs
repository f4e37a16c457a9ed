//! Parse-and-evaluate facade
//!
//! [`ExpressionEngine`] is the entry point most callers want: hand it the
//! expression source and a context, get a value (or boolean) back.

use crate::context::EvaluationContext;
use crate::error::ExpressionResult;
use crate::eval::Evaluator;
use crate::parser;
use crate::value_utils::to_boolean;
use serde_json::Value;
use tracing::trace;

/// Stateless expression engine: parses the source and evaluates the AST.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionEngine {
    evaluator: Evaluator,
}

impl ExpressionEngine {
    /// Create a new engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `source` against `context`, returning the resulting value.
    pub fn evaluate(&self, source: &str, context: &EvaluationContext) -> ExpressionResult<Value> {
        let expr = parser::parse(source)?;
        trace!(source, "evaluating expression");
        self.evaluator.eval(&expr, context)
    }

    /// Evaluate `source` and coerce the result to a boolean (truthiness).
    pub fn evaluate_bool(
        &self,
        source: &str,
        context: &EvaluationContext,
    ) -> ExpressionResult<bool> {
        Ok(to_boolean(&self.evaluate(source, context)?))
    }
}
