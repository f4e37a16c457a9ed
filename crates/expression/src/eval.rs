//! AST evaluation
//!
//! Walks a parsed [`Expr`] against an [`EvaluationContext`]. Logical
//! operators use truthiness coercion and short-circuit; comparisons work on
//! numbers and strings; property/index access walks JSON objects and arrays;
//! function calls dispatch to the predicate table installed on the context.

use crate::ast::{BinaryOp, Expr};
use crate::context::EvaluationContext;
use crate::error::{ExpressionError, ExpressionResult};
use crate::value_utils::{number_as_f64, to_boolean, value_type_name};
use serde_json::Value;

/// Maximum recursion depth for expression evaluation
const MAX_RECURSION_DEPTH: usize = 256;

/// Evaluator for expression ASTs
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Create a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluate an expression in the given context
    #[inline]
    pub fn eval(&self, expr: &Expr, context: &EvaluationContext) -> ExpressionResult<Value> {
        self.eval_with_depth(expr, context, 0)
    }

    fn eval_with_depth(
        &self,
        expr: &Expr,
        context: &EvaluationContext,
        depth: usize,
    ) -> ExpressionResult<Value> {
        if depth > MAX_RECURSION_DEPTH {
            return Err(ExpressionError::RecursionLimit(MAX_RECURSION_DEPTH));
        }
        match expr {
            Expr::Literal(value) => Ok(value.clone()),

            Expr::Variable(name) => context
                .binding(name)
                .cloned()
                .ok_or_else(|| ExpressionError::VariableNotFound(name.to_string())),

            Expr::Property { object, name } => {
                let object = self.eval_with_depth(object, context, depth + 1)?;
                match object {
                    Value::Object(map) => map
                        .get(name.as_ref())
                        .cloned()
                        .ok_or_else(|| ExpressionError::UnknownProperty(name.to_string())),
                    other => Err(ExpressionError::type_mismatch(
                        "object",
                        value_type_name(&other),
                    )),
                }
            }

            Expr::Index { object, index } => {
                let object = self.eval_with_depth(object, context, depth + 1)?;
                let index = self.eval_with_depth(index, context, depth + 1)?;
                self.access_index(&object, &index)
            }

            Expr::Call { name, args } => {
                let function = context
                    .function(name)
                    .cloned()
                    .ok_or_else(|| ExpressionError::FunctionNotFound(name.to_string()))?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_with_depth(arg, context, depth + 1)?);
                }
                Ok(Value::Bool(function(&values)))
            }

            Expr::Not(inner) => {
                let value = self.eval_with_depth(inner, context, depth + 1)?;
                Ok(Value::Bool(!to_boolean(&value)))
            }

            Expr::Negate(inner) => {
                let value = self.eval_with_depth(inner, context, depth + 1)?;
                match value {
                    Value::Number(ref n) => {
                        if let Some(i) = n.as_i64() {
                            Ok(Value::Number((-i).into()))
                        } else if let Some(f) = n.as_f64() {
                            Ok(serde_json::json!(-f))
                        } else {
                            Err(ExpressionError::type_mismatch("number", "number"))
                        }
                    }
                    other => Err(ExpressionError::type_mismatch(
                        "number",
                        value_type_name(&other),
                    )),
                }
            }

            Expr::Binary { left, op, right } => self.eval_binary(*op, left, right, context, depth),
        }
    }

    fn eval_binary(
        &self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        context: &EvaluationContext,
        depth: usize,
    ) -> ExpressionResult<Value> {
        // Short-circuit evaluation for logical operators
        match op {
            BinaryOp::And => {
                let left = self.eval_with_depth(left, context, depth + 1)?;
                if !to_boolean(&left) {
                    return Ok(Value::Bool(false));
                }
                let right = self.eval_with_depth(right, context, depth + 1)?;
                Ok(Value::Bool(to_boolean(&right)))
            }
            BinaryOp::Or => {
                let left = self.eval_with_depth(left, context, depth + 1)?;
                if to_boolean(&left) {
                    return Ok(Value::Bool(true));
                }
                let right = self.eval_with_depth(right, context, depth + 1)?;
                Ok(Value::Bool(to_boolean(&right)))
            }
            _ => {
                let left = self.eval_with_depth(left, context, depth + 1)?;
                let right = self.eval_with_depth(right, context, depth + 1)?;
                match op {
                    BinaryOp::Equal => Ok(Value::Bool(left == right)),
                    BinaryOp::NotEqual => Ok(Value::Bool(left != right)),
                    BinaryOp::LessThan => compare(&left, &right, |o| o.is_lt()),
                    BinaryOp::LessEqual => compare(&left, &right, |o| o.is_le()),
                    BinaryOp::GreaterThan => compare(&left, &right, |o| o.is_gt()),
                    BinaryOp::GreaterEqual => compare(&left, &right, |o| o.is_ge()),
                    BinaryOp::Add => add(&left, &right),
                    BinaryOp::Subtract => arithmetic(&left, &right, i64::checked_sub, |a, b| a - b),
                    BinaryOp::Multiply => arithmetic(&left, &right, i64::checked_mul, |a, b| a * b),
                    BinaryOp::Divide => divide(&left, &right),
                    BinaryOp::Modulo => modulo(&left, &right),
                    BinaryOp::And | BinaryOp::Or => unreachable!(), // handled above
                }
            }
        }
    }

    fn access_index(&self, object: &Value, index: &Value) -> ExpressionResult<Value> {
        match (object, index) {
            (Value::Array(items), Value::Number(n)) => {
                let Some(i) = n.as_i64() else {
                    return Err(ExpressionError::type_mismatch("integer index", "number"));
                };
                usize::try_from(i)
                    .ok()
                    .and_then(|i| items.get(i))
                    .cloned()
                    .ok_or(ExpressionError::IndexOutOfBounds {
                        index: i,
                        len: items.len(),
                    })
            }
            (Value::Object(map), Value::String(key)) => map
                .get(key)
                .cloned()
                .ok_or_else(|| ExpressionError::UnknownProperty(key.clone())),
            (other, _) => Err(ExpressionError::type_mismatch(
                "array or object",
                value_type_name(other),
            )),
        }
    }
}

fn compare(
    left: &Value,
    right: &Value,
    check: fn(std::cmp::Ordering) -> bool,
) -> ExpressionResult<Value> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => {
            let (Some(l), Some(r)) = (number_as_f64(l), number_as_f64(r)) else {
                return Err(ExpressionError::type_mismatch("number", "number"));
            };
            let ordering = l
                .partial_cmp(&r)
                .ok_or_else(|| ExpressionError::type_mismatch("comparable numbers", "NaN"))?;
            Ok(Value::Bool(check(ordering)))
        }
        (Value::String(l), Value::String(r)) => Ok(Value::Bool(check(l.as_str().cmp(r)))),
        (l, r) => Err(ExpressionError::type_mismatch(
            "two numbers or two strings",
            format!("{} and {}", value_type_name(l), value_type_name(r)),
        )),
    }
}

fn add(left: &Value, right: &Value) -> ExpressionResult<Value> {
    match (left, right) {
        (Value::Number(_), Value::Number(_)) => {
            arithmetic(left, right, i64::checked_add, |a, b| a + b)
        }
        (Value::String(l), Value::String(r)) => {
            let mut result = String::with_capacity(l.len() + r.len());
            result.push_str(l);
            result.push_str(r);
            Ok(Value::String(result))
        }
        (l, r) => Err(ExpressionError::type_mismatch(
            "number or string",
            format!("{} and {}", value_type_name(l), value_type_name(r)),
        )),
    }
}

fn arithmetic(
    left: &Value,
    right: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> ExpressionResult<Value> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => {
            if let (Some(li), Some(ri)) = (l.as_i64(), r.as_i64()) {
                // Integer arithmetic, falling back to float on overflow
                Ok(int_op(li, ri).map_or_else(
                    || serde_json::json!(float_op(li as f64, ri as f64)),
                    |result| Value::Number(result.into()),
                ))
            } else {
                let (Some(lf), Some(rf)) = (number_as_f64(l), number_as_f64(r)) else {
                    return Err(ExpressionError::type_mismatch("number", "number"));
                };
                Ok(serde_json::json!(float_op(lf, rf)))
            }
        }
        (l, r) => Err(ExpressionError::type_mismatch(
            "number",
            format!("{} and {}", value_type_name(l), value_type_name(r)),
        )),
    }
}

fn divide(left: &Value, right: &Value) -> ExpressionResult<Value> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => {
            // Always use floating point for division
            let (Some(lf), Some(rf)) = (number_as_f64(l), number_as_f64(r)) else {
                return Err(ExpressionError::type_mismatch("number", "number"));
            };
            if rf == 0.0 {
                return Err(ExpressionError::DivisionByZero);
            }
            Ok(serde_json::json!(lf / rf))
        }
        (l, r) => Err(ExpressionError::type_mismatch(
            "number",
            format!("{} and {}", value_type_name(l), value_type_name(r)),
        )),
    }
}

fn modulo(left: &Value, right: &Value) -> ExpressionResult<Value> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => {
            if let (Some(li), Some(ri)) = (l.as_i64(), r.as_i64()) {
                if ri == 0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                return Ok(Value::Number((li % ri).into()));
            }
            let (Some(lf), Some(rf)) = (number_as_f64(l), number_as_f64(r)) else {
                return Err(ExpressionError::type_mismatch("number", "number"));
            };
            if rf == 0.0 {
                return Err(ExpressionError::DivisionByZero);
            }
            Ok(serde_json::json!(lf % rf))
        }
        (l, r) => Err(ExpressionError::type_mismatch(
            "number",
            format!("{} and {}", value_type_name(l), value_type_name(r)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn eval(source: &str, ctx: &EvaluationContext) -> ExpressionResult<Value> {
        Evaluator::new().eval(&parse(source).unwrap(), ctx)
    }

    fn ctx() -> EvaluationContext {
        EvaluationContext::builder()
            .binding("age", json!(30))
            .binding("name", json!("alice"))
            .binding("tags", json!(["a", "b"]))
            .binding("owner", json!({ "city": "springfield" }))
            .build()
    }

    #[test]
    fn literals_and_arithmetic() {
        let ctx = EvaluationContext::new();
        assert_eq!(eval("1 + 2 * 3", &ctx), Ok(json!(7)));
        assert_eq!(eval("10 / 4", &ctx), Ok(json!(2.5)));
        assert_eq!(eval("7 % 3", &ctx), Ok(json!(1)));
        assert_eq!(eval("-2 + 5", &ctx), Ok(json!(3)));
        assert_eq!(eval("'a' + 'b'", &ctx), Ok(json!("ab")));
    }

    #[test]
    fn comparisons() {
        let ctx = ctx();
        assert_eq!(eval("age >= 18", &ctx), Ok(json!(true)));
        assert_eq!(eval("age < 18", &ctx), Ok(json!(false)));
        assert_eq!(eval("name == 'alice'", &ctx), Ok(json!(true)));
        assert_eq!(eval("name != 'bob'", &ctx), Ok(json!(true)));
        assert_eq!(eval("'abc' < 'abd'", &ctx), Ok(json!(true)));
    }

    #[test]
    fn logic_short_circuits() {
        let ctx = ctx();
        // The right operand references an unknown variable; && must not
        // evaluate it once the left is false.
        assert_eq!(eval("age < 18 && missing == 1", &ctx), Ok(json!(false)));
        assert_eq!(eval("age >= 18 || missing == 1", &ctx), Ok(json!(true)));
    }

    #[test]
    fn property_and_index_access() {
        let ctx = ctx();
        assert_eq!(eval("owner.city", &ctx), Ok(json!("springfield")));
        assert_eq!(eval("tags[1]", &ctx), Ok(json!("b")));
        assert_eq!(eval("owner['city']", &ctx), Ok(json!("springfield")));
    }

    #[test]
    fn missing_property_is_an_eval_error() {
        let err = eval("owner.zipcode", &ctx()).unwrap_err();
        assert_eq!(err, ExpressionError::UnknownProperty("zipcode".into()));
        assert!(!err.is_syntax());
    }

    #[test]
    fn unknown_variable_is_an_eval_error() {
        let err = eval("missing == 1", &ctx()).unwrap_err();
        assert_eq!(err, ExpressionError::VariableNotFound("missing".into()));
    }

    #[test]
    fn unknown_function_is_an_eval_error() {
        let err = eval("nope(age)", &ctx()).unwrap_err();
        assert_eq!(err, ExpressionError::FunctionNotFound("nope".into()));
    }

    #[test]
    fn function_dispatch() {
        let mut ctx = ctx();
        ctx.set_function(
            "longerThan",
            Arc::new(|args: &[Value]| {
                let (Some(Value::String(s)), Some(Value::Number(n))) = (args.first(), args.get(1))
                else {
                    return false;
                };
                n.as_u64().is_some_and(|n| s.chars().count() as u64 > n)
            }),
        );
        assert_eq!(eval("longerThan(name, 3)", &ctx), Ok(json!(true)));
        assert_eq!(eval("longerThan(name, 10)", &ctx), Ok(json!(false)));
    }

    #[test]
    fn division_by_zero() {
        let ctx = EvaluationContext::new();
        assert_eq!(eval("1 / 0", &ctx), Err(ExpressionError::DivisionByZero));
        assert_eq!(eval("1 % 0", &ctx), Err(ExpressionError::DivisionByZero));
    }

    #[test]
    fn index_out_of_bounds() {
        let err = eval("tags[5]", &ctx()).unwrap_err();
        assert_eq!(err, ExpressionError::IndexOutOfBounds { index: 5, len: 2 });
    }

    #[test]
    fn not_uses_truthiness() {
        let ctx = ctx();
        assert_eq!(eval("!name", &ctx), Ok(json!(false)));
        assert_eq!(eval("!''", &ctx), Ok(json!(true)));
        assert_eq!(eval("!null", &ctx), Ok(json!(true)));
    }

    #[test]
    fn deep_nesting_hits_recursion_limit() {
        let ctx = EvaluationContext::new();
        // Parentheses collapse in the AST, so force depth with unary '!'
        let source = format!("{}true", "!".repeat(300));
        let err = eval(&source, &ctx).unwrap_err();
        assert_eq!(err, ExpressionError::RecursionLimit(256));
    }
}
