//! Expression AST
//!
//! Produced by [`crate::parser::parse`] and consumed by
//! [`crate::eval::Evaluator`].

use serde_json::Value;
use std::sync::Arc;

/// A parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value: string, number, boolean or null.
    Literal(Value),
    /// A variable reference resolved against the context bindings.
    Variable(Arc<str>),
    /// Property access: `object.name`.
    Property {
        /// The expression producing the object.
        object: Box<Expr>,
        /// The property name.
        name: Arc<str>,
    },
    /// Index access: `object[index]` (array index or object key).
    Index {
        /// The expression producing the array or object.
        object: Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
    },
    /// A call to a named predicate function: `name(args...)`.
    Call {
        /// The function name.
        name: Arc<str>,
        /// The argument expressions.
        args: Vec<Expr>,
    },
    /// Logical negation: `!expr`.
    Not(Box<Expr>),
    /// Arithmetic negation: `-expr`.
    Negate(Box<Expr>),
    /// A binary operation.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// The operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },
}

/// Binary operators, loosest-binding first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterEqual,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
}
