//! # veridian-expression
//!
//! A small expression language over named bindings and named predicate
//! functions, used by `veridian-validator` for conditional ("logic") checks.
//!
//! ## Quick Start
//!
//! ```rust
//! use veridian_expression::{EvaluationContext, ExpressionEngine};
//! use serde_json::json;
//!
//! let ctx = EvaluationContext::builder()
//!     .binding("age", json!(30))
//!     .binding("name", json!("alice"))
//!     .build();
//!
//! let engine = ExpressionEngine::new();
//! assert_eq!(engine.evaluate_bool("age >= 18 && name != ''", &ctx), Ok(true));
//! ```
//!
//! The language supports literals (strings, numbers, booleans, `null`),
//! variables, property paths (`parent.owner.name`), index access (`tags[0]`,
//! `attrs['key']`), the usual comparison/logical/arithmetic operators, and
//! calls to predicate functions installed on the context (`isEmpty(code)`).
//!
//! Parse failures and evaluation failures are distinct error classes: see
//! [`ExpressionError::is_syntax`]. Callers that want a lenient posture (the
//! validator's fail-open policy) can treat evaluation failures as passes
//! while still surfacing syntax errors.

pub mod ast;
pub mod context;
pub mod engine;
pub mod error;
pub mod eval;
mod lexer;
pub mod parser;
pub mod value_utils;

pub use context::{EvaluationContext, EvaluationContextBuilder, PredicateFn};
pub use engine::ExpressionEngine;
pub use error::{ExpressionError, ExpressionResult};
