//! Everything a typical caller needs, in one import.
//!
//! ```rust
//! use veridian_validator::prelude::*;
//! ```

pub use crate::checkable;
pub use crate::core::{CheckError, CheckResult, FieldAccessError, Violation, join_messages};
pub use crate::fields::{Checkable, FieldBinding, JsonBean};
pub use crate::logic::{LogicError, LogicErrorKind, LogicEvaluator};
pub use crate::registry::{FunctionProvider, FunctionRegistry, Predicate};
pub use crate::rule::{CheckKind, Rule, RuleSet};
pub use crate::value::{AsFieldValue, FieldValue, is_empty_value, mixed_length};
pub use crate::walker::Validator;
pub use veridian_expression::{EvaluationContext, ExpressionEngine};
