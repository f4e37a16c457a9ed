//! # veridian-validator
//!
//! A declarative, metadata-driven validator for nested object graphs: rule
//! metadata is attached to fields, and one `validate` call walks the object
//! (including nested beans, lists and maps), accumulating human-readable
//! violation messages keyed by path.
//!
//! ## Quick Start
//!
//! ```rust
//! use veridian_validator::prelude::*;
//!
//! struct Signup {
//!     email: String,
//!     age: Option<i64>,
//! }
//!
//! checkable! {
//!     impl Checkable for Signup;
//!     fields(this) {
//!         email: this.email.as_field_value()
//!             => Rule::new([CheckKind::Required, CheckKind::Regex])
//!                 .with_regex([veridian_validator::patterns::EMAIL]);
//!         age: this.age.as_field_value()
//!             => Rule::new([CheckKind::Logic]).with_logic("age == null || age >= 18");
//!     }
//! }
//!
//! let signup = Signup { email: "user@example.com".into(), age: Some(30) };
//! assert!(Validator::new().is_valid(&signup).unwrap());
//! ```
//!
//! ## How it fits together
//!
//! - [`Rule`] / [`RuleSet`] — immutable check metadata per field, attached
//!   through [`Checkable`] (usually via [`checkable!`]) or supplied
//!   externally to [`Validator::validate_with`].
//! - [`Validator`] — the recursive walker: per bean it builds an
//!   [`EvaluationContext`] chained to the enclosing bean's context, then
//!   evaluates each field's rule, recursing into lists, maps and cascaded
//!   beans with path prefixes (`items[2].name`, `addr.city`).
//! - [`FunctionRegistry`] — startup-populated named predicates callable
//!   from logic expressions, alongside the built-ins `isEmpty`,
//!   `isNotEmpty` and `isOrEmpty`.
//! - Violations are soft and batch-collected; broken rules (bad regex, bad
//!   expression syntax) and unreadable fields abort the call as
//!   [`CheckError`]. Logic expressions that fail *during evaluation* pass
//!   fail-open with a diagnostic — a deliberate leniency policy.

pub mod core;
mod evaluator;
pub mod fields;
pub mod logic;
mod macros;
pub mod messages;
pub mod patterns;
pub mod registry;
pub mod rule;
pub mod value;
pub mod walker;

pub mod prelude;

pub use crate::core::{CheckError, CheckResult, FieldAccessError, Violation, join_messages};
pub use fields::{Checkable, FieldBinding, JsonBean};
pub use logic::{LogicError, LogicErrorKind, LogicEvaluator};
pub use registry::{FunctionProvider, FunctionRegistry, Predicate};
pub use rule::{CheckKind, Rule, RuleSet};
pub use value::{AsFieldValue, FieldValue, is_empty_value, mixed_length};
pub use walker::Validator;

// Re-exported so downstream crates can build contexts and custom logic
// evaluators without naming the expression crate.
pub use veridian_expression::{EvaluationContext, ExpressionEngine};
