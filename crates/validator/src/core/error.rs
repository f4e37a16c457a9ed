//! Violations and fatal errors
//!
//! The taxonomy has two tiers. A [`Violation`] is soft: it is collected and
//! reported in a batch, and never stops the walk from visiting sibling
//! fields. A [`CheckError`] is fatal: a rule that cannot be evaluated at all
//! (malformed regex, malformed logic expression) or a field whose value
//! cannot be read aborts the entire top-level call.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result alias for fallible validation entry points.
pub type CheckResult<T> = Result<T, CheckError>;

// ============================================================================
// VIOLATION
// ============================================================================

/// A path-qualified, human-readable validation failure.
///
/// The path accumulates dotted/bracketed segments as the walker unwinds:
/// `"addr.city"`, `"items[2].name"`, `"[0].code"`. The message is the
/// formatted rule template and always names the bare field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    path: String,
    message: String,
}

impl Violation {
    /// Creates a violation anchored at `path` (usually the bare field name).
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The accumulated field path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The formatted message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefixes the path with an owning field name: `name` + `[2].x` gives
    /// `name[2].x`, `name` + `city` gives `name.city`.
    #[must_use]
    pub fn prefix_field(mut self, name: &str) -> Self {
        self.path = if self.path.starts_with('[') {
            format!("{name}{}", self.path)
        } else {
            format!("{name}.{}", self.path)
        };
        self
    }

    /// Prefixes the path with a list element index: `[2].` + path.
    #[must_use]
    pub fn prefix_index(mut self, index: usize) -> Self {
        self.path = format!("[{index}].{}", self.path);
        self
    }

    /// Prefixes the path with a map key: `[key].` + path.
    #[must_use]
    pub fn prefix_key(mut self, key: &str) -> Self {
        self.path = format!("[{key}].{}", self.path);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Joins a batch of violations into one `;`-separated message, the form an
/// interception layer reports when rejecting a guarded call.
#[must_use]
pub fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(";")
}

// ============================================================================
// FATAL ERRORS
// ============================================================================

/// Fatal errors that abort an entire `validate` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// A field's value could not be read while resolving bindings.
    #[error("cannot read field '{field}': {reason}")]
    FieldAccess {
        /// The field whose value was inaccessible.
        field: String,
        /// Why the read failed.
        reason: String,
    },

    /// A rule is malformed: a regex pattern that does not compile, or a
    /// logic expression with invalid syntax.
    #[error("invalid rule on field '{field}': {reason}")]
    RuleDefinition {
        /// The field whose rule is broken.
        field: String,
        /// What is wrong with the rule.
        reason: String,
    },
}

/// Resolver-side failure to produce a field's value.
///
/// Returned by [`crate::Checkable::fields`] implementations and promoted to
/// the fatal [`CheckError::FieldAccess`] by the walker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read field '{field}': {reason}")]
pub struct FieldAccessError {
    /// The field whose value was inaccessible.
    pub field: String,
    /// Why the read failed.
    pub reason: String,
}

impl FieldAccessError {
    /// Creates a new access error.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<FieldAccessError> for CheckError {
    fn from(err: FieldAccessError) -> Self {
        Self::FieldAccess {
            field: err.field,
            reason: err.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prefix_field_joins_with_dot() {
        let v = Violation::new("city", "city is empty").prefix_field("addr");
        assert_eq!(v.path(), "addr.city");
    }

    #[test]
    fn prefix_field_joins_bracket_segments_without_dot() {
        let v = Violation::new("name", "bad")
            .prefix_index(2)
            .prefix_field("items");
        assert_eq!(v.path(), "items[2].name");
    }

    #[test]
    fn prefix_key_brackets_the_key() {
        let v = Violation::new("code", "bad").prefix_key("primary");
        assert_eq!(v.path(), "[primary].code");
    }

    #[test]
    fn join_messages_uses_semicolons() {
        let violations = vec![
            Violation::new("a", "first"),
            Violation::new("b", "second"),
        ];
        assert_eq!(join_messages(&violations), "a: first;b: second");
    }

    #[test]
    fn access_error_promotes_to_fatal() {
        let err: CheckError = FieldAccessError::new("secret", "not readable").into();
        assert_eq!(
            err,
            CheckError::FieldAccess {
                field: "secret".into(),
                reason: "not readable".into(),
            }
        );
    }
}
