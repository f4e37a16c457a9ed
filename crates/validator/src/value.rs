//! Field value shapes and string/length semantics
//!
//! [`FieldValue`] is the shape taxonomy the walker dispatches on: scalar,
//! list, map, or nested bean. Scalars are carried as `serde_json::Value`,
//! which is also the representation bound into evaluation contexts.
//!
//! The emptiness and string-form semantics here are deliberately lenient:
//! a value is "empty" if it is null, an empty string, an empty
//! list/map, or the literal texts `"null"` / `"[]"`; and the string form
//! used by length/regex checks falls back to `""` for empty values.

use crate::core::FieldAccessError;
use crate::fields::Checkable;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// First codepoint of the double-width range (inclusive).
const DOUBLE_WIDTH_START: char = '\u{0391}';
/// Last codepoint of the double-width range (inclusive).
const DOUBLE_WIDTH_END: char = '\u{FFE5}';

// ============================================================================
// FIELD VALUE
// ============================================================================

/// The current value of one validated field, classified by shape.
pub enum FieldValue<'a> {
    /// No value.
    Null,
    /// A scalar: string, number or boolean.
    Scalar(Value),
    /// A list; elements are validated individually.
    List(Vec<FieldValue<'a>>),
    /// A string-keyed map; values are validated individually.
    Map(Vec<(String, FieldValue<'a>)>),
    /// A nested bean with its own rules.
    Bean(&'a dyn Checkable),
}

impl<'a> FieldValue<'a> {
    /// Wraps a scalar value.
    #[must_use]
    pub fn scalar(value: impl Into<Value>) -> FieldValue<'static> {
        FieldValue::Scalar(value.into())
    }

    /// Wraps a nested bean.
    #[must_use]
    pub fn bean<T: Checkable>(bean: &'a T) -> Self {
        FieldValue::Bean(bean)
    }

    /// Converts a JSON tree into field values (arrays become lists, objects
    /// become maps), enabling validation of dynamic data with external
    /// rule sets.
    #[must_use]
    pub fn from_json(value: &Value) -> FieldValue<'static> {
        match value {
            Value::Null => FieldValue::Null,
            Value::Array(items) => FieldValue::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => FieldValue::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), Self::from_json(value)))
                    .collect(),
            ),
            other => FieldValue::Scalar(other.clone()),
        }
    }

    /// The emptiness predicate used by Required checks and `nullSkip`:
    /// true for null, `""`, empty lists/maps, and the literal string forms
    /// `"null"` and `"[]"`. Beans are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Scalar(value) => is_empty_value(value),
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Bean(_) => false,
        }
    }

    /// The exact string form used by liveable comparisons. Empty values
    /// have none — except the literal string `"null"`, which compares as
    /// itself. Lists, maps and beans have no string form.
    #[must_use]
    pub fn display_string(&self) -> Option<String> {
        match self {
            Self::Scalar(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Self::Scalar(Value::Number(n)) => Some(n.to_string()),
            Self::Scalar(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    /// The string form used by length and regex checks: empty values
    /// measure as `""`.
    #[must_use]
    pub fn display_for_length(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        self.display_string().unwrap_or_default()
    }

    /// Materializes this value as JSON for context bindings. Beans become
    /// objects of their own fields, recursively — which is how a logic
    /// expression can path into a nested bean.
    pub fn to_value(&self) -> Result<Value, FieldAccessError> {
        match self {
            Self::Null => Ok(Value::Null),
            Self::Scalar(value) => Ok(value.clone()),
            Self::List(items) => Ok(Value::Array(
                items
                    .iter()
                    .map(FieldValue::to_value)
                    .collect::<Result<Vec<Value>, FieldAccessError>>()?,
            )),
            Self::Map(entries) => {
                let mut map = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key.clone(), value.to_value()?);
                }
                Ok(Value::Object(map))
            }
            Self::Bean(bean) => {
                let mut map = serde_json::Map::new();
                for binding in bean.fields()? {
                    map.insert(binding.name.into_owned(), binding.value.to_value()?);
                }
                Ok(Value::Object(map))
            }
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Bean(_) => write!(f, "Bean(..)"),
        }
    }
}

// ============================================================================
// EMPTINESS & LENGTH
// ============================================================================

/// Emptiness over raw JSON values, shared with the built-in context
/// predicates (`isEmpty` and friends).
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == "null" || s == "[]",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Mixed length: characters in the double-width range U+0391–U+FFE5 (CJK
/// ideographs, full-width forms and friends) count as 2 units, everything
/// else as 1.
#[must_use]
pub fn mixed_length(text: &str) -> usize {
    text.chars()
        .map(|c| {
            if (DOUBLE_WIDTH_START..=DOUBLE_WIDTH_END).contains(&c) {
                2
            } else {
                1
            }
        })
        .sum()
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Conversion into a [`FieldValue`] for common field types.
///
/// Beans are not converted implicitly — wrap them with [`FieldValue::bean`]
/// so the cascade boundary stays visible at the call site.
pub trait AsFieldValue {
    /// Produces the field value for this field.
    fn as_field_value(&self) -> FieldValue<'_>;
}

impl AsFieldValue for str {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Scalar(Value::String(self.to_owned()))
    }
}

impl AsFieldValue for String {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Scalar(Value::String(self.clone()))
    }
}

impl AsFieldValue for bool {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Scalar(Value::Bool(*self))
    }
}

macro_rules! impl_as_field_value_for_numbers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsFieldValue for $ty {
                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Scalar(Value::from(*self))
                }
            }
        )*
    };
}

impl_as_field_value_for_numbers!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.as_field_value(),
            None => FieldValue::Null,
        }
    }
}

impl<T: AsFieldValue> AsFieldValue for Vec<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::List(self.iter().map(AsFieldValue::as_field_value).collect())
    }
}

impl<T: AsFieldValue> AsFieldValue for HashMap<String, T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Map(
            self.iter()
                .map(|(key, value)| (key.clone(), value.as_field_value()))
                .collect(),
        )
    }
}

impl<T: AsFieldValue> AsFieldValue for BTreeMap<String, T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Map(
            self.iter()
                .map(|(key, value)| (key.clone(), value.as_field_value()))
                .collect(),
        )
    }
}

impl AsFieldValue for Value {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::from_json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("ab", 2)]
    #[case("中文", 4)]
    #[case("a中", 3)]
    #[case("", 0)]
    #[case("ｆｕｌｌ", 8)] // full-width latin is double-width too
    fn mixed_length_counts_double_width(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(mixed_length(text), expected);
    }

    #[rstest]
    #[case(json!(null), true)]
    #[case(json!(""), true)]
    #[case(json!("null"), true)]
    #[case(json!("[]"), true)]
    #[case(json!([]), true)]
    #[case(json!({}), true)]
    #[case(json!("x"), false)]
    #[case(json!(0), false)]
    #[case(json!(false), false)]
    fn emptiness(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_empty_value(&value), expected);
    }

    #[test]
    fn field_value_emptiness_follows_shape() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::List(Vec::new()).is_empty());
        assert!(FieldValue::Map(Vec::new()).is_empty());
        assert!(!FieldValue::scalar("x").is_empty());
        assert!(FieldValue::scalar("").is_empty());
    }

    #[test]
    fn display_for_length_is_empty_for_empty_values() {
        assert_eq!(FieldValue::Null.display_for_length(), "");
        assert_eq!(FieldValue::scalar("null").display_for_length(), "");
        assert_eq!(FieldValue::scalar("abc").display_for_length(), "abc");
        assert_eq!(FieldValue::scalar(42).display_for_length(), "42");
    }

    #[test]
    fn display_string_has_no_form_for_empty_strings() {
        assert_eq!(FieldValue::scalar("").display_string(), None);
        assert_eq!(FieldValue::Null.display_string(), None);
        // the literal text "null" keeps its form for liveable comparison
        assert_eq!(
            FieldValue::scalar("null").display_string(),
            Some("null".to_owned())
        );
    }

    #[test]
    fn option_and_vec_conversions() {
        let none: Option<String> = None;
        assert!(matches!(none.as_field_value(), FieldValue::Null));

        let values = vec!["a".to_owned(), "b".to_owned()];
        let FieldValue::List(items) = values.as_field_value() else {
            panic!("expected a list");
        };
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn json_trees_convert_recursively() {
        let tree = json!({ "items": [{ "name": "x" }], "count": 1 });
        let FieldValue::Map(entries) = FieldValue::from_json(&tree) else {
            panic!("expected a map");
        };
        assert_eq!(entries.len(), 2);
        assert!(
            entries
                .iter()
                .any(|(key, value)| key == "items" && matches!(value, FieldValue::List(_)))
        );
    }
}
