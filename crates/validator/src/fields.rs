//! The validatable capability and field resolution
//!
//! Instead of runtime introspection, a type opts into validation by
//! implementing [`Checkable`]: it exposes its rule metadata and enumerates
//! its current field values. The [`checkable!`](crate::checkable) macro
//! generates the implementation for the common case.
//!
//! Field enumeration order is the declaration order; a type embedding a
//! base/ancestor appends the ancestor's bindings after its own and merges
//! the ancestor's rules with [`RuleSet::merge`] (own entries win).

use crate::core::{CheckError, FieldAccessError};
use crate::rule::{Rule, RuleSet};
use crate::value::FieldValue;
use std::borrow::Cow;

/// A type whose fields can be validated.
pub trait Checkable {
    /// Rule metadata attached to this type's fields.
    fn rules(&self) -> &RuleSet;

    /// Enumerates all field bindings, own fields first. Failing to read a
    /// field's value is fatal for the whole validation call.
    fn fields(&self) -> Result<Vec<FieldBinding<'_>>, FieldAccessError>;
}

/// One field of one object instance: its name and current value.
///
/// Bindings are produced per walker step and never persisted.
#[derive(Debug)]
pub struct FieldBinding<'a> {
    /// The field name.
    pub name: Cow<'static, str>,
    /// The field's current value.
    pub value: FieldValue<'a>,
}

impl<'a> FieldBinding<'a> {
    /// Creates a binding.
    pub fn new(name: impl Into<Cow<'static, str>>, value: FieldValue<'a>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A borrowed JSON object validated as a bean: every top-level key becomes
/// a field binding. It carries no attached metadata, so pair it with the
/// external rule map entry point:
///
/// ```rust
/// use veridian_validator::prelude::*;
///
/// let data = serde_json::json!({ "code": "" });
/// let rules = RuleSet::new().with("code", Rule::new([CheckKind::Required]));
///
/// let violations = Validator::new()
///     .validate_with(&JsonBean::new(&data), &rules)
///     .unwrap();
/// assert_eq!(violations[0].path(), "code");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JsonBean<'a> {
    value: &'a serde_json::Value,
}

impl<'a> JsonBean<'a> {
    /// Wraps a JSON value. Non-object values expose no fields.
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }
}

impl Checkable for JsonBean<'_> {
    fn rules(&self) -> &RuleSet {
        static EMPTY: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(RuleSet::new);
        &EMPTY
    }

    fn fields(&self) -> Result<Vec<FieldBinding<'_>>, FieldAccessError> {
        let Some(object) = self.value.as_object() else {
            return Ok(Vec::new());
        };
        Ok(object
            .iter()
            .map(|(name, value)| FieldBinding::new(name.clone(), FieldValue::from_json(value)))
            .collect())
    }
}

/// Pairs each binding with its effective rule: the externally supplied rule
/// when the map-based entry point is in use and has an entry for the field,
/// the attached rule otherwise.
pub(crate) fn resolve<'a>(
    bean: &'a dyn Checkable,
    external: Option<&'a RuleSet>,
) -> Result<Vec<(FieldBinding<'a>, Option<&'a Rule>)>, CheckError> {
    let attached = bean.rules();
    let bindings = bean.fields()?;
    Ok(bindings
        .into_iter()
        .map(|binding| {
            let rule = external
                .and_then(|rules| rules.get(&binding.name))
                .or_else(|| attached.get(&binding.name));
            (binding, rule)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::CheckKind;
    use crate::value::AsFieldValue;

    struct Login {
        user: String,
        token: String,
    }

    impl Checkable for Login {
        fn rules(&self) -> &RuleSet {
            static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| {
                RuleSet::new().with("user", Rule::new([CheckKind::Required]))
            });
            &RULES
        }

        fn fields(&self) -> Result<Vec<FieldBinding<'_>>, FieldAccessError> {
            Ok(vec![
                FieldBinding::new("user", self.user.as_field_value()),
                FieldBinding::new("token", self.token.as_field_value()),
            ])
        }
    }

    #[test]
    fn resolve_pairs_attached_rules() {
        let login = Login {
            user: String::new(),
            token: "t".into(),
        };
        let resolved = resolve(&login, None).unwrap();
        assert_eq!(resolved.len(), 2);
        assert!(resolved[0].1.is_some());
        assert!(resolved[1].1.is_none());
    }

    #[test]
    fn external_rules_win_over_attached() {
        let login = Login {
            user: String::new(),
            token: "t".into(),
        };
        let external = RuleSet::new().with("user", Rule::new([CheckKind::Liveable]));
        let resolved = resolve(&login, Some(&external)).unwrap();
        assert!(resolved[0].1.unwrap().has_kind(CheckKind::Liveable));
        // fields absent from the external map fall back to attached rules
        assert!(resolved[1].1.is_none());
    }
}
