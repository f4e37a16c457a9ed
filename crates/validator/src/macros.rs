//! The `checkable!` macro
//!
//! Generates a [`Checkable`](crate::Checkable) implementation from one
//! declaration per field: the binding expression and, optionally, the rule
//! attached to it. The rule table is built once and reused for every
//! instance.

/// Implements [`Checkable`](crate::Checkable) for a struct.
///
/// The caller names the receiver binding (here `this`) and uses it in each
/// field expression; fields without a `=>` rule are enumerated (and bound
/// into logic contexts) but never validated themselves.
///
/// # Examples
///
/// ```rust
/// use veridian_validator::prelude::*;
///
/// struct Account {
///     code: String,
///     owner: Option<String>,
/// }
///
/// checkable! {
///     impl Checkable for Account;
///     fields(this) {
///         code: this.code.as_field_value()
///             => Rule::new([CheckKind::Required, CheckKind::Regex])
///                 .with_regex(["^[A-Z]{2}[0-9]+$"]);
///         owner: this.owner.as_field_value();
///     }
/// }
///
/// let account = Account { code: "AB12".into(), owner: None };
/// assert!(Validator::new().is_valid(&account).unwrap());
/// ```
#[macro_export]
macro_rules! checkable {
    (
        impl Checkable for $ty:ty;
        fields($this:ident) {
            $( $field:ident : $value:expr $( => $rule:expr )? );* $(;)?
        }
    ) => {
        impl $crate::Checkable for $ty {
            fn rules(&self) -> &$crate::RuleSet {
                static RULES: ::std::sync::LazyLock<$crate::RuleSet> =
                    ::std::sync::LazyLock::new(|| {
                        #[allow(unused_mut)]
                        let mut rules = $crate::RuleSet::new();
                        $( $( rules.insert(stringify!($field), $rule); )? )*
                        rules
                    });
                &RULES
            }

            fn fields(
                &self,
            ) -> ::std::result::Result<
                ::std::vec::Vec<$crate::FieldBinding<'_>>,
                $crate::FieldAccessError,
            > {
                let $this = self;
                ::std::result::Result::Ok(::std::vec![
                    $( $crate::FieldBinding::new(stringify!($field), $value), )*
                ])
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    struct Plain {
        first: String,
        second: Option<i64>,
    }

    checkable! {
        impl Checkable for Plain;
        fields(this) {
            first: this.first.as_field_value() => Rule::new([CheckKind::Required]);
            second: this.second.as_field_value();
        }
    }

    #[test]
    fn generates_rules_and_fields() {
        let plain = Plain {
            first: "x".into(),
            second: None,
        };
        assert_eq!(plain.rules().len(), 1);
        assert!(plain.rules().contains("first"));

        let fields = plain.fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "first");
        assert_eq!(fields[1].name, "second");
    }

    struct NoRules {
        anything: String,
    }

    checkable! {
        impl Checkable for NoRules;
        fields(this) {
            anything: this.anything.as_field_value();
        }
    }

    #[test]
    fn rule_free_types_always_validate() {
        let value = NoRules {
            anything: String::new(),
        };
        assert!(Validator::new().is_valid(&value).unwrap());
    }
}
