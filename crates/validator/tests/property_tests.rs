//! Property tests for length metrics, emptiness and rule-free graphs.

use proptest::prelude::*;
use veridian_validator::prelude::*;

proptest! {
    /// Mixed length is bounded by [len, 2*len] in characters.
    #[test]
    fn mixed_length_is_bounded(text in ".*") {
        let chars = text.chars().count();
        let mixed = mixed_length(&text);
        prop_assert!(mixed >= chars);
        prop_assert!(mixed <= chars * 2);
    }

    /// ASCII text has no double-width characters.
    #[test]
    fn ascii_mixed_length_equals_char_count(text in "[ -~]*") {
        prop_assert_eq!(mixed_length(&text), text.chars().count());
    }

    /// A Required check fires exactly on empty values.
    #[test]
    fn required_fires_iff_empty(text in ".*") {
        let rule = Rule::new([CheckKind::Required]);
        let value = text.as_field_value();
        let violations = Validator::new().check_field("field", &value, &rule).unwrap();

        let empty = text.is_empty() || text == "null" || text == "[]";
        prop_assert_eq!(violations.len(), usize::from(empty));
    }

    /// Graphs without rules never produce violations, whatever the data.
    #[test]
    fn rule_free_graphs_are_always_valid(name in ".*", tags in proptest::collection::vec(".*", 0..4)) {
        struct Free {
            name: String,
            tags: Vec<String>,
        }

        checkable! {
            impl Checkable for Free;
            fields(this) {
                name: this.name.as_field_value();
                tags: this.tags.as_field_value();
            }
        }

        let free = Free { name, tags };
        prop_assert!(Validator::new().validate(&free).unwrap().is_empty());
    }

    /// MinLength and MaxLength with the same threshold agree with ExactLength.
    #[test]
    fn min_max_agree_with_exact(text in "[a-z中]{0,12}", threshold in 0usize..12) {
        let value = text.as_field_value();
        let validator = Validator::new();

        let exact = Rule::new([CheckKind::ExactLength]).with_length(threshold);
        let min = Rule::new([CheckKind::MinLength]).with_length(threshold);
        let max = Rule::new([CheckKind::MaxLength]).with_length(threshold);

        let exact_ok = validator.check_field("f", &value, &exact).unwrap().is_empty();
        let min_ok = validator.check_field("f", &value, &min).unwrap().is_empty();
        let max_ok = validator.check_field("f", &value, &max).unwrap().is_empty();

        prop_assert_eq!(exact_ok, min_ok && max_ok);
    }
}
