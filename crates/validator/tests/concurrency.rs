//! Context isolation under concurrent validation.
//!
//! Walk state (contexts, recursion scope) is threaded through each call, so
//! two concurrent validations must never observe each other's bindings.
//! Each thread validates a bean whose logic rule only passes for that
//! thread's distinguishable field value.

use std::sync::Arc;
use veridian_validator::prelude::*;

struct Tagged {
    tag: String,
    child: Child,
}

struct Child {
    marker: String,
}

checkable! {
    impl Checkable for Child;
    fields(this) {
        marker: this.marker.as_field_value()
            => Rule::new([CheckKind::Logic]).with_logic("marker == parent.tag");
    }
}

checkable! {
    impl Checkable for Tagged;
    fields(this) {
        tag: this.tag.as_field_value() => Rule::new([CheckKind::Required]);
        child: FieldValue::bean(&this.child) => Rule::default().with_cascade(true);
    }
}

#[test]
fn concurrent_validations_do_not_share_contexts() {
    let validator = Arc::new(Validator::new());
    let threads = 8;
    let rounds = 200;

    std::thread::scope(|scope| {
        for thread_id in 0..threads {
            let validator = Arc::clone(&validator);
            scope.spawn(move || {
                for round in 0..rounds {
                    let tag = format!("t{thread_id}-{round}");
                    let bean = Tagged {
                        tag: tag.clone(),
                        child: Child { marker: tag },
                    };
                    // Passes only when the child's context chains to THIS
                    // bean's bindings; any cross-thread bleed breaks it.
                    assert!(validator.is_valid(&bean).unwrap());

                    let mismatched = Tagged {
                        tag: format!("t{thread_id}-{round}"),
                        child: Child {
                            marker: "someone-else".into(),
                        },
                    };
                    let violations = validator.validate(&mismatched).unwrap();
                    assert_eq!(violations.len(), 1);
                    assert_eq!(violations[0].path(), "child.marker");
                }
            });
        }
    });
}

#[test]
fn per_thread_external_rules_stay_isolated() {
    struct Item {
        name: String,
    }

    checkable! {
        impl Checkable for Item;
        fields(this) {
            name: this.name.as_field_value();
        }
    }

    let validator = Arc::new(Validator::new());

    std::thread::scope(|scope| {
        for thread_id in 0..8 {
            let validator = Arc::clone(&validator);
            scope.spawn(move || {
                let expected = format!("n{thread_id}");
                let rules = RuleSet::new().with(
                    "name",
                    Rule::new([CheckKind::Liveable]).with_liveable([expected.clone()]),
                );
                for _ in 0..200 {
                    let item = Item {
                        name: expected.clone(),
                    };
                    assert!(validator.is_valid_with(&item, &rules).unwrap());
                }
            });
        }
    });
}
