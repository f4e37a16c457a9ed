//! Basic usage: attached rules, cascade, and the external rule map.
//!
//! Run with: `cargo run --example basic_usage`

use veridian_validator::prelude::*;

struct Address {
    city: String,
    zipcode: Option<String>,
}

checkable! {
    impl Checkable for Address;
    fields(this) {
        city: this.city.as_field_value() => Rule::new([CheckKind::Required]);
        zipcode: this.zipcode.as_field_value()
            => Rule::new([CheckKind::Regex])
                .with_regex([r"^[0-9]{5}$"])
                .with_null_skip(true);
    }
}

struct Person {
    name: String,
    status: String,
    addr: Address,
}

checkable! {
    impl Checkable for Person;
    fields(this) {
        name: this.name.as_field_value()
            => Rule::new([CheckKind::Required, CheckKind::MaxLength]).with_length(20);
        status: this.status.as_field_value()
            => Rule::new([CheckKind::Liveable]).with_liveable(["0", "1"]);
        addr: FieldValue::bean(&this.addr) => Rule::default().with_cascade(true);
    }
}

fn main() {
    let person = Person {
        name: String::new(),
        status: "7".into(),
        addr: Address {
            city: String::new(),
            zipcode: Some("12".into()),
        },
    };

    let validator = Validator::new();

    let violations = validator.validate(&person).expect("rules are well-formed");
    println!("attached rules found {} violation(s):", violations.len());
    for violation in &violations {
        println!("  {violation}");
    }

    // The same person checked against an externally supplied rule map;
    // entries override attached metadata per field.
    let external = RuleSet::new().with(
        "status",
        Rule::new([CheckKind::Liveable]).with_liveable(["7", "8"]),
    );
    let violations = validator
        .validate_with(&person, &external)
        .expect("rules are well-formed");
    println!("external rules found {} violation(s):", violations.len());
    for violation in &violations {
        println!("  {violation}");
    }
}
