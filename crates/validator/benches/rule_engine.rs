//! Walker throughput over a nested graph with mixed rule kinds.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use veridian_validator::prelude::*;

struct Item {
    name: String,
    quantity: i64,
}

checkable! {
    impl Checkable for Item;
    fields(this) {
        name: this.name.as_field_value()
            => Rule::new([CheckKind::Required, CheckKind::MaxLength]).with_length(32);
        quantity: this.quantity.as_field_value()
            => Rule::new([CheckKind::Logic]).with_logic("quantity >= 1");
    }
}

struct Order {
    code: String,
    items: Vec<Item>,
}

checkable! {
    impl Checkable for Order;
    fields(this) {
        code: this.code.as_field_value()
            => Rule::new([CheckKind::Required, CheckKind::Regex]).with_regex(["^[A-Z]{3}-[0-9]+$"]);
        items: FieldValue::List(this.items.iter().map(|item| FieldValue::bean(item)).collect())
            => Rule::default();
    }
}

fn build_order(items: usize) -> Order {
    Order {
        code: "ORD-42".into(),
        items: (0..items)
            .map(|i| Item {
                name: format!("item-{i}"),
                quantity: 1 + (i as i64 % 5),
            })
            .collect(),
    }
}

fn bench_validate(c: &mut Criterion) {
    let validator = Validator::new();
    let small = build_order(4);
    let large = build_order(64);

    c.bench_function("validate_order_4_items", |b| {
        b.iter(|| black_box(validator.validate(black_box(&small)).unwrap()));
    });
    c.bench_function("validate_order_64_items", |b| {
        b.iter(|| black_box(validator.validate(black_box(&large)).unwrap()));
    });

    let rule = Rule::new([CheckKind::Required, CheckKind::MinLength, CheckKind::MaxLength])
        .with_length(4)
        .with_length_range(1, 32);
    c.bench_function("check_single_field", |b| {
        b.iter(|| {
            black_box(
                validator
                    .check_field("code", &black_box("abcd").as_field_value(), &rule)
                    .unwrap(),
            )
        });
    });
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
