// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for CSS value text parsing and printing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tessera_property::{StyleProperty, parse_css_value};

fn bench_css_value(c: &mut Criterion) {
    let inputs = [
        (StyleProperty::Width, "320px"),
        (StyleProperty::Color, "rgba(12, 34, 56, 0.5)"),
        (StyleProperty::Translate, "10px 20% 0"),
        (
            StyleProperty::BoxShadow,
            "0 1px 2px rgba(0, 0, 0, 0.2), 0 8px 24px #00000033",
        ),
    ];

    let mut group = c.benchmark_group("property/css");
    for (property, text) in inputs {
        group.bench_function(format!("parse/{property}"), |b| {
            b.iter(|| black_box(parse_css_value(property, black_box(text))));
        });
        let value = parse_css_value(property, text);
        group.bench_function(format!("print/{property}"), |b| {
            b.iter(|| black_box(black_box(&value).to_string()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_css_value);
criterion_main!(benches);
