// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for cascade resolution in `tessera_style`.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hashbrown::HashMap;

use tessera_property::{StyleProperty, StyleValue};
use tessera_style::{
    Breakpoint, ComponentMeta, ComponentRegistry, Instance, InstanceSelector, ResolveCx, Style,
    StyleBuilder, StyleData, StyleSource, StyleSourceSelector, StylesIndex,
};

/// A chain `n-0 <- n-1 <- ... <- n-{depth-1}`, each instance with a token
/// and a local source declaring a few properties on every breakpoint.
fn chain(depth: usize) -> (StyleData, InstanceSelector) {
    let mut data = StyleData::new();
    data.add_breakpoint(Breakpoint::base("base", "Base"))
        .add_breakpoint(Breakpoint::max_width("tablet", "Tablet", 991))
        .add_breakpoint(Breakpoint::max_width("mobile", "Mobile", 479))
        .add_breakpoint(Breakpoint::min_width("wide", "Wide", 1440));
    let mut ids = Vec::with_capacity(depth);
    for level in 0..depth {
        let id = format!("n-{level}");
        let parent = ids.last().map(String::as_str);
        data.add_instance(Instance::new(&id, "Box"), parent);
        let token = format!("token-{level}");
        let local = format!("local-{level}");
        data.attach_source(
            &id,
            StyleSource::Token {
                id: token.clone(),
                name: token.clone(),
            },
        )
        .attach_source(&id, StyleSource::Local { id: local.clone() });
        for breakpoint in ["base", "tablet", "mobile"] {
            data.set_decl(&token, breakpoint, StyleProperty::Color, StyleValue::keyword("red"))
                .set_decl(&local, breakpoint, StyleProperty::Width, StyleValue::px(level as f64))
                .set_decl(&local, breakpoint, StyleProperty::FontSize, StyleValue::px(16.0));
        }
        ids.push(id);
    }
    ids.reverse();
    (data, InstanceSelector::new(ids))
}

fn bench_resolve(c: &mut Criterion) {
    let mut components = ComponentRegistry::new();
    components.register(
        "Box",
        ComponentMeta::new().with_preset(
            "div",
            StyleBuilder::new()
                .set(StyleProperty::Display, StyleValue::keyword("block"))
                .build(),
        ),
    );
    let computed = Style::from_computed([
        ("display", "block"),
        ("color", "rgb(0, 0, 0)"),
        ("font-size", "16px"),
        ("margin-top", "0px"),
    ]);

    let mut group = c.benchmark_group("style/resolve");
    for depth in [1_usize, 8, 32] {
        let (data, selector) = chain(depth);
        let tags: HashMap<String, String> = data
            .instances
            .keys()
            .map(|id| (id.clone(), "div".to_owned()))
            .collect();
        let local = StyleSourceSelector::new(&format!("local-{}", depth - 1));

        group.bench_with_input(BenchmarkId::new("selected", depth), &depth, |b, _| {
            let cx = ResolveCx::new(&data, &components, &tags);
            b.iter(|| {
                black_box(cx.resolve(
                    black_box(&selector),
                    Some("mobile"),
                    Some(&local),
                    &computed,
                ))
            });
        });

        group.bench_with_input(BenchmarkId::new("with_index", depth), &depth, |b, _| {
            b.iter(|| {
                let cx = ResolveCx::new(&data, &components, &tags);
                black_box(cx.resolve(&selector, Some("mobile"), Some(&local), &computed))
            });
        });

        group.bench_with_input(BenchmarkId::new("instance_style", depth), &depth, |b, _| {
            let cx = ResolveCx::new(&data, &components, &tags);
            b.iter(|| black_box(cx.instance_style(black_box(&selector), "tablet")));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("style/index");
    for depth in [8_usize, 128] {
        let (data, _) = chain(depth);
        group.bench_with_input(BenchmarkId::new("build", depth), &depth, |b, _| {
            b.iter(|| {
                black_box(StylesIndex::new(
                    &data.styles,
                    data.style_source_selections.values(),
                ))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
