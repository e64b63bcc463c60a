// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end cascade scenarios.

use hashbrown::HashMap;
use tessera_property::{StyleProperty, StyleValue};
use tessera_style::{
    Breakpoint, ComponentMeta, ComponentRegistry, Instance, InstanceSelector, ResolveCx, Style,
    StyleBuilder, StyleData, StyleInfo, StyleSource, StyleSourceKind, StyleSourceSelector, Tier,
    cascaded_breakpoint_ids, style_source_of,
};

fn keyword(value: &str) -> StyleValue {
    StyleValue::keyword(value)
}

fn breakpoints(data: &mut StyleData) {
    data.add_breakpoint(Breakpoint::base("base", "Base"))
        .add_breakpoint(Breakpoint::max_width("medium", "Tablet", 991))
        .add_breakpoint(Breakpoint::max_width("small", "Mobile", 767));
}

fn resolve_with(
    data: &StyleData,
    components: &ComponentRegistry,
    tags: &HashMap<String, String>,
    selector: &[&str],
    breakpoint: &str,
    source: &str,
) -> StyleInfo {
    let cx = ResolveCx::new(data, components, tags);
    cx.resolve(
        &InstanceSelector::new(selector.iter().copied()),
        Some(breakpoint),
        Some(&StyleSourceSelector::new(source)),
        &Style::default(),
    )
}

#[test]
fn cascaded_ids_for_small_are_base_then_medium() {
    let mut data = StyleData::new();
    breakpoints(&mut data);
    assert_eq!(
        cascaded_breakpoint_ids(&data.breakpoints, "small").as_slice(),
        ["base", "medium"]
    );
}

#[test]
fn unset_properties_are_omitted() {
    let mut data = StyleData::new();
    breakpoints(&mut data);
    data.add_instance(Instance::new("box", "Box"), None)
        .attach_source("box", StyleSource::Local { id: "local".into() })
        .set_decl("local", "base", StyleProperty::Width, StyleValue::px(10.0));

    let info = resolve_with(
        &data,
        &ComponentRegistry::new(),
        &HashMap::new(),
        &["box"],
        "base",
        "local",
    );
    assert_eq!(info.len(), 1);
    assert!(info.contains_key(&StyleProperty::Width));
    for property in StyleProperty::ALL {
        if *property != StyleProperty::Width {
            assert!(!info.contains_key(property), "{property} leaked");
        }
    }
}

#[test]
fn local_declaration_is_classified_local_over_every_other_tier() {
    let mut data = StyleData::new();
    breakpoints(&mut data);
    data.add_instance(Instance::new("root", "Body"), None)
        .add_instance(Instance::new("text", "Text"), Some("root"))
        .attach_source("root", StyleSource::Local { id: "root-local".into() })
        .set_decl("root-local", "small", StyleProperty::Color, keyword("green"))
        .attach_source(
            "text",
            StyleSource::Token {
                id: "brand".into(),
                name: "Brand".into(),
            },
        )
        .attach_source("text", StyleSource::Local { id: "text-local".into() })
        .set_decl("brand", "small", StyleProperty::Color, keyword("purple"))
        .set_decl("text-local", "base", StyleProperty::Color, keyword("gray"))
        .set_decl("text-local", "small", StyleProperty::Color, keyword("black"));

    let mut components = ComponentRegistry::new();
    components.register(
        "Text",
        ComponentMeta::new().with_preset(
            "p",
            StyleBuilder::new()
                .set(StyleProperty::Color, keyword("navy"))
                .build(),
        ),
    );
    let mut tags = HashMap::new();
    tags.insert("text".to_owned(), "p".to_owned());

    let info = resolve_with(
        &data,
        &components,
        &tags,
        &["text", "root"],
        "small",
        "text-local",
    );
    let color = &info[&StyleProperty::Color];
    assert_eq!(color.value, keyword("black"));
    assert_eq!(color.tier, Tier::Local);
    assert!(color.previous_source.is_some());
    assert!(color.cascaded.is_some());
    assert!(color.inherited.is_some());
    assert!(color.preset.is_some());
    assert_eq!(style_source_of([Some(color)]), StyleSourceKind::Local);
}

#[test]
fn earlier_token_shows_as_previous_source() {
    let mut data = StyleData::new();
    breakpoints(&mut data);
    data.add_instance(Instance::new("box", "Box"), None)
        .attach_source(
            "box",
            StyleSource::Token {
                id: "tokenA".into(),
                name: "A".into(),
            },
        )
        .attach_source(
            "box",
            StyleSource::Token {
                id: "tokenB".into(),
                name: "B".into(),
            },
        )
        .attach_source("box", StyleSource::Local { id: "local".into() })
        .set_decl("tokenA", "base", StyleProperty::Color, keyword("red"));

    let info = resolve_with(
        &data,
        &ComponentRegistry::new(),
        &HashMap::new(),
        &["box"],
        "base",
        "local",
    );
    let color = &info[&StyleProperty::Color];
    let previous = color.previous_source.as_ref().expect("previous source");
    assert_eq!(previous.value, keyword("red"));
    assert_eq!(previous.style_source_id, "tokenA");
    assert_eq!(color.tier, Tier::PreviousSource);
    assert_eq!(style_source_of([Some(color)]), StyleSourceKind::Remote);
}

#[test]
fn closer_ancestor_wins_over_root_preset() {
    let mut data = StyleData::new();
    breakpoints(&mut data);
    data.add_instance(Instance::new("root", "Body"), None)
        .add_instance(Instance::new("section", "Box"), Some("root"))
        .add_instance(Instance::new("selected", "Box"), Some("section"))
        .attach_source("section", StyleSource::Local { id: "section-local".into() })
        .attach_source("selected", StyleSource::Local { id: "selected-local".into() })
        .set_decl("section-local", "base", StyleProperty::Color, keyword("blue"));

    let mut components = ComponentRegistry::new();
    components.register(
        "Body",
        ComponentMeta::new().with_preset(
            "body",
            StyleBuilder::new()
                .set(StyleProperty::Color, keyword("black"))
                .set(StyleProperty::MarginTop, StyleValue::px(0.0))
                .build(),
        ),
    );
    let mut tags = HashMap::new();
    tags.insert("root".to_owned(), "body".to_owned());
    tags.insert("section".to_owned(), "div".to_owned());
    tags.insert("selected".to_owned(), "div".to_owned());

    let info = resolve_with(
        &data,
        &components,
        &tags,
        &["selected", "section", "root"],
        "base",
        "selected-local",
    );
    let color = &info[&StyleProperty::Color];
    let inherited = color.inherited.as_ref().expect("inherited");
    assert_eq!(inherited.value, keyword("blue"));
    assert_eq!(inherited.instance_id, "section");
    assert_eq!(color.tier, Tier::Inherited);
    // Non-inherited preset properties of ancestors never leak down.
    assert!(!info.contains_key(&StyleProperty::MarginTop));
}

#[test]
fn root_preset_is_inherited_when_nothing_closer_sets_it() {
    let mut data = StyleData::new();
    breakpoints(&mut data);
    data.add_instance(Instance::new("root", "Body"), None)
        .add_instance(Instance::new("selected", "Box"), Some("root"))
        .attach_source("selected", StyleSource::Local { id: "selected-local".into() });

    let mut components = ComponentRegistry::new();
    components.register(
        "Body",
        ComponentMeta::new().with_preset(
            "body",
            StyleBuilder::new()
                .set(StyleProperty::FontFamily, keyword("Inter"))
                .build(),
        ),
    );
    let mut tags = HashMap::new();
    tags.insert("root".to_owned(), "body".to_owned());

    let info = resolve_with(
        &data,
        &components,
        &tags,
        &["selected", "root"],
        "medium",
        "selected-local",
    );
    let family = &info[&StyleProperty::FontFamily];
    let inherited = family.inherited.as_ref().expect("inherited");
    assert_eq!(inherited.instance_id, "root");
    assert_eq!(inherited.style_source_id, None);
}

#[test]
fn ancestor_declarations_at_later_breakpoints_do_not_apply() {
    let mut data = StyleData::new();
    breakpoints(&mut data);
    data.add_instance(Instance::new("root", "Body"), None)
        .add_instance(Instance::new("selected", "Box"), Some("root"))
        .attach_source("root", StyleSource::Local { id: "root-local".into() })
        .attach_source("selected", StyleSource::Local { id: "selected-local".into() })
        .set_decl("root-local", "base", StyleProperty::FontSize, StyleValue::px(16.0))
        .set_decl("root-local", "small", StyleProperty::FontSize, StyleValue::px(14.0));

    let info = resolve_with(
        &data,
        &ComponentRegistry::new(),
        &HashMap::new(),
        &["selected", "root"],
        "medium",
        "selected-local",
    );
    assert_eq!(
        info[&StyleProperty::FontSize].value,
        StyleValue::px(16.0)
    );
}

#[test]
fn group_classification_takes_strongest_tier() {
    let mut data = StyleData::new();
    breakpoints(&mut data);
    data.add_instance(Instance::new("box", "Box"), None)
        .attach_source("box", StyleSource::Local { id: "local".into() })
        .set_decl("local", "base", StyleProperty::MarginTop, StyleValue::px(4.0))
        .set_decl("local", "medium", StyleProperty::MarginBottom, StyleValue::px(8.0));

    let info = resolve_with(
        &data,
        &ComponentRegistry::new(),
        &HashMap::new(),
        &["box"],
        "medium",
        "local",
    );
    let top = info.get(&StyleProperty::MarginTop);
    let bottom = info.get(&StyleProperty::MarginBottom);
    let left = info.get(&StyleProperty::MarginLeft);
    assert_eq!(style_source_of([top]), StyleSourceKind::Remote);
    assert_eq!(style_source_of([top, bottom, left]), StyleSourceKind::Local);
    assert_eq!(style_source_of([left]), StyleSourceKind::Default);
}
