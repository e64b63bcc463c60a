// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing sessions seen through the resolver.

use serde_json::json;
use tessera_build::{
    BuildData, Change, Editor, EditorConfig, Namespace, Patch, PublishOptions, SetOptions,
};
use tessera_property::{StyleProperty, StyleValue, Unit};
use tessera_style::{
    Breakpoint, Instance, InstanceSelector, Style, StyleData, StyleSource, StyleSourceKind, Tier,
    style_source_of,
};

fn session() -> Editor {
    let mut data = StyleData::new();
    data.add_breakpoint(Breakpoint::base("base", "Base"))
        .add_breakpoint(Breakpoint::max_width("tablet", "Tablet", 991))
        .add_instance(Instance::new("body", "Body"), None)
        .add_instance(Instance::new("card", "Box"), Some("body"))
        .attach_source("card", StyleSource::Local { id: "card-local".into() })
        .set_decl("card-local", "base", StyleProperty::Width, StyleValue::px(100.0));
    let mut editor = Editor::new(
        EditorConfig {
            client_id: "tab".into(),
        },
        BuildData::from_style_data(&data).unwrap(),
    );
    editor.select_instance(Some(InstanceSelector::new(["card", "body"])));
    editor.select_breakpoint(Some("tablet"));
    editor
}

#[test]
fn preview_is_resolved_then_aborted() {
    let mut editor = session();
    let info = editor.resolve(&Style::default()).unwrap();
    assert_eq!(info[&StyleProperty::Width].tier, Tier::Cascaded);

    let mut batch = editor.create_batch_update();
    batch
        .set_property(
            StyleProperty::Width,
            StyleValue::px(50.0),
            SetOptions { is_ephemeral: true },
        )
        .unwrap();
    batch.publish(PublishOptions::default()).unwrap();

    let info = editor.resolve(&Style::default()).unwrap();
    let width = &info[&StyleProperty::Width];
    assert_eq!(width.value, StyleValue::px(50.0));
    assert_eq!(style_source_of([Some(width)]), StyleSourceKind::Local);

    editor.abort_ephemeral();
    let info = editor.resolve(&Style::default()).unwrap();
    assert_eq!(info[&StyleProperty::Width].value, StyleValue::px(100.0));
    assert!(editor.take_transactions().is_empty());
}

#[test]
fn committed_edit_reuses_existing_local_source() {
    let mut editor = session();
    let mut batch = editor.create_batch_update();
    batch
        .set_property(StyleProperty::Width, StyleValue::px(80.0), SetOptions::default())
        .unwrap();
    batch.publish(PublishOptions::default()).unwrap();

    let transactions = editor.take_transactions();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].transaction_id, "tab-1");
    assert_eq!(
        transactions[0].changes,
        [Change {
            namespace: Namespace::Styles,
            patches: vec![Patch::add(
                ["card-local:tablet:width:"],
                json!({
                    "styleSourceId": "card-local",
                    "breakpointId": "tablet",
                    "property": "width",
                    "value": { "type": "unit", "unit": "px", "value": 80.0 },
                }),
            )],
        }]
    );
}

#[test]
fn deleting_a_committed_value_removes_it() {
    let mut editor = session();
    editor.select_breakpoint(Some("base"));
    let mut batch = editor.create_batch_update();
    batch.delete_property(StyleProperty::Width, SetOptions::default());
    batch.publish(PublishOptions::default()).unwrap();

    let transactions = editor.take_transactions();
    assert_eq!(
        transactions[0].changes[0].patches,
        [Patch::remove(["card-local:base:width:"])]
    );
    let info = editor.resolve(&Style::default()).unwrap();
    assert!(!info.contains_key(&StyleProperty::Width));
}

#[test]
fn remote_changes_replace_a_preview() {
    let mut editor = session();
    let mut batch = editor.create_batch_update();
    batch
        .set_property(
            StyleProperty::Opacity,
            StyleValue::unit(0.2, Unit::Number),
            SetOptions::default(),
        )
        .unwrap();
    batch.publish(PublishOptions { is_ephemeral: true }).unwrap();
    assert!(editor.has_ephemeral());

    editor
        .apply_remote(&[Change {
            namespace: Namespace::Props,
            patches: vec![Patch::add(["prop-1"], json!({ "id": "prop-1" }))],
        }])
        .unwrap();
    assert!(!editor.has_ephemeral());
    assert!(editor.data().contains(Namespace::Props, "prop-1"));
    let info = editor.resolve(&Style::default()).unwrap();
    assert!(!info.contains_key(&StyleProperty::Opacity));
}

#[test]
fn token_only_instances_resolve_through_their_last_source() {
    let mut data = StyleData::new();
    data.add_breakpoint(Breakpoint::base("base", "Base"))
        .add_instance(Instance::new("badge", "Box"), None)
        .attach_source(
            "badge",
            StyleSource::Token {
                id: "card".into(),
                name: "Card".into(),
            },
        )
        .set_decl("card", "base", StyleProperty::Color, StyleValue::keyword("red"));
    let mut editor = Editor::new(
        EditorConfig {
            client_id: "tab".into(),
        },
        BuildData::from_style_data(&data).unwrap(),
    );
    editor.select_instance(Some(InstanceSelector::new(["badge"])));
    editor.select_breakpoint(Some("base"));

    let computed = Style::from_computed([("display", "block")]);
    let info = editor.resolve(&computed).unwrap();
    assert_eq!(info[&StyleProperty::Color].tier, Tier::Token);
    assert_eq!(info[&StyleProperty::Color].value, StyleValue::keyword("red"));
    assert_eq!(info[&StyleProperty::Display].tier, Tier::Computed);
}
