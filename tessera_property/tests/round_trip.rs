// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Round-trip laws for persistable style values.
//!
//! Every persistable value must survive the JSON persistence boundary
//! unchanged, and canonical values must survive the CSS text boundary.

use proptest::prelude::*;
use tessera_property::{Layer, StyleProperty, StyleValue, Unit, parse_css_value};

const UNITS: [Unit; 17] = [
    Unit::Px,
    Unit::Em,
    Unit::Rem,
    Unit::Percent,
    Unit::Vw,
    Unit::Vh,
    Unit::Vmin,
    Unit::Vmax,
    Unit::Ch,
    Unit::Ex,
    Unit::Deg,
    Unit::Rad,
    Unit::Turn,
    Unit::S,
    Unit::Ms,
    Unit::Fr,
    Unit::Number,
];

fn unit() -> impl Strategy<Value = Unit> {
    prop::sample::select(&UNITS[..])
}

fn scalar() -> impl Strategy<Value = StyleValue> {
    prop_oneof![
        "[a-z][a-z0-9-]{0,10}".prop_map(StyleValue::keyword),
        (-1.0e6_f64..1.0e6, unit()).prop_map(|(value, unit)| StyleValue::unit(value, unit)),
        (any::<u8>(), any::<u8>(), any::<u8>(), 0_u8..=100)
            .prop_map(|(r, g, b, a)| StyleValue::rgb(r, g, b, f32::from(a) / 100.0)),
    ]
}

fn component() -> impl Strategy<Value = StyleValue> {
    prop_oneof![
        scalar(),
        prop::collection::vec(scalar(), 2..5).prop_map(StyleValue::tuple),
    ]
}

fn persistable() -> impl Strategy<Value = StyleValue> {
    prop_oneof![
        component(),
        prop::collection::vec(
            (component(), any::<bool>()).prop_map(|(value, hidden)| Layer { value, hidden }),
            0..4
        )
        .prop_map(StyleValue::layers),
    ]
}

proptest! {
    #[test]
    fn persisted_json_round_trips(value in persistable()) {
        prop_assert!(value.is_persistable());
        let json = serde_json::to_string(&value).unwrap();
        let back: StyleValue = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn css_text_round_trips_for_plain_properties(value in component()) {
        let text = value.to_string();
        let back = parse_css_value(StyleProperty::Translate, &text);
        prop_assert_eq!(back, value);
    }

    #[test]
    fn css_text_round_trips_for_layered_properties(
        layers in prop::collection::vec(component(), 1..4)
    ) {
        let value = StyleValue::layers(layers.into_iter().map(Layer::new));
        let text = value.to_string();
        let back = parse_css_value(StyleProperty::BoxShadow, &text);
        prop_assert_eq!(back, value);
    }
}

#[test]
fn editor_only_values_are_not_persistable() {
    let invalid = parse_css_value(StyleProperty::Width, "12p(");
    assert!(matches!(invalid, StyleValue::Invalid { .. }));
    assert!(invalid.ensure_persistable().is_err());

    let intermediate = StyleValue::Intermediate {
        value: "12".into(),
        unit: None,
    };
    assert!(intermediate.ensure_persistable().is_err());

    let hidden_invalid = StyleValue::layers([Layer::hidden(StyleValue::invalid("x("))]);
    assert!(!hidden_invalid.is_persistable());
}
