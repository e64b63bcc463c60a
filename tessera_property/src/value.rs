// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed CSS values.
//!
//! [`StyleValue`] is the tagged union every declaration, preset and computed
//! style is expressed in. Its JSON form (internally tagged by `type`) is the
//! persisted and wire representation; its `Display` form is CSS text.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a value may not cross a commit boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The value is an unparsable leftover of user input.
    #[error("invalid value `{0}` cannot be committed")]
    Invalid(String),
    /// The value is still being typed.
    #[error("intermediate value `{0}` cannot be committed")]
    Intermediate(String),
}

/// A CSS length, angle, time or plain-number unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// `px`
    Px,
    /// `em`
    Em,
    /// `rem`
    Rem,
    /// `%`
    #[serde(rename = "%")]
    Percent,
    /// `vw`
    Vw,
    /// `vh`
    Vh,
    /// `vmin`
    Vmin,
    /// `vmax`
    Vmax,
    /// `ch`
    Ch,
    /// `ex`
    Ex,
    /// `deg`
    Deg,
    /// `rad`
    Rad,
    /// `turn`
    Turn,
    /// `s`
    S,
    /// `ms`
    Ms,
    /// `fr`
    Fr,
    /// A unitless number.
    Number,
}

impl Unit {
    const SUFFIXES: [(Self, &'static str); 17] = [
        (Self::Px, "px"),
        (Self::Em, "em"),
        (Self::Rem, "rem"),
        (Self::Percent, "%"),
        (Self::Vw, "vw"),
        (Self::Vh, "vh"),
        (Self::Vmin, "vmin"),
        (Self::Vmax, "vmax"),
        (Self::Ch, "ch"),
        (Self::Ex, "ex"),
        (Self::Deg, "deg"),
        (Self::Rad, "rad"),
        (Self::Turn, "turn"),
        (Self::S, "s"),
        (Self::Ms, "ms"),
        (Self::Fr, "fr"),
        (Self::Number, ""),
    ];

    /// Returns the CSS suffix for this unit (empty for [`Unit::Number`]).
    #[must_use]
    pub fn suffix(self) -> &'static str {
        Self::SUFFIXES
            .iter()
            .find(|(unit, _)| *unit == self)
            .map_or("", |(_, suffix)| suffix)
    }

    /// Looks up a unit by its CSS suffix, ignoring ASCII case.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::SUFFIXES
            .iter()
            .find(|(_, s)| s.eq_ignore_ascii_case(suffix))
            .map(|(unit, _)| *unit)
    }
}

/// One entry of a [`StyleValue::Layers`] list.
///
/// Hidden layers stay in the data so the user can toggle them back on, but
/// they are left out of the CSS text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// The layer's value.
    pub value: StyleValue,
    /// Whether the layer is switched off.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Layer {
    /// Creates a visible layer.
    #[must_use]
    pub fn new(value: StyleValue) -> Self {
        Self {
            value,
            hidden: false,
        }
    }

    /// Creates a hidden layer.
    #[must_use]
    pub fn hidden(value: StyleValue) -> Self {
        Self {
            value,
            hidden: true,
        }
    }
}

/// A typed CSS value.
///
/// # Example
///
/// ```rust
/// use tessera_property::{Layer, StyleValue, Unit};
///
/// let margin = StyleValue::unit(8.0, Unit::Px);
/// assert_eq!(margin.to_string(), "8px");
///
/// let shadow = StyleValue::layers([
///     Layer::new(StyleValue::tuple([
///         StyleValue::unit(0.0, Unit::Number),
///         StyleValue::unit(2.0, Unit::Px),
///         StyleValue::rgb(0, 0, 0, 0.5),
///     ])),
///     Layer::hidden(StyleValue::keyword("none")),
/// ]);
/// assert_eq!(shadow.to_string(), "0 2px rgba(0, 0, 0, 0.5)");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StyleValue {
    /// A CSS identifier such as `auto` or `red`.
    Keyword {
        /// The identifier text.
        value: String,
    },
    /// A number with a unit.
    Unit {
        /// The numeric part.
        value: f64,
        /// The unit.
        unit: Unit,
    },
    /// An sRGB color.
    Rgb {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
        /// Alpha in `0.0..=1.0`.
        alpha: f32,
    },
    /// A space-separated sequence of values.
    Tuple {
        /// The items in order.
        value: Vec<StyleValue>,
    },
    /// A comma-separated list of independently toggleable layers.
    Layers {
        /// The layers in order.
        value: Vec<Layer>,
    },
    /// Text that could not be parsed. Editor-only.
    Invalid {
        /// The raw text.
        value: String,
    },
    /// A value that is still being typed. Editor-only.
    Intermediate {
        /// The raw text typed so far.
        value: String,
        /// The unit picked in the editor, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<Unit>,
    },
}

impl StyleValue {
    /// Creates a keyword value.
    #[must_use]
    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword {
            value: value.into(),
        }
    }

    /// Creates a unit value.
    #[must_use]
    pub fn unit(value: f64, unit: Unit) -> Self {
        Self::Unit { value, unit }
    }

    /// Creates a pixel value.
    #[must_use]
    pub fn px(value: f64) -> Self {
        Self::Unit {
            value,
            unit: Unit::Px,
        }
    }

    /// Creates an rgb color value.
    #[must_use]
    pub fn rgb(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self::Rgb { r, g, b, alpha }
    }

    /// Creates a tuple value.
    #[must_use]
    pub fn tuple(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Tuple {
            value: items.into_iter().collect(),
        }
    }

    /// Creates a layers value.
    #[must_use]
    pub fn layers(layers: impl IntoIterator<Item = Layer>) -> Self {
        Self::Layers {
            value: layers.into_iter().collect(),
        }
    }

    /// Creates an invalid value holding the raw text.
    #[must_use]
    pub fn invalid(value: impl Into<String>) -> Self {
        Self::Invalid {
            value: value.into(),
        }
    }

    /// Returns the keyword text if this is a keyword.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword { value } => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if the value, including every nested item, may be
    /// persisted.
    #[must_use]
    pub fn is_persistable(&self) -> bool {
        self.ensure_persistable().is_ok()
    }

    /// Fails if the value, or any nested item, is `invalid` or
    /// `intermediate`.
    pub fn ensure_persistable(&self) -> Result<(), ValueError> {
        match self {
            Self::Keyword { .. } | Self::Unit { .. } | Self::Rgb { .. } => Ok(()),
            Self::Tuple { value } => value.iter().try_for_each(Self::ensure_persistable),
            Self::Layers { value } => value
                .iter()
                .try_for_each(|layer| layer.value.ensure_persistable()),
            Self::Invalid { value } => Err(ValueError::Invalid(value.clone())),
            Self::Intermediate { value, .. } => Err(ValueError::Intermediate(value.clone())),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword { value } | Self::Invalid { value } => f.write_str(value),
            Self::Unit { value, unit } => write!(f, "{value}{}", unit.suffix()),
            Self::Rgb { r, g, b, alpha } => write!(f, "rgba({r}, {g}, {b}, {alpha})"),
            Self::Tuple { value } => {
                for (i, item) in value.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Layers { value } => {
                let mut first = true;
                for layer in value.iter().filter(|layer| !layer.hidden) {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{}", layer.value)?;
                }
                if first {
                    f.write_str("none")?;
                }
                Ok(())
            }
            Self::Intermediate { value, unit } => {
                f.write_str(value)?;
                if let Some(unit) = unit {
                    f.write_str(unit.suffix())?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn unit_suffix_lookup() {
        assert_eq!(Unit::Px.suffix(), "px");
        assert_eq!(Unit::Number.suffix(), "");
        assert_eq!(Unit::from_suffix("PX"), Some(Unit::Px));
        assert_eq!(Unit::from_suffix("%"), Some(Unit::Percent));
        assert_eq!(Unit::from_suffix("furlong"), None);
    }

    #[test]
    fn persistable_is_recursive() {
        assert!(StyleValue::keyword("auto").is_persistable());
        assert!(StyleValue::tuple([StyleValue::px(1.0), StyleValue::px(2.0)]).is_persistable());

        let nested = StyleValue::layers([
            Layer::new(StyleValue::keyword("none")),
            Layer::new(StyleValue::tuple([StyleValue::invalid("2p(")])),
        ]);
        assert_eq!(
            nested.ensure_persistable(),
            Err(ValueError::Invalid("2p(".into()))
        );

        let typing = StyleValue::Intermediate {
            value: "1".into(),
            unit: Some(Unit::Px),
        };
        assert_eq!(
            typing.ensure_persistable(),
            Err(ValueError::Intermediate("1".into()))
        );
    }

    #[test]
    fn display_css_text() {
        assert_eq!(StyleValue::unit(50.0, Unit::Percent).to_string(), "50%");
        assert_eq!(StyleValue::unit(1.5, Unit::Number).to_string(), "1.5");
        assert_eq!(StyleValue::rgb(255, 0, 0, 1.0).to_string(), "rgba(255, 0, 0, 1)");
        assert_eq!(
            StyleValue::layers([Layer::hidden(StyleValue::keyword("a"))]).to_string(),
            "none"
        );
    }

    #[test]
    fn json_shape_is_tagged() {
        let value = StyleValue::unit(10.0, Unit::Px);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "unit", "value": 10.0, "unit": "px" })
        );

        let layers = StyleValue::Layers {
            value: vec![Layer::hidden(StyleValue::keyword("none"))],
        };
        let json = serde_json::to_value(&layers).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "layers",
                "value": [{ "value": { "type": "keyword", "value": "none" }, "hidden": true }],
            })
        );
        let back: StyleValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, layers);
    }

    #[test]
    fn percent_unit_serializes_as_symbol() {
        let json = serde_json::to_string(&Unit::Percent).unwrap();
        assert_eq!(json, "\"%\"");
    }
}
