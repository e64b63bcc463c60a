// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of style properties.
//!
//! [`StyleProperty`] and its metadata table are generated from a single
//! list so the enum, the wire names and the inheritance flags cannot drift
//! apart.

use core::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::metadata::PropertyMetadata;

macro_rules! style_properties {
    ($($variant:ident => $name:literal, $css:literal, inherited: $inherited:literal, layered: $layered:literal;)*) => {
        /// A CSS property the builder can style.
        ///
        /// Properties are ordered by declaration, which is also the order of
        /// [`StyleProperty::ALL`]. Serialized as the camelCase name.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum StyleProperty {
            $(
                #[doc = concat!("`", $css, "`")]
                $variant,
            )*
        }

        static METADATA: &[PropertyMetadata] = &[
            $(
                PropertyMetadata {
                    name: $name,
                    css_name: $css,
                    inherited: $inherited,
                    layered: $layered,
                },
            )*
        ];

        impl StyleProperty {
            /// Every property, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];
        }
    };
}

style_properties! {
    Color => "color", "color", inherited: true, layered: false;
    BackgroundColor => "backgroundColor", "background-color", inherited: false, layered: false;
    BackgroundImage => "backgroundImage", "background-image", inherited: false, layered: true;
    BackgroundPositionX => "backgroundPositionX", "background-position-x", inherited: false, layered: true;
    BackgroundPositionY => "backgroundPositionY", "background-position-y", inherited: false, layered: true;
    BackgroundRepeat => "backgroundRepeat", "background-repeat", inherited: false, layered: true;
    BackgroundSize => "backgroundSize", "background-size", inherited: false, layered: true;
    Opacity => "opacity", "opacity", inherited: false, layered: false;
    Display => "display", "display", inherited: false, layered: false;
    Visibility => "visibility", "visibility", inherited: true, layered: false;
    Position => "position", "position", inherited: false, layered: false;
    Top => "top", "top", inherited: false, layered: false;
    Right => "right", "right", inherited: false, layered: false;
    Bottom => "bottom", "bottom", inherited: false, layered: false;
    Left => "left", "left", inherited: false, layered: false;
    ZIndex => "zIndex", "z-index", inherited: false, layered: false;
    BoxSizing => "boxSizing", "box-sizing", inherited: false, layered: false;
    Width => "width", "width", inherited: false, layered: false;
    Height => "height", "height", inherited: false, layered: false;
    MinWidth => "minWidth", "min-width", inherited: false, layered: false;
    MaxWidth => "maxWidth", "max-width", inherited: false, layered: false;
    MinHeight => "minHeight", "min-height", inherited: false, layered: false;
    MaxHeight => "maxHeight", "max-height", inherited: false, layered: false;
    MarginTop => "marginTop", "margin-top", inherited: false, layered: false;
    MarginRight => "marginRight", "margin-right", inherited: false, layered: false;
    MarginBottom => "marginBottom", "margin-bottom", inherited: false, layered: false;
    MarginLeft => "marginLeft", "margin-left", inherited: false, layered: false;
    PaddingTop => "paddingTop", "padding-top", inherited: false, layered: false;
    PaddingRight => "paddingRight", "padding-right", inherited: false, layered: false;
    PaddingBottom => "paddingBottom", "padding-bottom", inherited: false, layered: false;
    PaddingLeft => "paddingLeft", "padding-left", inherited: false, layered: false;
    BorderTopWidth => "borderTopWidth", "border-top-width", inherited: false, layered: false;
    BorderRightWidth => "borderRightWidth", "border-right-width", inherited: false, layered: false;
    BorderBottomWidth => "borderBottomWidth", "border-bottom-width", inherited: false, layered: false;
    BorderLeftWidth => "borderLeftWidth", "border-left-width", inherited: false, layered: false;
    BorderTopStyle => "borderTopStyle", "border-top-style", inherited: false, layered: false;
    BorderRightStyle => "borderRightStyle", "border-right-style", inherited: false, layered: false;
    BorderBottomStyle => "borderBottomStyle", "border-bottom-style", inherited: false, layered: false;
    BorderLeftStyle => "borderLeftStyle", "border-left-style", inherited: false, layered: false;
    BorderTopColor => "borderTopColor", "border-top-color", inherited: false, layered: false;
    BorderRightColor => "borderRightColor", "border-right-color", inherited: false, layered: false;
    BorderBottomColor => "borderBottomColor", "border-bottom-color", inherited: false, layered: false;
    BorderLeftColor => "borderLeftColor", "border-left-color", inherited: false, layered: false;
    BorderTopLeftRadius => "borderTopLeftRadius", "border-top-left-radius", inherited: false, layered: false;
    BorderTopRightRadius => "borderTopRightRadius", "border-top-right-radius", inherited: false, layered: false;
    BorderBottomRightRadius => "borderBottomRightRadius", "border-bottom-right-radius", inherited: false, layered: false;
    BorderBottomLeftRadius => "borderBottomLeftRadius", "border-bottom-left-radius", inherited: false, layered: false;
    OutlineWidth => "outlineWidth", "outline-width", inherited: false, layered: false;
    OutlineStyle => "outlineStyle", "outline-style", inherited: false, layered: false;
    OutlineColor => "outlineColor", "outline-color", inherited: false, layered: false;
    BoxShadow => "boxShadow", "box-shadow", inherited: false, layered: true;
    OverflowX => "overflowX", "overflow-x", inherited: false, layered: false;
    OverflowY => "overflowY", "overflow-y", inherited: false, layered: false;
    ObjectFit => "objectFit", "object-fit", inherited: false, layered: false;
    FlexDirection => "flexDirection", "flex-direction", inherited: false, layered: false;
    FlexWrap => "flexWrap", "flex-wrap", inherited: false, layered: false;
    FlexGrow => "flexGrow", "flex-grow", inherited: false, layered: false;
    FlexShrink => "flexShrink", "flex-shrink", inherited: false, layered: false;
    FlexBasis => "flexBasis", "flex-basis", inherited: false, layered: false;
    Order => "order", "order", inherited: false, layered: false;
    JustifyContent => "justifyContent", "justify-content", inherited: false, layered: false;
    AlignItems => "alignItems", "align-items", inherited: false, layered: false;
    AlignContent => "alignContent", "align-content", inherited: false, layered: false;
    AlignSelf => "alignSelf", "align-self", inherited: false, layered: false;
    RowGap => "rowGap", "row-gap", inherited: false, layered: false;
    ColumnGap => "columnGap", "column-gap", inherited: false, layered: false;
    GridTemplateColumns => "gridTemplateColumns", "grid-template-columns", inherited: false, layered: false;
    GridTemplateRows => "gridTemplateRows", "grid-template-rows", inherited: false, layered: false;
    FontFamily => "fontFamily", "font-family", inherited: true, layered: false;
    FontSize => "fontSize", "font-size", inherited: true, layered: false;
    FontWeight => "fontWeight", "font-weight", inherited: true, layered: false;
    FontStyle => "fontStyle", "font-style", inherited: true, layered: false;
    LineHeight => "lineHeight", "line-height", inherited: true, layered: false;
    LetterSpacing => "letterSpacing", "letter-spacing", inherited: true, layered: false;
    WordSpacing => "wordSpacing", "word-spacing", inherited: true, layered: false;
    TextAlign => "textAlign", "text-align", inherited: true, layered: false;
    TextIndent => "textIndent", "text-indent", inherited: true, layered: false;
    TextTransform => "textTransform", "text-transform", inherited: true, layered: false;
    TextDecorationLine => "textDecorationLine", "text-decoration-line", inherited: false, layered: false;
    TextDecorationColor => "textDecorationColor", "text-decoration-color", inherited: false, layered: false;
    TextShadow => "textShadow", "text-shadow", inherited: true, layered: true;
    WhiteSpace => "whiteSpace", "white-space", inherited: true, layered: false;
    ListStyleType => "listStyleType", "list-style-type", inherited: true, layered: false;
    Cursor => "cursor", "cursor", inherited: true, layered: false;
    Transform => "transform", "transform", inherited: false, layered: false;
    Translate => "translate", "translate", inherited: false, layered: false;
    Scale => "scale", "scale", inherited: false, layered: false;
    Rotate => "rotate", "rotate", inherited: false, layered: false;
    TransformOrigin => "transformOrigin", "transform-origin", inherited: false, layered: false;
    TransitionProperty => "transitionProperty", "transition-property", inherited: false, layered: true;
    TransitionDuration => "transitionDuration", "transition-duration", inherited: false, layered: true;
    TransitionTimingFunction => "transitionTimingFunction", "transition-timing-function", inherited: false, layered: true;
    TransitionDelay => "transitionDelay", "transition-delay", inherited: false, layered: true;
    Filter => "filter", "filter", inherited: false, layered: false;
    BackdropFilter => "backdropFilter", "backdrop-filter", inherited: false, layered: false;
    MixBlendMode => "mixBlendMode", "mix-blend-mode", inherited: false, layered: false;
}

impl StyleProperty {
    /// Returns the static metadata for this property.
    #[must_use]
    #[inline]
    pub fn metadata(self) -> &'static PropertyMetadata {
        &METADATA[self as usize]
    }

    /// Returns the camelCase name used in persisted data and on the wire.
    #[must_use]
    #[inline]
    pub fn name(self) -> &'static str {
        self.metadata().name
    }

    /// Returns the kebab-case CSS property name.
    #[must_use]
    #[inline]
    pub fn css_name(self) -> &'static str {
        self.metadata().css_name
    }

    /// Returns whether the property is inherited by descendants.
    #[must_use]
    #[inline]
    pub fn is_inherited(self) -> bool {
        self.metadata().inherited
    }

    /// Returns whether the property value is a comma-separated layer list.
    #[must_use]
    #[inline]
    pub fn is_layered(self) -> bool {
        self.metadata().layered
    }

    /// Looks up a property by its camelCase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }

    /// Looks up a property by its kebab-case CSS name.
    #[must_use]
    pub fn from_css_name(css_name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.css_name() == css_name)
    }

    /// Returns an iterator over the inherited properties.
    pub fn inherited() -> impl Iterator<Item = Self> {
        Self::ALL.iter().copied().filter(|p| p.is_inherited())
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for StyleProperty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for StyleProperty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertyVisitor;

        impl Visitor<'_> for PropertyVisitor {
            type Value = StyleProperty;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a camelCase CSS property name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<StyleProperty, E> {
                StyleProperty::from_name(v)
                    .ok_or_else(|| E::custom(format_args!("unknown style property `{v}`")))
            }
        }

        deserializer.deserialize_str(PropertyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_table_matches_enum() {
        assert_eq!(StyleProperty::ALL.len(), METADATA.len());
        for (index, property) in StyleProperty::ALL.iter().enumerate() {
            assert_eq!(*property as usize, index);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(StyleProperty::from_name("color"), Some(StyleProperty::Color));
        assert_eq!(
            StyleProperty::from_css_name("border-top-left-radius"),
            Some(StyleProperty::BorderTopLeftRadius)
        );
        assert_eq!(StyleProperty::from_name("background-color"), None);
        assert_eq!(StyleProperty::from_name("notAProperty"), None);
    }

    #[test]
    fn inherited_iter_only_yields_inherited() {
        assert!(StyleProperty::inherited().all(StyleProperty::is_inherited));
        assert!(StyleProperty::inherited().any(|p| p == StyleProperty::Color));
    }

    #[test]
    fn serde_uses_camel_case_name() {
        let json = serde_json::to_string(&StyleProperty::BackgroundColor).unwrap();
        assert_eq!(json, "\"backgroundColor\"");
        let back: StyleProperty = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StyleProperty::BackgroundColor);
        assert!(serde_json::from_str::<StyleProperty>("\"bogus\"").is_err());
    }
}
