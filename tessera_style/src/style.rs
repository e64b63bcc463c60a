// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared property maps.
//!
//! [`Style`] is used wherever a whole property→value map travels as one
//! unit: component preset styles and the browser-computed style feed.

use alloc::rc::Rc;
use alloc::vec::Vec;

use tessera_property::{StyleProperty, StyleValue, parse_css_value};

/// A shared, immutable property→value map.
///
/// Cloning is a reference-count bump. Entries are kept sorted by property for
/// binary search lookup.
///
/// # Example
///
/// ```rust
/// use tessera_property::{StyleProperty, StyleValue};
/// use tessera_style::StyleBuilder;
///
/// let preset = StyleBuilder::new()
///     .set(StyleProperty::MarginTop, StyleValue::px(0.0))
///     .set(StyleProperty::FontWeight, StyleValue::keyword("bold"))
///     .build();
///
/// let shared = preset.clone();
/// assert_eq!(shared.get(StyleProperty::FontWeight), Some(&StyleValue::keyword("bold")));
/// assert_eq!(shared.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    inner: Rc<StyleData>,
}

#[derive(Debug, Default, PartialEq)]
struct StyleData {
    /// Sorted by property.
    entries: Vec<(StyleProperty, StyleValue)>,
}

impl Style {
    /// Parses a browser-computed style feed.
    ///
    /// Keys may be CSS (`font-size`) or camelCase (`fontSize`) names. Unknown
    /// properties and values that do not parse are dropped.
    ///
    /// ```rust
    /// use tessera_property::{StyleProperty, StyleValue};
    /// use tessera_style::Style;
    ///
    /// let computed = Style::from_computed([
    ///     ("font-size", "16px"),
    ///     ("color", "rgb(0, 0, 0)"),
    ///     ("-webkit-thing", "1"),
    ///     ("width", "12p("),
    /// ]);
    /// assert_eq!(computed.get(StyleProperty::FontSize), Some(&StyleValue::px(16.0)));
    /// assert_eq!(computed.len(), 2);
    /// ```
    #[must_use]
    pub fn from_computed<'s>(pairs: impl IntoIterator<Item = (&'s str, &'s str)>) -> Self {
        let mut builder = StyleBuilder::new();
        for (name, text) in pairs {
            let Some(property) =
                StyleProperty::from_css_name(name).or_else(|| StyleProperty::from_name(name))
            else {
                continue;
            };
            let value = parse_css_value(property, text);
            if value.is_persistable() {
                builder = builder.set(property, value);
            }
        }
        builder.build()
    }

    /// Returns `true` if this style has no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Gets the value for a property, if set.
    #[must_use]
    #[inline]
    pub fn get(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.inner
            .entries
            .binary_search_by_key(&property, |(p, _)| *p)
            .ok()
            .map(|idx| &self.inner.entries[idx].1)
    }

    /// Returns `true` if the property is set.
    #[must_use]
    #[inline]
    pub fn contains(&self, property: StyleProperty) -> bool {
        self.get(property).is_some()
    }

    /// Iterates entries in property order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &StyleValue)> + '_ {
        self.inner.entries.iter().map(|(p, v)| (*p, v))
    }
}

/// Builder for [`Style`].
#[derive(Debug, Default)]
pub struct StyleBuilder {
    entries: Vec<(StyleProperty, StyleValue)>,
}

impl StyleBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any earlier value.
    #[must_use]
    pub fn set(mut self, property: StyleProperty, value: StyleValue) -> Self {
        match self.entries.binary_search_by_key(&property, |(p, _)| *p) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (property, value)),
        }
        self
    }

    /// Builds the style.
    #[must_use]
    pub fn build(self) -> Style {
        Style {
            inner: Rc::new(StyleData {
                entries: self.entries,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_style() {
        let style = StyleBuilder::new().build();
        assert!(style.is_empty());
        assert_eq!(style.get(StyleProperty::Color), None);
    }

    #[test]
    fn later_set_replaces() {
        let style = StyleBuilder::new()
            .set(StyleProperty::Width, StyleValue::px(1.0))
            .set(StyleProperty::Width, StyleValue::px(2.0))
            .build();
        assert_eq!(style.len(), 1);
        assert_eq!(style.get(StyleProperty::Width), Some(&StyleValue::px(2.0)));
    }

    #[test]
    fn iteration_is_sorted() {
        let style = StyleBuilder::new()
            .set(StyleProperty::Width, StyleValue::px(1.0))
            .set(StyleProperty::Color, StyleValue::keyword("red"))
            .build();
        let properties: Vec<_> = style.iter().map(|(p, _)| p).collect();
        let mut sorted = properties.clone();
        sorted.sort();
        assert_eq!(properties, sorted);
    }

    #[test]
    fn clone_shares_storage() {
        let style = StyleBuilder::new()
            .set(StyleProperty::Width, StyleValue::px(1.0))
            .build();
        let other = style.clone();
        assert!(Rc::ptr_eq(&style.inner, &other.inner));
    }

    #[test]
    fn computed_accepts_camel_case_names() {
        let style = Style::from_computed([("lineHeight", "1.5")]);
        assert!(style.contains(StyleProperty::LineHeight));
    }
}
