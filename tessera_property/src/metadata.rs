// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property metadata definitions.
//!
//! [`PropertyMetadata`] is the static, per-property configuration the
//! resolver and the CSS codec consult. Entries live in a table generated
//! alongside [`StyleProperty`](crate::StyleProperty) and are never built at
//! runtime.

/// Static metadata for one [`StyleProperty`](crate::StyleProperty).
///
/// # Example
///
/// ```rust
/// use tessera_property::StyleProperty;
///
/// let metadata = StyleProperty::FontSize.metadata();
/// assert_eq!(metadata.name(), "fontSize");
/// assert_eq!(metadata.css_name(), "font-size");
/// assert!(metadata.inherited());
/// assert!(!metadata.layered());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PropertyMetadata {
    pub(crate) name: &'static str,
    pub(crate) css_name: &'static str,
    pub(crate) inherited: bool,
    pub(crate) layered: bool,
}

impl PropertyMetadata {
    /// Returns the camelCase name used in persisted data and on the wire.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the kebab-case CSS property name.
    #[must_use]
    #[inline]
    pub fn css_name(&self) -> &'static str {
        self.css_name
    }

    /// Returns whether descendants inherit this property when they don't set it.
    #[must_use]
    #[inline]
    pub fn inherited(&self) -> bool {
        self.inherited
    }

    /// Returns whether the property holds a comma-separated list of layers
    /// (e.g. `background-image`, `box-shadow`).
    #[must_use]
    #[inline]
    pub fn layered(&self) -> bool {
        self.layered
    }
}

#[cfg(test)]
mod tests {
    use crate::StyleProperty;

    #[test]
    fn names_are_unique() {
        for (i, a) in StyleProperty::ALL.iter().enumerate() {
            for b in &StyleProperty::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
                assert_ne!(a.css_name(), b.css_name());
            }
        }
    }

    #[test]
    fn css_name_is_kebab_case_of_name() {
        for property in StyleProperty::ALL {
            let mut kebab = alloc::string::String::new();
            for ch in property.name().chars() {
                if ch.is_ascii_uppercase() {
                    kebab.push('-');
                    kebab.push(ch.to_ascii_lowercase());
                } else {
                    kebab.push(ch);
                }
            }
            assert_eq!(kebab, property.css_name(), "{property:?}");
        }
    }

    #[test]
    fn inherited_flags_follow_css() {
        assert!(StyleProperty::Color.is_inherited());
        assert!(StyleProperty::FontFamily.is_inherited());
        assert!(StyleProperty::LineHeight.is_inherited());
        assert!(!StyleProperty::BackgroundColor.is_inherited());
        assert!(!StyleProperty::Display.is_inherited());
        assert!(!StyleProperty::Width.is_inherited());
    }
}
