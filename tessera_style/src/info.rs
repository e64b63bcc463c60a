// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution results and their provenance.

use alloc::collections::BTreeMap;
use alloc::string::String;

use tessera_property::{StyleProperty, StyleValue};

/// The effective style of a selected instance, one entry per property that
/// has a value at some tier. Properties without a value are absent.
pub type StyleInfo = BTreeMap<StyleProperty, StyleValueInfo>;

/// The tier an effective value was taken from, highest precedence first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// The selected local source at the selected breakpoint and state.
    Local,
    /// The selected token source at the selected breakpoint and state.
    Token,
    /// A source attached before the selected one.
    PreviousSource,
    /// The selected source at a less specific breakpoint.
    Cascaded,
    /// An ancestor instance.
    Inherited,
    /// The instance's component preset.
    Preset,
    /// The browser-computed style.
    Computed,
}

/// A value contributed by a style source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceValueInfo {
    /// The contributing source.
    pub style_source_id: String,
    /// The value.
    pub value: StyleValue,
}

/// A value contributed by a less specific breakpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct CascadedValueInfo {
    /// The contributing breakpoint.
    pub breakpoint_id: String,
    /// The value.
    pub value: StyleValue,
}

/// A value inherited from an ancestor.
#[derive(Clone, Debug, PartialEq)]
pub struct InheritedValueInfo {
    /// The contributing ancestor.
    pub instance_id: String,
    /// The contributing source, or `None` for the ancestor's preset.
    pub style_source_id: Option<String>,
    /// The value.
    pub value: StyleValue,
}

/// The resolution of one property: the effective value plus every tier that
/// had something to say.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleValueInfo {
    /// The effective value.
    pub value: StyleValue,
    /// The tier [`StyleValueInfo::value`] came from.
    pub tier: Tier,
    /// Set by the selected source when it is local.
    pub local: Option<StyleValue>,
    /// Set by the selected source when it is a token.
    pub token: Option<SourceValueInfo>,
    /// Set by a source attached before the selected one.
    pub previous_source: Option<SourceValueInfo>,
    /// Set by a less specific breakpoint.
    pub cascaded: Option<CascadedValueInfo>,
    /// Set by an ancestor.
    pub inherited: Option<InheritedValueInfo>,
    /// Set by the component preset.
    pub preset: Option<StyleValue>,
    /// The browser-computed `color`, present on the `color` entry only.
    pub current_color: Option<StyleValue>,
}

/// How a value, or a group of values, is sourced from the editor's point of
/// view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleSourceKind {
    /// Set on the selected local source.
    Local,
    /// Set somewhere the selected local source does not control.
    Remote,
    /// Only the component preset sets it.
    Preset,
    /// Nothing sets it.
    Default,
}

/// Classifies a group of resolved properties.
///
/// The strongest kind present anywhere in the group wins: `local` if any
/// info has a local value, then `remote` if any has a token, previous source,
/// cascaded or inherited value, then `preset`, else `default`. Missing infos
/// are skipped.
///
/// # Example
///
/// ```rust
/// use tessera_property::StyleValue;
/// use tessera_style::{StyleSourceKind, StyleValueInfo, Tier, style_source_of};
///
/// let preset_only = StyleValueInfo {
///     value: StyleValue::px(0.0),
///     tier: Tier::Preset,
///     local: None,
///     token: None,
///     previous_source: None,
///     cascaded: None,
///     inherited: None,
///     preset: Some(StyleValue::px(0.0)),
///     current_color: None,
/// };
/// let local = StyleValueInfo {
///     local: Some(StyleValue::px(4.0)),
///     tier: Tier::Local,
///     ..preset_only.clone()
/// };
///
/// assert_eq!(style_source_of([Some(&preset_only)]), StyleSourceKind::Preset);
/// assert_eq!(style_source_of([Some(&preset_only), Some(&local)]), StyleSourceKind::Local);
/// assert_eq!(style_source_of([None]), StyleSourceKind::Default);
/// ```
#[must_use]
pub fn style_source_of<'a, I>(infos: I) -> StyleSourceKind
where
    I: IntoIterator<Item = Option<&'a StyleValueInfo>>,
    I::IntoIter: Clone,
{
    let infos = infos.into_iter().flatten();
    if infos.clone().any(|info| info.local.is_some()) {
        return StyleSourceKind::Local;
    }
    if infos.clone().any(|info| {
        info.token.is_some()
            || info.previous_source.is_some()
            || info.cascaded.is_some()
            || info.inherited.is_some()
    }) {
        return StyleSourceKind::Remote;
    }
    if infos.clone().any(|info| info.preset.is_some()) {
        return StyleSourceKind::Preset;
    }
    StyleSourceKind::Default
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(tier: Tier) -> StyleValueInfo {
        StyleValueInfo {
            value: StyleValue::keyword("x"),
            tier,
            local: None,
            token: None,
            previous_source: None,
            cascaded: None,
            inherited: None,
            preset: None,
            current_color: None,
        }
    }

    #[test]
    fn local_anywhere_beats_remote_first() {
        let remote = StyleValueInfo {
            cascaded: Some(CascadedValueInfo {
                breakpoint_id: "base".into(),
                value: StyleValue::keyword("a"),
            }),
            ..info(Tier::Cascaded)
        };
        let local = StyleValueInfo {
            local: Some(StyleValue::keyword("b")),
            ..info(Tier::Local)
        };
        assert_eq!(
            style_source_of([Some(&remote), Some(&local)]),
            StyleSourceKind::Local
        );
    }

    #[test]
    fn token_counts_as_remote() {
        let token = StyleValueInfo {
            token: Some(SourceValueInfo {
                style_source_id: "t".into(),
                value: StyleValue::keyword("a"),
            }),
            ..info(Tier::Token)
        };
        assert_eq!(style_source_of([Some(&token)]), StyleSourceKind::Remote);
    }

    #[test]
    fn computed_only_is_default() {
        assert_eq!(
            style_source_of([Some(&info(Tier::Computed))]),
            StyleSourceKind::Default
        );
        assert_eq!(style_source_of([]), StyleSourceKind::Default);
    }
}
