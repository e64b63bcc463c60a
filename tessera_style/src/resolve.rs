// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascade resolution with provenance.
//!
//! This module provides [`ResolveCx`], which bundles everything needed to
//! compute the effective style of an instance. Precedence, highest first:
//!
//! **Local/Token → Previous source → Cascaded breakpoint → Inherited → Preset → Computed**
//!
//! Each tier is an explicit fold over a precedence-ordered list in which a
//! later entry overwrites an earlier one for the same property.

use alloc::collections::BTreeMap;
use alloc::string::String;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tessera_property::{StyleProperty, StyleValue};

use crate::breakpoint;
use crate::data::StyleData;
use crate::index::StylesIndex;
use crate::info::{
    CascadedValueInfo, InheritedValueInfo, SourceValueInfo, StyleInfo, StyleValueInfo, Tier,
};
use crate::preset::ComponentRegistry;
use crate::source::{StyleDecl, StyleSource, StyleSourceSelector};
use crate::style::{Style, StyleBuilder};
use crate::tree::InstanceSelector;

/// Cascaded breakpoint ids, lowest precedence first.
pub type BreakpointIds<'a> = SmallVec<[&'a str; 4]>;

/// Resolution context bundling the style snapshot, component metadata and
/// the rendered tag of each instance.
///
/// Creating a context builds the [`StylesIndex`] once; every query after that
/// is a pure read.
///
/// # Example
///
/// ```rust
/// use hashbrown::HashMap;
/// use tessera_property::{StyleProperty, StyleValue};
/// use tessera_style::{
///     Breakpoint, ComponentRegistry, Instance, InstanceSelector, ResolveCx, Style, StyleData,
///     StyleSource, StyleSourceKind, StyleSourceSelector, Tier, style_source_of,
/// };
///
/// let mut data = StyleData::new();
/// data.add_breakpoint(Breakpoint::base("base", "Base"))
///     .add_instance(Instance::new("box", "Box"), None)
///     .attach_source("box", StyleSource::Local { id: "box-local".into() })
///     .set_decl("box-local", "base", StyleProperty::Width, StyleValue::px(100.0));
///
/// let components = ComponentRegistry::new();
/// let tags = HashMap::new();
/// let cx = ResolveCx::new(&data, &components, &tags);
///
/// let info = cx.resolve(
///     &InstanceSelector::new(["box"]),
///     Some("base"),
///     Some(&StyleSourceSelector::new("box-local")),
///     &Style::default(),
/// );
/// let width = &info[&StyleProperty::Width];
/// assert_eq!(width.value, StyleValue::px(100.0));
/// assert_eq!(width.tier, Tier::Local);
/// assert_eq!(style_source_of([Some(width)]), StyleSourceKind::Local);
/// assert!(!info.contains_key(&StyleProperty::Height));
/// ```
pub struct ResolveCx<'a> {
    data: &'a StyleData,
    components: &'a ComponentRegistry,
    instance_tags: &'a HashMap<String, String>,
    index: StylesIndex<'a>,
}

impl core::fmt::Debug for ResolveCx<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResolveCx")
            .field("breakpoints", &self.data.breakpoints.len())
            .field("instances", &self.data.instances.len())
            .field("styles", &self.data.styles.len())
            .field("instance_tags", &self.instance_tags.len())
            .finish_non_exhaustive()
    }
}

impl<'a> ResolveCx<'a> {
    /// Creates a resolution context.
    ///
    /// # Arguments
    ///
    /// * `data` - The style snapshot
    /// * `components` - Component metadata with preset styles
    /// * `instance_tags` - The rendered tag of each instance, by instance id
    pub fn new(
        data: &'a StyleData,
        components: &'a ComponentRegistry,
        instance_tags: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            data,
            components,
            instance_tags,
            index: StylesIndex::new(&data.styles, data.style_source_selections.values()),
        }
    }

    /// Returns the declaration index.
    #[must_use]
    #[inline]
    pub fn index(&self) -> &StylesIndex<'a> {
        &self.index
    }

    /// Returns the style snapshot.
    #[must_use]
    #[inline]
    pub fn data(&self) -> &'a StyleData {
        self.data
    }

    /// Returns the breakpoints cascading into `selected`, lowest precedence
    /// first.
    #[must_use]
    pub fn cascaded_breakpoint_ids(&self, selected: &str) -> BreakpointIds<'a> {
        breakpoint::cascaded_breakpoint_ids(&self.data.breakpoints, selected)
    }

    /// Returns the declarations of the selected source at the selected
    /// breakpoint and state.
    #[must_use]
    pub fn selected_style(
        &self,
        breakpoint_id: &str,
        selector: &StyleSourceSelector,
    ) -> BTreeMap<StyleProperty, &'a StyleValue> {
        let mut style = BTreeMap::new();
        for decl in self.index.by_style_source(&selector.style_source_id) {
            if decl.breakpoint_id == breakpoint_id
                && decl.state == selector.state
                && is_resolvable(decl)
            {
                style.insert(decl.property, &decl.value);
            }
        }
        style
    }

    /// Returns the stateless declarations of one source at the cascaded
    /// breakpoints, the closest breakpoint winning.
    #[must_use]
    pub fn cascaded_info(
        &self,
        style_source_id: &str,
        cascaded: &[&str],
    ) -> BTreeMap<StyleProperty, CascadedValueInfo> {
        let decls = self.index.by_style_source(style_source_id);
        let mut info = BTreeMap::new();
        for &breakpoint_id in cascaded {
            for decl in decls {
                if decl.breakpoint_id == breakpoint_id
                    && decl.state.is_none()
                    && is_resolvable(decl)
                {
                    info.insert(
                        decl.property,
                        CascadedValueInfo {
                            breakpoint_id: breakpoint_id.into(),
                            value: decl.value.clone(),
                        },
                    );
                }
            }
        }
        info
    }

    /// Returns the inheritable values of the ancestors of the selected
    /// instance.
    ///
    /// Ancestors are visited from the root down to the parent, so a closer
    /// ancestor overwrites a farther one. For each ancestor its preset is
    /// applied first, then its stateless declarations at the cascaded and
    /// selected breakpoints.
    #[must_use]
    pub fn inherited_info(
        &self,
        instance_selector: &InstanceSelector,
        cascaded: &[&str],
        breakpoint_id: &str,
    ) -> BTreeMap<StyleProperty, InheritedValueInfo> {
        let mut info = BTreeMap::new();
        for ancestor_id in instance_selector.ancestors_from_root() {
            if !self.data.instances.contains_key(ancestor_id) {
                continue;
            }

            if let Some(preset) = self.preset_style(ancestor_id) {
                for (property, value) in preset.iter() {
                    if property.is_inherited() && value.is_persistable() {
                        info.insert(
                            property,
                            InheritedValueInfo {
                                instance_id: ancestor_id.into(),
                                style_source_id: None,
                                value: value.clone(),
                            },
                        );
                    }
                }
            }

            let decls = self.index.by_instance(ancestor_id);
            let breakpoints = cascaded.iter().copied().chain([breakpoint_id]);
            for breakpoint_id in breakpoints {
                for decl in decls {
                    if decl.breakpoint_id == breakpoint_id
                        && decl.state.is_none()
                        && decl.property.is_inherited()
                        && is_resolvable(decl)
                    {
                        info.insert(
                            decl.property,
                            InheritedValueInfo {
                                instance_id: ancestor_id.into(),
                                style_source_id: Some(decl.style_source_id.clone()),
                                value: decl.value.clone(),
                            },
                        );
                    }
                }
            }
        }
        info
    }

    /// Returns the values set by sources attached before the selected one,
    /// at the selected breakpoint and exactly the selected state.
    ///
    /// Declarations are scanned in stored order and the last match wins.
    #[must_use]
    pub fn previous_source_info(
        &self,
        instance_id: &str,
        breakpoint_id: &str,
        selector: &StyleSourceSelector,
    ) -> BTreeMap<StyleProperty, SourceValueInfo> {
        let mut info = BTreeMap::new();
        let Some(selection) = self.data.style_source_selections.get(instance_id) else {
            return info;
        };
        let preceding = selection.preceding(&selector.style_source_id);
        if preceding.is_empty() {
            return info;
        }
        for decl in self.index.by_instance(instance_id) {
            if decl.breakpoint_id == breakpoint_id
                && decl.state == selector.state
                && preceding.contains(&decl.style_source_id)
                && is_resolvable(decl)
            {
                info.insert(
                    decl.property,
                    SourceValueInfo {
                        style_source_id: decl.style_source_id.clone(),
                        value: decl.value.clone(),
                    },
                );
            }
        }
        info
    }

    /// Returns an instance's component preset for its rendered tag.
    #[must_use]
    pub fn preset_style(&self, instance_id: &str) -> Option<&'a Style> {
        let tag = self.instance_tags.get(instance_id).map(String::as_str);
        self.components
            .preset_style(&self.data.instances, instance_id, tag)
    }

    /// Computes the effective style of the selected instance with full
    /// provenance.
    ///
    /// Returns an empty [`StyleInfo`] when no breakpoint or no style source
    /// is selected. `computed` is the browser-computed style of the
    /// instance and is used only as the last fallback.
    #[must_use]
    pub fn resolve(
        &self,
        instance_selector: &InstanceSelector,
        breakpoint_id: Option<&str>,
        selector: Option<&StyleSourceSelector>,
        computed: &Style,
    ) -> StyleInfo {
        let mut result = StyleInfo::new();
        let (Some(instance_id), Some(breakpoint_id), Some(selector)) =
            (instance_selector.instance_id(), breakpoint_id, selector)
        else {
            return result;
        };

        let is_local = self
            .data
            .style_sources
            .get(&selector.style_source_id)
            .is_none_or(StyleSource::is_local);
        let cascaded_ids = self.cascaded_breakpoint_ids(breakpoint_id);

        let selected = self.selected_style(breakpoint_id, selector);
        let previous = self.previous_source_info(instance_id, breakpoint_id, selector);
        let cascaded = self.cascaded_info(&selector.style_source_id, &cascaded_ids);
        let inherited = self.inherited_info(instance_selector, &cascaded_ids, breakpoint_id);
        let preset = self.preset_style(instance_id);

        log::trace!(
            "resolving {instance_id} at {breakpoint_id}: {} selected, {} previous, {} cascaded, {} inherited",
            selected.len(),
            previous.len(),
            cascaded.len(),
            inherited.len(),
        );

        for &property in StyleProperty::ALL {
            let own = selected.get(&property).map(|&value| value.clone());
            let (local, token) = match own {
                Some(value) if !is_local => (
                    None,
                    Some(SourceValueInfo {
                        style_source_id: selector.style_source_id.clone(),
                        value,
                    }),
                ),
                own => (own, None),
            };
            let previous_source = previous.get(&property).cloned();
            let cascaded = cascaded.get(&property).cloned();
            let inherited = inherited.get(&property).cloned();
            let preset = preset
                .and_then(|style| style.get(property))
                .filter(|value| value.is_persistable())
                .cloned();
            let computed_value = computed.get(property);

            let winner = local
                .as_ref()
                .map(|value| (value, Tier::Local))
                .or_else(|| token.as_ref().map(|info| (&info.value, Tier::Token)))
                .or_else(|| {
                    previous_source
                        .as_ref()
                        .map(|info| (&info.value, Tier::PreviousSource))
                })
                .or_else(|| cascaded.as_ref().map(|info| (&info.value, Tier::Cascaded)))
                .or_else(|| inherited.as_ref().map(|info| (&info.value, Tier::Inherited)))
                .or_else(|| preset.as_ref().map(|value| (value, Tier::Preset)))
                .or_else(|| computed_value.map(|value| (value, Tier::Computed)));
            let Some((value, tier)) = winner else {
                continue;
            };
            let value = value.clone();

            let current_color = if property == StyleProperty::Color {
                computed_value.cloned()
            } else {
                None
            };
            result.insert(
                property,
                StyleValueInfo {
                    value,
                    tier,
                    local,
                    token,
                    previous_source,
                    cascaded,
                    inherited,
                    preset,
                    current_color,
                },
            );
        }
        result
    }

    /// Computes the data-only effective style of any instance, without
    /// provenance or browser fallback.
    ///
    /// All sources of the instance count, at the cascaded and selected
    /// breakpoints, stateless only; then inherited values; then the preset.
    #[must_use]
    pub fn instance_style(
        &self,
        instance_selector: &InstanceSelector,
        breakpoint_id: &str,
    ) -> Style {
        let Some(instance_id) = instance_selector.instance_id() else {
            return Style::default();
        };
        let cascaded_ids = self.cascaded_breakpoint_ids(breakpoint_id);
        let inherited = self.inherited_info(instance_selector, &cascaded_ids, breakpoint_id);

        let mut own: BTreeMap<StyleProperty, &StyleValue> = BTreeMap::new();
        let decls = self.index.by_instance(instance_id);
        for breakpoint_id in cascaded_ids.iter().copied().chain([breakpoint_id]) {
            for decl in decls {
                if decl.breakpoint_id == breakpoint_id
                    && decl.state.is_none()
                    && is_resolvable(decl)
                {
                    own.insert(decl.property, &decl.value);
                }
            }
        }

        let preset = self.preset_style(instance_id);
        let mut builder = StyleBuilder::new();
        for &property in StyleProperty::ALL {
            let value = own
                .get(&property)
                .copied()
                .or_else(|| inherited.get(&property).map(|info| &info.value))
                .or_else(|| preset.and_then(|style| style.get(property)));
            if let Some(value) = value {
                builder = builder.set(property, value.clone());
            }
        }
        builder.build()
    }
}

/// Committed declarations are always persistable; anything else is a
/// corrupted snapshot and is skipped.
fn is_resolvable(decl: &StyleDecl) -> bool {
    if decl.value.is_persistable() {
        return true;
    }
    log::warn!(
        "skipping non-persistable {} on {} at {}",
        decl.property,
        decl.style_source_id,
        decl.breakpoint_id,
    );
    false
}
