// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component metadata consumed by style resolution.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::style::Style;
use crate::tree::Instance;

/// Static metadata of one component type.
#[derive(Clone, Debug, Default)]
pub struct ComponentMeta {
    preset_style: Vec<(String, Style)>,
}

impl ComponentMeta {
    /// Creates metadata with no preset styles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the preset style the component uses when rendered as `tag`.
    #[must_use]
    pub fn with_preset(mut self, tag: &str, style: Style) -> Self {
        match self.preset_style.iter_mut().find(|(t, _)| t == tag) {
            Some(entry) => entry.1 = style,
            None => self.preset_style.push((tag.into(), style)),
        }
        self
    }

    /// Returns the preset style for a rendered tag.
    #[must_use]
    pub fn preset_style(&self, tag: &str) -> Option<&Style> {
        self.preset_style
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, style)| style)
    }
}

/// Component type → [`ComponentMeta`].
///
/// # Example
///
/// ```rust
/// use tessera_property::{StyleProperty, StyleValue};
/// use tessera_style::{ComponentMeta, ComponentRegistry, StyleBuilder};
///
/// let mut registry = ComponentRegistry::new();
/// registry.register(
///     "Heading",
///     ComponentMeta::new().with_preset(
///         "h1",
///         StyleBuilder::new()
///             .set(StyleProperty::FontSize, StyleValue::px(32.0))
///             .build(),
///     ),
/// );
///
/// let preset = registry.preset_for("Heading", "h1").unwrap();
/// assert_eq!(preset.get(StyleProperty::FontSize), Some(&StyleValue::px(32.0)));
/// assert!(registry.preset_for("Heading", "h2").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, ComponentMeta>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a component's metadata.
    pub fn register(&mut self, component: &str, meta: ComponentMeta) {
        self.components.insert(component.into(), meta);
    }

    /// Returns a component's metadata.
    #[must_use]
    pub fn get(&self, component: &str) -> Option<&ComponentMeta> {
        self.components.get(component)
    }

    /// Returns the preset style of a component rendered as `tag`.
    #[must_use]
    pub fn preset_for(&self, component: &str, tag: &str) -> Option<&Style> {
        self.get(component)?.preset_style(tag)
    }

    /// Returns the preset style of an instance, looked up through its
    /// component type and rendered tag.
    #[must_use]
    pub fn preset_style(
        &self,
        instances: &HashMap<String, Instance>,
        instance_id: &str,
        tag: Option<&str>,
    ) -> Option<&Style> {
        let instance = instances.get(instance_id)?;
        self.preset_for(&instance.component, tag?)
    }
}
