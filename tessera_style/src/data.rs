// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read-only snapshot style resolution runs over.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use tessera_property::{StyleProperty, StyleValue};

use crate::breakpoint::Breakpoint;
use crate::source::{StyleDecl, StyleSource, StyleSourceSelection};
use crate::tree::{Instance, InstanceChild};

/// Breakpoints, instances, style sources, selections and declarations of one
/// build.
///
/// `styles` is ordered; that order breaks ties between declarations of
/// different sources and must be preserved by whoever produces the snapshot.
#[derive(Clone, Debug, Default)]
pub struct StyleData {
    /// Every breakpoint, in any order.
    pub breakpoints: Vec<Breakpoint>,
    /// Instances by id.
    pub instances: HashMap<String, Instance>,
    /// Style sources by id.
    pub style_sources: HashMap<String, StyleSource>,
    /// Style source selections by instance id.
    pub style_source_selections: HashMap<String, StyleSourceSelection>,
    /// Declarations in stored order.
    pub styles: Vec<StyleDecl>,
}

impl StyleData {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a breakpoint.
    pub fn add_breakpoint(&mut self, breakpoint: Breakpoint) -> &mut Self {
        self.breakpoints.push(breakpoint);
        self
    }

    /// Adds an instance, appending it to `parent`'s children when given.
    pub fn add_instance(&mut self, instance: Instance, parent: Option<&str>) -> &mut Self {
        if let Some(parent) = parent.and_then(|id| self.instances.get_mut(id)) {
            parent.children.push(InstanceChild::Id {
                value: instance.id.clone(),
            });
        }
        self.instances.insert(instance.id.clone(), instance);
        self
    }

    /// Adds a style source and appends it to an instance's selection.
    pub fn attach_source(&mut self, instance_id: &str, source: StyleSource) -> &mut Self {
        self.style_source_selections
            .entry(instance_id.into())
            .or_insert_with(|| StyleSourceSelection {
                instance_id: instance_id.into(),
                values: Vec::new(),
            })
            .values
            .push(source.id().into());
        self.style_sources.insert(source.id().into(), source);
        self
    }

    /// Sets a stateless declaration, replacing one with the same key in place.
    pub fn set_decl(
        &mut self,
        style_source_id: &str,
        breakpoint_id: &str,
        property: StyleProperty,
        value: StyleValue,
    ) -> &mut Self {
        self.upsert(StyleDecl {
            style_source_id: style_source_id.into(),
            breakpoint_id: breakpoint_id.into(),
            state: None,
            property,
            value,
        })
    }

    /// Inserts a declaration, replacing one with the same key in place.
    pub fn upsert(&mut self, decl: StyleDecl) -> &mut Self {
        let existing = self.styles.iter_mut().find(|d| {
            d.style_source_id == decl.style_source_id
                && d.breakpoint_id == decl.breakpoint_id
                && d.state == decl.state
                && d.property == decl.property
        });
        match existing {
            Some(slot) => *slot = decl,
            None => self.styles.push(decl),
        }
        self
    }
}
