// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declaration lookup by style source and by instance.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::source::{StyleDecl, StyleSourceSelection};

/// Borrowed lookup indices over a declaration collection.
///
/// Both indices keep collection order within a bucket:
///
/// - `by_style_source` holds each source's declarations.
/// - `by_instance` holds the declarations of every source an instance
///   selects, not grouped by source.
///
/// Building the index is a pure function of its inputs; rebuild it whenever
/// declarations or selections change.
///
/// # Example
///
/// ```rust
/// use tessera_property::{StyleProperty, StyleValue};
/// use tessera_style::{StyleDecl, StyleSourceSelection, StylesIndex};
///
/// let decl = |source: &str, value: &str| StyleDecl {
///     style_source_id: source.into(),
///     breakpoint_id: "base".into(),
///     state: None,
///     property: StyleProperty::Color,
///     value: StyleValue::keyword(value),
/// };
/// let styles = [decl("local", "blue"), decl("other", "green"), decl("token", "red")];
/// let selections = [StyleSourceSelection {
///     instance_id: "box".into(),
///     values: vec!["token".into(), "local".into()],
/// }];
///
/// let index = StylesIndex::new(&styles, &selections);
/// let values: Vec<_> = index
///     .by_instance("box")
///     .iter()
///     .map(|decl| decl.value.as_keyword().unwrap())
///     .collect();
/// assert_eq!(values, ["blue", "red"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StylesIndex<'a> {
    by_style_source: HashMap<&'a str, Vec<&'a StyleDecl>>,
    by_instance: HashMap<&'a str, Vec<&'a StyleDecl>>,
}

impl<'a> StylesIndex<'a> {
    /// Builds both indices.
    pub fn new(
        styles: impl IntoIterator<Item = &'a StyleDecl>,
        selections: impl IntoIterator<Item = &'a StyleSourceSelection>,
    ) -> Self {
        let styles: Vec<&'a StyleDecl> = styles.into_iter().collect();
        let mut by_style_source: HashMap<&'a str, Vec<&'a StyleDecl>> = HashMap::new();
        for &decl in &styles {
            by_style_source
                .entry(decl.style_source_id.as_str())
                .or_default()
                .push(decl);
        }

        let mut by_instance = HashMap::new();
        for selection in selections {
            let sources: HashSet<&str> = selection.values.iter().map(String::as_str).collect();
            let decls: Vec<&'a StyleDecl> = styles
                .iter()
                .copied()
                .filter(|decl| sources.contains(decl.style_source_id.as_str()))
                .collect();
            by_instance.insert(selection.instance_id.as_str(), decls);
        }

        Self {
            by_style_source,
            by_instance,
        }
    }

    /// Returns the declarations of a style source, in collection order.
    #[must_use]
    pub fn by_style_source(&self, style_source_id: &str) -> &[&'a StyleDecl] {
        self.by_style_source
            .get(style_source_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the declarations applying to an instance, in collection order.
    #[must_use]
    pub fn by_instance(&self, instance_id: &str) -> &[&'a StyleDecl] {
        self.by_instance.get(instance_id).map_or(&[], Vec::as_slice)
    }
}
