// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The instance tree as seen by style resolution.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// A component instance in the document tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Unique id.
    pub id: String,
    /// Component type, the key into the component registry.
    pub component: String,
    /// User-facing label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Ordered children.
    #[serde(default)]
    pub children: Vec<InstanceChild>,
}

impl Instance {
    /// Creates an instance with no children.
    #[must_use]
    pub fn new(id: &str, component: &str) -> Self {
        Self {
            id: id.into(),
            component: component.into(),
            label: None,
            children: Vec::new(),
        }
    }

    /// Returns the ids of child instances, skipping text children.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.children.iter().filter_map(|child| match child {
            InstanceChild::Id { value } => Some(value.as_str()),
            InstanceChild::Text { .. } => None,
        })
    }
}

/// A child of an [`Instance`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InstanceChild {
    /// Another instance, by id.
    Id {
        /// The child instance id.
        value: String,
    },
    /// A text node.
    Text {
        /// The text.
        value: String,
    },
}

/// A path from a selected instance up to the root: `[selected, parent, ..., root]`.
///
/// The same component instance can appear in several places (slots), so the
/// full path identifies what is selected, not the id alone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceSelector(Vec<String>);

impl InstanceSelector {
    /// Creates a selector from ids ordered selected-first.
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    /// Returns the selected instance id.
    #[must_use]
    pub fn instance_id(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns the parent's selector.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        (self.0.len() > 1).then(|| Self(self.0[1..].to_vec()))
    }

    /// Returns the ancestor ids from the root down to the parent, excluding
    /// the selected instance.
    pub fn ancestors_from_root(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().skip(1).rev().map(String::as_str)
    }

    /// Returns the ids, selected instance first.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if the selector is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
