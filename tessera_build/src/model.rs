// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Namespaced build data.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tessera_style::{
    Breakpoint, Instance, StyleData, StyleDecl, StyleSource, StyleSourceSelection,
};

use crate::namespace::Namespace;
use crate::patch::{PatchError, apply_patches};
use crate::transaction::Change;

/// Error reading typed entries out of build data.
#[derive(Debug, thiserror::Error)]
pub enum BuildDataError {
    /// An entry does not match its namespace's shape.
    #[error("malformed entry `{key}` in `{namespace}`")]
    Malformed {
        /// The namespace.
        namespace: Namespace,
        /// The entry key.
        key: String,
        /// The decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A keyed namespace is not a JSON object.
    #[error("`{0}` is not a keyed map")]
    NotAMap(Namespace),
}

/// One JSON value per [`Namespace`].
///
/// Keyed namespaces are JSON objects from id to entry. Object key order is
/// preserved, so `styles` keeps declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildData {
    namespaces: BTreeMap<Namespace, Value>,
}

impl Default for BuildData {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildData {
    /// Creates build data with every namespace empty.
    #[must_use]
    pub fn new() -> Self {
        let namespaces = Namespace::ALL
            .into_iter()
            .map(|namespace| (namespace, Value::Object(Map::new())))
            .collect();
        Self { namespaces }
    }

    /// Returns a namespace's value.
    #[must_use]
    pub fn get(&self, namespace: Namespace) -> &Value {
        // Every namespace is populated on construction and never removed.
        &self.namespaces[&namespace]
    }

    /// Replaces a namespace's value.
    pub fn set(&mut self, namespace: Namespace, value: Value) {
        self.namespaces.insert(namespace, value);
    }

    /// Applies a change to a copy of its namespace and installs the copy
    /// only when every patch succeeded.
    pub fn apply(&mut self, change: &Change) -> Result<(), PatchError> {
        let mut value = self.get(change.namespace).clone();
        apply_patches(&mut value, &change.patches)?;
        self.set(change.namespace, value);
        Ok(())
    }

    /// Returns `true` if a keyed namespace has an entry for `key`.
    #[must_use]
    pub fn contains(&self, namespace: Namespace, key: &str) -> bool {
        self.get(namespace)
            .as_object()
            .is_some_and(|map| map.contains_key(key))
    }

    /// Decodes one entry of a keyed namespace.
    pub fn entry<T: DeserializeOwned>(
        &self,
        namespace: Namespace,
        key: &str,
    ) -> Result<Option<T>, BuildDataError> {
        let map = self.map(namespace)?;
        map.get(key)
            .map(|value| decode(namespace, key, value))
            .transpose()
    }

    /// Decodes every entry of a keyed namespace, in stored order.
    pub fn entries<T: DeserializeOwned>(
        &self,
        namespace: Namespace,
    ) -> Result<Vec<(String, T)>, BuildDataError> {
        self.map(namespace)?
            .iter()
            .map(|(key, value)| Ok((key.clone(), decode(namespace, key, value)?)))
            .collect()
    }

    /// Inserts or overwrites one entry of a keyed namespace.
    pub fn insert<T: Serialize>(
        &mut self,
        namespace: Namespace,
        key: &str,
        entry: &T,
    ) -> Result<(), BuildDataError> {
        let value = serde_json::to_value(entry).map_err(|source| BuildDataError::Malformed {
            namespace,
            key: key.into(),
            source,
        })?;
        match self.namespaces.get_mut(&namespace) {
            Some(Value::Object(map)) => {
                map.insert(key.into(), value);
                Ok(())
            }
            _ => Err(BuildDataError::NotAMap(namespace)),
        }
    }

    /// Decodes the style-related namespaces into a resolver snapshot.
    pub fn style_data(&self) -> Result<StyleData, BuildDataError> {
        Ok(StyleData {
            breakpoints: self
                .entries::<Breakpoint>(Namespace::Breakpoints)?
                .into_iter()
                .map(|(_, breakpoint)| breakpoint)
                .collect(),
            instances: self.entries::<Instance>(Namespace::Instances)?.into_iter().collect(),
            style_sources: self
                .entries::<StyleSource>(Namespace::StyleSources)?
                .into_iter()
                .collect(),
            style_source_selections: self
                .entries::<StyleSourceSelection>(Namespace::StyleSourceSelections)?
                .into_iter()
                .collect(),
            styles: self
                .entries::<StyleDecl>(Namespace::Styles)?
                .into_iter()
                .map(|(_, decl)| decl)
                .collect(),
        })
    }

    /// Encodes a resolver snapshot into the style-related namespaces,
    /// keyed by id (declarations by [`StyleDecl::key`]).
    pub fn from_style_data(data: &StyleData) -> Result<Self, BuildDataError> {
        let mut build = Self::new();
        for breakpoint in &data.breakpoints {
            build.insert(Namespace::Breakpoints, &breakpoint.id, breakpoint)?;
        }
        for (id, instance) in &data.instances {
            build.insert(Namespace::Instances, id, instance)?;
        }
        for (id, source) in &data.style_sources {
            build.insert(Namespace::StyleSources, id, source)?;
        }
        for (id, selection) in &data.style_source_selections {
            build.insert(Namespace::StyleSourceSelections, id, selection)?;
        }
        for decl in &data.styles {
            build.insert(Namespace::Styles, &decl.key(), decl)?;
        }
        Ok(build)
    }

    /// Returns the local style source attached to an instance, if any.
    pub fn local_source_of(&self, instance_id: &str) -> Result<Option<String>, BuildDataError> {
        let Some(selection) = self.entry::<StyleSourceSelection>(
            Namespace::StyleSourceSelections,
            instance_id,
        )?
        else {
            return Ok(None);
        };
        for id in selection.values {
            if let Some(source) = self.entry::<StyleSource>(Namespace::StyleSources, &id)?
                && source.is_local()
            {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    fn map(&self, namespace: Namespace) -> Result<&Map<String, Value>, BuildDataError> {
        self.get(namespace)
            .as_object()
            .ok_or(BuildDataError::NotAMap(namespace))
    }
}

fn decode<T: DeserializeOwned>(
    namespace: Namespace,
    key: &str,
    value: &Value,
) -> Result<T, BuildDataError> {
    T::deserialize(value).map_err(|source| BuildDataError::Malformed {
        namespace,
        key: key.into(),
        source,
    })
}
