// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Namespace schemas checked before a patched build is persisted.

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tessera_build::{Namespace, Patch};
use tessera_style::{Breakpoint, Instance, StyleDecl, StyleSource, StyleSourceSelection};

use crate::error::ValidationError;

/// The entries of one namespace a request changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Touched {
    /// Only these top-level keys.
    Keys(BTreeSet<String>),
    /// The namespace as a whole, through a patch on its root.
    All,
}

impl Default for Touched {
    fn default() -> Self {
        Self::Keys(BTreeSet::new())
    }
}

impl Touched {
    /// Records the entry a patch changes.
    pub fn record(&mut self, patch: &Patch) {
        match (patch.root_key(), &mut *self) {
            (_, Self::All) => {}
            (Some(key), Self::Keys(keys)) => {
                keys.insert(key.into());
            }
            (None, Self::Keys(_)) => *self = Self::All,
        }
    }
}

/// Validates a namespace's patched value.
///
/// `styles` is large, so only the entries named in `touched` are checked
/// there, unless a patch replaced the namespace root. Every other namespace
/// is checked whole. `assets` are validated by their own collaborator and
/// always pass.
pub fn validate_namespace(
    namespace: Namespace,
    value: &Value,
    touched: &Touched,
) -> Result<(), ValidationError> {
    match namespace {
        Namespace::Breakpoints => {
            let breakpoints = records::<Breakpoint>(namespace, value, |b| b.id.clone())?;
            let bases = breakpoints.iter().filter(|b| b.is_base()).count();
            if bases == 1 {
                Ok(())
            } else {
                Err(ValidationError::BaseBreakpoints(bases))
            }
        }
        Namespace::Instances => {
            records::<Instance>(namespace, value, |i| i.id.clone()).map(drop)
        }
        Namespace::StyleSources => {
            records::<StyleSource>(namespace, value, |s| s.id().into()).map(drop)
        }
        Namespace::StyleSourceSelections => {
            records::<StyleSourceSelection>(namespace, value, |s| s.instance_id.clone()).map(drop)
        }
        Namespace::Styles => {
            let map = as_map(namespace, value)?;
            match touched {
                Touched::All => map
                    .iter()
                    .try_for_each(|(key, entry)| check_decl(key, entry)),
                Touched::Keys(keys) => keys.iter().try_for_each(|key| {
                    // Removed declarations have nothing left to check.
                    map.get(key).map_or(Ok(()), |entry| check_decl(key, entry))
                }),
            }
        }
        Namespace::Pages | Namespace::Props | Namespace::DataSources | Namespace::Resources => {
            for (key, entry) in as_map(namespace, value)? {
                if !entry.is_object() {
                    return Err(ValidationError::NotAnObject {
                        namespace,
                        key: key.clone(),
                    });
                }
            }
            Ok(())
        }
        Namespace::MarketplaceProduct => as_map(namespace, value).map(drop),
        Namespace::Assets => Ok(()),
    }
}

fn check_decl(key: &str, entry: &Value) -> Result<(), ValidationError> {
    let decl: StyleDecl = decode(Namespace::Styles, key, entry)?;
    check_key(Namespace::Styles, key, decl.key())?;
    decl.value
        .ensure_persistable()
        .map_err(|source| ValidationError::NotPersistable {
            key: key.into(),
            source,
        })
}

fn as_map(namespace: Namespace, value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or(ValidationError::NotAMap(namespace))
}

/// Decodes every entry and checks it is stored under the key it derives.
fn records<T: DeserializeOwned>(
    namespace: Namespace,
    value: &Value,
    key_of: impl Fn(&T) -> String,
) -> Result<Vec<T>, ValidationError> {
    as_map(namespace, value)?
        .iter()
        .map(|(key, entry)| {
            let record = decode(namespace, key, entry)?;
            check_key(namespace, key, key_of(&record))?;
            Ok(record)
        })
        .collect()
}

fn decode<T: DeserializeOwned>(
    namespace: Namespace,
    key: &str,
    entry: &Value,
) -> Result<T, ValidationError> {
    T::deserialize(entry).map_err(|source| ValidationError::Malformed {
        namespace,
        key: key.into(),
        source,
    })
}

fn check_key(namespace: Namespace, key: &str, expected: String) -> Result<(), ValidationError> {
    if key == expected {
        Ok(())
    } else {
        Err(ValidationError::KeyMismatch {
            namespace,
            key: key.into(),
            expected,
        })
    }
}
