// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural patches against a namespace's JSON value.
//!
//! ## Wire format
//!
//! A patch is `{ "op": "add" | "remove" | "replace", "path": [...], "value"?: ... }`.
//! `path` is relative to the namespace root; each segment is a string (object
//! key) or a non-negative integer (array index).
//!
//! | op        | object key            | array index                    | empty path      |
//! |-----------|-----------------------|--------------------------------|-----------------|
//! | `add`     | insert or overwrite   | insert, `index == len` appends | replace root    |
//! | `replace` | insert or overwrite   | overwrite existing             | replace root    |
//! | `remove`  | delete, must exist    | delete, must exist             | error           |
//!
//! Every intermediate segment must already exist.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error applying a [`Patch`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// `add` or `replace` without a value.
    #[error("`{op}` at `{path}` has no value")]
    MissingValue {
        /// The operation.
        op: PatchOp,
        /// The target path.
        path: String,
    },
    /// `remove` with an empty path.
    #[error("cannot remove the namespace root")]
    RemoveRoot,
    /// A path segment does not exist.
    #[error("path `{0}` does not exist")]
    NotFound(String),
    /// A key was used on an array, an index on an object, or either on a scalar.
    #[error("path `{0}` does not match the shape of the value")]
    TypeMismatch(String),
    /// An array index past the end.
    #[error("index {index} out of bounds at `{path}` (length {len})")]
    OutOfBounds {
        /// The parent path.
        path: String,
        /// The offending index.
        index: usize,
        /// The array length.
        len: usize,
    },
}

/// A structural operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Insert, or overwrite an object entry.
    Add,
    /// Delete.
    Remove,
    /// Overwrite.
    Replace,
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
        })
    }
}

/// One step of a patch path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An array index.
    Index(usize),
    /// An object key.
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.into())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}

/// One structural change.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tessera_build::{Patch, PathSegment, apply_patches};
///
/// let mut styles = json!({});
/// apply_patches(
///     &mut styles,
///     &[
///         Patch::add(["a"], json!({ "n": 1 })),
///         Patch::replace(["a", "n"], json!(2)),
///         Patch::add(["b"], json!([1, 3])),
///         Patch::add([PathSegment::from("b"), PathSegment::Index(1)], json!(2)),
///     ],
/// )
/// .unwrap();
/// assert_eq!(styles, json!({ "a": { "n": 2 }, "b": [1, 2, 3] }));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// The operation.
    pub op: PatchOp,
    /// Path from the namespace root.
    pub path: Vec<PathSegment>,
    /// The new value, for `add` and `replace`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Patch {
    /// Creates an `add` patch.
    pub fn add<P: Into<PathSegment>>(path: impl IntoIterator<Item = P>, value: Value) -> Self {
        Self {
            op: PatchOp::Add,
            path: path.into_iter().map(Into::into).collect(),
            value: Some(value),
        }
    }

    /// Creates a `replace` patch.
    pub fn replace<P: Into<PathSegment>>(path: impl IntoIterator<Item = P>, value: Value) -> Self {
        Self {
            op: PatchOp::Replace,
            ..Self::add(path, value)
        }
    }

    /// Creates a `remove` patch.
    pub fn remove<P: Into<PathSegment>>(path: impl IntoIterator<Item = P>) -> Self {
        Self {
            op: PatchOp::Remove,
            path: path.into_iter().map(Into::into).collect(),
            value: None,
        }
    }

    /// Returns the first path segment if it is an object key, which for
    /// keyed namespaces is the id of the touched entry.
    #[must_use]
    pub fn root_key(&self) -> Option<&str> {
        match self.path.first() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }

    fn value(&self) -> Result<&Value, PatchError> {
        self.value.as_ref().ok_or_else(|| PatchError::MissingValue {
            op: self.op,
            path: render_path(&self.path),
        })
    }
}

/// Applies patches in order.
///
/// Stops at the first failing patch; earlier patches stay applied, so callers
/// needing all-or-nothing apply to a copy.
pub fn apply_patches(target: &mut Value, patches: &[Patch]) -> Result<(), PatchError> {
    patches.iter().try_for_each(|patch| apply_patch(target, patch))
}

/// Applies one patch.
pub fn apply_patch(target: &mut Value, patch: &Patch) -> Result<(), PatchError> {
    let Some((last, parents)) = patch.path.split_last() else {
        return match patch.op {
            PatchOp::Remove => Err(PatchError::RemoveRoot),
            PatchOp::Add | PatchOp::Replace => {
                *target = patch.value()?.clone();
                Ok(())
            }
        };
    };

    let mut node = target;
    for (depth, segment) in parents.iter().enumerate() {
        let here = || render_path(&patch.path[..=depth]);
        node = match (segment, node) {
            (PathSegment::Key(key), Value::Object(map)) => {
                map.get_mut(key).ok_or_else(|| PatchError::NotFound(here()))?
            }
            (PathSegment::Index(index), Value::Array(items)) => items
                .get_mut(*index)
                .ok_or_else(|| PatchError::NotFound(here()))?,
            _ => return Err(PatchError::TypeMismatch(here())),
        };
    }

    let full = || render_path(&patch.path);
    match (last, node) {
        (PathSegment::Key(key), Value::Object(map)) => match patch.op {
            PatchOp::Add | PatchOp::Replace => {
                map.insert(key.clone(), patch.value()?.clone());
            }
            PatchOp::Remove => {
                map.shift_remove(key)
                    .ok_or_else(|| PatchError::NotFound(full()))?;
            }
        },
        (PathSegment::Index(index), Value::Array(items)) => {
            let index = *index;
            let len = items.len();
            let out_of_bounds = || PatchError::OutOfBounds {
                path: render_path(parents),
                index,
                len,
            };
            match patch.op {
                PatchOp::Add if index <= len => items.insert(index, patch.value()?.clone()),
                PatchOp::Replace if index < len => items[index] = patch.value()?.clone(),
                PatchOp::Remove if index < len => {
                    items.remove(index);
                }
                _ => return Err(out_of_bounds()),
            }
        }
        _ => return Err(PatchError::TypeMismatch(full())),
    }
    Ok(())
}

fn render_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        out.push('/');
        out.push_str(&segment.to_string());
    }
    out
}
