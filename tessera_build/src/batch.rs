// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched property edits.

use std::collections::BTreeMap;

use serde_json::json;
use tessera_property::{StyleProperty, StyleValue, ValueError};
use tessera_style::{StyleDecl, StyleSourceSelection, decl_key};

use crate::editor::Editor;
use crate::model::BuildDataError;
use crate::namespace::Namespace;
use crate::patch::{Patch, PatchError, PathSegment};
use crate::transaction::Change;

/// Error building or publishing a batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Publishing needs a selected instance.
    #[error("no instance is selected")]
    NoInstanceSelected,
    /// Publishing needs a selected breakpoint.
    #[error("no breakpoint is selected")]
    NoBreakpointSelected,
    /// The value is editor-only and can never be committed.
    #[error("value for `{property}` cannot be committed")]
    NotPersistable {
        /// The property being set.
        property: StyleProperty,
        /// Why the value was rejected.
        #[source]
        source: ValueError,
    },
    /// The selected style source does not exist.
    #[error("style source `{0}` does not exist")]
    UnknownStyleSource(String),
    /// Build data could not be read.
    #[error(transparent)]
    Data(#[from] BuildDataError),
    /// A declaration could not be encoded.
    #[error("failed to encode a declaration")]
    Encode(#[from] serde_json::Error),
    /// The computed patches did not apply.
    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Options for [`BatchUpdate::set_property`] and
/// [`BatchUpdate::delete_property`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Preview the change without committing it.
    pub is_ephemeral: bool,
}

/// Options for [`BatchUpdate::publish`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PublishOptions {
    /// Preview every change in the batch without committing any.
    pub is_ephemeral: bool,
}

#[derive(Clone, Debug)]
struct Pending {
    /// `None` deletes.
    value: Option<StyleValue>,
    is_ephemeral: bool,
}

type Ops = Vec<(StyleProperty, Option<StyleValue>)>;

/// Property edits accumulated between [`Editor::create_batch_update`] and
/// [`BatchUpdate::publish`].
///
/// The last operation on a property wins. Edits target the selected
/// instance, breakpoint, style source and state; with no style source
/// selected they go to the instance's local source, which is created on
/// publish when missing.
///
/// Ephemeral edits are applied to the live data only. They never reach a
/// transaction, and are expected to be followed by a committing publish or
/// by [`Editor::abort_ephemeral`].
///
/// # Example
///
/// ```rust
/// use tessera_build::{BuildData, Editor, EditorConfig, PublishOptions, SetOptions};
/// use tessera_property::{StyleProperty, StyleValue, Unit};
/// use tessera_style::{Breakpoint, Instance, InstanceSelector, StyleData};
///
/// let mut data = StyleData::new();
/// data.add_breakpoint(Breakpoint::base("base", "Base"))
///     .add_instance(Instance::new("box", "Box"), None);
/// let mut editor = Editor::new(EditorConfig::default(), BuildData::from_style_data(&data).unwrap());
/// editor.select_instance(Some(InstanceSelector::new(["box"])));
/// editor.select_breakpoint(Some("base"));
///
/// // Dragging a slider previews...
/// let mut batch = editor.create_batch_update();
/// let preview = SetOptions { is_ephemeral: true };
/// batch.set_property(StyleProperty::Opacity, StyleValue::unit(0.4, Unit::Number), preview).unwrap();
/// batch.publish(PublishOptions::default()).unwrap();
/// assert!(editor.has_ephemeral());
/// assert!(editor.take_transactions().is_empty());
///
/// // ...and releasing it commits.
/// let mut batch = editor.create_batch_update();
/// let opacity = StyleValue::unit(0.5, Unit::Number);
/// batch.set_property(StyleProperty::Opacity, opacity, SetOptions::default()).unwrap();
/// batch.publish(PublishOptions::default()).unwrap();
/// assert!(!editor.has_ephemeral());
/// assert_eq!(editor.take_transactions().len(), 1);
/// ```
#[derive(Debug)]
#[must_use = "a batch does nothing until it is published"]
pub struct BatchUpdate<'e> {
    editor: &'e mut Editor,
    ops: BTreeMap<StyleProperty, Pending>,
}

impl<'e> BatchUpdate<'e> {
    pub(crate) fn new(editor: &'e mut Editor) -> Self {
        Self {
            editor,
            ops: BTreeMap::new(),
        }
    }

    /// Stages a value for a property.
    ///
    /// Fails for `invalid` and `intermediate` values, which may never be
    /// committed or previewed.
    pub fn set_property(
        &mut self,
        property: StyleProperty,
        value: StyleValue,
        options: SetOptions,
    ) -> Result<(), BatchError> {
        value
            .ensure_persistable()
            .map_err(|source| BatchError::NotPersistable { property, source })?;
        self.ops.insert(
            property,
            Pending {
                value: Some(value),
                is_ephemeral: options.is_ephemeral,
            },
        );
        Ok(())
    }

    /// Stages the removal of a property.
    pub fn delete_property(&mut self, property: StyleProperty, options: SetOptions) {
        self.ops.insert(
            property,
            Pending {
                value: None,
                is_ephemeral: options.is_ephemeral,
            },
        );
    }

    /// Returns the number of staged properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Publishes the batch.
    ///
    /// Non-ephemeral edits are committed as one transaction, superseding any
    /// preview; ephemeral edits are then applied on top as a new preview.
    pub fn publish(self, options: PublishOptions) -> Result<(), BatchError> {
        if self.ops.is_empty() {
            return Ok(());
        }
        let Self { editor, ops } = self;
        let target = Target::from_selection(editor)?;

        let mut committed = Vec::new();
        let mut ephemeral = Vec::new();
        for (property, pending) in ops {
            if pending.is_ephemeral || options.is_ephemeral {
                ephemeral.push((property, pending.value));
            } else {
                committed.push((property, pending.value));
            }
        }
        log::debug!(
            "publishing batch on {}: {} committed, {} ephemeral",
            target.instance_id,
            committed.len(),
            ephemeral.len(),
        );

        if !committed.is_empty() {
            let changes = build_changes(editor, &target, committed, false)?;
            editor.commit(changes)?;
        }
        if !ephemeral.is_empty() {
            let changes = build_changes(editor, &target, ephemeral, true)?;
            editor.preview(&changes)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Target {
    instance_id: String,
    breakpoint_id: String,
    style_source_id: Option<String>,
    state: Option<String>,
}

impl Target {
    fn from_selection(editor: &Editor) -> Result<Self, BatchError> {
        let selection = editor.selection();
        let instance_id = selection
            .instance_selector
            .as_ref()
            .and_then(|selector| selector.instance_id())
            .ok_or(BatchError::NoInstanceSelected)?;
        let breakpoint_id = selection
            .breakpoint_id
            .clone()
            .ok_or(BatchError::NoBreakpointSelected)?;
        let selector = selection.style_source_selector.as_ref();
        Ok(Self {
            instance_id: instance_id.into(),
            breakpoint_id,
            style_source_id: selector.map(|s| s.style_source_id.clone()),
            state: selector.and_then(|s| s.state.clone()),
        })
    }
}

/// Turns staged operations into changes against the committed data, or the
/// live data for a preview.
fn build_changes(
    editor: &mut Editor,
    target: &Target,
    ops: Ops,
    ephemeral: bool,
) -> Result<Vec<Change>, BatchError> {
    let base = if ephemeral {
        editor.data()
    } else {
        editor.committed()
    };
    let existing = match &target.style_source_id {
        Some(id) if base.contains(Namespace::StyleSources, id) => Some(id.clone()),
        Some(id) => return Err(BatchError::UnknownStyleSource(id.clone())),
        None => base.local_source_of(&target.instance_id)?,
    };
    let selection = base.entry::<StyleSourceSelection>(
        Namespace::StyleSourceSelections,
        &target.instance_id,
    )?;

    let mut changes = Vec::new();
    let source_id = match existing {
        Some(id) => id,
        None if ops.iter().any(|(_, value)| value.is_some()) => {
            let id = editor.mint_id("local");
            changes.extend(create_local_source(&target.instance_id, &id, selection));
            id
        }
        // Only deletions and nothing to delete from.
        None => return Ok(changes),
    };

    let base = if ephemeral {
        editor.data()
    } else {
        editor.committed()
    };
    let mut patches = Vec::new();
    for (property, value) in ops {
        let key = decl_key(
            &source_id,
            &target.breakpoint_id,
            property,
            target.state.as_deref(),
        );
        match value {
            Some(value) => {
                let decl = StyleDecl {
                    style_source_id: source_id.clone(),
                    breakpoint_id: target.breakpoint_id.clone(),
                    state: target.state.clone(),
                    property,
                    value,
                };
                patches.push(Patch::add([key], serde_json::to_value(&decl)?));
            }
            None if base.contains(Namespace::Styles, &key) => {
                patches.push(Patch::remove([key]));
            }
            None => {}
        }
    }
    if !patches.is_empty() {
        changes.push(Change {
            namespace: Namespace::Styles,
            patches,
        });
    }
    Ok(changes)
}

fn create_local_source(
    instance_id: &str,
    source_id: &str,
    selection: Option<StyleSourceSelection>,
) -> [Change; 2] {
    let source = Change {
        namespace: Namespace::StyleSources,
        patches: vec![Patch::add(
            [source_id],
            json!({ "type": "local", "id": source_id }),
        )],
    };
    let attach = match selection {
        Some(selection) => Patch::add(
            [
                PathSegment::from(instance_id),
                PathSegment::from("values"),
                PathSegment::Index(selection.values.len()),
            ],
            json!(source_id),
        ),
        None => Patch::add(
            [instance_id],
            json!({ "instanceId": instance_id, "values": [source_id] }),
        ),
    };
    [
        source,
        Change {
            namespace: Namespace::StyleSourceSelections,
            patches: vec![attach],
        },
    ]
}
