// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editing session: the explicit application state the resolver reads
//! and the batch builder writes.

use hashbrown::HashMap;
use serde::Deserialize;
use tessera_style::{
    ComponentRegistry, InstanceSelector, ResolveCx, Style, StyleData, StyleInfo,
    StyleSourceSelection, StyleSourceSelector,
};
use uuid::Uuid;

use crate::batch::BatchUpdate;
use crate::model::{BuildData, BuildDataError};
use crate::namespace::Namespace;
use crate::patch::PatchError;
use crate::transaction::{Change, Transaction, TransactionLog};

/// Editing session configuration.
///
/// The server recognizes a retried request by its last transaction id, so
/// `client_id` must be unique per session. The default draws a random one.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Prefix of every transaction and style source id this session mints.
    pub client_id: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            client_id: Uuid::new_v4().simple().to_string(),
        }
    }
}

/// What the user currently has selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// The selected instance and its ancestry.
    pub instance_selector: Option<InstanceSelector>,
    /// The selected breakpoint.
    pub breakpoint_id: Option<String>,
    /// The selected style source; `None` targets the instance's local source.
    pub style_source_selector: Option<StyleSourceSelector>,
}

/// A decoded snapshot of the resolver inputs of an [`Editor`].
#[derive(Debug)]
pub struct StyleContext<'e> {
    data: StyleData,
    components: &'e ComponentRegistry,
    instance_tags: &'e HashMap<String, String>,
}

impl StyleContext<'_> {
    /// Returns the decoded style data.
    #[must_use]
    pub fn data(&self) -> &StyleData {
        &self.data
    }

    /// Returns a resolution context over the snapshot.
    #[must_use]
    pub fn cx(&self) -> ResolveCx<'_> {
        ResolveCx::new(&self.data, self.components, self.instance_tags)
    }
}

/// One editing session.
///
/// Holds the live build data the resolver reads, the committed data it was
/// derived from while an ephemeral preview is applied, the selection and the
/// log of committed transactions waiting for the sync client.
///
/// # Example
///
/// ```rust
/// use tessera_build::{BuildData, Editor, EditorConfig, PublishOptions, SetOptions};
/// use tessera_property::{StyleProperty, StyleValue};
/// use tessera_style::{Breakpoint, Instance, InstanceSelector, Style, StyleData, Tier};
///
/// let mut data = StyleData::new();
/// data.add_breakpoint(Breakpoint::base("base", "Base"))
///     .add_instance(Instance::new("box", "Box"), None);
///
/// let mut editor = Editor::new(
///     EditorConfig { client_id: "alice".into() },
///     BuildData::from_style_data(&data).unwrap(),
/// );
/// editor.select_instance(Some(InstanceSelector::new(["box"])));
/// editor.select_breakpoint(Some("base"));
///
/// let mut batch = editor.create_batch_update();
/// batch
///     .set_property(StyleProperty::Width, StyleValue::px(320.0), SetOptions::default())
///     .unwrap();
/// batch.publish(PublishOptions::default()).unwrap();
///
/// let info = editor.resolve(&Style::default()).unwrap();
/// assert_eq!(info[&StyleProperty::Width].tier, Tier::Local);
/// let transactions = editor.take_transactions();
/// assert_eq!(transactions.len(), 1);
/// assert_eq!(transactions[0].transaction_id, "alice-1");
/// ```
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    data: BuildData,
    committed: Option<BuildData>,
    selection: Selection,
    log: TransactionLog,
    next_transaction: u64,
    next_id: u64,
    components: ComponentRegistry,
    instance_tags: HashMap<String, String>,
}

impl Editor {
    /// Creates a session over committed build data.
    #[must_use]
    pub fn new(config: EditorConfig, data: BuildData) -> Self {
        Self {
            config,
            data,
            committed: None,
            selection: Selection::default(),
            log: TransactionLog::new(),
            next_transaction: 1,
            next_id: 1,
            components: ComponentRegistry::new(),
            instance_tags: HashMap::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Returns the live data, including any ephemeral preview.
    #[must_use]
    pub fn data(&self) -> &BuildData {
        &self.data
    }

    /// Returns the last committed data, excluding any ephemeral preview.
    #[must_use]
    pub fn committed(&self) -> &BuildData {
        self.committed.as_ref().unwrap_or(&self.data)
    }

    /// Returns `true` while an ephemeral preview is applied.
    #[must_use]
    pub fn has_ephemeral(&self) -> bool {
        self.committed.is_some()
    }

    /// Returns the selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selects an instance. Clears the style source selection.
    pub fn select_instance(&mut self, instance_selector: Option<InstanceSelector>) {
        self.selection.instance_selector = instance_selector;
        self.selection.style_source_selector = None;
    }

    /// Selects a breakpoint.
    pub fn select_breakpoint(&mut self, breakpoint_id: Option<&str>) {
        self.selection.breakpoint_id = breakpoint_id.map(Into::into);
    }

    /// Selects the style source (and state) edits go to.
    pub fn select_style_source(&mut self, selector: Option<StyleSourceSelector>) {
        self.selection.style_source_selector = selector;
    }

    /// Returns the component registry used for preset styles.
    pub fn components_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.components
    }

    /// Replaces the rendered tag map reported by the canvas.
    pub fn set_instance_tags(&mut self, instance_tags: HashMap<String, String>) {
        self.instance_tags = instance_tags;
    }

    /// Opens a batch of property edits against the current selection.
    ///
    /// The batch borrows the session mutably, so a second batch cannot be
    /// opened while one is unpublished:
    ///
    /// ```rust,compile_fail
    /// use tessera_build::{BuildData, Editor, EditorConfig};
    ///
    /// let mut editor = Editor::new(EditorConfig::default(), BuildData::new());
    /// let first = editor.create_batch_update();
    /// let second = editor.create_batch_update();
    /// drop((first, second));
    /// ```
    pub fn create_batch_update(&mut self) -> BatchUpdate<'_> {
        BatchUpdate::new(self)
    }

    /// Decodes the read-only resolver inputs from the live data.
    pub fn style_context(&self) -> Result<StyleContext<'_>, BuildDataError> {
        Ok(StyleContext {
            data: self.data.style_data()?,
            components: &self.components,
            instance_tags: &self.instance_tags,
        })
    }

    /// Resolves the selected instance against the live data.
    pub fn resolve(&self, computed: &Style) -> Result<StyleInfo, BuildDataError> {
        let context = self.style_context()?;
        let cx = context.cx();
        let selector = self.effective_style_source_selector()?;
        let instance_selector = self
            .selection
            .instance_selector
            .clone()
            .unwrap_or_else(|| InstanceSelector::new::<_, String>([]));
        Ok(cx.resolve(
            &instance_selector,
            self.selection.breakpoint_id.as_deref(),
            selector.as_ref(),
            computed,
        ))
    }

    /// Returns the selected style source, falling back to the selected
    /// instance's local source and then to the last source it has attached.
    pub fn effective_style_source_selector(
        &self,
    ) -> Result<Option<StyleSourceSelector>, BuildDataError> {
        if let Some(selector) = &self.selection.style_source_selector {
            return Ok(Some(selector.clone()));
        }
        let Some(instance_id) = self
            .selection
            .instance_selector
            .as_ref()
            .and_then(InstanceSelector::instance_id)
        else {
            return Ok(None);
        };
        if let Some(id) = self.data.local_source_of(instance_id)? {
            return Ok(Some(StyleSourceSelector::new(&id)));
        }
        let selection = self
            .data
            .entry::<StyleSourceSelection>(Namespace::StyleSourceSelections, instance_id)?;
        Ok(selection
            .and_then(|selection| selection.values.last().cloned())
            .map(|id| StyleSourceSelector::new(&id)))
    }

    /// Reverts every ephemeral change to the last committed value.
    pub fn abort_ephemeral(&mut self) {
        if let Some(committed) = self.committed.take() {
            log::debug!("aborting ephemeral preview");
            self.data = committed;
        }
    }

    /// Removes and returns committed transactions not yet synced.
    pub fn take_transactions(&mut self) -> Vec<Transaction> {
        self.log.drain()
    }

    /// Applies changes that arrived from elsewhere, bypassing the log.
    ///
    /// Any ephemeral preview is dropped.
    pub fn apply_remote(&mut self, changes: &[Change]) -> Result<(), PatchError> {
        self.abort_ephemeral();
        let mut next = self.data.clone();
        for change in changes {
            next.apply(change)?;
        }
        self.data = next;
        Ok(())
    }

    /// Replaces all data, e.g. after reloading the authoritative build.
    pub fn replace_data(&mut self, data: BuildData) {
        self.committed = None;
        self.data = data;
    }

    pub(crate) fn mint_id(&mut self, kind: &str) -> String {
        let seq = self.next_id;
        self.next_id += 1;
        format!("{}-{kind}-{seq}", self.config.client_id)
    }

    fn mint_transaction_id(&mut self) -> String {
        let seq = self.next_transaction;
        self.next_transaction += 1;
        format!("{}-{seq}", self.config.client_id)
    }

    /// Commits changes: applies them to the committed data, discards any
    /// preview and logs one transaction.
    pub(crate) fn commit(&mut self, changes: Vec<Change>) -> Result<(), PatchError> {
        let mut next = self.committed.take().unwrap_or_else(|| self.data.clone());
        for change in &changes {
            next.apply(change)?;
        }
        self.data = next;
        if changes.is_empty() {
            return Ok(());
        }
        let transaction_id = self.mint_transaction_id();
        log::debug!(
            "committed {transaction_id} touching {} namespace(s)",
            changes.len()
        );
        self.log.push(Transaction {
            transaction_id,
            changes,
        });
        Ok(())
    }

    /// Applies changes to the live data only.
    pub(crate) fn preview(&mut self, changes: &[Change]) -> Result<(), PatchError> {
        let mut next = self.data.clone();
        for change in changes {
            next.apply(change)?;
        }
        if self.committed.is_none() {
            self.committed = Some(std::mem::replace(&mut self.data, next));
        } else {
            self.data = next;
        }
        Ok(())
    }
}
