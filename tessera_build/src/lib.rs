// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Build: namespaced build data and the editing session that mutates it.
//!
//! ## Build data
//!
//! [`BuildData`] holds one JSON value per [`Namespace`]. The style-related
//! namespaces decode into a [`tessera_style::StyleData`] snapshot for
//! resolution.
//!
//! ## Patches and transactions
//!
//! Every mutation is expressed as [`Patch`]es grouped per namespace into a
//! [`Change`], and changes are grouped into an atomic [`Transaction`] with a
//! client-unique id. The same patches are replayed by the server.
//!
//! ## Editing
//!
//! An [`Editor`] owns the live data, the selection and the
//! [`TransactionLog`]. [`Editor::create_batch_update`] opens a
//! [`BatchUpdate`]; publishing it either commits one transaction or applies
//! an ephemeral preview that is never logged.
//!
//! ```rust
//! use tessera_build::{BuildData, Editor, EditorConfig, Namespace, PublishOptions, SetOptions};
//! use tessera_property::{StyleProperty, StyleValue};
//! use tessera_style::{Breakpoint, Instance, InstanceSelector, StyleData};
//!
//! let mut data = StyleData::new();
//! data.add_breakpoint(Breakpoint::base("base", "Base"))
//!     .add_instance(Instance::new("box", "Box"), None);
//! let mut editor = Editor::new(EditorConfig::default(), BuildData::from_style_data(&data).unwrap());
//! editor.select_instance(Some(InstanceSelector::new(["box"])));
//! editor.select_breakpoint(Some("base"));
//!
//! let mut batch = editor.create_batch_update();
//! batch.delete_property(StyleProperty::Color, SetOptions::default());
//! batch
//!     .set_property(StyleProperty::Width, StyleValue::px(10.0), SetOptions::default())
//!     .unwrap();
//! batch.publish(PublishOptions::default()).unwrap();
//!
//! let transactions = editor.take_transactions();
//! let touched: Vec<_> = transactions[0].namespaces().collect();
//! assert_eq!(
//!     touched,
//!     [Namespace::StyleSources, Namespace::StyleSourceSelections, Namespace::Styles]
//! );
//! ```

mod batch;
mod editor;
mod model;
mod namespace;
mod patch;
mod transaction;

pub use batch::{BatchError, BatchUpdate, PublishOptions, SetOptions};
pub use editor::{Editor, EditorConfig, Selection, StyleContext};
pub use model::{BuildData, BuildDataError};
pub use namespace::{Namespace, UnknownNamespace};
pub use patch::{Patch, PatchError, PatchOp, PathSegment, apply_patch, apply_patches};
pub use transaction::{Change, Transaction, TransactionLog};
