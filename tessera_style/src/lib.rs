// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Style: cascade resolution with provenance.
//!
//! Given the declarations of a build, the selected instance (with its
//! ancestry), breakpoint and style source, this crate computes the single
//! effective value of every [`StyleProperty`](tessera_property::StyleProperty)
//! and records where it came from:
//!
//! **Local/Token → Previous source → Cascaded breakpoint → Inherited → Preset → Computed**
//!
//! ## Core Concepts
//!
//! ### Breakpoints
//!
//! [`Breakpoint`]s are totally ordered by [`compare_media`]. The breakpoints
//! before the selected one in that order *cascade* into it.
//!
//! ### Style sources
//!
//! A [`StyleSource`] is either an instance's implicit `local` source or a
//! named token. Each instance attaches an ordered [`StyleSourceSelection`];
//! later sources win over earlier ones.
//!
//! ### Resolution
//!
//! [`ResolveCx`] bundles the [`StyleData`] snapshot, the
//! [`ComponentRegistry`] with preset styles, and the rendered tag of each
//! instance. [`ResolveCx::resolve`] produces a [`StyleInfo`];
//! [`style_source_of`] classifies entries of it for the editor.
//!
//! ```rust
//! use hashbrown::HashMap;
//! use tessera_property::{StyleProperty, StyleValue};
//! use tessera_style::{
//!     Breakpoint, ComponentRegistry, Instance, InstanceSelector, ResolveCx, Style, StyleData,
//!     StyleSource, StyleSourceSelector, Tier,
//! };
//!
//! let mut data = StyleData::new();
//! data.add_breakpoint(Breakpoint::base("base", "Base"))
//!     .add_breakpoint(Breakpoint::max_width("mobile", "Mobile", 479))
//!     .add_instance(Instance::new("title", "Heading"), None)
//!     .attach_source("title", StyleSource::Local { id: "title-local".into() })
//!     .set_decl("title-local", "base", StyleProperty::FontSize, StyleValue::px(32.0));
//!
//! let components = ComponentRegistry::new();
//! let tags = HashMap::new();
//! let cx = ResolveCx::new(&data, &components, &tags);
//!
//! // On mobile the base value cascades in.
//! let info = cx.resolve(
//!     &InstanceSelector::new(["title"]),
//!     Some("mobile"),
//!     Some(&StyleSourceSelector::new("title-local")),
//!     &Style::default(),
//! );
//! let font_size = &info[&StyleProperty::FontSize];
//! assert_eq!(font_size.tier, Tier::Cascaded);
//! assert_eq!(font_size.value, StyleValue::px(32.0));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod breakpoint;
mod data;
mod index;
mod info;
mod preset;
mod resolve;
mod source;
mod style;
mod tree;

pub use breakpoint::{
    Breakpoint, cascaded_breakpoint_ids, compare_media, equal_media, sorted_breakpoints,
};
pub use data::StyleData;
pub use index::StylesIndex;
pub use info::{
    CascadedValueInfo, InheritedValueInfo, SourceValueInfo, StyleInfo, StyleSourceKind,
    StyleValueInfo, Tier, style_source_of,
};
pub use preset::{ComponentMeta, ComponentRegistry};
pub use resolve::{BreakpointIds, ResolveCx};
pub use source::{StyleDecl, StyleSource, StyleSourceSelection, StyleSourceSelector, decl_key};
pub use style::{Style, StyleBuilder};
pub use tree::{Instance, InstanceChild, InstanceSelector};
