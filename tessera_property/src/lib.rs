// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Property: typed CSS style values and property metadata.
//!
//! This crate is the leaf of the tessera style stack. It provides the
//! vocabulary every other crate speaks:
//!
//! - [`StyleProperty`]: a closed enum of the CSS properties the builder
//!   edits, each with its [`PropertyMetadata`] (wire name, CSS name and
//!   whether the property is inherited).
//! - [`StyleValue`]: the typed representation of a CSS value.
//! - A CSS text codec: [`parse_css_value`] turns text into a [`StyleValue`]
//!   and `Display` turns it back.
//!
//! ## Persistable values
//!
//! Only `keyword`, `unit`, `rgb`, `tuple` and `layers` values may ever be
//! committed. `invalid` and `intermediate` values exist while the user is
//! still typing; commit boundaries call [`StyleValue::ensure_persistable`].
//!
//! ```rust
//! use tessera_property::{StyleProperty, StyleValue, Unit, parse_css_value};
//!
//! let value = parse_css_value(StyleProperty::Width, "120px");
//! assert_eq!(value, StyleValue::unit(120.0, Unit::Px));
//! assert!(value.is_persistable());
//!
//! let typing = parse_css_value(StyleProperty::Width, "120p(");
//! assert!(!typing.is_persistable());
//! assert!(typing.ensure_persistable().is_err());
//! ```
//!
//! ## Property metadata
//!
//! ```rust
//! use tessera_property::StyleProperty;
//!
//! assert!(StyleProperty::Color.is_inherited());
//! assert!(!StyleProperty::MarginTop.is_inherited());
//! assert_eq!(StyleProperty::from_name("backgroundColor"), Some(StyleProperty::BackgroundColor));
//! assert_eq!(StyleProperty::BackgroundColor.css_name(), "background-color");
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod css;
mod metadata;
mod property;
mod value;

pub use css::parse_css_value;
pub use metadata::PropertyMetadata;
pub use property::StyleProperty;
pub use value::{Layer, StyleValue, Unit, ValueError};
