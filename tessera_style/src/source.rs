// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style sources, their per-instance selection and style declarations.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use tessera_property::{StyleProperty, StyleValue};

/// A container of style declarations.
///
/// Every instance owns at most one implicit `local` source. Tokens are named
/// and may be attached to any number of instances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StyleSource {
    /// The instance's own source.
    Local {
        /// Unique id.
        id: String,
    },
    /// A named, reusable source.
    Token {
        /// Unique id.
        id: String,
        /// Display name.
        name: String,
    },
}

impl StyleSource {
    /// Returns the source id.
    #[must_use]
    #[inline]
    pub fn id(&self) -> &str {
        match self {
            Self::Local { id } | Self::Token { id, .. } => id,
        }
    }

    /// Returns `true` for a local source.
    #[must_use]
    #[inline]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }
}

/// The ordered list of style sources attached to one instance.
///
/// Later entries override earlier ones for the same property, breakpoint and
/// state. The local source, when present, is conventionally last.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSourceSelection {
    /// The instance the sources are attached to.
    pub instance_id: String,
    /// Style source ids, lowest precedence first.
    pub values: Vec<String>,
}

impl StyleSourceSelection {
    /// Returns the ids preceding `style_source_id`.
    ///
    /// Returns an empty slice when `style_source_id` is not selected.
    #[must_use]
    pub fn preceding(&self, style_source_id: &str) -> &[String] {
        self.values
            .iter()
            .position(|id| id == style_source_id)
            .map_or(&[], |position| &self.values[..position])
    }
}

/// One property value scoped to a style source, breakpoint and optional state.
///
/// At most one declaration exists per [`StyleDecl::key`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDecl {
    /// The owning style source.
    pub style_source_id: String,
    /// The breakpoint the declaration applies at.
    pub breakpoint_id: String,
    /// Pseudo-state such as `:hover`; `None` for the stateless style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// The property.
    pub property: StyleProperty,
    /// The value. Always persistable once committed.
    pub value: StyleValue,
}

impl StyleDecl {
    /// Returns the unique key of this declaration.
    ///
    /// ```rust
    /// use tessera_property::{StyleProperty, StyleValue};
    /// use tessera_style::StyleDecl;
    ///
    /// let decl = StyleDecl {
    ///     style_source_id: "local-1".into(),
    ///     breakpoint_id: "base".into(),
    ///     state: Some(":hover".into()),
    ///     property: StyleProperty::Color,
    ///     value: StyleValue::keyword("red"),
    /// };
    /// assert_eq!(decl.key(), "local-1:base:color::hover");
    /// ```
    #[must_use]
    pub fn key(&self) -> String {
        decl_key(
            &self.style_source_id,
            &self.breakpoint_id,
            self.property,
            self.state.as_deref(),
        )
    }
}

/// Builds a declaration key without a declaration at hand.
#[must_use]
pub fn decl_key(
    style_source_id: &str,
    breakpoint_id: &str,
    property: StyleProperty,
    state: Option<&str>,
) -> String {
    format!(
        "{style_source_id}:{breakpoint_id}:{}:{}",
        property.name(),
        state.unwrap_or("")
    )
}

/// The style source (and state) currently being edited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSourceSelector {
    /// The selected style source.
    pub style_source_id: String,
    /// The selected pseudo-state, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl StyleSourceSelector {
    /// Selects the stateless style of a source.
    #[must_use]
    pub fn new(style_source_id: &str) -> Self {
        Self {
            style_source_id: style_source_id.into(),
            state: None,
        }
    }

    /// Selects a pseudo-state of a source.
    #[must_use]
    pub fn with_state(style_source_id: &str, state: &str) -> Self {
        Self {
            style_source_id: style_source_id.into(),
            state: Some(state.into()),
        }
    }
}
