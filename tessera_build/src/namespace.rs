// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build data namespaces.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// One independently patched section of a build.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Namespace {
    /// Pages and folders.
    Pages,
    /// Breakpoints by id.
    Breakpoints,
    /// Instances by id.
    Instances,
    /// Instance props by id.
    Props,
    /// Data sources by id.
    DataSources,
    /// Resources by id.
    Resources,
    /// Style sources by id.
    StyleSources,
    /// Style source selections by instance id.
    StyleSourceSelections,
    /// Style declarations by declaration key.
    Styles,
    /// Project assets. Stored outside the build row.
    Assets,
    /// Marketplace listing metadata.
    MarketplaceProduct,
}

impl Namespace {
    /// Every namespace.
    pub const ALL: [Self; 11] = [
        Self::Pages,
        Self::Breakpoints,
        Self::Instances,
        Self::Props,
        Self::DataSources,
        Self::Resources,
        Self::StyleSources,
        Self::StyleSourceSelections,
        Self::Styles,
        Self::Assets,
        Self::MarketplaceProduct,
    ];

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Breakpoints => "breakpoints",
            Self::Instances => "instances",
            Self::Props => "props",
            Self::DataSources => "dataSources",
            Self::Resources => "resources",
            Self::StyleSources => "styleSources",
            Self::StyleSourceSelections => "styleSourceSelections",
            Self::Styles => "styles",
            Self::Assets => "assets",
            Self::MarketplaceProduct => "marketplaceProduct",
        }
    }

    /// Returns `true` if the namespace is stored in the build row.
    #[must_use]
    pub fn is_build_column(self) -> bool {
        self != Self::Assets
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown namespace name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown namespace `{0}`")]
pub struct UnknownNamespace(pub String);

impl FromStr for Namespace {
    type Err = UnknownNamespace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|namespace| namespace.as_str() == s)
            .ok_or_else(|| UnknownNamespace(s.into()))
    }
}
