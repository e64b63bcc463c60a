// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoints and their cascade order.
//!
//! Breakpoints are ordered the way their media queries end up in the
//! generated stylesheet: the base breakpoint first, then `max-width`
//! breakpoints from widest to narrowest, then `min-width` breakpoints from
//! narrowest to widest. A declaration at a later breakpoint overrides one at
//! an earlier breakpoint when both apply.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A named viewport-width range that scopes style declarations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// Unique id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Lower bound in CSS pixels, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    /// Upper bound in CSS pixels, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
}

impl Breakpoint {
    /// Creates the base breakpoint, which applies at every width.
    #[must_use]
    pub fn base(id: &str, label: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            min_width: None,
            max_width: None,
        }
    }

    /// Creates a breakpoint bounded by `max-width`.
    #[must_use]
    pub fn max_width(id: &str, label: &str, max_width: u32) -> Self {
        Self {
            max_width: Some(max_width),
            ..Self::base(id, label)
        }
    }

    /// Creates a breakpoint bounded by `min-width`.
    #[must_use]
    pub fn min_width(id: &str, label: &str, min_width: u32) -> Self {
        Self {
            min_width: Some(min_width),
            ..Self::base(id, label)
        }
    }

    /// Returns `true` if this is the base breakpoint (no width bound).
    #[must_use]
    #[inline]
    pub fn is_base(&self) -> bool {
        self.min_width.is_none() && self.max_width.is_none()
    }
}

/// Compares two breakpoints by cascade order.
///
/// A breakpoint carrying both bounds is ordered by its `min-width`.
#[must_use]
pub fn compare_media(a: &Breakpoint, b: &Breakpoint) -> Ordering {
    match (a.is_base(), b.is_base()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }
    match (a.min_width, b.min_width, a.max_width, b.max_width) {
        (Some(a_min), Some(b_min), _, _) => a_min.cmp(&b_min),
        (None, None, Some(a_max), Some(b_max)) => b_max.cmp(&a_max),
        (Some(_), None, _, _) => Ordering::Greater,
        _ => Ordering::Less,
    }
}

/// Returns `true` if both breakpoints describe the same media query.
#[must_use]
pub fn equal_media(a: &Breakpoint, b: &Breakpoint) -> bool {
    a.min_width == b.min_width && a.max_width == b.max_width
}

/// Returns the breakpoints sorted by cascade order.
///
/// The sort is stable, so breakpoints with equal media keep their input order.
#[must_use]
pub fn sorted_breakpoints<'a>(
    breakpoints: impl IntoIterator<Item = &'a Breakpoint>,
) -> Vec<&'a Breakpoint> {
    let mut sorted: Vec<_> = breakpoints.into_iter().collect();
    sorted.sort_by(|a, b| compare_media(a, b));
    sorted
}

/// Returns the ids of every breakpoint that precedes `selected` in cascade
/// order, lowest precedence first.
///
/// An unknown `selected` id yields an empty list, the same as selecting the
/// base breakpoint.
///
/// # Example
///
/// ```rust
/// use tessera_style::{Breakpoint, cascaded_breakpoint_ids};
///
/// let breakpoints = [
///     Breakpoint::max_width("small", "Mobile", 767),
///     Breakpoint::base("base", "Base"),
///     Breakpoint::max_width("medium", "Tablet", 991),
/// ];
/// let ids = cascaded_breakpoint_ids(&breakpoints, "small");
/// assert_eq!(ids.as_slice(), ["base", "medium"]);
/// assert!(cascaded_breakpoint_ids(&breakpoints, "gone").is_empty());
/// ```
#[must_use]
pub fn cascaded_breakpoint_ids<'a>(
    breakpoints: impl IntoIterator<Item = &'a Breakpoint>,
    selected: &str,
) -> SmallVec<[&'a str; 4]> {
    let sorted = sorted_breakpoints(breakpoints);
    let Some(position) = sorted.iter().position(|bp| bp.id == selected) else {
        return SmallVec::new();
    };
    sorted[..position].iter().map(|bp| bp.id.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(breakpoints: &[&'a Breakpoint]) -> Vec<&'a str> {
        breakpoints.iter().map(|bp| bp.id.as_str()).collect()
    }

    #[test]
    fn base_sorts_first() {
        let list = [
            Breakpoint::min_width("wide", "Wide", 1280),
            Breakpoint::base("base", "Base"),
        ];
        assert_eq!(ids(&sorted_breakpoints(&list)), ["base", "wide"]);
    }

    #[test]
    fn max_width_descends_then_min_width_ascends() {
        let list = [
            Breakpoint::min_width("xl", "XL", 1440),
            Breakpoint::max_width("small", "Mobile", 479),
            Breakpoint::min_width("lg", "LG", 1280),
            Breakpoint::base("base", "Base"),
            Breakpoint::max_width("medium", "Tablet", 991),
            Breakpoint::max_width("landscape", "Landscape", 767),
        ];
        assert_eq!(
            ids(&sorted_breakpoints(&list)),
            ["base", "medium", "landscape", "small", "lg", "xl"]
        );
    }

    #[test]
    fn cascaded_excludes_selected_and_later() {
        let list = [
            Breakpoint::base("base", "Base"),
            Breakpoint::max_width("medium", "Tablet", 991),
            Breakpoint::max_width("small", "Mobile", 767),
        ];
        assert_eq!(cascaded_breakpoint_ids(&list, "small").as_slice(), ["base", "medium"]);
        assert_eq!(cascaded_breakpoint_ids(&list, "medium").as_slice(), ["base"]);
        assert!(cascaded_breakpoint_ids(&list, "base").is_empty());
    }

    #[test]
    fn equal_media_compares_both_bounds() {
        let a = Breakpoint::max_width("a", "A", 767);
        let b = Breakpoint::max_width("b", "B", 767);
        let c = Breakpoint::min_width("c", "C", 767);
        assert!(equal_media(&a, &b));
        assert!(!equal_media(&a, &c));
        assert!(equal_media(
            &Breakpoint::base("x", "X"),
            &Breakpoint::base("y", "Y")
        ));
    }

    #[test]
    fn json_uses_camel_case_and_omits_absent_bounds() {
        let bp = Breakpoint::max_width("m", "Tablet", 991);
        let json = serde_json::to_value(&bp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "m", "label": "Tablet", "maxWidth": 991 })
        );
    }
}
