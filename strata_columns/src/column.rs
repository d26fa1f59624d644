// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column definitions: keys, widths, fixed sides, and the column tree.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::str::FromStr;

/// Default lower bound applied while dragging a column edge.
pub const DEFAULT_MIN_WIDTH: f64 = 80.0;

/// Default upper bound applied while dragging a column edge.
pub const DEFAULT_MAX_WIDTH: f64 = 600.0;

/// Unique key identifying a column.
///
/// Keys are cheap to clone and can be looked up by `&str` in key-indexed maps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ColKey(Arc<str>);

impl ColKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColKey {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for ColKey {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Borrow<str> for ColKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Side a column is pinned to while the body scrolls horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FixedSide {
    /// Pinned to the leading (left) edge.
    Left,
    /// Pinned to the trailing (right) edge.
    Right,
}

/// Width of a column, either absolute or relative to the container.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnWidth {
    /// Logical pixels.
    Px(f64),
    /// Percentage of the container width (`0.0..=100.0`).
    Percent(f64),
}

impl ColumnWidth {
    /// Resolves this width against the container width.
    #[must_use]
    pub fn resolve(self, container_width: f64) -> f64 {
        let width = match self {
            Self::Px(px) => px,
            Self::Percent(pct) => container_width.max(0.0) * pct / 100.0,
        };
        debug_assert!(width.is_finite(), "column widths must be finite; got {width:?}");
        width.max(0.0)
    }
}

/// Error returned when parsing a [`ColumnWidth`] from a CSS-like string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseWidthError {
    /// The input was empty or whitespace.
    #[error("column width is empty")]
    Empty,
    /// The input is not a number with an optional `px` or `%` unit.
    #[error("column width `{0}` is not a number with an optional `px` or `%` unit")]
    Invalid(String),
    /// The number is negative, NaN, or infinite.
    #[error("column width `{0}` must be finite and non-negative")]
    OutOfRange(String),
}

impl FromStr for ColumnWidth {
    type Err = ParseWidthError;

    /// Accepts `"120"`, `"120px"`, and `"25%"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseWidthError::Empty);
        }
        let (number, percent) = match trimmed.strip_suffix('%') {
            Some(rest) => (rest, true),
            None => (trimmed.strip_suffix("px").unwrap_or(trimmed), false),
        };
        let value: f64 = number
            .trim_end()
            .parse()
            .map_err(|_| ParseWidthError::Invalid(trimmed.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(ParseWidthError::OutOfRange(trimmed.to_string()));
        }
        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Px(value)
        })
    }
}

/// Limits applied while the user drags a column edge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeLimits {
    /// Smallest width a drag can produce.
    pub min_width: f64,
    /// Largest width a drag can produce.
    pub max_width: f64,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

impl ResizeLimits {
    /// Clamps `width` into these limits.
    #[must_use]
    pub fn clamp(self, width: f64) -> f64 {
        let max = self.max_width.max(self.min_width);
        width.max(self.min_width).min(max)
    }
}

/// A node in the column tree.
///
/// Leaves are rendered body columns; nodes with `children` are header groups
/// spanning their descendants.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Column {
    /// Unique key.
    pub key: ColKey,
    /// Preferred width. Unset widths are resolved by the layout policy.
    pub width: Option<ColumnWidth>,
    /// Lower bound applied after width resolution.
    pub min_width: Option<ColumnWidth>,
    /// Side this column (and its descendants) is pinned to.
    pub fixed: Option<FixedSide>,
    /// Explicit header merge. On a leaf, a value above one hides the header
    /// cells of the following sibling leaves and spans over them. `0` and `1`
    /// both mean "no merge".
    pub colspan: usize,
    /// Drag limits for column resizing.
    pub resize: Option<ResizeLimits>,
    /// Nested columns for multi-row headers.
    pub children: Vec<Column>,
}

impl Column {
    /// Creates a leaf column with the given key.
    pub fn new(key: impl Into<ColKey>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Sets a pixel width.
    #[must_use]
    pub fn width(mut self, px: f64) -> Self {
        self.width = Some(ColumnWidth::Px(px));
        self
    }

    /// Sets the width from a CSS-like string such as `"120px"` or `"25%"`.
    ///
    /// Unparseable input leaves the width unset and logs a warning.
    #[must_use]
    pub fn width_str(mut self, width: &str) -> Self {
        match width.parse() {
            Ok(w) => self.width = Some(w),
            Err(err) => log::warn!("column `{}`: {err}; width left unset", self.key),
        }
        self
    }

    /// Sets a pixel minimum width.
    #[must_use]
    pub fn min_width(mut self, px: f64) -> Self {
        self.min_width = Some(ColumnWidth::Px(px));
        self
    }

    /// Pins this column to a side.
    #[must_use]
    pub fn fixed(mut self, side: FixedSide) -> Self {
        self.fixed = Some(side);
        self
    }

    /// Merges this column's header cell over the next `colspan - 1` siblings.
    #[must_use]
    pub fn colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan;
        self
    }

    /// Sets drag limits.
    #[must_use]
    pub fn resize(mut self, limits: ResizeLimits) -> Self {
        self.resize = Some(limits);
        self
    }

    /// Replaces the children, turning this column into a header group.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Returns `true` if this column has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn explicit_colspan(&self) -> usize {
        self.colspan.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::{ColKey, ColumnWidth, ParseWidthError, ResizeLimits};

    #[test]
    fn parses_css_like_widths() {
        assert_eq!("120".parse(), Ok(ColumnWidth::Px(120.0)));
        assert_eq!(" 80px ".parse(), Ok(ColumnWidth::Px(80.0)));
        assert_eq!("25%".parse(), Ok(ColumnWidth::Percent(25.0)));
        assert_eq!("".parse::<ColumnWidth>(), Err(ParseWidthError::Empty));
        assert!(matches!(
            "wide".parse::<ColumnWidth>(),
            Err(ParseWidthError::Invalid(_))
        ));
        assert!(matches!(
            "-4px".parse::<ColumnWidth>(),
            Err(ParseWidthError::OutOfRange(_))
        ));
    }

    #[test]
    fn percent_widths_follow_container() {
        assert_eq!(ColumnWidth::Percent(25.0).resolve(400.0), 100.0);
        assert_eq!(ColumnWidth::Px(-3.0).resolve(400.0), 0.0);
    }

    #[test]
    fn resize_limits_clamp() {
        let limits = ResizeLimits::default();
        assert_eq!(limits.clamp(10.0), 80.0);
        assert_eq!(limits.clamp(1000.0), 600.0);
        assert_eq!(limits.clamp(120.0), 120.0);
    }

    #[test]
    fn keys_borrow_as_str() {
        let mut map = hashbrown::HashMap::new();
        map.insert(ColKey::from("name"), 1);
        assert_eq!(map.get("name"), Some(&1));
    }
}
